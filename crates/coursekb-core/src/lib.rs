//! coursekb Core - Domain types for knowledge-based course recommendation
//!
//! This crate provides the fundamental abstractions for coursekb:
//! - Course records as supplied by a catalog
//! - Constraint keys, values and typed constraint sets
//! - Normalization of loosely typed filter input into constraints

pub mod constraint;
pub mod course;
pub mod error;

pub use constraint::{ConstraintKey, ConstraintSet, ConstraintValue, RawFilterInput};
pub use course::Course;
pub use error::CourseKbError;
