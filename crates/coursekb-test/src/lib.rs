//! Shared test fixtures for coursekb crates.
//!
//! This crate provides data types and pure functions for testing.
//! It does NOT depend on `coursekb-engine` to avoid circular dependencies;
//! catalog source doubles live next to the engine's own tests.
//!
//! - [`course`] - Fluent builder for course records
//! - [`catalog`] - Ready-made catalogs for common relaxation scenarios
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! coursekb-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use coursekb_test::course::CourseBuilder;
//! use coursekb_test::catalog::{sample_catalog, ids};
//! ```

pub mod catalog;
pub mod course;

// Re-export commonly used items at crate root for convenience
pub use catalog::{ids, sample_catalog};
pub use course::CourseBuilder;
