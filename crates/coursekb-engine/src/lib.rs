//! coursekb Engine
//!
//! This crate provides the knowledge-based recommendation pipeline:
//! - Catalog sources supplying candidate courses
//! - Predicate evaluation of constraint sets against courses
//! - Conflict detection for over-constrained queries
//! - Constraint relaxation with a human-readable trace
//! - Weighted scoring and ranking
//!
//! Logging levels:
//! - **INFO**: Request start/end, phase transitions, popularity fallback
//! - **DEBUG**: Individual relaxation attempts and filter passes
//! - **TRACE**: Conflict probes

pub mod catalog;
pub mod conflict;
pub mod predicate;
pub mod recommender;
pub mod relaxation;
pub mod scope;
pub mod scoring;

#[cfg(test)]
mod test_utils;

pub use catalog::{evaluate, CatalogError, CatalogSource, InMemoryCatalog};
pub use conflict::{find_conflicts, find_conflicts_with};
pub use predicate::{filter, matches};
pub use recommender::{recommend, Recommendation, Recommender};
pub use relaxation::{
    KeyStrategy, RelaxationEngine, RelaxationOutcome, RelaxationPhase, RelaxationStrategy,
    RelaxationTrace, SkipReason, StepOutcome, TraceEntry,
};
pub use scope::RelaxationScope;
pub use scoring::{DatasetMaxima, ScoreRange, ScoredCourse, Scorer};
