//! coursekb - Knowledge-based Course Recommendation
//!
//! Filters a course catalog by user constraints and, when nothing matches,
//! relaxes the constraints step by step while recording why.
//!
//! # Example
//!
//! ```rust
//! use coursekb::prelude::*;
//!
//! let mut course = Course::new("1", "Korean for Beginners");
//! course.language = Some("Korean".into());
//! let catalog = InMemoryCatalog::new(vec![course]);
//!
//! let filters = RawFilterInput::new()
//!     .with("language", "Korean")
//!     .with("category", "Music");
//! let recommendation = Recommender::default().recommend(&catalog, &filters);
//!
//! assert_eq!(recommendation.results.len(), 1);
//! assert_eq!(recommendation.trace_messages(), vec!["Removed category filter"]);
//! ```

// Domain types
pub use coursekb_core::{
    ConstraintKey, ConstraintSet, ConstraintValue, Course, CourseKbError, RawFilterInput,
};

// Configuration
pub use coursekb_config::{
    ConfigError, FallbackConfig, RankingConfig, RecommenderConfig, RelaxationConfig,
    ScoreWeights, StrategyConfig, StrategyType,
};

// Pipeline
pub use coursekb_engine::{
    evaluate, filter, find_conflicts, matches, recommend, CatalogError, CatalogSource,
    DatasetMaxima, InMemoryCatalog, Recommendation, Recommender, RelaxationEngine,
    RelaxationOutcome, RelaxationPhase, RelaxationTrace, ScoreRange, ScoredCourse, Scorer,
    TraceEntry,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{ConstraintKey, ConstraintSet, Course, RawFilterInput};
    pub use super::{CatalogSource, InMemoryCatalog, Recommendation, Recommender};
    pub use super::{RecommenderConfig, RelaxationPhase, ScoredCourse};
    pub use super::recommend;
}
