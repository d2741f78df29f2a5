//! Constraint relaxation.
//!
//! When a constraint set matches nothing, the [`RelaxationEngine`] loosens
//! constraints step by step until some course matches:
//!
//! - [`RelaxationPhase::Initial`]: the unmodified constraints are tried once
//! - [`RelaxationPhase::ConflictGuided`]: keys that individually block the
//!   query are relaxed first
//! - [`RelaxationPhase::OrderFallback`]: keys are relaxed in a fixed order,
//!   numeric bounds before categorical filters
//! - [`RelaxationPhase::Exhausted`]: nothing matched; the most popular
//!   courses are returned instead
//!
//! Every attempt is recorded in a [`RelaxationTrace`].

mod engine;
mod strategy;
mod trace;

use std::fmt;

use serde::Serialize;

pub use engine::{RelaxationEngine, RelaxationOutcome};
pub use strategy::{KeyStrategy, RelaxationStrategy, SkipReason, StepOutcome};
pub use trace::{RelaxationTrace, TraceEntry};

/// State of a relaxation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelaxationPhase {
    /// Unmodified constraints.
    Initial,

    /// Relaxing keys reported by the conflict finder.
    ConflictGuided,

    /// Relaxing keys in the configured fallback order.
    OrderFallback,

    /// Every strategy was tried; results come from the popularity fallback.
    Exhausted,
}

impl RelaxationPhase {
    pub fn name(self) -> &'static str {
        match self {
            RelaxationPhase::Initial => "Initial",
            RelaxationPhase::ConflictGuided => "Conflict Guided",
            RelaxationPhase::OrderFallback => "Order Fallback",
            RelaxationPhase::Exhausted => "Exhausted",
        }
    }

    /// Returns true once the phase can no longer change.
    pub fn is_terminal(self) -> bool {
        self == RelaxationPhase::Exhausted
    }
}

impl fmt::Display for RelaxationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
