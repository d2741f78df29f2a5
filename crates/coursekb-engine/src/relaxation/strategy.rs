//! Relaxation strategies.

use coursekb_config::{StrategyConfig, StrategyType};
use coursekb_core::{ConstraintKey, ConstraintSet, ConstraintValue};

/// How a single key is loosened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelaxationStrategy {
    /// Lower a minimum bound by `step`, never below `floor`.
    Decrement { step: f64, floor: f64 },

    /// Raise a maximum bound by `step`, never above `ceiling`.
    Increment { step: f64, ceiling: Option<f64> },

    /// Reset the key to its neutral value.
    Remove,
}

/// Why an attempt changed nothing but was still worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The bound is already at its neutral value.
    Unconstrained,
    /// A decrement reached its floor.
    AtFloor,
    /// An increment reached its ceiling.
    AtCeiling,
}

impl SkipReason {
    pub fn describe(self) -> &'static str {
        match self {
            SkipReason::Unconstrained => "already unconstrained",
            SkipReason::AtFloor => "already at its minimum",
            SkipReason::AtCeiling => "already at its maximum",
        }
    }
}

/// Result of applying a strategy once.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// A bound moved from `from` to `to`.
    Relaxed {
        from: ConstraintValue,
        to: ConstraintValue,
        constraints: ConstraintSet,
    },

    /// The key was reset to neutral.
    Removed { constraints: ConstraintSet },

    /// The bound cannot move any further.
    AtLimit(SkipReason),

    /// Removing a key that is already neutral; not worth reporting.
    AlreadyNeutral,
}

impl RelaxationStrategy {
    /// Applies this strategy to `key` once.
    ///
    /// Returns a new constraint set on success; `constraints` is never
    /// modified.
    ///
    /// ```
    /// use coursekb_core::{ConstraintKey, ConstraintSet, ConstraintValue};
    /// use coursekb_engine::{RelaxationStrategy, StepOutcome};
    ///
    /// let strategy = RelaxationStrategy::Decrement { step: 0.5, floor: 0.0 };
    /// let constraints = ConstraintSet::new().with_min_rating(4.5);
    ///
    /// match strategy.apply(ConstraintKey::MinRating, &constraints) {
    ///     StepOutcome::Relaxed { to, constraints, .. } => {
    ///         assert_eq!(to, ConstraintValue::Number(4.0));
    ///         assert_eq!(constraints.min_rating, 4.0);
    ///     }
    ///     other => panic!("unexpected outcome {other:?}"),
    /// }
    /// ```
    pub fn apply(&self, key: ConstraintKey, constraints: &ConstraintSet) -> StepOutcome {
        let current = constraints.value(key);
        match *self {
            RelaxationStrategy::Remove => {
                if constraints.is_neutral(key) {
                    StepOutcome::AlreadyNeutral
                } else {
                    StepOutcome::Removed {
                        constraints: constraints.neutralized(key),
                    }
                }
            }
            RelaxationStrategy::Decrement { step, floor } => {
                let ConstraintValue::Number(value) = current else {
                    return StepOutcome::AlreadyNeutral;
                };
                if value <= floor {
                    let reason = if constraints.is_neutral(key) {
                        SkipReason::Unconstrained
                    } else {
                        SkipReason::AtFloor
                    };
                    return StepOutcome::AtLimit(reason);
                }
                let next = (value - step).max(floor);
                relaxed(key, constraints, value, next)
            }
            RelaxationStrategy::Increment { step, ceiling } => {
                let ConstraintValue::Number(value) = current else {
                    return StepOutcome::AlreadyNeutral;
                };
                if value.is_infinite() {
                    return StepOutcome::AtLimit(SkipReason::Unconstrained);
                }
                if ceiling.is_some_and(|c| value >= c) {
                    return StepOutcome::AtLimit(SkipReason::AtCeiling);
                }
                let next = ceiling.map_or(value + step, |c| (value + step).min(c));
                relaxed(key, constraints, value, next)
            }
        }
    }
}

fn relaxed(key: ConstraintKey, constraints: &ConstraintSet, from: f64, to: f64) -> StepOutcome {
    let next = constraints.with_value(key, ConstraintValue::Number(to));
    StepOutcome::Relaxed {
        from: ConstraintValue::Number(from),
        to: next.value(key),
        constraints: next,
    }
}

/// A strategy bound to its key, with an attempt budget.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyStrategy {
    pub key: ConstraintKey,
    pub strategy: RelaxationStrategy,
    pub max_attempts: u32,
}

impl KeyStrategy {
    pub fn new(key: ConstraintKey, strategy: RelaxationStrategy, max_attempts: u32) -> Self {
        Self {
            key,
            strategy,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn apply(&self, constraints: &ConstraintSet) -> StepOutcome {
        self.strategy.apply(self.key, constraints)
    }
}

impl From<&StrategyConfig> for KeyStrategy {
    fn from(config: &StrategyConfig) -> Self {
        let strategy = match config.kind {
            StrategyType::Decrement => RelaxationStrategy::Decrement {
                step: config.step,
                floor: config.limit.unwrap_or(0.0),
            },
            StrategyType::Increment => RelaxationStrategy::Increment {
                step: config.step,
                ceiling: config.limit,
            },
            StrategyType::Remove => RelaxationStrategy::Remove,
        };
        KeyStrategy::new(config.key, strategy, config.max_attempts)
    }
}
