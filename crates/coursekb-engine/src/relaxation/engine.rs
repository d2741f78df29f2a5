//! The relaxation loop.

use coursekb_config::{FallbackConfig, RecommenderConfig, RelaxationConfig};
use coursekb_core::{ConstraintKey, ConstraintSet, Course};
use tracing::{debug, info};

use super::strategy::{KeyStrategy, StepOutcome};
use super::trace::{RelaxationTrace, TraceEntry};
use super::RelaxationPhase;
use crate::catalog::{candidates_or_empty, CatalogSource};
use crate::scope::RelaxationScope;

/// Final state of a relaxation run.
#[derive(Debug, Clone)]
pub struct RelaxationOutcome {
    /// Matching courses, or the popularity fallback when nothing matched.
    pub results: Vec<Course>,
    /// Constraints after relaxation.
    pub constraints: ConstraintSet,
    pub trace: RelaxationTrace,
    /// Phase the run ended in.
    pub phase: RelaxationPhase,
    /// Keys reported by the conflict finder.
    pub conflicts: Vec<ConstraintKey>,
    /// Filter passes run, conflict probes included.
    pub filter_passes: u64,
    pub used_fallback: bool,
}

impl RelaxationOutcome {
    /// Returns true if any relaxation phase ran.
    pub fn was_relaxed(&self) -> bool {
        self.phase != RelaxationPhase::Initial
    }
}

/// Loosens an over-constrained query until some course matches.
///
/// Immutable after construction; one engine serves any number of
/// concurrent requests.
///
/// # Example
///
/// ```
/// use coursekb_core::{ConstraintSet, Course};
/// use coursekb_engine::{RelaxationEngine, RelaxationPhase};
///
/// let mut course = Course::new("1", "Guitar Basics");
/// course.avg_rating = Some(4.2);
/// let catalog = vec![course];
///
/// let engine = RelaxationEngine::default();
/// let outcome = engine.relax(&catalog, ConstraintSet::new().with_min_rating(4.5));
///
/// assert_eq!(outcome.phase, RelaxationPhase::ConflictGuided);
/// assert_eq!(outcome.results.len(), 1);
/// assert_eq!(outcome.trace.messages(), vec!["Relaxed minRating: 4.5 → 4"]);
/// ```
#[derive(Debug, Clone)]
pub struct RelaxationEngine {
    order: Vec<ConstraintKey>,
    strategies: Vec<KeyStrategy>,
    fallback_limit: usize,
}

impl RelaxationEngine {
    pub fn new(relaxation: &RelaxationConfig, fallback: &FallbackConfig) -> Self {
        Self {
            order: relaxation.order.clone(),
            strategies: relaxation.strategies.iter().map(KeyStrategy::from).collect(),
            fallback_limit: fallback.limit,
        }
    }

    pub fn from_config(config: &RecommenderConfig) -> Self {
        Self::new(&config.relaxation, &config.fallback)
    }

    pub fn order(&self) -> &[ConstraintKey] {
        &self.order
    }

    pub fn strategy_for(&self, key: ConstraintKey) -> Option<&KeyStrategy> {
        self.strategies.iter().find(|s| s.key == key)
    }

    /// Filters `catalog` with `constraints`, relaxing them if nothing
    /// matches.
    ///
    /// Never fails: an unavailable catalog reads as empty and an
    /// unsatisfiable query ends in the popularity fallback.
    pub fn relax<C>(&self, catalog: &C, constraints: ConstraintSet) -> RelaxationOutcome
    where
        C: CatalogSource + ?Sized,
    {
        let mut scope = RelaxationScope::new(catalog, constraints);

        if scope.refilter() {
            return scope.finish();
        }

        let conflicts = scope.detect_conflicts().to_vec();
        info!(
            event = "conflicts_found",
            count = conflicts.len(),
            keys = ?conflicts,
        );

        if !conflicts.is_empty() {
            scope.enter_phase(RelaxationPhase::ConflictGuided);
            for key in conflicts {
                if self.relax_key(&mut scope, key) {
                    return scope.finish();
                }
            }
        }

        scope.enter_phase(RelaxationPhase::OrderFallback);
        for &key in &self.order {
            if self.relax_key(&mut scope, key) {
                return scope.finish();
            }
        }

        scope.enter_phase(RelaxationPhase::Exhausted);
        let popular = self.most_popular(catalog);
        scope.use_fallback(popular);
        scope.finish()
    }

    /// Applies the strategy for `key` until a filter pass matches or its
    /// attempt budget runs out. Returns true if something matched.
    fn relax_key<C>(&self, scope: &mut RelaxationScope<'_, C>, key: ConstraintKey) -> bool
    where
        C: CatalogSource + ?Sized,
    {
        let Some(strategy) = self.strategy_for(key) else {
            debug!(event = "relax_key_skipped", key = %key, reason = "no strategy");
            return false;
        };

        for attempt in 1..=strategy.max_attempts {
            match strategy.apply(scope.constraints()) {
                StepOutcome::AlreadyNeutral => return false,
                StepOutcome::AtLimit(reason) => {
                    scope.record(TraceEntry::Skipped { key, reason });
                    return false;
                }
                StepOutcome::Relaxed {
                    from,
                    to,
                    constraints,
                } => {
                    scope.set_constraints(constraints);
                    scope.record(TraceEntry::Relaxed { key, from, to });
                }
                StepOutcome::Removed { constraints } => {
                    scope.set_constraints(constraints);
                    scope.record(TraceEntry::Removed { key });
                }
            }

            if scope.refilter() {
                debug!(event = "relax_key_matched", key = %key, attempt);
                return true;
            }
        }
        false
    }

    /// The catalog's most subscribed courses, ignoring every constraint.
    fn most_popular<C>(&self, catalog: &C) -> Vec<Course>
    where
        C: CatalogSource + ?Sized,
    {
        let unconstrained = ConstraintSet::new();
        let mut courses = candidates_or_empty(catalog, &unconstrained).into_owned();
        courses.sort_by(|a, b| b.num_subscribers.cmp(&a.num_subscribers));
        courses.truncate(self.fallback_limit);
        courses
    }
}

impl Default for RelaxationEngine {
    fn default() -> Self {
        Self::new(&RelaxationConfig::default(), &FallbackConfig::default())
    }
}
