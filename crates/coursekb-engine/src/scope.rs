//! Request-level scope for a relaxation run.

use std::time::{Duration, Instant};

use coursekb_core::{ConstraintKey, ConstraintSet, Course};
use tracing::{debug, info};

use crate::catalog::{candidates_or_empty, evaluate, CatalogSource};
use crate::conflict::find_conflicts_with;
use crate::predicate;
use crate::relaxation::{RelaxationOutcome, RelaxationPhase, RelaxationTrace, TraceEntry};

/// Working state of one relaxation run.
///
/// Owns the current constraint set, the latest filter result and the trace.
/// Nothing in a scope is shared between requests.
pub struct RelaxationScope<'c, C: CatalogSource + ?Sized> {
    catalog: &'c C,
    constraints: ConstraintSet,
    results: Vec<Course>,
    trace: RelaxationTrace,
    phase: RelaxationPhase,
    phase_start: Instant,
    conflicts: Vec<ConstraintKey>,
    filter_passes: u64,
    used_fallback: bool,
    start_time: Instant,
}

impl<'c, C: CatalogSource + ?Sized> RelaxationScope<'c, C> {
    pub fn new(catalog: &'c C, constraints: ConstraintSet) -> Self {
        let now = Instant::now();
        Self {
            catalog,
            constraints,
            results: Vec::new(),
            trace: RelaxationTrace::new(),
            phase: RelaxationPhase::Initial,
            phase_start: now,
            conflicts: Vec::new(),
            filter_passes: 0,
            used_fallback: false,
            start_time: now,
        }
    }

    pub fn catalog(&self) -> &'c C {
        self.catalog
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn set_constraints(&mut self, constraints: ConstraintSet) {
        self.constraints = constraints;
    }

    pub fn results(&self) -> &[Course] {
        &self.results
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Filters the catalog with the current constraints.
    ///
    /// Returns true if anything matched.
    pub fn refilter(&mut self) -> bool {
        self.results = evaluate(self.catalog, &self.constraints);
        self.filter_passes += 1;
        debug!(
            event = "filter_pass",
            phase = %self.phase,
            matches = self.results.len(),
            constraints = %self.constraints,
        );
        self.has_results()
    }

    /// Runs the conflict finder against the current constraints and keeps
    /// its report.
    pub fn detect_conflicts(&mut self) -> &[ConstraintKey] {
        let catalog = self.catalog;
        let mut probes = 0u64;
        let conflicts = find_conflicts_with(&self.constraints, |probe| {
            probes += 1;
            let candidates = candidates_or_empty(catalog, probe);
            predicate::any_match(&candidates, probe)
        });
        self.filter_passes += probes;
        self.conflicts = conflicts;
        &self.conflicts
    }

    pub fn conflicts(&self) -> &[ConstraintKey] {
        &self.conflicts
    }

    pub fn phase(&self) -> RelaxationPhase {
        self.phase
    }

    /// Moves to `phase`, closing the current one.
    pub fn enter_phase(&mut self, phase: RelaxationPhase) {
        self.end_phase();
        self.phase = phase;
        self.phase_start = Instant::now();
        info!(
            event = "phase_start",
            phase = %phase,
            constraints = %self.constraints,
        );
    }

    fn end_phase(&self) {
        info!(
            event = "phase_end",
            phase = %self.phase,
            duration_ms = self.phase_start.elapsed().as_millis() as u64,
            trace_len = self.trace.len(),
            matches = self.results.len(),
        );
    }

    /// Appends a trace entry.
    pub fn record(&mut self, entry: TraceEntry) {
        debug!(event = "relax_step", phase = %self.phase, step = %entry);
        self.trace.push(entry);
    }

    pub fn trace(&self) -> &RelaxationTrace {
        &self.trace
    }

    /// Replaces the results with the popularity fallback.
    pub fn use_fallback(&mut self, courses: Vec<Course>) {
        info!(
            event = "popularity_fallback",
            courses = courses.len(),
        );
        self.results = courses;
        self.used_fallback = true;
        self.record(TraceEntry::PopularityFallback);
    }

    pub fn filter_passes(&self) -> u64 {
        self.filter_passes
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Closes the run and hands its state to the caller.
    pub fn finish(self) -> RelaxationOutcome {
        self.end_phase();
        RelaxationOutcome {
            results: self.results,
            constraints: self.constraints,
            trace: self.trace,
            phase: self.phase,
            conflicts: self.conflicts,
            filter_passes: self.filter_passes,
            used_fallback: self.used_fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{no_music_catalog, rating_ladder, UnavailableCatalog};

    #[test]
    fn test_refilter_counts_passes() {
        let catalog = rating_ladder();
        let mut scope = RelaxationScope::new(&catalog, ConstraintSet::new().with_min_rating(4.5));

        assert!(!scope.refilter());
        scope.set_constraints(scope.constraints().clone().with_min_rating(4.0));
        assert!(scope.refilter());
        assert_eq!(scope.results().len(), 2);
        assert_eq!(scope.filter_passes(), 2);
    }

    #[test]
    fn test_detect_conflicts_counts_probes() {
        let catalog = no_music_catalog(true);
        let constraints = ConstraintSet::new()
            .with_category("Music")
            .with_language("Korean");
        let mut scope = RelaxationScope::new(&catalog, constraints);

        assert_eq!(scope.detect_conflicts(), &[ConstraintKey::Category]);
        assert_eq!(scope.conflicts(), &[ConstraintKey::Category]);
        assert_eq!(scope.filter_passes(), 2);
    }

    #[test]
    fn test_fallback_is_recorded() {
        let mut scope = RelaxationScope::new(&UnavailableCatalog, ConstraintSet::new());
        assert!(!scope.refilter());

        scope.enter_phase(RelaxationPhase::Exhausted);
        scope.use_fallback(Vec::new());
        let outcome = scope.finish();

        assert!(outcome.used_fallback);
        assert_eq!(outcome.phase, RelaxationPhase::Exhausted);
        assert_eq!(outcome.trace.last(), Some(&TraceEntry::PopularityFallback));
    }
}
