//! The recommendation pipeline.
//!
//! `filter → find conflicts → relax → score → rank`, run to completion for
//! every request. A [`Recommender`] holds only configuration, so one
//! instance can serve concurrent requests by shared reference.

use coursekb_config::RecommenderConfig;
use coursekb_core::{ConstraintKey, ConstraintSet, Course, RawFilterInput};
use serde::Serialize;
use tracing::info;

use crate::catalog::CatalogSource;
use crate::relaxation::{RelaxationEngine, RelaxationPhase, RelaxationTrace};
use crate::scoring::{ScoreRange, ScoredCourse, Scorer};

/// Ranked results of one request, with the relaxation that produced them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Best courses first, at most `top_n`.
    pub results: Vec<ScoredCourse>,
    pub trace: RelaxationTrace,
    pub conflicts: Vec<ConstraintKey>,
    /// Constraints after relaxation.
    pub final_constraints: ConstraintSet,
    pub phase: RelaxationPhase,
    /// Courses matched (or supplied by the fallback) before capping.
    pub total_found: usize,
    pub was_relaxed: bool,
    pub filter_passes: u64,
    pub score_range: Option<ScoreRange>,
}

impl Recommendation {
    /// Rendered trace entries, oldest first.
    pub fn trace_messages(&self) -> Vec<String> {
        self.trace.messages()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Knowledge-based course recommender.
///
/// # Example
///
/// ```
/// use coursekb_core::{Course, RawFilterInput};
/// use coursekb_engine::Recommender;
///
/// let mut guitar = Course::new("1", "Guitar Basics");
/// guitar.category = Some("Music".into());
/// guitar.avg_rating = Some(4.2);
/// let catalog = vec![guitar];
///
/// let filters = RawFilterInput::from_json_str(r#"{"category": "Music", "minRating": "4.5"}"#)
///     .unwrap();
/// let recommendation = Recommender::default().recommend(&catalog, &filters);
///
/// assert_eq!(recommendation.results.len(), 1);
/// assert!(recommendation.was_relaxed);
/// assert_eq!(recommendation.trace_messages(), vec!["Relaxed minRating: 4.5 → 4"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    engine: RelaxationEngine,
    scorer: Scorer,
}

impl Recommender {
    pub fn new(config: &RecommenderConfig) -> Self {
        Self {
            engine: RelaxationEngine::from_config(config),
            scorer: Scorer::new(&config.ranking),
        }
    }

    pub fn engine(&self) -> &RelaxationEngine {
        &self.engine
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Recommends courses for loosely typed filter input.
    ///
    /// Malformed filter values read as neutral; this never fails.
    pub fn recommend<C>(&self, catalog: &C, filters: &RawFilterInput) -> Recommendation
    where
        C: CatalogSource + ?Sized,
    {
        self.recommend_constraints(catalog, ConstraintSet::from_raw(filters))
    }

    /// Recommends courses for an already typed constraint set.
    pub fn recommend_constraints<C>(&self, catalog: &C, constraints: ConstraintSet) -> Recommendation
    where
        C: CatalogSource + ?Sized,
    {
        info!(
            event = "recommend_start",
            constraints = %constraints,
            active = constraints.active_keys().count(),
        );

        let outcome = self.engine.relax(catalog, constraints);
        let was_relaxed = outcome.was_relaxed();
        let total_found = outcome.results.len();
        let results = self.scorer.rank(outcome.results);
        let score_range = ScoreRange::of(&results);

        info!(
            event = "recommend_end",
            phase = %outcome.phase,
            total_found,
            returned = results.len(),
            relaxations = outcome.trace.len(),
            filter_passes = outcome.filter_passes,
        );

        Recommendation {
            results,
            trace: outcome.trace,
            conflicts: outcome.conflicts,
            final_constraints: outcome.constraints,
            phase: outcome.phase,
            total_found,
            was_relaxed,
            filter_passes: outcome.filter_passes,
            score_range,
        }
    }
}

/// Recommends from an in-memory course list with the default configuration.
pub fn recommend(courses: &[Course], filters: &RawFilterInput) -> Recommendation {
    Recommender::default().recommend(courses, filters)
}
