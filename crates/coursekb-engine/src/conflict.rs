//! Conflict detection for over-constrained queries.
//!
//! A conflict key is a constraint that is individually blocking: resetting
//! it alone to neutral, with every other constraint unchanged, turns an empty
//! result into a non-empty one. This is a one-at-a-time approximation; it
//! does not search for minimal combinations of constraints.
//!
//! Each probe works on a neutralized copy of the constraint set, so the
//! caller's set is never modified.

use coursekb_core::{ConstraintKey, ConstraintSet};
use tracing::trace;

use crate::catalog::{candidates_or_empty, CatalogSource};
use crate::predicate;

/// Finds the keys whose individual neutralization yields results.
///
/// Keys are probed in enumeration order and reported in that order.
///
/// # Example
///
/// ```
/// use coursekb_core::{ConstraintKey, ConstraintSet, Course};
/// use coursekb_engine::find_conflicts;
///
/// let mut course = Course::new("1", "Intro to Go");
/// course.category = Some("Development".into());
/// course.language = Some("Korean".into());
/// let catalog = vec![course];
///
/// let constraints = ConstraintSet::new()
///     .with_category("Music")
///     .with_language("Korean");
///
/// assert_eq!(find_conflicts(&constraints, &catalog), vec![ConstraintKey::Category]);
/// ```
pub fn find_conflicts<C>(constraints: &ConstraintSet, catalog: &C) -> Vec<ConstraintKey>
where
    C: CatalogSource + ?Sized,
{
    find_conflicts_with(constraints, |probe| {
        let candidates = candidates_or_empty(catalog, probe);
        predicate::any_match(&candidates, probe)
    })
}

/// Finds conflict keys using a caller-supplied satisfiability check.
///
/// `is_satisfiable` receives each probe set and reports whether it has at
/// least one match.
pub fn find_conflicts_with<F>(
    constraints: &ConstraintSet,
    mut is_satisfiable: F,
) -> Vec<ConstraintKey>
where
    F: FnMut(&ConstraintSet) -> bool,
{
    constraints
        .active_keys()
        .filter(|key| {
            let probe = constraints.neutralized(*key);
            let satisfiable = is_satisfiable(&probe);
            trace!(event = "conflict_probe", key = %key, satisfiable);
            satisfiable
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        no_music_catalog, rating_ladder, sample_catalog, PrefilteringCatalog,
    };

    #[test]
    fn test_music_without_korean_alternatives() {
        let catalog = no_music_catalog(false);
        let constraints = ConstraintSet::new()
            .with_category("Music")
            .with_language("Korean");

        // Without the category nobody speaks Korean; without the language
        // nothing is Music. Neither key alone is the bottleneck.
        assert!(find_conflicts(&constraints, &catalog).is_empty());
    }

    #[test]
    fn test_music_with_korean_alternatives() {
        let catalog = no_music_catalog(true);
        let constraints = ConstraintSet::new()
            .with_category("Music")
            .with_language("Korean");

        assert_eq!(
            find_conflicts(&constraints, &catalog),
            vec![ConstraintKey::Category]
        );
    }

    #[test]
    fn test_single_threshold_conflict() {
        let catalog = rating_ladder();
        let constraints = ConstraintSet::new().with_min_rating(4.5);
        assert_eq!(
            find_conflicts(&constraints, &catalog),
            vec![ConstraintKey::MinRating]
        );
    }

    #[test]
    fn test_several_conflicts_in_enumeration_order() {
        let catalog = sample_catalog();
        // Only Korean Development course is Java Masterclass (4.1, 99.99).
        let constraints = ConstraintSet::new()
            .with_language("Korean")
            .with_category("Development")
            .with_max_price(150.0)
            .with_min_rating(4.5);

        assert_eq!(
            find_conflicts(&constraints, &catalog),
            vec![
                ConstraintKey::Category,
                ConstraintKey::Language,
                ConstraintKey::MinRating
            ]
        );
    }

    #[test]
    fn test_constraints_are_not_modified() {
        let catalog = sample_catalog();
        let constraints = ConstraintSet::new()
            .with_category("Music")
            .with_min_rating(4.9);
        let before = constraints.clone();

        find_conflicts(&constraints, &catalog);
        assert_eq!(constraints, before);
    }

    #[test]
    fn test_unconstrained_set_has_no_conflicts() {
        let mut probes = 0;
        let conflicts = find_conflicts_with(&ConstraintSet::new(), |_| {
            probes += 1;
            true
        });
        assert!(conflicts.is_empty());
        assert_eq!(probes, 0);
    }

    #[test]
    fn test_probes_query_the_catalog_once_per_active_key() {
        let catalog = PrefilteringCatalog::new(sample_catalog());
        let constraints = ConstraintSet::new()
            .with_category("Music")
            .with_language("Korean")
            .with_min_rating(4.0);

        find_conflicts(&constraints, &catalog);
        assert_eq!(catalog.queries(), 3);
    }
}
