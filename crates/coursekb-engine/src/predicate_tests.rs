//! Tests for predicate evaluation.

use super::*;
use crate::test_utils::{ids, sample_catalog, CourseBuilder};
use coursekb_core::ConstraintKey;

#[test]
fn test_neutral_constraints_return_full_dataset_in_order() {
    let catalog = sample_catalog();
    let result = filter(&catalog, &ConstraintSet::new());
    assert_eq!(result.len(), catalog.len());
    assert_eq!(ids(result), ids(&catalog));
}

#[test]
fn test_neutral_constraints_match_bare_course() {
    let bare = CourseBuilder::new("bare").untitled().build();
    assert!(matches(&bare, &ConstraintSet::new()));
}

#[test]
fn test_text_fields_are_exact_and_case_sensitive() {
    let course = CourseBuilder::new("c")
        .category("Music")
        .subcategory("Instruments")
        .language("English")
        .build();

    assert!(matches(&course, &ConstraintSet::new().with_category("Music")));
    assert!(!matches(&course, &ConstraintSet::new().with_category("music")));
    assert!(!matches(&course, &ConstraintSet::new().with_subcategory("Instr")));
    assert!(!matches(&course, &ConstraintSet::new().with_language("Korean")));
}

#[test]
fn test_missing_text_field_fails_active_constraint() {
    let course = CourseBuilder::new("c").build();
    assert!(!matches(&course, &ConstraintSet::new().with_language("English")));
}

#[test]
fn test_is_paid_absent_reads_as_free() {
    let free = CourseBuilder::new("free").build();
    let paid = CourseBuilder::new("paid").price(10.0).build();

    let want_free = ConstraintSet::new().with_is_paid(false);
    let want_paid = ConstraintSet::new().with_is_paid(true);
    assert!(matches(&free, &want_free));
    assert!(!matches(&free, &want_paid));
    assert!(matches(&paid, &want_paid));
}

#[test]
fn test_min_rating_treats_missing_rating_as_zero() {
    let unrated = CourseBuilder::new("u").build();
    let rated = CourseBuilder::new("r").rating(4.0).build();
    let constraints = ConstraintSet::new().with_min_rating(4.0);

    assert!(!matches(&unrated, &constraints));
    assert!(matches(&rated, &constraints));
}

#[test]
fn test_max_price_bounds() {
    let course = CourseBuilder::new("c").price(50.0).build();
    let no_price = CourseBuilder::new("n").build();

    assert!(matches(&course, &ConstraintSet::new().with_max_price(50.0)));
    assert!(!matches(&course, &ConstraintSet::new().with_max_price(49.99)));
    assert!(matches(&no_price, &ConstraintSet::new().with_max_price(0.0)));
    assert!(matches(
        &course,
        &ConstraintSet::new().with_max_price(f64::INFINITY)
    ));
}

#[test]
fn test_duration_bounds() {
    let course = CourseBuilder::new("c").minutes(90).build();
    let unknown = CourseBuilder::new("u").build();

    assert!(matches(&course, &ConstraintSet::new().with_min_duration(90)));
    assert!(!matches(&course, &ConstraintSet::new().with_min_duration(91)));
    assert!(matches(&course, &ConstraintSet::new().with_max_duration(90)));
    assert!(!matches(&course, &ConstraintSet::new().with_max_duration(60)));
    assert!(!matches(&unknown, &ConstraintSet::new().with_min_duration(1)));
    assert!(matches(&unknown, &ConstraintSet::new().with_max_duration(0)));
}

#[test]
fn test_topic_is_case_insensitive_title_substring() {
    let course = CourseBuilder::new("c").title("Complete PYTHON Bootcamp").build();
    let untitled = CourseBuilder::new("u").untitled().build();

    assert!(matches(&course, &ConstraintSet::new().with_topic("python")));
    assert!(matches(&course, &ConstraintSet::new().with_topic("Boot")));
    assert!(!matches(&course, &ConstraintSet::new().with_topic("java")));
    assert!(!matches(&untitled, &ConstraintSet::new().with_topic("python")));
}

#[test]
fn test_all_constraints_must_hold() {
    let catalog = sample_catalog();
    let constraints = ConstraintSet::new()
        .with_category("Development")
        .with_language("English")
        .with_min_rating(4.7);

    assert_eq!(ids(filter(&catalog, &constraints)), vec!["6", "8"]);
    assert!(any_match(&catalog, &constraints));
    assert!(!any_match(&catalog, &constraints.clone().with_topic("piano")));
}

#[test]
fn test_relaxing_never_removes_matches() {
    let catalog = sample_catalog();
    let strict = ConstraintSet::new()
        .with_category("Music")
        .with_language("English")
        .with_is_paid(false)
        .with_min_rating(4.0)
        .with_max_price(60.0)
        .with_min_duration(100)
        .with_max_duration(500)
        .with_topic("piano");

    let mut current = strict;
    let mut previous = ids(filter(&catalog, &current));
    for key in ConstraintKey::ALL {
        current = current.neutralized(key);
        let now = ids(filter(&catalog, &current));
        for id in &previous {
            assert!(now.contains(id), "neutralizing {key} removed course {id}");
        }
        previous = now;
    }
    assert_eq!(previous.len(), catalog.len());
}
