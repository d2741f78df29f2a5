//! Predicate evaluation of constraint sets against courses.
//!
//! Every active constraint must hold for a course to match. Neutral
//! constraints are skipped entirely, so an unconstrained set matches every
//! course regardless of missing or odd field values.

use coursekb_core::{ConstraintSet, Course};

/// Returns true if `course` satisfies every constraint in `constraints`.
///
/// Absent course fields are read as their zero value: rating, price and
/// length as `0`, title as the empty string, `is_paid` as `false`.
///
/// # Example
///
/// ```
/// use coursekb_core::{ConstraintSet, Course};
/// use coursekb_engine::matches;
///
/// let mut course = Course::new("1", "Advanced Python Patterns");
/// course.avg_rating = Some(4.6);
///
/// assert!(matches(&course, &ConstraintSet::new().with_topic("python")));
/// assert!(matches(&course, &ConstraintSet::new().with_min_rating(4.5)));
/// assert!(!matches(&course, &ConstraintSet::new().with_is_paid(true)));
/// ```
pub fn matches(course: &Course, constraints: &ConstraintSet) -> bool {
    if !text_matches(course.category.as_deref(), constraints.category.as_deref()) {
        return false;
    }
    if !text_matches(
        course.subcategory.as_deref(),
        constraints.subcategory.as_deref(),
    ) {
        return false;
    }
    if !text_matches(course.language.as_deref(), constraints.language.as_deref()) {
        return false;
    }
    if let Some(is_paid) = constraints.is_paid {
        if course.is_paid != is_paid {
            return false;
        }
    }
    if constraints.min_rating > 0.0 && course.rating_or_zero() < constraints.min_rating {
        return false;
    }
    if constraints.max_price.is_finite() && course.price_or_zero() > constraints.max_price {
        return false;
    }
    if constraints.min_duration > 0 && course.length_or_zero() < constraints.min_duration {
        return false;
    }
    if let Some(max_duration) = constraints.max_duration {
        if course.length_or_zero() > max_duration {
            return false;
        }
    }
    if let Some(topic) = constraints.topic.as_deref() {
        let title = course.title_or_empty().to_lowercase();
        if !title.contains(&topic.to_lowercase()) {
            return false;
        }
    }
    true
}

/// Courses in `dataset` matching `constraints`, in their original order.
pub fn filter<'a>(dataset: &'a [Course], constraints: &ConstraintSet) -> Vec<&'a Course> {
    dataset
        .iter()
        .filter(|course| matches(course, constraints))
        .collect()
}

/// Returns true if at least one course in `dataset` matches.
pub fn any_match(dataset: &[Course], constraints: &ConstraintSet) -> bool {
    dataset.iter().any(|course| matches(course, constraints))
}

fn text_matches(field: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        Some(wanted) => field == Some(wanted),
        None => true,
    }
}

#[cfg(test)]
#[path = "predicate_tests.rs"]
mod tests;
