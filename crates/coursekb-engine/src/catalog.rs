//! Catalog sources.
//!
//! A [`CatalogSource`] supplies candidate courses for a constraint set. A
//! source may return its full catalog or pre-filter it (a database query
//! keyed by the constraints); the engine re-filters every answer locally,
//! so either behavior yields the same recommendations.

use std::borrow::Cow;
use std::path::Path;

use coursekb_core::{ConstraintSet, Course};
use thiserror::Error;
use tracing::warn;

use crate::predicate;

/// Errors raised by a catalog source.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing store could not be reached.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Supplies candidate courses for a constraint set.
///
/// Implementations must be safe to call repeatedly during a single request;
/// the engine queries once per filter pass.
pub trait CatalogSource {
    /// Returns courses that may satisfy `constraints`.
    ///
    /// Returning more courses than match is allowed; returning fewer loses
    /// recommendations.
    fn candidates(&self, constraints: &ConstraintSet) -> Result<Cow<'_, [Course]>, CatalogError>;
}

impl CatalogSource for [Course] {
    fn candidates(&self, _constraints: &ConstraintSet) -> Result<Cow<'_, [Course]>, CatalogError> {
        Ok(Cow::Borrowed(self))
    }
}

impl CatalogSource for Vec<Course> {
    fn candidates(&self, _constraints: &ConstraintSet) -> Result<Cow<'_, [Course]>, CatalogError> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

/// A catalog held entirely in memory.
///
/// # Example
///
/// ```
/// use coursekb_engine::{CatalogSource, InMemoryCatalog};
/// use coursekb_core::ConstraintSet;
///
/// let catalog = InMemoryCatalog::from_json_str(r#"[
///     {"id": 1, "title": "Guitar Basics", "category": "Music"},
///     {"id": 2, "title": "Rust in Action", "category": "Development"}
/// ]"#).unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// let all = catalog.candidates(&ConstraintSet::new()).unwrap();
/// assert_eq!(all.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    courses: Vec<Course>,
}

impl InMemoryCatalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Parses a JSON array of course records.
    pub fn from_json_str(s: &str) -> Result<Self, CatalogError> {
        Ok(Self::new(serde_json::from_str(s)?))
    }

    /// Loads a JSON array of course records from a file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl FromIterator<Course> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl CatalogSource for InMemoryCatalog {
    fn candidates(&self, _constraints: &ConstraintSet) -> Result<Cow<'_, [Course]>, CatalogError> {
        Ok(Cow::Borrowed(self.courses.as_slice()))
    }
}

/// Fetches candidates, treating an unavailable catalog as empty.
pub(crate) fn candidates_or_empty<'a, C>(
    catalog: &'a C,
    constraints: &ConstraintSet,
) -> Cow<'a, [Course]>
where
    C: CatalogSource + ?Sized,
{
    match catalog.candidates(constraints) {
        Ok(courses) => courses,
        Err(e) => {
            warn!(event = "catalog_unavailable", error = %e);
            Cow::Owned(Vec::new())
        }
    }
}

/// Courses from `catalog` matching `constraints`, in catalog order.
pub fn evaluate<C>(catalog: &C, constraints: &ConstraintSet) -> Vec<Course>
where
    C: CatalogSource + ?Sized,
{
    let candidates = candidates_or_empty(catalog, constraints);
    predicate::filter(&candidates, constraints)
        .into_iter()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{CourseBuilder, PrefilteringCatalog, UnavailableCatalog};

    #[test]
    fn test_slice_and_vec_are_sources() {
        let courses = vec![CourseBuilder::new("a").build(), CourseBuilder::new("b").build()];
        let constraints = ConstraintSet::new();
        assert_eq!(courses.candidates(&constraints).unwrap().len(), 2);
        assert_eq!(courses[..1].candidates(&constraints).unwrap().len(), 1);
    }

    #[test]
    fn test_unavailable_catalog_is_empty() {
        let courses = evaluate(&UnavailableCatalog, &ConstraintSet::new());
        assert!(courses.is_empty());
    }

    #[test]
    fn test_prefiltered_answers_are_refiltered_locally() {
        let catalog = PrefilteringCatalog::new(vec![
            CourseBuilder::new("a").category("Music").rating(4.8).build(),
            CourseBuilder::new("b").category("Music").rating(3.0).build(),
            CourseBuilder::new("c").category("Design").rating(4.9).build(),
        ]);
        let constraints = ConstraintSet::new().with_category("Music").with_min_rating(4.0);

        let ids: Vec<_> = evaluate(&catalog, &constraints)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        assert!(matches!(
            InMemoryCatalog::from_json_str("{\"id\": 1}"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_from_iterator() {
        let catalog: InMemoryCatalog = (0..3)
            .map(|i| CourseBuilder::new(i.to_string()).build())
            .collect();
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
    }
}
