//! Test utilities for coursekb-engine
//!
//! Re-exports course fixtures from coursekb-test and adds catalog source
//! doubles that need the engine's `CatalogSource` trait.

use std::borrow::Cow;
use std::cell::Cell;

use coursekb_core::{ConstraintSet, Course};

use crate::catalog::{CatalogError, CatalogSource};

pub use coursekb_test::catalog::{
    ids, no_music_catalog, premium_catalog, rating_ladder, sample_catalog,
};
pub use coursekb_test::course::CourseBuilder;

/// Mimics a database that applies only the category filter itself and
/// counts how often it was queried.
#[derive(Debug)]
pub struct PrefilteringCatalog {
    courses: Vec<Course>,
    queries: Cell<usize>,
}

impl PrefilteringCatalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            queries: Cell::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.get()
    }
}

impl CatalogSource for PrefilteringCatalog {
    fn candidates(&self, constraints: &ConstraintSet) -> Result<Cow<'_, [Course]>, CatalogError> {
        self.queries.set(self.queries.get() + 1);
        let selected = self
            .courses
            .iter()
            .filter(|c| match &constraints.category {
                Some(category) => c.category.as_ref() == Some(category),
                None => true,
            })
            .cloned()
            .collect();
        Ok(Cow::Owned(selected))
    }
}

/// A catalog whose backing store is always down.
#[derive(Debug)]
pub struct UnavailableCatalog;

impl CatalogSource for UnavailableCatalog {
    fn candidates(&self, _constraints: &ConstraintSet) -> Result<Cow<'_, [Course]>, CatalogError> {
        Err(CatalogError::Unavailable("connection refused".into()))
    }
}
