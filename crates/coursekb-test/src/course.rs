//! Course record builder.
//!
//! # Example
//!
//! ```
//! use coursekb_test::course::CourseBuilder;
//!
//! let course = CourseBuilder::new("42")
//!     .title("Jazz Piano")
//!     .category("Music")
//!     .rating(4.5)
//!     .subscribers(1200)
//!     .build();
//!
//! assert_eq!(course.id, "42");
//! assert_eq!(course.avg_rating, Some(4.5));
//! assert_eq!(course.num_subscribers, 1200);
//! ```

use coursekb_core::Course;

/// Fluent builder for [`Course`] fixtures.
#[derive(Clone, Debug)]
pub struct CourseBuilder {
    course: Course,
}

impl CourseBuilder {
    /// Starts a course with the given id and a title derived from it.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let title = format!("Course {id}");
        Self {
            course: Course::new(id, title),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.course.title = Some(title.into());
        self
    }

    /// Removes the title entirely.
    pub fn untitled(mut self) -> Self {
        self.course.title = None;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.course.category = Some(category.into());
        self
    }

    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.course.subcategory = Some(subcategory.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.course.language = Some(language.into());
        self
    }

    /// Sets the price and marks the course paid when the price is positive.
    pub fn price(mut self, price: f64) -> Self {
        self.course.price = Some(price);
        self.course.is_paid = price > 0.0;
        self
    }

    pub fn paid(mut self, is_paid: bool) -> Self {
        self.course.is_paid = is_paid;
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.course.avg_rating = Some(rating);
        self
    }

    pub fn subscribers(mut self, n: u64) -> Self {
        self.course.num_subscribers = n;
        self
    }

    pub fn reviews(mut self, n: u64) -> Self {
        self.course.num_reviews = n;
        self
    }

    pub fn lectures(mut self, n: u64) -> Self {
        self.course.num_lectures = n;
        self
    }

    pub fn minutes(mut self, minutes: u32) -> Self {
        self.course.content_length_min = Some(minutes);
        self
    }

    pub fn build(self) -> Course {
        self.course
    }
}
