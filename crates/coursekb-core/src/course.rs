//! Course records supplied by a catalog.
//!
//! Courses are read-only for the duration of a recommendation request.
//! Catalog exports store decimals inconsistently (`4.85` or `"4.85"`), so the
//! numeric fields accept either representation.

use serde::{Deserialize, Deserializer, Serialize};

/// A single course in the catalog.
///
/// # Example
///
/// ```
/// use coursekb_core::Course;
///
/// let course: Course = serde_json::from_str(r#"{
///     "id": 1001,
///     "title": "Intro to Rust",
///     "avg_rating": "4.5",
///     "num_subscribers": 1200
/// }"#).unwrap();
///
/// assert_eq!(course.id, "1001");
/// assert_eq!(course.avg_rating, Some(4.5));
/// assert!(!course.is_paid);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Course {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub headline: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub subcategory: Option<String>,

    #[serde(default)]
    pub topic: Option<String>,

    #[serde(default)]
    pub language: Option<String>,

    /// Absent in the source record means free.
    #[serde(default, deserialize_with = "bool_or_null")]
    pub is_paid: bool,

    #[serde(default, deserialize_with = "optional_decimal")]
    pub price: Option<f64>,

    #[serde(default, deserialize_with = "optional_decimal")]
    pub avg_rating: Option<f64>,

    #[serde(default, deserialize_with = "count_or_null")]
    pub num_subscribers: u64,

    #[serde(default, deserialize_with = "count_or_null")]
    pub num_reviews: u64,

    #[serde(default, deserialize_with = "count_or_null")]
    pub num_lectures: u64,

    #[serde(default, deserialize_with = "optional_minutes")]
    pub content_length_min: Option<u32>,

    #[serde(default)]
    pub instructor_name: Option<String>,

    #[serde(default)]
    pub course_url: Option<String>,
}

impl Course {
    /// Creates a course with the given id and title and every other field
    /// at its default.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Title, or the empty string when the record has none.
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn rating_or_zero(&self) -> f64 {
        self.avg_rating.unwrap_or(0.0)
    }

    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    pub fn length_or_zero(&self) -> u32 {
        self.content_length_min.unwrap_or(0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl Loose {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Loose::Unsigned(n) => Some(*n as f64),
            Loose::Float(f) => Some(*f),
            Loose::Text(s) => s.trim().parse::<f64>().ok(),
            Loose::Bool(_) => None,
        }
        .filter(|v| v.is_finite() && *v >= 0.0)
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Text(s) => Ok(s),
        Loose::Unsigned(n) => Ok(n.to_string()),
        Loose::Float(f) => Ok(f.to_string()),
        Loose::Bool(b) => Ok(b.to_string()),
    }
}

fn bool_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(match value {
        Some(Loose::Bool(b)) => b,
        Some(Loose::Text(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn optional_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Loose::as_f64))
}

fn count_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Loose::as_f64)
        .map(|v| v.trunc() as u64)
        .unwrap_or(0))
}

fn optional_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Loose::as_f64)
        .map(|v| v.trunc().min(u32::MAX as f64) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record_defaults() {
        let course: Course = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(course.id, "abc");
        assert_eq!(course.title, None);
        assert!(!course.is_paid);
        assert_eq!(course.num_subscribers, 0);
        assert_eq!(course.content_length_min, None);
        assert_eq!(course.title_or_empty(), "");
    }

    #[test]
    fn test_nulls_fall_back_to_defaults() {
        let course: Course = serde_json::from_str(
            r#"{"id": 7, "is_paid": null, "price": null, "num_reviews": null}"#,
        )
        .unwrap();
        assert_eq!(course.id, "7");
        assert!(!course.is_paid);
        assert_eq!(course.price_or_zero(), 0.0);
        assert_eq!(course.num_reviews, 0);
    }

    #[test]
    fn test_decimal_strings() {
        let course: Course = serde_json::from_str(
            r#"{"id": "x", "price": "19.99", "avg_rating": "4.85", "content_length_min": 90}"#,
        )
        .unwrap();
        assert_eq!(course.price, Some(19.99));
        assert_eq!(course.avg_rating, Some(4.85));
        assert_eq!(course.length_or_zero(), 90);
    }

    #[test]
    fn test_garbage_numbers_are_absent() {
        let course: Course =
            serde_json::from_str(r#"{"id": "x", "avg_rating": "n/a", "price": -3}"#).unwrap();
        assert_eq!(course.avg_rating, None);
        assert_eq!(course.price, None);
    }
}
