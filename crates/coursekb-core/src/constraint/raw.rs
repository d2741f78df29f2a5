//! Normalization of loosely typed filter input.
//!
//! Filters arrive from forms and query strings: booleans as `"true"`,
//! thresholds as numeric strings, unset fields as `""` or `null`. Anything
//! that cannot be read as its key's type is treated as absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::{ConstraintKey, ConstraintSet};
use crate::error::{CourseKbError, Result};

/// Raw filter input as received from a caller.
///
/// # Example
///
/// ```
/// use coursekb_core::{ConstraintSet, RawFilterInput};
///
/// let raw = RawFilterInput::from_json_str(r#"{
///     "category": "Development",
///     "isPaid": "false",
///     "minRating": "4.5",
///     "maxPrice": "",
///     "level": "Beginner"
/// }"#).unwrap();
///
/// let constraints = ConstraintSet::from_raw(&raw);
/// assert_eq!(constraints.category.as_deref(), Some("Development"));
/// assert_eq!(constraints.is_paid, Some(false));
/// assert_eq!(constraints.min_rating, 4.5);
/// assert!(constraints.max_price.is_infinite());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawFilterInput(Map<String, Value>);

impl RawFilterInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`CourseKbError::FilterInput`] if `s` is not valid JSON or is
    /// not an object.
    pub fn from_json_str(s: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(CourseKbError::FilterInput(format!(
                "expected a JSON object, found {}",
                json_type_name(&other)
            ))),
            Err(e) => Err(CourseKbError::FilterInput(e.to_string())),
        }
    }

    /// Adds or replaces one filter value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value for `key` unless it is missing, null or blank.
    fn present(&self, key: ConstraintKey) -> Option<&Value> {
        match self.0.get(key.name())? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            value => Some(value),
        }
    }
}

impl From<Map<String, Value>> for RawFilterInput {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl ConstraintSet {
    /// Normalizes raw filter input into a typed constraint set.
    ///
    /// Never fails: malformed values become neutral and unrecognized keys are
    /// ignored. Both are logged at DEBUG.
    pub fn from_raw(raw: &RawFilterInput) -> Self {
        for name in raw.0.keys() {
            if name.parse::<ConstraintKey>().is_err() {
                debug!(event = "filter_key_ignored", key = %name);
            }
        }

        let mut set = ConstraintSet::new();
        set.category = text(raw, ConstraintKey::Category);
        set.subcategory = text(raw, ConstraintKey::Subcategory);
        set.language = text(raw, ConstraintKey::Language);
        set.topic = text(raw, ConstraintKey::Topic);
        set.is_paid = flag(raw, ConstraintKey::IsPaid);

        if let Some(n) = number(raw, ConstraintKey::MinRating).filter(|n| n.is_finite()) {
            set.min_rating = n;
        }
        if let Some(n) = number(raw, ConstraintKey::MaxPrice) {
            set.max_price = n;
        }
        if let Some(n) = number(raw, ConstraintKey::MinDuration).filter(|n| n.is_finite()) {
            set.min_duration = n.trunc().min(f64::from(u32::MAX)) as u32;
        }
        if let Some(n) = number(raw, ConstraintKey::MaxDuration) {
            set.max_duration = n
                .is_finite()
                .then(|| n.trunc().min(f64::from(u32::MAX)) as u32);
        }
        set
    }
}

fn text(raw: &RawFilterInput, key: ConstraintKey) -> Option<String> {
    match raw.present(key)? {
        Value::String(s) => Some(s.clone()),
        other => malformed(key, other),
    }
}

fn flag(raw: &RawFilterInput, key: ConstraintKey) -> Option<bool> {
    match raw.present(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
        other => malformed(key, other),
    }
}

/// Non-negative, non-NaN number; may be infinite.
fn number(raw: &RawFilterInput, key: ConstraintKey) -> Option<f64> {
    let value = raw.present(key)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n >= 0.0 => Some(n),
        _ => malformed(key, value),
    }
}

fn malformed<T>(key: ConstraintKey, value: &Value) -> Option<T> {
    debug!(event = "filter_value_malformed", key = %key, value = %value);
    None
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
