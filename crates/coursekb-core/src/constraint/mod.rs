//! Constraint model.
//!
//! A [`ConstraintSet`] is the typed form of a user's filter request. Every
//! recognized key has a neutral value that never excludes a course; a key
//! that is absent or neutral imposes no filtering effect.
//!
//! Sets are updated by value: [`ConstraintSet::with_value`] and
//! [`ConstraintSet::neutralized`] return new sets and leave the receiver
//! untouched, so probing one key can never corrupt a set another phase is
//! still reading.

mod raw;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use raw::RawFilterInput;

/// A recognized constraint key.
///
/// Declaration order is the natural enumeration order used when probing
/// constraints one at a time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintKey {
    Category,
    Subcategory,
    Language,
    Topic,
    IsPaid,
    MinRating,
    MaxPrice,
    MinDuration,
    MaxDuration,
}

impl ConstraintKey {
    /// All keys in enumeration order.
    pub const ALL: [ConstraintKey; 9] = [
        ConstraintKey::Category,
        ConstraintKey::Subcategory,
        ConstraintKey::Language,
        ConstraintKey::Topic,
        ConstraintKey::IsPaid,
        ConstraintKey::MinRating,
        ConstraintKey::MaxPrice,
        ConstraintKey::MinDuration,
        ConstraintKey::MaxDuration,
    ];

    /// The filter-input name of this key.
    pub fn name(self) -> &'static str {
        match self {
            ConstraintKey::Category => "category",
            ConstraintKey::Subcategory => "subcategory",
            ConstraintKey::Language => "language",
            ConstraintKey::Topic => "topic",
            ConstraintKey::IsPaid => "isPaid",
            ConstraintKey::MinRating => "minRating",
            ConstraintKey::MaxPrice => "maxPrice",
            ConstraintKey::MinDuration => "minDuration",
            ConstraintKey::MaxDuration => "maxDuration",
        }
    }

    /// The value that imposes no filtering effect.
    ///
    /// ```
    /// use coursekb_core::{ConstraintKey, ConstraintValue};
    ///
    /// assert_eq!(ConstraintKey::Category.neutral_value(), ConstraintValue::Absent);
    /// assert_eq!(ConstraintKey::MinRating.neutral_value(), ConstraintValue::Number(0.0));
    /// assert_eq!(
    ///     ConstraintKey::MaxPrice.neutral_value(),
    ///     ConstraintValue::Number(f64::INFINITY)
    /// );
    /// ```
    pub fn neutral_value(self) -> ConstraintValue {
        match self {
            ConstraintKey::Category
            | ConstraintKey::Subcategory
            | ConstraintKey::Language
            | ConstraintKey::Topic
            | ConstraintKey::IsPaid => ConstraintValue::Absent,
            ConstraintKey::MinRating | ConstraintKey::MinDuration => ConstraintValue::Number(0.0),
            ConstraintKey::MaxPrice | ConstraintKey::MaxDuration => {
                ConstraintValue::Number(f64::INFINITY)
            }
        }
    }

    /// Returns true for keys whose value is a numeric bound.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ConstraintKey::MinRating
                | ConstraintKey::MaxPrice
                | ConstraintKey::MinDuration
                | ConstraintKey::MaxDuration
        )
    }

    /// Returns true for numeric keys that bound from below.
    ///
    /// Lower bounds loosen by decreasing; upper bounds loosen by increasing.
    pub fn is_lower_bound(self) -> bool {
        matches!(self, ConstraintKey::MinRating | ConstraintKey::MinDuration)
    }
}

impl fmt::Display for ConstraintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConstraintKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConstraintKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| format!("unknown constraint key '{s}'"))
    }
}

/// The value of a single constraint, independent of its key.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintValue {
    /// No constraint (neutral for text and flag keys).
    Absent,
    Text(String),
    Flag(bool),
    /// Numeric bound; `f64::INFINITY` is an unconstrained ceiling.
    Number(f64),
}

impl fmt::Display for ConstraintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintValue::Absent => f.write_str("none"),
            ConstraintValue::Text(s) => f.write_str(s),
            ConstraintValue::Flag(b) => write!(f, "{b}"),
            ConstraintValue::Number(n) if n.is_infinite() => f.write_str("unlimited"),
            ConstraintValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Typed collection of filter criteria.
///
/// # Example
///
/// ```
/// use coursekb_core::{ConstraintKey, ConstraintSet, ConstraintValue};
///
/// let set = ConstraintSet::new().with_category("Music").with_min_rating(4.5);
/// let probe = set.neutralized(ConstraintKey::Category);
///
/// assert_eq!(set.category.as_deref(), Some("Music"));
/// assert!(probe.is_neutral(ConstraintKey::Category));
/// assert_eq!(probe.value(ConstraintKey::MinRating), ConstraintValue::Number(4.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintSet {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub language: Option<String>,
    pub topic: Option<String>,
    pub is_paid: Option<bool>,
    pub min_rating: f64,
    /// Serializes as `null` when unconstrained.
    pub max_price: f64,
    pub min_duration: u32,
    pub max_duration: Option<u32>,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            category: None,
            subcategory: None,
            language: None,
            topic: None,
            is_paid: None,
            min_rating: 0.0,
            max_price: f64::INFINITY,
            min_duration: 0,
            max_duration: None,
        }
    }
}

impl ConstraintSet {
    /// Creates a set with every key at its neutral value.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_is_paid(mut self, is_paid: bool) -> Self {
        self.is_paid = Some(is_paid);
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn with_min_duration(mut self, minutes: u32) -> Self {
        self.min_duration = minutes;
        self
    }

    pub fn with_max_duration(mut self, minutes: u32) -> Self {
        self.max_duration = Some(minutes);
        self
    }

    /// Reads the value of `key`.
    pub fn value(&self, key: ConstraintKey) -> ConstraintValue {
        fn text(value: &Option<String>) -> ConstraintValue {
            value
                .clone()
                .map_or(ConstraintValue::Absent, ConstraintValue::Text)
        }

        match key {
            ConstraintKey::Category => text(&self.category),
            ConstraintKey::Subcategory => text(&self.subcategory),
            ConstraintKey::Language => text(&self.language),
            ConstraintKey::Topic => text(&self.topic),
            ConstraintKey::IsPaid => self
                .is_paid
                .map_or(ConstraintValue::Absent, ConstraintValue::Flag),
            ConstraintKey::MinRating => ConstraintValue::Number(self.min_rating),
            ConstraintKey::MaxPrice => ConstraintValue::Number(self.max_price),
            ConstraintKey::MinDuration => ConstraintValue::Number(f64::from(self.min_duration)),
            ConstraintKey::MaxDuration => ConstraintValue::Number(
                self.max_duration.map_or(f64::INFINITY, f64::from),
            ),
        }
    }

    /// Returns a copy of this set with `key` set to `value`.
    ///
    /// A value of the wrong kind for `key` (text for a numeric key, a flag
    /// for a text key, a negative or NaN bound) resets the key to neutral.
    pub fn with_value(&self, key: ConstraintKey, value: ConstraintValue) -> Self {
        let mut next = self.clone();
        match (key, value) {
            (ConstraintKey::Category, ConstraintValue::Text(s)) => next.category = Some(s),
            (ConstraintKey::Subcategory, ConstraintValue::Text(s)) => next.subcategory = Some(s),
            (ConstraintKey::Language, ConstraintValue::Text(s)) => next.language = Some(s),
            (ConstraintKey::Topic, ConstraintValue::Text(s)) => next.topic = Some(s),
            (ConstraintKey::IsPaid, ConstraintValue::Flag(b)) => next.is_paid = Some(b),
            (ConstraintKey::MinRating, ConstraintValue::Number(n)) if n >= 0.0 => {
                next.min_rating = n;
            }
            (ConstraintKey::MaxPrice, ConstraintValue::Number(n)) if n >= 0.0 => {
                next.max_price = n;
            }
            (ConstraintKey::MinDuration, ConstraintValue::Number(n)) if n >= 0.0 => {
                next.min_duration = to_minutes(n).unwrap_or(u32::MAX);
            }
            (ConstraintKey::MaxDuration, ConstraintValue::Number(n)) if n >= 0.0 => {
                next.max_duration = to_minutes(n);
            }
            (key, _) => return next.neutralized(key),
        }
        next
    }

    /// Returns a copy of this set with only `key` reset to neutral.
    pub fn neutralized(&self, key: ConstraintKey) -> Self {
        let mut next = self.clone();
        match key {
            ConstraintKey::Category => next.category = None,
            ConstraintKey::Subcategory => next.subcategory = None,
            ConstraintKey::Language => next.language = None,
            ConstraintKey::Topic => next.topic = None,
            ConstraintKey::IsPaid => next.is_paid = None,
            ConstraintKey::MinRating => next.min_rating = 0.0,
            ConstraintKey::MaxPrice => next.max_price = f64::INFINITY,
            ConstraintKey::MinDuration => next.min_duration = 0,
            ConstraintKey::MaxDuration => next.max_duration = None,
        }
        next
    }

    /// Returns true if `key` imposes no filtering effect.
    pub fn is_neutral(&self, key: ConstraintKey) -> bool {
        self.value(key) == key.neutral_value()
    }

    /// Keys that currently constrain the result, in enumeration order.
    pub fn active_keys(&self) -> impl Iterator<Item = ConstraintKey> + '_ {
        ConstraintKey::ALL
            .into_iter()
            .filter(move |key| !self.is_neutral(*key))
    }

    /// Returns true if no key constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.active_keys().next().is_none()
    }
}

/// Whole minutes for a finite bound; `None` for an infinite one.
fn to_minutes(n: f64) -> Option<u32> {
    n.is_finite()
        .then(|| n.trunc().min(f64::from(u32::MAX)) as u32)
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for key in self.active_keys() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}={}", key, self.value(key))?;
        }
        if first {
            f.write_str("unconstrained")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
