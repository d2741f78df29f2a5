//! Relaxation trace.

use std::fmt;

use coursekb_core::{ConstraintKey, ConstraintValue};
use serde::{Serialize, Serializer};

use super::strategy::SkipReason;

/// One relaxation action.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEntry {
    /// A numeric bound moved.
    Relaxed {
        key: ConstraintKey,
        from: ConstraintValue,
        to: ConstraintValue,
    },

    /// A key was reset to neutral.
    Removed { key: ConstraintKey },

    /// An increment or decrement could not move the bound.
    Skipped {
        key: ConstraintKey,
        reason: SkipReason,
    },

    /// Nothing matched; results come from the popularity fallback.
    PopularityFallback,
}

impl TraceEntry {
    /// The key this entry concerns, if any.
    pub fn key(&self) -> Option<ConstraintKey> {
        match self {
            TraceEntry::Relaxed { key, .. }
            | TraceEntry::Removed { key }
            | TraceEntry::Skipped { key, .. } => Some(*key),
            TraceEntry::PopularityFallback => None,
        }
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEntry::Relaxed { key, from, to } => write!(f, "Relaxed {key}: {from} → {to}"),
            TraceEntry::Removed { key } => write!(f, "Removed {key} filter"),
            TraceEntry::Skipped { key, reason } => {
                write!(f, "Skipped relaxing {key} ({})", reason.describe())
            }
            TraceEntry::PopularityFallback => {
                f.write_str("No matches found after relaxation; showing most popular courses")
            }
        }
    }
}

/// Ordered, append-only log of relaxation actions.
///
/// Serializes as a list of human-readable strings.
///
/// # Example
///
/// ```
/// use coursekb_core::{ConstraintKey, ConstraintValue};
/// use coursekb_engine::{RelaxationTrace, TraceEntry};
///
/// let mut trace = RelaxationTrace::new();
/// trace.push(TraceEntry::Relaxed {
///     key: ConstraintKey::MinRating,
///     from: ConstraintValue::Number(4.5),
///     to: ConstraintValue::Number(4.0),
/// });
/// trace.push(TraceEntry::Removed { key: ConstraintKey::Category });
///
/// assert_eq!(
///     trace.messages(),
///     vec!["Relaxed minRating: 4.5 → 4", "Removed category filter"]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelaxationTrace {
    entries: Vec<TraceEntry>,
}

impl RelaxationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

    /// Rendered entries, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a RelaxationTrace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for RelaxationTrace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter().map(ToString::to_string))
    }
}
