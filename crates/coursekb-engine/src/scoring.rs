//! Weighted scoring and ranking.
//!
//! A course scores up to 100 points from four normalized signals: average
//! rating (out of 5), subscribers, reviews and lectures. Count signals are
//! normalized against the largest value in the ranked set, so scores are
//! only comparable within one ranking.

use coursekb_config::{RankingConfig, ScoreWeights};
use coursekb_core::Course;
use serde::Serialize;

/// Highest count values in a dataset, used to normalize scores.
///
/// A maximum that would be zero is stored as `1` so normalization never
/// divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetMaxima {
    pub subscribers: u64,
    pub reviews: u64,
    pub lectures: u64,
}

impl DatasetMaxima {
    pub fn of(courses: &[Course]) -> Self {
        Self {
            subscribers: max_of(courses, |c| c.num_subscribers),
            reviews: max_of(courses, |c| c.num_reviews),
            lectures: max_of(courses, |c| c.num_lectures),
        }
    }
}

impl Default for DatasetMaxima {
    fn default() -> Self {
        Self {
            subscribers: 1,
            reviews: 1,
            lectures: 1,
        }
    }
}

/// A course with its ranking score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCourse {
    #[serde(flatten)]
    pub course: Course,
    pub score: f64,
}

/// Lowest, highest and mean score of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl ScoreRange {
    /// Returns `None` for an empty ranking.
    pub fn of(scored: &[ScoredCourse]) -> Option<Self> {
        if scored.is_empty() {
            return None;
        }
        let (min, max, sum) = scored.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), s| (min.min(s.score), max.max(s.score), sum + s.score),
        );
        Some(Self {
            min,
            max,
            avg: round2(sum / scored.len() as f64),
        })
    }
}

/// Scores and ranks courses.
///
/// # Example
///
/// ```
/// use coursekb_core::Course;
/// use coursekb_engine::{DatasetMaxima, Scorer};
///
/// let mut course = Course::new("1", "Piano for Everyone");
/// course.avg_rating = Some(5.0);
/// course.num_subscribers = 100;
/// course.num_reviews = 10;
/// course.num_lectures = 20;
///
/// let maxima = DatasetMaxima::of(std::slice::from_ref(&course));
/// assert_eq!(Scorer::default().score(&course, &maxima), 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: ScoreWeights,
    top_n: usize,
}

impl Scorer {
    pub fn new(config: &RankingConfig) -> Self {
        Self {
            weights: config.weights,
            top_n: config.top_n,
        }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Scores `course` in [0, 100], rounded to two decimals.
    ///
    /// Absent fields contribute nothing.
    pub fn score(&self, course: &Course, maxima: &DatasetMaxima) -> f64 {
        let w = &self.weights;
        let rating = course.rating_or_zero() / 5.0 * w.rating;
        let popularity = ratio(course.num_subscribers, maxima.subscribers) * w.popularity;
        let reviews = ratio(course.num_reviews, maxima.reviews) * w.reviews;
        let content = ratio(course.num_lectures, maxima.lectures) * w.content;

        let total = rating + popularity + reviews + content;
        if total.is_finite() {
            round2(total.clamp(0.0, 100.0))
        } else {
            0.0
        }
    }

    /// Scores `courses` against their own maxima and keeps the best `top_n`.
    ///
    /// Sorted by score, then by subscriber count, both descending. Ties on
    /// both keep their input order.
    pub fn rank(&self, courses: Vec<Course>) -> Vec<ScoredCourse> {
        let maxima = DatasetMaxima::of(&courses);
        self.rank_with(courses, &maxima)
    }

    /// Like [`rank`](Self::rank), with caller-supplied maxima.
    pub fn rank_with(&self, courses: Vec<Course>, maxima: &DatasetMaxima) -> Vec<ScoredCourse> {
        let mut scored: Vec<ScoredCourse> = courses
            .into_iter()
            .map(|course| ScoredCourse {
                score: self.score(&course, maxima),
                course,
            })
            .collect();
        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.course.num_subscribers.cmp(&a.course.num_subscribers))
        });
        scored.truncate(self.top_n);
        scored
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(&RankingConfig::default())
    }
}

fn max_of(courses: &[Course], field: impl Fn(&Course) -> u64) -> u64 {
    courses.iter().map(field).max().unwrap_or(0).max(1)
}

fn ratio(value: u64, max: u64) -> f64 {
    value as f64 / max.max(1) as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "scoring_tests.rs"]
mod tests;
