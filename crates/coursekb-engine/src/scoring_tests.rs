//! Tests for scoring and ranking.

use super::*;
use crate::test_utils::{ids, sample_catalog, CourseBuilder};

fn rating_only() -> Scorer {
    Scorer::new(&RankingConfig {
        top_n: 30,
        weights: ScoreWeights {
            rating: 100.0,
            popularity: 0.0,
            reviews: 0.0,
            content: 0.0,
        },
    })
}

#[test]
fn test_maxima_of_empty_dataset_are_one() {
    assert_eq!(DatasetMaxima::of(&[]), DatasetMaxima::default());

    let zeros = vec![CourseBuilder::new("z").build()];
    assert_eq!(DatasetMaxima::of(&zeros), DatasetMaxima::default());
}

#[test]
fn test_weighted_score() {
    let a = CourseBuilder::new("a")
        .rating(4.0)
        .subscribers(100)
        .reviews(50)
        .lectures(10)
        .build();
    let b = CourseBuilder::new("b")
        .rating(2.5)
        .subscribers(50)
        .lectures(20)
        .build();
    let maxima = DatasetMaxima::of(&[a.clone(), b.clone()]);
    let scorer = Scorer::default();

    assert_eq!(scorer.score(&a, &maxima), 87.0);
    assert_eq!(scorer.score(&b, &maxima), 45.0);
}

#[test]
fn test_score_rounds_to_two_decimals() {
    let course = CourseBuilder::new("c").rating(4.33).build();
    let score = Scorer::default().score(&course, &DatasetMaxima::default());
    assert_eq!(score, 34.64);
}

#[test]
fn test_scores_stay_in_bounds() {
    let catalog = sample_catalog();
    let maxima = DatasetMaxima::of(&catalog);
    let scorer = Scorer::default();

    for course in &catalog {
        let score = scorer.score(course, &maxima);
        assert!((0.0..=100.0).contains(&score), "{} scored {score}", course.id);
    }

    let bare = CourseBuilder::new("bare").untitled().build();
    assert_eq!(scorer.score(&bare, &maxima), 0.0);

    let inflated = CourseBuilder::new("x").rating(10.0).build();
    assert_eq!(rating_only().score(&inflated, &maxima), 100.0);
}

#[test]
fn test_rank_orders_by_score_then_subscribers() {
    let courses = vec![
        CourseBuilder::new("low").rating(3.0).subscribers(900).build(),
        CourseBuilder::new("tie-small").rating(4.0).subscribers(10).build(),
        CourseBuilder::new("tie-big").rating(4.0).subscribers(20).build(),
        CourseBuilder::new("tie-small-2").rating(4.0).subscribers(10).build(),
    ];

    let ranked = rating_only().rank(courses);
    assert_eq!(
        ids(ranked.iter().map(|s| &s.course)),
        vec!["tie-big", "tie-small", "tie-small-2", "low"]
    );
}

#[test]
fn test_rank_is_idempotent() {
    let catalog = sample_catalog();
    let maxima = DatasetMaxima::of(&catalog);
    let scorer = Scorer::default();

    let first = scorer.rank_with(catalog, &maxima);
    let again = scorer.rank_with(first.iter().map(|s| s.course.clone()).collect(), &maxima);

    assert_eq!(first, again);
    assert_eq!(first[0].course.id, "1");
}

#[test]
fn test_rank_caps_to_top_n() {
    let scorer = Scorer::new(&RankingConfig {
        top_n: 3,
        ..RankingConfig::default()
    });
    let ranked = scorer.rank(sample_catalog());
    assert_eq!(ranked.len(), 3);
    assert_eq!(scorer.top_n(), 3);
}

#[test]
fn test_empty_ranking() {
    let ranked = Scorer::default().rank(Vec::new());
    assert!(ranked.is_empty());
    assert_eq!(ScoreRange::of(&ranked), None);
}

#[test]
fn test_score_range() {
    let ranked = rating_only().rank(vec![
        CourseBuilder::new("a").rating(5.0).build(),
        CourseBuilder::new("b").rating(2.5).build(),
        CourseBuilder::new("c").rating(1.0).build(),
    ]);

    let range = ScoreRange::of(&ranked).unwrap();
    assert_eq!(range.max, 100.0);
    assert_eq!(range.min, 20.0);
    assert_eq!(range.avg, 56.67);
}

#[test]
fn test_scored_course_serializes_flat() {
    let scored = ScoredCourse {
        course: CourseBuilder::new("7").title("Jazz Guitar").build(),
        score: 42.5,
    };
    let json = serde_json::to_value(&scored).unwrap();

    assert_eq!(json["id"], "7");
    assert_eq!(json["title"], "Jazz Guitar");
    assert_eq!(json["score"], 42.5);
}
