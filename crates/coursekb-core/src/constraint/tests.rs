//! Tests for the constraint model and filter normalization.

use super::*;
use serde_json::json;

#[test]
fn test_default_set_is_unconstrained() {
    let set = ConstraintSet::new();
    assert!(set.is_unconstrained());
    for key in ConstraintKey::ALL {
        assert!(set.is_neutral(key), "{key} should be neutral");
        assert_eq!(set.value(key), key.neutral_value());
    }
    assert_eq!(set.to_string(), "unconstrained");
}

#[test]
fn test_active_keys_follow_enumeration_order() {
    let set = ConstraintSet::new()
        .with_min_rating(4.0)
        .with_language("Korean")
        .with_category("Music");
    let keys: Vec<_> = set.active_keys().collect();
    assert_eq!(
        keys,
        vec![
            ConstraintKey::Category,
            ConstraintKey::Language,
            ConstraintKey::MinRating
        ]
    );
    assert_eq!(set.to_string(), "category=Music, language=Korean, minRating=4");
}

#[test]
fn test_neutralized_leaves_original_untouched() {
    let set = ConstraintSet::new().with_category("Music").with_max_price(50.0);
    let probe = set.neutralized(ConstraintKey::MaxPrice);

    assert_eq!(set.max_price, 50.0);
    assert!(probe.max_price.is_infinite());
    assert_eq!(probe.category.as_deref(), Some("Music"));
}

#[test]
fn test_with_value_by_key() {
    let set = ConstraintSet::new()
        .with_value(ConstraintKey::Topic, ConstraintValue::Text("rust".into()))
        .with_value(ConstraintKey::IsPaid, ConstraintValue::Flag(true))
        .with_value(ConstraintKey::MinDuration, ConstraintValue::Number(30.7))
        .with_value(ConstraintKey::MaxDuration, ConstraintValue::Number(120.0));

    assert_eq!(set.topic.as_deref(), Some("rust"));
    assert_eq!(set.is_paid, Some(true));
    assert_eq!(set.min_duration, 30);
    assert_eq!(set.max_duration, Some(120));
}

#[test]
fn test_with_value_wrong_kind_resets_to_neutral() {
    let set = ConstraintSet::new().with_category("Music").with_min_rating(3.0);
    let next = set
        .with_value(ConstraintKey::Category, ConstraintValue::Flag(true))
        .with_value(ConstraintKey::MinRating, ConstraintValue::Number(f64::NAN));

    assert!(next.is_neutral(ConstraintKey::Category));
    assert!(next.is_neutral(ConstraintKey::MinRating));
}

#[test]
fn test_infinite_max_duration_is_neutral() {
    let set = ConstraintSet::new()
        .with_max_duration(60)
        .with_value(ConstraintKey::MaxDuration, ConstraintValue::Number(f64::INFINITY));
    assert!(set.is_neutral(ConstraintKey::MaxDuration));
}

#[test]
fn test_lower_bounds_are_numeric_minimums() {
    let lower: Vec<_> = ConstraintKey::ALL
        .into_iter()
        .filter(|k| k.is_lower_bound())
        .collect();
    assert_eq!(lower, vec![ConstraintKey::MinRating, ConstraintKey::MinDuration]);
    assert!(lower.iter().all(|k| k.is_numeric()));
    assert!(!ConstraintKey::MaxPrice.is_lower_bound());
}

#[test]
fn test_key_names_round_trip() {
    for key in ConstraintKey::ALL {
        assert_eq!(key.name().parse::<ConstraintKey>(), Ok(key));
    }
    assert!("level".parse::<ConstraintKey>().is_err());
}

#[test]
fn test_value_display() {
    assert_eq!(ConstraintValue::Number(4.0).to_string(), "4");
    assert_eq!(ConstraintValue::Number(3.5).to_string(), "3.5");
    assert_eq!(ConstraintValue::Number(f64::INFINITY).to_string(), "unlimited");
    assert_eq!(ConstraintValue::Absent.to_string(), "none");
}

#[test]
fn test_from_raw_empty_and_null_are_absent() {
    let raw = RawFilterInput::new()
        .with("category", "")
        .with("subcategory", json!(null))
        .with("isPaid", "")
        .with("minRating", "  ")
        .with("maxDuration", json!(null));

    assert!(ConstraintSet::from_raw(&raw).is_unconstrained());
}

#[test]
fn test_from_raw_parses_loose_values() {
    let raw = RawFilterInput::new()
        .with("language", "English")
        .with("topic", "Python")
        .with("isPaid", "TRUE")
        .with("minRating", 4)
        .with("maxPrice", "99.99")
        .with("minDuration", "45.9")
        .with("maxDuration", 300);

    let set = ConstraintSet::from_raw(&raw);
    assert_eq!(set.language.as_deref(), Some("English"));
    assert_eq!(set.topic.as_deref(), Some("Python"));
    assert_eq!(set.is_paid, Some(true));
    assert_eq!(set.min_rating, 4.0);
    assert_eq!(set.max_price, 99.99);
    assert_eq!(set.min_duration, 45);
    assert_eq!(set.max_duration, Some(300));
}

#[test]
fn test_from_raw_malformed_values_are_neutral() {
    let raw = RawFilterInput::new()
        .with("category", 42)
        .with("isPaid", "sometimes")
        .with("minRating", "great")
        .with("maxPrice", -10)
        .with("minDuration", json!([1, 2]));

    assert!(ConstraintSet::from_raw(&raw).is_unconstrained());
}

#[test]
fn test_from_raw_ignores_unknown_keys() {
    let raw = RawFilterInput::new().with("level", "Beginner").with("sort", "new");
    assert_eq!(raw.len(), 2);
    assert!(ConstraintSet::from_raw(&raw).is_unconstrained());
}

#[test]
fn test_from_json_str_rejects_non_objects() {
    assert!(RawFilterInput::from_json_str("[1, 2]").is_err());
    assert!(RawFilterInput::from_json_str("{not json").is_err());
    assert!(RawFilterInput::from_json_str("{}").unwrap().is_empty());
}

#[test]
fn test_serialized_set_uses_filter_names() {
    let set = ConstraintSet::new().with_is_paid(false).with_min_rating(4.5);
    let value = serde_json::to_value(&set).unwrap();
    assert_eq!(value["isPaid"], json!(false));
    assert_eq!(value["minRating"], json!(4.5));
    assert_eq!(value["maxPrice"], json!(null));
}
