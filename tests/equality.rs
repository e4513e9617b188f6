//! Tests for deep structural equality.

use jmni_until::equality::{Opaque, Pattern};
use jmni_until::{is_equal, Value};
use proptest::prelude::*;

mod helpers;
use helpers::sample_document;

#[test]
fn test_nested_arrays() {
    // [1, [2, 3]]
    let a = Value::array([Value::from(1), Value::array([2, 3])]);
    let b = Value::array([Value::from(1), Value::array([2, 3])]);
    assert!(is_equal(&a, &b));

    // [1, 2] vs [2, 1]
    assert!(!is_equal(&Value::array([1, 2]), &Value::array([2, 1])));
}

#[test]
fn test_objects_key_order_and_missing_keys() {
    let a = Value::object([("a", 1), ("b", 2)]);
    let b = Value::object([("b", 2), ("a", 1)]);
    assert!(is_equal(&a, &b));

    let with_undefined = Value::object([("a", Value::from(1)), ("b", Value::Undefined)]);
    assert!(!is_equal(&Value::object([("a", 1)]), &with_undefined));
}

#[test]
fn test_dates_against_numbers() {
    let epoch = Value::date_from_millis(0).expect("epoch in range");
    assert!(is_equal(&epoch, &Value::date_from_millis(0).expect("epoch in range")));
    assert!(!is_equal(&epoch, &Value::from(0)));
}

#[test]
fn test_deep_document_difference() {
    let a = sample_document();
    let mut b = sample_document();
    assert!(is_equal(&a, &b));

    if let Value::Object(root) = &mut b {
        root.insert("n".to_string(), Value::array([Value::from(1), Value::array([2, 4])]));
    }
    assert!(!is_equal(&a, &b));
}

#[test]
fn test_json_documents() {
    let a: serde_json::Value = serde_json::from_str(r#"{"x": [1, {"y": null}], "z": "s"}"#)
        .expect("valid json");
    let b: serde_json::Value = serde_json::from_str(r#"{"z": "s", "x": [1, {"y": null}]}"#)
        .expect("valid json");
    assert!(is_equal(&Value::from(a), &Value::from(b)));
}

#[test]
fn test_patterns_and_opaque_inside_containers() {
    let callback = Opaque::new("function", |x: i32| x + 1);
    let a = Value::array([
        Value::from(Pattern::new("\\d+", "g")),
        Value::from(callback.clone()),
    ]);
    let b = Value::array([
        Value::from(Pattern::new("\\d+", "g")),
        Value::from(callback),
    ]);
    let c = Value::array([
        Value::from(Pattern::new("\\d+", "g")),
        Value::from(Opaque::new("function", |x: i32| x + 1)),
    ]);
    assert!(is_equal(&a, &b));
    assert!(!is_equal(&a, &c));
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>().prop_map(Value::Number),
        "[a-z]{0,6}".prop_map(Value::from),
        (-1_000_000_000_000i64..1_000_000_000_000i64)
            .prop_filter_map("date in range", Value::date_from_millis),
        ("[a-z]{1,4}", "[gims]{0,3}").prop_map(|(src, flags)| Value::from(Pattern::new(src, &flags))),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-d]{1,2}", inner, 0..6).prop_map(Value::Object),
        ]
    })
}

proptest! {
    #[test]
    fn test_is_equal_is_reflexive(value in arb_value()) {
        prop_assert!(is_equal(&value, &value));
        prop_assert!(is_equal(&value, &value.clone()));
    }

    #[test]
    fn test_is_equal_is_symmetric(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(is_equal(&a, &b), is_equal(&b, &a));
    }

    #[test]
    fn test_wrapping_preserves_equality(a in arb_value(), b in arb_value()) {
        let wrapped_a = Value::array([a.clone()]);
        let wrapped_b = Value::array([b.clone()]);
        prop_assert_eq!(is_equal(&a, &b), is_equal(&wrapped_a, &wrapped_b));
    }
}
