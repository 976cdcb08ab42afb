//! Deep equality over plain data, used to match attribute filters.

use serde_json::Value;

/// Structural equality.
///
/// Arrays compare element by element, objects by key set with recursive value
/// equality (key order is irrelevant). An array never equals an object.
/// Numbers compare by numeric value, so `1` equals `1.0`.
pub fn are_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| are_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, a)| b.get(key).is_some_and(|b| are_equal(a, b)))
        }
        (Value::Number(a), Value::Number(b)) => a == b || a.as_f64() == b.as_f64(),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn samples() -> Vec<Value> {
        vec![
            json!(null),
            json!(true),
            json!(1),
            json!(1.5),
            json!("__decorate"),
            json!([]),
            json!([1, 2]),
            json!([2, 1]),
            json!({}),
            json!({ "a": 1 }),
            json!({ "a": 1, "b": [1, { "c": null }] }),
        ]
    }

    #[test]
    fn reflexive() {
        for value in samples() {
            assert!(are_equal(&value, &value), "{value}");
        }
    }

    #[test]
    fn symmetric() {
        let samples = samples();
        for a in &samples {
            for b in &samples {
                assert_eq!(are_equal(a, b), are_equal(b, a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn key_order_is_irrelevant() {
        assert!(are_equal(
            &json!({ "a": 1, "b": { "c": [1, 2] } }),
            &json!({ "b": { "c": [1, 2] }, "a": 1 })
        ));
    }

    #[test]
    fn sequences_compare_by_position_and_length() {
        assert!(!are_equal(&json!([1, 2]), &json!([2, 1])));
        assert!(!are_equal(&json!([1, 2]), &json!([1, 2, 3])));
    }

    #[test]
    fn records_with_different_keys_differ() {
        assert!(!are_equal(&json!({ "a": 1 }), &json!({ "b": 1 })));
        assert!(!are_equal(&json!({ "a": 1 }), &json!({ "a": 1, "b": 2 })));
    }

    #[test]
    fn composite_categories_never_mix() {
        assert!(!are_equal(&json!([1]), &json!({ "0": 1 })));
        assert!(!are_equal(&json!([]), &json!({})));
        assert!(!are_equal(&json!([]), &json!(null)));
        assert!(!are_equal(&json!("1"), &json!(1)));
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(are_equal(&json!(1), &json!(1.0)));
        assert!(!are_equal(&json!(1), &json!(2)));
    }
}
