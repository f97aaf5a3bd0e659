//! Canonicalization of message mappings, and the inverse amount decoding.

use serde_json::{Map, Value};

use crate::encoding::amount::{scale_down, scale_up};
use crate::encoding::value::CanonicalValue;

/// Key of the one single-field object shape that is rescaled.
pub const AMOUNT_KEY: &str = "amount";

/// Numeric string form of an amount value, if it has one.
fn number_like(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// The value of an object shaped exactly `{"amount": <v>}`.
fn single_amount(map: &Map<String, Value>) -> Option<&Value> {
    if map.len() != 1 {
        return None;
    }
    map.get(AMOUNT_KEY)
}

/// Normalize a message into its canonical form.
///
/// - numbers become their decimal strings
/// - object keys sort case-insensitively
/// - `{"amount": n}` with a number-like `n` is rescaled to base units
/// - arrays keep their order
/// - `null` stays `null`
pub fn canonicalize(value: &Value) -> CanonicalValue {
    match value {
        Value::Null => CanonicalValue::Null,
        Value::Bool(b) => CanonicalValue::Bool(*b),
        Value::String(s) => CanonicalValue::Str(s.clone()),
        Value::Number(n) => CanonicalValue::Str(n.to_string()),
        Value::Array(items) => CanonicalValue::Array(items.iter().map(canonicalize).collect()),
        Value::Object(map) => {
            if let Some(scaled) = single_amount(map)
                .and_then(number_like)
                .and_then(|s| scale_up(&s))
            {
                return CanonicalValue::object([(AMOUNT_KEY, CanonicalValue::Str(scaled))]);
            }
            CanonicalValue::object(map.iter().map(|(k, v)| (k.as_str(), canonicalize(v))))
        }
    }
}

/// Undo amount scaling on JSON returned by the node: `{"amount": "500000"}`
/// becomes `{"amount": "5"}`. Everything else is returned as-is.
pub fn decode_amounts(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(decode_amounts).collect()),
        Value::Object(map) => {
            if let Some(coins) = single_amount(&map)
                .and_then(number_like)
                .and_then(|s| scale_down(&s))
            {
                let mut out = Map::new();
                out.insert(AMOUNT_KEY.to_string(), Value::String(coins));
                return Value::Object(out);
            }
            Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, decode_amounts(v)))
                    .collect(),
            )
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: &Value) -> String {
        canonicalize(value).to_json_string().unwrap()
    }

    #[test]
    fn test_key_order_invariance() {
        let a: Value = serde_json::from_str(r#"{"a":1,"b":2}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
        assert_eq!(canonicalize(&a), canonicalize(&b));
        assert_eq!(encode(&a), r#"{"a":"1","b":"2"}"#);
    }

    #[test]
    fn test_case_insensitive_sort() {
        let value = json!({"b": true, "C": false, "a": "x"});
        assert_eq!(encode(&value), r#"{"a":"x","b":true,"C":false}"#);
    }

    #[test]
    fn test_amount_scaling() {
        assert_eq!(encode(&json!({"amount": "5"})), r#"{"amount":"500000"}"#);
        assert_eq!(encode(&json!({"amount": 5})), r#"{"amount":"500000"}"#);
        assert_eq!(encode(&json!({"amount": 0.25})), r#"{"amount":"25000"}"#);
    }

    #[test]
    fn test_amount_scaling_nested() {
        let value = json!({"to": "bob", "value": {"amount": "2"}, "fees": [{"amount": 1}]});
        assert_eq!(
            encode(&value),
            r#"{"fees":[{"amount":"100000"}],"to":"bob","value":{"amount":"200000"}}"#
        );
    }

    #[test]
    fn test_amount_rule_only_for_exact_shape() {
        // Two keys: not the amount shape.
        assert_eq!(
            encode(&json!({"amount": "5", "denom": "coin"})),
            r#"{"amount":"5","denom":"coin"}"#
        );
        // Other single keys are never scaled.
        assert_eq!(encode(&json!({"count": "5"})), r#"{"count":"5"}"#);
        assert_eq!(encode(&json!({"Amount": "5"})), r#"{"Amount":"5"}"#);
        // Non-numeric amount passes through.
        assert_eq!(encode(&json!({"amount": "lots"})), r#"{"amount":"lots"}"#);
        assert_eq!(
            encode(&json!({"amount": {"amount": "1"}})),
            r#"{"amount":{"amount":"100000"}}"#
        );
    }

    #[test]
    fn test_numbers_become_strings() {
        assert_eq!(encode(&json!([1, 2.5, -3])), r#"["1","2.5","-3"]"#);
        assert_eq!(encode(&json!(42)), r#""42""#);
        assert_eq!(encode(&json!({"n": "7"})), r#"{"n":"7"}"#);
    }

    #[test]
    fn test_null_passes_through() {
        assert_eq!(canonicalize(&Value::Null), CanonicalValue::Null);
        assert_eq!(encode(&json!({"memo": null})), r#"{"memo":null}"#);
        assert_eq!(encode(&json!([null, "x"])), r#"[null,"x"]"#);
    }

    #[test]
    fn test_array_order_preserved() {
        assert_eq!(encode(&json!(["b", "a", "c"])), r#"["b","a","c"]"#);
    }

    #[test]
    fn test_decode_amounts() {
        assert_eq!(decode_amounts(json!({"amount": "500000"})), json!({"amount": "5"}));
        assert_eq!(decode_amounts(json!({"amount": 1})), json!({"amount": "0.00001"}));
        assert_eq!(
            decode_amounts(json!({"balance": {"amount": "250000"}, "name": "alice"})),
            json!({"balance": {"amount": "2.5"}, "name": "alice"})
        );
        assert_eq!(decode_amounts(json!({"amount": null})), json!({"amount": null}));
        assert_eq!(decode_amounts(json!(7)), json!(7));
    }

    #[test]
    fn test_canonicalize_then_decode_restores_amount() {
        let original = json!({"amount": "5"});
        let on_wire: Value = serde_json::from_str(&encode(&original)).unwrap();
        assert_eq!(decode_amounts(on_wire), original);
    }
}
