//! Dex record representation and field accessors
//!
//! A "dex object" is the untyped, string-keyed persisted form of a domain
//! object before typed deserialization. Factories read their required fields
//! out of it with the accessors in this module, which turn missing or
//! ill-typed fields into `DeserializationError` values.

use serde_json::Value;

/// Generic persisted record: a string-keyed JSON mapping
///
/// Every group record carries at least `type` (string) and `name` (string),
/// and optionally `origin` (string). Anything else is variant-specific and
/// validated only by the matching factory.
pub type DexObject = serde_json::Map<String, Value>;

/// Error type for factory-side record validation
///
/// Raised when a required field is missing from a dex record or a present
/// field does not have the expected shape. Distinct from
/// [`DexError::UnknownType`](crate::registry::DexError) so callers can abort
/// on malformed records while skipping merely unknown ones.
#[derive(Debug, thiserror::Error)]
pub enum DeserializationError {
    #[error("required field '{field}' is missing")]
    MissingField { field: &'static str },
    #[error("field '{field}' is malformed: {reason}")]
    MalformedField { field: &'static str, reason: String },
}

/// Read a required string field from a dex record
///
/// # Errors
///
/// Returns `MissingField` if the key is absent and `MalformedField` if the
/// value is not a JSON string.
pub fn require_str<'a>(obj: &'a DexObject, field: &'static str) -> Result<&'a str, DeserializationError> {
    match obj.get(field) {
        None => Err(DeserializationError::MissingField { field }),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(DeserializationError::MalformedField {
            field,
            reason: format!("expected a string, got {}", type_name(other)),
        }),
    }
}

/// Read an optional string field from a dex record
///
/// An absent key and an explicit JSON `null` both read as `None`; any other
/// non-string value is malformed.
pub fn optional_str<'a>(obj: &'a DexObject, field: &'static str) -> Result<Option<&'a str>, DeserializationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(DeserializationError::MalformedField {
            field,
            reason: format!("expected a string, got {}", type_name(other)),
        }),
    }
}

/// Read a required array field from a dex record
pub fn require_array<'a>(obj: &'a DexObject, field: &'static str) -> Result<&'a Vec<Value>, DeserializationError> {
    match obj.get(field) {
        None => Err(DeserializationError::MissingField { field }),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(DeserializationError::MalformedField {
            field,
            reason: format!("expected an array, got {}", type_name(other)),
        }),
    }
}

/// Interpret a JSON value as a sequence of finite f64 numbers
///
/// `field` names the surrounding record field for error reporting; the value
/// itself may sit arbitrarily deep inside that field.
pub fn f64_seq(value: &Value, field: &'static str) -> Result<Vec<f64>, DeserializationError> {
    let items = value.as_array().ok_or_else(|| DeserializationError::MalformedField {
        field,
        reason: format!("expected an array of numbers, got {}", type_name(value)),
    })?;

    items
        .iter()
        .map(|item| {
            item.as_f64().ok_or_else(|| DeserializationError::MalformedField {
                field,
                reason: format!("expected a number, got {}", type_name(item)),
            })
        })
        .collect()
}

/// Human-readable JSON type name for error messages
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> DexObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be a JSON object"),
        }
    }

    #[test]
    fn test_require_str_present() {
        let obj = record(json!({"name": "TestEventGroup"}));
        assert_eq!(require_str(&obj, "name").unwrap(), "TestEventGroup");
    }

    #[test]
    fn test_require_str_missing() {
        let obj = record(json!({}));
        let err = require_str(&obj, "name").unwrap_err();
        assert!(matches!(err, DeserializationError::MissingField { field: "name" }));
    }

    #[test]
    fn test_require_str_wrong_type() {
        let obj = record(json!({"name": 42}));
        let err = require_str(&obj, "name").unwrap_err();
        match err {
            DeserializationError::MalformedField { field, reason } => {
                assert_eq!(field, "name");
                assert!(reason.contains("a number"));
            }
            other => panic!("expected MalformedField, got {other:?}"),
        }
    }

    #[test]
    fn test_optional_str_absent_and_null() {
        let obj = record(json!({"origin": null}));
        assert_eq!(optional_str(&obj, "origin").unwrap(), None);
        assert_eq!(optional_str(&obj, "missing").unwrap(), None);
    }

    #[test]
    fn test_optional_str_present() {
        let obj = record(json!({"origin": "TestOrigin"}));
        assert_eq!(optional_str(&obj, "origin").unwrap(), Some("TestOrigin"));
    }

    #[test]
    fn test_optional_str_wrong_type() {
        let obj = record(json!({"origin": ["not", "a", "string"]}));
        assert!(optional_str(&obj, "origin").is_err());
    }

    #[test]
    fn test_f64_seq() {
        let values = f64_seq(&json!([1.0, 2.5, -3]), "time").unwrap();
        assert_eq!(values, vec![1.0, 2.5, -3.0]);
    }

    #[test]
    fn test_f64_seq_rejects_non_numbers() {
        let err = f64_seq(&json!([1.0, "two"]), "time").unwrap_err();
        assert!(matches!(err, DeserializationError::MalformedField { field: "time", .. }));
    }
}
