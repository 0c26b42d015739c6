// lancecheck-core/src/domain/encoding.rs
//
// Encode/decode boundary for nested records.
// The relational projection of the query interface has no native nested
// column, so records are stored as canonical JSON text and parsed back on read.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::error::DomainError;

/// Serializes a record into canonical text: compact JSON, keys sorted at
/// every level.
pub fn encode_record<T: Serialize>(record: &T) -> Result<String, DomainError> {
    let value = serde_json::to_value(record)?;
    if !value.is_object() {
        return Err(DomainError::NotARecord(value.to_string()));
    }
    Ok(serde_json::to_string(&canonicalize(value))?)
}

/// Parses encoded text back into a structured record.
pub fn decode_record(text: &str) -> Result<Map<String, Value>, DomainError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(DomainError::NotARecord(other.to_string())),
    }
}

/// Accepts a scanned field either as encoded text or as an already-decoded
/// object (an extension may decode JSON text on its side).
pub fn decode_field(value: &Value) -> Result<Map<String, Value>, DomainError> {
    match value {
        Value::String(text) => decode_record(text),
        Value::Object(map) => Ok(map.clone()),
        other => Err(DomainError::NotARecord(other.to_string())),
    }
}

// Rebuilds objects in sorted key order; stable whether or not serde_json
// preserves insertion order.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, canonicalize(v)))
                .collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Profile {
        name: &'static str,
        age: u32,
        city: &'static str,
    }

    #[test]
    fn test_encode_sorts_keys() -> Result<(), DomainError> {
        let text = encode_record(&Profile {
            name: "John",
            age: 30,
            city: "NYC",
        })?;
        insta::assert_snapshot!(text, @r#"{"age":30,"city":"NYC","name":"John"}"#);
        Ok(())
    }

    #[test]
    fn test_encode_rejects_scalars() {
        assert!(matches!(encode_record(&42), Err(DomainError::NotARecord(_))));
    }

    #[test]
    fn test_decode_restores_structure() -> Result<(), DomainError> {
        let decoded = decode_record(r#"{"category":"A","score":0.95}"#)?;
        assert_eq!(decoded.get("category"), Some(&json!("A")));
        assert_eq!(decoded.get("score"), Some(&json!(0.95)));
        Ok(())
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        assert!(matches!(decode_record("[1,2]"), Err(DomainError::NotARecord(_))));
        assert!(matches!(decode_record("not json"), Err(DomainError::Encoding(_))));
    }

    #[test]
    fn test_decode_field_accepts_text_or_object() -> Result<(), DomainError> {
        let as_text = json!(r#"{"name":"Jane"}"#);
        let as_object = json!({"name": "Jane"});
        assert_eq!(decode_field(&as_text)?, decode_field(&as_object)?);
        assert!(decode_field(&json!(12)).is_err());
        Ok(())
    }
}
