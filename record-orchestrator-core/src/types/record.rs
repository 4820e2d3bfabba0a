//! Record type definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;

use record_orchestrator_backend::{Payload, RecordId};

/// Key under which the record id appears in seed data and forms.
pub const ID_KEY: &str = "id";

/// A record: an immutable id plus raw field values keyed by field key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Payload,
}

impl Record {
    #[must_use]
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: Payload::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Value for `key`; the id is exposed under `"id"` as a string.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<Value> {
        if key == ID_KEY {
            return Some(Value::String(self.id.to_string()));
        }
        self.fields.get(key).cloned()
    }

    /// Field-for-field merge; keys absent from `payload` keep their values.
    ///
    /// The id never changes.
    pub fn merge(&mut self, payload: &Payload) {
        for (key, value) in payload {
            if key == ID_KEY {
                continue;
            }
            self.fields.insert(key.clone(), value.clone());
        }
    }
}

/// Whether a submitted value counts as empty for required-field checks.
#[must_use]
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Identifier form of a raw value (`"1"` and `1` are the same identifier).
#[must_use]
pub fn identifier_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_numeric_id_and_flattened_fields() {
        let record: Record =
            serde_json::from_value(json!({ "id": 7, "name": "Jane", "company": "1" })).unwrap();
        assert_eq!(record.id, RecordId::from(7_u64));
        assert_eq!(record.fields.len(), 2);
        assert_eq!(record.value("company"), Some(json!("1")));
        assert_eq!(record.value("id"), Some(json!("7")));
    }

    #[test]
    fn merge_keeps_absent_fields_and_id() {
        let mut record = Record::new("1")
            .with_field("name", "Jane")
            .with_field("email", "jane@example.com");

        let mut payload = Payload::new();
        payload.insert("name".to_string(), json!("Janet"));
        payload.insert("id".to_string(), json!("999"));
        record.merge(&payload);

        assert_eq!(record.id.as_str(), "1");
        assert_eq!(record.value("name"), Some(json!("Janet")));
        assert_eq!(record.value("email"), Some(json!("jane@example.com")));
        assert!(!record.fields.contains_key("id"));
    }

    #[test]
    fn empty_values() {
        assert!(is_empty_value(None));
        assert!(is_empty_value(Some(&Value::Null)));
        assert!(is_empty_value(Some(&json!("   "))));
        assert!(is_empty_value(Some(&json!([]))));
        assert!(!is_empty_value(Some(&json!(0))));
        assert!(!is_empty_value(Some(&json!(false))));
        assert!(!is_empty_value(Some(&json!("x"))));
    }

    #[test]
    fn identifiers_normalise_numbers() {
        assert_eq!(identifier_of(&json!(1)), Some("1".to_string()));
        assert_eq!(identifier_of(&json!("1")), Some("1".to_string()));
        assert_eq!(identifier_of(&json!(true)), None);
    }
}
