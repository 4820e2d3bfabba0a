//! Schema and field definition types

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A selectable `{value, label}` pair for a foreign-key field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Raw identifier stored in records
    pub value: String,
    /// Human-readable label
    pub label: String,
}

impl FieldOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Where a field's option set comes from.
///
/// Options are resolved each time they are needed, never at schema-load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OptionsSource {
    /// The lookup table registered under this field's key
    Lookup,
    /// A fixed option list
    Static { options: Vec<FieldOption> },
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Unique key, shared with record field names
    pub key: String,
    /// Display text
    pub label: String,
    /// Display order (ascending, need not be contiguous)
    #[serde(default, alias = "seq")]
    pub sequence: i64,
    /// Whether the field is shown in the listing and the edit form
    #[serde(default, alias = "show_in_listing")]
    pub visible_in_listing: bool,
    /// Whether an empty value fails validation
    #[serde(default)]
    pub required: bool,
    /// Option set for foreign-key fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_provider: Option<OptionsSource>,
}

impl FieldDefinition {
    /// Create a hidden, optional field.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, sequence: i64) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sequence,
            visible_in_listing: false,
            required: false,
            options_provider: None,
        }
    }

    #[must_use]
    pub fn listed(mut self) -> Self {
        self.visible_in_listing = true;
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_options(mut self, source: OptionsSource) -> Self {
        self.options_provider = Some(source);
        self
    }

    /// Whether values of this field are identifiers resolved through a lookup table.
    #[must_use]
    pub fn is_lookup(&self) -> bool {
        matches!(self.options_provider, Some(OptionsSource::Lookup))
    }
}

/// Column descriptor handed to the host for the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub key: String,
    pub label: String,
    pub sequence: i64,
    /// Cells hold identifiers that render through a lookup table
    pub lookup: bool,
}

impl From<&FieldDefinition> for ColumnDescriptor {
    fn from(field: &FieldDefinition) -> Self {
        Self {
            key: field.key.clone(),
            label: field.label.clone(),
            sequence: field.sequence,
            lookup: field.is_lookup(),
        }
    }
}

/// Schema with unique field keys, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchema")]
pub struct Schema {
    fields: Vec<FieldDefinition>,
}

#[derive(Deserialize)]
struct RawSchema {
    fields: Vec<FieldDefinition>,
}

impl TryFrom<RawSchema> for Schema {
    type Error = CoreError;

    fn try_from(raw: RawSchema) -> CoreResult<Self> {
        Self::new(raw.fields)
    }
}

impl Schema {
    /// Create a schema, rejecting duplicate keys.
    pub fn new(fields: Vec<FieldDefinition>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.key.as_str()) {
                return Err(CoreError::InvalidSchema(format!(
                    "duplicate field key '{}'",
                    field.key
                )));
            }
        }
        Ok(Self { fields })
    }

    /// All fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Look up a field by key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Visible fields, ascending by sequence; ties keep declaration order.
    #[must_use]
    pub fn listed_fields(&self) -> Vec<&FieldDefinition> {
        let mut listed: Vec<&FieldDefinition> =
            self.fields.iter().filter(|f| f.visible_in_listing).collect();
        // sort_by_key is stable
        listed.sort_by_key(|f| f.sequence);
        listed
    }

    /// Attach an options source to an existing field.
    pub fn bind_options(&mut self, key: &str, source: OptionsSource) -> CoreResult<()> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.key == key)
            .ok_or_else(|| CoreError::InvalidSchema(format!("unknown field '{key}'")))?;
        field.options_provider = Some(source);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_are_rejected() {
        let result = Schema::new(vec![
            FieldDefinition::new("name", "Name", 1),
            FieldDefinition::new("name", "Other", 2),
        ]);
        assert!(matches!(result, Err(CoreError::InvalidSchema(_))));
    }

    #[test]
    fn deserializes_short_keys() {
        let json = r#"{
            "fields": [
                { "key": "name", "label": "Name", "seq": 2, "show_in_listing": true, "required": true },
                { "key": "company", "label": "Company", "seq": 1, "show_in_listing": true,
                  "optionsProvider": { "kind": "lookup" } },
                { "key": "notes", "label": "Notes", "seq": 3 }
            ]
        }"#;
        let schema: Schema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.fields().len(), 3);

        let name = schema.field("name").unwrap();
        assert_eq!(name.sequence, 2);
        assert!(name.visible_in_listing);
        assert!(name.required);

        assert!(schema.field("company").unwrap().is_lookup());
        assert!(!schema.field("notes").unwrap().visible_in_listing);
    }

    #[test]
    fn deserialize_rejects_duplicates() {
        let json = r#"{ "fields": [ { "key": "a", "label": "A" }, { "key": "a", "label": "B" } ] }"#;
        let result: serde_json::Result<Schema> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn bind_options_on_unknown_field_fails() {
        let mut schema = Schema::new(vec![FieldDefinition::new("company", "Company", 1)]).unwrap();
        assert!(schema.bind_options("company", OptionsSource::Lookup).is_ok());
        assert!(schema.field("company").unwrap().is_lookup());
        assert!(schema
            .bind_options("missing", OptionsSource::Lookup)
            .is_err());
    }
}
