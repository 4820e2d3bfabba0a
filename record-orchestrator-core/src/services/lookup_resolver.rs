//! Foreign-key resolution between identifiers and labels

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::types::{identifier_of, FieldDefinition, FieldOption, Label, LookupTable, OptionsSource};

/// Lookup tables indexed by field key.
#[derive(Debug, Clone, Default)]
pub struct LookupResolver {
    tables: HashMap<String, LookupTable>,
}

impl LookupResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_table(mut self, field_key: impl Into<String>, table: LookupTable) -> Self {
        self.load_table(field_key, table);
        self
    }

    /// Register or replace the table for `field_key`.
    pub fn load_table(&mut self, field_key: impl Into<String>, table: LookupTable) {
        let field_key = field_key.into();
        log::debug!("Loaded lookup table '{field_key}' ({} entries)", table.len());
        self.tables.insert(field_key, table);
    }

    /// Identifier → label. Anything unresolvable becomes [`Label::Unknown`].
    #[must_use]
    pub fn resolve_label(&self, field_key: &str, raw: &Value) -> Label {
        identifier_of(raw)
            .and_then(|id| {
                self.tables
                    .get(field_key)
                    .and_then(|t| t.label(&id))
                    .map(str::to_string)
            })
            .map_or(Label::Unknown, Label::Known)
    }

    /// Label → identifier, for persisting a form submission.
    pub fn resolve_identifier(&self, field_key: &str, label: &str) -> CoreResult<String> {
        self.tables
            .get(field_key)
            .and_then(|t| t.identifier(label))
            .map(str::to_string)
            .ok_or_else(|| CoreError::LookupNotFound {
                field: field_key.to_string(),
                label: label.to_string(),
            })
    }

    /// Current option set of `field`, or `None` if it has no options source.
    ///
    /// A lookup field whose table is not loaded yet gets an empty list.
    #[must_use]
    pub fn options_for(&self, field: &FieldDefinition) -> Option<Vec<FieldOption>> {
        match field.options_provider.as_ref()? {
            OptionsSource::Lookup => Some(
                self.tables
                    .get(&field.key)
                    .map(LookupTable::options)
                    .unwrap_or_default(),
            ),
            OptionsSource::Static { options } => Some(options.clone()),
        }
    }

    /// Text shown in a listing cell.
    #[must_use]
    pub fn display_value(&self, field: &FieldDefinition, raw: Option<&Value>) -> String {
        let Some(raw) = raw.filter(|v| !v.is_null()) else {
            return String::new();
        };
        match field.options_provider.as_ref() {
            Some(OptionsSource::Lookup) => self.resolve_label(&field.key, raw).to_string(),
            Some(OptionsSource::Static { options }) => identifier_of(raw)
                .and_then(|id| options.iter().find(|o| o.value == id))
                .map_or_else(|| Label::Unknown.to_string(), |o| o.label.clone()),
            None => match raw {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }
}
