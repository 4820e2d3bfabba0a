//! Dynamic form generation and validation

use serde_json::Value;

use crate::error::CoreResult;
use crate::services::LookupResolver;
use crate::types::{
    identifier_of, is_empty_value, FieldError, FieldErrorKind, FormField, Payload, Record, Schema,
    ValidationErrors, ID_KEY,
};

/// Builds and validates edit forms for one schema.
///
/// Holds only borrows: build a fresh engine (and fresh descriptors) every
/// time the edit surface opens so option lists follow the latest lookups.
pub struct FormEngine<'a> {
    schema: &'a Schema,
    lookups: &'a LookupResolver,
}

impl<'a> FormEngine<'a> {
    #[must_use]
    pub fn new(schema: &'a Schema, lookups: &'a LookupResolver) -> Self {
        Self { schema, lookups }
    }

    /// One descriptor per visible field, in column order.
    ///
    /// Values are taken from `record` when editing; `None` builds an empty
    /// creation form.
    #[must_use]
    pub fn build_fields(&self, record: Option<&Record>) -> Vec<FormField> {
        self.schema
            .listed_fields()
            .into_iter()
            .map(|field| FormField {
                key: field.key.clone(),
                label: field.label.clone(),
                required: field.required,
                value: record.and_then(|r| r.value(&field.key)),
                options: self.lookups.options_for(field),
                lookup: field.is_lookup(),
            })
            .collect()
    }

    /// Check every field and report all failures together.
    pub fn validate(values: &Payload, fields: &[FormField]) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for field in fields {
            let value = values.get(&field.key);
            if is_empty_value(value) {
                if field.required {
                    errors.push(FieldError {
                        field: field.key.clone(),
                        label: field.label.clone(),
                        kind: FieldErrorKind::RequiredFieldMissing,
                    });
                }
                continue;
            }

            if field.options.is_some() {
                let raw = value.and_then(identifier_of).unwrap_or_default();
                if field.find_option(&raw).is_none() {
                    errors.push(FieldError {
                        field: field.key.clone(),
                        label: field.label.clone(),
                        kind: FieldErrorKind::UnknownOption { value: raw },
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Turn submitted form values into a backend payload.
    ///
    /// Foreign-key labels become raw identifiers; keys that are not form
    /// fields (including `id`) are dropped.
    pub fn normalize_submission(&self, values: &Payload, fields: &[FormField]) -> CoreResult<Payload> {
        let mut payload = Payload::new();

        for (key, value) in values {
            let Some(field) = fields.iter().find(|f| &f.key == key && f.key != ID_KEY) else {
                log::debug!("Ignoring submitted value for non-form key '{key}'");
                continue;
            };

            let normalized = match (&field.options, identifier_of(value)) {
                (Some(_), Some(raw)) if !is_empty_value(Some(value)) => {
                    Value::String(self.resolve_option(field, &raw)?)
                }
                _ => value.clone(),
            };
            payload.insert(key.clone(), normalized);
        }

        Ok(payload)
    }

    fn resolve_option(&self, field: &FormField, raw: &str) -> CoreResult<String> {
        if let Some(option) = field.options.iter().flatten().find(|o| o.value == raw) {
            return Ok(option.value.clone());
        }
        if field.lookup {
            return self.lookups.resolve_identifier(&field.key, raw);
        }
        field
            .find_option(raw)
            .map(|o| o.value.clone())
            .ok_or_else(|| crate::error::CoreError::LookupNotFound {
                field: field.key.clone(),
                label: raw.to_string(),
            })
    }
}
