//! Form descriptor and validation types

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::FieldOption;

/// Editable field descriptor handed to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub required: bool,
    /// Current value (`None` when creating or when the record lacks the field)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Resolved option list for foreign-key fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    /// Options come from a lookup table (reverse resolution applies)
    pub lookup: bool,
}

impl FormField {
    /// Option whose identifier or label equals `raw`.
    #[must_use]
    pub fn find_option(&self, raw: &str) -> Option<&FieldOption> {
        let options = self.options.as_deref()?;
        options
            .iter()
            .find(|o| o.value == raw)
            .or_else(|| options.iter().find(|o| o.label == raw))
    }
}

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldErrorKind {
    /// Required field submitted empty or absent
    RequiredFieldMissing,
    /// Foreign-key value matches neither an identifier nor a label
    UnknownOption { value: String },
}

/// A validation failure for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub label: String,
    pub kind: FieldErrorKind,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldErrorKind::RequiredFieldMissing => write!(f, "{} is required", self.label),
            FieldErrorKind::UnknownOption { value } => {
                write!(f, "{}: unknown option '{value}'", self.label)
            }
        }
    }
}

/// All validation failures of one submission, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Error for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Keys of the failed fields.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}
