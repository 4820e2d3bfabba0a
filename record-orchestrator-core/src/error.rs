//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::ValidationErrors;

// Re-export backend types carried by errors
pub use record_orchestrator_backend::{BackendError, MutationOperation, RecordId};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Schema definition is malformed (duplicate key, unknown field)
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Seed data contains the same record id twice
    #[error("Duplicate record id: {0}")]
    DuplicateRecord(RecordId),

    /// Record not found
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// A foreign-key label does not map to any known identifier
    #[error("No option labelled '{label}' for field '{field}'")]
    LookupNotFound { field: String, label: String },

    /// One or more submitted form values are invalid
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Another mutation for the same record has not resolved yet
    #[error("A mutation is already in progress for record {0}")]
    MutationInProgress(RecordId),

    /// The record was deleted and no longer accepts mutations
    #[error("Record {0} is deleted and cannot be modified")]
    RecordDeleted(RecordId),

    /// The backend refused or failed the mutation; nothing was applied
    #[error("Failed to {operation} record {record_id}: {source}")]
    MutationFailed {
        record_id: RecordId,
        operation: MutationOperation,
        source: BackendError,
    },

    /// Seed/config storage error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::RecordNotFound(_)
            | Self::LookupNotFound { .. }
            | Self::Validation(_)
            | Self::MutationInProgress(_)
            | Self::RecordDeleted(_) => true,
            Self::MutationFailed { source, .. } => source.is_expected(),
            _ => false,
        }
    }

    /// Log this error at the level chosen by [`is_expected`](Self::is_expected).
    pub fn log(&self, context: &str) {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
