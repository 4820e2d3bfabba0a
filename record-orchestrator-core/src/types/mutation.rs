//! Mutation state and outcome types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use record_orchestrator_backend::{MutationOperation, RecordId};

use super::Record;

/// Per-record mutation state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MutationState {
    /// No mutation in flight
    #[default]
    Pristine,
    /// Update dispatched, awaiting the backend
    PendingUpdate,
    /// Delete dispatched, awaiting the backend
    PendingDelete,
    /// Delete confirmed; terminal
    Deleted,
}

impl MutationState {
    /// Pending state entered when `operation` is dispatched.
    #[must_use]
    pub fn pending_for(operation: MutationOperation) -> Self {
        match operation {
            MutationOperation::Update => Self::PendingUpdate,
            MutationOperation::Delete => Self::PendingDelete,
        }
    }

    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::PendingUpdate | Self::PendingDelete)
    }

    #[must_use]
    pub fn is_deleted(self) -> bool {
        self == Self::Deleted
    }
}

/// Coordinator phase reported to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MutationPhase {
    /// Back to accepting mutations (after an applied update or a failure)
    Idle,
    /// Submitted to the backend
    Dispatched,
    /// Backend confirmed; record store updated
    Applied,
}

/// Identity of one dispatched mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationTicket {
    pub id: Uuid,
    pub record_id: RecordId,
    pub operation: MutationOperation,
    pub dispatched_at: DateTime<Utc>,
}

impl MutationTicket {
    #[must_use]
    pub fn new(record_id: RecordId, operation: MutationOperation) -> Self {
        Self {
            id: Uuid::new_v4(),
            record_id,
            operation,
            dispatched_at: Utc::now(),
        }
    }
}

/// Result of a confirmed mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    pub ticket: MutationTicket,
    /// State after the mutation was applied
    pub state: MutationState,
    /// Record as stored after the mutation
    pub record: Record,
}

/// Batch mutation failure item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMutationFailure {
    pub record_id: RecordId,
    pub reason: String,
}

/// Batch mutation result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMutationResult {
    pub success_count: usize,
    pub failed_count: usize,
    pub failures: Vec<BatchMutationFailure>,
}
