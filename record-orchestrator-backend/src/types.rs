use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BackendError, Result};

// ============ Payload ============

/// Raw field values keyed by field key, as submitted to a backend.
pub type Payload = serde_json::Map<String, serde_json::Value>;

// ============ Record ID ============

/// Immutable record identifier.
///
/// Seed data uses both numeric (`7`) and string (`"7"`) ids, so both JSON
/// forms are accepted and normalised to their string representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RecordIdRepr", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Create a record id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordIdRepr {
    Number(serde_json::Number),
    Text(String),
}

impl From<RecordIdRepr> for RecordId {
    fn from(repr: RecordIdRepr) -> Self {
        match repr {
            RecordIdRepr::Number(n) => Self(n.to_string()),
            RecordIdRepr::Text(s) => Self(s),
        }
    }
}

// ============ Operation ============

/// Mutation kinds a backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationOperation {
    /// Field-for-field update of an existing record.
    Update,
    /// Soft delete of an existing record.
    Delete,
}

impl fmt::Display for MutationOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

// ============ Submit Status ============

/// Status reported by a backend for a single submission.
///
/// A backend can signal failure either by returning `Failure` or by returning
/// an error; callers treat both the same way (see [`SubmitStatus::into_result`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmitStatus {
    /// The remote store acknowledged the mutation.
    Success,
    /// The remote store refused the mutation.
    Failure {
        /// Status code reported by the remote store (HTTP-like).
        code: u16,
        /// Optional human-readable reason.
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl SubmitStatus {
    /// Collapse a `Failure` status into [`BackendError::Rejected`].
    pub fn into_result(self, backend: &str) -> Result<()> {
        match self {
            Self::Success => Ok(()),
            Self::Failure { code, message } => Err(BackendError::Rejected {
                backend: backend.to_string(),
                status: code,
                message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_numbers_and_strings() {
        let ids: serde_json::Result<Vec<RecordId>> = serde_json::from_str(r#"[7, "7", "abc"]"#);
        let Ok(ids) = ids else {
            panic!("deserialize failed: {ids:?}");
        };
        assert_eq!(ids[0], RecordId::from(7_u64));
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[2].as_str(), "abc");
    }

    #[test]
    fn record_id_serializes_as_string() {
        let json = serde_json::to_string(&RecordId::from(42_u64));
        assert_eq!(json.ok().as_deref(), Some("\"42\""));
    }

    #[test]
    fn operation_display_matches_serde() {
        assert_eq!(MutationOperation::Update.to_string(), "update");
        let json = serde_json::to_string(&MutationOperation::Delete);
        assert_eq!(json.ok().as_deref(), Some("\"delete\""));
    }

    #[test]
    fn failure_status_becomes_rejected_error() {
        let status = SubmitStatus::Failure {
            code: 500,
            message: None,
        };
        match status.into_result("simulated") {
            Err(BackendError::Rejected { status, .. }) => assert_eq!(status, 500),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn success_status_is_ok() {
        assert!(SubmitStatus::Success.into_result("simulated").is_ok());
    }
}
