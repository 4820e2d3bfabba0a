use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all mutation backend operations.
///
/// Each variant carries a `backend` field identifying which backend produced
/// the error. Every variant is a Failure outcome for the caller; the variants
/// only differ in how they are reported and logged.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "code")]
pub enum BackendError {
    /// The remote store answered with a failure status.
    #[error("[{backend}] Rejected with status {status}{}", message_suffix(.message))]
    Rejected {
        /// Backend that produced the error.
        backend: String,
        /// Status code reported by the remote store.
        status: u16,
        /// Original message from the remote store, if available.
        message: Option<String>,
    },

    /// The host-imposed time limit elapsed before the backend resolved.
    #[error("[{backend}] Timed out after {after_ms} ms")]
    Timeout {
        /// Backend that produced the error.
        backend: String,
        /// Configured limit in milliseconds.
        after_ms: u64,
    },
}

impl BackendError {
    /// Whether this is expected behaviour (the remote store refused a request),
    /// used for log level selection.
    ///
    /// Returns `true` for client-side rejections (4xx) that should be logged at
    /// `warn`; everything else is logged at `error`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Rejected { status, .. } => (400..500).contains(status),
            Self::Timeout { .. } => false,
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Result alias for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;
