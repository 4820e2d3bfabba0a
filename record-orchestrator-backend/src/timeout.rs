//! Host-imposed time limit around any backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{BackendError, Result};
use crate::traits::MutationBackend;
use crate::types::{MutationOperation, Payload, RecordId, SubmitStatus};

/// Wraps a backend and fails submissions that do not resolve within `limit`.
///
/// The wrapped submission is dropped when the limit elapses, so the remote
/// side may still apply it; the caller only sees `BackendError::Timeout`.
#[derive(Clone)]
pub struct TimeoutBackend {
    inner: Arc<dyn MutationBackend>,
    limit: Duration,
}

impl TimeoutBackend {
    #[must_use]
    pub fn new(inner: Arc<dyn MutationBackend>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl MutationBackend for TimeoutBackend {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    async fn submit(
        &self,
        operation: MutationOperation,
        record_id: &RecordId,
        payload: Option<&Payload>,
    ) -> Result<SubmitStatus> {
        match tokio::time::timeout(self.limit, self.inner.submit(operation, record_id, payload))
            .await
        {
            Ok(result) => result,
            Err(_) => {
                let after_ms = u64::try_from(self.limit.as_millis()).unwrap_or(u64::MAX);
                log::warn!(
                    "[{}] {operation} {record_id} timed out after {after_ms} ms",
                    self.inner.id()
                );
                Err(BackendError::Timeout {
                    backend: self.inner.id().to_string(),
                    after_ms,
                })
            }
        }
    }
}
