//! In-process stand-in for a remote record store.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::MutationBackend;
use crate::types::{MutationOperation, Payload, RecordId, SubmitStatus};

/// Status code used for refused submissions.
const SIMULATED_FAILURE_STATUS: u16 = 500;

/// Simulated backend
///
/// Acknowledges submissions for an explicit set of accepted record ids and
/// refuses everything else with status 500, after an optional latency.
/// Useful for demos and for exercising both branches of the mutation protocol
/// without a server.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    accepted: HashSet<RecordId>,
    latency: Duration,
}

impl SimulatedBackend {
    /// Create a backend that refuses every submission immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every submission by `latency` before resolving.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Accept submissions for `record_id`.
    #[must_use]
    pub fn accept(mut self, record_id: impl Into<RecordId>) -> Self {
        self.accepted.insert(record_id.into());
        self
    }

    /// Accept submissions for every id in `ids`.
    #[must_use]
    pub fn accept_all<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RecordId>,
    {
        self.accepted.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Whether submissions for `record_id` will be acknowledged.
    #[must_use]
    pub fn accepts(&self, record_id: &RecordId) -> bool {
        self.accepted.contains(record_id)
    }
}

#[async_trait]
impl MutationBackend for SimulatedBackend {
    fn id(&self) -> &'static str {
        "simulated"
    }

    async fn submit(
        &self,
        operation: MutationOperation,
        record_id: &RecordId,
        payload: Option<&Payload>,
    ) -> Result<SubmitStatus> {
        log::debug!(
            "[simulated] {operation} {record_id} ({} field(s))",
            payload.map_or(0, serde_json::Map::len)
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.accepts(record_id) {
            Ok(SubmitStatus::Success)
        } else {
            Ok(SubmitStatus::Failure {
                code: SIMULATED_FAILURE_STATUS,
                message: Some(format!("simulated {operation} failure")),
            })
        }
    }
}
