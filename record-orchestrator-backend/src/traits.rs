use async_trait::async_trait;

use crate::error::Result;
use crate::types::{MutationOperation, Payload, RecordId, SubmitStatus};

/// Mutation backend trait
///
/// Abstracts the remote call that confirms an update or delete. The caller
/// issues a submission and awaits its resolution; the backend never touches
/// local record state.
///
/// Both `Ok(SubmitStatus::Failure { .. })` and `Err(_)` are failures for the
/// caller. Implementations should not panic on remote errors.
#[async_trait]
pub trait MutationBackend: Send + Sync {
    /// Backend identifier, used in error messages and logs.
    fn id(&self) -> &'static str;

    /// Submit a mutation for a record.
    ///
    /// # Arguments
    /// * `operation` - Update or Delete
    /// * `record_id` - Target record
    /// * `payload` - Submitted field values (`None` for deletes)
    async fn submit(
        &self,
        operation: MutationOperation,
        record_id: &RecordId,
        payload: Option<&Payload>,
    ) -> Result<SubmitStatus>;

    /// Submit and collapse every failure shape into `Err`.
    async fn submit_checked(
        &self,
        operation: MutationOperation,
        record_id: &RecordId,
        payload: Option<&Payload>,
    ) -> Result<()> {
        self.submit(operation, record_id, payload)
            .await?
            .into_result(self.id())
    }
}
