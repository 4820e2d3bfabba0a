//! Optimistic update/delete protocol
//!
//! Per record id:
//!
//! ```text
//! Idle ──request──▶ Dispatched ──Success──▶ Applied ──(update)──▶ Idle
//!                      │                       └────(delete)──▶ Deleted (terminal)
//!                      └──────Failure──────▶ Idle (state restored, nothing applied)
//! ```
//!
//! The store is only written before dispatch (to mark the record pending)
//! and after resolution (to apply or roll back), each time under a single
//! write lock, so readers never see a partially merged record.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use record_orchestrator_backend::MutationBackend;

use crate::error::{CoreError, CoreResult};
use crate::store::RecordStore;
use crate::traits::{MutationListener, NoopMutationListener};
use crate::types::{
    BatchMutationFailure, BatchMutationResult, MutationOperation, MutationOutcome, MutationPhase,
    MutationState, MutationTicket, Payload, Record, RecordId,
};

/// Mutation coordinator
///
/// Sole writer of the [`RecordStore`]. Cloning is cheap and shares the store.
#[derive(Clone)]
pub struct MutationCoordinator {
    store: Arc<RwLock<RecordStore>>,
    backend: Arc<dyn MutationBackend>,
    listener: Arc<dyn MutationListener>,
}

impl MutationCoordinator {
    /// Create a coordinator owning `store`.
    #[must_use]
    pub fn new(store: RecordStore, backend: Arc<dyn MutationBackend>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            backend,
            listener: Arc::new(NoopMutationListener),
        }
    }

    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn MutationListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Read-only access to the store.
    ///
    /// The closure runs under the read lock; it cannot observe a mutation
    /// half-applied.
    pub fn read<R>(&self, f: impl FnOnce(&RecordStore) -> R) -> R {
        f(&self.read_store())
    }

    /// Current mutation state of `record_id`.
    #[must_use]
    pub fn state(&self, record_id: &RecordId) -> MutationState {
        self.read(|store| store.state(record_id))
    }

    /// Select `record_id` and return its detail record.
    ///
    /// Falls back to the summary record when no detail record was seeded.
    pub fn view(&self, record_id: &RecordId) -> CoreResult<Record> {
        let mut store = self.write_store();
        store.select(record_id)?;
        store
            .detail(record_id)
            .or_else(|| store.get(record_id))
            .cloned()
            .ok_or_else(|| CoreError::RecordNotFound(record_id.clone()))
    }

    /// Update `record_id` with `payload` once the backend confirms.
    pub async fn request_update(
        &self,
        record_id: &RecordId,
        payload: Payload,
    ) -> CoreResult<MutationOutcome> {
        self.dispatch(record_id, MutationOperation::Update, Some(payload))
            .await
    }

    /// Soft-delete `record_id` once the backend confirms.
    pub async fn request_delete(&self, record_id: &RecordId) -> CoreResult<MutationOutcome> {
        self.dispatch(record_id, MutationOperation::Delete, None)
            .await
    }

    /// Delete several records concurrently, each through the per-record protocol.
    pub async fn request_delete_batch(&self, record_ids: &[RecordId]) -> BatchMutationResult {
        let deletes = record_ids.iter().map(|record_id| async move {
            self.request_delete(record_id)
                .await
                .map_err(|e| (record_id.clone(), e))
        });

        let results = futures::future::join_all(deletes).await;

        let mut success_count = 0;
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(_) => success_count += 1,
                Err((record_id, e)) => failures.push(BatchMutationFailure {
                    record_id,
                    reason: e.to_string(),
                }),
            }
        }

        BatchMutationResult {
            success_count,
            failed_count: failures.len(),
            failures,
        }
    }

    async fn dispatch(
        &self,
        record_id: &RecordId,
        operation: MutationOperation,
        payload: Option<Payload>,
    ) -> CoreResult<MutationOutcome> {
        let (ticket, prior) = self.begin(record_id, operation)?;
        let mut pending = PendingGuard::new(&self.store, record_id, prior);

        log::debug!(
            "Dispatching {operation} for record {record_id} (ticket {})",
            ticket.id
        );
        self.listener.on_phase(&ticket, MutationPhase::Dispatched);

        let result = self
            .backend
            .submit_checked(operation, record_id, payload.as_ref())
            .await;

        match result {
            Ok(()) => {
                // on error the guard restores the prior state
                let outcome = self.apply(&ticket, payload.as_ref())?;
                pending.disarm();
                log::info!("Record {record_id} {operation} applied");
                self.listener.on_phase(&ticket, MutationPhase::Applied);
                if outcome.state == MutationState::Pristine {
                    self.listener.on_phase(&ticket, MutationPhase::Idle);
                }
                Ok(outcome)
            }
            Err(source) => {
                self.write_store().set_state(record_id, prior);
                pending.disarm();
                let error = CoreError::MutationFailed {
                    record_id: record_id.clone(),
                    operation,
                    source,
                };
                error.log("Mutation rolled back");
                self.listener.on_failure(&ticket, &error);
                self.listener.on_phase(&ticket, MutationPhase::Idle);
                Err(error)
            }
        }
    }

    /// Check the record accepts a mutation and mark it pending.
    fn begin(
        &self,
        record_id: &RecordId,
        operation: MutationOperation,
    ) -> CoreResult<(MutationTicket, MutationState)> {
        let mut store = self.write_store();
        if !store.contains(record_id) {
            return Err(CoreError::RecordNotFound(record_id.clone()));
        }

        let prior = store.state(record_id);
        if prior.is_pending() {
            return Err(CoreError::MutationInProgress(record_id.clone()));
        }
        if prior.is_deleted() {
            return Err(CoreError::RecordDeleted(record_id.clone()));
        }

        store.set_state(record_id, MutationState::pending_for(operation));
        Ok((MutationTicket::new(record_id.clone(), operation), prior))
    }

    /// Apply a confirmed mutation under one write lock.
    fn apply(&self, ticket: &MutationTicket, payload: Option<&Payload>) -> CoreResult<MutationOutcome> {
        let mut store = self.write_store();
        let record_id = &ticket.record_id;

        let state = match ticket.operation {
            MutationOperation::Update => {
                if let Some(payload) = payload {
                    store.merge(record_id, payload)?;
                }
                MutationState::Pristine
            }
            MutationOperation::Delete => MutationState::Deleted,
        };
        store.set_state(record_id, state);

        let record = store
            .get(record_id)
            .cloned()
            .ok_or_else(|| CoreError::RecordNotFound(record_id.clone()))?;

        Ok(MutationOutcome {
            ticket: ticket.clone(),
            state,
            record,
        })
    }

    fn read_store(&self) -> RwLockReadGuard<'_, RecordStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, RecordStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Restores the pre-dispatch state if a dispatch is abandoned (its future
/// dropped, or the backend panicked) before resolution.
struct PendingGuard<'a> {
    store: &'a RwLock<RecordStore>,
    record_id: &'a RecordId,
    prior: MutationState,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(store: &'a RwLock<RecordStore>, record_id: &'a RecordId, prior: MutationState) -> Self {
        Self {
            store,
            record_id,
            prior,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            log::warn!(
                "Mutation for record {} abandoned before resolution, state restored",
                self.record_id
            );
            self.store
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .set_state(self.record_id, self.prior);
        }
    }
}
