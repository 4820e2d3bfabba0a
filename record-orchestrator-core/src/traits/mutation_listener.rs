//! Mutation lifecycle listener Trait

use crate::error::CoreError;
use crate::types::{MutationPhase, MutationTicket};

/// Receives mutation phase transitions from the coordinator.
///
/// Called synchronously, never while the record store is locked, so
/// implementations may read the store. Hosts use this to raise user-visible
/// notifications.
pub trait MutationListener: Send + Sync {
    /// A mutation entered `phase`.
    fn on_phase(&self, ticket: &MutationTicket, phase: MutationPhase);

    /// A dispatched mutation failed and was rolled back.
    fn on_failure(&self, _ticket: &MutationTicket, _error: &CoreError) {}
}

/// Listener that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMutationListener;

impl MutationListener for NoopMutationListener {
    fn on_phase(&self, _ticket: &MutationTicket, _phase: MutationPhase) {}
}
