//! User-visible mutation notifications

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use record_orchestrator_core::error::CoreError;
use record_orchestrator_core::traits::MutationListener;
use record_orchestrator_core::types::{MutationOperation, MutationPhase, MutationTicket, RecordId};
use serde::Serialize;

pub const SAVE_SUCCESS_MESSAGE: &str = "Record saved successfully.";
pub const SAVE_FAILURE_MESSAGE: &str = "An error occurred while saving the record.";
pub const REMOVE_SUCCESS_MESSAGE: &str = "Record removed successfully.";
pub const REMOVE_FAILURE_MESSAGE: &str = "An error occurred while removing the record.";

/// Pending notifications kept before the oldest are dropped.
pub const MAX_PENDING_NOTIFICATIONS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub record_id: RecordId,
    pub timestamp: DateTime<Utc>,
}

/// Collects one notification per resolved mutation.
///
/// Hosts are expected to [`drain`](Self::drain) after displaying. At most
/// [`MAX_PENDING_NOTIFICATIONS`] are kept; older ones are dropped first.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    entries: Mutex<VecDeque<Notification>>,
}

impl NotificationCenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending notifications, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().iter().cloned().collect()
    }

    /// Take every pending notification.
    pub fn drain(&self) -> Vec<Notification> {
        self.lock().drain(..).collect()
    }

    fn push(&self, level: NotificationLevel, message: &str, record_id: &RecordId) {
        let mut entries = self.lock();
        if entries.len() == MAX_PENDING_NOTIFICATIONS {
            entries.pop_front();
        }
        entries.push_back(Notification {
            level,
            message: message.to_string(),
            record_id: record_id.clone(),
            timestamp: Utc::now(),
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Notification>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MutationListener for NotificationCenter {
    fn on_phase(&self, ticket: &MutationTicket, phase: MutationPhase) {
        if phase != MutationPhase::Applied {
            return;
        }
        let message = match ticket.operation {
            MutationOperation::Update => SAVE_SUCCESS_MESSAGE,
            MutationOperation::Delete => REMOVE_SUCCESS_MESSAGE,
        };
        self.push(NotificationLevel::Success, message, &ticket.record_id);
    }

    fn on_failure(&self, ticket: &MutationTicket, _error: &CoreError) {
        let message = match ticket.operation {
            MutationOperation::Update => SAVE_FAILURE_MESSAGE,
            MutationOperation::Delete => REMOVE_FAILURE_MESSAGE,
        };
        self.push(NotificationLevel::Error, message, &ticket.record_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_orchestrator_backend::BackendError;

    #[test]
    fn applied_update_raises_save_success() {
        let center = NotificationCenter::new();
        let ticket = MutationTicket::new(RecordId::from("1"), MutationOperation::Update);

        center.on_phase(&ticket, MutationPhase::Dispatched);
        center.on_phase(&ticket, MutationPhase::Applied);
        center.on_phase(&ticket, MutationPhase::Idle);

        let notes = center.snapshot();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Success);
        assert_eq!(notes[0].message, SAVE_SUCCESS_MESSAGE);
    }

    #[test]
    fn failure_raises_error_and_drain_empties() {
        let center = NotificationCenter::new();
        let ticket = MutationTicket::new(RecordId::from("2"), MutationOperation::Delete);
        let error = CoreError::MutationFailed {
            record_id: ticket.record_id.clone(),
            operation: ticket.operation,
            source: BackendError::Rejected {
                backend: "test".to_string(),
                status: 500,
                message: Some("boom".to_string()),
            },
        };

        center.on_failure(&ticket, &error);

        let drained = center.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].level, NotificationLevel::Error);
        assert_eq!(drained[0].message, REMOVE_FAILURE_MESSAGE);
        assert!(center.snapshot().is_empty());
    }

    #[test]
    fn undrained_queue_drops_oldest() {
        let center = NotificationCenter::new();
        for i in 0..=MAX_PENDING_NOTIFICATIONS {
            let ticket = MutationTicket::new(RecordId::from(i.to_string()), MutationOperation::Delete);
            center.on_phase(&ticket, MutationPhase::Applied);
        }

        let pending = center.snapshot();
        assert_eq!(pending.len(), MAX_PENDING_NOTIFICATIONS);
        assert_eq!(pending[0].record_id, RecordId::from("1"));
        assert_eq!(
            pending.last().map(|n| n.record_id.clone()),
            Some(RecordId::from(MAX_PENDING_NOTIFICATIONS.to_string()))
        );
    }
}
