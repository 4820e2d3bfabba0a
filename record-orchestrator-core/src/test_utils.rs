//! Test helpers
//!
//! Mock collaborators and fixture factories.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use record_orchestrator_backend::{Result as BackendResult, SubmitStatus};
use tokio::sync::{Notify, RwLock};

use crate::error::CoreError;
use crate::services::{LookupResolver, MutationCoordinator};
use crate::store::RecordStore;
use crate::traits::{MutationBackend, MutationListener};
use crate::types::{
    FieldDefinition, LookupTable, MutationOperation, MutationPhase, MutationTicket,
    OptionsSource, Payload, Record, RecordId, Schema,
};

// ===== MockBackend =====

/// Accepts only registered ids; everything else gets a 500.
pub struct MockBackend {
    accepted: RwLock<HashSet<RecordId>>,
    /// If Some, submissions wait for a notification before resolving
    gate: RwLock<Option<Arc<Notify>>>,
    calls: RwLock<Vec<(MutationOperation, RecordId)>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            accepted: RwLock::new(HashSet::new()),
            gate: RwLock::new(None),
            calls: RwLock::new(Vec::new()),
        }
    }

    pub async fn accept(&self, record_id: &RecordId) {
        self.accepted.write().await.insert(record_id.clone());
    }

    /// Hold every submission until the returned handle is notified.
    pub async fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.write().await = Some(notify.clone());
        notify
    }

    pub async fn calls(&self) -> Vec<(MutationOperation, RecordId)> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl MutationBackend for MockBackend {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn submit(
        &self,
        operation: MutationOperation,
        record_id: &RecordId,
        _payload: Option<&Payload>,
    ) -> BackendResult<SubmitStatus> {
        self.calls
            .write()
            .await
            .push((operation, record_id.clone()));

        let gate = self.gate.read().await.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.accepted.read().await.contains(record_id) {
            Ok(SubmitStatus::Success)
        } else {
            Ok(SubmitStatus::Failure {
                code: 500,
                message: None,
            })
        }
    }
}

// ===== RecordingListener =====

#[derive(Default)]
pub struct RecordingListener {
    phases: Mutex<Vec<(RecordId, MutationPhase)>>,
    failures: Mutex<Vec<String>>,
}

impl RecordingListener {
    pub fn phases_for(&self, record_id: &RecordId) -> Vec<MutationPhase> {
        self.phases
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == record_id)
            .map(|(_, phase)| *phase)
            .collect()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }
}

impl MutationListener for RecordingListener {
    fn on_phase(&self, ticket: &MutationTicket, phase: MutationPhase) {
        self.phases
            .lock()
            .unwrap()
            .push((ticket.record_id.clone(), phase));
    }

    fn on_failure(&self, _ticket: &MutationTicket, error: &CoreError) {
        self.failures.lock().unwrap().push(error.to_string());
    }
}

// ===== Fixtures =====

/// id, name (required), company (lookup), email (required) listed; notes hidden.
pub fn fixture_schema() -> Schema {
    Schema::new(vec![
        FieldDefinition::new("notes", "Notes", 4),
        FieldDefinition::new("email", "Email", 3).listed().required(),
        FieldDefinition::new("company", "Company", 2)
            .listed()
            .with_options(OptionsSource::Lookup),
        FieldDefinition::new("name", "Name", 1).listed().required(),
        FieldDefinition::new("id", "ID", 0).listed(),
    ])
    .unwrap()
}

/// Summary records `1..=count`, alternating between the two fixture companies.
pub fn fixture_records(count: usize) -> Vec<Record> {
    (1..=count)
        .map(|i| {
            Record::new(i.to_string())
                .with_field("name", format!("User {i}"))
                .with_field("company", if i % 2 == 0 { "2" } else { "1" })
                .with_field("email", format!("user{i}@example.com"))
        })
        .collect()
}

/// Detail records for the first `count` fixture records.
pub fn fixture_details(count: usize) -> Vec<Record> {
    fixture_records(count)
        .into_iter()
        .map(|record| {
            let notes = format!("Detail notes for {}", record.id);
            record.with_field("notes", notes)
        })
        .collect()
}

pub fn fixture_lookups() -> LookupResolver {
    let mut table = LookupTable::new();
    table.insert("1", "Acme");
    table.insert("2", "Globex");
    LookupResolver::new().with_table("company", table)
}

// ===== Factory methods =====

/// Coordinator over 30 records (details for the first 10) with a mock
/// backend that rejects everything until told otherwise.
pub fn create_test_coordinator() -> (
    MutationCoordinator,
    Arc<MockBackend>,
    Arc<RecordingListener>,
) {
    let backend = Arc::new(MockBackend::new());
    let listener = Arc::new(RecordingListener::default());
    let store = RecordStore::new(fixture_records(30), fixture_details(10)).unwrap();
    let coordinator =
        MutationCoordinator::new(store, backend.clone()).with_listener(listener.clone());
    (coordinator, backend, listener)
}
