//! Record store
//!
//! Canonical record collection plus per-record mutation state and the
//! current selection. Only the mutation coordinator writes to it; every
//! other component reads through [`MutationCoordinator::read`].
//!
//! [`MutationCoordinator::read`]: crate::services::MutationCoordinator::read

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{MutationState, Payload, Record, RecordId};

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    /// Summary records in listing order
    records: Vec<Record>,
    /// id → position in `records`
    index: HashMap<RecordId, usize>,
    /// Full detail records, at most one per id
    details: HashMap<RecordId, Record>,
    /// Non-pristine states only
    states: HashMap<RecordId, MutationState>,
    selected: Option<RecordId>,
}

impl RecordStore {
    /// Seed the store from summary and detail records.
    ///
    /// Fails with `DuplicateRecord` if an id repeats within either set.
    pub fn new(records: Vec<Record>, details: Vec<Record>) -> CoreResult<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), position).is_some() {
                return Err(CoreError::DuplicateRecord(record.id.clone()));
            }
        }

        let mut detail_map = HashMap::with_capacity(details.len());
        for detail in details {
            let id = detail.id.clone();
            if detail_map.insert(id.clone(), detail).is_some() {
                return Err(CoreError::DuplicateRecord(id));
            }
        }

        Ok(Self {
            records,
            index,
            details: detail_map,
            states: HashMap::new(),
            selected: None,
        })
    }

    /// Summary records in listing order (deleted records included).
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    #[must_use]
    pub fn contains(&self, id: &RecordId) -> bool {
        self.index.contains_key(id)
    }

    /// Detail record for `id`, if one was seeded.
    #[must_use]
    pub fn detail(&self, id: &RecordId) -> Option<&Record> {
        self.details.get(id)
    }

    #[must_use]
    pub fn state(&self, id: &RecordId) -> MutationState {
        self.states.get(id).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_deleted(&self, id: &RecordId) -> bool {
        self.state(id).is_deleted()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&RecordId> {
        self.selected.as_ref()
    }

    pub(crate) fn select(&mut self, id: &RecordId) -> CoreResult<()> {
        if !self.contains(id) {
            return Err(CoreError::RecordNotFound(id.clone()));
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    pub(crate) fn set_state(&mut self, id: &RecordId, state: MutationState) {
        if state == MutationState::Pristine {
            self.states.remove(id);
        } else {
            self.states.insert(id.clone(), state);
        }
    }

    /// Merge `payload` into the summary record and its detail record.
    pub(crate) fn merge(&mut self, id: &RecordId, payload: &Payload) -> CoreResult<&Record> {
        let position = *self
            .index
            .get(id)
            .ok_or_else(|| CoreError::RecordNotFound(id.clone()))?;
        if let Some(detail) = self.details.get_mut(id) {
            detail.merge(payload);
        }
        let record = &mut self.records[position];
        record.merge(payload);
        Ok(record)
    }
}
