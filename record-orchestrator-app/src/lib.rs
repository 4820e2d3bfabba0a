//! Platform-agnostic listing host for Record Orchestrator.
//!
//! Provides `ListingApp` (the rendering surface a frontend drives),
//! `ListingAppBuilder` (seed and backend injection), JSON seed loading and
//! configuration.
//!
//! ```no_run
//! # async fn run() -> record_orchestrator_core::CoreResult<()> {
//! use record_orchestrator_app::{config::AppConfig, ListingApp};
//!
//! let config = AppConfig::discover(None).await?;
//! let app = ListingApp::load(&config).await?;
//! for row in app.listing().rows {
//!     println!("{} {:?}", row.record_id, row.cells);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod notifications;
pub mod seed;
pub mod views;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard};

use record_orchestrator_backend::SimulatedBackend;
use record_orchestrator_core::error::{CoreError, CoreResult};
use record_orchestrator_core::services::{
    resolve_columns, FormEngine, LookupResolver, MutationCoordinator, PaginationEngine,
    DEFAULT_MAX_PAGE_SIZE,
};
use record_orchestrator_core::store::RecordStore;
use record_orchestrator_core::traits::MutationBackend;
use record_orchestrator_core::types::{
    BatchMutationResult, ColumnDescriptor, FieldDefinition, FormField, LookupTable, MutationOutcome,
    PaginationState, Payload, Record, RecordId, Schema, ValidationErrors, DEFAULT_PAGE_SIZE,
};

use crate::config::AppConfig;
use crate::notifications::{Notification, NotificationCenter};
use crate::seed::SeedData;
use crate::views::{DetailView, FormView, ListingView, PageInfo, RowView};

/// Listing state shared by every frontend.
///
/// All methods take `&self`; hosts can share one instance behind an `Arc`.
/// Derived views (`listing`, `form`) are recomputed on every call.
pub struct ListingApp {
    schema: Schema,
    lookups: RwLock<LookupResolver>,
    coordinator: MutationCoordinator,
    pagination: Mutex<PaginationEngine>,
    form: Mutex<Option<FormView>>,
    notifications: Arc<NotificationCenter>,
}

impl ListingApp {
    /// Load seed files and build the configured backend.
    pub async fn load(config: &AppConfig) -> CoreResult<Self> {
        let seed = SeedData::load(config).await?;
        let backend = config.backend.build(seed.details.first().map(|d| &d.id));
        ListingAppBuilder::new()
            .seed(seed)
            .backend(backend)
            .page_size(config.page_size)
            .max_page_size(config.max_page_size)
            .build()
    }

    #[must_use]
    pub fn coordinator(&self) -> &MutationCoordinator {
        &self.coordinator
    }

    #[must_use]
    pub fn columns(&self) -> Vec<ColumnDescriptor> {
        resolve_columns(&self.schema)
    }

    /// Register or replace the lookup table for `field_key`.
    ///
    /// Listings and forms opened afterwards resolve against the new table;
    /// an already open form keeps the options it was built with.
    pub fn load_lookup_table(&self, field_key: impl Into<String>, table: LookupTable) {
        self.lookups
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .load_table(field_key, table);
    }

    /// Visible rows for the current page.
    pub fn listing(&self) -> ListingView {
        let columns = self.columns();
        let fields = self.schema.listed_fields();
        let mut pagination = self.pagination();

        self.coordinator.read(|store| {
            pagination.sync_total(store.len());
            let window = pagination.window(store.records());
            let rows = window
                .items
                .iter()
                .map(|record| {
                    let state = store.state(&record.id);
                    RowView {
                        record_id: record.id.clone(),
                        cells: self.render_cells(&fields, record),
                        state,
                        deleted: state.is_deleted(),
                        can_mutate: !state.is_deleted() && !state.is_pending(),
                    }
                })
                .collect();

            ListingView {
                columns,
                rows,
                page: PageInfo::from(&window),
            }
        })
    }

    /// Select a record and render its detail record with the listing columns.
    pub fn on_view(&self, record_id: &RecordId) -> CoreResult<DetailView> {
        let record = self.coordinator.view(record_id)?;
        let fields = self.schema.listed_fields();
        Ok(DetailView {
            record_id: record.id.clone(),
            columns: self.columns(),
            cells: self.render_cells(&fields, &record),
            deleted: self.coordinator.state(record_id).is_deleted(),
        })
    }

    /// Open the edit form for a record, with freshly resolved options.
    pub fn open_update(&self, record_id: &RecordId) -> CoreResult<FormView> {
        if self.coordinator.state(record_id).is_deleted() {
            return Err(CoreError::RecordDeleted(record_id.clone()));
        }
        let record = self.coordinator.view(record_id)?;
        let fields = FormEngine::new(&self.schema, &self.lookups()).build_fields(Some(&record));
        let form = FormView {
            record_id: record.id.clone(),
            fields,
            errors: ValidationErrors::new(),
        };
        *self.form_slot() = Some(form.clone());
        Ok(form)
    }

    /// The open edit form, if any.
    #[must_use]
    pub fn form(&self) -> Option<FormView> {
        self.form_slot().clone()
    }

    /// Validate, normalize and submit an update.
    ///
    /// Validation failures are kept on the open form and returned as
    /// `CoreError::Validation`; nothing is dispatched. A confirmed update
    /// closes the form, a failed one leaves it open.
    pub async fn on_request_update(
        &self,
        record_id: &RecordId,
        values: Payload,
    ) -> CoreResult<MutationOutcome> {
        let payload = {
            let lookups = self.lookups();
            let engine = FormEngine::new(&self.schema, &lookups);
            let fields = match self.open_form_fields(record_id) {
                Some(fields) => fields,
                None => {
                    let record = self
                        .coordinator
                        .read(|store| {
                            store.detail(record_id).or_else(|| store.get(record_id)).cloned()
                        })
                        .ok_or_else(|| CoreError::RecordNotFound(record_id.clone()))?;
                    engine.build_fields(Some(&record))
                }
            };

            if let Err(errors) = FormEngine::validate(&values, &fields) {
                log::debug!("Update for record {record_id} failed validation: {errors}");
                self.set_form_errors(record_id, errors.clone());
                return Err(CoreError::Validation(errors));
            }
            self.set_form_errors(record_id, ValidationErrors::new());

            engine.normalize_submission(&values, &fields)?
        };
        let outcome = self.coordinator.request_update(record_id, payload).await?;

        let mut form = self.form_slot();
        if form.as_ref().is_some_and(|f| &f.record_id == record_id) {
            *form = None;
        }
        Ok(outcome)
    }

    pub async fn on_request_delete(&self, record_id: &RecordId) -> CoreResult<MutationOutcome> {
        self.coordinator.request_delete(record_id).await
    }

    pub async fn on_request_delete_batch(&self, record_ids: &[RecordId]) -> BatchMutationResult {
        self.coordinator.request_delete_batch(record_ids).await
    }

    /// Go to `page`, clamped to the available pages.
    pub fn on_page_change(&self, page: usize) -> PaginationState {
        let total = self.coordinator.read(RecordStore::len);
        let mut pagination = self.pagination();
        pagination.set_page(page, total);
        pagination.state()
    }

    pub fn on_page_size_change(&self, page_size: usize) -> PaginationState {
        let total = self.coordinator.read(RecordStore::len);
        self.pagination().set_page_size(page_size, total)
    }

    /// Pending notifications, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.snapshot()
    }

    pub fn drain_notifications(&self) -> Vec<Notification> {
        self.notifications.drain()
    }

    fn render_cells(&self, fields: &[&FieldDefinition], record: &Record) -> Vec<String> {
        let lookups = self.lookups();
        fields
            .iter()
            .map(|field| lookups.display_value(field, record.value(&field.key).as_ref()))
            .collect()
    }

    fn open_form_fields(&self, record_id: &RecordId) -> Option<Vec<FormField>> {
        self.form_slot()
            .as_ref()
            .filter(|form| &form.record_id == record_id)
            .map(|form| form.fields.clone())
    }

    fn set_form_errors(&self, record_id: &RecordId, errors: ValidationErrors) {
        if let Some(form) = self
            .form_slot()
            .as_mut()
            .filter(|form| &form.record_id == record_id)
        {
            form.errors = errors;
        }
    }

    fn lookups(&self) -> RwLockReadGuard<'_, LookupResolver> {
        self.lookups.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn pagination(&self) -> MutexGuard<'_, PaginationEngine> {
        self.pagination
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn form_slot(&self) -> MutexGuard<'_, Option<FormView>> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builder for constructing `ListingApp` from seed data and a backend.
///
/// # Required
/// - `schema` (or `seed`)
///
/// # Optional
/// - `backend`: defaults to a `SimulatedBackend` that refuses every mutation
/// - `page_size` / `max_page_size`: default 25 / 100
pub struct ListingAppBuilder {
    schema: Option<Schema>,
    records: Vec<Record>,
    details: Vec<Record>,
    lookups: LookupResolver,
    backend: Option<Arc<dyn MutationBackend>>,
    page_size: usize,
    max_page_size: usize,
}

impl ListingAppBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: None,
            records: Vec::new(),
            details: Vec::new(),
            lookups: LookupResolver::new(),
            backend: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// Take schema, records, details and lookups from loaded seed data.
    #[must_use]
    pub fn seed(mut self, seed: SeedData) -> Self {
        self.schema = Some(seed.schema);
        self.records = seed.records;
        self.details = seed.details;
        self.lookups = seed.lookups;
        self
    }

    #[must_use]
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    #[must_use]
    pub fn records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    #[must_use]
    pub fn details(mut self, details: Vec<Record>) -> Self {
        self.details = details;
        self
    }

    #[must_use]
    pub fn lookups(mut self, lookups: LookupResolver) -> Self {
        self.lookups = lookups;
        self
    }

    #[must_use]
    pub fn backend(mut self, backend: Arc<dyn MutationBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Build the `ListingApp`.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidSchema` if no schema was given and
    /// `CoreError::DuplicateRecord` if a record id repeats.
    pub fn build(self) -> CoreResult<ListingApp> {
        let schema = self
            .schema
            .ok_or_else(|| CoreError::InvalidSchema("schema is required".to_string()))?;
        let backend = self.backend.unwrap_or_else(|| {
            log::warn!("No mutation backend configured, every mutation will be refused");
            Arc::new(SimulatedBackend::new())
        });

        let store = RecordStore::new(self.records, self.details)?;
        let notifications = Arc::new(NotificationCenter::new());
        let coordinator =
            MutationCoordinator::new(store, backend).with_listener(notifications.clone());

        Ok(ListingApp {
            schema,
            lookups: RwLock::new(self.lookups),
            coordinator,
            pagination: Mutex::new(PaginationEngine::new(self.page_size, self.max_page_size)),
            form: Mutex::new(None),
            notifications,
        })
    }
}

impl Default for ListingAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
