//! Application configuration
//!
//! Loaded from a camelCase JSON file; every key is optional.
//!
//! ```json
//! {
//!   "pageSize": 25,
//!   "schemaPath": "schema.json",
//!   "lookups": [{ "field": "company", "path": "companies.json" }],
//!   "backend": { "latencyMs": 1000, "acceptIds": [1], "timeoutMs": 5000 }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use record_orchestrator_backend::{MutationBackend, RecordId, SimulatedBackend, TimeoutBackend};
use record_orchestrator_core::error::CoreResult;
use record_orchestrator_core::services::DEFAULT_MAX_PAGE_SIZE;
use record_orchestrator_core::types::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

use crate::seed::{path_exists, read_json_file};

/// Directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "record-orchestrator";
/// Config file name inside [`APP_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Lookup table seed for one foreign-key field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupSource {
    /// Field key the table resolves
    pub field: String,
    pub path: PathBuf,
}

/// Simulated backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendConfig {
    pub latency_ms: u64,
    /// Ids the backend acknowledges
    pub accept_ids: Vec<RecordId>,
    /// Also acknowledge the first detail record
    pub accept_first_detail: bool,
    /// Host-imposed limit per submission; `None` waits indefinitely
    pub timeout_ms: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            latency_ms: 1000,
            accept_ids: Vec::new(),
            accept_first_detail: true,
            timeout_ms: None,
        }
    }
}

impl BackendConfig {
    /// Build the configured backend.
    ///
    /// `first_detail` is the id of the first seeded detail record, if any.
    #[must_use]
    pub fn build(&self, first_detail: Option<&RecordId>) -> Arc<dyn MutationBackend> {
        let mut simulated = SimulatedBackend::new()
            .with_latency(Duration::from_millis(self.latency_ms))
            .accept_all(self.accept_ids.iter().cloned());
        if self.accept_first_detail {
            if let Some(id) = first_detail {
                simulated = simulated.accept(id.clone());
            }
        }

        let backend: Arc<dyn MutationBackend> = Arc::new(simulated);
        match self.timeout_ms {
            Some(ms) => Arc::new(TimeoutBackend::new(backend, Duration::from_millis(ms))),
            None => backend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub page_size: usize,
    pub max_page_size: usize,
    pub schema_path: PathBuf,
    /// Summary records shown in the listing
    pub records_path: PathBuf,
    /// Detail records shown by view and edit
    pub details_path: PathBuf,
    pub lookups: Vec<LookupSource>,
    pub backend: BackendConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            schema_path: PathBuf::from("schema.json"),
            records_path: PathBuf::from("data.json"),
            details_path: PathBuf::from("record.json"),
            lookups: vec![LookupSource {
                field: "company".to_string(),
                path: PathBuf::from("companies.json"),
            }],
            backend: BackendConfig::default(),
        }
    }
}

impl AppConfig {
    /// `<data-local-dir>/record-orchestrator/config.json`, if the platform has one.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load a config file. Relative seed paths resolve against its directory.
    pub async fn load(path: &Path) -> CoreResult<Self> {
        let config: Self = read_json_file(path).await?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        log::debug!("Loaded config from {}", path.display());
        Ok(config.resolve_paths(base))
    }

    /// Find the config to use.
    ///
    /// An explicit path must exist. Otherwise the default location is tried,
    /// and built-in defaults (paths relative to the working directory) are
    /// used when it is absent.
    pub async fn discover(explicit: Option<&Path>) -> CoreResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path).await;
        }

        if let Some(path) = Self::default_path() {
            if path_exists(&path).await? {
                return Self::load(&path).await;
            }
        }
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Join every relative seed path onto `base`.
    #[must_use]
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        resolve(&mut self.schema_path);
        resolve(&mut self.records_path);
        resolve(&mut self.details_path);
        for lookup in &mut self.lookups {
            resolve(&mut lookup.path);
        }
        self
    }
}
