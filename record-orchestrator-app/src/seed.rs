//! JSON seed loading
//!
//! Formats:
//! - schema: `{ "fields": [ { "key", "label", "seq", "show_in_listing", "required" } ] }`
//! - records and details: arrays of objects with an `id`
//! - lookup tables: `{ "data": { "<id>": "<label>" } }` or a bare object

use std::path::Path;

use record_orchestrator_core::error::{CoreError, CoreResult};
use record_orchestrator_core::services::LookupResolver;
use record_orchestrator_core::types::{LookupTable, OptionsSource, Record, Schema};
use serde::de::DeserializeOwned;

use crate::config::AppConfig;

/// Seed files larger than this are refused.
pub const MAX_SEED_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Read and parse a JSON file, refusing oversized files.
pub async fn read_json_file<T: DeserializeOwned>(path: &Path) -> CoreResult<T> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        CoreError::StorageError(format!("Failed to read {} metadata: {e}", path.display()))
    })?;

    if metadata.len() > MAX_SEED_FILE_SIZE {
        return Err(CoreError::StorageError(format!(
            "{} too large: {} bytes (max: {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SEED_FILE_SIZE
        )));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CoreError::StorageError(format!("Failed to read {}: {e}", path.display())))?;

    serde_json::from_str(&content).map_err(|e| {
        CoreError::SerializationError(format!("Invalid format in {}: {e}", path.display()))
    })
}

/// Whether `path` exists, without blocking the runtime.
pub async fn path_exists(path: &Path) -> CoreResult<bool> {
    tokio::fs::try_exists(path).await.map_err(|e| {
        CoreError::StorageError(format!("Failed to check {}: {e}", path.display()))
    })
}

/// Everything a listing is built from.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub schema: Schema,
    pub records: Vec<Record>,
    pub details: Vec<Record>,
    pub lookups: LookupResolver,
}

impl SeedData {
    /// Load every seed file named by `config`.
    ///
    /// A missing details file means no detail records. Each configured
    /// lookup is bound to its schema field unless the field already declares
    /// an options source.
    pub async fn load(config: &AppConfig) -> CoreResult<Self> {
        let mut schema: Schema = read_json_file(&config.schema_path).await?;
        let records: Vec<Record> = read_json_file(&config.records_path).await?;

        let details: Vec<Record> = if path_exists(&config.details_path).await? {
            read_json_file(&config.details_path).await?
        } else {
            log::debug!(
                "No details file at {}, using summary records",
                config.details_path.display()
            );
            Vec::new()
        };

        let mut lookups = LookupResolver::new();
        for source in &config.lookups {
            let table: LookupTable = read_json_file(&source.path).await?;
            lookups.load_table(source.field.clone(), table);

            let unbound = schema
                .field(&source.field)
                .map(|field| field.options_provider.is_none());
            match unbound {
                Some(true) => schema.bind_options(&source.field, OptionsSource::Lookup)?,
                Some(false) => {}
                None => log::warn!(
                    "Lookup table for '{}' has no matching schema field",
                    source.field
                ),
            }
        }

        log::info!(
            "Loaded seed data: {} fields, {} records, {} details",
            schema.fields().len(),
            records.len(),
            details.len()
        );

        Ok(Self {
            schema,
            records,
            details,
            lookups,
        })
    }
}
