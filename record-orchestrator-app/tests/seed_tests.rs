#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for seed file loading and config discovery.

use std::path::{Path, PathBuf};

use record_orchestrator_app::config::{AppConfig, LookupSource};
use record_orchestrator_app::seed::{path_exists, read_json_file, SeedData, MAX_SEED_FILE_SIZE};
use record_orchestrator_core::error::CoreError;
use record_orchestrator_core::types::{Label, OptionsSource, RecordId};
use serde_json::json;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write seed file");
    path
}

fn minimal_seed(dir: &Path) {
    write(
        dir,
        "schema.json",
        r#"{ "fields": [
            { "key": "name", "label": "Name", "seq": 1, "show_in_listing": true },
            { "key": "company", "label": "Company", "seq": 2, "show_in_listing": true }
        ] }"#,
    );
    write(dir, "data.json", r#"[{ "id": 1, "name": "Jane", "company": "1" }]"#);
    write(dir, "companies.json", r#"{ "1": "Acme" }"#);
}

#[tokio::test]
async fn seed_binds_lookup_fields_and_tolerates_missing_details() {
    let tmp = tempfile::tempdir().unwrap();
    minimal_seed(tmp.path());

    let config = AppConfig::default().resolve_paths(tmp.path());
    let seed = SeedData::load(&config).await.unwrap();

    assert_eq!(seed.records.len(), 1);
    assert_eq!(seed.records[0].id, RecordId::from("1"));
    assert!(seed.details.is_empty());
    assert_eq!(
        seed.schema.field("company").unwrap().options_provider,
        Some(OptionsSource::Lookup)
    );
    // bare lookup objects are accepted
    assert_eq!(
        seed.lookups.resolve_label("company", &json!("1")),
        Label::Known("Acme".to_string())
    );
}

#[tokio::test]
async fn lookup_without_schema_field_is_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    minimal_seed(tmp.path());
    write(tmp.path(), "countries.json", r#"{ "data": { "de": "Germany" } }"#);

    let mut config = AppConfig::default().resolve_paths(tmp.path());
    config.lookups.push(LookupSource {
        field: "country".to_string(),
        path: tmp.path().join("countries.json"),
    });

    let seed = SeedData::load(&config).await.unwrap();
    assert!(seed.schema.field("country").is_none());
    assert_eq!(
        seed.lookups.resolve_label("country", &json!("de")),
        Label::Known("Germany".to_string())
    );
}

#[tokio::test]
async fn missing_schema_is_a_storage_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config = AppConfig::default().resolve_paths(tmp.path());
    assert!(matches!(
        SeedData::load(&config).await,
        Err(CoreError::StorageError(_))
    ));
}

#[tokio::test]
async fn malformed_and_duplicate_schemas_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let broken = write(tmp.path(), "broken.json", "{ not json");
    let result: Result<serde_json::Value, _> = read_json_file(&broken).await;
    assert!(matches!(result, Err(CoreError::SerializationError(_))));

    minimal_seed(tmp.path());
    write(
        tmp.path(),
        "schema.json",
        r#"{ "fields": [
            { "key": "name", "label": "Name", "seq": 1 },
            { "key": "name", "label": "Again", "seq": 2 }
        ] }"#,
    );
    let config = AppConfig::default().resolve_paths(tmp.path());
    let Err(CoreError::SerializationError(message)) = SeedData::load(&config).await else {
        panic!("duplicate keys should fail to load");
    };
    assert!(message.contains("duplicate field key"));
}

#[tokio::test]
async fn oversized_seed_file_is_refused() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("data.json");
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(MAX_SEED_FILE_SIZE + 1).unwrap();

    let result: Result<serde_json::Value, _> = read_json_file(&path).await;
    match result {
        Err(CoreError::StorageError(message)) => assert!(message.contains("too large")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn config_paths_resolve_against_config_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write(
        tmp.path(),
        "config.json",
        r#"{ "pageSize": 10, "recordsPath": "seed/data.json", "backend": { "timeoutMs": 500 } }"#,
    );

    let config = AppConfig::discover(Some(path.as_path())).await.unwrap();
    assert_eq!(config.page_size, 10);
    assert_eq!(config.records_path, tmp.path().join("seed/data.json"));
    assert_eq!(config.schema_path, tmp.path().join("schema.json"));
    assert_eq!(config.backend.timeout_ms, Some(500));
}

#[tokio::test]
async fn explicit_config_must_exist() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("nope.json");
    assert!(matches!(
        AppConfig::discover(Some(missing.as_path())).await,
        Err(CoreError::StorageError(_))
    ));
}

#[tokio::test]
async fn path_exists_checks_without_reading() {
    let tmp = tempfile::tempdir().unwrap();
    let schema = write(tmp.path(), "schema.json", "{}");
    assert!(path_exists(&schema).await.unwrap());
    assert!(!path_exists(&tmp.path().join("record.json")).await.unwrap());
}
