//! Command-line host for Record Orchestrator
//!
//! Loads the seed data named by the config, runs one command against an
//! in-memory listing and prints the result as JSON on stdout. Logs go to
//! stderr (`RUST_LOG` overrides the default `info` level).
//!
//! Mutations are not persisted between invocations.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use record_orchestrator_app::config::AppConfig;
use record_orchestrator_app::ListingApp;
use record_orchestrator_core::types::{Payload, RecordId};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "record-orchestrator")]
#[command(about = "Browse and edit schema-driven records", long_about = None)]
struct Args {
    /// Config file (defaults to the platform data directory, then built-in defaults).
    #[arg(long, short)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one page of the listing.
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Print the detail view of a record.
    View { id: String },
    /// Print the edit form of a record.
    Form { id: String },
    /// Update a record; unspecified fields keep their current values.
    Update {
        id: String,
        /// Field assignment `key=value`; JSON values are parsed, anything else is a string.
        #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
        assignments: Vec<String>,
    },
    /// Soft-delete one or more records.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = AppConfig::discover(args.config.as_deref())
        .await
        .context("Failed to load config")?;
    let app = ListingApp::load(&config)
        .await
        .context("Failed to load seed data")?;

    match args.command {
        Command::List { page, page_size } => {
            if let Some(size) = page_size {
                app.on_page_size_change(size);
            }
            app.on_page_change(page);
            print_json(&app.listing())?;
        }
        Command::View { id } => {
            let detail = app.on_view(&RecordId::new(id))?;
            print_json(&detail)?;
        }
        Command::Form { id } => {
            let form = app.open_update(&RecordId::new(id))?;
            print_json(&form)?;
        }
        Command::Update { id, assignments } => {
            let record_id = RecordId::new(id);
            let form = app.open_update(&record_id)?;

            let mut values: Payload = form
                .fields
                .into_iter()
                .filter_map(|field| field.value.map(|value| (field.key, value)))
                .collect();
            for assignment in &assignments {
                let (key, value) = parse_assignment(assignment)?;
                values.insert(key, value);
            }

            tracing::info!("Submitting update for record {record_id}");
            let result = app.on_request_update(&record_id, values).await;
            print_json(&app.drain_notifications())?;
            let outcome = result?;
            print_json(&outcome.record)?;
        }
        Command::Delete { ids } => {
            let ids: Vec<RecordId> = ids.into_iter().map(RecordId::new).collect();
            let result = app.on_request_delete_batch(&ids).await;
            print_json(&app.drain_notifications())?;
            print_json(&result)?;
            if result.failed_count > 0 {
                bail!("{} of {} deletions failed", result.failed_count, ids.len());
            }
        }
    }

    Ok(())
}

/// Directives from `RUST_LOG` when set and valid, `info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Split `key=value`, parsing the value as JSON when possible.
fn parse_assignment(raw: &str) -> anyhow::Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Invalid assignment '{raw}', expected KEY=VALUE");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Invalid assignment '{raw}', key is empty");
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assignments_parse_json_or_fall_back_to_text() {
        assert_eq!(parse_assignment("name=Jane").unwrap(), ("name".to_string(), json!("Jane")));
        assert_eq!(parse_assignment("company=2").unwrap(), ("company".to_string(), json!(2)));
        assert_eq!(parse_assignment("note=a=b").unwrap(), ("note".to_string(), json!("a=b")));
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn rust_log_replaces_default_level() {
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
        assert_eq!(
            log_filter(Some("record_orchestrator_core=trace")).to_string(),
            "record_orchestrator_core=trace"
        );
        assert_eq!(log_filter(None).to_string(), "info");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
