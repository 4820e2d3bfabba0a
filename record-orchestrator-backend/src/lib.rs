//! # record-orchestrator-backend
//!
//! The mutation backend contract used by the record orchestrator: a single
//! asynchronous `submit(operation, record_id, payload)` call that resolves to
//! success or failure.
//!
//! ## Provided Backends
//!
//! | Backend | Purpose |
//! |---------|---------|
//! | [`SimulatedBackend`] | In-process stand-in; accepts a configured set of ids, refuses the rest with status 500 |
//! | [`TimeoutBackend`] | Wraps any backend and fails submissions that exceed a time limit |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use record_orchestrator_backend::{
//!     MutationBackend, MutationOperation, RecordId, SimulatedBackend,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = SimulatedBackend::new()
//!         .accept(1_u64)
//!         .with_latency(Duration::from_millis(250));
//!
//!     let ok = backend
//!         .submit_checked(MutationOperation::Delete, &RecordId::from(1_u64), None)
//!         .await;
//!     assert!(ok.is_ok());
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, BackendError>`](BackendError). A
//! [`SubmitStatus::Failure`] answer and an `Err` are both failures for the
//! caller; [`MutationBackend::submit_checked`] folds the former into
//! [`BackendError::Rejected`].

mod error;
mod simulated;
mod timeout;
mod traits;
mod types;

pub use error::{BackendError, Result};
pub use simulated::SimulatedBackend;
pub use timeout::TimeoutBackend;
pub use traits::MutationBackend;
pub use types::{MutationOperation, Payload, RecordId, SubmitStatus};
