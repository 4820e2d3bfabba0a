//! Record Orchestrator Core Library
//!
//! Schema-driven record management, including:
//! - Column resolution from a field schema
//! - Foreign-key lookup resolution
//! - Pagination of the record listing
//! - Dynamic edit forms with validation
//! - Optimistic update and soft delete with rollback
//!
//! The remote side is abstracted behind [`MutationBackend`], so hosts can
//! plug in the simulated backend or a real one.

pub mod error;
pub mod services;
pub mod store;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{FormEngine, LookupResolver, MutationCoordinator, PaginationEngine};
pub use store::RecordStore;
pub use traits::{MutationBackend, MutationListener};
