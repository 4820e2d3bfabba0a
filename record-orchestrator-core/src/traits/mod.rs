//! Collaborator trait definitions

mod mutation_listener;

pub use mutation_listener::{MutationListener, NoopMutationListener};

// Re-export the backend contract
pub use record_orchestrator_backend::MutationBackend;
