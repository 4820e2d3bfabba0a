//! Business services
//!
//! Pure resolvers plus the mutation coordinator, the only component that
//! writes to the [`RecordStore`](crate::store::RecordStore).

mod form_engine;
mod lookup_resolver;
mod mutation_coordinator;
mod pagination_engine;
mod schema_resolver;

pub use form_engine::FormEngine;
pub use lookup_resolver::LookupResolver;
pub use mutation_coordinator::MutationCoordinator;
pub use pagination_engine::{compute_window, PaginationEngine, DEFAULT_MAX_PAGE_SIZE};
pub use schema_resolver::resolve_columns;
