//! Type definition module

mod field;
mod form;
mod lookup;
mod mutation;
mod pagination;
mod record;

pub use field::{ColumnDescriptor, FieldDefinition, FieldOption, OptionsSource, Schema};
pub use form::{FieldError, FieldErrorKind, FormField, ValidationErrors};
pub use lookup::{Label, LookupTable, UNKNOWN_LABEL};
pub use mutation::{
    BatchMutationFailure, BatchMutationResult, MutationOutcome, MutationPhase, MutationState,
    MutationTicket,
};
pub use pagination::{PageWindow, PaginationState, DEFAULT_PAGE_SIZE};
pub use record::{identifier_of, is_empty_value, Record, ID_KEY};

// Re-export public types of the backend library
pub use record_orchestrator_backend::{MutationOperation, Payload, RecordId};
