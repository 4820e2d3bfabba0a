//! Column derivation from the schema

use crate::types::{ColumnDescriptor, Schema};

/// Ordered listing columns: visible fields, ascending by sequence, ties in
/// declaration order.
///
/// Pure and cheap; call it on every render instead of caching, so option
/// sets bound after load are always reflected.
#[must_use]
pub fn resolve_columns(schema: &Schema) -> Vec<ColumnDescriptor> {
    schema
        .listed_fields()
        .into_iter()
        .map(ColumnDescriptor::from)
        .collect()
}
