//! Render-ready view models handed to the host

use record_orchestrator_core::types::{
    ColumnDescriptor, FormField, MutationState, PageWindow, RecordId, ValidationErrors,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub has_more: bool,
}

impl<T> From<&PageWindow<'_, T>> for PageInfo {
    fn from(window: &PageWindow<'_, T>) -> Self {
        Self {
            current_page: window.page,
            page_size: window.page_size,
            total_count: window.total_count,
            total_pages: window.total_pages,
            has_more: window.has_more,
        }
    }
}

/// One listing row; `cells` line up with the listing columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub record_id: RecordId,
    pub cells: Vec<String>,
    pub state: MutationState,
    /// Render greyed out
    pub deleted: bool,
    /// Offer update and remove actions
    pub can_mutate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<RowView>,
    pub page: PageInfo,
}

/// A single record rendered with the listing columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub record_id: RecordId,
    pub columns: Vec<ColumnDescriptor>,
    pub cells: Vec<String>,
    pub deleted: bool,
}

/// Open edit form and the errors of its last submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub record_id: RecordId,
    pub fields: Vec<FormField>,
    pub errors: ValidationErrors,
}
