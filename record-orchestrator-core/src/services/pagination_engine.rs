//! Visible window computation

use crate::types::{PageWindow, PaginationState, DEFAULT_PAGE_SIZE};

/// Upper bound applied to page sizes unless configured otherwise.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// `records[(page-1)*size .. (page-1)*size + size]`, clipped to the slice.
///
/// Pure; an out-of-range page yields an empty window rather than an error.
#[must_use]
pub fn compute_window<'a, T>(records: &'a [T], state: &PaginationState) -> PageWindow<'a, T> {
    let total_count = records.len();
    let start = state.offset().min(total_count);
    let end = start.saturating_add(state.page_size).min(total_count);
    let total_pages = state.total_pages(total_count);

    PageWindow {
        items: &records[start..end],
        page: state.current_page,
        page_size: state.page_size,
        total_count,
        total_pages,
        has_more: state.current_page < total_pages,
    }
}

/// Pagination state owner.
///
/// Every mutator takes the current record count so the page stays within
/// `1..=max(1, total_pages)`.
#[derive(Debug, Clone)]
pub struct PaginationEngine {
    state: PaginationState,
    max_page_size: usize,
}

impl Default for PaginationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_MAX_PAGE_SIZE)
    }
}

impl PaginationEngine {
    #[must_use]
    pub fn new(page_size: usize, max_page_size: usize) -> Self {
        let max_page_size = max_page_size.max(1);
        Self {
            state: PaginationState::new(1, page_size.clamp(1, max_page_size)),
            max_page_size,
        }
    }

    #[must_use]
    pub fn state(&self) -> PaginationState {
        self.state
    }

    #[must_use]
    pub fn max_page_size(&self) -> usize {
        self.max_page_size
    }

    /// Go to `page`, clamped. Returns the page actually selected.
    pub fn set_page(&mut self, page: usize, total: usize) -> usize {
        self.state = PaginationState::new(page, self.state.page_size)
            .validated(total, self.max_page_size);
        self.state.current_page
    }

    /// Change the page size, keeping the first visible record on screen.
    pub fn set_page_size(&mut self, page_size: usize, total: usize) -> PaginationState {
        let first_visible = self.state.offset();
        let page_size = page_size.clamp(1, self.max_page_size);
        self.state =
            PaginationState::new(first_visible / page_size + 1, page_size)
                .validated(total, self.max_page_size);
        self.state
    }

    /// Re-clamp after the record count changed.
    pub fn sync_total(&mut self, total: usize) -> PaginationState {
        self.state = self.state.validated(total, self.max_page_size);
        self.state
    }

    /// Window over `records` for the current state.
    #[must_use]
    pub fn window<'a, T>(&self, records: &'a [T]) -> PageWindow<'a, T> {
        compute_window(records, &self.state)
    }
}
