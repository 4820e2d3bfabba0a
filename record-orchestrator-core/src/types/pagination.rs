//! Pagination types

use serde::{Deserialize, Serialize};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Pagination state. Pages are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub current_page: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationState {
    #[must_use]
    pub fn new(current_page: usize, page_size: usize) -> Self {
        Self {
            current_page,
            page_size,
        }
    }

    /// `ceil(total / page_size)`; a zero page size counts as one.
    #[must_use]
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1))
    }

    /// Largest page that may be shown for `total` records.
    #[must_use]
    pub fn last_page(&self, total: usize) -> usize {
        self.total_pages(total).max(1)
    }

    /// Index of the first record on the current page.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.current_page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }

    /// Clamp values into the valid range for `total` records.
    ///
    /// - `page_size` is clamped to `1..=max_page_size`
    /// - `current_page` is clamped to `1..=max(1, total_pages)`
    #[must_use]
    pub fn validated(&self, total: usize, max_page_size: usize) -> Self {
        let page_size = self.page_size.clamp(1, max_page_size.max(1));
        let clamped = Self {
            current_page: self.current_page,
            page_size,
        };
        Self {
            current_page: self.current_page.clamp(1, clamped.last_page(total)),
            page_size,
        }
    }
}

/// The visible window of a record list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow<'a, T> {
    /// Records on the current page
    pub items: &'a [T],
    /// Current page number
    pub page: usize,
    /// Page size used for this window
    pub page_size: usize,
    /// Total number of records across all pages
    pub total_count: usize,
    /// `ceil(total_count / page_size)`
    pub total_pages: usize,
    /// Whether there are more pages after this one
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let state = PaginationState::new(1, 25);
        assert_eq!(state.total_pages(0), 0);
        assert_eq!(state.total_pages(25), 1);
        assert_eq!(state.total_pages(26), 2);
        assert_eq!(state.total_pages(60), 3);
        assert_eq!(state.last_page(0), 1);
    }

    #[test]
    fn validated_clamps_page_and_size() {
        let state = PaginationState::new(9, 0).validated(10, 100);
        assert_eq!(state, PaginationState::new(9, 1));

        let state = PaginationState::new(12, 0).validated(10, 100);
        assert_eq!(state, PaginationState::new(10, 1));

        let state = PaginationState::new(0, 500).validated(1000, 100);
        assert_eq!(state, PaginationState::new(1, 100));

        let state = PaginationState::new(5, 25).validated(0, 100);
        assert_eq!(state.current_page, 1);
    }
}
