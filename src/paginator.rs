//! Deterministic pagination over the ranked result list.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Results shown per page.
pub const PAGE_SIZE: usize = 10;
/// Page buttons shown at once by a pagination control.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// Returns the 1-indexed page slice of `results`, clamped to the list
/// bounds. An out-of-range page yields an empty slice, never an error.
pub fn page<T>(results: &[T], page_number: usize, page_size: usize) -> &[T] {
    if page_number == 0 || page_size == 0 {
        return &[];
    }
    let start = (page_number - 1).saturating_mul(page_size).min(results.len());
    let end = page_number.saturating_mul(page_size).min(results.len());
    &results[start..end]
}

/// Number of pages needed to show `result_count` results.
pub fn total_pages(result_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    result_count.div_ceil(page_size)
}

/// Range of page numbers a pagination control should display.
///
/// The window is centered on the current page and clamped to
/// `[1, total]`; when the forward clamp shortens it, it widens backward
/// instead. Empty when there are no pages.
pub fn page_window(current: usize, total: usize, max_visible: usize) -> RangeInclusive<usize> {
    if total == 0 || max_visible == 0 {
        return 1..=0;
    }
    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = total.min(start + max_visible - 1);
    if end - start + 1 < max_visible {
        start = end.saturating_sub(max_visible - 1).max(1);
    }
    start..=end
}

/// Pagination state for a mounted results view.
///
/// Invariant: `1 <= current_page <= max(1, total_pages)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    current_page: usize,
    page_size: usize,
    total_pages: usize,
}

impl PaginationState {
    /// Creates state for `result_count` results, starting on page 1.
    pub fn new(result_count: usize, page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_pages: total_pages(result_count, page_size),
        }
    }

    /// Page currently shown, 1-indexed.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Results per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total number of pages.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Attempts to navigate to `requested`.
    ///
    /// Only `1 ..= max(1, total_pages)` is accepted; anything else leaves
    /// the current page unchanged and reports `false` without surfacing
    /// an error.
    pub fn change_page(&mut self, requested: usize) -> bool {
        if requested >= 1 && requested <= self.total_pages.max(1) {
            self.current_page = requested;
            true
        } else {
            false
        }
    }

    /// Slice of `results` for the current page.
    pub fn slice<'a, T>(&self, results: &'a [T]) -> &'a [T] {
        page(results, self.current_page, self.page_size)
    }

    /// Visible page-number window for a pagination control.
    pub fn window(&self) -> RangeInclusive<usize> {
        page_window(self.current_page, self.total_pages, MAX_VISIBLE_PAGES)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(0, PAGE_SIZE)
    }
}
