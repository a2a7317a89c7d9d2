//! Load-more trigger driven by scroll position.

use crate::engine::DisplayState;
use crate::model::QueryState;

/// Rows left below the viewport at which the next page is requested.
pub const DEFAULT_LOAD_MORE_THRESHOLD: usize = 3;

/// Decides when the next page should be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPaginator {
    threshold: usize,
}

impl ScrollPaginator {
    /// Paginator loading when at most `threshold` rows remain below the viewport.
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Rows below the viewport at which the next page loads.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Continuation query for the next page, if one should be requested now.
    ///
    /// `proximity_to_end` is the number of rows between the bottom of the
    /// viewport and the end of the rendered list. Nothing is returned while a
    /// fetch is in flight or once the last page has been loaded.
    pub fn maybe_load_more<T>(
        &self,
        proximity_to_end: usize,
        display: &DisplayState<T>,
    ) -> Option<QueryState> {
        if display.is_loading
            || display.current_page >= display.total_pages
            || proximity_to_end > self.threshold
        {
            return None;
        }
        Some(display.query.at_page(display.current_page + 1))
    }
}

impl Default for ScrollPaginator {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_MORE_THRESHOLD)
    }
}
