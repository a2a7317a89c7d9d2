//! Merging result pages into the displayed list.
//!
//! Page 1 replaces the list; later pages append, skipping identities already
//! shown. After any successful apply the list holds no duplicate keys and
//! keeps first-seen order.

use crate::engine::RequestTicket;
use crate::model::{CatalogItem, FetchFailure, Product, QueryState, ResultPage};
use std::collections::HashSet;

// ===== DisplayState =====

/// What the rendering layer shows. Read-only outside the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState<T = Product> {
    /// Base query the list belongs to (always page 1).
    pub query: QueryState,
    /// Loaded items, identity-unique, first-seen order.
    pub items: Vec<T>,
    /// Highest page applied so far.
    pub current_page: u32,
    /// Pages the server reported.
    pub total_pages: u32,
    /// Matching items the server reported.
    pub total_count: u64,
    /// A fetch is in flight.
    pub is_loading: bool,
    /// A user-forced page-1 reload is in flight.
    pub is_refreshing: bool,
}

impl<T> DisplayState<T> {
    /// Empty list for `query`, page 1 of 0.
    pub fn empty(query: QueryState) -> Self {
        Self {
            query: query.first_page(),
            items: Vec::new(),
            current_page: 1,
            total_pages: 0,
            total_count: 0,
            is_loading: false,
            is_refreshing: false,
        }
    }

    /// True when every page of the current lineage has been loaded.
    pub fn is_exhausted(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

// ===== ResultAccumulator =====

/// Outcome of [`ResultAccumulator::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The list was updated; `added` new items became visible.
    Applied {
        /// Items that were not already in the list.
        added: usize,
    },
    /// The fetch failed; the list is unchanged.
    Failed(FetchFailure),
}

/// Merges result pages into a [`DisplayState`].
pub struct ResultAccumulator<T: CatalogItem = Product> {
    display: DisplayState<T>,
    seen: HashSet<T::Key>,
}

impl<T: CatalogItem> ResultAccumulator<T> {
    /// Empty accumulator for `query`.
    pub fn new(query: QueryState) -> Self {
        Self {
            display: DisplayState::empty(query),
            seen: HashSet::new(),
        }
    }

    /// Current list.
    pub fn display(&self) -> &DisplayState<T> {
        &self.display
    }

    /// Empty the list for a new base query.
    pub fn reset(&mut self, query: QueryState) {
        self.display = DisplayState::empty(query);
        self.seen.clear();
    }

    /// Flag a fetch as in flight. `refreshing` marks a user-forced reload.
    pub fn mark_loading(&mut self, refreshing: bool) {
        self.display.is_loading = true;
        self.display.is_refreshing |= refreshing;
    }

    /// Clear loading flags without touching the list.
    pub fn mark_idle(&mut self) {
        self.display.is_loading = false;
        self.display.is_refreshing = false;
    }

    /// Merge an accepted fetch outcome.
    pub fn apply(
        &mut self,
        ticket: &RequestTicket,
        outcome: Result<ResultPage<T>, FetchFailure>,
    ) -> ApplyOutcome {
        self.mark_idle();

        let page = match outcome {
            Ok(page) => page,
            Err(failure) => return ApplyOutcome::Failed(failure),
        };

        if ticket.query.is_first_page() {
            self.display.query = ticket.query.first_page();
            self.display.items.clear();
            self.seen.clear();
            self.display.current_page = 1;
        } else {
            self.display.current_page = page.current_page.max(ticket.query.page());
        }
        self.display.total_pages = page.total_pages;
        self.display.total_count = page.total_count;

        let added = self.append_unique(page.items);
        ApplyOutcome::Applied { added }
    }

    fn append_unique(&mut self, items: Vec<T>) -> usize {
        let before = self.display.items.len();
        for item in items {
            if self.seen.insert(item.key().clone()) {
                self.display.items.push(item);
            }
        }
        self.display.items.len() - before
    }
}
