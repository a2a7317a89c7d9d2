//! Search orchestration state machine.
//!
//! `SearchEngine` owns the debouncer, coordinator, accumulator and paginator
//! and exposes the operations the rendering layer may call. It runs on one
//! thread: fetch results come back as [`Completion`]s that the event loop
//! hands to [`SearchEngine::resolve`].
//!
//! ```text
//! Idle ──edit──▶ Debouncing ──quiet period──▶ Fetching ──▶ Idle | Failed
//!   └──scroll near end──▶ LoadingMore ──▶ Idle | Failed
//! ```

use crate::engine::{
    ApplyOutcome, Completion, Debouncer, DisplayState, FetchCoordinator, FetchExecutor,
    Resolution, ResultAccumulator, ScrollPaginator, DEFAULT_LOAD_MORE_THRESHOLD,
    DEFAULT_QUIET_PERIOD,
};
use crate::model::{FailureKind, FetchFailure, FilterPatch, QueryState, SortKey};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Observable engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing pending or in flight.
    Idle,
    /// A base-query edit is waiting out the quiet period.
    Debouncing,
    /// A page-1 fetch is in flight.
    Fetching,
    /// A continuation fetch is in flight.
    LoadingMore,
    /// The last accepted fetch failed. Held until an edit, a refresh or the
    /// debouncer dispatches a new fetch; scrolling does not leave it.
    Failed(FailureKind),
}

/// Tunables for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Debounce quiet period.
    pub quiet_period: Duration,
    /// Rows from the end at which the next page loads.
    pub load_more_threshold: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
            load_more_threshold: DEFAULT_LOAD_MORE_THRESHOLD,
        }
    }
}

/// Debounced, paginated catalog search for one screen.
pub struct SearchEngine {
    /// Latest base query the user asked for (page 1).
    query: QueryState,
    debouncer: Debouncer,
    coordinator: FetchCoordinator,
    accumulator: ResultAccumulator,
    paginator: ScrollPaginator,
    phase: Phase,
    last_failure: Option<FetchFailure>,
    revision: u64,
}

impl SearchEngine {
    /// Engine for `initial`, idle until [`SearchEngine::start`].
    pub fn new(
        initial: QueryState,
        settings: EngineSettings,
        executor: Box<dyn FetchExecutor>,
    ) -> Self {
        let initial = initial.first_page();
        Self {
            accumulator: ResultAccumulator::new(initial.clone()),
            query: initial,
            debouncer: Debouncer::new(settings.quiet_period),
            coordinator: FetchCoordinator::new(executor),
            paginator: ScrollPaginator::new(settings.load_more_threshold),
            phase: Phase::Idle,
            last_failure: None,
            revision: 0,
        }
    }

    // ===== Read-only view =====

    /// The list to render.
    pub fn display(&self) -> &DisplayState {
        self.accumulator.display()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The base query currently in effect (or pending).
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Failure of the last accepted fetch, until the next operation.
    pub fn last_failure(&self) -> Option<&FetchFailure> {
        self.last_failure.as_ref()
    }

    /// Increments on every change to the display state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// When the pending debounced query will fire, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    // ===== Operations =====

    /// Fetch page 1 of the initial query immediately.
    pub fn start(&mut self) {
        info!(term = self.query.term(), "Starting catalog search");
        self.dispatch(self.query.clone(), false);
    }

    /// The search text changed. Returns true if a new search was scheduled.
    pub fn on_term_changed(&mut self, text: &str, now: Instant) -> bool {
        let next = self.query.with_term(text);
        self.begin_lineage(next, now)
    }

    /// Apply a filter patch. Returns true if a new search was scheduled.
    pub fn on_filter_changed(&mut self, patch: &FilterPatch, now: Instant) -> bool {
        let filters = self.query.filters().merged(patch);
        let next = self.query.with_filters(filters);
        self.begin_lineage(next, now)
    }

    /// Change the sort. Returns true if a new search was scheduled.
    pub fn on_sort_changed(&mut self, sort: SortKey, now: Instant) -> bool {
        let next = self.query.with_sort(sort);
        self.begin_lineage(next, now)
    }

    /// Request the next page if the viewport is close enough to the end.
    ///
    /// Only acts when idle. After a failure the continuation is not retried
    /// here; `on_refresh` or an edit starts over.
    ///
    /// Returns true if a continuation fetch was dispatched.
    pub fn on_scroll(&mut self, proximity_to_end: usize) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        match self
            .paginator
            .maybe_load_more(proximity_to_end, self.accumulator.display())
        {
            Some(next) => {
                self.dispatch(next, false);
                true
            }
            None => false,
        }
    }

    /// Fetch page 1 of the current base query now, skipping the quiet period.
    pub fn on_refresh(&mut self) {
        let query = self
            .debouncer
            .flush()
            .unwrap_or_else(|| self.query.first_page());
        debug!(term = query.term(), "Refresh requested");
        self.dispatch(query, true);
    }

    /// Fire the debouncer if its quiet period has elapsed.
    ///
    /// Returns true if a fetch was dispatched.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(query) => {
                self.dispatch(query, false);
                true
            }
            None => false,
        }
    }

    /// Feed a finished fetch back into the engine.
    ///
    /// Returns `None` when the result was superseded and dropped.
    pub fn resolve(&mut self, completion: Completion) -> Option<ApplyOutcome> {
        let Completion { ticket, outcome } = completion;
        let (ticket, outcome) = match self.coordinator.resolve(ticket, outcome) {
            Resolution::Accepted(ticket, outcome) => (ticket, outcome),
            Resolution::Superseded(_) => return None,
        };

        let applied = self.accumulator.apply(&ticket, outcome);
        self.revision += 1;

        match &applied {
            ApplyOutcome::Applied { added } => {
                debug!(
                    sequence = ticket.sequence,
                    page = ticket.query.page(),
                    added,
                    total = self.display().items.len(),
                    "Applied result page"
                );
                self.phase = Phase::Idle;
            }
            ApplyOutcome::Failed(failure) => {
                warn!(
                    sequence = ticket.sequence,
                    kind = ?failure.kind,
                    reason = %failure.reason,
                    "Catalog fetch failed"
                );
                self.phase = Phase::Failed(failure.kind);
                self.last_failure = Some(failure.clone());
            }
        }
        Some(applied)
    }

    // ===== Internals =====

    /// Switch to a new base query: retire the old lineage, clear the list and
    /// start the quiet period.
    fn begin_lineage(&mut self, next: QueryState, now: Instant) -> bool {
        if next.same_lineage(&self.query) {
            return false;
        }
        debug!(term = next.term(), sort = next.sort().wire_value(), "Base query changed");
        self.coordinator.retire_lineage();
        self.accumulator.reset(next.clone());
        self.debouncer.schedule(next.clone(), now);
        self.query = next;
        self.phase = Phase::Debouncing;
        self.last_failure = None;
        self.revision += 1;
        true
    }

    fn dispatch(&mut self, query: QueryState, refreshing: bool) {
        self.phase = if query.is_first_page() {
            Phase::Fetching
        } else {
            Phase::LoadingMore
        };
        self.last_failure = None;
        self.accumulator.mark_loading(refreshing);
        self.coordinator.dispatch(query);
        self.revision += 1;
    }
}

#[cfg(test)]
#[path = "machine_tests.rs"]
mod tests;
