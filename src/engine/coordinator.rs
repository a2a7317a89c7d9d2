//! Sequenced fetch dispatch and stale-response rejection.
//!
//! Every dispatch gets a sequence number from a process-local counter. When a
//! fetch completes, [`FetchCoordinator::resolve`] decides whether its result
//! may still touch the display:
//!
//! - a page-1 dispatch, or a dispatch for a different lineage, raises a
//!   barrier: everything dispatched before it is stale;
//! - among continuations of the current lineage, only the newest ticket for
//!   each page is live;
//! - [`FetchCoordinator::retire_lineage`] makes everything outstanding stale
//!   until the next dispatch.
//!
//! Stale results are allowed to finish on the wire but are dropped here.

use crate::model::{FetchFailure, Lineage, QueryState, ResultPage};
use std::collections::BTreeMap;
use tracing::debug;

// ===== Tickets and completions =====

/// Handle correlating a dispatched fetch with its query and ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTicket {
    /// Dispatch order; higher is newer.
    pub sequence: u64,
    /// Query the fetch was made for.
    pub query: QueryState,
}

/// Result of a remote search.
pub type FetchOutcome = Result<ResultPage, FetchFailure>;

/// A finished fetch, as reported by an executor.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Ticket the fetch was dispatched with.
    pub ticket: RequestTicket,
    /// Page or failure.
    pub outcome: FetchOutcome,
}

/// Runs fetches somewhere other than the caller's thread.
///
/// `submit` must return without waiting for the fetch. The executor reports
/// the result later as a [`Completion`] through whatever channel the caller
/// set up.
pub trait FetchExecutor {
    /// Start fetching `ticket.query`.
    fn submit(&mut self, ticket: RequestTicket);
}

/// Verdict on a completed fetch.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Still relevant; forward to the accumulator.
    Accepted(RequestTicket, FetchOutcome),
    /// A newer conflicting request was issued; drop it.
    Superseded(RequestTicket),
}

// ===== FetchCoordinator =====

/// Allocates sequences and decides which completions are still live.
pub struct FetchCoordinator {
    executor: Box<dyn FetchExecutor>,
    last_sequence: u64,
    /// Lineage of the newest dispatch; `None` once retired.
    lineage: Option<Lineage>,
    /// Tickets below this sequence are stale.
    barrier: u64,
    /// Newest live sequence per page for the current lineage.
    latest_by_page: BTreeMap<u32, u64>,
}

impl std::fmt::Debug for FetchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCoordinator")
            .field("last_sequence", &self.last_sequence)
            .field("lineage", &self.lineage)
            .field("barrier", &self.barrier)
            .field("latest_by_page", &self.latest_by_page)
            .finish_non_exhaustive()
    }
}

impl FetchCoordinator {
    /// Coordinator submitting through `executor`.
    pub fn new(executor: Box<dyn FetchExecutor>) -> Self {
        Self {
            executor,
            last_sequence: 0,
            lineage: None,
            barrier: 0,
            latest_by_page: BTreeMap::new(),
        }
    }

    /// Sequence of the most recent dispatch (0 before the first).
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    /// Number of dispatched tickets that could still be accepted.
    pub fn live_count(&self) -> usize {
        self.latest_by_page.len()
    }

    /// Issue a fetch for `query` and return its ticket immediately.
    pub fn dispatch(&mut self, query: QueryState) -> RequestTicket {
        self.last_sequence += 1;
        let sequence = self.last_sequence;
        let lineage = query.lineage();

        let new_lineage = self.lineage.as_ref() != Some(&lineage);
        if query.is_first_page() || new_lineage {
            self.barrier = sequence;
            self.latest_by_page.clear();
            self.lineage = Some(lineage);
        }
        self.latest_by_page.insert(query.page(), sequence);

        let ticket = RequestTicket { sequence, query };
        debug!(
            sequence,
            page = ticket.query.page(),
            term = ticket.query.term(),
            "Dispatching catalog fetch"
        );
        self.executor.submit(ticket.clone());
        ticket
    }

    /// Forget the current lineage: every outstanding ticket becomes stale.
    ///
    /// Called as soon as the user edits the base query, before the debounced
    /// dispatch for the new query exists.
    pub fn retire_lineage(&mut self) {
        self.lineage = None;
        self.barrier = self.last_sequence + 1;
        self.latest_by_page.clear();
    }

    /// Decide whether a completed fetch may take effect.
    pub fn resolve(&mut self, ticket: RequestTicket, outcome: FetchOutcome) -> Resolution {
        if !self.is_live(&ticket) {
            debug!(
                sequence = ticket.sequence,
                barrier = self.barrier,
                "Dropping superseded fetch result"
            );
            return Resolution::Superseded(ticket);
        }

        self.latest_by_page.remove(&ticket.query.page());
        Resolution::Accepted(ticket, outcome)
    }

    fn is_live(&self, ticket: &RequestTicket) -> bool {
        if ticket.sequence < self.barrier {
            return false;
        }
        let same_lineage = self
            .lineage
            .as_ref()
            .is_some_and(|l| *l == ticket.query.lineage());
        same_lineage && self.latest_by_page.get(&ticket.query.page()) == Some(&ticket.sequence)
    }
}
