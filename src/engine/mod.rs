//! Incremental search engine (pure core).
//!
//! Turns query edits and scroll position into an ordered, de-duplicated
//! sequence of catalog fetches. Nothing in here does I/O: fetches go out
//! through a [`FetchExecutor`] and come back as [`Completion`]s, and time is
//! passed in by the caller.

pub mod accumulator;
pub mod coordinator;
pub mod debounce;
pub mod machine;
pub mod paginator;

pub use accumulator::{ApplyOutcome, DisplayState, ResultAccumulator};
pub use coordinator::{
    Completion, FetchCoordinator, FetchExecutor, FetchOutcome, RequestTicket, Resolution,
};
pub use debounce::{Debouncer, DEFAULT_QUIET_PERIOD};
pub use machine::{EngineSettings, Phase, SearchEngine};
pub use paginator::{ScrollPaginator, DEFAULT_LOAD_MORE_THRESHOLD};
