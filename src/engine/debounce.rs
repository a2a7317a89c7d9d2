//! Quiet-period gate for query edits.
//!
//! Time is passed in by the caller, so the debouncer never reads a clock and
//! tests can drive it with synthetic instants.

use crate::model::QueryState;
use std::time::{Duration, Instant};

/// Default quiet period.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Collapses a burst of `schedule` calls into one fire event.
#[derive(Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    state: QueryState,
    scheduled_at: Instant,
}

impl Debouncer {
    /// Debouncer firing `quiet_period` after the last schedule.
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Configured quiet period.
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Record `state` as the latest input and restart the timer.
    ///
    /// Any previously pending state is discarded.
    pub fn schedule(&mut self, state: QueryState, now: Instant) {
        self.pending = Some(Pending {
            state,
            scheduled_at: now,
        });
    }

    /// Fire if the quiet period has elapsed since the last `schedule`.
    ///
    /// Returns the pending state at most once per burst.
    pub fn poll(&mut self, now: Instant) -> Option<QueryState> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.scheduled_at) >= self.quiet_period);

        if ready {
            self.pending.take().map(|p| p.state)
        } else {
            None
        }
    }

    /// Emit the pending state immediately, if any.
    pub fn flush(&mut self) -> Option<QueryState> {
        self.pending.take().map(|p| p.state)
    }

    /// Drop the pending state without emitting it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// True while a state waits to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending state will fire, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .map(|p| p.scheduled_at + self.quiet_period)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}
