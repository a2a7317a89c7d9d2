//! Error types for catbrowse.
//!
//! Errors use `thiserror` and compose through `From` conversions so `?`
//! works across layers.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error for the binary
//!   - [`ConfigError`](crate::config::ConfigError) - configuration loading
//!   - [`LoggingError`](crate::logging::LoggingError) - log file setup
//!   - [`FetchFailure`] - a remote call failed
//!   - `std::io::Error` - terminal failures
//!
//! # Fetch failure taxonomy
//!
//! [`FailureKind`] separates what the user may retry (`Transient`), what they
//! must change (`Client`) and what is purely internal (`Cancelled`, a response
//! that lost the race to a newer request). Fetch failures are non-fatal: the
//! displayed list stays as it was and the message is shown in the status bar.

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Log file could not be set up.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// A remote call failed where the caller could not degrade gracefully.
    #[error("Catalog request failed: {0}")]
    Fetch(#[from] FetchFailure),

    /// Terminal I/O failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Classification of a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Network or service unavailable. Eligible for user-initiated retry.
    Transient,
    /// The service rejected the request (e.g. malformed filter combination).
    /// Retrying the same request will not help.
    Client,
    /// Superseded by a newer request. Never shown to the user.
    Cancelled,
}

impl FailureKind {
    /// True when the user may retry the same request.
    pub fn is_retryable(self) -> bool {
        matches!(self, FailureKind::Transient)
    }
}

/// A failed remote call: its classification plus a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct FetchFailure {
    /// Failure classification.
    pub kind: FailureKind,
    /// Human-readable cause.
    pub reason: String,
}

impl FetchFailure {
    /// Network or service trouble.
    pub fn transient(reason: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transient,
            reason: reason.into(),
        }
    }

    /// Request rejected by the service.
    pub fn client(reason: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Client,
            reason: reason.into(),
        }
    }

    /// Lost the race to a newer request.
    pub fn cancelled() -> Self {
        Self {
            kind: FailureKind::Cancelled,
            reason: "superseded by a newer request".to_string(),
        }
    }

    /// Message for the status bar.
    pub fn user_message(&self) -> String {
        match self.kind {
            FailureKind::Transient => format!("{} (press F5 to retry)", self.reason),
            FailureKind::Client => format!("Request rejected: {}", self.reason),
            FailureKind::Cancelled => String::new(),
        }
    }
}
