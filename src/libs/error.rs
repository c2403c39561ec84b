//! Error taxonomy for the reporting core.
//!
//! Every fallible operation of the window engine, the aggregator and the
//! report orchestrator returns a [`ReportError`]. The variants separate the
//! three kinds of failure callers have to present differently:
//!
//! - **Parse**: malformed user input (granularity selector, window token,
//!   report view parameter). Surfaced to the user as a client error.
//! - **InvalidWindow / InvalidInterval**: a caller broke an internal
//!   contract. Fatal to the current request, never to the process.
//! - **Store**: opaque pass-through of whatever the storage collaborator
//!   returned. Logged and surfaced as a generic failure.
//!
//! Nothing in the core retries or swallows an error.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid input: {0}")]
    Parse(String),

    #[error("Invalid time window: {0}")]
    InvalidWindow(String),

    #[error("Invalid interval: end {end} is before start {start}")]
    InvalidInterval { start: DateTime<Utc>, end: DateTime<Utc> },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ReportError {
    pub fn parse(msg: impl Into<String>) -> Self {
        ReportError::Parse(msg.into())
    }

    pub fn invalid_window(msg: impl Into<String>) -> Self {
        ReportError::InvalidWindow(msg.into())
    }

    /// True for errors caused by user input rather than by a caller bug or
    /// the store.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ReportError::Parse(_))
    }
}
