//! Vision error types.

use std::time::Duration;
use thiserror::Error;

/// Failures of the snapshot source itself.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// The source cannot produce a snapshot right now
    #[error("Observer unavailable: {0}")]
    Unavailable(String),

    /// Reading a recorded snapshot failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A recorded history has been played back completely
    #[error("End of snapshot history")]
    EndOfHistory,
}

/// A field could not be turned into a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The extractor returned nothing for the field
    #[error("Field {field} is not readable")]
    Missing { field: String },

    /// The extractor returned text that does not parse
    #[error("Field {field} has unrecognized value {value:?}")]
    Malformed { field: String, value: String },

    /// The board shows a card count no street produces
    #[error("Unexpected amount of community cards {0}, expected 0, 3, 4 or 5")]
    InvalidCommunityCount(usize),
}

/// Polling errors
#[derive(Debug, Error)]
pub enum PollError {
    /// The predicate did not hold within the configured maximum wait
    #[error("Gave up waiting for {description} after {waited:?}")]
    Timeout { description: String, waited: Duration },

    /// Shutdown was requested while waiting
    #[error("Polling cancelled")]
    Cancelled,

    #[error(transparent)]
    Observer(#[from] ObserverError),
}

pub type Result<T> = std::result::Result<T, PollError>;
