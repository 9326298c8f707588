//! Tracker error types.

use thiserror::Error;

use crate::{
    game::entities::Street,
    vision::{ObserverError, PollError},
};

/// The board and the state machine disagree about where the hand is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructuralViolation {
    #[error("Unexpected amount of community cards {found} while waiting for the {street}")]
    CommunityCount { street: Street, found: usize },

    #[error("Board shows {found} community cards while waiting for the {street}")]
    BoardAhead { street: Street, found: usize },
}

/// Tracker errors
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Poll(#[from] PollError),

    #[error("Structural violation: {0}")]
    Structural(#[from] StructuralViolation),
}

impl TrackerError {
    /// Errors the tracker cannot recover from by starting over with the next hand.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Poll(PollError::Observer(_)))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Poll(PollError::Cancelled))
    }

    /// A recorded history ran out; the normal way for a replay to finish.
    pub fn is_end_of_history(&self) -> bool {
        matches!(
            self,
            Self::Poll(PollError::Observer(ObserverError::EndOfHistory))
        )
    }

    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Poll(PollError::Timeout { .. }) => "timeout",
            Self::Poll(PollError::Cancelled) => "cancelled",
            Self::Poll(PollError::Observer(_)) => "observer",
            Self::Structural(_) => "structural",
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
