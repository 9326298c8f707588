//! Poker domain model for hand tracking.
//!
//! This module holds everything that can be reasoned about without looking
//! at a screen:
//! - Hand records and their JSON shape ([`entities`])
//! - Which seats are still in the hand ([`seats`])
//! - When a betting round is over ([`closure`])
//! - When a new hand has been dealt ([`boundary`])
//! - Turning a label plus stack change into an action ([`classifier`])

pub mod boundary;
pub mod classifier;
pub mod closure;
pub mod constants;
pub mod entities;
pub mod seats;

pub use boundary::HandBoundary;
pub use classifier::{ActionKind, ClassifyError, classify};
pub use closure::RoundClosure;
pub use seats::{ActivePlayers, SeatStatus};
