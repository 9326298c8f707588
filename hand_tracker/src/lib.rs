//! # Hand Tracker
//!
//! Reconstructs poker hand histories by watching a table.
//!
//! The tracker never talks to the poker client. It repeatedly takes
//! snapshots of the table, reads a handful of fields from each (stacks,
//! names, action labels, board cards, the dealer button, whose turn it is)
//! and infers what happened from how those fields change. Every completed
//! hand comes out as one JSON record.
//!
//! ## Core Modules
//!
//! - [`game`]: Hand records, seat ring arithmetic and the betting-round rules
//! - [`vision`]: Snapshot, observer and extractor seams, and the poller
//! - [`tracker`]: The hand lifecycle state machine and output sinks
//! - [`history`]: Recording snapshot dumps and replaying them
//!
//! ## Example
//!
//! ```no_run
//! use hand_tracker::{
//!     FieldMapExtractor, HandTracker, JsonSink, Poller, TrackerConfig,
//!     history::{NoopArchiver, ReplayObserver},
//! };
//! use std::sync::Arc;
//! use tokio::sync::watch;
//!
//! # async fn replay() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TrackerConfig::replay();
//! let (_shutdown, shutdown_rx) = watch::channel(false);
//! let poller = Poller::new(
//!     Box::new(ReplayObserver::open("dumps/4242")?),
//!     Arc::new(NoopArchiver),
//!     config.poll_interval(),
//!     config.max_wait(),
//!     shutdown_rx,
//! );
//! let tracker = HandTracker::new(
//!     config,
//!     poller,
//!     Arc::new(FieldMapExtractor),
//!     Box::new(JsonSink::stdout()),
//! );
//! tracker.run().await?;
//! # Ok(())
//! # }
//! ```

/// Poker domain model and betting rules.
pub mod game;
pub use game::{
    ActivePlayers, HandBoundary, RoundClosure, SeatStatus, classify, constants,
    entities::{self, Action, Amount, Card, Hand, Seat, Street},
};

/// Snapshot recording and replay.
pub mod history;

/// Hand lifecycle tracking.
pub mod tracker;
pub use tracker::{HandSink, HandState, HandTracker, JsonSink, TrackerConfig, TrackerError};

/// Seams to the snapshot source and the field recognizer.
pub mod vision;
pub use vision::{
    FieldExtractor, FieldMapExtractor, Poller, Snapshot, SnapshotArchiver, TableObserver,
};
