//! Hand tracking: the state machine that turns a stream of snapshots into
//! hand records, plus its configuration and output sinks.

pub mod config;
pub mod errors;
pub mod session;
pub mod sink;
pub mod state_machine;

pub use config::TrackerConfig;
pub use errors::{StructuralViolation, TrackerError};
pub use session::HandSession;
pub use sink::{HandSink, JsonSink, SinkError};
pub use state_machine::{HandState, HandTracker};
