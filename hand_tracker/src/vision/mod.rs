//! Seams to the outside world: where snapshots come from, how fields are
//! recognized in them, and where they are archived.
//!
//! The tracker never looks at pixels. A [`TableObserver`] produces opaque
//! [`Snapshot`]s, a [`FieldExtractor`] turns a field key plus a snapshot into
//! raw text, and [`FieldReader`] gives that text types.

pub mod errors;
pub mod fields;
pub mod poller;

pub use errors::{ExtractionError, ObserverError, PollError};
pub use fields::{Field, FieldReader};
pub use poller::Poller;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

/// One capture of the table. Snapshots are immutable once taken and are
/// shared behind an `Arc` between the poller and readers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    pub sequence: u64,
    pub captured_at: DateTime<Utc>,
    pub payload: Vec<u8>,
}

impl Snapshot {
    pub fn new(sequence: u64, payload: Vec<u8>) -> Self {
        Self {
            sequence,
            captured_at: Utc::now(),
            payload,
        }
    }

    /// Builds a snapshot whose payload is already recognized field text,
    /// readable by [`FieldMapExtractor`].
    pub fn from_fields(sequence: u64, fields: &BTreeMap<String, String>) -> Self {
        Self::new(sequence, serde_json::to_vec(fields).unwrap_or_default())
    }
}

/// Source of table snapshots (a screen grabber, or a recorded history).
#[async_trait]
pub trait TableObserver: Send + Sync {
    async fn snapshot(&mut self) -> Result<Snapshot, ObserverError>;

    /// Window title of the observed table.
    async fn title(&self) -> Result<String, ObserverError>;
}

/// Recognizes the value of a named field in a snapshot. Returns an empty
/// string when the field is absent or unreadable.
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, key: &str, snapshot: &Snapshot) -> String;
}

/// Persists snapshots for later replay. Failures are the archiver's to
/// log; tracking never stops because a dump could not be written.
pub trait SnapshotArchiver: Send + Sync {
    fn save(&self, snapshot: &Snapshot, description: &str);
}

/// Extractor for snapshots carrying a JSON object of field key to text.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldMapExtractor;

impl FieldExtractor for FieldMapExtractor {
    fn extract(&self, key: &str, snapshot: &Snapshot) -> String {
        match serde_json::from_slice::<HashMap<String, String>>(&snapshot.payload) {
            Ok(mut fields) => fields.remove(key).unwrap_or_default(),
            Err(error) => {
                log::debug!("snapshot {} is not a field map: {}", snapshot.sequence, error);
                String::new()
            }
        }
    }
}
