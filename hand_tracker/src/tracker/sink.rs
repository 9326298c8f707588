use log::{error, info};
use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};
use thiserror::Error;

use super::errors::TrackerError;
use crate::game::entities::Hand;

/// Receives hands as the tracker finishes (or gives up on) them.
pub trait HandSink: Send {
    fn hand_completed(&mut self, hand: &Hand);

    /// `hand_id` is `None` when the failure happened before a hand was dealt.
    fn hand_aborted(&mut self, hand_id: Option<u64>, error: &TrackerError) {
        let _ = (hand_id, error);
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Writes each completed hand as pretty-printed JSON.
pub enum JsonSink {
    Writer(Box<dyn Write + Send>),
    /// One `hand-<id>.json` file per hand.
    Directory(PathBuf),
}

impl JsonSink {
    pub fn stdout() -> Self {
        Self::Writer(Box::new(io::stdout()))
    }

    pub fn directory(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self::Directory(dir))
    }

    pub fn render(hand: &Hand) -> serde_json::Result<String> {
        serde_json::to_string_pretty(hand)
    }

    fn write(&mut self, hand: &Hand) -> Result<(), SinkError> {
        let json = Self::render(hand)?;
        match self {
            Self::Writer(out) => {
                writeln!(out, "{json}")?;
                out.flush()?;
            }
            Self::Directory(dir) => {
                let path = dir.join(format!("hand-{}.json", hand.hand_id));
                fs::write(&path, json)?;
                info!("Hand {} written to {}", hand.hand_id, path.display());
            }
        }
        Ok(())
    }
}

impl HandSink for JsonSink {
    fn hand_completed(&mut self, hand: &Hand) {
        if let Err(e) = self.write(hand) {
            error!("Failed to write hand {}: {}", hand.hand_id, e);
        }
    }
}
