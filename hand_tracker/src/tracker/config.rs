//! Tracker configuration models.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::{
    constants::{
        DEFAULT_BLIND_POST_DELAY_MS, DEFAULT_CLIENT, DEFAULT_HERO_SEAT, DEFAULT_MAX_WAIT_SECS,
        DEFAULT_POLL_INTERVAL_MS, DEFAULT_SETTLE_DELAY_MS, DEFAULT_TABLE_SIZE, MAX_TABLE_SIZE,
        MIN_TABLE_SIZE,
    },
    entities::Seat,
};

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Poker client name written into every hand record
    pub client: String,
    /// Number of seats at the observed table (default: 6)
    pub table_size: usize,
    /// Seat the hero sits in; their pocket cards are recorded
    pub hero_seat: usize,
    /// Interval between snapshot fetches while waiting
    pub poll_interval_ms: u64,
    /// Pause after a hand boundary before reading the seats
    pub settle_delay_ms: u64,
    /// Pause after the seats are read so the blinds show as posted
    pub blind_post_delay_ms: u64,
    /// Give up a single wait after this long; `None` waits forever
    pub max_wait_secs: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            client: DEFAULT_CLIENT.to_string(),
            table_size: DEFAULT_TABLE_SIZE,
            hero_seat: DEFAULT_HERO_SEAT,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            blind_post_delay_ms: DEFAULT_BLIND_POST_DELAY_MS,
            max_wait_secs: Some(DEFAULT_MAX_WAIT_SECS),
        }
    }
}

impl TrackerConfig {
    /// Configuration for replaying a recorded history, where the recorded
    /// snapshots already carry all the timing and waiting only slows things
    /// down.
    pub fn replay() -> Self {
        Self {
            poll_interval_ms: 0,
            settle_delay_ms: 0,
            blind_post_delay_ms: 0,
            max_wait_secs: None,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_TABLE_SIZE..=MAX_TABLE_SIZE).contains(&self.table_size) {
            return Err(format!(
                "Table size must be between {MIN_TABLE_SIZE} and {MAX_TABLE_SIZE}"
            ));
        }
        if self.hero().is_none() {
            return Err(format!(
                "Hero seat must be between 1 and the table size ({})",
                self.table_size
            ));
        }
        if self.client.trim().is_empty() {
            return Err("Client name must not be empty".to_string());
        }
        if self.max_wait_secs == Some(0) {
            return Err("Max wait must be positive when set".to_string());
        }
        Ok(())
    }

    pub fn hero(&self) -> Option<Seat> {
        Seat::new(self.hero_seat, self.table_size)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn blind_post_delay(&self) -> Duration {
        Duration::from_millis(self.blind_post_delay_ms)
    }

    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait_secs.map(Duration::from_secs)
    }
}
