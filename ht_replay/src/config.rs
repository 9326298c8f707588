//! Replay configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use hand_tracker::TrackerConfig;
use std::{net::SocketAddr, path::PathBuf, str::FromStr};

/// Complete replay configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Directory holding the recorded snapshot dump (required)
    pub dump_dir: PathBuf,
    /// Directory for `hand-<id>.json` files; stdout when unset
    pub output_dir: Option<PathBuf>,
    /// Re-archive every replayed snapshot into this directory
    pub archive_dir: Option<PathBuf>,
    /// Prometheus scrape endpoint; metrics are only recorded locally when unset
    pub metrics_bind: Option<SocketAddr>,
    /// Tracker settings, starting from the replay profile
    pub tracker: TrackerConfig,
}

/// Values given on the command line, taking priority over the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dump_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub metrics_bind: Option<SocketAddr>,
    pub hero_seat: Option<usize>,
}

impl ReplayConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if the dump directory is missing or a variable does not parse
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    /// Same as [`ReplayConfig::from_env`] with variables read through `lookup`.
    pub fn from_lookup<F>(lookup: F, overrides: Overrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dump_dir = overrides
            .dump_dir
            .or_else(|| lookup("HT_DUMP_DIR").map(PathBuf::from))
            .ok_or_else(|| ConfigError::MissingRequired {
                var: "HT_DUMP_DIR".to_string(),
                hint: "Pass --dump <DIR> or point HT_DUMP_DIR at a snapshot dump".to_string(),
            })?;

        let output_dir = overrides
            .output_dir
            .or_else(|| lookup("HT_OUTPUT_DIR").map(PathBuf::from));
        let archive_dir = lookup("HT_ARCHIVE_DIR").map(PathBuf::from);

        let metrics_bind = match overrides.metrics_bind {
            Some(addr) => Some(addr),
            None => parse_env(&lookup, "HT_METRICS_BIND")?,
        };

        let defaults = TrackerConfig::replay();
        let hero_seat = match overrides.hero_seat {
            Some(seat) => seat,
            None => parse_env_or(&lookup, "HT_HERO_SEAT", defaults.hero_seat)?,
        };

        // 0 means wait forever, the replay default
        let max_wait_secs = parse_env::<u64>(&lookup, "HT_MAX_WAIT_SECS")?
            .filter(|secs| *secs > 0)
            .or(defaults.max_wait_secs);

        let tracker = TrackerConfig {
            client: lookup("HT_CLIENT").unwrap_or_else(|| defaults.client.clone()),
            table_size: parse_env_or(&lookup, "HT_TABLE_SIZE", defaults.table_size)?,
            hero_seat,
            poll_interval_ms: parse_env_or(
                &lookup,
                "HT_POLL_INTERVAL_MS",
                defaults.poll_interval_ms,
            )?,
            settle_delay_ms: parse_env_or(&lookup, "HT_SETTLE_DELAY_MS", defaults.settle_delay_ms)?,
            blind_post_delay_ms: parse_env_or(
                &lookup,
                "HT_BLIND_POST_DELAY_MS",
                defaults.blind_post_delay_ms,
            )?,
            max_wait_secs,
        };

        Ok(Self {
            dump_dir,
            output_dir,
            archive_dir,
            metrics_bind,
            tracker,
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_dir.as_deref() == Some(self.dump_dir.as_path()) {
            return Err(ConfigError::Invalid {
                var: "HT_OUTPUT_DIR".to_string(),
                reason: "Must differ from the dump directory".to_string(),
            });
        }

        if self.archive_dir.as_deref() == Some(self.dump_dir.as_path()) {
            return Err(ConfigError::Invalid {
                var: "HT_ARCHIVE_DIR".to_string(),
                reason: "Must differ from the dump directory".to_string(),
            });
        }

        self.tracker
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "tracker".to_string(),
                reason,
            })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse an optional environment variable
fn parse_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("{raw:?}: {e}"),
            }),
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_env(lookup, key)?.unwrap_or(default))
}
