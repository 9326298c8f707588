//! Snapshot dumps: recording what the tracker saw, and playing it back.
//!
//! A dump directory holds one `.snap` file per fetched snapshot. File names
//! start with the capture time and a per-process sequence number so that a
//! plain name sort restores fetch order, and end with the description of
//! what the tracker was waiting for when the snapshot was taken.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{error, info};
use std::{
    collections::VecDeque,
    fs, io,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::vision::{ObserverError, Snapshot, SnapshotArchiver, TableObserver};

pub const SNAPSHOT_EXTENSION: &str = "snap";
/// File in a dump directory holding the observed window title.
pub const TITLE_FILE: &str = "title";

/// Writes every snapshot it is handed to `<root>/<pid>/`.
#[derive(Debug)]
pub struct DumpArchiver {
    dir: PathBuf,
    sequence: AtomicU64,
}

impl DumpArchiver {
    /// Archiver writing below `root`, in a directory named after this process.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::in_directory(root.as_ref().join(std::process::id().to_string()))
    }

    /// Archiver writing straight into `dir`.
    pub fn in_directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, snapshot: &Snapshot, description: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let name = format!(
            "{:013}-{:06}_{}.{SNAPSHOT_EXTENSION}",
            snapshot.captured_at.timestamp_millis(),
            sequence,
            sanitize(description)
        );
        let path = self.dir.join(name);
        fs::write(&path, &snapshot.payload)?;
        Ok(path)
    }

    pub fn write_title(&self, title: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(TITLE_FILE), title)
    }

    /// Stores the title `observer` currently reports, so a replay of this
    /// dump sees the same table.
    pub async fn record_title(&self, observer: &dyn TableObserver) -> Result<(), ObserverError> {
        let title = observer.title().await?;
        self.write_title(&title)?;
        info!("Recorded table title {title:?} in {}", self.dir.display());
        Ok(())
    }
}

impl SnapshotArchiver for DumpArchiver {
    fn save(&self, snapshot: &Snapshot, description: &str) {
        if let Err(e) = self.write(snapshot, description) {
            error!(
                "Failed to archive snapshot {} to {}: {}",
                snapshot.sequence,
                self.dir.display(),
                e
            );
        }
    }
}

/// Archiver for runs that must not leave dumps behind.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopArchiver;

impl SnapshotArchiver for NoopArchiver {
    fn save(&self, _snapshot: &Snapshot, _description: &str) {}
}

fn sanitize(description: &str) -> String {
    description
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// Description part of a dump file name, e.g. `flop` for
/// `1718000000000-000042_flop.snap`.
fn describe(path: &Path) -> &str {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.split_once('_'))
        .map_or("", |(_, description)| description)
}

fn captured_at(path: &Path) -> Option<DateTime<Utc>> {
    let stem = path.file_stem()?.to_str()?;
    let millis = stem.split('-').next()?.parse().ok()?;
    DateTime::from_timestamp_millis(millis)
}

/// Plays a dump directory back as if it were a live table.
#[derive(Debug)]
pub struct ReplayObserver {
    dir: PathBuf,
    files: VecDeque<PathBuf>,
    sequence: u64,
    step: bool,
}

impl ReplayObserver {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ObserverError> {
        let dir = dir.into();
        let mut files: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == SNAPSHOT_EXTENSION))
            .collect();
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        info!("Replaying {} snapshots from {}", files.len(), dir.display());
        Ok(Self {
            dir,
            files: files.into(),
            sequence: 0,
            step: false,
        })
    }

    /// Wait for Enter on stdin before handing out each snapshot.
    pub fn with_step(mut self, step: bool) -> Self {
        self.step = step;
        self
    }

    pub fn remaining(&self) -> usize {
        self.files.len()
    }
}

async fn wait_for_enter() -> io::Result<()> {
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(())
}

#[async_trait]
impl TableObserver for ReplayObserver {
    async fn snapshot(&mut self) -> Result<Snapshot, ObserverError> {
        let Some(path) = self.files.pop_front() else {
            info!("End of history sequence");
            return Err(ObserverError::EndOfHistory);
        };
        if self.step {
            wait_for_enter().await?;
        }
        info!("History: {}", describe(&path));
        let payload = tokio::fs::read(&path).await?;
        self.sequence += 1;
        Ok(Snapshot {
            sequence: self.sequence,
            captured_at: captured_at(&path).unwrap_or_else(Utc::now),
            payload,
        })
    }

    async fn title(&self) -> Result<String, ObserverError> {
        match tokio::fs::read_to_string(self.dir.join(TITLE_FILE)).await {
            Ok(title) => Ok(title.trim().to_string()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ObserverError::Unavailable(
                format!("no {TITLE_FILE} file in {}", self.dir.display()),
            )),
            Err(e) => Err(e.into()),
        }
    }
}
