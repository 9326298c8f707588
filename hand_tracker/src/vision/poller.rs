use log::debug;
use std::{sync::Arc, time::Duration};
use tokio::{sync::watch, time::Instant};

use super::{
    Snapshot, SnapshotArchiver, TableObserver,
    errors::{ObserverError, PollError, Result},
};

/// Pulls snapshots from the observer at a fixed interval until a predicate
/// over the latest snapshot holds.
///
/// Every snapshot fetched is archived under the description of what was
/// being waited for. Waiting is bounded by an optional maximum and can be
/// cut short through the shutdown channel.
pub struct Poller {
    observer: Box<dyn TableObserver>,
    archiver: Arc<dyn SnapshotArchiver>,
    interval: Duration,
    max_wait: Option<Duration>,
    shutdown: watch::Receiver<bool>,
    latest: Option<Arc<Snapshot>>,
}

impl Poller {
    pub fn new(
        observer: Box<dyn TableObserver>,
        archiver: Arc<dyn SnapshotArchiver>,
        interval: Duration,
        max_wait: Option<Duration>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            observer,
            archiver,
            interval,
            max_wait,
            shutdown,
            latest: None,
        }
    }

    /// The most recently fetched snapshot.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.latest.clone()
    }

    pub async fn title(&self) -> std::result::Result<String, ObserverError> {
        self.observer.title().await
    }

    /// Fetches, archives and caches a fresh snapshot.
    pub async fn refresh(&mut self, description: &str) -> Result<Arc<Snapshot>> {
        self.check_cancelled()?;
        let snapshot = Arc::new(self.observer.snapshot().await?);
        debug!("snapshot {} ({description})", snapshot.sequence);
        self.archiver.save(&snapshot, description);
        self.latest = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Sleeps for `duration` unless shutdown is requested first.
    pub async fn pause(&mut self, duration: Duration) -> Result<()> {
        self.check_cancelled()?;
        let sleep = tokio::time::sleep(duration);
        tokio::pin!(sleep);
        loop {
            tokio::select! {
                () = &mut sleep => return Ok(()),
                changed = self.shutdown.changed() => match changed {
                    Ok(()) => self.check_cancelled()?,
                    // Sender gone: nobody can cancel anymore.
                    Err(_) => {
                        (&mut sleep).await;
                        return Ok(());
                    }
                },
            }
        }
    }

    /// Waits until `predicate` holds for the latest snapshot.
    ///
    /// The cached snapshot is checked first so a condition that already
    /// holds costs no fetch. After that the poller sleeps one interval
    /// between fetches.
    pub async fn wait_until<F>(&mut self, description: &str, mut predicate: F) -> Result<Arc<Snapshot>>
    where
        F: FnMut(&Snapshot) -> bool,
    {
        let started = Instant::now();
        let mut snapshot = match self.latest() {
            Some(snapshot) => snapshot,
            None => self.refresh(description).await?,
        };
        loop {
            if predicate(&snapshot) {
                return Ok(snapshot);
            }
            if let Some(max_wait) = self.max_wait {
                let waited = started.elapsed();
                if waited >= max_wait {
                    return Err(PollError::Timeout {
                        description: description.to_string(),
                        waited,
                    });
                }
            }
            self.pause(self.interval).await?;
            snapshot = self.refresh(description).await?;
        }
    }

    fn check_cancelled(&self) -> Result<()> {
        if *self.shutdown.borrow() {
            return Err(PollError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::NoopArchiver;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Counts up forever; the payload is the sequence number.
    struct Counter {
        next: u64,
    }

    #[async_trait]
    impl TableObserver for Counter {
        async fn snapshot(&mut self) -> std::result::Result<Snapshot, ObserverError> {
            self.next += 1;
            Ok(Snapshot::new(self.next, self.next.to_le_bytes().to_vec()))
        }

        async fn title(&self) -> std::result::Result<String, ObserverError> {
            Ok("Counter".to_string())
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl SnapshotArchiver for Recorder {
        fn save(&self, snapshot: &Snapshot, description: &str) {
            self.0
                .lock()
                .unwrap()
                .push(format!("{}:{description}", snapshot.sequence));
        }
    }

    fn poller(max_wait: Option<Duration>) -> (Poller, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        let poller = Poller::new(
            Box::new(Counter { next: 0 }),
            Arc::new(NoopArchiver),
            Duration::from_millis(1),
            max_wait,
            rx,
        );
        (poller, tx)
    }

    #[tokio::test]
    async fn test_wait_until_polls_until_predicate() {
        let (mut poller, _tx) = poller(None);
        let snapshot = poller
            .wait_until("counting", |s| s.sequence >= 3)
            .await
            .unwrap();
        assert_eq!(snapshot.sequence, 3);
        assert_eq!(poller.latest().unwrap().sequence, 3);
    }

    #[tokio::test]
    async fn test_wait_until_uses_cached_snapshot() {
        let (mut poller, _tx) = poller(None);
        poller.refresh("first").await.unwrap();
        let snapshot = poller.wait_until("cached", |_| true).await.unwrap();
        assert_eq!(snapshot.sequence, 1);
    }

    #[tokio::test]
    async fn test_wait_until_times_out() {
        let (mut poller, _tx) = poller(Some(Duration::from_millis(20)));
        let result = poller.wait_until("never", |_| false).await;
        assert!(matches!(result, Err(PollError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_cancelled_before_fetch() {
        let (mut poller, tx) = poller(None);
        tx.send(true).unwrap();
        let result = poller.wait_until("cancelled", |_| true).await;
        assert!(matches!(result, Err(PollError::Cancelled)));
    }

    #[tokio::test]
    async fn test_pause_interrupted_by_shutdown() {
        let (mut poller, tx) = poller(None);
        let cancel = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            tx.send(true).unwrap();
        });
        let result = poller.pause(Duration::from_secs(60)).await;
        assert!(matches!(result, Err(PollError::Cancelled)));
        cancel.await.unwrap();
    }

    #[tokio::test]
    async fn test_every_fetch_is_archived() {
        let (_tx, rx) = watch::channel(false);
        let recorder = Arc::new(Recorder::default());
        let mut poller = Poller::new(
            Box::new(Counter { next: 0 }),
            recorder.clone(),
            Duration::ZERO,
            None,
            rx,
        );
        poller.wait_until("flop", |s| s.sequence == 2).await.unwrap();
        let saved = recorder.0.lock().unwrap().clone();
        assert_eq!(saved, vec!["1:flop".to_string(), "2:flop".to_string()]);
    }
}
