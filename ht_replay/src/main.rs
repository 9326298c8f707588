//! Hand history replay.
//!
//! Feeds a recorded snapshot dump through the hand tracker and writes every
//! reconstructed hand as JSON.

mod config;
mod metrics;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Error;
use ctrlc::set_handler;
use log::{info, warn};
use pico_args::Arguments;
use tokio::sync::watch;

use hand_tracker::{
    FieldMapExtractor, HandSink, HandTracker, JsonSink, Poller, SnapshotArchiver,
    history::{DumpArchiver, NoopArchiver, ReplayObserver},
};

use crate::config::{Overrides, ReplayConfig};
use crate::metrics::MetricsSink;

const HELP: &str = "\
Replay a recorded table snapshot dump into JSON hand histories

USAGE:
  ht_replay [OPTIONS] --dump DIR

OPTIONS:
  --dump       DIR         Snapshot dump to replay         [default: env HT_DUMP_DIR]
  --out        DIR         Write hand-<id>.json files here [default: env HT_OUTPUT_DIR or stdout]
  --hero       SEAT        Seat whose pocket cards are recorded [default: env HT_HERO_SEAT or 4]
  --metrics    IP:PORT     Prometheus scrape endpoint      [default: env HT_METRICS_BIND or off]

FLAGS:
  -h, --help               Print help information
  --step                   Wait for Enter before each snapshot

ENVIRONMENT:
  HT_CLIENT                Client name written into each hand (default: PokerStars)
  HT_TABLE_SIZE            Seats at the recorded table (default: 6)
  HT_ARCHIVE_DIR           Re-archive replayed snapshots into this directory
  HT_POLL_INTERVAL_MS      Delay between snapshot reads (default: 0)
  HT_SETTLE_DELAY_MS       Delay after a hand boundary (default: 0)
  HT_BLIND_POST_DELAY_MS   Delay before reading posted blinds (default: 0)
  HT_MAX_WAIT_SECS         Give up a single wait after this long (default: 0, never)
  RUST_LOG                 Log filter (e.g. info, hand_tracker=debug)
";

struct Args {
    dump: Option<PathBuf>,
    out: Option<PathBuf>,
    hero: Option<usize>,
    metrics: Option<SocketAddr>,
    step: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        dump: pargs.opt_value_from_str("--dump")?,
        out: pargs.opt_value_from_str("--out")?,
        hero: pargs.opt_value_from_str("--hero")?,
        metrics: pargs.opt_value_from_str("--metrics")?,
        step: pargs.contains("--step"),
    };

    let config = ReplayConfig::from_env(Overrides {
        dump_dir: args.dump,
        output_dir: args.out,
        metrics_bind: args.metrics,
        hero_seat: args.hero,
    })?;
    config.validate()?;

    // Catching signals for exit.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    set_handler(move || {
        let _ = shutdown_tx.send(true);
    })?;

    env_logger::builder().format_target(false).init();

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(anyhow::Error::msg)?;
        info!("Metrics available at http://{addr}/metrics");
    }

    info!("Replaying {}", config.dump_dir.display());
    let observer = ReplayObserver::open(&config.dump_dir)?.with_step(args.step);
    info!("{} snapshot(s) to replay", observer.remaining());

    let archiver: Arc<dyn SnapshotArchiver> = match &config.archive_dir {
        Some(dir) => {
            let archiver = DumpArchiver::new(dir);
            info!("Archiving snapshots to {}", archiver.dir().display());
            if let Err(e) = archiver.record_title(&observer).await {
                warn!("Archive will have no table title: {e}");
            }
            Arc::new(archiver)
        }
        None => Arc::new(NoopArchiver),
    };

    let sink: Box<dyn HandSink> = match &config.output_dir {
        Some(dir) => Box::new(MetricsSink::new(JsonSink::directory(dir)?)),
        None => Box::new(MetricsSink::new(JsonSink::stdout())),
    };

    let poller = Poller::new(
        Box::new(observer),
        archiver,
        config.tracker.poll_interval(),
        config.tracker.max_wait(),
        shutdown_rx,
    );
    let tracker = HandTracker::new(config.tracker, poller, Arc::new(FieldMapExtractor), sink);

    match tracker.run().await {
        Ok(()) => info!("Replay interrupted"),
        Err(e) if e.is_end_of_history() => info!("Replay finished"),
        Err(e) => {
            warn!("Replay stopped: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}
