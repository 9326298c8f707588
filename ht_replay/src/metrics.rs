//! Prometheus metrics for replay runs.
//!
//! Counters are recorded through the `metrics` facade. They are only
//! exported when a scrape endpoint is installed with [`init_metrics`];
//! otherwise recording is a no-op.
//!
//! # Metrics
//!
//! - `hands_completed_total`: hands written to the sink
//! - `hands_aborted_total{kind}`: hands given up on, by error kind
//! - `actions_recorded_total`: player actions across completed hands

use hand_tracker::{Hand, HandSink, TrackerError};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

/// Increment completed hands counter.
pub fn hands_completed_total() {
    metrics::counter!("hands_completed_total").increment(1);
}

/// Increment aborted hands counter, labelled with the error kind.
pub fn hands_aborted_total(kind: &str) {
    metrics::counter!("hands_aborted_total", "kind" => kind.to_string()).increment(1);
}

/// Add recorded actions.
pub fn actions_recorded_total(count: usize) {
    metrics::counter!("actions_recorded_total").increment(count as u64);
}

/// Counts hands on their way to another sink.
pub struct MetricsSink<S> {
    inner: S,
}

impl<S: HandSink> MetricsSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: HandSink> HandSink for MetricsSink<S> {
    fn hand_completed(&mut self, hand: &Hand) {
        hands_completed_total();
        actions_recorded_total(hand.rounds.iter().map(|round| round.actions.len()).sum());
        self.inner.hand_completed(hand);
    }

    fn hand_aborted(&mut self, hand_id: Option<u64>, error: &TrackerError) {
        hands_aborted_total(error.kind());
        self.inner.hand_aborted(hand_id, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_tracker::{
        Amount, Street,
        entities::{Round, Table},
        vision::PollError,
    };
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Counting {
        completed: Arc<Mutex<Vec<u64>>>,
        aborted: Arc<Mutex<Vec<Option<u64>>>>,
    }

    impl HandSink for Counting {
        fn hand_completed(&mut self, hand: &Hand) {
            self.completed.lock().unwrap().push(hand.hand_id);
        }

        fn hand_aborted(&mut self, hand_id: Option<u64>, _error: &TrackerError) {
            self.aborted.lock().unwrap().push(hand_id);
        }
    }

    fn hand(hand_id: u64) -> Hand {
        Hand {
            client: "PokerStars".to_string(),
            table: Table::from_title("", 6),
            hand_id,
            date: chrono::Utc::now(),
            button: None,
            small_blind: None,
            big_blind: None,
            this_player: None,
            players: Vec::new(),
            rounds: vec![Round::new(Street::Preflop, Vec::new(), Amount::ZERO)],
        }
    }

    #[test]
    fn test_metrics_sink_forwards_hands() {
        let inner = Counting::default();
        let mut sink = MetricsSink::new(inner.clone());
        sink.hand_completed(&hand(3));
        sink.hand_completed(&hand(4));
        assert_eq!(*inner.completed.lock().unwrap(), vec![3, 4]);
    }

    #[test]
    fn test_metrics_sink_forwards_aborts() {
        let inner = Counting::default();
        let mut sink = MetricsSink::new(inner.clone());
        sink.hand_aborted(Some(7), &TrackerError::Poll(PollError::Cancelled));
        assert_eq!(*inner.aborted.lock().unwrap(), vec![Some(7)]);
    }
}
