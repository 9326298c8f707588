//! Scripted tables for driving the tracker in tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::{
    collections::{BTreeMap, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::watch;

use hand_tracker::{
    FieldMapExtractor, Hand, HandSink, HandTracker, Poller, Snapshot, TableObserver,
    TrackerConfig, TrackerError, history::NoopArchiver, vision::ObserverError,
};

pub const TITLE: &str = "Halley - $0.05/$0.10 USD - No Limit Hold'em";

/// The recognized fields of one snapshot. Positions are 1-based seats.
#[derive(Clone, Debug, Default)]
pub struct Frame(BTreeMap<String, String>);

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    fn clear_prefix(mut self, prefix: &str) -> Self {
        self.0.retain(|key, _| !key.starts_with(prefix));
        self
    }

    /// A dealt-in seat.
    pub fn seat(self, position: usize, name: &str, stack: &str) -> Self {
        let idx = position - 1;
        self.set(&format!("plName{idx}"), name)
            .set(&format!("plStack{idx}"), stack)
            .set(&format!("plActive{idx}"), "cards")
    }

    pub fn stack(self, position: usize, stack: &str) -> Self {
        self.set(&format!("plStack{}", position - 1), stack)
    }

    /// Seat no longer holds cards.
    pub fn mucked(mut self, position: usize) -> Self {
        self.0.remove(&format!("plActive{}", position - 1));
        self
    }

    pub fn button(self, position: usize) -> Self {
        self.clear_prefix("button")
            .set(&format!("button{}", position - 1), "D")
    }

    pub fn turn(self, position: Option<usize>) -> Self {
        let frame = self.clear_prefix("plCurrent");
        match position {
            Some(position) => frame.set(&format!("plCurrent{}", position - 1), "timer"),
            None => frame,
        }
    }

    /// `position` acted with `label` and now shows `stack`.
    pub fn acted(self, position: usize, label: &str, stack: &str) -> Self {
        self.set(&format!("plAction{}", position - 1), label)
            .stack(position, stack)
    }

    pub fn clear_actions(self) -> Self {
        self.clear_prefix("plAction")
    }

    pub fn pot(self, pot: &str) -> Self {
        self.set("pot", pot)
    }

    pub fn board(self, cards: &[&str]) -> Self {
        let mut frame = self.clear_prefix("comm");
        for (idx, card) in cards.iter().enumerate() {
            let (value, color) = card_labels(card);
            frame = frame
                .set(&format!("commValue{idx}"), &value)
                .set(&format!("commColor{idx}"), &color);
        }
        frame
    }

    pub fn pocket(self, first: &str, second: &str) -> Self {
        let (v0, c0) = card_labels(first);
        let (v1, c1) = card_labels(second);
        self.set("pocketValue0", &v0)
            .set("pocketColor0", &c0)
            .set("pocketValue1", &v1)
            .set("pocketColor1", &c1)
    }

    pub fn snapshot(&self, sequence: u64) -> Snapshot {
        Snapshot::from_fields(sequence, &self.0)
    }
}

/// Labels the way the recognizer reports them: "valA" and "hearts".
fn card_labels(card: &str) -> (String, String) {
    let (rank, suit) = card.split_at(card.len() - 1);
    let color = match suit {
        "h" => "hearts",
        "d" => "diamonds",
        "c" => "clubs",
        _ => "spades",
    };
    (format!("val{rank}"), color.to_string())
}

/// Hands out prepared snapshots in order.
pub struct ScriptedObserver {
    frames: VecDeque<Snapshot>,
    title: Option<String>,
    repeat_last: bool,
    last: Option<Snapshot>,
}

impl ScriptedObserver {
    pub fn new(frames: &[Frame]) -> Self {
        Self {
            frames: frames
                .iter()
                .enumerate()
                .map(|(i, frame)| frame.snapshot(i as u64 + 1))
                .collect(),
            title: Some(TITLE.to_string()),
            repeat_last: false,
            last: None,
        }
    }

    pub fn without_title(mut self) -> Self {
        self.title = None;
        self
    }

    /// Keep serving the last frame instead of running out.
    pub fn repeating(mut self) -> Self {
        self.repeat_last = true;
        self
    }
}

#[async_trait]
impl TableObserver for ScriptedObserver {
    async fn snapshot(&mut self) -> Result<Snapshot, ObserverError> {
        match self.frames.pop_front() {
            Some(snapshot) => {
                self.last = Some(snapshot.clone());
                Ok(snapshot)
            }
            None if self.repeat_last => self.last.clone().ok_or(ObserverError::EndOfHistory),
            None => Err(ObserverError::EndOfHistory),
        }
    }

    async fn title(&self) -> Result<String, ObserverError> {
        self.title
            .clone()
            .ok_or_else(|| ObserverError::Unavailable("no window".to_string()))
    }
}

/// Sink collecting everything the tracker reports.
#[derive(Clone, Default)]
pub struct CollectingSink {
    pub completed: Arc<Mutex<Vec<Hand>>>,
    pub aborted: Arc<Mutex<Vec<(Option<u64>, String)>>>,
}

impl CollectingSink {
    pub fn hands(&self) -> Vec<Hand> {
        self.completed.lock().unwrap().clone()
    }

    pub fn aborts(&self) -> Vec<(Option<u64>, String)> {
        self.aborted.lock().unwrap().clone()
    }
}

impl HandSink for CollectingSink {
    fn hand_completed(&mut self, hand: &Hand) {
        self.completed.lock().unwrap().push(hand.clone());
    }

    fn hand_aborted(&mut self, hand_id: Option<u64>, error: &TrackerError) {
        self.aborted
            .lock()
            .unwrap()
            .push((hand_id, error.kind().to_string()));
    }
}

pub fn poller(observer: impl TableObserver + 'static, max_wait: Option<Duration>) -> (Poller, watch::Sender<bool>) {
    let (tx, rx) = watch::channel(false);
    let poller = Poller::new(
        Box::new(observer),
        Arc::new(NoopArchiver),
        Duration::ZERO,
        max_wait,
        rx,
    );
    (poller, tx)
}

pub fn tracker(config: TrackerConfig, poller: Poller, sink: &CollectingSink) -> HandTracker {
    HandTracker::new(
        config,
        poller,
        Arc::new(FieldMapExtractor),
        Box::new(sink.clone()),
    )
}

/// Runs the tracker over `observer` until the script runs out.
pub async fn replay(
    config: TrackerConfig,
    observer: impl TableObserver + 'static,
) -> (Result<(), TrackerError>, CollectingSink) {
    let sink = CollectingSink::default();
    let (poller, _shutdown) = poller(observer, None);
    let result = tracker(config, poller, &sink).run().await;
    (result, sink)
}

/// Replay configuration with the hero in `hero_seat`.
pub fn config(hero_seat: usize) -> TrackerConfig {
    TrackerConfig {
        hero_seat,
        ..TrackerConfig::replay()
    }
}

/// Heads-up hand on seats 2 and 4 with the button on 2. Both players get
/// all-in preflop and the board runs out while the state machine watches.
pub fn all_in_run_out() -> Vec<Frame> {
    let dealt = Frame::new()
        .seat(2, "bob", "$2.00")
        .seat(4, "hero", "$2.00")
        .button(2);
    let blinds = dealt
        .clone()
        .stack(4, "$1.95")
        .stack(2, "$1.90")
        .pot("Pot: $0.15")
        .pocket("Qs", "Qd")
        .turn(Some(4));
    let shove = blinds.clone().acted(4, "Raise", "All In").turn(Some(2));
    let call = shove.clone().acted(2, "Call", "All In").turn(None);
    let dealing = call.clone().pot("Pot: $4.00");
    let flop = dealing.clone().board(&["Ah", "Td", "2c"]);
    let turn = flop.clone().board(&["Ah", "Td", "2c", "7s"]);
    let river = turn.clone().board(&["Ah", "Td", "2c", "7s", "Qh"]);

    vec![
        Frame::new(),
        dealt.clone(),
        dealt,
        blinds,
        shove,
        call,
        dealing,
        flop.clone(),
        flop,
        turn,
        river,
    ]
}
