//! Hand lifecycle state machine.
//!
//! The tracker walks every hand through the same states:
//!
//! - **AwaitingHand**: watch the number of seats holding cards until it
//!   rises above its low-water mark, then read the dealt-in seats
//! - **Dealing**: fill in the hand header (button, blinds, players, hero cards)
//! - **Round**: wait for the street's community cards, then follow the
//!   betting turn by turn until the round closes
//! - **Complete**: hand the finished record to the sink
//!
//! Each transition consumes the current state and returns the next one, so
//! the data of a hand lives exactly as long as the hand does.

use chrono::Utc;
use log::{debug, error, info, warn};
use std::{fmt, sync::Arc};

use super::{
    config::TrackerConfig,
    errors::{Result, StructuralViolation},
    session::HandSession,
    sink::HandSink,
};
use crate::{
    game::{
        boundary::HandBoundary,
        constants::VALID_COMMUNITY_COUNTS,
        entities::{Amount, Hand, Player, PlayerCards, Seat, Street, Table},
        seats::ActivePlayers,
    },
    vision::{ExtractionError, FieldExtractor, FieldReader, PollError, Poller, Snapshot},
};

pub enum HandState {
    /// Waiting for the next deal; carries the running low-water mark.
    AwaitingHand(HandBoundary),
    /// Seats dealt into the new hand.
    Dealing(ActivePlayers),
    Round(Box<HandSession>, Street),
    Complete(Box<HandSession>),
}

impl HandState {
    pub fn hand_id(&self) -> Option<u64> {
        match self {
            Self::Round(session, _) | Self::Complete(session) => Some(session.hand_id()),
            Self::AwaitingHand(_) | Self::Dealing(_) => None,
        }
    }
}

impl fmt::Display for HandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingHand(_) => write!(f, "awaiting hand"),
            Self::Dealing(seats) => write!(f, "dealing to {} seats", seats.contesting_count()),
            Self::Round(session, street) => write!(f, "hand {} {street}", session.hand_id()),
            Self::Complete(session) => write!(f, "hand {} complete", session.hand_id()),
        }
    }
}

/// Follows hands on one table and reports each finished hand to a sink.
pub struct HandTracker {
    config: TrackerConfig,
    poller: Poller,
    extractor: Arc<dyn FieldExtractor>,
    sink: Box<dyn HandSink>,
    next_hand_id: u64,
}

impl HandTracker {
    pub fn new(
        config: TrackerConfig,
        poller: Poller,
        extractor: Arc<dyn FieldExtractor>,
        sink: Box<dyn HandSink>,
    ) -> Self {
        Self {
            config,
            poller,
            extractor,
            sink,
            next_hand_id: 1,
        }
    }

    pub fn initial_state(&self) -> HandState {
        HandState::AwaitingHand(HandBoundary::new(self.config.table_size))
    }

    /// Tracks hands until shutdown is requested (`Ok`) or the observer
    /// fails (`Err`). Any other error abandons the current hand only.
    pub async fn run(mut self) -> Result<()> {
        info!(
            "Tracking {} table with {} seats",
            self.config.client, self.config.table_size
        );
        let mut state = self.initial_state();
        loop {
            let hand_id = state.hand_id();
            state = match self.step(state).await {
                Ok(next) => next,
                Err(e) if e.is_cancelled() => {
                    info!("Tracker stopping");
                    return Ok(());
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    match hand_id {
                        Some(id) => error!("Hand {id}: aborted: {e}"),
                        None => error!("Hand aborted before dealing: {e}"),
                    }
                    self.sink.hand_aborted(hand_id, &e);
                    self.initial_state()
                }
            };
        }
    }

    /// Performs one transition.
    pub async fn step(&mut self, state: HandState) -> Result<HandState> {
        debug!("Step: {state}");
        match state {
            HandState::AwaitingHand(boundary) => self.await_hand(boundary).await,
            HandState::Dealing(seats) => self.deal(seats).await,
            HandState::Round(session, street) => self.play_round(session, street).await,
            HandState::Complete(session) => {
                let hand = session.into_hand();
                info!(
                    "Hand {}: complete with {} rounds",
                    hand.hand_id,
                    hand.rounds.len()
                );
                self.sink.hand_completed(&hand);
                Ok(self.initial_state())
            }
        }
    }

    fn reader<'a>(&'a self, snapshot: &'a Snapshot) -> FieldReader<'a> {
        FieldReader::new(self.extractor.as_ref(), snapshot, self.config.table_size)
    }

    async fn latest_or_refresh(&mut self, description: &str) -> Result<Arc<Snapshot>> {
        match self.poller.latest() {
            Some(snapshot) => Ok(snapshot),
            None => Ok(self.poller.refresh(description).await?),
        }
    }

    async fn await_hand(&mut self, mut boundary: HandBoundary) -> Result<HandState> {
        let extractor = Arc::clone(&self.extractor);
        let table_size = self.config.table_size;
        let waited = self
            .poller
            .wait_until("awaiting-hand", |snapshot| {
                let active = FieldReader::new(extractor.as_ref(), snapshot, table_size)
                    .active_seats()
                    .len();
                boundary.observe(active)
            })
            .await;
        match waited {
            Ok(_) => {}
            Err(PollError::Timeout { .. }) => {
                debug!("No new hand yet (low-water mark {})", boundary.lowest());
                return Ok(HandState::AwaitingHand(boundary));
            }
            Err(e) => return Err(e.into()),
        }

        info!("New hand");
        self.poller.pause(self.config.settle_delay()).await?;
        let snapshot = self.poller.refresh("hand-start").await?;
        let seats = ActivePlayers::from_seats(table_size, self.reader(&snapshot).active_seats());
        self.poller.pause(self.config.blind_post_delay()).await?;
        self.poller.refresh("blinds-posted").await?;
        Ok(HandState::Dealing(seats))
    }

    async fn deal(&mut self, seats: ActivePlayers) -> Result<HandState> {
        let hand_id = self.next_hand_id;
        self.next_hand_id += 1;

        let title = self.poller.title().await.unwrap_or_else(|e| {
            warn!("Hand {hand_id}: unable to read table title: {e}");
            String::new()
        });
        let table = Table::from_title(&title, self.config.table_size);
        let snapshot = self.latest_or_refresh("dealing").await?;
        let players =
            read_players(Arc::clone(&self.extractor), &snapshot, self.config.table_size).await;

        let reader = self.reader(&snapshot);
        let button = reader.button();
        if button.is_none() {
            warn!("Hand {hand_id}: unable to get button position");
        }
        let small_blind = button.and_then(|seat| seats.next_active(seat));
        let big_blind = small_blind.and_then(|seat| seats.next_active(seat));
        let this_player = match (self.config.hero(), reader.pocket_cards()) {
            (Some(position), Ok(cards)) => Some(PlayerCards { position, cards }),
            (_, Err(e)) => {
                warn!("Hand {hand_id}: failed to get pocket cards: {e}");
                None
            }
            (None, Ok(_)) => None,
        };
        let first_to_act = big_blind
            .and_then(|seat| seats.next_active(seat))
            .or_else(|| reader.current_actor());

        info!(
            "Hand {hand_id}: button {}, small blind {}, big blind {}",
            describe_seat(button),
            describe_seat(small_blind),
            describe_seat(big_blind)
        );
        let hand = Hand {
            client: self.config.client.clone(),
            table,
            hand_id,
            date: Utc::now(),
            button,
            small_blind,
            big_blind,
            this_player,
            players,
            rounds: Vec::new(),
        };
        let mut session = HandSession::new(hand, seats);
        session.start_betting(first_to_act);
        Ok(HandState::Round(Box::new(session), Street::Preflop))
    }

    async fn play_round(&mut self, mut session: Box<HandSession>, street: Street) -> Result<HandState> {
        let hand_id = session.hand_id();
        let expected = street.expected_cards();
        let extractor = Arc::clone(&self.extractor);
        let table_size = self.config.table_size;
        let description = street.to_string();
        // A board caught mid-deal shows one or two cards; keep polling
        // through those until the count settles.
        let waited = self
            .poller
            .wait_until(&description, |snapshot| {
                let count = FieldReader::new(extractor.as_ref(), snapshot, table_size).community_count();
                count >= expected && VALID_COMMUNITY_COUNTS.contains(&count)
            })
            .await;
        let snapshot = match waited {
            Ok(snapshot) => snapshot,
            Err(e @ PollError::Timeout { .. }) => {
                let stuck = self
                    .poller
                    .latest()
                    .map(|snapshot| self.reader(&snapshot).community_count())
                    .filter(|count| !VALID_COMMUNITY_COUNTS.contains(count));
                return Err(match stuck {
                    Some(found) => StructuralViolation::CommunityCount { street, found }.into(),
                    None => e.into(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let reader = self.reader(&snapshot);
        let found = reader.community_count();
        let cards = match reader.community_cards() {
            Ok(cards) => cards,
            Err(ExtractionError::InvalidCommunityCount(found)) => {
                return Err(StructuralViolation::CommunityCount { street, found }.into());
            }
            Err(e) => {
                warn!("Hand {hand_id}: failed to read the {street} cards: {e}");
                Vec::new()
            }
        };
        if found > expected {
            return Err(StructuralViolation::BoardAhead { street, found }.into());
        }
        let pot = reader.pot().unwrap_or_else(|e| {
            warn!("Hand {hand_id}: failed to get pot: {e}");
            Amount::ZERO
        });
        info!("Hand {hand_id}: {street}, pot {pot}");
        session.open_round(street, cards, pot);

        if session.seats.actable_count() >= 2 && session.seats.contesting_count() > 1 {
            self.run_betting(&mut session).await?;
            let actions = session
                .hand
                .current_round()
                .map_or(0, |round| round.actions.len());
            debug!("Hand {hand_id}: {street} betting closed after {actions} action(s)");
        } else {
            info!(
                "Hand {hand_id}: no betting on the {street}, {} seat(s) can act",
                session.seats.actable_count()
            );
        }

        if session.seats.contesting_count() <= 1 {
            info!("Hand {hand_id}: only one player left");
            return Ok(HandState::Complete(session));
        }
        match street.next() {
            Some(next) => {
                let first_to_act = session
                    .hand
                    .button
                    .and_then(|seat| session.seats.next_active(seat))
                    .or_else(|| {
                        self.poller
                            .latest()
                            .and_then(|snapshot| self.reader(&snapshot).current_actor())
                    });
                session.start_betting(first_to_act);
                Ok(HandState::Round(session, next))
            }
            None => Ok(HandState::Complete(session)),
        }
    }

    async fn run_betting(&mut self, session: &mut HandSession) -> Result<()> {
        while let Some(seat) = session.closure().current() {
            self.take_turn(session, seat).await?;
            if session.seats.contesting_count() <= 1 || session.advance_turn() {
                break;
            }
        }
        Ok(())
    }

    /// Waits for `seat` to finish acting, then records what it did.
    async fn take_turn(&mut self, session: &mut HandSession, seat: Seat) -> Result<()> {
        let hand_id = session.hand_id();
        let extractor = Arc::clone(&self.extractor);
        let table_size = self.config.table_size;
        let snapshot = self
            .poller
            .wait_until("player-action", |snapshot| {
                FieldReader::new(extractor.as_ref(), snapshot, table_size).current_actor() != Some(seat)
            })
            .await?;

        let reader = self.reader(&snapshot);
        let label = reader.action_label(seat).unwrap_or_else(|e| {
            warn!("Hand {hand_id}: seat {seat}: failed to get player action: {e}");
            String::new()
        });
        let observed = match reader.stack(seat) {
            Ok(stack) => Some(stack),
            Err(e) => {
                warn!("Hand {hand_id}: seat {seat}: failed to get stack: {e}");
                None
            }
        };
        match session.apply_turn(seat, &label, observed) {
            Ok(action) => info!(
                "Hand {hand_id}: {action} ({}), stack {}",
                session.hand.player(seat).map_or("", |player| player.name.as_str()),
                session.stack(seat)
            ),
            Err(e) => warn!("Hand {hand_id}: seat {seat}: turn not recorded: {e}"),
        }
        Ok(())
    }
}

/// Reads name and stack of every seat, one blocking task per seat.
async fn read_players(
    extractor: Arc<dyn FieldExtractor>,
    snapshot: &Arc<Snapshot>,
    table_size: usize,
) -> Vec<Player> {
    let tasks: Vec<_> = Seat::ring(table_size)
        .map(|seat| {
            let extractor = Arc::clone(&extractor);
            let snapshot = Arc::clone(snapshot);
            tokio::task::spawn_blocking(move || {
                let reader = FieldReader::new(extractor.as_ref(), &snapshot, table_size);
                read_player(&reader, seat)
            })
        })
        .collect();

    let mut players = vec![Player::default(); table_size];
    for (slot, task) in players.iter_mut().zip(tasks) {
        match task.await {
            Ok(player) => *slot = player,
            Err(e) => error!("Player read task failed: {e}"),
        }
    }
    players
}

fn read_player(reader: &FieldReader<'_>, seat: Seat) -> Player {
    let name = reader.name(seat).unwrap_or_else(|e| {
        debug!("Seat {seat}: {e}");
        String::new()
    });
    let stack = reader.stack(seat).unwrap_or_else(|e| {
        match &e {
            ExtractionError::Missing { .. } => debug!("Seat {seat}: {e}"),
            _ => warn!("Seat {seat}: failed to get stack: {e}"),
        }
        Amount::ZERO
    });
    Player { name, stack }
}

fn describe_seat(seat: Option<Seat>) -> String {
    seat.map_or_else(|| "unknown".to_string(), |seat| seat.to_string())
}
