use log::warn;

use crate::game::{
    classifier::{ClassifyError, classify},
    closure::RoundClosure,
    entities::{Action, Amount, Card, Hand, PlayerAction, Round, Seat, Street},
    seats::ActivePlayers,
};

/// Everything the tracker knows about the hand in progress.
///
/// A session is created when a hand is dealt and consumed when the hand is
/// emitted or aborted, so nothing leaks from one hand into the next.
#[derive(Clone, Debug)]
pub struct HandSession {
    pub hand: Hand,
    pub seats: ActivePlayers,
    stacks: Vec<Amount>,
    closure: RoundClosure,
}

impl HandSession {
    /// Starts a session. The per-seat stack references begin at the
    /// starting stacks recorded in the hand.
    pub fn new(hand: Hand, seats: ActivePlayers) -> Self {
        let mut stacks: Vec<Amount> = hand.players.iter().map(|p| p.stack).collect();
        stacks.resize(seats.table_size(), Amount::ZERO);
        Self {
            hand,
            seats,
            stacks,
            closure: RoundClosure::default(),
        }
    }

    pub fn hand_id(&self) -> u64 {
        self.hand.hand_id
    }

    /// Last stack reading for `seat`.
    pub fn stack(&self, seat: Seat) -> Amount {
        self.stacks.get(seat.index()).copied().unwrap_or_default()
    }

    pub fn closure(&self) -> &RoundClosure {
        &self.closure
    }

    /// Resets turn tracking so `first` acts first in the next round.
    pub fn start_betting(&mut self, first: Option<Seat>) {
        self.closure = RoundClosure::start(first);
    }

    pub fn open_round(&mut self, street: Street, cards: Vec<Card>, pot: Amount) {
        self.hand.rounds.push(Round::new(street, cards, pot));
    }

    /// Records the outcome of `seat`'s turn.
    ///
    /// `observed` is the stack read after the turn, `None` if it could not
    /// be read (the previous reading then stands). The stack reference is
    /// updated even when the label is not recognized, so the next delta
    /// for this seat is measured from what the table showed last.
    pub fn apply_turn(
        &mut self,
        seat: Seat,
        label: &str,
        observed: Option<Amount>,
    ) -> Result<PlayerAction, ClassifyError> {
        let previous = self.stack(seat);
        let observed = observed.unwrap_or(previous);
        let classified = classify(label, previous, observed);
        if let Some(stack) = self.stacks.get_mut(seat.index()) {
            *stack = observed;
        }
        let action = classified?;

        if action == Action::Fold {
            self.seats.remove(seat);
        } else if action.is_aggressive() {
            self.closure.set_better(seat);
        }
        if action.amount().is_some_and(Amount::is_all_in) {
            self.seats.mark_all_in(seat);
        }

        let player_action = PlayerAction {
            position: seat,
            action,
        };
        match self.hand.current_round_mut() {
            Some(round) => round.actions.push(player_action),
            None => warn!(
                "Hand {}: {} before any round was opened",
                self.hand_id(),
                player_action
            ),
        }
        Ok(player_action)
    }

    /// Passes the turn on; returns `true` when the betting round is over.
    pub fn advance_turn(&mut self) -> bool {
        self.closure.advance(&self.seats)
    }

    pub fn into_hand(self) -> Hand {
        self.hand
    }
}
