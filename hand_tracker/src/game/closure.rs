use super::{entities::Seat, seats::ActivePlayers};

/// Tracks whose turn it is within a betting round and when the round ends.
///
/// The round closes once the action comes back around to the last
/// aggressor (the "better"), or to the first actor if nobody bet.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RoundClosure {
    better: Option<Seat>,
    current: Option<Seat>,
}

impl RoundClosure {
    /// Starts a round where `first` acts first. Until someone bets the
    /// first actor doubles as the better.
    pub fn start(first: Option<Seat>) -> Self {
        Self {
            better: first,
            current: first,
        }
    }

    pub fn better(&self) -> Option<Seat> {
        self.better
    }

    pub fn current(&self) -> Option<Seat> {
        self.current
    }

    pub fn set_better(&mut self, seat: Seat) {
        self.better = Some(seat);
    }

    /// Moves the turn to the next seat that can act and reports whether the
    /// betting round is over.
    ///
    /// The round closes when nobody can act, when the turn lands on the
    /// better, or when the turn passes over the better on its way around
    /// the ring (the better went all-in or folded).
    pub fn advance(&mut self, players: &ActivePlayers) -> bool {
        let Some(previous) = self.current else {
            return true;
        };
        let table_size = players.table_size();
        self.current = players.next_active(previous);

        let (Some(current), Some(better)) = (self.current, self.better) else {
            return true;
        };
        if current == better {
            return true;
        }

        let mut seat = previous.next(table_size);
        for _ in 0..table_size {
            if seat == current {
                break;
            }
            if seat == better {
                return true;
            }
            seat = seat.next(table_size);
        }
        false
    }
}
