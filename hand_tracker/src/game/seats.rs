use serde::Serialize;

use super::entities::Seat;

/// How a dealt-in seat stands in the current hand.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum SeatStatus {
    /// Still has decisions to make.
    Active,
    /// Committed everything; contests the pot without acting again.
    AllIn,
    Folded,
}

/// The seats dealt into the current hand, keyed by table position.
///
/// Seats that were never dealt in are simply absent. Folded seats are kept
/// so a fold is only ever applied once.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActivePlayers {
    statuses: Vec<Option<SeatStatus>>,
}

impl ActivePlayers {
    pub fn new(table_size: usize) -> Self {
        Self {
            statuses: vec![None; table_size],
        }
    }

    pub fn from_seats(table_size: usize, seats: impl IntoIterator<Item = Seat>) -> Self {
        let mut players = Self::new(table_size);
        players.resync(seats);
        players
    }

    pub fn table_size(&self) -> usize {
        self.statuses.len()
    }

    /// Replaces the whole set with the seats currently holding cards.
    pub fn resync(&mut self, seats: impl IntoIterator<Item = Seat>) {
        self.statuses.fill(None);
        for seat in seats {
            if let Some(status) = self.statuses.get_mut(seat.index()) {
                *status = Some(SeatStatus::Active);
            }
        }
    }

    pub fn status(&self, seat: Seat) -> Option<SeatStatus> {
        self.statuses.get(seat.index()).copied().flatten()
    }

    /// Folds a seat out of the hand. Returns whether anything changed.
    pub fn remove(&mut self, seat: Seat) -> bool {
        match self.statuses.get_mut(seat.index()) {
            Some(status @ Some(SeatStatus::Active | SeatStatus::AllIn)) => {
                *status = Some(SeatStatus::Folded);
                true
            }
            _ => false,
        }
    }

    /// Marks an acting seat as all-in. Returns whether anything changed.
    pub fn mark_all_in(&mut self, seat: Seat) -> bool {
        match self.statuses.get_mut(seat.index()) {
            Some(status @ Some(SeatStatus::Active)) => {
                *status = Some(SeatStatus::AllIn);
                true
            }
            _ => false,
        }
    }

    /// Whether the seat still contests the pot.
    pub fn contains(&self, seat: Seat) -> bool {
        matches!(
            self.status(seat),
            Some(SeatStatus::Active | SeatStatus::AllIn)
        )
    }

    /// Whether the seat can still make a decision.
    pub fn can_act(&self, seat: Seat) -> bool {
        self.status(seat) == Some(SeatStatus::Active)
    }

    /// First seat clockwise of `from` that can still act.
    ///
    /// The scan covers the whole ring, so `from` itself is the last
    /// candidate. All-in and folded seats are skipped.
    pub fn next_active(&self, from: Seat) -> Option<Seat> {
        let table_size = self.table_size();
        let mut seat = from;
        for _ in 0..table_size {
            seat = seat.next(table_size);
            if self.can_act(seat) {
                return Some(seat);
            }
        }
        None
    }

    pub fn contesting(&self) -> impl Iterator<Item = Seat> + '_ {
        Seat::ring(self.table_size()).filter(|seat| self.contains(*seat))
    }

    pub fn contesting_count(&self) -> usize {
        self.contesting().count()
    }

    pub fn actable_count(&self) -> usize {
        Seat::ring(self.table_size())
            .filter(|seat| self.can_act(*seat))
            .count()
    }
}
