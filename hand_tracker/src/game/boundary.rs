/// Detects the start of a new hand from the number of seats holding cards.
///
/// Between hands the count drops as players fold and cards are mucked; when
/// the next hand is dealt it rises again. The detector tracks the lowest
/// count seen and fires on the first reading above it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HandBoundary {
    lowest: usize,
}

impl HandBoundary {
    pub fn new(table_size: usize) -> Self {
        Self { lowest: table_size }
    }

    pub fn lowest(&self) -> usize {
        self.lowest
    }

    /// Feeds one reading; returns `true` once a new hand has been dealt.
    pub fn observe(&mut self, active: usize) -> bool {
        if active < self.lowest {
            self.lowest = active;
            return false;
        }
        active > self.lowest
    }
}
