use std::{fmt, str::FromStr};

use super::{FieldExtractor, Snapshot, errors::ExtractionError};
use crate::game::{
    constants::{MAX_COMMUNITY_CARDS, NUM_POCKET_CARDS, VALID_COMMUNITY_COUNTS},
    entities::{Amount, Card, Seat},
};

/// Named regions of the table the extractor knows how to read.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    Pot,
    Name(Seat),
    Stack(Seat),
    Action(Seat),
    /// Non-empty while the seat holds cards.
    Active(Seat),
    /// Non-empty while the seat is the one to act.
    Current(Seat),
    /// Non-empty on the seat holding the dealer button.
    Button(Seat),
    PocketValue(usize),
    PocketColor(usize),
    CommunityValue(usize),
    CommunityColor(usize),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pot => write!(f, "pot"),
            Self::Name(seat) => write!(f, "plName{}", seat.index()),
            Self::Stack(seat) => write!(f, "plStack{}", seat.index()),
            Self::Action(seat) => write!(f, "plAction{}", seat.index()),
            Self::Active(seat) => write!(f, "plActive{}", seat.index()),
            Self::Current(seat) => write!(f, "plCurrent{}", seat.index()),
            Self::Button(seat) => write!(f, "button{}", seat.index()),
            Self::PocketValue(idx) => write!(f, "pocketValue{idx}"),
            Self::PocketColor(idx) => write!(f, "pocketColor{idx}"),
            Self::CommunityValue(idx) => write!(f, "commValue{idx}"),
            Self::CommunityColor(idx) => write!(f, "commColor{idx}"),
        }
    }
}

/// Typed access to the fields of a single snapshot.
pub struct FieldReader<'a> {
    extractor: &'a dyn FieldExtractor,
    snapshot: &'a Snapshot,
    table_size: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(extractor: &'a dyn FieldExtractor, snapshot: &'a Snapshot, table_size: usize) -> Self {
        Self {
            extractor,
            snapshot,
            table_size,
        }
    }

    pub fn raw(&self, field: Field) -> String {
        self.extractor.extract(&field.to_string(), self.snapshot)
    }

    fn is_set(&self, field: Field) -> bool {
        !self.raw(field).trim().is_empty()
    }

    fn required(&self, field: Field) -> Result<String, ExtractionError> {
        let value = self.raw(field);
        let value = value.trim();
        if value.is_empty() {
            return Err(ExtractionError::Missing {
                field: field.to_string(),
            });
        }
        Ok(value.to_string())
    }

    fn parsed<T: FromStr>(&self, field: Field) -> Result<T, ExtractionError> {
        let value = self.required(field)?;
        value.parse().map_err(|_| ExtractionError::Malformed {
            field: field.to_string(),
            value,
        })
    }

    pub fn pot(&self) -> Result<Amount, ExtractionError> {
        let value = self.required(Field::Pot)?;
        Amount::parse_pot(&value).map_err(|_| ExtractionError::Malformed {
            field: Field::Pot.to_string(),
            value,
        })
    }

    pub fn stack(&self, seat: Seat) -> Result<Amount, ExtractionError> {
        self.parsed(Field::Stack(seat))
    }

    pub fn name(&self, seat: Seat) -> Result<String, ExtractionError> {
        self.required(Field::Name(seat))
    }

    /// The decision label shown for a seat. Some layouts print the action
    /// in place of the player name, so the name region is the fallback.
    pub fn action_label(&self, seat: Seat) -> Result<String, ExtractionError> {
        self.required(Field::Action(seat))
            .or_else(|_| self.required(Field::Name(seat)))
    }

    /// Seats currently holding cards.
    pub fn active_seats(&self) -> Vec<Seat> {
        Seat::ring(self.table_size)
            .filter(|seat| self.is_set(Field::Active(*seat)))
            .collect()
    }

    pub fn button(&self) -> Option<Seat> {
        Seat::ring(self.table_size).find(|seat| self.is_set(Field::Button(*seat)))
    }

    /// The seat whose turn the client is highlighting, if any.
    pub fn current_actor(&self) -> Option<Seat> {
        Seat::ring(self.table_size).find(|seat| self.is_set(Field::Current(*seat)))
    }

    fn card(&self, value: Field, color: Field) -> Result<Card, ExtractionError> {
        let value_label = self.required(value)?;
        let color_label = self.required(color)?;
        Card::from_labels(&value_label, &color_label).map_err(|_| ExtractionError::Malformed {
            field: value.to_string(),
            value: format!("{value_label}/{color_label}"),
        })
    }

    pub fn pocket_cards(&self) -> Result<[Card; NUM_POCKET_CARDS], ExtractionError> {
        let first = self.card(Field::PocketValue(0), Field::PocketColor(0))?;
        let second = self.card(Field::PocketValue(1), Field::PocketColor(1))?;
        Ok([first, second])
    }

    /// Number of board slots showing a card, without parsing them.
    pub fn community_count(&self) -> usize {
        (0..MAX_COMMUNITY_CARDS)
            .take_while(|idx| {
                self.is_set(Field::CommunityValue(*idx)) && self.is_set(Field::CommunityColor(*idx))
            })
            .count()
    }

    pub fn community_cards(&self) -> Result<Vec<Card>, ExtractionError> {
        let count = self.community_count();
        if !VALID_COMMUNITY_COUNTS.contains(&count) {
            return Err(ExtractionError::InvalidCommunityCount(count));
        }
        (0..count)
            .map(|idx| self.card(Field::CommunityValue(idx), Field::CommunityColor(idx)))
            .collect()
    }
}
