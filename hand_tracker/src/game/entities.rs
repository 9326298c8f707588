use chrono::{DateTime, Utc};
use log::warn;
use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

use super::constants::{MAX_TABLE_SIZE, NUM_POCKET_CARDS};

/// Type alias for cents. All stacks, bets and pots are tracked in the
/// smallest currency unit so differences stay exact.
pub type Cents = u64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty value")]
    Empty,
    #[error("unrecognized amount {0:?}")]
    Amount(String),
    #[error("unrecognized card {0:?}")]
    Card(String),
    #[error("unrecognized stakes {0:?}")]
    Stakes(String),
}

/// A 1-based seat position on a ring of `table_size` seats.
///
/// Absence of a seat (no button found, no current actor) is expressed with
/// `Option<Seat>` rather than a sentinel value.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Seat(u8);

impl Seat {
    /// Returns the seat at `position` if it lies on a ring of `table_size`.
    pub fn new(position: usize, table_size: usize) -> Option<Self> {
        if table_size > MAX_TABLE_SIZE || !(1..=table_size).contains(&position) {
            return None;
        }
        u8::try_from(position).ok().map(Self)
    }

    pub fn from_index(idx: usize, table_size: usize) -> Option<Self> {
        Self::new(idx + 1, table_size)
    }

    pub const fn position(self) -> usize {
        self.0 as usize
    }

    /// Zero-based offset, handy for indexing per-seat vectors.
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// The seat clockwise of this one, wrapping from the last seat to seat 1.
    #[must_use]
    pub fn next(self, table_size: usize) -> Self {
        if self.position() >= table_size {
            Self(1)
        } else {
            Self(self.0 + 1)
        }
    }

    /// All seats of a table in clockwise order starting from seat 1.
    pub fn ring(table_size: usize) -> impl Iterator<Item = Self> {
        (1..=table_size.min(MAX_TABLE_SIZE)).map(|position| Self(position as u8))
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Self; 4] = [Self::Preflop, Self::Flop, Self::Turn, Self::River];

    pub const fn index(self) -> usize {
        match self {
            Self::Preflop => 0,
            Self::Flop => 1,
            Self::Turn => 2,
            Self::River => 3,
        }
    }

    /// Community cards on the board once this street is dealt.
    pub const fn expected_cards(self) -> usize {
        match self {
            Self::Preflop => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::River => 5,
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Preflop => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::River),
            Self::River => None,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
        };
        write!(f, "{repr}")
    }
}

/// A chip amount as read off the table. The client renders a player that
/// has committed everything as "All In" instead of a number, so that case
/// is carried explicitly instead of being folded into a magic value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Amount {
    Chips(Cents),
    AllIn,
}

impl Amount {
    pub const ZERO: Self = Self::Chips(0);

    pub const fn cents(self) -> Option<Cents> {
        match self {
            Self::Chips(cents) => Some(cents),
            Self::AllIn => None,
        }
    }

    pub const fn is_all_in(self) -> bool {
        matches!(self, Self::AllIn)
    }

    /// Chips moved into the pot between two stack readings.
    ///
    /// Returns `None` when the difference is meaningless: the stack grew
    /// between readings, or the previous reading was already all-in.
    pub fn checked_delta(previous: Self, observed: Self) -> Option<Self> {
        match (previous, observed) {
            (_, Self::AllIn) => Some(Self::AllIn),
            (Self::Chips(previous), Self::Chips(observed)) => {
                previous.checked_sub(observed).map(Self::Chips)
            }
            (Self::AllIn, Self::Chips(_)) => None,
        }
    }

    /// Parses the pot line, where the OCR also reads "5." as "S".
    pub fn parse_pot(s: &str) -> Result<Self, ParseError> {
        s.replace('S', "5.").parse()
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chips(cents) => write!(f, "${}.{:02}", cents / 100, cents % 100),
            Self::AllIn => write!(f, "all-in"),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Chips(cents) => serializer.serialize_f64(*cents as f64 / 100.0),
            Self::AllIn => serializer.serialize_str("allin"),
        }
    }
}

impl FromStr for Amount {
    type Err = ParseError;

    /// Parses the client's rendering of an amount: "$1,234.50", "Pot: $0.15",
    /// "All In". The OCR tends to read "1." as "L", which is undone here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(ParseError::Empty);
        }
        if matches!(compact.to_lowercase().as_str(), "allin" | "all-in") {
            return Ok(Self::AllIn);
        }

        let normalized = compact.replace('L', "1.").to_lowercase().replace(',', "");
        let digits = normalized
            .trim_start_matches("pot:")
            .trim_start_matches(['$', '€', '£']);
        let malformed = || ParseError::Amount(s.to_string());

        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        let is_numeric = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty())
            || fraction.len() > 2
            || !is_numeric(whole)
            || !is_numeric(fraction)
        {
            return Err(malformed());
        }

        let whole: Cents = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| malformed())?
        };
        let fraction: Cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<Cents>().map_err(|_| malformed())? * 10,
            _ => fraction.parse().map_err(|_| malformed())?,
        };
        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Self::Chips)
            .ok_or_else(malformed)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'c' => Some(Self::Club),
            's' => Some(Self::Spade),
            'd' => Some(Self::Diamond),
            'h' => Some(Self::Heart),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "c",
            Self::Spade => "s",
            Self::Diamond => "d",
            Self::Heart => "h",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values.
pub type Value = u8;

/// A card is a tuple of a value (deuce=2u8 ... ace=14u8) and a suit.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card(pub Value, pub Suit);

impl Card {
    /// Builds a card from the raw labels the vision layer reports for a card
    /// slot. Value labels carry a three character prefix ("valA", "val10")
    /// and colour labels are suit names ("hearts").
    pub fn from_labels(value: &str, color: &str) -> Result<Self, ParseError> {
        let value = value.trim();
        let rank = value.get(3..).unwrap_or_default();
        let suit = color.trim().chars().next().unwrap_or_default();
        format!("{rank}{suit}")
            .parse()
            .map_err(|_| ParseError::Card(format!("{value}/{}", color.trim())))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            14 => "A",
            13 => "K",
            12 => "Q",
            11 => "J",
            10 => "T",
            v => &v.to_string(),
        };
        write!(f, "{value}{}", self.1)
    }
}

impl FromStr for Card {
    type Err = ParseError;

    /// Parses short card notation such as "Ah", "Td" or "10s".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ParseError::Card(s.to_string());
        let suit = s.chars().last().and_then(Suit::from_char).ok_or_else(invalid)?;
        let value = match s[..s.len() - 1].to_ascii_uppercase().as_str() {
            "A" => 14,
            "K" => 13,
            "Q" => 12,
            "J" => 11,
            "T" | "10" => 10,
            digit => match digit.parse::<Value>() {
                Ok(v @ 2..=9) => v,
                _ => return Err(invalid()),
            },
        };
        Ok(Self(value, suit))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Stakes {
    pub small: Amount,
    pub big: Amount,
}

impl fmt::Display for Stakes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.small, self.big)
    }
}

impl FromStr for Stakes {
    type Err = ParseError;

    /// Parses "$0.01/$0.02 USD" style stakes; the currency suffix is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Stakes(s.to_string());
        let blinds = s.split_whitespace().next().ok_or(ParseError::Empty)?;
        let (small, big) = blinds.split_once('/').ok_or_else(invalid)?;
        let small: Amount = small.parse().map_err(|_| invalid())?;
        let big: Amount = big.parse().map_err(|_| invalid())?;
        if small.is_all_in() || big.is_all_in() {
            return Err(invalid());
        }
        Ok(Self { small, big })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Game {
    NoLimitHoldem,
    PotLimitHoldem,
    FixedLimitHoldem,
    PotLimitOmaha,
    Other(String),
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::NoLimitHoldem => "No Limit Hold'em",
            Self::PotLimitHoldem => "Pot Limit Hold'em",
            Self::FixedLimitHoldem => "Fixed Limit Hold'em",
            Self::PotLimitOmaha => "Pot Limit Omaha",
            Self::Other(name) => name,
        };
        write!(f, "{repr}")
    }
}

impl From<&str> for Game {
    fn from(value: &str) -> Self {
        let key: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "nolimitholdem" | "nlhe" => Self::NoLimitHoldem,
            "potlimitholdem" | "plhe" => Self::PotLimitHoldem,
            "fixedlimitholdem" | "limitholdem" | "flhe" => Self::FixedLimitHoldem,
            "potlimitomaha" | "plo" => Self::PotLimitOmaha,
            _ => Self::Other(value.trim().to_string()),
        }
    }
}

impl Serialize for Game {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Table descriptor as recovered from the client's window title.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub stakes: Option<Stakes>,
    pub game: Option<Game>,
    pub size: usize,
}

impl Table {
    /// Splits a title of the form "Name - $0.01/$0.02 USD - No Limit Hold'em".
    /// Pieces that cannot be recognized are logged and left empty.
    pub fn from_title(title: &str, size: usize) -> Self {
        let mut parts = title.split(" - ").map(str::trim);
        let name = parts.next().unwrap_or_default().to_string();
        let stakes = parts.next().and_then(|stakes| match stakes.parse() {
            Ok(stakes) => Some(stakes),
            Err(error) => {
                warn!("unable to read table stakes: {error}");
                None
            }
        });
        let game = parts
            .next()
            .filter(|game| !game.is_empty())
            .map(Game::from);
        if name.is_empty() {
            warn!("table title {title:?} carries no table name");
        }
        Self {
            name,
            stakes,
            game,
            size,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Player {
    pub name: String,
    pub stack: Amount,
}

/// The hero's hole cards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlayerCards {
    pub position: Seat,
    pub cards: [Card; NUM_POCKET_CARDS],
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Fold,
    Check,
    Call { amount: Amount },
    Bet { amount: Amount },
    Raise { amount: Amount },
}

impl Action {
    pub const fn amount(&self) -> Option<Amount> {
        match self {
            Self::Fold | Self::Check => None,
            Self::Call { amount } | Self::Bet { amount } | Self::Raise { amount } => Some(*amount),
        }
    }

    /// Bets and raises reopen the action for everybody else.
    pub const fn is_aggressive(&self) -> bool {
        matches!(self, Self::Bet { .. } | Self::Raise { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Fold => write!(f, "folds"),
            Self::Check => write!(f, "checks"),
            Self::Call { amount } => write!(f, "calls {amount}"),
            Self::Bet { amount } => write!(f, "bets {amount}"),
            Self::Raise { amount } => write!(f, "raises {amount}"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PlayerAction {
    pub position: Seat,
    pub action: Action,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {} {}", self.position, self.action)
    }
}

/// One street of betting. The street itself is implied by the position of
/// the round in [`Hand::rounds`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Round {
    #[serde(skip)]
    pub street: Street,
    pub cards: Vec<Card>,
    pub pot: Amount,
    pub actions: Vec<PlayerAction>,
}

impl Round {
    pub fn new(street: Street, cards: Vec<Card>, pot: Amount) -> Self {
        Self {
            street,
            cards,
            pot,
            actions: Vec::new(),
        }
    }
}

/// A completed hand record, serialized as the tracker's JSON output.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
    pub client: String,
    pub table: Table,
    pub hand_id: u64,
    pub date: DateTime<Utc>,
    pub button: Option<Seat>,
    pub small_blind: Option<Seat>,
    pub big_blind: Option<Seat>,
    pub this_player: Option<PlayerCards>,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
}

impl Hand {
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    pub fn current_round_mut(&mut self) -> Option<&mut Round> {
        self.rounds.last_mut()
    }

    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.get(seat.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_next_wraps() {
        let last = Seat::new(6, 6).unwrap();
        assert_eq!(last.next(6), Seat::new(1, 6).unwrap());
        assert_eq!(Seat::new(3, 6).unwrap().next(6).position(), 4);
    }

    #[test]
    fn test_seat_out_of_range() {
        assert!(Seat::new(0, 6).is_none());
        assert!(Seat::new(7, 6).is_none());
        assert!(Seat::new(1, MAX_TABLE_SIZE + 1).is_none());
    }

    #[test]
    fn test_seat_ring_order() {
        let positions: Vec<usize> = Seat::ring(4).map(Seat::position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_street_expected_cards() {
        let expected: Vec<usize> = Street::ALL.iter().map(|s| s.expected_cards()).collect();
        assert_eq!(expected, vec![0, 3, 4, 5]);
        assert_eq!(Street::River.next(), None);
    }

    #[test]
    fn test_amount_parse_plain() {
        assert_eq!("1.95".parse::<Amount>(), Ok(Amount::Chips(195)));
        assert_eq!("$2".parse::<Amount>(), Ok(Amount::Chips(200)));
        assert_eq!("$0.5".parse::<Amount>(), Ok(Amount::Chips(50)));
    }

    #[test]
    fn test_amount_parse_pot_and_separators() {
        assert_eq!("Pot: $1,234.56".parse::<Amount>(), Ok(Amount::Chips(123_456)));
        assert_eq!(" $ 3.00 ".parse::<Amount>(), Ok(Amount::Chips(300)));
    }

    #[test]
    fn test_amount_parse_ocr_quirk() {
        assert_eq!("$L25".parse::<Amount>(), Ok(Amount::Chips(125)));
    }

    #[test]
    fn test_pot_parse_ocr_quirk() {
        assert_eq!(Amount::parse_pot("Pot: $S50"), Ok(Amount::Chips(550)));
        assert_eq!(Amount::parse_pot("$S"), Ok(Amount::Chips(500)));
        assert_eq!("$S50".parse::<Amount>(), Err(ParseError::Amount("$S50".to_string())));
        assert_eq!(Amount::parse_pot("Pot: $0.15"), Ok(Amount::Chips(15)));
    }

    #[test]
    fn test_amount_parse_all_in() {
        assert_eq!("All In".parse::<Amount>(), Ok(Amount::AllIn));
        assert_eq!("ALL-IN".parse::<Amount>(), Ok(Amount::AllIn));
        assert_eq!("allin".parse::<Amount>(), Ok(Amount::AllIn));
    }

    #[test]
    fn test_amount_parse_rejects_garbage() {
        assert_eq!("".parse::<Amount>(), Err(ParseError::Empty));
        assert!("Sitting Out".parse::<Amount>().is_err());
        assert!("1.234".parse::<Amount>().is_err());
        assert!(".".parse::<Amount>().is_err());
    }

    #[test]
    fn test_amount_delta() {
        let delta = Amount::checked_delta(Amount::Chips(500), Amount::Chips(200));
        assert_eq!(delta, Some(Amount::Chips(300)));
        assert_eq!(
            Amount::checked_delta(Amount::Chips(500), Amount::AllIn),
            Some(Amount::AllIn)
        );
        assert_eq!(Amount::checked_delta(Amount::Chips(100), Amount::Chips(200)), None);
        assert_eq!(Amount::checked_delta(Amount::AllIn, Amount::Chips(200)), None);
    }

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::Chips(305).to_string(), "$3.05");
        assert_eq!(Amount::AllIn.to_string(), "all-in");
    }

    #[test]
    fn test_card_parse_and_display() {
        let card: Card = "Ah".parse().unwrap();
        assert_eq!(card, Card(14, Suit::Heart));
        assert_eq!(card.to_string(), "Ah");
        assert_eq!("10s".parse::<Card>().unwrap().to_string(), "Ts");
        assert!("1h".parse::<Card>().is_err());
        assert!("Ax".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn test_card_from_labels() {
        assert_eq!(Card::from_labels("valK", "spades"), Ok(Card(13, Suit::Spade)));
        assert_eq!(Card::from_labels("val10", "diamonds"), Ok(Card(10, Suit::Diamond)));
        assert!(Card::from_labels("", "hearts").is_err());
    }

    #[test]
    fn test_stakes_parse() {
        let stakes: Stakes = "$0.01/$0.02 USD".parse().unwrap();
        assert_eq!(stakes.small, Amount::Chips(1));
        assert_eq!(stakes.big, Amount::Chips(2));
        assert!("0.01".parse::<Stakes>().is_err());
    }

    #[test]
    fn test_game_from_label() {
        assert_eq!(Game::from("No Limit Hold'em"), Game::NoLimitHoldem);
        assert_eq!(Game::from("Pot Limit Omaha"), Game::PotLimitOmaha);
        assert_eq!(Game::from("Razz"), Game::Other("Razz".to_string()));
    }

    #[test]
    fn test_table_from_title() {
        let table = Table::from_title("Halley - $0.01/$0.02 USD - No Limit Hold'em", 6);
        assert_eq!(table.name, "Halley");
        assert_eq!(table.stakes.map(|s| s.big), Some(Amount::Chips(2)));
        assert_eq!(table.game, Some(Game::NoLimitHoldem));
        assert_eq!(table.size, 6);
    }

    #[test]
    fn test_table_from_partial_title() {
        let table = Table::from_title("Halley", 6);
        assert_eq!(table.name, "Halley");
        assert!(table.stakes.is_none());
        assert!(table.game.is_none());
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::Raise {
            amount: Amount::Chips(300),
        };
        let json = serde_json::to_value(action).unwrap();
        assert_eq!(json, serde_json::json!({"type": "raise", "amount": 3.0}));

        let json = serde_json::to_value(Action::Fold).unwrap();
        assert_eq!(json, serde_json::json!({"type": "fold"}));

        let json = serde_json::to_value(Action::Call {
            amount: Amount::AllIn,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"type": "call", "amount": "allin"}));
    }

    #[test]
    fn test_hand_serialization_field_names() {
        let seat = |p| Seat::new(p, 6);
        let hand = Hand {
            client: "PokerStars".to_string(),
            table: Table::from_title("Halley - $0.01/$0.02 USD - No Limit Hold'em", 6),
            hand_id: 7,
            date: Utc::now(),
            button: None,
            small_blind: seat(1),
            big_blind: seat(2),
            this_player: Some(PlayerCards {
                position: Seat::new(4, 6).unwrap(),
                cards: [Card(14, Suit::Heart), Card(13, Suit::Heart)],
            }),
            players: vec![Player::default(); 6],
            rounds: vec![Round::new(Street::Preflop, vec![], Amount::Chips(3))],
        };
        let json = serde_json::to_value(&hand).unwrap();
        assert_eq!(json["handId"], 7);
        assert!(json["button"].is_null());
        assert_eq!(json["smallBlind"], 1);
        assert_eq!(json["bigBlind"], 2);
        assert_eq!(json["thisPlayer"]["cards"], serde_json::json!(["Ah", "Kh"]));
        assert_eq!(json["table"]["stakes"]["small"], 0.01);
        assert_eq!(json["table"]["game"], "No Limit Hold'em");
        assert!(json["rounds"][0].get("street").is_none());
        assert_eq!(json["rounds"][0]["pot"], 0.03);
    }

    #[test]
    fn test_hand_lookups() {
        let mut hand = Hand {
            client: "PokerStars".to_string(),
            table: Table::default(),
            hand_id: 1,
            date: Utc::now(),
            button: None,
            small_blind: None,
            big_blind: None,
            this_player: None,
            players: vec![
                Player {
                    name: "alice".to_string(),
                    stack: Amount::Chips(200),
                },
                Player::default(),
            ],
            rounds: Vec::new(),
        };
        let first = Seat::new(1, 2).unwrap();
        assert_eq!(hand.player(first).map(|p| p.name.as_str()), Some("alice"));
        assert!(hand.current_round().is_none());

        hand.rounds.push(Round::new(Street::Preflop, vec![], Amount::ZERO));
        hand.rounds.push(Round::new(Street::Flop, vec![], Amount::Chips(30)));
        assert_eq!(hand.current_round().map(|r| r.pot), Some(Amount::Chips(30)));
    }

    #[test]
    fn test_only_bets_and_raises_are_aggressive() {
        let amount = Amount::Chips(10);
        assert!(Action::Bet { amount }.is_aggressive());
        assert!(Action::Raise { amount }.is_aggressive());
        assert!(!Action::Call { amount }.is_aggressive());
        assert!(!Action::Check.is_aggressive());
        assert!(!Action::Fold.is_aggressive());
    }
}
