/// Seats at a standard six-max table.
pub const DEFAULT_TABLE_SIZE: usize = 6;
/// Largest ring the seat arithmetic supports.
pub const MAX_TABLE_SIZE: usize = 10;
/// Smallest table that still forms a hand.
pub const MIN_TABLE_SIZE: usize = 2;

/// Hole cards dealt to each player.
pub const NUM_POCKET_CARDS: usize = 2;
/// Board slots on the table.
pub const MAX_COMMUNITY_CARDS: usize = 5;
/// Board sizes a legitimate table can show.
pub const VALID_COMMUNITY_COUNTS: [usize; 4] = [0, 3, 4, 5];

pub const DEFAULT_CLIENT: &str = "PokerStars";
/// Seat the hero sits in when nothing else is configured.
pub const DEFAULT_HERO_SEAT: usize = 4;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
/// Wait after a hand boundary before the hand-start snapshot.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;
/// Wait after the hand-start snapshot so the blinds are posted.
pub const DEFAULT_BLIND_POST_DELAY_MS: u64 = 1000;
pub const DEFAULT_MAX_WAIT_SECS: u64 = 300;
