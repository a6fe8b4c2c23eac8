//! Setup-time errors.
//!
//! Only conditions that stop a game from *starting* are errors. Once a game
//! is running, a missing or illegal move is an ordinary outcome and is
//! reported through [`crate::engine::LossReason`].

use thiserror::Error;

use super::card::Card;

/// Inconsistent or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("row count must be positive and even (got {0})")]
    RowCount(usize),
    #[error("hand size must be positive")]
    ZeroHandSize,
    #[error("cards per turn must be positive")]
    ZeroCardsPerTurn,
    #[error("player count must be in 1..=255 (got {0})")]
    PlayerCount(usize),
    #[error("max card must be at least 3 (got {0})")]
    MaxCardTooSmall(Card),
    #[error("max card {max_card} with reverse difference {reverse_diff} overflows card arithmetic")]
    MaxCardTooLarge { max_card: Card, reverse_diff: Card },
    #[error("hand size {hand_size} is smaller than cards per turn {cards_per_turn}")]
    HandSmallerThanTurn {
        hand_size: usize,
        cards_per_turn: usize,
    },
    #[error("reverse difference must be positive (got {0})")]
    ReverseDiff(Card),
    #[error("good hint gap {good} exceeds bad hint gap {bad}")]
    HintGaps { good: Card, bad: Card },
    #[error("invalid value {value} for {key}")]
    InvalidValue { key: String, value: i64 },
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The caller-supplied starting table is not a valid card population.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("card {card} is outside the playable range [2, {max})")]
    CardOutOfRange { card: Card, max: Card },
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("expected {expected} hands, got {got}")]
    HandCount { expected: usize, got: usize },
    #[error("field has {got} rows, config expects {expected}")]
    RowCount { expected: usize, got: usize },
}

/// Anything that prevents a game or simulation from being set up.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
}
