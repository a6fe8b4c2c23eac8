//! Core types: cards, deck, players, RNG, configuration, errors.

pub mod card;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use card::{Card, Deck, MIN_CARD};
pub use config::GameConfig;
pub use error::{ConfigError, GameError, SetupError};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::GameRng;
