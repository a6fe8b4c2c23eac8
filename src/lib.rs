//! # thegame-sim
//!
//! A simulator for "The Game", the cooperative card game where players build
//! shared ascending and descending rows and win only by emptying every hand
//! and the deck.
//!
//! ## Design Principles
//!
//! 1. **N-Player First**: Every API takes `player_count` from the config.
//!    Nothing assumes a solo table.
//!
//! 2. **Strategies Are Pluggable**: The engine knows nothing about any
//!    heuristic. Strategies see a hand snapshot, the field, and public hints,
//!    and the engine re-validates whatever they answer.
//!
//! 3. **Deterministic**: All randomness flows from a seed through `GameRng`,
//!    so a simulation run can be replayed exactly.
//!
//! ## Modules
//!
//! - `core`: Cards, deck, players, RNG, configuration, errors
//! - `rules`: Rows, the playing field, move legality
//! - `comms`: Hints broadcast between players
//! - `strategy`: The strategy interface, built-in heuristics, registry
//! - `engine`: The turn state machine and game outcomes
//! - `sim`: Batches of games and their reports

pub mod comms;
pub mod core;
pub mod engine;
pub mod rules;
pub mod sim;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    Card, Deck, GameConfig, GameRng,
    ConfigError, GameError, SetupError,
    Player, PlayerId, PlayerMap,
};

pub use crate::rules::{Direction, MoveOracle, MoveValidity, PlayingField, Row};

pub use crate::comms::{Communication, HintKind, Hints, LastPlay, SignalProtocol};

pub use crate::strategy::{DecisionView, FnStrategy, Move, Strategy, StrategyRegistry};

pub use crate::engine::{GameOutcome, LossReason, MoveRecord, Phase, TurnEngine, Violation};

pub use crate::sim::{GameRecord, Simulation, SimulationReport, StrategySummary};
