//! Game execution: the turn state machine and its result.

pub mod outcome;
pub mod turn;

pub use outcome::{GameOutcome, LossReason, MoveRecord, Violation};
pub use turn::{Phase, TurnEngine};
