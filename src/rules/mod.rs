//! Table rules: the playing field and move legality.
//!
//! - `field`: rows, their directions and seeds, and the field that owns them
//! - `legality`: the pure oracle deciding whether a card fits on a row

pub mod field;
pub mod legality;

pub use field::{Direction, EmptyRowError, PlayingField, Row, ASCENDING_SEED};
pub use legality::{MoveOracle, MoveValidity};
