//! Move-selection strategies.
//!
//! - [`traits`]: the [`Strategy`] trait and the [`DecisionView`] it sees
//! - [`heuristics`]: the built-in choosers
//! - [`registry`]: lookup by stable name

pub mod heuristics;
pub mod registry;
pub mod traits;

pub use registry::StrategyRegistry;
pub use traits::{Candidate, DecisionView, FnStrategy, Move, Strategy};
