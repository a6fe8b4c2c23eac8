//! Inter-player signalling.
//!
//! Players never see each other's hands. Instead, before every decision the
//! [`SignalProtocol`] turns the full table into a small set of public
//! [`Communication`]s that strategies may use as soft tie-breaks. Legality
//! is never taken from hints; it is always re-derived from the live field.

pub mod hint;
pub mod protocol;

pub use hint::{Communication, HintKind, Hints};
pub use protocol::{LastPlay, SignalProtocol};
