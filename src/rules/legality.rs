//! Move legality.
//!
//! A card may go on an ascending row if it is higher than the top, and on a
//! descending row if it is lower. The single exception is the reverse move:
//! a card exactly `reverse_diff` *below* an ascending top (or *above* a
//! descending top) may be played against the row's direction.
//!
//! Legality is always evaluated against the row's current top. To judge a
//! hypothetical move, evaluate against a copy of the row with the
//! hypothetical card appended (see [`Row::with_card`](super::Row::with_card)).

use serde::{Deserialize, Serialize};

use super::field::{Direction, Row};
use crate::core::Card;

/// Result of checking one card against one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveValidity {
    /// Ordinary move in the row's direction.
    Yes,
    /// Jump of exactly `reverse_diff` against the row's direction.
    ReverseMove,
    /// Not allowed.
    No,
}

impl MoveValidity {
    /// Anything but `No`.
    #[must_use]
    pub fn is_playable(self) -> bool {
        !matches!(self, MoveValidity::No)
    }
}

/// Pure legality check parameterised by the configured reverse distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOracle {
    reverse_diff: Card,
}

impl MoveOracle {
    #[must_use]
    pub const fn new(reverse_diff: Card) -> Self {
        Self { reverse_diff }
    }

    #[must_use]
    pub const fn reverse_diff(&self) -> Card {
        self.reverse_diff
    }

    /// Check `card` against `row_top`, allowing reverse moves.
    #[must_use]
    pub fn evaluate(&self, card: Card, row_top: Card, direction: Direction) -> MoveValidity {
        self.evaluate_with(card, row_top, direction, true)
    }

    /// Check `card` against `row_top`, optionally forbidding reverse moves.
    ///
    /// A reverse target outside the `Card` range is never legal.
    ///
    /// ```
    /// use thegame_sim::rules::{Direction, MoveOracle, MoveValidity};
    ///
    /// let oracle = MoveOracle::new(10);
    /// assert_eq!(oracle.evaluate(60, 50, Direction::Ascending), MoveValidity::Yes);
    /// assert_eq!(oracle.evaluate(40, 50, Direction::Ascending), MoveValidity::ReverseMove);
    /// assert_eq!(oracle.evaluate_with(40, 50, Direction::Ascending, false), MoveValidity::No);
    /// assert_eq!(oracle.evaluate(60, 50, Direction::Descending), MoveValidity::ReverseMove);
    /// ```
    #[must_use]
    pub fn evaluate_with(
        &self,
        card: Card,
        row_top: Card,
        direction: Direction,
        reverse_allowed: bool,
    ) -> MoveValidity {
        match direction {
            Direction::Ascending => {
                if reverse_allowed && row_top.checked_sub(self.reverse_diff) == Some(card) {
                    MoveValidity::ReverseMove
                } else if card > row_top {
                    MoveValidity::Yes
                } else {
                    MoveValidity::No
                }
            }
            Direction::Descending => {
                if reverse_allowed && row_top.checked_add(self.reverse_diff) == Some(card) {
                    MoveValidity::ReverseMove
                } else if card < row_top {
                    MoveValidity::Yes
                } else {
                    MoveValidity::No
                }
            }
        }
    }

    /// Check `card` against the live top of `row`.
    #[must_use]
    pub fn evaluate_row(&self, card: Card, row: &Row) -> MoveValidity {
        self.evaluate(card, row.top(), row.direction())
    }

    /// How far a playable card moves a row's top along its direction.
    ///
    /// Reverse moves report `-1` so that they sort ahead of every ordinary
    /// move; unplayable cards report `None`.
    #[must_use]
    pub fn gap(&self, card: Card, row: &Row) -> Option<Card> {
        match self.evaluate_row(card, row) {
            MoveValidity::ReverseMove => Some(-1),
            MoveValidity::Yes => Some((card - row.top()).abs()),
            MoveValidity::No => None,
        }
    }
}
