//! The decision boundary between the engine and a strategy.
//!
//! A strategy sees exactly what a player at the table would: their own hand,
//! the public field, and the hints broadcast for this decision. It answers
//! with a [`Move`] or `None` when it has nothing to play. The engine
//! re-validates every answer, so a strategy cannot corrupt the table.

use serde::{Deserialize, Serialize};

use crate::comms::Hints;
use crate::core::{Card, PlayerId};
use crate::rules::{MoveOracle, MoveValidity, PlayingField, Row};

/// A chosen play: which hand position goes on which row.
///
/// `card_index` indexes the hand exactly as it appeared in the
/// [`DecisionView`], not a card value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub card_index: usize,
    pub row: usize,
}

impl Move {
    #[must_use]
    pub const fn new(card_index: usize, row: usize) -> Self {
        Self { card_index, row }
    }
}

/// One legal (card, row) pairing found by [`DecisionView::playable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub card_index: usize,
    pub card: Card,
    pub row: usize,
    pub validity: MoveValidity,
}

impl Candidate {
    #[must_use]
    pub fn to_move(self) -> Move {
        Move::new(self.card_index, self.row)
    }
}

/// Everything a strategy may look at for one decision.
#[derive(Clone, Copy, Debug)]
pub struct DecisionView<'a> {
    /// Snapshot of the acting player's hand.
    pub hand: &'a [Card],
    pub field: &'a PlayingField,
    pub hints: &'a Hints,
    pub player: PlayerId,
    pub oracle: MoveOracle,
    pub max_card: Card,
}

impl<'a> DecisionView<'a> {
    /// Every legal pairing, hand order first then row order.
    pub fn playable(&self) -> impl Iterator<Item = Candidate> + 'a {
        let oracle = self.oracle;
        let field = self.field;
        let hand = self.hand;
        hand.iter().enumerate().flat_map(move |(card_index, &card)| {
            field
                .rows()
                .iter()
                .enumerate()
                .filter_map(move |(row, r)| {
                    let validity = oracle.evaluate_row(card, r);
                    validity.is_playable().then_some(Candidate {
                        card_index,
                        card,
                        row,
                        validity,
                    })
                })
        })
    }

    /// Number of legal (card, row) pairings.
    #[must_use]
    pub fn playable_count(&self) -> usize {
        self.playable().count()
    }

    /// Hand cards other than `skip` that still fit some row of `field`.
    #[must_use]
    pub fn still_playable(&self, skip: usize, field: &PlayingField) -> usize {
        self.hand
            .iter()
            .enumerate()
            .filter(|&(i, &card)| {
                i != skip
                    && field
                        .rows()
                        .iter()
                        .any(|row| self.oracle.evaluate_row(card, row).is_playable())
            })
            .count()
    }

    /// Gap of `card` on `row` (reverse moves count as `-1`).
    #[must_use]
    pub fn gap(&self, card: Card, row: &Row) -> Option<Card> {
        self.oracle.gap(card, row)
    }
}

/// A pluggable move chooser.
///
/// Implementations must be pure: the same view always yields the same move.
pub trait Strategy: Send + Sync {
    /// Stable registry name.
    fn name(&self) -> &str;

    /// Pick the next play, or `None` if there is nothing to play.
    fn choose(&self, view: &DecisionView<'_>) -> Option<Move>;
}

/// A strategy backed by a plain function.
#[derive(Clone, Copy)]
pub struct FnStrategy {
    name: &'static str,
    choose: fn(&DecisionView<'_>) -> Option<Move>,
}

impl FnStrategy {
    #[must_use]
    pub const fn new(name: &'static str, choose: fn(&DecisionView<'_>) -> Option<Move>) -> Self {
        Self { name, choose }
    }
}

impl Strategy for FnStrategy {
    fn name(&self) -> &str {
        self.name
    }

    fn choose(&self, view: &DecisionView<'_>) -> Option<Move> {
        (self.choose)(view)
    }
}

impl std::fmt::Debug for FnStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStrategy").field("name", &self.name).finish()
    }
}
