//! What a finished game hands back to its caller.

use serde::{Deserialize, Serialize};

use crate::core::{Card, PlayerId};
use crate::rules::{MoveOracle, MoveValidity, PlayingField, Row};

/// Why the engine refused a strategy's answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Violation {
    /// `card_index` did not address the hand snapshot.
    CardIndexOutOfRange,
    /// `row` did not address a row of the field.
    RowIndexOutOfRange,
    /// The oracle answered `No` for the chosen card and row.
    Rejected,
}

/// How a lost game was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// The strategy had nothing to play for a required slot.
    NoMove {
        player: PlayerId,
        slot: usize,
        /// Legal (card, row) pairs the player actually had.
        legal_moves: usize,
    },
    /// The strategy answered with a move the engine would not apply.
    IllegalMove {
        player: PlayerId,
        slot: usize,
        violation: Violation,
    },
}

impl LossReason {
    /// The player whose slot went unmet.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match *self {
            LossReason::NoMove { player, .. } | LossReason::IllegalMove { player, .. } => player,
        }
    }
}

/// One applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Value of the turn counter after this move (1-based).
    pub turn: u32,
    pub player: PlayerId,
    pub card: Card,
    pub row: usize,
    pub previous_top: Card,
    pub validity: MoveValidity,
}

/// Final snapshot of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// All hands and the deck are empty.
    pub won: bool,
    /// Cards played over the whole game.
    pub turns_taken: u32,
    pub final_rows: Vec<Row>,
    /// Hands in seat order, including cards stranded by a loss.
    pub final_hands: Vec<Vec<Card>>,
    pub deck_remaining: usize,
    pub loss: Option<LossReason>,
    pub moves: Vec<MoveRecord>,
}

impl GameOutcome {
    /// Assemble an outcome, deriving `won` from the table itself rather than
    /// from engine bookkeeping.
    #[must_use]
    pub fn new(
        turns_taken: u32,
        final_rows: Vec<Row>,
        final_hands: Vec<Vec<Card>>,
        deck_remaining: usize,
        loss: Option<LossReason>,
        moves: Vec<MoveRecord>,
    ) -> Self {
        let won = deck_remaining == 0 && final_hands.iter().all(Vec::is_empty);
        Self {
            won,
            turns_taken,
            final_rows,
            final_hands,
            deck_remaining,
            loss,
            moves,
        }
    }

    /// Cards that never reached the table.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck_remaining + self.final_hands.iter().map(Vec::len).sum::<usize>()
    }

    /// Replay the move history on `start` and re-check every move.
    ///
    /// On failure, returns the index of the first move whose recorded top or
    /// validity disagrees with a fresh oracle evaluation. If every move
    /// replays but the result differs from `final_rows`, returns
    /// `moves.len()`.
    pub fn verify_replay(&self, oracle: MoveOracle, start: &PlayingField) -> Result<(), usize> {
        let mut field = start.clone();
        for (index, record) in self.moves.iter().enumerate() {
            let Some(row) = field.row(record.row) else {
                return Err(index);
            };
            let validity = oracle.evaluate_row(record.card, row);
            if row.top() != record.previous_top
                || validity != record.validity
                || !validity.is_playable()
            {
                return Err(index);
            }
            field.apply_move(record.card, record.row);
        }
        if field.rows() == self.final_rows.as_slice() {
            Ok(())
        } else {
            Err(self.moves.len())
        }
    }
}
