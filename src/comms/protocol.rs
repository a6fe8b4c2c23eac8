//! Deriving hints from the table.
//!
//! The protocol is stateless. Before every decision it scans each active
//! player's hand against each row and publishes strategic categories
//! (reverse tricks, good cards, bad hands, near-stuck warnings) without ever
//! revealing card values. The one piece of history it reports is the last
//! card placed on the table, which is itself public table state.

use serde::{Deserialize, Serialize};

use super::hint::{Communication, HintKind, Hints};
use crate::core::{Card, GameConfig, Player, PlayerId, PlayerMap};
use crate::rules::{MoveOracle, MoveValidity, PlayingField};

/// The most recent card placed on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPlay {
    pub player: PlayerId,
    pub row: usize,
    pub card: Card,
    pub previous_top: Card,
}

impl LastPlay {
    /// The `TargetRow` hint announcing this play.
    #[must_use]
    pub fn to_hint(&self) -> Communication {
        Communication::new(
            self.player,
            Some(self.row),
            HintKind::TargetRow,
            self.card - self.previous_top,
        )
    }
}

/// Hint derivation rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalProtocol {
    oracle: MoveOracle,
    good_gap: Card,
    bad_gap: Card,
}

impl SignalProtocol {
    #[must_use]
    pub fn new(oracle: MoveOracle, good_gap: Card, bad_gap: Card) -> Self {
        Self {
            oracle,
            good_gap,
            bad_gap,
        }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            MoveOracle::new(config.reverse_diff),
            config.good_gap,
            config.bad_gap,
        )
    }

    /// Compute the hints for the next decision.
    ///
    /// `required_moves` is the play count of the turn in progress; the
    /// near-stuck warning only fires when it is 2 or more.
    #[must_use]
    pub fn derive(
        &self,
        field: &PlayingField,
        players: &PlayerMap<Player>,
        required_moves: usize,
        last_play: Option<&LastPlay>,
    ) -> Hints {
        let mut hints = Hints::new();

        for (id, player) in players.iter().filter(|(_, p)| p.active) {
            self.scan_hand(id, &player.hand, field, required_moves, &mut hints);
        }

        if let Some(last) = last_play {
            hints.push(last.to_hint());
        }
        hints
    }

    fn scan_hand(
        &self,
        player: PlayerId,
        hand: &[Card],
        field: &PlayingField,
        required_moves: usize,
        hints: &mut Hints,
    ) {
        let rows = field.row_count();
        let mut reverse_rows = vec![false; rows];
        let mut good_gaps: Vec<Option<Card>> = vec![None; rows];
        let mut closest: Option<(Card, usize)> = None;
        let mut playable_pairs = 0usize;

        for &card in hand {
            for (index, row) in field.rows().iter().enumerate() {
                match self.oracle.evaluate_row(card, row) {
                    MoveValidity::ReverseMove => {
                        playable_pairs += 1;
                        reverse_rows[index] = true;
                    }
                    MoveValidity::Yes => {
                        playable_pairs += 1;
                        let gap = (card - row.top()).abs();
                        if gap <= self.good_gap {
                            let best = good_gaps[index].get_or_insert(gap);
                            *best = (*best).min(gap);
                        }
                        if closest.map_or(true, |(best, _)| gap < best) {
                            closest = Some((gap, index));
                        }
                    }
                    MoveValidity::No => {}
                }
            }
        }

        for (index, &has_reverse) in reverse_rows.iter().enumerate() {
            if has_reverse {
                hints.push(Communication::new(
                    player,
                    Some(index),
                    HintKind::ReverseTrick,
                    self.oracle.reverse_diff(),
                ));
            }
        }
        for (index, gap) in good_gaps.iter().enumerate() {
            if let Some(gap) = *gap {
                hints.push(Communication::new(player, Some(index), HintKind::GoodCard, gap));
            }
        }

        let any_reverse = reverse_rows.iter().any(|&r| r);
        if let Some((gap, index)) = closest {
            if gap >= self.bad_gap && !any_reverse {
                hints.push(Communication::new(player, Some(index), HintKind::BadCard, gap));
            }
        }

        if required_moves >= 2 && playable_pairs <= 1 {
            hints.push(Communication::new(
                player,
                None,
                HintKind::OnlyOneCard,
                playable_pairs as i32,
            ));
        }
    }
}
