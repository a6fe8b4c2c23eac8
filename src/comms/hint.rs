//! Public hints broadcast to strategies before each decision.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// What a hint says about its player's situation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintKind {
    /// The player just placed a card on this row.
    TargetRow,
    /// The player holds a card very close to this row's top.
    GoodCard,
    /// The player's closest forward move anywhere is a large jump on this row.
    BadCard,
    /// The player can play a reverse move on this row.
    ReverseTrick,
    /// The player is down to at most one playable (card, row) pair while
    /// the turn requires more than one play.
    OnlyOneCard,
}

/// One broadcast signal.
///
/// `relative_value` carries a kind-specific magnitude and never an exact
/// card value:
///
/// | kind | `row` | `relative_value` |
/// |---|---|---|
/// | `TargetRow` | row played on | signed change of the row top |
/// | `GoodCard` | row | gap to the top |
/// | `BadCard` | row of the closest move | gap to the top |
/// | `ReverseTrick` | row | reverse distance regained |
/// | `OnlyOneCard` | `None` | playable pair count (0 or 1) |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Communication {
    pub player: PlayerId,
    pub row: Option<usize>,
    pub kind: HintKind,
    pub relative_value: i32,
}

impl Communication {
    #[must_use]
    pub fn new(player: PlayerId, row: Option<usize>, kind: HintKind, relative_value: i32) -> Self {
        Self {
            player,
            row,
            kind,
            relative_value,
        }
    }
}

/// Every hint for one decision.
///
/// Built fresh before each decision and dropped after it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hints {
    items: Vec<Communication>,
}

impl Hints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hint: Communication) {
        self.items.push(hint);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Communication> {
        self.items.iter()
    }

    /// Hints of one kind.
    pub fn of_kind(&self, kind: HintKind) -> impl Iterator<Item = &Communication> {
        self.items.iter().filter(move |h| h.kind == kind)
    }

    /// Hints about one row.
    pub fn for_row(&self, row: usize) -> impl Iterator<Item = &Communication> {
        self.items.iter().filter(move |h| h.row == Some(row))
    }

    /// Whether some player other than `me` has claimed `row` with a
    /// reverse trick or a good card.
    #[must_use]
    pub fn claimed_by_other(&self, row: usize, me: PlayerId) -> bool {
        self.for_row(row).any(|h| {
            h.player != me && matches!(h.kind, HintKind::ReverseTrick | HintKind::GoodCard)
        })
    }

    /// The most recent play on the table, if any.
    #[must_use]
    pub fn last_target(&self) -> Option<&Communication> {
        self.of_kind(HintKind::TargetRow).last()
    }

    /// Players warning they are nearly stuck.
    pub fn struggling_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.of_kind(HintKind::OnlyOneCard).map(|h| h.player)
    }
}

impl FromIterator<Communication> for Hints {
    fn from_iter<I: IntoIterator<Item = Communication>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
