//! The shared playing field.
//!
//! The field is a fixed set of rows. Rows `[0, rows/2)` ascend from a seed
//! of `1`; rows `[rows/2, rows)` descend from a seed of `max_card`. Rows are
//! append-only and never empty, so every row has a top.
//!
//! The field does not check legality: callers validate with
//! [`MoveOracle`](super::MoveOracle) before calling
//! [`PlayingField::apply_move`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Card, ConfigError, GameConfig};

/// Seed of every ascending row.
pub const ASCENDING_SEED: Card = 1;

/// Which way a row must move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    #[must_use]
    pub fn is_ascending(self) -> bool {
        matches!(self, Direction::Ascending)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Ascending => write!(f, "Ascending"),
            Direction::Descending => write!(f, "Descending"),
        }
    }
}

/// One sentinel-seeded, append-only row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RowData")]
pub struct Row {
    direction: Direction,
    cards: Vec<Card>,
}

/// Serialized row before the seed is checked.
#[derive(Deserialize)]
struct RowData {
    direction: Direction,
    cards: Vec<Card>,
}

/// A serialized row without its seed card.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0} row has no seed card")]
pub struct EmptyRowError(pub Direction);

impl TryFrom<RowData> for Row {
    type Error = EmptyRowError;

    fn try_from(data: RowData) -> Result<Self, Self::Error> {
        if data.cards.is_empty() {
            return Err(EmptyRowError(data.direction));
        }
        Ok(Self {
            direction: data.direction,
            cards: data.cards,
        })
    }
}

impl Row {
    #[must_use]
    pub fn new(direction: Direction, seed: Card) -> Self {
        Self {
            direction,
            cards: vec![seed],
        }
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn is_ascending(&self) -> bool {
        self.direction.is_ascending()
    }

    /// Last card placed (or the seed).
    #[must_use]
    pub fn top(&self) -> Card {
        // Rows are constructed with a seed and only ever grow.
        self.cards[self.cards.len() - 1]
    }

    /// Seed followed by every played card, oldest first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Played cards only (seed excluded).
    #[must_use]
    pub fn played(&self) -> &[Card] {
        &self.cards[1..]
    }

    /// Copy of this row with `card` on top, for judging hypothetical moves.
    #[must_use]
    pub fn with_card(&self, card: Card) -> Self {
        let mut row = self.clone();
        row.cards.push(card);
        row
    }

    fn push(&mut self, card: Card) {
        self.cards.push(card);
    }
}

/// The rows every player builds on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayingField {
    rows: Vec<Row>,
}

impl PlayingField {
    /// Seed a fresh field for `config`.
    ///
    /// Refuses an odd or zero row count rather than guess row directions.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        if config.row_count == 0 || config.row_count % 2 != 0 {
            return Err(ConfigError::RowCount(config.row_count));
        }
        let half = config.ascending_rows();
        let rows = (0..config.row_count)
            .map(|i| {
                if i < half {
                    Row::new(Direction::Ascending, ASCENDING_SEED)
                } else {
                    Row::new(Direction::Descending, config.max_card)
                }
            })
            .collect();
        Ok(Self { rows })
    }

    /// Seed a fresh field and replay already-played cards onto it.
    ///
    /// `played[i]` lists the cards on row `i` after its seed, oldest first.
    /// No legality check is made. Rows beyond `played.len()` stay seeded.
    pub fn with_played(config: &GameConfig, played: &[Vec<Card>]) -> Result<Self, ConfigError> {
        let mut field = Self::new(config)?;
        for (row, cards) in field.rows.iter_mut().zip(played) {
            for &card in cards {
                row.push(card);
            }
        }
        Ok(field)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Top card of row `index`.
    #[must_use]
    pub fn top(&self, index: usize) -> Option<Card> {
        self.rows.get(index).map(Row::top)
    }

    /// Append `card` to row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn apply_move(&mut self, card: Card, index: usize) {
        self.rows[index].push(card);
    }

    /// Copy of this field with `card` placed on row `index`.
    #[must_use]
    pub fn with_move(&self, card: Card, index: usize) -> Self {
        let mut field = self.clone();
        field.apply_move(card, index);
        field
    }

    /// Played cards across all rows (seeds excluded).
    #[must_use]
    pub fn played_count(&self) -> usize {
        self.rows.iter().map(|row| row.played().len()).sum()
    }

    /// Every played card, row by row.
    pub fn played_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.rows.iter().flat_map(|row| row.played().iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_layout() {
        let field = PlayingField::new(&GameConfig::default().with_row_count(6)).unwrap();
        assert_eq!(field.row_count(), 6);

        for (i, row) in field.rows().iter().enumerate() {
            if i < 3 {
                assert_eq!(row.direction(), Direction::Ascending);
                assert_eq!(row.top(), 1);
            } else {
                assert_eq!(row.direction(), Direction::Descending);
                assert_eq!(row.top(), 100);
            }
            assert!(row.played().is_empty());
        }
    }

    #[test]
    fn test_odd_rows_refused() {
        let err = PlayingField::new(&GameConfig::default().with_row_count(5)).unwrap_err();
        assert!(matches!(err, ConfigError::RowCount(5)));
    }

    #[test]
    fn test_apply_move() {
        let mut field = PlayingField::new(&GameConfig::default()).unwrap();
        field.apply_move(17, 0);
        field.apply_move(80, 3);

        assert_eq!(field.top(0), Some(17));
        assert_eq!(field.top(3), Some(80));
        assert_eq!(field.top(4), None);
        assert_eq!(field.row(0).unwrap().cards(), &[1, 17]);
        assert_eq!(field.played_count(), 2);
        assert_eq!(field.played_cards().collect::<Vec<_>>(), vec![17, 80]);
    }

    #[test]
    fn test_with_move_leaves_field_untouched() {
        let field = PlayingField::new(&GameConfig::default()).unwrap();
        let next = field.with_move(30, 1);
        assert_eq!(field.top(1), Some(1));
        assert_eq!(next.top(1), Some(30));
    }

    #[test]
    fn test_with_played() {
        let config = GameConfig::default().with_max_card(10).with_row_count(2);
        let field = PlayingField::with_played(&config, &[vec![6], vec![3]]).unwrap();
        assert_eq!(field.top(0), Some(6));
        assert_eq!(field.top(1), Some(3));
        assert_eq!(field.row(1).unwrap().cards(), &[10, 3]);
    }

    #[test]
    fn test_serialization() {
        let field = PlayingField::new(&GameConfig::default()).unwrap().with_move(5, 0);
        let json = serde_json::to_string(&field).unwrap();
        let back: PlayingField = serde_json::from_str(&json).unwrap();
        assert_eq!(field, back);
    }

    #[test]
    fn test_deserialize_rejects_unseeded_row() {
        let err = serde_json::from_str::<Row>(r#"{"direction":"Ascending","cards":[]}"#).unwrap_err();
        assert!(err.to_string().contains("Ascending row has no seed card"));

        let json = r#"{"rows":[{"direction":"Ascending","cards":[1]},{"direction":"Descending","cards":[]}]}"#;
        assert!(serde_json::from_str::<PlayingField>(json).is_err());

        let row: Row = serde_json::from_str(r#"{"direction":"Descending","cards":[100,90]}"#).unwrap();
        assert_eq!(row.top(), 90);
    }
}
