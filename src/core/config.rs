//! Game configuration.
//!
//! A `GameConfig` is built once at startup, validated, and then passed by
//! reference into every engine. Nothing reads configuration from global
//! state mid-game.
//!
//! Configuration can come from code (`Default` plus `with_*` builders) or
//! from a key-value file with one `NAME VALUE` pair per line:
//!
//! ```text
//! CARD_MAX_NUMBER 100
//! REVERSE_MOVE_DIFF 10
//! CARD_IN_HANDS 6
//! NUM_CARDS_TO_PLAY 2
//! NUMBER_OF_ROWS 4
//! NUMBER_OF_PLAYERS 3
//! NUM_SIMULATIONS 1000
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use super::card::Card;
use super::error::ConfigError;

/// Immutable rules and simulation parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Descending rows start here; playable cards are `[2, max_card)`.
    pub max_card: Card,

    /// Exact distance that permits a move against a row's direction.
    pub reverse_diff: Card,

    /// Hand size after dealing and after each replenishment.
    pub hand_size: usize,

    /// Cards a player must play per turn while the deck has cards.
    /// Drops to 1 once the deck is empty.
    pub cards_per_turn: usize,

    /// Total rows; the first half ascend, the second half descend.
    pub row_count: usize,

    /// Seats at the table (1-255).
    pub player_count: usize,

    /// Number of shuffles a simulation run plays.
    pub simulations: usize,

    /// A forward move at most this far from the row top is signalled as a
    /// good card.
    pub good_gap: Card,

    /// A player whose closest forward move is at least this far from any
    /// row top signals that they only hold bad cards.
    pub bad_gap: Card,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_card: 100,
            reverse_diff: 10,
            hand_size: 8,
            cards_per_turn: 2,
            row_count: 4,
            player_count: 1,
            simulations: 100,
            good_gap: 2,
            bad_gap: 20,
        }
    }
}

impl GameConfig {
    pub fn with_max_card(mut self, max_card: Card) -> Self {
        self.max_card = max_card;
        self
    }

    pub fn with_reverse_diff(mut self, diff: Card) -> Self {
        self.reverse_diff = diff;
        self
    }

    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    pub fn with_cards_per_turn(mut self, count: usize) -> Self {
        self.cards_per_turn = count;
        self
    }

    pub fn with_row_count(mut self, rows: usize) -> Self {
        self.row_count = rows;
        self
    }

    pub fn with_player_count(mut self, players: usize) -> Self {
        self.player_count = players;
        self
    }

    pub fn with_simulations(mut self, games: usize) -> Self {
        self.simulations = games;
        self
    }

    pub fn with_hint_gaps(mut self, good: Card, bad: Card) -> Self {
        self.good_gap = good;
        self.bad_gap = bad;
        self
    }

    /// Number of ascending rows (the rest descend).
    #[must_use]
    pub fn ascending_rows(&self) -> usize {
        self.row_count / 2
    }

    /// Cards in a full standard deck for this configuration.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        (self.max_card - 2).max(0) as usize
    }

    /// Reject configurations the engine cannot play.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.row_count == 0 || self.row_count % 2 != 0 {
            return Err(ConfigError::RowCount(self.row_count));
        }
        if self.hand_size == 0 {
            return Err(ConfigError::ZeroHandSize);
        }
        if self.cards_per_turn == 0 {
            return Err(ConfigError::ZeroCardsPerTurn);
        }
        if self.hand_size < self.cards_per_turn {
            return Err(ConfigError::HandSmallerThanTurn {
                hand_size: self.hand_size,
                cards_per_turn: self.cards_per_turn,
            });
        }
        if !(1..=255).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.max_card < 3 {
            return Err(ConfigError::MaxCardTooSmall(self.max_card));
        }
        if self.reverse_diff < 1 {
            return Err(ConfigError::ReverseDiff(self.reverse_diff));
        }
        // Row tops plus the reverse distance, and doubled tops, must fit a Card.
        if self.max_card.checked_add(self.reverse_diff).is_none()
            || self.max_card.checked_mul(2).is_none()
        {
            return Err(ConfigError::MaxCardTooLarge {
                max_card: self.max_card,
                reverse_diff: self.reverse_diff,
            });
        }
        if self.good_gap > self.bad_gap {
            return Err(ConfigError::HintGaps {
                good: self.good_gap,
                bad: self.bad_gap,
            });
        }
        Ok(())
    }

    /// Apply `NAME VALUE` lines on top of `self`, then validate.
    ///
    /// Lines that are not a name followed by an integer are skipped, as are
    /// blank lines and `#` comments. Unknown names are logged and ignored.
    pub fn apply_kv_str(mut self, text: &str) -> Result<Self, ConfigError> {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let (Some(key), Some(raw)) = (parts.next(), parts.next()) else {
                continue;
            };
            let Ok(value) = raw.parse::<i64>() else {
                continue;
            };
            self.set(key, value)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Parse a key-value config over the defaults.
    pub fn from_kv_str(text: &str) -> Result<Self, ConfigError> {
        Self::default().apply_kv_str(text)
    }

    /// Read and parse a key-value config file over the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_kv_str(&text)
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        };
        let card = || Card::try_from(value).map_err(|_| invalid());
        let count = || usize::try_from(value).map_err(|_| invalid());

        match key {
            "CARD_MAX_NUMBER" => self.max_card = card()?,
            "REVERSE_MOVE_DIFF" => self.reverse_diff = card()?,
            "CARD_IN_HANDS" => self.hand_size = count()?,
            "NUM_CARDS_TO_PLAY" => self.cards_per_turn = count()?,
            "NUMBER_OF_ROWS" => self.row_count = count()?,
            "NUMBER_OF_PLAYERS" => self.player_count = count()?,
            "NUM_SIMULATIONS" => self.simulations = count()?,
            "HINT_GOOD_GAP" => self.good_gap = card()?,
            "HINT_BAD_GAP" => self.bad_gap = card()?,
            other => warn!(key = other, value, "ignoring unknown config key"),
        }
        Ok(())
    }
}
