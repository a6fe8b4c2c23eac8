//! Simulation results and their file formats.
//!
//! The JSON report carries per-strategy totals under `overall_stats` and one
//! entry per played game under `game_results`. The CSV export holds one line
//! per game with the columns analysis scripts expect.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Card, GameConfig};
use crate::engine::GameOutcome;

/// Failure writing a report file.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// One game, one strategy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub shuffle_id: String,
    pub strategy: String,
    pub players: usize,
    pub won: bool,
    pub turns: u32,
    /// Cards left in hands and deck at the end.
    pub cards_remaining: usize,
    /// Every row, seed first.
    pub final_rows: Vec<Vec<Card>>,
    pub final_hands: Vec<Vec<Card>>,
}

impl GameRecord {
    #[must_use]
    pub fn from_outcome(
        shuffle_id: impl Into<String>,
        strategy: impl Into<String>,
        players: usize,
        outcome: &GameOutcome,
    ) -> Self {
        Self {
            shuffle_id: shuffle_id.into(),
            strategy: strategy.into(),
            players,
            won: outcome.won,
            turns: outcome.turns_taken,
            cards_remaining: outcome.cards_remaining(),
            final_rows: outcome.final_rows.iter().map(|r| r.cards().to_vec()).collect(),
            final_hands: outcome.final_hands.clone(),
        }
    }
}

/// Running totals for one strategy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub games: usize,
    pub wins: usize,
    /// Percentage of games won.
    pub win_rate: f64,
    /// Mean turns over won games only (0 when nothing was won).
    pub average_turns: f64,
}

impl StrategySummary {
    /// Fold one more game into the totals.
    pub fn record(&mut self, won: bool, turns: u32) {
        self.games += 1;
        if won {
            self.wins += 1;
            self.average_turns += (f64::from(turns) - self.average_turns) / self.wins as f64;
        }
        self.win_rate = self.wins as f64 * 100.0 / self.games as f64;
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "NumPlayers")]
    players: usize,
    #[serde(rename = "ShuffleID")]
    shuffle_id: &'a str,
    #[serde(rename = "Strategy")]
    strategy: &'a str,
    #[serde(rename = "Win")]
    won: bool,
    #[serde(rename = "Turns")]
    turns: u32,
    #[serde(rename = "DeckSize")]
    cards_remaining: usize,
}

/// Everything a simulation run produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub config: GameConfig,
    pub overall_stats: BTreeMap<String, StrategySummary>,
    pub game_results: Vec<GameRecord>,
}

impl SimulationReport {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            overall_stats: BTreeMap::new(),
            game_results: Vec::new(),
        }
    }

    pub fn push(&mut self, record: GameRecord) {
        self.overall_stats
            .entry(record.strategy.clone())
            .or_default()
            .record(record.won, record.turns);
        self.game_results.push(record);
    }

    #[must_use]
    pub fn summary(&self, strategy: &str) -> Option<&StrategySummary> {
        self.overall_stats.get(strategy)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the per-game CSV to any writer.
    pub fn write_csv_to<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for record in &self.game_results {
            csv.serialize(CsvRow {
                players: record.players,
                shuffle_id: &record.shuffle_id,
                strategy: &record.strategy,
                won: record.won,
                turns: record.turns,
                cards_remaining: record.cards_remaining,
            })?;
        }
        csv.flush()?;
        Ok(())
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_csv_to(std::io::BufWriter::new(file))?;
        Ok(())
    }
}
