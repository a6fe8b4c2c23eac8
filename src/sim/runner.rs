//! Many games over shared shuffles.
//!
//! Each simulated game draws one shuffle of the standard deck and plays it
//! once per selected strategy. Every strategy faces the same cards and the
//! same seating, so win rates compare strategies rather than luck.

use tracing::info;

use super::report::{GameRecord, SimulationReport};
use crate::core::{Deck, GameConfig, GameError, GameRng};
use crate::engine::TurnEngine;
use crate::strategy::Strategy;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 0x7468_6567_616d_6521;

/// A batch of games for a fixed configuration and strategy set.
pub struct Simulation<'r> {
    config: GameConfig,
    strategies: Vec<&'r dyn Strategy>,
    seed: u64,
}

impl<'r> Simulation<'r> {
    #[must_use]
    pub fn new(config: GameConfig, strategies: Vec<&'r dyn Strategy>) -> Self {
        Self {
            config,
            strategies,
            seed: DEFAULT_SEED,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Play `config.simulations` shuffles with every strategy.
    pub fn run(&self) -> Result<SimulationReport, GameError> {
        self.config.validate()?;
        let mut runner = GameRng::new(self.seed);
        let mut report = SimulationReport::new(self.config.clone());

        for game in 0..self.config.simulations {
            let game_rng = runner.fork();
            let mut deck = Deck::standard(self.config.max_card);
            deck.shuffle(&mut game_rng.for_context("deck"));
            let shuffle_id = deck.deck_id();

            let mut wins = 0usize;
            for &strategy in &self.strategies {
                let outcome =
                    TurnEngine::new(&self.config, deck.clone(), strategy, game_rng.seed())?.run();
                wins += usize::from(outcome.won);
                report.push(GameRecord::from_outcome(
                    shuffle_id.as_str(),
                    strategy.name(),
                    self.config.player_count,
                    &outcome,
                ));
            }
            info!(game, wins, strategies = self.strategies.len(), "shuffle finished");
        }
        Ok(report)
    }
}

impl std::fmt::Debug for Simulation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("config", &self.config)
            .field(
                "strategies",
                &self.strategies.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("seed", &self.seed)
            .finish()
    }
}
