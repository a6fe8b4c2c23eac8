//! The Game simulator CLI.
//!
//! Plays many shuffles with each selected strategy and prints a win-rate
//! table; optionally writes the full JSON report and a per-game CSV.

use anyhow::Context;
use clap::Parser;
use tracing::info;

use thegame_sim::sim::DEFAULT_SEED;
use thegame_sim::{Card, GameConfig, Simulation, StrategyRegistry};

#[derive(Parser)]
#[command(name = "thegame")]
#[command(about = "Simulate cooperative rounds of The Game across strategies")]
struct Args {
    /// Key-value config file (`NAME VALUE` per line)
    #[arg(long)]
    config: Option<String>,

    /// Number of players
    #[arg(short, long)]
    players: Option<usize>,

    /// Number of shuffles to simulate
    #[arg(short, long)]
    games: Option<usize>,

    /// Number of rows (even)
    #[arg(long)]
    rows: Option<usize>,

    /// Cards in hand
    #[arg(long)]
    hand_size: Option<usize>,

    /// Cards each player must play per turn while the deck lasts
    #[arg(long)]
    cards_per_turn: Option<usize>,

    /// Seed of the descending rows; the deck holds 2 up to one below this
    #[arg(long)]
    max_card: Option<Card>,

    /// Exact distance of a reverse move
    #[arg(long)]
    reverse_diff: Option<Card>,

    /// Comma-separated strategy names (default: all)
    #[arg(short, long, value_delimiter = ',')]
    strategies: Vec<String>,

    /// Simulation seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Write the full report as JSON
    #[arg(long)]
    json: Option<String>,

    /// Write one CSV line per game
    #[arg(long)]
    csv: Option<String>,

    /// List strategy names and exit
    #[arg(long)]
    list_strategies: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show progress output
    #[arg(long)]
    show_output: bool,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)
                .with_context(|| format!("loading config from {path}"))?,
            None => GameConfig::default(),
        };
        if let Some(players) = self.players {
            config = config.with_player_count(players);
        }
        if let Some(games) = self.games {
            config = config.with_simulations(games);
        }
        if let Some(rows) = self.rows {
            config = config.with_row_count(rows);
        }
        if let Some(size) = self.hand_size {
            config = config.with_hand_size(size);
        }
        if let Some(count) = self.cards_per_turn {
            config = config.with_cards_per_turn(count);
        }
        if let Some(max) = self.max_card {
            config = config.with_max_card(max);
        }
        if let Some(diff) = self.reverse_diff {
            config = config.with_reverse_diff(diff);
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let registry = StrategyRegistry::builtin();
    if args.list_strategies {
        for name in registry.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = args.game_config()?;
    let strategies = registry.select(&args.strategies)?;
    info!(
        players = config.player_count,
        games = config.simulations,
        strategies = strategies.len(),
        "starting simulation"
    );

    let report = Simulation::new(config.clone(), strategies)
        .with_seed(args.seed)
        .run()?;

    if let Some(path) = &args.json {
        report
            .write_json(path)
            .with_context(|| format!("writing JSON report to {path}"))?;
        info!(path = %path, "wrote JSON report");
    }
    if let Some(path) = &args.csv {
        report
            .write_csv(path)
            .with_context(|| format!("writing CSV to {path}"))?;
        info!(path = %path, "wrote CSV");
    }

    println!(
        "{} player(s), {} game(s) per strategy",
        config.player_count, config.simulations
    );
    println!("{:<22} {:>6} {:>9} {:>10}", "strategy", "wins", "win rate", "avg turns");
    for (name, summary) in &report.overall_stats {
        println!(
            "{:<22} {:>6} {:>8.2}% {:>10.2}",
            name, summary.wins, summary.win_rate, summary.average_turns
        );
    }
    Ok(())
}
