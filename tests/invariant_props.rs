//! Property tests for the turn engine.
//!
//! Invariants covered:
//! - Every card stays in exactly one of deck, hands, rows at every step.
//! - Each row only ever moves in its direction or jumps back by exactly the
//!   reverse distance.
//! - The recorded move history replays legally onto a fresh field.
//! - Games end within a bounded number of steps.
//! - A won game has an empty table; a lost game does not, and a strategy
//!   that gave up really had nothing to play.

use proptest::prelude::*;
use thegame_sim::core::{Card, Deck, GameConfig, GameRng};
use thegame_sim::engine::{LossReason, Phase, TurnEngine};
use thegame_sim::rules::{MoveOracle, PlayingField, Row};
use thegame_sim::strategy::StrategyRegistry;

fn row_is_well_formed(row: &Row, reverse_diff: Card) -> bool {
    row.cards().windows(2).all(|pair| {
        let (previous, next) = (pair[0], pair[1]);
        if row.is_ascending() {
            next > previous || next == previous - reverse_diff
        } else {
            next < previous || next == previous + reverse_diff
        }
    })
}

fn config_strategy() -> impl Strategy<Value = GameConfig> {
    (
        1usize..=5,
        12i32..=60,
        1usize..=8,
        1usize..=3,
        1usize..=3,
        1i32..=12,
    )
        .prop_map(|(players, max_card, hand, per_turn, half_rows, diff)| {
            GameConfig::default()
                .with_player_count(players)
                .with_max_card(max_card)
                .with_hand_size(hand.max(per_turn))
                .with_cards_per_turn(per_turn)
                .with_row_count(half_rows * 2)
                .with_reverse_diff(diff)
        })
}

fn shuffled(config: &GameConfig, seed: u64) -> Deck {
    let mut deck = Deck::standard(config.max_card);
    deck.shuffle(&mut GameRng::new(seed));
    deck
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stepping_preserves_table_invariants(
        config in config_strategy(),
        seed in any::<u64>(),
        pick in 0usize..10,
    ) {
        let registry = StrategyRegistry::builtin();
        let strategy = registry.iter().nth(pick).unwrap();
        let mut engine = TurnEngine::new(&config, shuffled(&config, seed), strategy, seed).unwrap();

        let bound = config.deck_size() + 2;
        let mut steps = 0usize;
        while !engine.phase().is_terminal() {
            engine.step();
            steps += 1;
            prop_assert!(steps <= bound, "no terminal phase after {} steps", steps);
            prop_assert!(engine.is_conserved());
            for row in engine.field().rows() {
                prop_assert!(row_is_well_formed(row, config.reverse_diff));
            }
            for player in engine.players().values() {
                prop_assert!(player.hand.len() <= config.hand_size);
            }
        }
        prop_assert!(engine.turns_taken() as usize <= config.deck_size());
    }

    #[test]
    fn outcomes_satisfy_postconditions(
        config in config_strategy(),
        seed in any::<u64>(),
        pick in 0usize..10,
    ) {
        let registry = StrategyRegistry::builtin();
        let strategy = registry.iter().nth(pick).unwrap();
        let mut engine = TurnEngine::new(&config, shuffled(&config, seed), strategy, seed).unwrap();
        while !engine.step().is_terminal() {}
        let phase = engine.phase();
        let outcome = engine.into_outcome();

        let start = PlayingField::new(&config).unwrap();
        prop_assert_eq!(outcome.verify_replay(MoveOracle::new(config.reverse_diff), &start), Ok(()));
        prop_assert_eq!(outcome.turns_taken as usize, outcome.moves.len());

        if outcome.won {
            prop_assert_eq!(phase, Phase::Won);
            prop_assert!(outcome.loss.is_none());
            prop_assert_eq!(outcome.deck_remaining, 0);
            prop_assert!(outcome.final_hands.iter().all(Vec::is_empty));
            prop_assert_eq!(outcome.turns_taken as usize, config.deck_size());
        } else {
            prop_assert_eq!(phase, Phase::Lost);
            prop_assert!(outcome.cards_remaining() > 0);
            match outcome.loss {
                Some(LossReason::NoMove { legal_moves, .. }) => prop_assert_eq!(legal_moves, 0),
                other => prop_assert!(false, "unexpected loss {:?}", other),
            }
        }
    }

    #[test]
    fn seeded_games_repeat(
        config in config_strategy(),
        seed in any::<u64>(),
    ) {
        let registry = StrategyRegistry::builtin();
        let strategy = registry.get("weighted").unwrap();
        let play = || TurnEngine::new(&config, shuffled(&config, seed), strategy, seed).unwrap().run();
        prop_assert_eq!(play(), play());
    }
}
