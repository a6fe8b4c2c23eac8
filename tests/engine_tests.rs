//! Turn engine scenarios: whole games, reverse moves, forced losses, and
//! strategies that misbehave.

use thegame_sim::core::{Card, ConfigError, Deck, GameConfig, GameError, PlayerId, SetupError};
use thegame_sim::engine::{LossReason, Phase, TurnEngine, Violation};
use thegame_sim::rules::{MoveOracle, MoveValidity, PlayingField};
use thegame_sim::strategy::{DecisionView, FnStrategy, Move, StrategyRegistry};

/// Ten cards, two rows, one player, one card per turn.
fn tiny_config() -> GameConfig {
    GameConfig::default()
        .with_max_card(10)
        .with_reverse_diff(3)
        .with_hand_size(3)
        .with_cards_per_turn(1)
        .with_row_count(2)
        .with_player_count(1)
}

/// Lowest hand card that fits the first ascending row.
fn lowest_ascending(view: &DecisionView<'_>) -> Option<Move> {
    view.playable()
        .filter(|c| c.row == 0)
        .min_by_key(|c| c.card)
        .map(|c| c.to_move())
}

fn missing_card(_: &DecisionView<'_>) -> Option<Move> {
    Some(Move::new(7, 0))
}

fn missing_row(_: &DecisionView<'_>) -> Option<Move> {
    Some(Move::new(0, 5))
}

fn first_on_descending(_: &DecisionView<'_>) -> Option<Move> {
    Some(Move::new(0, 1))
}

#[test]
fn test_single_player_ascending_win() {
    let strategy = FnStrategy::new("lowest-ascending", lowest_ascending);
    let deck = Deck::from_cards(vec![9, 8, 7, 6, 5, 4, 3, 2]);
    let mut engine = TurnEngine::new(&tiny_config(), deck, &strategy, 1).unwrap();

    engine.step();
    assert_eq!(engine.players()[PlayerId(0)].hand, vec![2, 3, 4]);
    assert_eq!(engine.deck().cards(), &[9, 8, 7, 6, 5]);

    engine.step();
    assert_eq!(engine.field().top(0), Some(2));
    assert_eq!(engine.players()[PlayerId(0)].hand, vec![3, 4, 5]);
    assert_eq!(engine.turns_taken(), 1);

    let outcome = engine.run();
    assert!(outcome.won);
    assert!(outcome.loss.is_none());
    assert_eq!(outcome.turns_taken, 8);
    assert_eq!(outcome.final_rows[0].cards(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(outcome.final_rows[1].cards(), &[10]);
    assert_eq!(outcome.final_hands, vec![Vec::<Card>::new()]);
    assert_eq!(outcome.cards_remaining(), 0);

    let start = PlayingField::new(&tiny_config()).unwrap();
    assert_eq!(outcome.verify_replay(MoveOracle::new(3), &start), Ok(()));
}

#[test]
fn test_reverse_move_reopens_row() {
    let config = tiny_config().with_max_card(20);
    let field = PlayingField::with_played(&config, &[vec![10]]).unwrap();
    let registry = StrategyRegistry::builtin();
    let closest = registry.get("closest").unwrap();

    let outcome =
        TurnEngine::from_table(&config, field.clone(), vec![vec![7, 8]], Deck::default(), closest, 0)
            .unwrap()
            .run();

    assert!(outcome.won);
    assert_eq!(outcome.turns_taken, 2);
    assert_eq!(outcome.final_rows[0].cards(), &[1, 10, 7, 8]);
    assert_eq!(outcome.moves[0].validity, MoveValidity::ReverseMove);
    assert_eq!(outcome.moves[0].previous_top, 10);
    assert_eq!(outcome.moves[1].validity, MoveValidity::Yes);
    assert_eq!(outcome.verify_replay(MoveOracle::new(3), &field), Ok(()));
}

#[test]
fn test_forced_loss_keeps_hand() {
    let config = tiny_config();
    let field = PlayingField::with_played(&config, &[vec![6], vec![3]]).unwrap();
    let registry = StrategyRegistry::builtin();
    let closest = registry.get("closest").unwrap();

    let mut engine =
        TurnEngine::from_table(&config, field, vec![vec![5]], Deck::default(), closest, 0).unwrap();
    assert_eq!(engine.step(), Phase::Lost);

    let outcome = engine.into_outcome();
    assert!(!outcome.won);
    assert_eq!(outcome.turns_taken, 0);
    assert_eq!(outcome.final_hands, vec![vec![5]]);
    assert_eq!(
        outcome.loss,
        Some(LossReason::NoMove {
            player: PlayerId(0),
            slot: 0,
            legal_moves: 0,
        })
    );
}

#[test]
fn test_required_moves_drop_to_one_when_deck_empty() {
    let config = tiny_config().with_cards_per_turn(2);
    let field = PlayingField::new(&config).unwrap();
    let strategy = FnStrategy::new("lowest-ascending", lowest_ascending);

    let mut engine =
        TurnEngine::from_table(&config, field, vec![vec![3, 4]], Deck::default(), &strategy, 0)
            .unwrap();
    engine.step();
    assert_eq!(engine.turns_taken(), 1);
    engine.step();
    assert_eq!(engine.turns_taken(), 2);
    assert_eq!(engine.phase(), Phase::Won);
}

#[test]
fn test_full_turn_then_replenish() {
    let config = tiny_config().with_cards_per_turn(2).with_hand_size(2);
    let field = PlayingField::new(&config).unwrap();
    let strategy = FnStrategy::new("lowest-ascending", lowest_ascending);

    let mut engine = TurnEngine::from_table(
        &config,
        field,
        vec![vec![3, 4]],
        Deck::from_cards(vec![9]),
        &strategy,
        0,
    )
    .unwrap();
    engine.step();
    assert_eq!(engine.turns_taken(), 2);
    assert_eq!(engine.players()[PlayerId(0)].hand, vec![9]);
    assert!(engine.deck().is_empty());
    assert!(engine.is_conserved());
}

#[test]
fn test_illegal_answers_lose_without_mutation() {
    let config = tiny_config();
    let field = PlayingField::with_played(&config, &[vec![6], vec![3]]).unwrap();

    let cases = [
        (FnStrategy::new("missing-card", missing_card), Violation::CardIndexOutOfRange),
        (FnStrategy::new("missing-row", missing_row), Violation::RowIndexOutOfRange),
        (FnStrategy::new("first-on-descending", first_on_descending), Violation::Rejected),
    ];
    for (strategy, violation) in cases {
        let outcome = TurnEngine::from_table(
            &config,
            field.clone(),
            vec![vec![8, 2]],
            Deck::default(),
            &strategy,
            0,
        )
        .unwrap()
        .run();

        assert!(!outcome.won);
        assert_eq!(
            outcome.loss,
            Some(LossReason::IllegalMove {
                player: PlayerId(0),
                slot: 0,
                violation,
            })
        );
        assert_eq!(outcome.final_hands, vec![vec![8, 2]]);
        assert_eq!(outcome.final_rows, field.rows());
        assert!(outcome.moves.is_empty());
    }
}

#[test]
fn test_from_table_validation() {
    let config = tiny_config().with_player_count(2);
    let field = PlayingField::with_played(&config, &[vec![4]]).unwrap();
    let strategy = FnStrategy::new("lowest-ascending", lowest_ascending);

    let err = TurnEngine::from_table(
        &config,
        field.clone(),
        vec![vec![5]],
        Deck::default(),
        &strategy,
        0,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        GameError::Setup(SetupError::HandCount { expected: 2, got: 1 })
    ));

    let err = TurnEngine::from_table(
        &config,
        field.clone(),
        vec![vec![5], vec![4]],
        Deck::default(),
        &strategy,
        0,
    )
    .unwrap_err();
    assert!(matches!(err, GameError::Setup(SetupError::DuplicateCard(4))));

    let err = TurnEngine::from_table(
        &config,
        field,
        vec![vec![5], vec![]],
        Deck::from_cards(vec![10]),
        &strategy,
        0,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        GameError::Setup(SetupError::CardOutOfRange { card: 10, max: 10 })
    ));

    let wide = PlayingField::new(&config.clone().with_row_count(4)).unwrap();
    let err = TurnEngine::from_table(&config, wide, vec![vec![], vec![]], Deck::default(), &strategy, 0)
        .unwrap_err();
    assert!(matches!(
        err,
        GameError::Setup(SetupError::RowCount { expected: 2, got: 4 })
    ));
}

#[test]
fn test_extreme_max_card_refused_before_play() {
    let registry = StrategyRegistry::builtin();
    let closest = registry.get("closest").unwrap();

    for max_card in [Card::MAX, 1_500_000_000] {
        let config = tiny_config().with_max_card(max_card);
        let field = PlayingField::with_played(&config, &[vec![], vec![]]).unwrap();
        let err = TurnEngine::from_table(&config, field, vec![vec![5]], Deck::default(), closest, 0)
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::Config(ConfigError::MaxCardTooLarge { .. })
        ));
    }
}

#[test]
fn test_hand_smaller_than_turn_refused() {
    let config = tiny_config().with_hand_size(1).with_cards_per_turn(2);
    let registry = StrategyRegistry::builtin();
    let err = TurnEngine::new(&config, Deck::standard(config.max_card), registry.get("closest").unwrap(), 0)
        .unwrap_err();
    assert!(matches!(
        err,
        GameError::Config(ConfigError::HandSmallerThanTurn { hand_size: 1, cards_per_turn: 2 })
    ));
}

#[test]
fn test_multi_player_game_accounts_for_every_card() {
    let config = GameConfig::default()
        .with_max_card(40)
        .with_hand_size(4)
        .with_player_count(3);
    let registry = StrategyRegistry::builtin();

    for strategy in registry.iter() {
        let mut deck = Deck::standard(config.max_card);
        deck.shuffle(&mut thegame_sim::GameRng::new(5));
        let outcome = TurnEngine::new(&config, deck, strategy, 11).unwrap().run();

        assert_eq!(outcome.final_hands.len(), 3);
        assert_eq!(outcome.turns_taken as usize, outcome.moves.len());
        let played: usize = outcome.final_rows.iter().map(|r| r.played().len()).sum();
        assert_eq!(played + outcome.cards_remaining(), config.deck_size());
        assert_eq!(outcome.won, outcome.loss.is_none());
        if outcome.won {
            assert_eq!(outcome.turns_taken as usize, config.deck_size());
        }
    }
}

#[test]
fn test_seating_is_a_fixed_permutation() {
    let config = GameConfig::default().with_player_count(5);
    let registry = StrategyRegistry::builtin();
    let closest = registry.get("closest").unwrap();

    let seat = |seed| {
        let mut engine = TurnEngine::new(&config, Deck::standard(100), closest, seed).unwrap();
        engine.step();
        engine.order().to_vec()
    };

    let order = seat(3);
    assert_eq!(order, seat(3));
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(sorted, PlayerId::all(5).collect::<Vec<_>>());
}
