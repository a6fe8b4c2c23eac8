//! The N-player turn state machine.
//!
//! ```text
//! Dealing -> PlayerTurn(p) -> (replenish, deactivate) -> PlayerTurn(p') ...
//!                          \-> Won | Lost
//! ```
//!
//! Each call to [`TurnEngine::step`] performs one transition: dealing, or
//! one whole player turn. The engine owns the deck, the field, and the only
//! copy of every player; strategies see a hand snapshot and an immutable
//! field borrow.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::outcome::{GameOutcome, LossReason, MoveRecord, Violation};
use crate::comms::{LastPlay, SignalProtocol};
use crate::core::card::check_cards;
use crate::core::{
    Card, Deck, GameConfig, GameError, GameRng, Player, PlayerId, PlayerMap, SetupError,
};
use crate::rules::{MoveOracle, PlayingField};
use crate::strategy::{DecisionView, Strategy};

/// Hand snapshots this small stay on the stack.
type HandSnapshot = SmallVec<[Card; 16]>;

/// Where the state machine is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Hands not dealt yet.
    Dealing,
    /// Waiting for the player at this position of the seating order.
    PlayerTurn(usize),
    Won,
    Lost,
}

impl Phase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

/// Plays one game with one strategy driving every seat.
pub struct TurnEngine<'s> {
    config: GameConfig,
    oracle: MoveOracle,
    protocol: SignalProtocol,
    strategy: &'s dyn Strategy,
    rng: GameRng,

    field: PlayingField,
    players: PlayerMap<Player>,
    deck: Deck,
    order: Vec<PlayerId>,
    phase: Phase,

    turns_taken: u32,
    last_play: Option<LastPlay>,
    loss: Option<LossReason>,
    moves: Vec<MoveRecord>,
    initial_cards: usize,
}

impl<'s> TurnEngine<'s> {
    /// Set up a fresh game. Nothing is dealt until the first [`step`](Self::step).
    ///
    /// `seed` drives the seating order only; shuffle `deck` beforehand.
    pub fn new(
        config: &GameConfig,
        deck: Deck,
        strategy: &'s dyn Strategy,
        seed: u64,
    ) -> Result<Self, GameError> {
        config.validate()?;
        deck.validate(config.max_card)?;
        let field = PlayingField::new(config)?;
        let players = PlayerMap::new(config.player_count, |_| Player::new(Vec::new()));
        Ok(Self::assemble(config, field, players, deck, strategy, seed))
    }

    /// Resume from an arbitrary table: `hands[i]` belongs to seat `i`.
    ///
    /// Every card on the table, in hands, and in the deck must be in range
    /// and appear once. Seating is drawn from `seed` as for a fresh game.
    pub fn from_table(
        config: &GameConfig,
        field: PlayingField,
        hands: Vec<Vec<Card>>,
        deck: Deck,
        strategy: &'s dyn Strategy,
        seed: u64,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if field.row_count() != config.row_count {
            return Err(SetupError::RowCount {
                expected: config.row_count,
                got: field.row_count(),
            }
            .into());
        }
        if hands.len() != config.player_count {
            return Err(SetupError::HandCount {
                expected: config.player_count,
                got: hands.len(),
            }
            .into());
        }

        let mut seen = FxHashSet::default();
        check_cards(deck.cards().iter().copied(), config.max_card, &mut seen)?;
        check_cards(hands.iter().flatten().copied(), config.max_card, &mut seen)?;
        check_cards(field.played_cards(), config.max_card, &mut seen)?;

        let players = PlayerMap::from_vec(hands.into_iter().map(Player::new).collect());
        let mut engine = Self::assemble(config, field, players, deck, strategy, seed);
        engine.seat_players();
        Ok(engine)
    }

    fn assemble(
        config: &GameConfig,
        field: PlayingField,
        players: PlayerMap<Player>,
        deck: Deck,
        strategy: &'s dyn Strategy,
        seed: u64,
    ) -> Self {
        let mut engine = Self {
            config: config.clone(),
            oracle: MoveOracle::new(config.reverse_diff),
            protocol: SignalProtocol::from_config(config),
            strategy,
            rng: GameRng::new(seed).for_context("seating"),
            field,
            players,
            deck,
            order: Vec::new(),
            phase: Phase::Dealing,
            turns_taken: 0,
            last_play: None,
            loss: None,
            moves: Vec::new(),
            initial_cards: 0,
        };
        engine.initial_cards = engine.card_count();
        engine
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn field(&self) -> &PlayingField {
        &self.field
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Seating order, fixed once play starts. Empty while dealing.
    #[must_use]
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    #[must_use]
    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    #[must_use]
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    #[must_use]
    pub fn loss(&self) -> Option<&LossReason> {
        self.loss.as_ref()
    }

    /// Cards in the deck, in hands, and in rows (seeds included).
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.players.values().map(|p| p.hand.len()).sum::<usize>()
            + self.field.rows().iter().map(|r| r.cards().len()).sum::<usize>()
    }

    /// No card has been created, lost, or duplicated since setup.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        let cards = self
            .deck
            .cards()
            .iter()
            .copied()
            .chain(self.players.values().flat_map(|p| p.hand.iter().copied()))
            .chain(self.field.played_cards());

        let mut seen = FxHashSet::default();
        for card in cards {
            if !seen.insert(card) {
                return false;
            }
        }
        seen.len() + self.field.row_count() == self.initial_cards
            && self.card_count() == self.initial_cards
    }

    // === State machine ===

    /// Perform one transition and return the new phase.
    ///
    /// Terminal phases are sticky.
    pub fn step(&mut self) -> Phase {
        match self.phase {
            Phase::Dealing => {
                self.deal();
                self.seat_players();
            }
            Phase::PlayerTurn(position) => self.take_turn(position),
            Phase::Won | Phase::Lost => {}
        }
        self.phase
    }

    /// Play to the end and return the outcome.
    pub fn run(mut self) -> GameOutcome {
        while !self.step().is_terminal() {}
        self.into_outcome()
    }

    /// Snapshot the table as it stands now.
    #[must_use]
    pub fn into_outcome(self) -> GameOutcome {
        let outcome = GameOutcome::new(
            self.turns_taken,
            self.field.rows().to_vec(),
            self.players.into_vec().into_iter().map(|p| p.hand).collect(),
            self.deck.len(),
            self.loss,
            self.moves,
        );
        info!(
            won = outcome.won,
            turns = outcome.turns_taken,
            cards_remaining = outcome.cards_remaining(),
            "game finished"
        );
        outcome
    }

    fn deal(&mut self) {
        let hand_size = self.config.hand_size;
        for id in PlayerId::all(self.players.player_count()) {
            let hand = self.deck.deal(hand_size);
            debug!(player = %id, cards = hand.len(), "dealt");
            self.players[id].hand = hand;
        }
    }

    /// Draw the seating order, retire anyone with nothing to play, and hand
    /// the first turn out.
    fn seat_players(&mut self) {
        self.order = PlayerId::all(self.players.player_count()).collect();
        self.rng.shuffle(&mut self.order);
        for id in PlayerId::all(self.players.player_count()) {
            self.deactivate_if_done(id);
        }
        self.phase = self.next_turn(0);
    }

    /// First active player at or after `position`, wrapping around.
    fn next_turn(&self, position: usize) -> Phase {
        let seats = self.order.len();
        (0..seats)
            .map(|offset| (position + offset) % seats)
            .find(|&pos| self.players[self.order[pos]].active)
            .map_or(Phase::Won, Phase::PlayerTurn)
    }

    fn take_turn(&mut self, position: usize) {
        let id = self.order[position];
        if !self.players[id].active {
            self.phase = self.next_turn(position + 1);
            return;
        }

        let required = if self.deck.is_empty() {
            1
        } else {
            self.config.cards_per_turn
        };

        let mut failure = None;
        for slot in 0..required {
            if let Err(reason) = self.play_slot(id, slot, required) {
                failure = Some(reason);
                break;
            }
        }

        self.replenish(id);
        self.deactivate_if_done(id);

        match failure {
            Some(reason) => {
                self.loss = Some(reason);
                self.phase = Phase::Lost;
            }
            None => self.phase = self.next_turn(position + 1),
        }
    }

    /// Ask the strategy for one card, check it, and apply it.
    fn play_slot(&mut self, id: PlayerId, slot: usize, required: usize) -> Result<(), LossReason> {
        let hints = self
            .protocol
            .derive(&self.field, &self.players, required, self.last_play.as_ref());
        let hand: HandSnapshot = SmallVec::from_slice(&self.players[id].hand);
        let view = DecisionView {
            hand: &hand,
            field: &self.field,
            hints: &hints,
            player: id,
            oracle: self.oracle,
            max_card: self.config.max_card,
        };

        let Some(choice) = self.strategy.choose(&view) else {
            let legal_moves = view.playable_count();
            if legal_moves > 0 {
                warn!(player = %id, slot, legal_moves, "strategy gave up with legal moves left");
            }
            return Err(LossReason::NoMove {
                player: id,
                slot,
                legal_moves,
            });
        };

        let illegal = |violation: Violation| {
            warn!(player = %id, slot, ?choice, ?violation, "strategy chose an illegal move");
            LossReason::IllegalMove {
                player: id,
                slot,
                violation,
            }
        };
        let Some(&card) = hand.get(choice.card_index) else {
            return Err(illegal(Violation::CardIndexOutOfRange));
        };
        let Some(row) = self.field.row(choice.row) else {
            return Err(illegal(Violation::RowIndexOutOfRange));
        };
        let previous_top = row.top();
        let validity = self.oracle.evaluate_row(card, row);
        if !validity.is_playable() {
            return Err(illegal(Violation::Rejected));
        }

        self.field.apply_move(card, choice.row);
        let removed = self.players[id].take_card(choice.card_index);
        debug_assert_eq!(removed, Some(card));
        self.turns_taken += 1;

        self.moves.push(MoveRecord {
            turn: self.turns_taken,
            player: id,
            card,
            row: choice.row,
            previous_top,
            validity,
        });
        self.last_play = Some(LastPlay {
            player: id,
            row: choice.row,
            card,
            previous_top,
        });
        debug!(
            player = %id,
            card,
            row = choice.row,
            previous_top,
            ?validity,
            turn = self.turns_taken,
            "card played"
        );
        Ok(())
    }

    fn replenish(&mut self, id: PlayerId) {
        let player = &mut self.players[id];
        let mut drawn = 0usize;
        while player.hand.len() < self.config.hand_size {
            let Some(card) = self.deck.draw() else { break };
            player.hand.push(card);
            drawn += 1;
        }
        if drawn > 0 {
            debug!(player = %id, drawn, deck = self.deck.len(), "replenished");
        }
    }

    fn deactivate_if_done(&mut self, id: PlayerId) {
        let player = &mut self.players[id];
        if player.active && player.hand.is_empty() && self.deck.is_empty() {
            player.active = false;
            debug!(player = %id, "player finished");
        }
    }
}

impl std::fmt::Debug for TurnEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnEngine")
            .field("strategy", &self.strategy.name())
            .field("phase", &self.phase)
            .field("turns_taken", &self.turns_taken)
            .field("deck", &self.deck.len())
            .finish()
    }
}
