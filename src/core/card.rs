//! Cards and the shared draw pile.
//!
//! A card is just its face value. Values `1` and `max_card` are reserved as
//! row seeds, so a playable deck holds every value in `[2, max_card)` at most
//! once. The top of the deck is the *end* of the vector: dealing and drawing
//! both pop from the back.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::SetupError;
use super::rng::GameRng;

/// Face value of a card.
pub type Card = i32;

/// Lowest value that can appear in a deck.
pub const MIN_CARD: Card = 2;

/// Ordered draw pile (top = end of vec).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Wrap an explicit card sequence. The last card is the top.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Every playable value for a table whose descending rows start at
    /// `max_card`, in ascending order (unshuffled).
    ///
    /// ```
    /// use thegame_sim::core::Deck;
    ///
    /// let deck = Deck::standard(6);
    /// assert_eq!(deck.cards(), &[2, 3, 4, 5]);
    /// ```
    #[must_use]
    pub fn standard(max_card: Card) -> Self {
        Self {
            cards: (MIN_CARD..max_card).collect(),
        }
    }

    /// Shuffle the remaining cards in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Take up to `count` cards off the top.
    ///
    /// Cards come out in draw order, so the first element of the result is
    /// the card that was on top.
    pub fn deal(&mut self, count: usize) -> Vec<Card> {
        let take = count.min(self.cards.len());
        let mut dealt = self.cards.split_off(self.cards.len() - take);
        dealt.reverse();
        dealt
    }

    /// Draw the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Remaining cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Label for a shuffle: every card followed by `_`, bottom first.
    ///
    /// Only used to group simulation records that share a starting deck.
    #[must_use]
    pub fn deck_id(&self) -> String {
        self.cards.iter().map(|card| format!("{card}_")).collect()
    }

    /// Check every card is playable under `max_card` and appears once.
    pub fn validate(&self, max_card: Card) -> Result<(), SetupError> {
        let mut seen = FxHashSet::default();
        check_cards(self.cards.iter().copied(), max_card, &mut seen)
    }
}

/// Range and uniqueness check shared by deck and resumed-table setup.
///
/// `seen` accumulates across calls so several card groups can be checked
/// against each other.
pub(crate) fn check_cards(
    cards: impl IntoIterator<Item = Card>,
    max_card: Card,
    seen: &mut FxHashSet<Card>,
) -> Result<(), SetupError> {
    for card in cards {
        if !(MIN_CARD..max_card).contains(&card) {
            return Err(SetupError::CardOutOfRange { card, max: max_card });
        }
        if !seen.insert(card) {
            return Err(SetupError::DuplicateCard(card));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_deck() {
        let deck = Deck::standard(100);
        assert_eq!(deck.len(), 98);
        assert_eq!(deck.cards().first(), Some(&2));
        assert_eq!(deck.cards().last(), Some(&99));
        assert!(deck.validate(100).is_ok());
    }

    #[test]
    fn test_deal_is_lifo() {
        let mut deck = Deck::from_cards(vec![9, 8, 7, 6, 5, 4, 3, 2]);
        let hand = deck.deal(3);
        assert_eq!(hand, vec![2, 3, 4]);
        assert_eq!(deck.cards(), &[9, 8, 7, 6, 5]);
    }

    #[test]
    fn test_deal_more_than_available() {
        let mut deck = Deck::from_cards(vec![5, 6]);
        assert_eq!(deck.deal(4), vec![6, 5]);
        assert!(deck.is_empty());
        assert!(deck.deal(1).is_empty());
    }

    #[test]
    fn test_draw() {
        let mut deck = Deck::from_cards(vec![3, 4]);
        assert_eq!(deck.draw(), Some(4));
        assert_eq!(deck.draw(), Some(3));
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut rng = GameRng::new(7);
        let mut deck = Deck::standard(30);
        deck.shuffle(&mut rng);

        assert_ne!(deck, Deck::standard(30));
        let mut sorted = deck.cards().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, Deck::standard(30).cards());
    }

    #[test]
    fn test_deck_id() {
        let deck = Deck::from_cards(vec![12, 3, 45]);
        assert_eq!(deck.deck_id(), "12_3_45_");
        assert_eq!(Deck::default().deck_id(), "");
    }

    #[test]
    fn test_validate_rejects_bad_cards() {
        assert_eq!(
            Deck::from_cards(vec![2, 1]).validate(10),
            Err(SetupError::CardOutOfRange { card: 1, max: 10 })
        );
        assert_eq!(
            Deck::from_cards(vec![2, 10]).validate(10),
            Err(SetupError::CardOutOfRange { card: 10, max: 10 })
        );
        assert_eq!(
            Deck::from_cards(vec![4, 5, 4]).validate(10),
            Err(SetupError::DuplicateCard(4))
        );
    }
}
