//! The 52-card deck with deterministic shuffling.
//!
//! Two decks built with the same seed and shuffle count produce identical
//! orderings. External callers may also supply a pre-built ordering (e.g.
//! a persisted deal); the deck only validates that it is a full
//! permutation.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use crate::core::{EngineError, GameRng};

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// An ordered deck of the 52 unique cards. Dealing pops from the back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The deck in canonical order: suits in `Suit::ALL` order, Ace..King
    /// within each suit, all face-down.
    #[must_use]
    pub fn ordered() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::all().map(move |rank| Card::new(suit, rank)))
            .collect();
        Self { cards }
    }

    /// A deck shuffled `shuffle_count` times with a seeded RNG.
    ///
    /// Deterministic: same (seed, shuffle_count) gives the same ordering.
    #[must_use]
    pub fn shuffled(seed: u64, shuffle_count: u32) -> Self {
        let mut deck = Self::ordered();
        let mut rng = GameRng::new(seed);
        for _ in 0..shuffle_count {
            rng.shuffle(&mut deck.cards);
        }
        deck
    }

    /// Build a deck from a pre-built ordering.
    ///
    /// The sequence must be a permutation of the 52 cards; face bits are
    /// normalized to face-down.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, EngineError> {
        if cards.len() != DECK_SIZE {
            return Err(EngineError::BadDeal {
                reason: "expected exactly 52 cards",
            });
        }

        let mut seen = [false; DECK_SIZE];
        for card in &cards {
            let slot = card.suit.index() * 13 + (card.rank.value() - 1) as usize;
            if seen[slot] {
                return Err(EngineError::BadDeal {
                    reason: "duplicate card in deal",
                });
            }
            seen[slot] = true;
        }

        let cards = cards
            .into_iter()
            .map(|c| Card::new(c.suit, c.rank))
            .collect();
        Ok(Self { cards })
    }

    /// Remaining card count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the deck exhausted?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deal one card from the back.
    pub fn deal(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::BadDeal {
            reason: "deck exhausted during deal",
        })
    }

    /// The remaining cards in order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Consume the deck, returning its ordering.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_has_all_cards() {
        let deck = Deck::ordered();
        assert_eq!(deck.len(), DECK_SIZE);

        for suit in Suit::ALL {
            for rank in Rank::all() {
                assert!(deck.cards().contains(&Card::new(suit, rank)));
            }
        }
    }

    #[test]
    fn test_deterministic_shuffle() {
        let a = Deck::shuffled(42, 7);
        let b = Deck::shuffled(42, 7);
        assert_eq!(a, b);

        let c = Deck::shuffled(42, 8);
        assert_ne!(a, c);

        let d = Deck::shuffled(43, 7);
        assert_ne!(a, d);
    }

    #[test]
    fn test_shuffle_preserves_cards() {
        let mut cards = Deck::shuffled(1, 3).into_cards();
        cards.sort_by_key(|c| (c.suit.index(), c.rank.value()));
        assert_eq!(cards, Deck::ordered().into_cards());
    }

    #[test]
    fn test_from_cards_validates() {
        let deck = Deck::from_cards(Deck::shuffled(9, 1).into_cards()).unwrap();
        assert_eq!(deck.len(), DECK_SIZE);

        let short = vec![Card::new(Suit::Hearts, Rank::ACE)];
        assert!(matches!(
            Deck::from_cards(short),
            Err(EngineError::BadDeal { .. })
        ));

        let mut dup = Deck::ordered().into_cards();
        dup[0] = dup[1];
        assert!(matches!(
            Deck::from_cards(dup),
            Err(EngineError::BadDeal { .. })
        ));
    }

    #[test]
    fn test_deal_pops_from_back() {
        let mut deck = Deck::ordered();
        let expected = *deck.cards().last().unwrap();

        let dealt = deck.deal().unwrap();
        assert_eq!(dealt, expected);
        assert_eq!(deck.len(), DECK_SIZE - 1);
    }

    #[test]
    fn test_deal_exhaustion() {
        let mut deck = Deck::ordered();
        for _ in 0..DECK_SIZE {
            deck.deal().unwrap();
        }
        assert!(matches!(deck.deal(), Err(EngineError::BadDeal { .. })));
    }
}
