//! Ordered card containers with per-kind acceptance rules.
//!
//! A pile's "top" is the last element of its card vector. Piles are
//! referenced by a stable integer index (`PileId`) rather than by live
//! references, which keeps moves serializable and undo symmetric.
//!
//! ## Index layout
//!
//! - 0..=6: tableaus
//! - 7..=10: foundations, by canonical suit order
//! - 11: stock
//! - 12: waste

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use crate::core::EngineError;

/// Stable pile index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileId(pub u8);

impl PileId {
    pub const TABLEAU_COUNT: usize = 7;
    pub const FOUNDATION_COUNT: usize = 4;
    pub const PILE_COUNT: usize = 13;

    pub const STOCK: PileId = PileId(11);
    pub const WASTE: PileId = PileId(12);

    /// The id of a tableau column (0..=6).
    #[must_use]
    pub fn tableau(column: usize) -> Self {
        assert!(column < Self::TABLEAU_COUNT, "tableau column out of range");
        PileId(column as u8)
    }

    /// The id of the foundation for a suit.
    #[must_use]
    pub fn foundation(suit: Suit) -> Self {
        PileId((Self::TABLEAU_COUNT + suit.index()) as u8)
    }

    /// All tableau ids in column order.
    pub fn tableaus() -> impl Iterator<Item = PileId> {
        (0..Self::TABLEAU_COUNT).map(PileId::tableau)
    }

    /// All foundation ids in suit order.
    pub fn foundations() -> impl Iterator<Item = PileId> {
        Suit::ALL.iter().map(|&s| PileId::foundation(s))
    }

    /// The raw index into a state's pile table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Is this a tableau id?
    #[must_use]
    pub const fn is_tableau(self) -> bool {
        (self.0 as usize) < Self::TABLEAU_COUNT
    }

    /// Is this a foundation id?
    #[must_use]
    pub const fn is_foundation(self) -> bool {
        let i = self.0 as usize;
        i >= Self::TABLEAU_COUNT && i < Self::TABLEAU_COUNT + Self::FOUNDATION_COUNT
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            PileId::STOCK => write!(f, "stock"),
            PileId::WASTE => write!(f, "waste"),
            id if id.is_tableau() => write!(f, "tableau {}", id.0),
            id => write!(f, "foundation {}", id.0 as usize - PileId::TABLEAU_COUNT),
        }
    }
}

/// The closed set of pile kinds, each with its own acceptance rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PileKind {
    /// Per-suit ascending completion pile.
    Foundation(Suit),
    /// Main playable column.
    Tableau,
    /// Face-down draw pile. Only the engine refills it from the waste.
    Stock,
    /// Face-up discard for cycled stock cards.
    Waste,
}

/// An ordered pile of cards with a kind-specific acceptance predicate.
///
/// Equality compares cards *including* face bits — two piles holding the
/// same cards with different exposure are different board positions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pile {
    id: PileId,
    kind: PileKind,
    cards: Vec<Card>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new(id: PileId, kind: PileKind) -> Self {
        Self {
            id,
            kind,
            cards: Vec::new(),
        }
    }

    /// The pile's stable id.
    #[must_use]
    pub fn id(&self) -> PileId {
        self.id
    }

    /// The pile's kind.
    #[must_use]
    pub fn kind(&self) -> PileKind {
        self.kind
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the pile empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The top card.
    pub fn top(&self) -> Result<&Card, EngineError> {
        self.cards.last().ok_or(EngineError::EmptyPile { pile: self.id })
    }

    /// Mutable access to the top card (for face flips).
    pub fn top_mut(&mut self) -> Result<&mut Card, EngineError> {
        let id = self.id;
        self.cards.last_mut().ok_or(EngineError::EmptyPile { pile: id })
    }

    /// Append a card.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove and return the top card.
    pub fn pop(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::EmptyPile { pile: self.id })
    }

    /// Append a sequence of cards in order.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Remove the suffix starting at `start` as a contiguous block.
    pub fn split_off(&mut self, start: usize) -> Result<Vec<Card>, EngineError> {
        if start >= self.cards.len() {
            return Err(EngineError::RejectedMove {
                reason: "run start beyond pile",
            });
        }
        Ok(self.cards.split_off(start))
    }

    /// Index of the first face-up card, if any.
    #[must_use]
    pub fn face_up_start(&self) -> Option<usize> {
        self.cards.iter().position(|c| c.face_up)
    }

    /// Single-card acceptance, exhaustive over the pile kinds.
    #[must_use]
    pub fn can_accept(&self, card: &Card) -> bool {
        match self.kind {
            PileKind::Foundation(suit) => {
                if card.suit != suit {
                    return false;
                }
                match self.cards.last() {
                    None => card.rank == Rank::ACE,
                    Some(top) => card.rank.value() == top.rank.value() + 1,
                }
            }
            PileKind::Tableau => match self.cards.last() {
                None => card.rank == Rank::KING,
                Some(top) => {
                    top.face_up
                        && top.color() != card.color()
                        && top.rank.is_one_below(card.rank)
                }
            },
            PileKind::Stock | PileKind::Waste => true,
        }
    }

    /// Sequence acceptance: the run must be internally valid and its head
    /// must satisfy the single-card rule.
    #[must_use]
    pub fn can_accept_run(&self, run: &[Card]) -> bool {
        match run.first() {
            None => false,
            Some(head) => Pile::is_valid_run(run) && self.can_accept(head),
        }
    }

    /// Is `run` a movable tableau sequence: all face-up, strictly
    /// alternating colors, strictly descending by one rank?
    #[must_use]
    pub fn is_valid_run(run: &[Card]) -> bool {
        if run.is_empty() || run.iter().any(|c| !c.face_up) {
            return false;
        }
        run.windows(2).all(|pair| {
            pair[0].color() != pair[1].color() && pair[0].rank.is_one_below(pair[1].rank)
        })
    }

    /// Do both piles hold the same cards with the same face bits?
    #[must_use]
    pub fn same_including_face(&self, other: &Pile) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.cards.len() == other.cards.len()
            && self
                .cards
                .iter()
                .zip(other.cards.iter())
                .all(|(a, b)| a.same_including_face(b))
    }

    /// Feed the pile's full content, face bits included, to a hasher.
    pub fn hash_content<H: Hasher>(&self, hasher: &mut H) {
        self.cards.len().hash(hasher);
        for card in &self.cards {
            card.hash(hasher);
            card.face_up.hash(hasher);
        }
    }
}

impl PartialEq for Pile {
    fn eq(&self, other: &Self) -> bool {
        self.same_including_face(other)
    }
}

impl Eq for Pile {}
