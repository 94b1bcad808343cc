//! The Klondike move model.
//!
//! A move is an immutable value describing a state transition. Piles are
//! referenced by `PileId`, never by live references, so moves serialize
//! and undo stays symmetric. Validity is a pure function of (move, state)
//! and is re-checked before every execution — the legal set is
//! state-dependent and can change between generation and execution inside
//! a search.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, PileId};

/// A card sequence payload. Tableau runs top out at 13 cards and the
/// common cycle batch is 3, so the inline capacity avoids heap traffic in
/// search loops.
pub type CardRun = SmallVec<[Card; 8]>;

/// Move one card between piles.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SingleCardMove {
    pub from: PileId,
    pub to: PileId,
    pub card: Card,
}

/// Move an ordered sequence of cards between piles.
///
/// Used for Stock→Waste cycling, Waste→Stock recycling, and
/// tableau-to-tableau run moves. `cards` is the sequence in destination
/// append order: the last element ends up on top.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultiCardMove {
    pub from: PileId,
    pub to: PileId,
    pub cards: CardRun,
}

impl MultiCardMove {
    /// Is this a Stock→Waste cycle?
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        self.from == PileId::STOCK && self.to == PileId::WASTE
    }

    /// Is this a Waste→Stock recycle?
    #[must_use]
    pub fn is_recycle(&self) -> bool {
        self.from == PileId::WASTE && self.to == PileId::STOCK
    }
}

/// The closed union of Klondike move kinds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KlondikeMove {
    Single(SingleCardMove),
    Multi(MultiCardMove),
    /// Abandon the game. Terminates an agent's search branch; the board is
    /// untouched and only an abandoned flag is set on execute.
    Skip,
}

impl KlondikeMove {
    /// Create a single-card move.
    #[must_use]
    pub fn single(from: PileId, to: PileId, card: Card) -> Self {
        KlondikeMove::Single(SingleCardMove { from, to, card })
    }

    /// Create a multi-card move.
    #[must_use]
    pub fn multi(from: PileId, to: PileId, cards: impl IntoIterator<Item = Card>) -> Self {
        KlondikeMove::Multi(MultiCardMove {
            from,
            to,
            cards: cards.into_iter().collect(),
        })
    }

    /// Is this a Stock→Waste cycle?
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        matches!(self, KlondikeMove::Multi(mv) if mv.is_cycle())
    }

    /// Is this a Waste→Stock recycle?
    #[must_use]
    pub fn is_recycle(&self) -> bool {
        matches!(self, KlondikeMove::Multi(mv) if mv.is_recycle())
    }
}

impl std::fmt::Display for KlondikeMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KlondikeMove::Single(mv) => {
                write!(f, "{} {} -> {}", mv.card, mv.from, mv.to)
            }
            KlondikeMove::Multi(mv) => {
                write!(f, "{} cards {} -> {}", mv.cards.len(), mv.from, mv.to)
            }
            KlondikeMove::Skip => write!(f, "skip"),
        }
    }
}
