//! Card identity: suit, rank, color, and the mutable face bit.
//!
//! Identity equality is by (suit, rank) only. The face-up flag is display
//! state that moves flip as a side effect; it participates in neither
//! `PartialEq` nor `Hash`. State types that need face bits in their
//! structural hash mix them in explicitly.

use serde::{Deserialize, Serialize};

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All four suits in canonical order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// The card color this suit carries.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Diamonds | Suit::Hearts => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    /// Canonical index 0..=3 (clubs, diamonds, hearts, spades).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    fn glyph(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

/// Card color derived from suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Card rank, 1 (Ace) through 13 (King).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const KING: Rank = Rank(13);

    /// Create a rank, panicking outside 1..=13.
    #[must_use]
    pub fn new(value: u8) -> Self {
        assert!((1..=13).contains(&value), "rank must be 1..=13");
        Rank(value)
    }

    /// All thirteen ranks, Ace first.
    pub fn all() -> impl Iterator<Item = Rank> {
        (1..=13).map(Rank)
    }

    /// The raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Is `other` exactly one rank below this one?
    #[must_use]
    pub const fn is_one_below(self, other: Rank) -> bool {
        other.0 + 1 == self.0
    }

    fn label(self) -> &'static str {
        match self.0 {
            1 => "A",
            2 => "2",
            3 => "3",
            4 => "4",
            5 => "5",
            6 => "6",
            7 => "7",
            8 => "8",
            9 => "9",
            10 => "10",
            11 => "J",
            12 => "Q",
            _ => "K",
        }
    }
}

/// A playing card.
///
/// `face_up` is mutable display state; it is excluded from equality and
/// hashing so that a card flipped during play is still the same card.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub face_up: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            face_up: false,
        }
    }

    /// Create a face-up card.
    #[must_use]
    pub const fn face_up(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            face_up: true,
        }
    }

    /// The card's color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.suit.color()
    }

    /// Same identity and same face bit. Plain `==` ignores the face bit.
    #[must_use]
    pub fn same_including_face(&self, other: &Card) -> bool {
        self == other && self.face_up == other.face_up
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }
}

impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.suit.hash(hasher);
        self.rank.hash(hasher);
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.glyph())
    }
}
