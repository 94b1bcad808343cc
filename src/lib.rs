//! # ply-engine
//!
//! A turn-based game engine core: mutable, undoable game states, a
//! pluggable move-generation/evaluation contract, and depth-limited
//! tree-search agents built on top of it.
//!
//! ## Design Principles
//!
//! 1. **One state, many plies**: search agents execute and undo moves on a
//!    single shared state object instead of allocating a state per node.
//!
//! 2. **Caches with a choke point**: legal moves and the structural hash
//!    are computed lazily and invalidated in exactly one place — the
//!    `execute_move`/`undo_move` entry points. No other code path may
//!    mutate a state.
//!
//! 3. **Closed move unions**: move and pile kinds are enums with
//!    exhaustive matching, never runtime type checks.
//!
//! ## Architecture
//!
//! - **Undo via restoration records**: moves that are not self-inverse
//!   (Klondike) push a small per-kind record of the face bits a later undo
//!   must restore; the rest of the inverse is recovered from the move
//!   itself.
//!
//! - **Opaque strategy objects**: evaluators are linear sums over a
//!   `WeightVector` supplied by an external optimizer. The engine reads
//!   weights, never tunes them.
//!
//! ## Modules
//!
//! - `core`: errors, player ids, deterministic RNG, the cached/undoable
//!   `GameState` contract
//! - `cards`: card, deck, and pile primitives for the 52-card domain
//! - `klondike`: the solitaire state machine — the canonical complex
//!   instance of the contract
//! - `eval`: state evaluators, move ordering, weight vectors
//! - `search`: minimax and single-player maximizing agents
//! - `games`: small two-player games exercising the adversarial agent
//! - `runner`: episode driver with cooperative cancellation

pub mod core;
pub mod cards;
pub mod klondike;
pub mod eval;
pub mod search;
pub mod games;
pub mod runner;

// Re-export commonly used types
pub use crate::core::{
    EngineError, PlayerId,
    GameRng, GameRngState,
    GameState, StateCaches,
};

pub use crate::cards::{
    Card, Color, Rank, Suit,
    Deck, Pile, PileId, PileKind,
};

pub use crate::klondike::{
    KlondikeMove, KlondikeState, MultiCardMove, SingleCardMove,
    UnwinnablePolicy,
};

pub use crate::eval::{KlondikeEvaluator, StateEvaluator, WeightVector};

pub use crate::search::{
    Agent, AdversarialState, SinglePlayerState,
    MaximizingAgent, MinimaxAgent,
    SearchConfig, SearchStats,
};

pub use crate::runner::{EpisodeOutcome, EpisodeStats, Runner, RunnerConfig};
