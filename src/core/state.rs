//! The cached/undoable game-state contract.
//!
//! ## GameState
//!
//! Every game implements `GameState`: pure move generation, a mutation and
//! its inverse, a structural hash, and terminal predicates. The trait's
//! provided methods are the *only* mutation entry points: `execute_move`
//! and `undo_move` invalidate the legal-move and hash caches before
//! delegating to the game-specific `apply`/`revert`, maintain the move
//! counter, and feed the optional history log.
//!
//! ## StateCaches
//!
//! Owned by each concrete state. Both caches are tagged dirty/clean via
//! `Option`; invalidation happens at the choke point above, never at
//! individual mutation sites.
//!
//! ## Caller contract
//!
//! `undo_move` assumes a single linear history: the last executed move is
//! undone first. Undoing out of order is undefined behavior the engine
//! does not defend against; only the shallow "nothing to undo" case is
//! detected by concrete states.

use std::hash::{Hash, Hasher};

use im::Vector;
use rustc_hash::FxHasher;

use super::error::EngineError;

/// Hash a value with the engine's structural hasher.
///
/// Fast, stable within a process, and not collision-free — callers use it
/// for memoization, not identity.
pub fn fx_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Lazily maintained caches owned by a concrete game state.
///
/// The history log is optional because search drives `execute_move` and
/// `undo_move` in tight loops and should not pay for logging.
#[derive(Clone, Debug)]
pub struct StateCaches<M: Clone> {
    legal_moves: Option<Vec<M>>,
    hash: Option<u64>,
    move_count: u32,
    history: Option<Vector<M>>,
}

impl<M: Clone> StateCaches<M> {
    /// Create clean caches with history tracking disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            legal_moves: None,
            hash: None,
            move_count: 0,
            history: None,
        }
    }

    /// Mark both caches dirty. Called on every execute/undo.
    pub fn invalidate(&mut self) {
        self.legal_moves = None;
        self.hash = None;
    }

    /// The cached legal moves, if clean.
    #[must_use]
    pub fn legal_moves(&self) -> Option<&[M]> {
        self.legal_moves.as_deref()
    }

    /// Store freshly generated legal moves.
    pub fn store_legal_moves(&mut self, moves: Vec<M>) {
        self.legal_moves = Some(moves);
    }

    /// The cached hash, if clean.
    #[must_use]
    pub fn hash(&self) -> Option<u64> {
        self.hash
    }

    /// Store a freshly computed hash.
    pub fn store_hash(&mut self, hash: u64) {
        self.hash = Some(hash);
    }

    /// Number of moves executed and not undone.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Enable the history log (cleared on enable).
    pub fn enable_history(&mut self) {
        self.history = Some(Vector::new());
    }

    /// Disable and drop the history log.
    pub fn disable_history(&mut self) {
        self.history = None;
    }

    /// The history log, if tracking is enabled.
    #[must_use]
    pub fn history(&self) -> Option<&Vector<M>> {
        self.history.as_ref()
    }

    /// Record a successful execute.
    pub fn note_executed(&mut self, mv: &M) {
        self.move_count += 1;
        if let Some(history) = self.history.as_mut() {
            history.push_back(mv.clone());
        }
    }

    /// Record a successful undo.
    pub fn note_undone(&mut self) {
        self.move_count = self.move_count.saturating_sub(1);
        if let Some(history) = self.history.as_mut() {
            history.pop_back();
        }
    }

    /// Reset to the clean initial configuration, preserving whether history
    /// tracking is enabled.
    pub fn reset(&mut self) {
        self.legal_moves = None;
        self.hash = None;
        self.move_count = 0;
        if let Some(history) = self.history.as_mut() {
            history.clear();
        }
    }
}

impl<M: Clone> Default for StateCaches<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// A mutable, undoable game state with lazily cached derived data.
///
/// Implementations provide the game-specific pieces; the provided methods
/// enforce the invalidation discipline. Search agents call `execute_move`
/// and `undo_move` in long chains against one shared state object, so
/// `undo_move(m)` after `execute_move(m)` must restore the state
/// bit-for-bit (piles, counters, undo bookkeeping) for every move kind.
pub trait GameState {
    /// The move type: an immutable value describing a state transition.
    type Move: Clone + PartialEq + std::fmt::Debug;

    /// Access the caches owned by this state.
    fn caches(&self) -> &StateCaches<Self::Move>;

    /// Mutable access to the caches owned by this state.
    fn caches_mut(&mut self) -> &mut StateCaches<Self::Move>;

    /// Enumerate all legal moves. Pure: must not mutate game state.
    fn generate_moves(&self) -> Vec<Self::Move>;

    /// Apply a move's mutation. Called only through `execute_move`.
    ///
    /// Must re-check validity and return `EngineError::RejectedMove` for a
    /// move that is no longer legal, leaving the state untouched.
    fn apply(&mut self, mv: &Self::Move) -> Result<(), EngineError>;

    /// Invert a move's mutation. Called only through `undo_move`.
    fn revert(&mut self, mv: &Self::Move) -> Result<(), EngineError>;

    /// Compute the structural hash from content, not identity: two
    /// independently built states with equal content hash equal.
    fn compute_hash(&self) -> u64;

    /// Has the game been won?
    fn is_won(&self) -> bool;

    /// Is the game lost (or judged unwinnable by the game's policy)?
    fn is_lost(&self) -> bool;

    /// Restore the initial position. Implementations must also call
    /// `self.caches_mut().reset()`.
    fn reset(&mut self);

    // === Provided: the invalidation choke point ===

    /// The legal moves from this position, served from cache when clean.
    ///
    /// Returns an owned list — callers never see a live reference into the
    /// cache, so mutating the result cannot corrupt it.
    fn legal_moves(&mut self) -> Vec<Self::Move> {
        if let Some(moves) = self.caches().legal_moves() {
            return moves.to_vec();
        }
        let moves = self.generate_moves();
        self.caches_mut().store_legal_moves(moves.clone());
        moves
    }

    /// The structural hash, served from cache when clean.
    fn hash_value(&mut self) -> u64 {
        if let Some(hash) = self.caches().hash() {
            return hash;
        }
        let hash = self.compute_hash();
        self.caches_mut().store_hash(hash);
        hash
    }

    /// Execute a move: dirty both caches, apply, bump the move counter.
    ///
    /// Caches are invalidated *before* `apply` so no failure path can leave
    /// a stale cache describing a mutated board.
    fn execute_move(&mut self, mv: &Self::Move) -> Result<(), EngineError> {
        self.caches_mut().invalidate();
        self.apply(mv)?;
        self.caches_mut().note_executed(mv);
        Ok(())
    }

    /// Undo the most recently executed move.
    fn undo_move(&mut self, mv: &Self::Move) -> Result<(), EngineError> {
        self.caches_mut().invalidate();
        self.revert(mv)?;
        self.caches_mut().note_undone();
        Ok(())
    }

    /// Number of moves executed and not undone.
    fn move_count(&self) -> u32 {
        self.caches().move_count()
    }

    /// Won or lost.
    fn is_terminal(&self) -> bool {
        self.is_won() || self.is_lost()
    }
}
