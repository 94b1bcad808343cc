//! Depth-limited tree-search agents.
//!
//! Both agents search by executing and undoing moves on the *shared*
//! state object — no state is allocated per node — and restore the state
//! exactly before returning, whatever the search outcome. A search call
//! is referentially transparent from the caller's point of view
//! (asserted by hash equality in debug builds).

pub mod config;
pub mod maximizer;
pub mod minimax;
pub mod stats;

pub use config::SearchConfig;
pub use maximizer::MaximizingAgent;
pub use minimax::MinimaxAgent;
pub use stats::SearchStats;

use crate::core::{EngineError, GameState, PlayerId};

/// An agent that picks moves for a game.
pub trait Agent<S: GameState> {
    /// Choose the next action, or `None` if no action is available.
    fn next_action(&mut self, state: &mut S) -> Result<Option<S::Move>, EngineError>;

    /// Reset internal bookkeeping between games.
    fn reset(&mut self);
}

/// A two-player zero-sum game state.
///
/// Evaluators used with the minimax agent must be antisymmetric between
/// the two players: `eval(s, p) == -eval(s, p.opponent())`.
pub trait AdversarialState: GameState {
    /// The player whose turn it is.
    fn to_move(&self) -> PlayerId;

    /// The winner, if the game is decided.
    fn winner(&self) -> Option<PlayerId>;
}

/// A single-player game state searched by the maximizing agent.
pub trait SinglePlayerState: GameState {
    /// The distinguished skip/abandon action, if the game defines one.
    ///
    /// The maximizing agent scores it with the evaluator's skip policy
    /// instead of recursive search.
    fn skip_move(&self) -> Option<Self::Move> {
        None
    }
}
