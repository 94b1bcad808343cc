//! Small two-player games exercising the adversarial agent.
//!
//! Each game implements the cached-state contract with self-inverse
//! moves: undoing a placement just removes the piece, so no undo
//! side-channel is needed.
//!
//! For these games `is_won` reports a *decided* game (either player has a
//! line) and `is_lost` a drawn, full board; agents consult
//! `AdversarialState::winner` for who actually won.

pub mod connect_four;
pub mod gomoku;
pub mod tictactoe;

pub use connect_four::ConnectFour;
pub use gomoku::Gomoku;
pub use tictactoe::TicTacToe;

use crate::core::PlayerId;
use crate::eval::StateEvaluator;
use crate::search::AdversarialState;

/// Evaluator that only distinguishes decided games: +1000 for a win for
/// the perspective player, -1000 for a loss, 0 otherwise. Antisymmetric
/// by construction, as the minimax agent requires.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalEvaluator;

impl<S: AdversarialState> StateEvaluator<S> for TerminalEvaluator {
    fn evaluate_state(&self, state: &mut S, perspective: PlayerId) -> f64 {
        match state.winner() {
            Some(winner) if winner == perspective => 1000.0,
            Some(_) => -1000.0,
            None => 0.0,
        }
    }
}
