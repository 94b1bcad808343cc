//! State evaluation and move ordering.
//!
//! Evaluators score states and moves from a player's perspective. The
//! engine treats the underlying weight vector as an opaque, swappable
//! strategy object: an external optimizer tunes it, the engine only reads
//! it through this contract.

use std::cmp::Ordering;

use crate::core::{EngineError, GameState, PlayerId};

pub mod klondike;
pub mod weights;

pub use klondike::KlondikeEvaluator;
pub use weights::WeightVector;

/// Default score an evaluator assigns to abandoning a game.
pub const DEFAULT_SKIP_PENALTY: f64 = -10_000.0;

/// Scores states and moves; orders move lists.
pub trait StateEvaluator<S: GameState> {
    /// Score a state from a player's perspective. Higher is better.
    fn evaluate_state(&self, state: &mut S, perspective: PlayerId) -> f64;

    /// Score a move by executing it, evaluating the result, and undoing.
    ///
    /// The state is restored exactly before returning.
    fn evaluate_move(
        &self,
        state: &mut S,
        mv: &S::Move,
        perspective: PlayerId,
    ) -> Result<f64, EngineError> {
        state.execute_move(mv)?;
        let score = self.evaluate_state(state, perspective);
        state.undo_move(mv)?;
        Ok(score)
    }

    /// Score all moves and sort them, best first or worst first.
    ///
    /// The sort is stable: ties keep their generation order.
    fn order_moves(
        &self,
        state: &mut S,
        moves: Vec<S::Move>,
        perspective: PlayerId,
        best_first: bool,
    ) -> Result<Vec<(S::Move, f64)>, EngineError> {
        let mut scored = Vec::with_capacity(moves.len());
        for mv in moves {
            let score = self.evaluate_move(state, &mv, perspective)?;
            scored.push((mv, score));
        }

        scored.sort_by(|a, b| {
            let ord = a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal);
            if best_first {
                ord.reverse()
            } else {
                ord
            }
        });
        Ok(scored)
    }

    /// The skip policy: score for abandoning the game here instead of
    /// searching on. A fixed penalty by default.
    fn skip_score(&self, _state: &mut S) -> f64 {
        DEFAULT_SKIP_PENALTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{fx_hash, StateCaches};

    /// Minimal state: one pile of tokens, moves add 1..=3 tokens.
    #[derive(Clone, Debug, Default)]
    struct TokenGame {
        tokens: u32,
        caches: StateCaches<u32>,
    }

    impl GameState for TokenGame {
        type Move = u32;

        fn caches(&self) -> &StateCaches<u32> {
            &self.caches
        }

        fn caches_mut(&mut self) -> &mut StateCaches<u32> {
            &mut self.caches
        }

        fn generate_moves(&self) -> Vec<u32> {
            vec![1, 2, 3]
        }

        fn apply(&mut self, mv: &u32) -> Result<(), EngineError> {
            self.tokens += mv;
            Ok(())
        }

        fn revert(&mut self, mv: &u32) -> Result<(), EngineError> {
            self.tokens -= mv;
            Ok(())
        }

        fn compute_hash(&self) -> u64 {
            fx_hash(&self.tokens)
        }

        fn is_won(&self) -> bool {
            self.tokens >= 10
        }

        fn is_lost(&self) -> bool {
            false
        }

        fn reset(&mut self) {
            self.tokens = 0;
            self.caches.reset();
        }
    }

    /// Prefers more tokens.
    struct TokenEvaluator;

    impl StateEvaluator<TokenGame> for TokenEvaluator {
        fn evaluate_state(&self, state: &mut TokenGame, _perspective: PlayerId) -> f64 {
            f64::from(state.tokens)
        }
    }

    #[test]
    fn test_evaluate_move_restores_state() {
        let mut state = TokenGame::default();
        let before_hash = state.hash_value();

        let score = TokenEvaluator
            .evaluate_move(&mut state, &2, PlayerId::FIRST)
            .unwrap();

        assert_eq!(score, 2.0);
        assert_eq!(state.hash_value(), before_hash);
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn test_order_moves_best_first() {
        let mut state = TokenGame::default();
        let moves = state.legal_moves();

        let ordered = TokenEvaluator
            .order_moves(&mut state, moves.clone(), PlayerId::FIRST, true)
            .unwrap();
        let scores: Vec<f64> = ordered.iter().map(|(_, s)| *s).collect();
        assert_eq!(scores, vec![3.0, 2.0, 1.0]);

        let ordered = TokenEvaluator
            .order_moves(&mut state, moves, PlayerId::FIRST, false)
            .unwrap();
        let scores: Vec<f64> = ordered.iter().map(|(_, s)| *s).collect();
        assert_eq!(scores, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_order_moves_ties_keep_generation_order() {
        struct Flat;
        impl StateEvaluator<TokenGame> for Flat {
            fn evaluate_state(&self, _state: &mut TokenGame, _p: PlayerId) -> f64 {
                0.0
            }
        }

        let mut state = TokenGame::default();
        let ordered = Flat
            .order_moves(&mut state, vec![1, 2, 3], PlayerId::FIRST, true)
            .unwrap();
        let moves: Vec<u32> = ordered.into_iter().map(|(m, _)| m).collect();
        assert_eq!(moves, vec![1, 2, 3]);
    }

    #[test]
    fn test_default_skip_penalty() {
        let mut state = TokenGame::default();
        assert_eq!(TokenEvaluator.skip_score(&mut state), DEFAULT_SKIP_PENALTY);
    }
}
