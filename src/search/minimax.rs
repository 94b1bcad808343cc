//! Adversarial minimax for two-player zero-sum games.
//!
//! Implemented in negamax form: every node is scored from the
//! perspective of the player to move there and negated per ply, which is
//! equivalent to alternating maximize/minimize. Leaves — depth exhausted
//! or terminal — are scored by the evaluator from the perspective of the
//! player to move at the leaf.
//!
//! ## Tie-breaking
//!
//! Root ties keep the first move in generation order: a later move must
//! score *strictly* higher to displace the incumbent. This is documented
//! behavior, not an accident of sorting.

use std::time::Instant;

use log::debug;

use super::{AdversarialState, Agent, SearchConfig, SearchStats};
use crate::core::{EngineError, GameState};
use crate::eval::StateEvaluator;

/// Depth-limited minimax agent.
///
/// Searches by executing and undoing moves on the shared state; no state
/// is cloned per node.
pub struct MinimaxAgent<E> {
    evaluator: E,
    config: SearchConfig,
    stats: SearchStats,
}

impl<E> MinimaxAgent<E> {
    /// Create an agent with the given evaluator and configuration.
    pub fn new(evaluator: E, config: SearchConfig) -> Self {
        Self {
            evaluator,
            config,
            stats: SearchStats::new(),
        }
    }

    /// Statistics from the most recent search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The evaluator in use.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Pick the best move for the player to move, or `None` if the
    /// position is terminal or has no moves.
    pub fn choose<S>(&mut self, state: &mut S) -> Result<Option<S::Move>, EngineError>
    where
        S: AdversarialState,
        E: StateEvaluator<S>,
    {
        let start = Instant::now();
        self.stats.reset();

        if state.is_terminal() {
            return Ok(None);
        }
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Ok(None);
        }

        let restore_hash = state.hash_value();
        let child_depth = self.config.max_depth.saturating_sub(1);

        let mut best: Option<(S::Move, f64)> = None;
        for mv in moves {
            state.execute_move(&mv)?;
            let score = -self.negamax(state, child_depth, 1)?;
            state.undo_move(&mv)?;

            if best.as_ref().map_or(true, |(_, b)| score > *b) {
                best = Some((mv, score));
            }
        }

        debug_assert_eq!(
            state.hash_value(),
            restore_hash,
            "search must restore the state it was given"
        );

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            "minimax: {} nodes, {} leaves, depth {}, score {:?}",
            self.stats.nodes_visited,
            self.stats.leaves_evaluated,
            self.stats.max_depth,
            best.as_ref().map(|(_, s)| *s),
        );

        Ok(best.map(|(mv, _)| mv))
    }

    fn negamax<S>(&mut self, state: &mut S, depth: u32, ply: u16) -> Result<f64, EngineError>
    where
        S: AdversarialState,
        E: StateEvaluator<S>,
    {
        self.stats.nodes_visited += 1;
        self.stats.record_depth(ply);

        if depth == 0 || state.is_terminal() {
            self.stats.leaves_evaluated += 1;
            let perspective = state.to_move();
            return Ok(self.evaluator.evaluate_state(state, perspective));
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            self.stats.leaves_evaluated += 1;
            let perspective = state.to_move();
            return Ok(self.evaluator.evaluate_state(state, perspective));
        }

        let mut best = f64::NEG_INFINITY;
        for mv in moves {
            state.execute_move(&mv)?;
            let score = -self.negamax(state, depth - 1, ply + 1)?;
            state.undo_move(&mv)?;
            if score > best {
                best = score;
            }
        }
        Ok(best)
    }
}

impl<S, E> Agent<S> for MinimaxAgent<E>
where
    S: AdversarialState,
    E: StateEvaluator<S>,
{
    fn next_action(&mut self, state: &mut S) -> Result<Option<S::Move>, EngineError> {
        self.choose(state)
    }

    fn reset(&mut self) {
        self.stats.reset();
    }
}
