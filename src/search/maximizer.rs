//! Best-first maximizing search for single-player games.
//!
//! No adversary: the agent takes the depth-limited best score over its
//! own moves. Root moves are ordered best-first by the evaluator before
//! expansion. The distinguished skip pseudo-move is scored by the
//! evaluator's skip policy instead of recursion, so an agent can abandon
//! a game whose every continuation scores worse than giving up.

use std::time::Instant;

use log::{debug, trace};

use super::{Agent, SearchConfig, SearchStats, SinglePlayerState};
use crate::core::{EngineError, GameState, PlayerId};
use crate::eval::StateEvaluator;

/// Depth-limited maximizing agent, optionally iteratively deepened.
pub struct MaximizingAgent<E> {
    evaluator: E,
    config: SearchConfig,
    stats: SearchStats,
}

impl<E> MaximizingAgent<E> {
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

    /// Pick the highest-scoring move, or `None` on a terminal position.
    pub fn choose<S>(&mut self, state: &mut S) -> Result<Option<S::Move>, EngineError>
    where
        S: SinglePlayerState,
        E: StateEvaluator<S>,
    {
        let start = Instant::now();
        self.stats.reset();

        if state.is_terminal() {
            return Ok(None);
        }

        let restore_hash = state.hash_value();

        let mut best = None;
        if self.config.iterative_deepening {
            for depth in 1..=self.config.max_depth.max(1) {
                best = self.search_root(state, depth)?;
                trace!(
                    "maximizer: depth {depth} best {:?}",
                    best.as_ref().map(|(_, s)| *s)
                );
            }
        } else {
            best = self.search_root(state, self.config.max_depth)?;
        }

        debug_assert_eq!(
            state.hash_value(),
            restore_hash,
            "search must restore the state it was given"
        );

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            "maximizer: {} nodes, {} leaves, depth {}",
            self.stats.nodes_visited, self.stats.leaves_evaluated, self.stats.max_depth,
        );

        Ok(best.map(|(mv, _)| mv))
    }

    /// One full search from the root at a fixed depth budget.
    fn search_root<S>(
        &mut self,
        state: &mut S,
        depth: u32,
    ) -> Result<Option<(S::Move, f64)>, EngineError>
    where
        S: SinglePlayerState,
        E: StateEvaluator<S>,
    {
        let skip = state.skip_move();
        let moves: Vec<S::Move> = state
            .legal_moves()
            .into_iter()
            .filter(|m| skip.as_ref() != Some(m))
            .collect();

        let ordered = self
            .evaluator
            .order_moves(state, moves, PlayerId::FIRST, true)?;

        let child_depth = depth.saturating_sub(1);
        let mut best: Option<(S::Move, f64)> = None;
        for (mv, _) in ordered {
            state.execute_move(&mv)?;
            let score = self.best_score(state, child_depth, 1)?;
            state.undo_move(&mv)?;

            if best.as_ref().map_or(true, |(_, b)| score > *b) {
                best = Some((mv, score));
            }
        }

        // The skip pseudo-move competes on its policy score alone.
        if let Some(skip_mv) = skip {
            let score = self.evaluator.skip_score(state);
            if best.as_ref().map_or(true, |(_, b)| score > *b) {
                best = Some((skip_mv, score));
            }
        }

        Ok(best)
    }

    fn best_score<S>(&mut self, state: &mut S, depth: u32, ply: u16) -> Result<f64, EngineError>
    where
        S: SinglePlayerState,
        E: StateEvaluator<S>,
    {
        self.stats.nodes_visited += 1;
        self.stats.record_depth(ply);

        if depth == 0 || state.is_terminal() {
            self.stats.leaves_evaluated += 1;
            return Ok(self.evaluator.evaluate_state(state, PlayerId::FIRST));
        }

        let skip = state.skip_move();
        let moves: Vec<S::Move> = state
            .legal_moves()
            .into_iter()
            .filter(|m| skip.as_ref() != Some(m))
            .collect();

        if moves.is_empty() && skip.is_none() {
            self.stats.leaves_evaluated += 1;
            return Ok(self.evaluator.evaluate_state(state, PlayerId::FIRST));
        }

        // Abandoning stays available at every level, at its policy score.
        let mut best = match skip {
            Some(_) => self.evaluator.skip_score(state),
            None => f64::NEG_INFINITY,
        };
        for mv in moves {
            state.execute_move(&mv)?;
            let score = self.best_score(state, depth - 1, ply + 1)?;
            state.undo_move(&mv)?;
            if score > best {
                best = score;
            }
        }
        Ok(best)
    }
}

impl<S, E> Agent<S> for MaximizingAgent<E>
where
    S: SinglePlayerState,
    E: StateEvaluator<S>,
{
    fn next_action(&mut self, state: &mut S) -> Result<Option<S::Move>, EngineError> {
        self.choose(state)
    }

    fn reset(&mut self) {
        self.stats.reset();
    }
}
