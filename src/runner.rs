//! Episode driver: plays one state to termination with an agent.
//!
//! The runner owns the control flow the engine's collaborators would
//! otherwise reimplement: ask the agent for a move, execute it
//! permanently, repeat. Cancellation is cooperative and checked *between*
//! moves — never inside the search recursion, which always runs to
//! completion once started.
//!
//! Parallel simulation is the caller's business: give each worker its own
//! cloned state and agent and aggregate results outside the core.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, GameState};
use crate::search::Agent;

/// How an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeOutcome {
    /// The state reported a win.
    Won,
    /// The state reported a loss (including abandonment).
    Lost,
    /// The agent had no action to offer on a non-terminal state.
    Stalled,
    /// The move limit was reached.
    MoveLimit,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Summary of one completed episode.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub outcome: EpisodeOutcome,
    /// Moves permanently executed.
    pub moves_played: u32,
    /// Structural hash of the final state.
    pub final_hash: u64,
}

/// Runner configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Hard cap on moves per episode, guarding against endless
    /// cycle/recycle loops.
    pub max_moves: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { max_moves: 10_000 }
    }
}

/// Plays episodes with cooperative cancellation.
pub struct Runner {
    config: RunnerConfig,
    cancel: Arc<AtomicBool>,
}

impl Runner {
    /// Create a runner.
    #[must_use]
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The cancellation flag. Raise it from any thread; the runner
    /// observes it before the next move.
    #[must_use]
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Play one episode to termination.
    ///
    /// The state is left in its final position; callers reset or discard
    /// it between episodes.
    pub fn play_episode<S, A>(
        &self,
        state: &mut S,
        agent: &mut A,
    ) -> Result<EpisodeStats, EngineError>
    where
        S: GameState,
        A: Agent<S>,
    {
        let mut moves_played = 0u32;

        let outcome = loop {
            if self.cancel.load(Ordering::Relaxed) {
                break EpisodeOutcome::Cancelled;
            }
            if state.is_won() {
                break EpisodeOutcome::Won;
            }
            if state.is_lost() {
                break EpisodeOutcome::Lost;
            }
            if moves_played >= self.config.max_moves {
                break EpisodeOutcome::MoveLimit;
            }

            match agent.next_action(state)? {
                Some(mv) => {
                    state.execute_move(&mv)?;
                    moves_played += 1;
                }
                None => break EpisodeOutcome::Stalled,
            }
        };

        let stats = EpisodeStats {
            outcome,
            moves_played,
            final_hash: state.hash_value(),
        };
        debug!(
            "episode finished: {:?} after {} moves",
            stats.outcome, stats.moves_played
        );
        Ok(stats)
    }
}
