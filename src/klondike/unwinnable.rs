//! Best-effort unwinnability detection.
//!
//! This is a policy signal, not a solver: the rules may both over- and
//! under-detect true unwinnability, and callers must never treat the
//! answer as exact. The rules overlap deliberately; each is an
//! independently tunable toggle.

use serde::{Deserialize, Serialize};

use super::generator;
use super::moves::KlondikeMove;
use super::state::KlondikeState;
use crate::core::GameState;

/// Tunable loss heuristic for Klondike.
///
/// A state is judged unwinnable when any enabled rule fires:
///
/// 1. the Stock→Waste cycle budget is exhausted,
/// 2. no legal board move exists,
/// 3. the draw piles are spent and no tableau card can move anywhere,
/// 4. the draw piles are spent and no card can reach any foundation
///    under the current foundation tops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnwinnablePolicy {
    /// Rule 1: maximum Stock→Waste cycles before the game is abandoned.
    /// `None` disables the budget.
    pub max_cycles: Option<u32>,

    /// Rule 2: treat a position with no legal board moves as lost.
    pub detect_stall: bool,

    /// Rule 3: with stock and waste empty, treat immovable tableau tops
    /// as lost.
    pub detect_stuck_tableaus: bool,

    /// Rule 4: with stock and waste empty, treat unreachable foundations
    /// as lost.
    pub detect_foundation_starvation: bool,
}

impl Default for UnwinnablePolicy {
    fn default() -> Self {
        Self {
            max_cycles: Some(24),
            detect_stall: true,
            detect_stuck_tableaus: true,
            detect_foundation_starvation: true,
        }
    }
}

impl UnwinnablePolicy {
    /// A policy with every rule disabled (the game only ends by winning
    /// or an explicit skip).
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            max_cycles: None,
            detect_stall: false,
            detect_stuck_tableaus: false,
            detect_foundation_starvation: false,
        }
    }

    /// Judge a state unwinnable under the enabled rules.
    #[must_use]
    pub fn is_unwinnable(&self, state: &KlondikeState) -> bool {
        if state.is_won() {
            return false;
        }

        if let Some(budget) = self.max_cycles {
            if state.cycle_count() >= budget {
                return true;
            }
        }

        if !(self.detect_stall || self.detect_stuck_tableaus || self.detect_foundation_starvation)
        {
            return false;
        }

        let moves = generator::legal_board_moves(state);

        if self.detect_stall && moves.is_empty() {
            return true;
        }

        let draw_piles_spent = state.stock().is_empty() && state.waste().is_empty();
        if !draw_piles_spent {
            return false;
        }

        if self.detect_stuck_tableaus
            && !moves.iter().any(|m| Self::tableau_sourced(m))
        {
            return true;
        }

        if self.detect_foundation_starvation
            && !moves.iter().any(|m| Self::foundation_bound(m))
        {
            return true;
        }

        false
    }

    fn tableau_sourced(mv: &KlondikeMove) -> bool {
        match mv {
            KlondikeMove::Single(mv) => mv.from.is_tableau(),
            KlondikeMove::Multi(mv) => mv.from.is_tableau(),
            KlondikeMove::Skip => false,
        }
    }

    fn foundation_bound(mv: &KlondikeMove) -> bool {
        matches!(mv, KlondikeMove::Single(mv) if mv.to.is_foundation())
    }
}
