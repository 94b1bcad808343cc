//! Linear evaluation for Klondike.
//!
//! The score is a weighted sum over a fixed feature vector extracted from
//! the board. Weights come from a hand-picked default or from an external
//! optimizer via `WeightVector`.

use super::weights::WeightVector;
use super::StateEvaluator;
use crate::cards::{Pile, PileId};
use crate::core::{GameState, PlayerId};
use crate::klondike::KlondikeState;

/// Number of features in the Klondike feature vector.
pub const FEATURE_COUNT: usize = 9;

/// Extract the feature vector, in weight order:
///
/// 0. cards on foundations
/// 1. face-up tableau cards
/// 2. face-down tableau cards
/// 3. waste size
/// 4. stock size
/// 5. empty tableau columns
/// 6. longest movable tableau run
/// 7. cycles used
/// 8. won flag
#[must_use]
pub fn features(state: &KlondikeState) -> [f64; FEATURE_COUNT] {
    let foundation_cards: usize = PileId::foundations().map(|id| state.pile(id).len()).sum();

    let mut face_up = 0usize;
    let mut face_down = 0usize;
    let mut empty_columns = 0usize;
    let mut longest_run = 0usize;
    for id in PileId::tableaus() {
        let pile = state.pile(id);
        if pile.is_empty() {
            empty_columns += 1;
            continue;
        }
        face_up += pile.cards().iter().filter(|c| c.face_up).count();
        face_down += pile.cards().iter().filter(|c| !c.face_up).count();
        longest_run = longest_run.max(longest_run_length(pile));
    }

    [
        foundation_cards as f64,
        face_up as f64,
        face_down as f64,
        state.waste().len() as f64,
        state.stock().len() as f64,
        empty_columns as f64,
        longest_run as f64,
        f64::from(state.cycle_count()),
        if state.is_won() { 1.0 } else { 0.0 },
    ]
}

/// Length of the longest valid run ending at the pile's top.
fn longest_run_length(pile: &Pile) -> usize {
    let cards = pile.cards();
    let mut best = 0;
    for start in (0..cards.len()).rev() {
        if Pile::is_valid_run(&cards[start..]) {
            best = cards.len() - start;
        } else {
            break;
        }
    }
    best
}

/// Klondike state evaluator: a linear sum over `features`.
#[derive(Clone, Debug)]
pub struct KlondikeEvaluator {
    weights: WeightVector,
    skip_penalty: f64,
}

impl KlondikeEvaluator {
    /// Hand-picked default weights, in `features` order.
    #[must_use]
    pub fn default_weights() -> WeightVector {
        WeightVector::new(vec![
            10.0,   // foundation cards
            1.0,    // face-up tableau cards
            -3.0,   // face-down tableau cards
            -0.5,   // waste size
            -0.5,   // stock size
            2.0,    // empty columns
            0.5,    // longest run
            -1.0,   // cycles used
            1000.0, // won
        ])
    }

    /// Evaluator with the default weights.
    #[must_use]
    pub fn new() -> Self {
        Self::with_weights(Self::default_weights())
    }

    /// Evaluator driven by an externally supplied weight vector.
    #[must_use]
    pub fn with_weights(weights: WeightVector) -> Self {
        Self {
            weights,
            skip_penalty: -500.0,
        }
    }

    /// Override the skip penalty.
    #[must_use]
    pub fn with_skip_penalty(mut self, penalty: f64) -> Self {
        self.skip_penalty = penalty;
        self
    }

    /// The current weight vector.
    #[must_use]
    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// Swap in a new weight vector (e.g. the next optimizer candidate).
    pub fn set_weights(&mut self, weights: WeightVector) {
        self.weights = weights;
    }
}

impl Default for KlondikeEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl StateEvaluator<KlondikeState> for KlondikeEvaluator {
    fn evaluate_state(&self, state: &mut KlondikeState, _perspective: PlayerId) -> f64 {
        self.weights.dot(&features(state))
    }

    fn skip_score(&self, _state: &mut KlondikeState) -> f64 {
        self.skip_penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::klondike::KlondikeMove;

    #[test]
    fn test_feature_extraction_on_fresh_deal() {
        let state = KlondikeState::from_seed(42, 3);
        let f = features(&state);

        assert_eq!(f[0], 0.0); // no foundation cards
        assert_eq!(f[1], 7.0); // one face-up card per column
        assert_eq!(f[2], 21.0); // 0+1+..+6 face-down
        assert_eq!(f[3], 0.0);
        assert_eq!(f[4], 24.0);
        assert_eq!(f[5], 0.0);
        assert_eq!(f[6], 1.0); // each top card is a run of one
        assert_eq!(f[7], 0.0);
        assert_eq!(f[8], 0.0);
    }

    #[test]
    fn test_foundation_progress_raises_score() {
        let mut state = KlondikeState::from_seed(42, 3);
        let evaluator = KlondikeEvaluator::new();
        let before = evaluator.evaluate_state(&mut state, PlayerId::FIRST);

        state
            .pile_mut(PileId::foundation(Suit::Hearts))
            .push(Card::face_up(Suit::Hearts, Rank::ACE));
        state.caches_mut().invalidate();

        let after = evaluator.evaluate_state(&mut state, PlayerId::FIRST);
        assert!(after > before);
    }

    #[test]
    fn test_weight_swap_changes_score() {
        let mut state = KlondikeState::from_seed(42, 3);
        let mut evaluator = KlondikeEvaluator::new();
        let default_score = evaluator.evaluate_state(&mut state, PlayerId::FIRST);

        evaluator.set_weights(WeightVector::uniform(FEATURE_COUNT, 0.0));
        assert_eq!(evaluator.evaluate_state(&mut state, PlayerId::FIRST), 0.0);
        assert_ne!(default_score, 0.0);
    }

    #[test]
    fn test_evaluate_move_is_transparent() {
        let mut state = KlondikeState::from_seed(42, 3);
        let evaluator = KlondikeEvaluator::new();
        let before = state.clone();

        let cycle = state
            .legal_moves()
            .into_iter()
            .find(KlondikeMove::is_cycle)
            .unwrap();
        evaluator
            .evaluate_move(&mut state, &cycle, PlayerId::FIRST)
            .unwrap();

        assert_eq!(state, before);
    }

    #[test]
    fn test_skip_penalty_policy() {
        let mut state = KlondikeState::from_seed(42, 3);
        let evaluator = KlondikeEvaluator::new().with_skip_penalty(-42.0);
        assert_eq!(evaluator.skip_score(&mut state), -42.0);
    }
}
