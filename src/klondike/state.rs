//! The Klondike game state: thirteen indexed piles, a cycle counter, and
//! an undo stack of restoration records.
//!
//! ## Undo records
//!
//! Klondike moves are not self-inverse: removing a tableau card flips the
//! newly exposed card face-up, and that previous face bit cannot be
//! recovered from the move alone. Every execute therefore pushes a small
//! per-kind `UndoRecord` holding exactly the bits a later undo must
//! restore; everything else is reconstructed from the move value.
//!
//! ## Linear history
//!
//! `undo_move` must be called with the last executed move. The state
//! detects an empty undo stack and a record/move kind mismatch, nothing
//! more; undoing out of order with matching kinds is undefined.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::generator;
use super::moves::{KlondikeMove, MultiCardMove, SingleCardMove};
use super::unwinnable::UnwinnablePolicy;
use crate::cards::{Card, Deck, Pile, PileId, PileKind, Suit};
use crate::core::{EngineError, GameState, StateCaches};

/// Default number of cards turned per Stock→Waste cycle.
pub const DEFAULT_CARDS_PER_CYCLE: usize = 3;

/// The face bit of the tableau card exposed by a removal, as it was
/// before the exposure flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposedFlip {
    pub pile: PileId,
    pub was_face_up: bool,
}

/// What a later undo must restore, beyond what the move itself encodes.
/// One record is pushed per execute and popped per undo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndoRecord {
    Single {
        /// Face bit of the moved card before the move.
        moved_was_face_up: bool,
        /// Exposure flip on the source tableau, if one happened.
        exposed: Option<ExposedFlip>,
    },
    Run {
        exposed: Option<ExposedFlip>,
    },
    /// Stock→Waste. Face flips are deterministic; the record only keeps
    /// the undo stack symmetric and the cycle counter honest.
    Cycle,
    /// Waste→Stock.
    Recycle,
    Skip,
}

/// A Klondike game in progress.
///
/// Equality covers the game-relevant state — piles including face bits,
/// cycle counter, abandoned flag, move count, and undo depth — so the
/// undo-inverse law can be asserted with `==`. Transient caches are
/// excluded.
#[derive(Clone, Debug)]
pub struct KlondikeState {
    piles: Vec<Pile>,
    /// The validated 52-card ordering this game was dealt from.
    initial_order: Vec<Card>,
    cards_per_cycle: usize,
    cycle_count: u32,
    abandoned: bool,
    undo_stack: Vec<UndoRecord>,
    policy: UnwinnablePolicy,
    caches: StateCaches<KlondikeMove>,
}

impl KlondikeState {
    /// Deal a new game from a deck.
    #[must_use]
    pub fn new(deck: Deck, cards_per_cycle: usize) -> Self {
        assert!(cards_per_cycle > 0, "cards per cycle must be positive");

        let mut state = Self {
            piles: Self::empty_piles(),
            initial_order: deck.into_cards(),
            cards_per_cycle,
            cycle_count: 0,
            abandoned: false,
            undo_stack: Vec::new(),
            policy: UnwinnablePolicy::default(),
            caches: StateCaches::new(),
        };
        state.deal();
        state
    }

    /// Deal from a seeded shuffle with the default cycle batch size.
    #[must_use]
    pub fn from_seed(seed: u64, shuffle_count: u32) -> Self {
        Self::new(Deck::shuffled(seed, shuffle_count), DEFAULT_CARDS_PER_CYCLE)
    }

    /// Replace the unwinnability policy.
    #[must_use]
    pub fn with_policy(mut self, policy: UnwinnablePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn empty_piles() -> Vec<Pile> {
        let mut piles = Vec::with_capacity(PileId::PILE_COUNT);
        for id in PileId::tableaus() {
            piles.push(Pile::new(id, PileKind::Tableau));
        }
        for suit in Suit::ALL {
            piles.push(Pile::new(
                PileId::foundation(suit),
                PileKind::Foundation(suit),
            ));
        }
        piles.push(Pile::new(PileId::STOCK, PileKind::Stock));
        piles.push(Pile::new(PileId::WASTE, PileKind::Waste));
        piles
    }

    /// Deal the stored ordering: column i gets i+1 cards with only the
    /// last face-up, the remaining 24 go to the stock face-down.
    fn deal(&mut self) {
        let mut cards = self.initial_order.clone();

        for col in 0..PileId::TABLEAU_COUNT {
            for row in 0..=col {
                let mut card = cards.pop().expect("validated deck holds 52 cards");
                card.face_up = row == col;
                self.piles[col].push(card);
            }
        }

        self.piles[PileId::STOCK.index()].extend(cards);
    }

    // === Accessors ===

    /// The pile with the given id.
    #[must_use]
    pub fn pile(&self, id: PileId) -> &Pile {
        &self.piles[id.index()]
    }

    pub(crate) fn pile_mut(&mut self, id: PileId) -> &mut Pile {
        &mut self.piles[id.index()]
    }

    /// A tableau column.
    #[must_use]
    pub fn tableau(&self, column: usize) -> &Pile {
        self.pile(PileId::tableau(column))
    }

    /// The foundation for a suit.
    #[must_use]
    pub fn foundation(&self, suit: Suit) -> &Pile {
        self.pile(PileId::foundation(suit))
    }

    /// The stock pile.
    #[must_use]
    pub fn stock(&self) -> &Pile {
        self.pile(PileId::STOCK)
    }

    /// The waste pile.
    #[must_use]
    pub fn waste(&self) -> &Pile {
        self.pile(PileId::WASTE)
    }

    /// Cards turned per Stock→Waste cycle.
    #[must_use]
    pub fn cards_per_cycle(&self) -> usize {
        self.cards_per_cycle
    }

    /// Number of Stock→Waste cycles executed and not undone.
    #[must_use]
    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    /// Has a Skip been executed?
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    /// Depth of the undo stack.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// The unwinnability policy in force.
    #[must_use]
    pub fn policy(&self) -> &UnwinnablePolicy {
        &self.policy
    }

    // === Validity ===

    /// Pure validity check of a move against the current state.
    #[must_use]
    pub fn is_legal(&self, mv: &KlondikeMove) -> bool {
        match mv {
            KlondikeMove::Single(mv) => self.is_legal_single(mv),
            KlondikeMove::Multi(mv) => self.is_legal_multi(mv),
            KlondikeMove::Skip => !self.abandoned,
        }
    }

    fn is_legal_single(&self, mv: &SingleCardMove) -> bool {
        if mv.from == mv.to {
            return false;
        }

        let from = self.pile(mv.from);
        let to = self.pile(mv.to);

        // Player moves never touch the stock, and the waste only receives
        // cards via cycling.
        let source_ok = matches!(
            from.kind(),
            PileKind::Waste | PileKind::Tableau | PileKind::Foundation(_)
        );
        let dest_ok = matches!(to.kind(), PileKind::Tableau | PileKind::Foundation(_));
        if !source_ok || !dest_ok {
            return false;
        }

        match from.top() {
            Ok(top) => *top == mv.card && top.face_up && to.can_accept(top),
            Err(_) => false,
        }
    }

    fn is_legal_multi(&self, mv: &MultiCardMove) -> bool {
        if mv.cards.is_empty() {
            return false;
        }

        if mv.from == PileId::STOCK && mv.to == PileId::WASTE {
            let stock = self.stock();
            let n = self.cards_per_cycle.min(stock.len());
            return n > 0
                && mv.cards.len() == n
                && stock.cards()[stock.len() - n..]
                    .iter()
                    .rev()
                    .zip(mv.cards.iter())
                    .all(|(a, b)| a == b);
        }

        if mv.from == PileId::WASTE && mv.to == PileId::STOCK {
            let waste = self.waste();
            return self.stock().is_empty()
                && !waste.is_empty()
                && mv.cards.len() == waste.len()
                && waste
                    .cards()
                    .iter()
                    .rev()
                    .zip(mv.cards.iter())
                    .all(|(a, b)| a == b);
        }

        if mv.from.is_tableau() && mv.to.is_tableau() && mv.from != mv.to {
            let from = self.pile(mv.from);
            if mv.cards.len() > from.len() {
                return false;
            }
            let suffix = &from.cards()[from.len() - mv.cards.len()..];
            return suffix.iter().zip(mv.cards.iter()).all(|(a, b)| a == b)
                && self.pile(mv.to).can_accept_run(suffix);
        }

        false
    }

    // === Mutation helpers ===

    /// Flip the card exposed on a source tableau after a removal,
    /// returning its previous face bit for the undo record.
    fn expose_after_removal(&mut self, from: PileId) -> Option<ExposedFlip> {
        if !from.is_tableau() {
            return None;
        }
        match self.pile_mut(from).top_mut() {
            Ok(top) => {
                let was_face_up = top.face_up;
                top.face_up = true;
                Some(ExposedFlip {
                    pile: from,
                    was_face_up,
                })
            }
            Err(_) => None,
        }
    }

    fn restore_exposure(&mut self, exposed: Option<ExposedFlip>) -> Result<(), EngineError> {
        if let Some(flip) = exposed {
            self.pile_mut(flip.pile).top_mut()?.face_up = flip.was_face_up;
        }
        Ok(())
    }

    fn apply_single(&mut self, mv: &SingleCardMove) -> Result<(), EngineError> {
        let card = self.pile_mut(mv.from).pop()?;
        let moved_was_face_up = card.face_up;

        self.pile_mut(mv.to).push(card);
        let exposed = self.expose_after_removal(mv.from);

        self.undo_stack.push(UndoRecord::Single {
            moved_was_face_up,
            exposed,
        });
        Ok(())
    }

    fn apply_multi(&mut self, mv: &MultiCardMove) -> Result<(), EngineError> {
        if mv.is_cycle() {
            for _ in 0..mv.cards.len() {
                let mut card = self.pile_mut(PileId::STOCK).pop()?;
                card.face_up = true;
                self.pile_mut(PileId::WASTE).push(card);
            }
            self.cycle_count += 1;
            self.undo_stack.push(UndoRecord::Cycle);
        } else if mv.is_recycle() {
            for _ in 0..mv.cards.len() {
                let mut card = self.pile_mut(PileId::WASTE).pop()?;
                card.face_up = false;
                self.pile_mut(PileId::STOCK).push(card);
            }
            self.undo_stack.push(UndoRecord::Recycle);
        } else {
            let from = self.pile_mut(mv.from);
            let start = from.len() - mv.cards.len();
            let block = from.split_off(start)?;
            self.pile_mut(mv.to).extend(block);
            let exposed = self.expose_after_removal(mv.from);
            self.undo_stack.push(UndoRecord::Run { exposed });
        }
        Ok(())
    }

    fn revert_single(
        &mut self,
        mv: &SingleCardMove,
        moved_was_face_up: bool,
        exposed: Option<ExposedFlip>,
    ) -> Result<(), EngineError> {
        let mut card = self.pile_mut(mv.to).pop()?;
        debug_assert_eq!(card, mv.card);
        card.face_up = moved_was_face_up;

        // The exposed card is on top of the source again; restore its bit
        // before putting the moved card back above it.
        self.restore_exposure(exposed)?;
        self.pile_mut(mv.from).push(card);
        Ok(())
    }

    fn revert_multi(&mut self, mv: &MultiCardMove, record: UndoRecord) -> Result<(), EngineError> {
        match record {
            UndoRecord::Cycle => {
                for _ in 0..mv.cards.len() {
                    let mut card = self.pile_mut(PileId::WASTE).pop()?;
                    card.face_up = false;
                    self.pile_mut(PileId::STOCK).push(card);
                }
                self.cycle_count -= 1;
            }
            UndoRecord::Recycle => {
                for _ in 0..mv.cards.len() {
                    let mut card = self.pile_mut(PileId::STOCK).pop()?;
                    card.face_up = true;
                    self.pile_mut(PileId::WASTE).push(card);
                }
            }
            UndoRecord::Run { exposed } => {
                self.restore_exposure(exposed)?;
                let to = self.pile_mut(mv.to);
                let start = to.len() - mv.cards.len();
                let block = to.split_off(start)?;
                self.pile_mut(mv.from).extend(block);
            }
            _ => unreachable!("record kind checked by revert"),
        }
        Ok(())
    }

    fn record_matches(record: &UndoRecord, mv: &KlondikeMove) -> bool {
        match (record, mv) {
            (UndoRecord::Single { .. }, KlondikeMove::Single(_)) => true,
            (UndoRecord::Cycle, KlondikeMove::Multi(m)) => m.is_cycle(),
            (UndoRecord::Recycle, KlondikeMove::Multi(m)) => m.is_recycle(),
            (UndoRecord::Run { .. }, KlondikeMove::Multi(m)) => {
                !m.is_cycle() && !m.is_recycle()
            }
            (UndoRecord::Skip, KlondikeMove::Skip) => true,
            _ => false,
        }
    }
}

impl GameState for KlondikeState {
    type Move = KlondikeMove;

    fn caches(&self) -> &StateCaches<KlondikeMove> {
        &self.caches
    }

    fn caches_mut(&mut self) -> &mut StateCaches<KlondikeMove> {
        &mut self.caches
    }

    fn generate_moves(&self) -> Vec<KlondikeMove> {
        let mut moves = generator::legal_board_moves(self);
        // The skip action comes from the state, not the generator: it is a
        // last-resort agent choice, not a board mutation.
        if !self.abandoned {
            moves.push(KlondikeMove::Skip);
        }
        moves
    }

    fn apply(&mut self, mv: &KlondikeMove) -> Result<(), EngineError> {
        if !self.is_legal(mv) {
            return Err(EngineError::RejectedMove {
                reason: "move is not legal in the current state",
            });
        }

        match mv {
            KlondikeMove::Single(mv) => self.apply_single(mv),
            KlondikeMove::Multi(mv) => self.apply_multi(mv),
            KlondikeMove::Skip => {
                self.abandoned = true;
                self.undo_stack.push(UndoRecord::Skip);
                Ok(())
            }
        }
    }

    fn revert(&mut self, mv: &KlondikeMove) -> Result<(), EngineError> {
        let matches = match self.undo_stack.last() {
            Some(record) => Self::record_matches(record, mv),
            None => return Err(EngineError::NoMoveToUndo),
        };
        if !matches {
            return Err(EngineError::RejectedMove {
                reason: "undo does not match the last executed move",
            });
        }
        let record = self.undo_stack.pop().expect("checked non-empty above");

        match (mv, record) {
            (
                KlondikeMove::Single(mv),
                UndoRecord::Single {
                    moved_was_face_up,
                    exposed,
                },
            ) => self.revert_single(mv, moved_was_face_up, exposed),
            (KlondikeMove::Multi(mv), record) => self.revert_multi(mv, record),
            (KlondikeMove::Skip, UndoRecord::Skip) => {
                self.abandoned = false;
                Ok(())
            }
            _ => unreachable!("record kind checked above"),
        }
    }

    fn compute_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        for pile in &self.piles {
            pile.hash_content(&mut hasher);
        }
        self.cycle_count.hash(&mut hasher);
        self.abandoned.hash(&mut hasher);
        hasher.finish()
    }

    fn is_won(&self) -> bool {
        PileId::foundations().all(|id| self.pile(id).len() == 13)
    }

    fn is_lost(&self) -> bool {
        self.abandoned || self.policy.is_unwinnable(self)
    }

    fn reset(&mut self) {
        self.piles = Self::empty_piles();
        self.cycle_count = 0;
        self.abandoned = false;
        self.undo_stack.clear();
        self.deal();
        self.caches.reset();
    }
}

impl crate::search::SinglePlayerState for KlondikeState {
    fn skip_move(&self) -> Option<KlondikeMove> {
        (!self.abandoned).then_some(KlondikeMove::Skip)
    }
}

impl PartialEq for KlondikeState {
    fn eq(&self, other: &Self) -> bool {
        self.piles == other.piles
            && self.cycle_count == other.cycle_count
            && self.abandoned == other.abandoned
            && self.undo_stack.len() == other.undo_stack.len()
            && self.caches.move_count() == other.caches.move_count()
    }
}

impl Eq for KlondikeState {}

/// Start indices of every face-up suffix of a tableau that forms a
/// movable run, longest first. Single-card suffixes are covered by
/// single-card moves and excluded here.
pub(super) fn run_suffixes(pile: &Pile) -> SmallVec<[usize; 8]> {
    let mut starts = SmallVec::new();
    let Some(first_up) = pile.face_up_start() else {
        return starts;
    };
    for start in first_up..pile.len().saturating_sub(1) {
        if Pile::is_valid_run(&pile.cards()[start..]) {
            starts.push(start);
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;

    fn dealt_state() -> KlondikeState {
        KlondikeState::from_seed(42, 3)
    }

    #[test]
    fn test_deal_shape() {
        let state = dealt_state();

        for col in 0..7 {
            let pile = state.tableau(col);
            assert_eq!(pile.len(), col + 1);
            assert!(pile.top().unwrap().face_up);
            assert!(pile.cards()[..col].iter().all(|c| !c.face_up));
        }

        assert_eq!(state.stock().len(), 24);
        assert!(state.stock().cards().iter().all(|c| !c.face_up));
        assert!(state.waste().is_empty());
        for id in PileId::foundations() {
            assert!(state.pile(id).is_empty());
        }
    }

    #[test]
    fn test_every_card_in_exactly_one_pile() {
        let state = dealt_state();

        let total: usize = (0..PileId::PILE_COUNT)
            .map(|i| state.pile(PileId(i as u8)).len())
            .sum();
        assert_eq!(total, 52);

        let mut seen = std::collections::HashSet::new();
        for i in 0..PileId::PILE_COUNT {
            for card in state.pile(PileId(i as u8)).cards() {
                assert!(seen.insert((card.suit, card.rank)));
            }
        }
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = KlondikeState::from_seed(7, 2);
        let b = KlondikeState::from_seed(7, 2);
        assert_eq!(a, b);

        let c = KlondikeState::from_seed(8, 2);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cycle_execute_and_undo() {
        let mut state = dealt_state();
        let before = state.clone();

        let cycle = state
            .legal_moves()
            .into_iter()
            .find(|m| m.is_cycle())
            .expect("fresh deal can always cycle");

        state.execute_move(&cycle).unwrap();
        assert_eq!(state.waste().len(), 3);
        assert_eq!(state.stock().len(), 21);
        assert_eq!(state.cycle_count(), 1);
        assert!(state.waste().cards().iter().all(|c| c.face_up));

        // Dealing order: top of stock is turned first, so the batch lands
        // on the waste reversed.
        if let KlondikeMove::Multi(mv) = &cycle {
            let n = state.waste().len();
            assert_eq!(
                state.waste().cards()[n - 3..],
                mv.cards[..],
            );
        }

        state.undo_move(&cycle).unwrap();
        assert_eq!(state, before);
        assert!(state
            .stock()
            .cards()
            .iter()
            .zip(before.stock().cards())
            .all(|(a, b)| a.same_including_face(b)));
    }

    #[test]
    fn test_recycle_restores_stock_order() {
        let mut state = dealt_state();

        // Exhaust the stock
        let mut executed = Vec::new();
        while !state.stock().is_empty() {
            let cycle = state
                .legal_moves()
                .into_iter()
                .find(|m| m.is_cycle())
                .unwrap();
            state.execute_move(&cycle).unwrap();
            executed.push(cycle);
        }
        assert_eq!(state.waste().len(), 24);

        let before_recycle = state.clone();
        let recycle = state
            .legal_moves()
            .into_iter()
            .find(|m| m.is_recycle())
            .expect("empty stock with waste can recycle");

        state.execute_move(&recycle).unwrap();
        assert_eq!(state.stock().len(), 24);
        assert!(state.waste().is_empty());
        assert!(state.stock().cards().iter().all(|c| !c.face_up));

        state.undo_move(&recycle).unwrap();
        assert_eq!(state, before_recycle);
    }

    #[test]
    fn test_recycle_then_cycle_repeats_first_batch() {
        let mut state = dealt_state();

        let first = state
            .legal_moves()
            .into_iter()
            .find(|m| m.is_cycle())
            .unwrap();

        while !state.stock().is_empty() {
            let cycle = state
                .legal_moves()
                .into_iter()
                .find(|m| m.is_cycle())
                .unwrap();
            state.execute_move(&cycle).unwrap();
        }
        let recycle = state
            .legal_moves()
            .into_iter()
            .find(|m| m.is_recycle())
            .unwrap();
        state.execute_move(&recycle).unwrap();

        // After a full pass and a recycle the stock is back in its dealt
        // order, so the next cycle turns the same cards as the first.
        let again = state
            .legal_moves()
            .into_iter()
            .find(|m| m.is_cycle())
            .unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_skip_sets_abandoned_only() {
        let mut state = dealt_state();
        let before = state.clone();

        state.execute_move(&KlondikeMove::Skip).unwrap();
        assert!(state.is_abandoned());
        assert!(state.is_lost());
        for i in 0..PileId::PILE_COUNT {
            let id = PileId(i as u8);
            assert!(state.pile(id).same_including_face(before.pile(id)));
        }

        // Already abandoned: skip is rejected
        assert!(matches!(
            state.execute_move(&KlondikeMove::Skip),
            Err(EngineError::RejectedMove { .. })
        ));

        state.undo_move(&KlondikeMove::Skip).unwrap();
        assert!(!state.is_abandoned());
        assert_eq!(state, before);
    }

    #[test]
    fn test_invalid_move_rejected() {
        let mut state = dealt_state();

        let bogus = KlondikeMove::single(
            PileId::WASTE,
            PileId::tableau(0),
            Card::new(Suit::Hearts, Rank::ACE),
        );
        let before = state.clone();

        assert!(matches!(
            state.execute_move(&bogus),
            Err(EngineError::RejectedMove { .. })
        ));
        assert_eq!(state, before);
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn test_undo_without_execute() {
        let mut state = dealt_state();
        assert!(matches!(
            state.undo_move(&KlondikeMove::Skip),
            Err(EngineError::NoMoveToUndo)
        ));
    }

    #[test]
    fn test_undo_kind_mismatch_detected() {
        let mut state = dealt_state();
        let cycle = state
            .legal_moves()
            .into_iter()
            .find(|m| m.is_cycle())
            .unwrap();
        state.execute_move(&cycle).unwrap();

        assert!(matches!(
            state.undo_move(&KlondikeMove::Skip),
            Err(EngineError::RejectedMove { .. })
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = dealt_state();
        let mut clone = state.clone();
        assert_eq!(state, clone);

        let cycle = clone
            .legal_moves()
            .into_iter()
            .find(|m| m.is_cycle())
            .unwrap();
        clone.execute_move(&cycle).unwrap();

        assert_ne!(state, clone);
        assert_eq!(state.waste().len(), 0);
        assert_eq!(clone.waste().len(), 3);
        // The original's caches are untouched by the clone's mutation
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn test_reset_restores_deal() {
        let mut state = dealt_state();
        let fresh = state.clone();

        let cycle = state
            .legal_moves()
            .into_iter()
            .find(|m| m.is_cycle())
            .unwrap();
        state.execute_move(&cycle).unwrap();
        state.execute_move(&KlondikeMove::Skip).unwrap();

        state.reset();
        assert_eq!(state, fresh);
        assert_eq!(state.undo_depth(), 0);
        assert_eq!(state.cycle_count(), 0);
    }

    #[test]
    fn test_win_detection() {
        let mut state = dealt_state();

        // Force-build full foundations by hand
        for suit in Suit::ALL {
            let id = PileId::foundation(suit);
            let pile = state.pile_mut(id);
            for rank in Rank::all() {
                pile.push(Card::face_up(suit, rank));
            }
        }
        assert!(state.is_won());

        state.pile_mut(PileId::foundation(Suit::Hearts)).pop().unwrap();
        assert!(!state.is_won());
    }

    #[test]
    fn test_cycle_from_a_full_stock() {
        let mut state = dealt_state();

        // Return every tableau card to the stock so the whole deck cycles.
        for col in PileId::tableaus() {
            while let Ok(mut card) = state.pile_mut(col).pop() {
                card.face_up = false;
                state.pile_mut(PileId::STOCK).push(card);
            }
        }
        state.caches_mut().invalidate();
        assert_eq!(state.stock().len(), 52);

        let cycle = state
            .legal_moves()
            .into_iter()
            .find(|m| m.is_cycle())
            .unwrap();
        state.execute_move(&cycle).unwrap();
        assert_eq!(state.waste().len(), 3);
        assert_eq!(state.stock().len(), 49);

        state.undo_move(&cycle).unwrap();
        assert_eq!(state.waste().len(), 0);
        assert_eq!(state.stock().len(), 52);
        assert!(state.stock().cards().iter().all(|c| !c.face_up));
    }

    #[test]
    fn test_hash_tracks_content() {
        let mut a = KlondikeState::from_seed(11, 1);
        let mut b = KlondikeState::from_seed(11, 1);
        assert_eq!(a.hash_value(), b.hash_value());

        let cycle = a.legal_moves().into_iter().find(|m| m.is_cycle()).unwrap();
        a.execute_move(&cycle).unwrap();
        assert_ne!(a.hash_value(), b.hash_value());

        a.undo_move(&cycle).unwrap();
        assert_eq!(a.hash_value(), b.hash_value());
    }
}
