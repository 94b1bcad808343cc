//! Legal-move enumeration for Klondike.
//!
//! A pure function of the state: no mutation, no caching (the state's
//! contract layer caches the result). Enumeration order is fixed for
//! presentation and tie-breaking stability:
//!
//! 1. Waste→Foundation
//! 2. Waste→Tableau
//! 3. Tableau→Foundation
//! 4. Tableau→Tableau (single tops, then run suffixes)
//! 5. Foundation→Tableau
//! 6. Stock→Waste (cycle)
//! 7. Waste→Stock (recycle)
//!
//! The terminal skip action is appended by the state, never generated
//! here.

use super::moves::KlondikeMove;
use super::state::{run_suffixes, KlondikeState};
use crate::cards::PileId;

/// Enumerate every legal board move, in the fixed presentation order.
#[must_use]
pub fn legal_board_moves(state: &KlondikeState) -> Vec<KlondikeMove> {
    let mut moves = Vec::new();
    waste_to_foundation(state, &mut moves);
    waste_to_tableau(state, &mut moves);
    tableau_to_foundation(state, &mut moves);
    tableau_to_tableau(state, &mut moves);
    foundation_to_tableau(state, &mut moves);
    cycle(state, &mut moves);
    recycle(state, &mut moves);
    moves
}

fn waste_to_foundation(state: &KlondikeState, out: &mut Vec<KlondikeMove>) {
    let Ok(top) = state.waste().top() else { return };
    let foundation = PileId::foundation(top.suit);
    if state.pile(foundation).can_accept(top) {
        out.push(KlondikeMove::single(PileId::WASTE, foundation, *top));
    }
}

fn waste_to_tableau(state: &KlondikeState, out: &mut Vec<KlondikeMove>) {
    let Ok(top) = state.waste().top() else { return };
    for dest in PileId::tableaus() {
        if state.pile(dest).can_accept(top) {
            out.push(KlondikeMove::single(PileId::WASTE, dest, *top));
        }
    }
}

fn tableau_to_foundation(state: &KlondikeState, out: &mut Vec<KlondikeMove>) {
    for source in PileId::tableaus() {
        let Ok(top) = state.pile(source).top() else { continue };
        if !top.face_up {
            continue;
        }
        let foundation = PileId::foundation(top.suit);
        if state.pile(foundation).can_accept(top) {
            out.push(KlondikeMove::single(source, foundation, *top));
        }
    }
}

fn tableau_to_tableau(state: &KlondikeState, out: &mut Vec<KlondikeMove>) {
    for source in PileId::tableaus() {
        let pile = state.pile(source);

        if let Ok(top) = pile.top() {
            if top.face_up {
                for dest in PileId::tableaus() {
                    if dest != source && state.pile(dest).can_accept(top) {
                        out.push(KlondikeMove::single(source, dest, *top));
                    }
                }
            }
        }

        // Every valid face-up suffix is movable, not just the full run.
        for start in run_suffixes(pile) {
            let suffix = &pile.cards()[start..];
            for dest in PileId::tableaus() {
                if dest != source && state.pile(dest).can_accept_run(suffix) {
                    out.push(KlondikeMove::multi(source, dest, suffix.iter().copied()));
                }
            }
        }
    }
}

fn foundation_to_tableau(state: &KlondikeState, out: &mut Vec<KlondikeMove>) {
    // A legal forward move that walks a foundation card back onto a
    // tableau, not an undo.
    for source in PileId::foundations() {
        let Ok(top) = state.pile(source).top() else { continue };
        for dest in PileId::tableaus() {
            if state.pile(dest).can_accept(top) {
                out.push(KlondikeMove::single(source, dest, *top));
            }
        }
    }
}

fn cycle(state: &KlondikeState, out: &mut Vec<KlondikeMove>) {
    let stock = state.stock();
    if stock.is_empty() {
        return;
    }
    let n = state.cards_per_cycle().min(stock.len());
    // Cards are turned top-first, so the batch arrives on the waste in
    // reverse of its stock order.
    let batch = stock.cards()[stock.len() - n..].iter().rev().copied();
    out.push(KlondikeMove::multi(PileId::STOCK, PileId::WASTE, batch));
}

fn recycle(state: &KlondikeState, out: &mut Vec<KlondikeMove>) {
    let waste = state.waste();
    if !state.stock().is_empty() || waste.is_empty() {
        return;
    }
    let batch = waste.cards().iter().rev().copied();
    out.push(KlondikeMove::multi(PileId::WASTE, PileId::STOCK, batch));
}
