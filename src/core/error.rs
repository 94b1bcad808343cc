//! Engine error taxonomy.
//!
//! Every failure here is a programming error in the caller, visible
//! immediately. The engine never retries and never downgrades a failure to
//! a silent no-op.

use std::fmt;

use crate::cards::PileId;

/// Errors surfaced by the engine core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// A move failed its validity predicate against the current state.
    ///
    /// Callers must either check validity first or expect this error: the
    /// legal-move set is state-dependent and can change between generation
    /// and execution inside a search.
    RejectedMove { reason: &'static str },

    /// Top/bottom access on an empty pile.
    EmptyPile { pile: PileId },

    /// Undo requested with no matching prior execute.
    ///
    /// Only the shallow case (empty undo stack) is detected. Undoing moves
    /// out of order is a documented caller contract the engine does not
    /// defend against at runtime.
    NoMoveToUndo,

    /// A pre-built card sequence was not a permutation of the 52 cards.
    BadDeal { reason: &'static str },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::RejectedMove { reason } => {
                write!(f, "move rejected: {reason}")
            }
            EngineError::EmptyPile { pile } => {
                write!(f, "pile {pile} is empty")
            }
            EngineError::NoMoveToUndo => write!(f, "no move to undo"),
            EngineError::BadDeal { reason } => write!(f, "bad deal: {reason}"),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EngineError::RejectedMove {
            reason: "destination does not accept card",
        };
        assert_eq!(
            err.to_string(),
            "move rejected: destination does not accept card"
        );

        let err = EngineError::EmptyPile { pile: PileId::STOCK };
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_error_trait_object() {
        let err: Box<dyn std::error::Error> = Box::new(EngineError::NoMoveToUndo);
        assert_eq!(err.to_string(), "no move to undo");
    }
}
