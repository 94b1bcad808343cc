//! Tic-Tac-Toe on a 3×3 board. A move is a cell index 0..9.

use crate::core::{fx_hash, EngineError, GameState, PlayerId, StateCaches};
use crate::search::AdversarialState;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A Tic-Tac-Toe position.
#[derive(Clone, Debug)]
pub struct TicTacToe {
    cells: [Option<PlayerId>; 9],
    to_move: PlayerId,
    caches: StateCaches<usize>,
}

impl TicTacToe {
    /// An empty board with the first player to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [None; 9],
            to_move: PlayerId::FIRST,
            caches: StateCaches::new(),
        }
    }

    /// The piece in a cell.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<PlayerId> {
        self.cells[index]
    }

    fn board_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    fn line_winner(&self) -> Option<PlayerId> {
        LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            line[1..]
                .iter()
                .all(|&i| self.cells[i] == Some(first))
                .then_some(first)
        })
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToe {
    type Move = usize;

    fn caches(&self) -> &StateCaches<usize> {
        &self.caches
    }

    fn caches_mut(&mut self) -> &mut StateCaches<usize> {
        &mut self.caches
    }

    fn generate_moves(&self) -> Vec<usize> {
        if self.line_winner().is_some() {
            return Vec::new();
        }
        (0..9).filter(|&i| self.cells[i].is_none()).collect()
    }

    fn apply(&mut self, mv: &usize) -> Result<(), EngineError> {
        if *mv >= 9 || self.cells[*mv].is_some() || self.line_winner().is_some() {
            return Err(EngineError::RejectedMove {
                reason: "cell unavailable",
            });
        }
        self.cells[*mv] = Some(self.to_move);
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    fn revert(&mut self, mv: &usize) -> Result<(), EngineError> {
        if *mv >= 9 || self.cells[*mv].is_none() {
            return Err(EngineError::RejectedMove {
                reason: "cell has no piece to remove",
            });
        }
        self.cells[*mv] = None;
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    fn compute_hash(&self) -> u64 {
        fx_hash(&(
            self.cells.map(|c| c.map(|p| p.0)),
            self.to_move.0,
        ))
    }

    fn is_won(&self) -> bool {
        self.line_winner().is_some()
    }

    fn is_lost(&self) -> bool {
        self.line_winner().is_none() && self.board_full()
    }

    fn reset(&mut self) {
        self.cells = [None; 9];
        self.to_move = PlayerId::FIRST;
        self.caches.reset();
    }
}

impl AdversarialState for TicTacToe {
    fn to_move(&self) -> PlayerId {
        self.to_move
    }

    fn winner(&self) -> Option<PlayerId> {
        self.line_winner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::TerminalEvaluator;
    use crate::search::{MinimaxAgent, SearchConfig};

    fn play(state: &mut TicTacToe, cells: &[usize]) {
        for &cell in cells {
            state.execute_move(&cell).unwrap();
        }
    }

    #[test]
    fn test_win_detection() {
        let mut state = TicTacToe::new();
        // X: 0, 1, 2 across the top; O: 3, 4
        play(&mut state, &[0, 3, 1, 4, 2]);

        assert_eq!(state.winner(), Some(PlayerId::FIRST));
        assert!(state.is_won());
        assert!(state.generate_moves().is_empty());
    }

    #[test]
    fn test_draw_detection() {
        let mut state = TicTacToe::new();
        // X O X / X O O / O X X — no line
        play(&mut state, &[0, 1, 2, 4, 3, 6, 7, 5, 8]);

        assert_eq!(state.winner(), None);
        assert!(state.is_lost());
        assert!(state.is_terminal());
    }

    #[test]
    fn test_undo_inverse() {
        let mut state = TicTacToe::new();
        play(&mut state, &[4, 0]);
        let before_hash = state.hash_value();

        state.execute_move(&8).unwrap();
        state.undo_move(&8).unwrap();

        assert_eq!(state.hash_value(), before_hash);
        assert_eq!(state.to_move(), PlayerId::FIRST);
        assert_eq!(state.cell(8), None);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut state = TicTacToe::new();
        state.execute_move(&4).unwrap();

        assert!(matches!(
            state.execute_move(&4),
            Err(EngineError::RejectedMove { .. })
        ));
    }

    #[test]
    fn test_minimax_takes_immediate_win() {
        let mut state = TicTacToe::new();
        // X has 0 and 1; O has 3 and 4. X to move: cell 2 wins now.
        play(&mut state, &[0, 3, 1, 4]);

        let mut agent = MinimaxAgent::new(TerminalEvaluator, SearchConfig::default().with_depth(1));
        let mv = agent.choose(&mut state).unwrap();
        assert_eq!(mv, Some(2));
    }

    #[test]
    fn test_minimax_blocks_opponent_threat() {
        let mut state = TicTacToe::new();
        // O threatens 3-4-5; X must block at 5.
        play(&mut state, &[0, 3, 8, 4]);

        let mut agent = MinimaxAgent::new(TerminalEvaluator, SearchConfig::default().with_depth(3));
        let mv = agent.choose(&mut state).unwrap();
        assert_eq!(mv, Some(5));
    }

    #[test]
    fn test_perfect_play_draws() {
        let mut state = TicTacToe::new();
        let mut agent = MinimaxAgent::new(TerminalEvaluator, SearchConfig::default().with_depth(9));

        while !state.is_terminal() {
            match agent.choose(&mut state).unwrap() {
                Some(mv) => state.execute_move(&mv).unwrap(),
                None => break,
            }
        }

        assert_eq!(state.winner(), None, "perfect play is a draw");
        assert!(state.is_lost());
    }
}
