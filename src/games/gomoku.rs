//! Gomoku (five in a row) on a 15×15 board. A move is a cell index
//! `row * SIZE + column`.

use crate::core::{fx_hash, EngineError, GameState, PlayerId, StateCaches};
use crate::search::AdversarialState;

/// Board side length.
pub const SIZE: usize = 15;

/// A Gomoku position.
#[derive(Clone, Debug)]
pub struct Gomoku {
    cells: Vec<Option<PlayerId>>,
    to_move: PlayerId,
    caches: StateCaches<usize>,
}

impl Gomoku {
    /// An empty board with the first player to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![None; SIZE * SIZE],
            to_move: PlayerId::FIRST,
            caches: StateCaches::new(),
        }
    }

    /// Cell index for (row, column).
    #[must_use]
    pub fn index(row: usize, column: usize) -> usize {
        row * SIZE + column
    }

    /// The piece at (row, column).
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<PlayerId> {
        self.cells[Self::index(row, column)]
    }

    fn line_winner(&self) -> Option<PlayerId> {
        const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

        for row in 0..SIZE {
            for column in 0..SIZE {
                let Some(player) = self.cell(row, column) else {
                    continue;
                };
                for (dr, dc) in DIRECTIONS {
                    let mut run = 1;
                    let (mut r, mut c) = (row as isize + dr, column as isize + dc);
                    while run < 5
                        && (0..SIZE as isize).contains(&r)
                        && (0..SIZE as isize).contains(&c)
                        && self.cell(r as usize, c as usize) == Some(player)
                    {
                        run += 1;
                        r += dr;
                        c += dc;
                    }
                    if run == 5 {
                        return Some(player);
                    }
                }
            }
        }
        None
    }
}

impl Default for Gomoku {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for Gomoku {
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
        (0..self.cells.len())
            .filter(|&i| self.cells[i].is_none())
            .collect()
    }

    fn apply(&mut self, mv: &usize) -> Result<(), EngineError> {
        if *mv >= self.cells.len() || self.cells[*mv].is_some() || self.line_winner().is_some() {
            return Err(EngineError::RejectedMove {
                reason: "cell unavailable",
            });
        }
        self.cells[*mv] = Some(self.to_move);
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    fn revert(&mut self, mv: &usize) -> Result<(), EngineError> {
        if *mv >= self.cells.len() || self.cells[*mv].is_none() {
            return Err(EngineError::RejectedMove {
                reason: "cell has no piece to remove",
            });
        }
        self.cells[*mv] = None;
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    fn compute_hash(&self) -> u64 {
        let flat: Vec<u8> = self
            .cells
            .iter()
            .map(|c| c.map_or(0, |p| p.0 + 1))
            .chain([self.to_move.0 + 1])
            .collect();
        fx_hash(&flat)
    }

    fn is_won(&self) -> bool {
        self.line_winner().is_some()
    }

    fn is_lost(&self) -> bool {
        self.line_winner().is_none() && self.cells.iter().all(Option::is_some)
    }

    fn reset(&mut self) {
        self.cells = vec![None; SIZE * SIZE];
        self.to_move = PlayerId::FIRST;
        self.caches.reset();
    }
}

impl AdversarialState for Gomoku {
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

    #[test]
    fn test_five_in_a_row_wins() {
        let mut state = Gomoku::new();
        // First player builds a row at row 7; second scatters below.
        for i in 0..4 {
            state.execute_move(&Gomoku::index(7, 3 + i)).unwrap();
            state.execute_move(&Gomoku::index(10, 3 + i)).unwrap();
        }
        assert_eq!(state.winner(), None);

        state.execute_move(&Gomoku::index(7, 7)).unwrap();
        assert_eq!(state.winner(), Some(PlayerId::FIRST));
        assert!(state.is_won());
    }

    #[test]
    fn test_four_is_not_enough() {
        let mut state = Gomoku::new();
        for i in 0..4 {
            state.execute_move(&Gomoku::index(0, i)).unwrap();
            state.execute_move(&Gomoku::index(14, i)).unwrap();
        }
        assert_eq!(state.winner(), None);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_undo_inverse() {
        let mut state = Gomoku::new();
        state.execute_move(&Gomoku::index(7, 7)).unwrap();
        let before_hash = state.hash_value();

        state.execute_move(&Gomoku::index(8, 8)).unwrap();
        state.undo_move(&Gomoku::index(8, 8)).unwrap();

        assert_eq!(state.hash_value(), before_hash);
        assert_eq!(state.cell(8, 8), None);
    }

    #[test]
    fn test_minimax_completes_the_five() {
        let mut state = Gomoku::new();
        // First player has an open four at row 7, columns 3..=6.
        for i in 0..4 {
            state.execute_move(&Gomoku::index(7, 3 + i)).unwrap();
            state.execute_move(&Gomoku::index(10, 3 + i)).unwrap();
        }

        let mut agent = MinimaxAgent::new(TerminalEvaluator, SearchConfig::default().with_depth(1));
        let mv = agent.choose(&mut state).unwrap().unwrap();

        // Either end of the four wins; generation order favors the lower
        // cell index.
        assert_eq!(mv, Gomoku::index(7, 2));
        state.execute_move(&mv).unwrap();
        assert_eq!(state.winner(), Some(PlayerId::FIRST));
    }
}
