//! Connect Four on the standard 7×6 board. A move is a column index; the
//! piece falls to the lowest free row.

use crate::core::{fx_hash, EngineError, GameState, PlayerId, StateCaches};
use crate::search::AdversarialState;

/// Board width in columns.
pub const COLUMNS: usize = 7;
/// Board height in rows.
pub const ROWS: usize = 6;

/// A Connect Four position.
#[derive(Clone, Debug)]
pub struct ConnectFour {
    columns: [Vec<PlayerId>; COLUMNS],
    to_move: PlayerId,
    caches: StateCaches<usize>,
}

impl ConnectFour {
    /// An empty board with the first player to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: std::array::from_fn(|_| Vec::with_capacity(ROWS)),
            to_move: PlayerId::FIRST,
            caches: StateCaches::new(),
        }
    }

    /// The piece at (column, row), row 0 at the bottom.
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Option<PlayerId> {
        self.columns[column].get(row).copied()
    }

    /// Number of pieces in a column.
    #[must_use]
    pub fn column_height(&self, column: usize) -> usize {
        self.columns[column].len()
    }

    fn board_full(&self) -> bool {
        self.columns.iter().all(|c| c.len() == ROWS)
    }

    fn line_winner(&self) -> Option<PlayerId> {
        const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

        for column in 0..COLUMNS {
            for row in 0..self.columns[column].len() {
                let player = self.columns[column][row];
                for (dc, dr) in DIRECTIONS {
                    let mut run = 1;
                    let (mut c, mut r) = (column as isize + dc, row as isize + dr);
                    while run < 4
                        && (0..COLUMNS as isize).contains(&c)
                        && r >= 0
                        && self.cell(c as usize, r as usize) == Some(player)
                    {
                        run += 1;
                        c += dc;
                        r += dr;
                    }
                    if run == 4 {
                        return Some(player);
                    }
                }
            }
        }
        None
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for ConnectFour {
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
        (0..COLUMNS)
            .filter(|&c| self.columns[c].len() < ROWS)
            .collect()
    }

    fn apply(&mut self, mv: &usize) -> Result<(), EngineError> {
        if *mv >= COLUMNS || self.columns[*mv].len() >= ROWS || self.line_winner().is_some() {
            return Err(EngineError::RejectedMove {
                reason: "column unavailable",
            });
        }
        self.columns[*mv].push(self.to_move);
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    fn revert(&mut self, mv: &usize) -> Result<(), EngineError> {
        if *mv >= COLUMNS || self.columns[*mv].is_empty() {
            return Err(EngineError::RejectedMove {
                reason: "column has no piece to remove",
            });
        }
        self.columns[*mv].pop();
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    fn compute_hash(&self) -> u64 {
        let mut flat: Vec<u8> = Vec::with_capacity(COLUMNS * ROWS + COLUMNS + 1);
        for column in &self.columns {
            flat.push(column.len() as u8);
            flat.extend(column.iter().map(|p| p.0));
        }
        flat.push(self.to_move.0);
        fx_hash(&flat)
    }

    fn is_won(&self) -> bool {
        self.line_winner().is_some()
    }

    fn is_lost(&self) -> bool {
        self.line_winner().is_none() && self.board_full()
    }

    fn reset(&mut self) {
        self.columns = std::array::from_fn(|_| Vec::with_capacity(ROWS));
        self.to_move = PlayerId::FIRST;
        self.caches.reset();
    }
}

impl AdversarialState for ConnectFour {
    fn to_move(&self) -> PlayerId {
        self.to_move
    }

    fn winner(&self) -> Option<PlayerId> {
        self.line_winner()
    }
}
