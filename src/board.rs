use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{GameError, Result};
use crate::types::{BOARD_SIZE, Coord2, nd};

/// The fixed 8×8 grid of cells. Sole owner of cell records; the View only
/// ever sees them through the per-cell patches the engine emits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: Array2::default([BOARD_SIZE as usize, BOARD_SIZE as usize]),
        }
    }

    /// Reinitializes every cell to the hidden, mine-free default.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < BOARD_SIZE && coords.1 < BOARD_SIZE {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords.0, coords.1))
        }
    }

    /// Row-major iteration over every board coordinate.
    pub fn iter_coords() -> impl Iterator<Item = Coord2> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
    }

    /// Number of cells currently holding a mine.
    pub fn mine_cell_count(&self) -> u8 {
        self.cells.iter().filter(|cell| cell.mine).count() as u8
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[nd(coords)]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[nd(coords)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::MINE_SENTINEL;

    #[test]
    fn reset_restores_every_cell_to_default() {
        let mut board = Board::new();
        board[(3, 3)].mine = true;
        board[(3, 3)].adjacent_mines = MINE_SENTINEL;
        board[(0, 0)].revealed = true;

        board.reset();

        assert!(Board::iter_coords().all(|pos| board[pos] == Cell::default()));
    }

    #[test]
    fn validate_accepts_the_whole_board_and_nothing_else() {
        let board = Board::new();
        assert_eq!(board.validate_coords((0, 0)), Ok((0, 0)));
        assert_eq!(board.validate_coords((7, 7)), Ok((7, 7)));
        assert_eq!(
            board.validate_coords((8, 0)),
            Err(GameError::OutOfBounds(8, 0))
        );
        assert_eq!(
            board.validate_coords((3, 11)),
            Err(GameError::OutOfBounds(3, 11))
        );
    }

    #[test]
    fn iter_coords_is_row_major_and_complete() {
        let all: Vec<_> = Board::iter_coords().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0], (0, 0));
        assert_eq!(all[1], (0, 1));
        assert_eq!(all[63], (7, 7));
    }
}
