use rand::Rng;

use crate::*;

/// Inclusive lower bound of the per-game mine count draw.
pub const MIN_MINES: u8 = 5;
/// Inclusive upper bound of the per-game mine count draw.
pub const MAX_MINES: u8 = 9;

/// Seeds a fresh board with a random number of mines, skipping cells that
/// are already mines or already revealed. The first-clicked cell is
/// revealed before this runs, which is what keeps it out of the draw.
/// Returns the mine count drawn for this game.
pub(crate) fn seed_mines(board: &mut Board, rng: &mut impl Rng) -> u8 {
    let mine_count = rng.random_range(MIN_MINES..=MAX_MINES);

    for _ in 0..mine_count {
        let mut coords = draw_coords(rng);
        while board[coords].mine || board[coords].revealed {
            coords = draw_coords(rng);
        }
        let cell = &mut board[coords];
        cell.mine = true;
        cell.adjacent_mines = MINE_SENTINEL;
    }

    log::debug!("seeded {} mines", mine_count);
    mine_count
}

// The draw range stops one short of the board edge: row and column
// BOARD_SIZE - 1 never receive a mine.
fn draw_coords(rng: &mut impl Rng) -> Coord2 {
    (
        rng.random_range(0..BOARD_SIZE - 1),
        rng.random_range(0..BOARD_SIZE - 1),
    )
}

/// Derives every non-mine cell's neighboring-mine count by walking the
/// mines and incrementing their in-border, non-mine neighbors. Mine cells
/// keep the sentinel count. Runs once per game, right after seeding.
pub(crate) fn tally_adjacent_mines(board: &mut Board) {
    for coords in Board::iter_coords() {
        if !board[coords].mine {
            continue;
        }
        for neighbor in neighbors(coords) {
            let cell = &mut board[neighbor];
            if !cell.mine {
                cell.adjacent_mines += 1;
            }
        }
    }
}
