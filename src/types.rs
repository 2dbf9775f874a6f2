/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Edge length of the (fixed) square board.
pub const BOARD_SIZE: Coord = 8;

/// Converts board coordinates into an `ndarray` index.
pub(crate) const fn nd((row, col): Coord2) -> [usize; 2] {
    [row as usize, col as usize]
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Iterates the 8-connected neighbors of `center`, clipped at the board
/// borders.
pub fn neighbors(center: Coord2) -> impl Iterator<Item = Coord2> {
    DISPLACEMENTS.iter().filter_map(move |&(dr, dc)| {
        let row = center.0.checked_add_signed(dr)?;
        let col = center.1.checked_add_signed(dc)?;
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some((row, col))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_cell_has_eight_neighbors() {
        let all: Vec<_> = neighbors((4, 4)).collect();
        assert_eq!(all.len(), 8);
        assert!(!all.contains(&(4, 4)));
    }

    #[test]
    fn corners_clip_to_three_neighbors() {
        for corner in [(0, 0), (0, 7), (7, 0), (7, 7)] {
            assert_eq!(neighbors(corner).count(), 3, "corner {corner:?}");
        }
    }

    #[test]
    fn edge_cell_clips_to_five_neighbors() {
        assert_eq!(neighbors((0, 3)).count(), 5);
    }
}
