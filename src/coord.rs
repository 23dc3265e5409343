//! Conversions between tile indices, board coordinates and square numbers.
//!
//! Tiles are addressed by a linear index `y * 8 + x` in `0..64`. Diagonal
//! arithmetic routinely steps off the board, so every conversion that takes
//! signed coordinates returns `None` instead of wrapping or panicking.
//!
//! Square numbers follow the usual checkers notation: the 32 dark tiles are
//! numbered 1..=32 row by row starting from row 0.

use crate::constants::{BOARD_WIDTH, NUM_SQUARES, NUM_TILES};

/// A linear tile index in `0..NUM_TILES`.
pub type TileIndex = usize;

/// Map `(x, y)` to a tile index, or `None` when either coordinate is off-board.
#[inline]
pub fn to_index(x: isize, y: isize) -> Option<TileIndex> {
    let w = BOARD_WIDTH as isize;
    if !(0..w).contains(&x) || !(0..w).contains(&y) {
        return None;
    }
    Some((y * w + x) as TileIndex)
}

/// Map a tile index to its `(x, y)` coordinates.
///
/// Total for indices in `0..NUM_TILES`; callers validate raw input first.
#[inline]
pub fn to_coord(tile: TileIndex) -> (usize, usize) {
    debug_assert!(tile < NUM_TILES);
    (tile % BOARD_WIDTH, tile / BOARD_WIDTH)
}

/// Step from `tile` by `(dx, dy)`, returning `None` if the result is off-board.
#[inline]
pub fn offset(tile: TileIndex, dx: isize, dy: isize) -> Option<TileIndex> {
    let (x, y) = to_coord(tile);
    to_index(x as isize + dx, y as isize + dy)
}

/// Whether the tile is one of the 32 playable dark tiles.
#[inline]
pub fn is_dark(tile: TileIndex) -> bool {
    let (x, y) = to_coord(tile);
    (x + y) % 2 == 1
}

/// Convert a square number (1..=32) to its tile index.
pub fn square_to_tile(square: usize) -> Option<TileIndex> {
    if !(1..=NUM_SQUARES).contains(&square) {
        return None;
    }
    let i = square - 1;
    let per_row = BOARD_WIDTH / 2;
    let y = i / per_row;
    let x = 2 * (i % per_row) + (y + 1) % 2;
    Some(y * BOARD_WIDTH + x)
}

/// Convert a tile index to its square number, or `None` for light tiles.
pub fn tile_to_square(tile: TileIndex) -> Option<usize> {
    if tile >= NUM_TILES || !is_dark(tile) {
        return None;
    }
    let (x, y) = to_coord(tile);
    Some(y * (BOARD_WIDTH / 2) + x / 2 + 1)
}

/// One of the four diagonal directions, relative to a side's travel.
///
/// The order matches the slot order of a piece's move and jump lists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Diagonal {
    ForwardLeft,
    ForwardRight,
    BackwardLeft,
    BackwardRight,
}

impl Diagonal {
    /// All four diagonals in slot order.
    pub const ALL: [Diagonal; 4] = [
        Diagonal::ForwardLeft,
        Diagonal::ForwardRight,
        Diagonal::BackwardLeft,
        Diagonal::BackwardRight,
    ];

    /// The two diagonals available to a man.
    pub const FORWARD: [Diagonal; 2] = [Diagonal::ForwardLeft, Diagonal::ForwardRight];

    /// Slot index of this diagonal in a destination list.
    #[inline]
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Unit step `(dx, dy)` for a side whose forward direction is `forward` (±1).
    #[inline]
    pub fn step(self, forward: isize) -> (isize, isize) {
        match self {
            Diagonal::ForwardLeft => (-1, forward),
            Diagonal::ForwardRight => (1, forward),
            Diagonal::BackwardLeft => (-1, -forward),
            Diagonal::BackwardRight => (1, -forward),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_index_rejects_off_board() {
        assert_eq!(to_index(-1, 0), None);
        assert_eq!(to_index(0, -1), None);
        assert_eq!(to_index(8, 3), None);
        assert_eq!(to_index(3, 8), None);
        assert_eq!(to_index(0, 0), Some(0));
        assert_eq!(to_index(7, 7), Some(63));
        assert_eq!(to_index(1, 2), Some(17));
    }

    #[test]
    fn test_to_coord() {
        assert_eq!(to_coord(0), (0, 0));
        assert_eq!(to_coord(17), (1, 2));
        assert_eq!(to_coord(63), (7, 7));
    }

    #[test]
    fn test_offset_off_edge() {
        // (0,3) stepping left leaves the board
        assert_eq!(offset(24, -1, 1), None);
        assert_eq!(offset(24, 1, 1), Some(33));
        assert_eq!(offset(7, 1, -1), None);
    }

    #[test]
    fn test_square_numbers() {
        assert_eq!(square_to_tile(1), Some(1));
        assert_eq!(square_to_tile(5), Some(8));
        assert_eq!(square_to_tile(9), Some(17));
        assert_eq!(square_to_tile(13), Some(24));
        assert_eq!(square_to_tile(32), Some(62));
        assert_eq!(square_to_tile(0), None);
        assert_eq!(square_to_tile(33), None);

        for square in 1..=NUM_SQUARES {
            let tile = square_to_tile(square).unwrap();
            assert!(is_dark(tile));
            assert_eq!(tile_to_square(tile), Some(square));
        }
        assert_eq!(tile_to_square(0), None);
        assert_eq!(tile_to_square(64), None);
    }

    #[test]
    fn test_diagonal_steps() {
        assert_eq!(Diagonal::ForwardLeft.step(1), (-1, 1));
        assert_eq!(Diagonal::ForwardRight.step(-1), (1, -1));
        assert_eq!(Diagonal::BackwardLeft.step(-1), (-1, 1));
        assert_eq!(Diagonal::BackwardRight.step(1), (1, -1));
        for (i, d) in Diagonal::ALL.iter().enumerate() {
            assert_eq!(d.slot(), i);
        }
    }
}
