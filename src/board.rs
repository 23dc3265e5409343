//! The 8x8 tile grid.
//!
//! A tile records which piece occupies it, never the piece itself. Piece
//! attributes live in the per-side registries (see [`crate::piece`]).

use std::fmt;

use crate::constants::{LAST_ROW, NUM_TILES, PIECES_PER_SIDE};
use crate::coord::TileIndex;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Red, Side::Blue];

    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    /// Sign of forward travel along the y axis. Red starts at row 0 and
    /// moves toward row 7; Blue does the reverse.
    pub fn forward(self) -> isize {
        match self {
            Side::Red => 1,
            Side::Blue => -1,
        }
    }

    /// Row this side promotes on when moving forward.
    pub fn far_row(self) -> usize {
        match self {
            Side::Red => LAST_ROW,
            Side::Blue => 0,
        }
    }

    /// Dense index for per-side arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Blue => write!(f, "blue"),
        }
    }
}

/// Stable reference to a piece: its side and its slot in that side's registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PieceId {
    pub side: Side,
    pub index: usize,
}

impl PieceId {
    pub fn new(side: Side, index: usize) -> Self {
        debug_assert!(index < PIECES_PER_SIDE);
        Self { side, index }
    }
}

/// Tile occupancy for the whole board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<PieceId>; NUM_TILES],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self {
            cells: [None; NUM_TILES],
        }
    }

    /// Occupant of a tile. Out-of-range indices read as empty.
    #[inline]
    pub fn get(&self, tile: TileIndex) -> Option<PieceId> {
        self.cells.get(tile).copied().flatten()
    }

    #[inline]
    pub fn is_empty(&self, tile: TileIndex) -> bool {
        self.get(tile).is_none()
    }

    /// Side occupying a tile, if any.
    #[inline]
    pub fn side_at(&self, tile: TileIndex) -> Option<Side> {
        self.get(tile).map(|id| id.side)
    }

    pub fn place(&mut self, tile: TileIndex, id: PieceId) {
        debug_assert!(self.cells[tile].is_none(), "tile {tile} already occupied");
        self.cells[tile] = Some(id);
    }

    /// Clear a tile and return what was on it.
    pub fn take(&mut self, tile: TileIndex) -> Option<PieceId> {
        self.cells[tile].take()
    }

    /// Move whatever occupies `from` onto the empty tile `to`.
    pub fn relocate(&mut self, from: TileIndex, to: TileIndex) {
        debug_assert!(self.cells[to].is_none(), "destination {to} occupied");
        self.cells[to] = self.cells[from].take();
    }

    /// Tile currently referencing `id`, if any.
    pub fn find(&self, id: PieceId) -> Option<TileIndex> {
        self.cells.iter().position(|c| *c == Some(id))
    }

    /// Iterate `(tile, occupant)` over every tile.
    pub fn tiles(&self) -> impl Iterator<Item = (TileIndex, Option<PieceId>)> + '_ {
        self.cells.iter().copied().enumerate()
    }

    /// Number of tiles occupied by `side`.
    pub fn count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .filter(|c| c.map(|id| id.side) == Some(side))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::Red.opponent(), Side::Blue);
        assert_eq!(Side::Blue.opponent(), Side::Red);
        assert_eq!(Side::Red.forward(), 1);
        assert_eq!(Side::Blue.forward(), -1);
        assert_eq!(Side::Red.far_row(), 7);
        assert_eq!(Side::Blue.far_row(), 0);
    }

    #[test]
    fn test_place_relocate_take() {
        let mut board = Board::new();
        let id = PieceId::new(Side::Red, 3);
        board.place(17, id);
        assert_eq!(board.get(17), Some(id));
        assert_eq!(board.side_at(17), Some(Side::Red));

        board.relocate(17, 24);
        assert!(board.is_empty(17));
        assert_eq!(board.find(id), Some(24));

        assert_eq!(board.take(24), Some(id));
        assert!(board.is_empty(24));
        assert_eq!(board.count(Side::Red), 0);
    }

    #[test]
    fn test_get_out_of_range_is_empty() {
        let board = Board::new();
        assert_eq!(board.get(64), None);
        assert_eq!(board.get(usize::MAX), None);
    }
}
