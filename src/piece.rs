//! Piece records and the per-side piece registry.

use crate::board::{PieceId, Side};
use crate::constants::{BOARD_WIDTH, LAST_ROW, NUM_DIAGONALS, PIECES_PER_SIDE, STARTING_ROWS};
use crate::coord::{Diagonal, TileIndex};

/// Destination tiles, one slot per [`Diagonal`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Destinations([Option<TileIndex>; NUM_DIAGONALS]);

impl Destinations {
    pub fn clear(&mut self) {
        self.0 = [None; NUM_DIAGONALS];
    }

    pub fn set(&mut self, dir: Diagonal, tile: TileIndex) {
        self.0[dir.slot()] = Some(tile);
    }

    pub fn get(&self, dir: Diagonal) -> Option<TileIndex> {
        self.0[dir.slot()]
    }

    pub fn contains(&self, tile: TileIndex) -> bool {
        self.0.contains(&Some(tile))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Filled slots, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = TileIndex> + '_ {
        self.0.iter().flatten().copied()
    }
}

/// A single checker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub x: usize,
    pub y: usize,
    pub is_king: bool,
    /// False once captured; the piece is then ignored everywhere.
    pub in_play: bool,
    /// At least one capture is available this turn.
    pub must_jump: bool,
    pub moves: Destinations,
    pub jumps: Destinations,
}

impl Piece {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            is_king: false,
            in_play: true,
            must_jump: false,
            moves: Destinations::default(),
            jumps: Destinations::default(),
        }
    }

    #[inline]
    pub fn tile(&self) -> TileIndex {
        self.y * BOARD_WIDTH + self.x
    }

    /// Drop all computed moves and jumps.
    pub fn clear_options(&mut self) {
        self.must_jump = false;
        self.moves.clear();
        self.jumps.clear();
    }

    /// Whether this piece may be selected given the side's forced-jump status.
    pub fn selectable(&self, forced: bool) -> bool {
        self.in_play && if forced { self.must_jump } else { !self.moves.is_empty() }
    }

    /// Legal destinations under the side's forced-jump status.
    pub fn destinations(&self, forced: bool) -> &Destinations {
        if forced { &self.jumps } else { &self.moves }
    }

    /// Move to `tile`, crowning on row 0 or the last row. Returns true if
    /// the piece was promoted by this move.
    pub fn relocate(&mut self, tile: TileIndex) -> bool {
        self.x = tile % BOARD_WIDTH;
        self.y = tile / BOARD_WIDTH;
        if !self.is_king && (self.y == 0 || self.y == LAST_ROW) {
            self.is_king = true;
            return true;
        }
        false
    }

    /// Mark as captured.
    pub fn capture(&mut self) {
        self.in_play = false;
        self.clear_options();
    }
}

/// The fixed set of pieces belonging to one side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceRegistry {
    pub side: Side,
    pieces: [Piece; PIECES_PER_SIDE],
}

impl PieceRegistry {
    /// All twelve pieces in the standard starting arrangement.
    ///
    /// Red fills rows 0..3, Blue fills rows 5..8, each on the dark tiles.
    pub fn starting(side: Side) -> Self {
        let per_row = BOARD_WIDTH / 2;
        let pieces = std::array::from_fn(|i| {
            let row = i / per_row;
            let col = 2 * (i % per_row);
            match side {
                Side::Red => Piece::new(col + (row + 1) % 2, row),
                Side::Blue => Piece::new(col + row % 2, row + BOARD_WIDTH - STARTING_ROWS),
            }
        });
        Self { side, pieces }
    }

    /// A registry in which every piece is already captured. Used to build
    /// arbitrary positions with [`PieceRegistry::add`].
    pub fn empty(side: Side) -> Self {
        let pieces = std::array::from_fn(|_| {
            let mut p = Piece::new(0, 0);
            p.in_play = false;
            p
        });
        Self { side, pieces }
    }

    /// Bring the first captured slot back into play at `(x, y)`.
    pub fn add(&mut self, x: usize, y: usize, is_king: bool) -> Option<PieceId> {
        let index = self.pieces.iter().position(|p| !p.in_play)?;
        let mut piece = Piece::new(x, y);
        piece.is_king = is_king;
        self.pieces[index] = piece;
        Some(PieceId::new(self.side, index))
    }

    #[inline]
    pub fn get(&self, index: usize) -> &Piece {
        &self.pieces[index]
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut Piece {
        &mut self.pieces[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.pieces.iter_mut()
    }

    /// In-play pieces with their ids.
    pub fn in_play(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        let side = self.side;
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| p.in_play)
            .map(move |(i, p)| (PieceId::new(side, i), p))
    }

    /// Logical OR of `must_jump` over in-play pieces.
    pub fn must_jump(&self) -> bool {
        self.pieces.iter().any(|p| p.in_play && p.must_jump)
    }

    pub fn clear_options(&mut self) {
        for p in &mut self.pieces {
            p.clear_options();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_layout() {
        let red = PieceRegistry::starting(Side::Red);
        let tiles: Vec<_> = red.iter().map(Piece::tile).collect();
        assert_eq!(tiles, vec![1, 3, 5, 7, 8, 10, 12, 14, 17, 19, 21, 23]);

        let blue = PieceRegistry::starting(Side::Blue);
        let tiles: Vec<_> = blue.iter().map(Piece::tile).collect();
        assert_eq!(tiles, vec![40, 42, 44, 46, 49, 51, 53, 55, 56, 58, 60, 62]);

        assert!(red.iter().chain(blue.iter()).all(|p| p.in_play && !p.is_king));
    }

    #[test]
    fn test_relocate_promotes_once() {
        let mut p = Piece::new(1, 6);
        assert!(p.relocate(7 * 8));
        assert!(p.is_king);
        assert!(!p.relocate(6 * 8 + 1));
        assert!(p.is_king, "promotion is irreversible");
    }

    #[test]
    fn test_capture_clears_options() {
        let mut p = Piece::new(2, 2);
        p.moves.set(Diagonal::ForwardLeft, 25);
        p.jumps.set(Diagonal::ForwardRight, 36);
        p.must_jump = true;
        p.capture();
        assert!(!p.in_play);
        assert!(!p.must_jump);
        assert!(p.moves.is_empty() && p.jumps.is_empty());
        assert!(!p.selectable(false));
    }

    #[test]
    fn test_destinations() {
        let mut d = Destinations::default();
        assert!(d.is_empty());
        d.set(Diagonal::BackwardRight, 10);
        d.set(Diagonal::ForwardLeft, 24);
        assert!(d.contains(10));
        assert!(!d.contains(11));
        assert_eq!(d.iter().collect::<Vec<_>>(), vec![24, 10]);
        assert_eq!(d.get(Diagonal::BackwardRight), Some(10));
        d.clear();
        assert!(d.is_empty());
    }

    #[test]
    fn test_empty_registry_add() {
        let mut reg = PieceRegistry::empty(Side::Blue);
        assert_eq!(reg.in_play().count(), 0);
        let id = reg.add(1, 4, false).unwrap();
        assert_eq!(id, PieceId::new(Side::Blue, 0));
        assert_eq!(reg.get(0).tile(), 33);
        assert_eq!(reg.in_play().count(), 1);
    }
}
