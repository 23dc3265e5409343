//! Simple move and capture generation.
//!
//! All generators write into a piece's `moves`/`jumps` slots. They never
//! clear those slots themselves except where noted; callers clear a side
//! wholesale at turn boundaries so nothing stale survives a board mutation.

use log::trace;

use crate::board::{Board, Side};
use crate::coord::{offset, Diagonal, TileIndex};
use crate::piece::{Piece, PieceRegistry};

/// Diagonals a piece may use: all four for a king (or when `all_directions`
/// is forced), otherwise the two forward ones.
fn diagonals(piece: &Piece, all_directions: bool) -> &'static [Diagonal] {
    if piece.is_king || all_directions {
        &Diagonal::ALL
    } else {
        &Diagonal::FORWARD
    }
}

/// Record every empty diagonal neighbour as a simple move.
pub fn compute_piece_moves(board: &Board, piece: &mut Piece, side: Side) {
    let from = piece.tile();
    let forward = side.forward();
    for &dir in diagonals(piece, false) {
        let (dx, dy) = dir.step(forward);
        if let Some(to) = offset(from, dx, dy) {
            if board.is_empty(to) {
                piece.moves.set(dir, to);
            }
        }
    }
}

/// Landing tile of a capture from `from` along `dir`, if one is legal.
fn capture_landing(board: &Board, from: TileIndex, dir: Diagonal, side: Side) -> Option<TileIndex> {
    let (dx, dy) = dir.step(side.forward());
    let over = offset(from, dx, dy)?;
    if board.side_at(over) != Some(side.opponent()) {
        return None;
    }
    let land = offset(from, 2 * dx, 2 * dy)?;
    board.is_empty(land).then_some(land)
}

/// Record every legal capture, setting `must_jump` when one exists.
///
/// `all_directions` forces evaluation of the backward diagonals for a man;
/// it is only used for the continuation of a capture chain.
pub fn compute_piece_jumps(board: &Board, piece: &mut Piece, side: Side, all_directions: bool) {
    let from = piece.tile();
    for &dir in diagonals(piece, all_directions) {
        if let Some(land) = capture_landing(board, from, dir, side) {
            piece.jumps.set(dir, land);
            piece.must_jump = true;
        }
    }
}

/// Clear and recompute moves and jumps for every in-play piece of a side.
///
/// Returns true iff no piece of the side is forced to jump.
pub fn compute_side_moves(board: &Board, registry: &mut PieceRegistry) -> bool {
    let side = registry.side;
    let mut no_forced_jumps = true;
    for piece in registry.iter_mut() {
        piece.clear_options();
        if !piece.in_play {
            continue;
        }
        compute_piece_moves(board, piece, side);
        compute_piece_jumps(board, piece, side, false);
        if piece.must_jump {
            no_forced_jumps = false;
        }
    }
    trace!("{side} options recomputed, forced jumps: {}", !no_forced_jumps);
    no_forced_jumps
}

/// Recompute the follow-up captures of a piece that has just captured.
///
/// Simple moves are cleared since only captures may continue a chain.
/// Returns true if the chain must continue.
pub fn compute_chain_continuation(
    board: &Board,
    piece: &mut Piece,
    side: Side,
    all_directions: bool,
) -> bool {
    piece.clear_options();
    compute_piece_jumps(board, piece, side, all_directions);
    piece.must_jump
}
