//! Game-end detection.

use crate::board::Side;
use crate::piece::PieceRegistry;

/// Whether any in-play piece has a simple move or a capture.
///
/// Only meaningful right after the side's options were recomputed.
pub fn has_legal_move(registry: &PieceRegistry) -> bool {
    registry
        .in_play()
        .any(|(_, p)| p.must_jump || !p.moves.is_empty())
}

/// Winner of the game if `to_move` cannot move at the start of its turn.
pub fn winner(to_move: &PieceRegistry) -> Option<Side> {
    (!has_legal_move(to_move)).then(|| to_move.side.opponent())
}
