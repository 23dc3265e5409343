//! Errors returned by the turn controller.
//!
//! Every error is recoverable: a call that returns one leaves the board
//! and pieces exactly as they were.

use crate::coord::TileIndex;

/// Why a selection was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionRefusal {
    /// No piece on the tile.
    Empty,
    /// The piece belongs to the side not on move.
    NotYourPiece,
    /// The piece has no simple move available.
    NoMoves,
    /// Another piece must capture and this one cannot.
    CaptureRequired,
}

impl std::fmt::Display for SelectionRefusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionRefusal::Empty => write!(f, "tile is empty"),
            SelectionRefusal::NotYourPiece => write!(f, "piece belongs to the opponent"),
            SelectionRefusal::NoMoves => write!(f, "piece has no moves"),
            SelectionRefusal::CaptureRequired => write!(f, "a capture is mandatory elsewhere"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Tile index outside `0..64`.
    #[error("invalid tile index {0}")]
    InvalidTileIndex(usize),

    #[error("illegal selection of tile {tile}: {reason}")]
    IllegalSelection {
        tile: TileIndex,
        reason: SelectionRefusal,
    },

    /// Destination not among the active piece's legal set.
    #[error("illegal destination {0}")]
    IllegalDestination(TileIndex),

    /// The call does not apply to the current phase.
    #[error("expected {expected}, but the game is {found}")]
    OutOfPhase {
        expected: &'static str,
        found: &'static str,
    },

    /// The active piece is in the middle of a capture chain.
    #[error("capture chain in progress")]
    ChainLocked,
}

pub type RulesResult<T> = Result<T, RulesError>;
