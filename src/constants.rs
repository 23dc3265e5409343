//! Constants for board geometry and game setup.
//!
//! The board is a plain 8x8 grid addressed by a linear tile index
//! `y * BOARD_WIDTH + x`. Only the dark tiles are ever occupied.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board width and height in tiles.
pub const BOARD_WIDTH: usize = 8;

/// Total number of tiles on the board.
pub const NUM_TILES: usize = BOARD_WIDTH * BOARD_WIDTH;

/// Number of dark (playable) tiles, addressed by square numbers 1..=32.
pub const NUM_SQUARES: usize = NUM_TILES / 2;

/// Highest row index.
pub const LAST_ROW: usize = BOARD_WIDTH - 1;

// =============================================================================
// Game Setup
// =============================================================================

/// Pieces per side in the standard starting arrangement.
pub const PIECES_PER_SIDE: usize = 12;

/// Rows filled by each side at the start of a game.
pub const STARTING_ROWS: usize = 3;

/// Number of diagonal directions a piece may consider.
pub const NUM_DIAGONALS: usize = 4;

// =============================================================================
// Self-play
// =============================================================================

/// Ply limit for random self-play before a game is abandoned as a draw.
pub const MAX_SELFPLAY_PLIES: usize = 400;
