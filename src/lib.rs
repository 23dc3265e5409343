//! Checkers-rs: a rules engine for two-player checkers on an 8x8 board.
//!
//! The crate tracks board and piece state, generates simple moves and
//! mandatory captures (including multi-jump chains and crowning), enforces
//! turn order and detects the end of the game. Rendering and input handling
//! are left to the caller, which feeds the engine raw tile indices.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and setup parameters
//! - [`coord`] - Tile index, coordinate and square-number conversions
//! - [`board`] - Tile occupancy grid and sides
//! - [`piece`] - Piece records and per-side registries
//! - [`movegen`] - Simple move and capture generation
//! - [`game`] - Game state and the turn controller
//! - [`win`] - Game-end detection
//! - [`error`] - Rejection reasons
//! - [`console`] - Text console front-end
//! - [`selfplay`] - Random self-play driver
//!
//! ## Example
//!
//! ```
//! use checkers_rs::game::{Game, GameConfig, MoveKind};
//! use checkers_rs::board::Side;
//!
//! let mut game = Game::new(GameConfig::default());
//!
//! // Red opens by moving the piece on tile 17 to tile 24
//! let selection = game.select_tile(17).unwrap();
//! assert_eq!(selection.legal_destinations, vec![24, 26]);
//!
//! let result = game.choose_destination(24).unwrap();
//! assert_eq!(result.kind, MoveKind::Moved);
//! assert_eq!(game.side_to_move(), Side::Blue);
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod coord;
pub mod error;
pub mod game;
pub mod movegen;
pub mod piece;
pub mod selfplay;
pub mod win;
