//! Game state and the turn controller.
//!
//! [`GameState`] aggregates the board, both piece registries and the turn
//! bookkeeping. [`Game`] owns one and is its only mutator: every external
//! event (a tile selection or a destination choice) is processed to
//! completion, including the recomputation of options at turn boundaries
//! and capture-chain continuation, before control returns to the caller.
//!
//! ## Phases
//!
//! ```text
//! Setup -> AwaitingSelection <-> AwaitingDestination -> TurnEnd -> AwaitingSelection
//!                                        |  ^                  \-> GameOver
//!                                        \--/ (capture chain)
//! ```

use std::fmt;

use log::{debug, info};

use crate::board::{Board, PieceId, Side};
use crate::constants::{BOARD_WIDTH, NUM_TILES};
use crate::coord::{is_dark, to_coord, to_index, TileIndex};
use crate::error::{RulesError, RulesResult, SelectionRefusal};
use crate::movegen::{compute_chain_continuation, compute_side_moves};
use crate::piece::{Piece, PieceRegistry};
use crate::win;

/// Rule options fixed for the lifetime of a [`Game`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Side that moves first after setup.
    pub first_to_move: Side,
    /// Let a man continue a capture chain along its backward diagonals.
    pub backward_chain_captures: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_to_move: Side::Red,
            backward_chain_captures: true,
        }
    }
}

/// Turn-controller state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    AwaitingSelection,
    /// A piece is bound; `locked` is set while it is mid-chain and may not
    /// be deselected.
    AwaitingDestination { piece: PieceId, locked: bool },
    TurnEnd,
    GameOver { winner: Side },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Setup => "in setup",
            Phase::AwaitingSelection => "awaiting a selection",
            Phase::AwaitingDestination { .. } => "awaiting a destination",
            Phase::TurnEnd => "ending a turn",
            Phase::GameOver { .. } => "over",
        }
    }
}

/// Board, pieces and turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub red: PieceRegistry,
    pub blue: PieceRegistry,
    pub side_to_move: Side,
    /// Pieces lost by each side, indexed by [`Side::index`].
    pub dead: [usize; 2],
    /// No piece of the side to move is forced to capture.
    pub no_forced_jumps: bool,
}

impl GameState {
    /// The standard starting position.
    pub fn new(first_to_move: Side) -> Self {
        let red = PieceRegistry::starting(Side::Red);
        let blue = PieceRegistry::starting(Side::Blue);
        let mut board = Board::new();
        for reg in [&red, &blue] {
            for (id, piece) in reg.in_play() {
                board.place(piece.tile(), id);
            }
        }
        Self {
            board,
            red,
            blue,
            side_to_move: first_to_move,
            dead: [0; 2],
            no_forced_jumps: true,
        }
    }

    /// A board with no pieces, for building arbitrary positions.
    pub fn empty(side_to_move: Side) -> Self {
        Self {
            board: Board::new(),
            red: PieceRegistry::empty(Side::Red),
            blue: PieceRegistry::empty(Side::Blue),
            side_to_move,
            dead: [0; 2],
            no_forced_jumps: true,
        }
    }

    /// Put a piece on `(x, y)`. Returns `None` if the tile is off-board,
    /// light, occupied, or the side has no free slot.
    pub fn add_piece(&mut self, side: Side, x: usize, y: usize, is_king: bool) -> Option<PieceId> {
        let tile = to_index(x as isize, y as isize)?;
        if !is_dark(tile) || !self.board.is_empty(tile) {
            return None;
        }
        let id = self.registry_mut(side).add(x, y, is_king)?;
        self.board.place(tile, id);
        Some(id)
    }

    pub fn registry(&self, side: Side) -> &PieceRegistry {
        match side {
            Side::Red => &self.red,
            Side::Blue => &self.blue,
        }
    }

    pub fn registry_mut(&mut self, side: Side) -> &mut PieceRegistry {
        match side {
            Side::Red => &mut self.red,
            Side::Blue => &mut self.blue,
        }
    }

    /// Board for reading alongside one side's registry for writing.
    fn split_mut(&mut self, side: Side) -> (&Board, &mut PieceRegistry) {
        let registry = match side {
            Side::Red => &mut self.red,
            Side::Blue => &mut self.blue,
        };
        (&self.board, registry)
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        self.registry(id.side).get(id.index)
    }

    /// Piece standing on a tile.
    pub fn piece_at(&self, tile: TileIndex) -> Option<(PieceId, &Piece)> {
        let id = self.board.get(tile)?;
        Some((id, self.piece(id)))
    }

    pub fn dead_count(&self, side: Side) -> usize {
        self.dead[side.index()]
    }

    /// Clear and recompute `side`'s options. Returns true iff no capture is
    /// forced.
    pub fn compute_side_moves(&mut self, side: Side) -> bool {
        let (board, registry) = self.split_mut(side);
        compute_side_moves(board, registry)
    }

    pub fn clear_all_options(&mut self) {
        self.red.clear_options();
        self.blue.clear_options();
    }

    /// Check that tiles and pieces reference each other one-to-one.
    pub fn is_consistent(&self) -> bool {
        for reg in [&self.red, &self.blue] {
            for (i, piece) in reg.iter().enumerate() {
                let id = PieceId::new(reg.side, i);
                let on_board = self.board.find(id);
                match (piece.in_play, on_board) {
                    (true, Some(tile)) if tile == piece.tile() => {}
                    (false, None) => {}
                    _ => return false,
                }
            }
        }
        self.board.tiles().all(|(tile, occupant)| match occupant {
            Some(id) => {
                let piece = self.piece(id);
                piece.in_play && piece.tile() == tile
            }
            None => true,
        })
    }
}

/// Read-only view handed to renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub state: GameState,
    pub phase: Phase,
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for x in 0..BOARD_WIDTH {
            write!(f, " {x}")?;
        }
        writeln!(f)?;
        for y in 0..BOARD_WIDTH {
            write!(f, "{:>2} ", y * BOARD_WIDTH)?;
            for x in 0..BOARD_WIDTH {
                let tile = y * BOARD_WIDTH + x;
                let ch = match self.state.piece_at(tile) {
                    Some((id, p)) => match (id.side, p.is_king) {
                        (Side::Red, false) => 'r',
                        (Side::Red, true) => 'R',
                        (Side::Blue, false) => 'b',
                        (Side::Blue, true) => 'B',
                    },
                    None if is_dark(tile) => '.',
                    None => ' ',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "{} to move, lost: red {} blue {}",
            self.state.side_to_move,
            self.state.dead_count(Side::Red),
            self.state.dead_count(Side::Blue)
        )
    }
}

/// An accepted selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub piece: PieceId,
    pub tile: TileIndex,
    /// The piece's jumps when a capture is forced, else its moves.
    pub legal_destinations: Vec<TileIndex>,
    pub forced: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Simple move; the turn has passed.
    Moved,
    /// Capture that ended the turn.
    Captured,
    /// Capture after which the same piece must capture again.
    CapturedChainContinues,
    /// The move or capture left the opponent without a legal move.
    GameOver,
}

/// A piece removed by a capture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Removal {
    pub tile: TileIndex,
    pub piece: PieceId,
    /// Total pieces the captured side has now lost.
    pub dead_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveResult {
    pub kind: MoveKind,
    pub piece: PieceId,
    pub from: TileIndex,
    pub to: TileIndex,
    pub promoted: bool,
    pub removed: Option<Removal>,
    pub winner: Option<Side>,
    /// Side on move after this result, `None` once the game is over.
    pub next_to_move: Option<Side>,
    /// Follow-up captures when the chain continues.
    pub legal_destinations: Vec<TileIndex>,
}

/// The turn controller.
#[derive(Clone, Debug)]
pub struct Game {
    state: GameState,
    phase: Phase,
    config: GameConfig,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

fn check_tile(tile: usize) -> RulesResult<TileIndex> {
    if tile < NUM_TILES {
        Ok(tile)
    } else {
        Err(RulesError::InvalidTileIndex(tile))
    }
}

impl Game {
    /// A game in the starting position, ready for the first selection.
    pub fn new(config: GameConfig) -> Self {
        let mut game = Self {
            state: GameState::new(config.first_to_move),
            phase: Phase::Setup,
            config,
        };
        game.start_game();
        game
    }

    /// A game continuing from an arbitrary position with
    /// `state.side_to_move` on move. The position may already be lost.
    pub fn from_state(config: GameConfig, state: GameState) -> Self {
        let mut game = Self {
            state,
            phase: Phase::Setup,
            config,
        };
        game.begin_turn();
        game
    }

    /// Reset to the starting position.
    pub fn start_game(&mut self) -> BoardSnapshot {
        self.phase = Phase::Setup;
        self.state = GameState::new(self.config.first_to_move);
        info!("new game, {} to move", self.state.side_to_move);
        self.begin_turn();
        self.query_board()
    }

    pub fn query_board(&self) -> BoardSnapshot {
        BoardSnapshot {
            state: self.state.clone(),
            phase: self.phase,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn side_to_move(&self) -> Side {
        self.state.side_to_move
    }

    pub fn dead_count(&self, side: Side) -> usize {
        self.state.dead_count(side)
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Whether a capture is mandatory for the side to move right now.
    pub fn capture_forced(&self) -> bool {
        !self.state.no_forced_jumps || matches!(self.phase, Phase::AwaitingDestination { locked: true, .. })
    }

    /// Tiles holding a piece the side to move may select.
    pub fn selectable_tiles(&self) -> Vec<TileIndex> {
        if !matches!(self.phase, Phase::AwaitingSelection) {
            return Vec::new();
        }
        let forced = self.capture_forced();
        self.state
            .registry(self.state.side_to_move)
            .in_play()
            .filter(|(_, p)| p.selectable(forced))
            .map(|(_, p)| p.tile())
            .collect()
    }

    /// Legal destinations of the side-to-move piece on `tile`, empty if none.
    pub fn legal_destinations(&self, tile: TileIndex) -> Vec<TileIndex> {
        let forced = self.capture_forced();
        match self.state.piece_at(tile) {
            Some((id, piece)) if id.side == self.state.side_to_move => {
                piece.destinations(forced).iter().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Nominate the piece to move.
    pub fn select_tile(&mut self, tile: usize) -> RulesResult<Selection> {
        let tile = check_tile(tile)?;
        if self.phase != Phase::AwaitingSelection {
            return Err(RulesError::OutOfPhase {
                expected: Phase::AwaitingSelection.name(),
                found: self.phase.name(),
            });
        }
        let refuse = |reason| RulesError::IllegalSelection { tile, reason };
        let (id, piece) = self.state.piece_at(tile).ok_or(refuse(SelectionRefusal::Empty))?;
        if id.side != self.state.side_to_move {
            return Err(refuse(SelectionRefusal::NotYourPiece));
        }
        let forced = self.capture_forced();
        if !piece.selectable(forced) {
            let reason = if forced {
                SelectionRefusal::CaptureRequired
            } else {
                SelectionRefusal::NoMoves
            };
            return Err(refuse(reason));
        }

        let legal_destinations: Vec<_> = piece.destinations(forced).iter().collect();
        debug!("{} selects tile {tile}, destinations {legal_destinations:?}", id.side);
        self.phase = Phase::AwaitingDestination {
            piece: id,
            locked: false,
        };
        Ok(Selection {
            piece: id,
            tile,
            legal_destinations,
            forced,
        })
    }

    /// Drop an unlocked selection.
    pub fn cancel_selection(&mut self) -> RulesResult<()> {
        match self.phase {
            Phase::AwaitingDestination { locked: false, .. } => {
                self.phase = Phase::AwaitingSelection;
                Ok(())
            }
            Phase::AwaitingDestination { locked: true, .. } => Err(RulesError::ChainLocked),
            other => Err(RulesError::OutOfPhase {
                expected: "awaiting a destination",
                found: other.name(),
            }),
        }
    }

    /// Move the bound piece to `tile`.
    ///
    /// A destination outside the legal set cancels an unlocked selection
    /// (the board is untouched) and is refused outright mid-chain.
    pub fn choose_destination(&mut self, tile: usize) -> RulesResult<MoveResult> {
        let tile = check_tile(tile)?;
        let Phase::AwaitingDestination { piece: id, locked } = self.phase else {
            return Err(RulesError::OutOfPhase {
                expected: "awaiting a destination",
                found: self.phase.name(),
            });
        };
        let forced = self.capture_forced();
        let piece = self.state.piece(id);
        if !piece.destinations(forced).contains(tile) {
            if !locked {
                debug!("{} destination {tile} not legal, selection cancelled", id.side);
                self.phase = Phase::AwaitingSelection;
            }
            return Err(RulesError::IllegalDestination(tile));
        }

        let from = piece.tile();
        if forced {
            self.execute_capture(id, from, tile)
        } else {
            self.execute_move(id, from, tile)
        }
    }

    fn execute_move(&mut self, id: PieceId, from: TileIndex, to: TileIndex) -> RulesResult<MoveResult> {
        self.state.board.relocate(from, to);
        let promoted = self.state.registry_mut(id.side).get_mut(id.index).relocate(to);
        debug!("{} moves {from} -> {to}{}", id.side, if promoted { ", crowned" } else { "" });

        let winner = self.end_turn();
        Ok(MoveResult {
            kind: if winner.is_some() { MoveKind::GameOver } else { MoveKind::Moved },
            piece: id,
            from,
            to,
            promoted,
            removed: None,
            winner,
            next_to_move: winner.is_none().then_some(self.state.side_to_move),
            legal_destinations: Vec::new(),
        })
    }

    fn execute_capture(&mut self, id: PieceId, from: TileIndex, to: TileIndex) -> RulesResult<MoveResult> {
        let (fx, fy) = to_coord(from);
        let (tx, ty) = to_coord(to);
        let over = to_index(((fx + tx) / 2) as isize, ((fy + ty) / 2) as isize)
            .ok_or(RulesError::IllegalDestination(to))?;
        let captured = match self.state.board.get(over) {
            Some(c) if c.side != id.side => c,
            _ => return Err(RulesError::IllegalDestination(to)),
        };

        self.state.board.relocate(from, to);
        let promoted = self.state.registry_mut(id.side).get_mut(id.index).relocate(to);
        self.state.board.take(over);
        self.state.registry_mut(captured.side).get_mut(captured.index).capture();
        self.state.dead[captured.side.index()] += 1;
        let removal = Removal {
            tile: over,
            piece: captured,
            dead_count: self.state.dead_count(captured.side),
        };
        debug!(
            "{} captures {from} -> {to} over {over}{}",
            id.side,
            if promoted { ", crowned" } else { "" }
        );

        // Everything the side knew was computed against the old board.
        self.state.compute_side_moves(id.side);
        let all_directions = self.config.backward_chain_captures;
        let (board, registry) = self.state.split_mut(id.side);
        let continues = compute_chain_continuation(board, registry.get_mut(id.index), id.side, all_directions);

        if continues {
            self.state.no_forced_jumps = false;
            self.phase = Phase::AwaitingDestination {
                piece: id,
                locked: true,
            };
            let legal_destinations = self.state.piece(id).jumps.iter().collect();
            debug!("{} chain continues from {to}", id.side);
            return Ok(MoveResult {
                kind: MoveKind::CapturedChainContinues,
                piece: id,
                from,
                to,
                promoted,
                removed: Some(removal),
                winner: None,
                next_to_move: Some(id.side),
                legal_destinations,
            });
        }

        let winner = self.end_turn();
        Ok(MoveResult {
            kind: if winner.is_some() { MoveKind::GameOver } else { MoveKind::Captured },
            piece: id,
            from,
            to,
            promoted,
            removed: Some(removal),
            winner,
            next_to_move: winner.is_none().then_some(self.state.side_to_move),
            legal_destinations: Vec::new(),
        })
    }

    /// Pass the turn. Returns the winner if the new side cannot move.
    fn end_turn(&mut self) -> Option<Side> {
        self.phase = Phase::TurnEnd;
        self.state.side_to_move = self.state.side_to_move.opponent();
        self.begin_turn()
    }

    /// Recompute options for the side to move and detect a loss.
    fn begin_turn(&mut self) -> Option<Side> {
        let side = self.state.side_to_move;
        self.state.clear_all_options();
        self.state.no_forced_jumps = self.state.compute_side_moves(side);

        if let Some(winner) = win::winner(self.state.registry(side)) {
            info!("{side} cannot move, {winner} wins");
            self.phase = Phase::GameOver { winner };
            return Some(winner);
        }
        debug!("{side} to move, capture forced: {}", !self.state.no_forced_jumps);
        self.phase = Phase::AwaitingSelection;
        None
    }
}
