//! Line-oriented text console.
//!
//! Turns typed commands into turn-controller calls so a game can be played
//! from a terminal or scripted through a pipe. Responses follow a simple
//! convention: `=` followed by the result on success, `?` followed by the
//! reason on failure, each terminated by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `list_commands`, `known_command <cmd>`, `quit`
//! - `new` - Start a new game
//! - `board` - Print the board
//! - `turn` - Side to move, or the winner once the game is over
//! - `moves` - Selectable tiles, or the bound piece's destinations
//! - `select <tile>` - Bind a piece
//! - `move <tile>` - Move the bound piece
//! - `cancel` - Drop the current selection
//!
//! A `<tile>` is either a tile index `0..64` or a square number written
//! `s1`..`s32`.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::coord::{square_to_tile, TileIndex};
use crate::game::{Game, GameConfig, MoveKind, MoveResult, Phase};

/// The list of known console commands.
const KNOWN_COMMANDS: &[&str] = &[
    "board",
    "cancel",
    "known_command",
    "list_commands",
    "move",
    "moves",
    "name",
    "new",
    "quit",
    "select",
    "turn",
    "version",
];

/// Console state.
pub struct Console {
    game: Game,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

/// Parse a tile argument: a plain index or `s<square>`.
fn parse_tile(arg: &str) -> Option<TileIndex> {
    match arg.strip_prefix(['s', 'S']) {
        Some(square) => square_to_tile(square.parse().ok()?),
        None => arg.parse().ok(),
    }
}

fn join(tiles: &[TileIndex]) -> String {
    tiles
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe(result: &MoveResult) -> String {
    let mut text = match result.kind {
        MoveKind::Moved => format!("moved {} -> {}", result.from, result.to),
        MoveKind::Captured | MoveKind::CapturedChainContinues | MoveKind::GameOver => {
            match result.removed {
                Some(removed) => format!(
                    "moved {} -> {}, captured {} ({} has lost {})",
                    result.from, result.to, removed.tile, removed.piece.side, removed.dead_count
                ),
                None => format!("moved {} -> {}", result.from, result.to),
            }
        }
    };
    if result.promoted {
        text.push_str(", crowned");
    }
    match (result.kind, result.winner) {
        (MoveKind::CapturedChainContinues, _) => {
            text.push_str(&format!(", continue with {}", join(&result.legal_destinations)));
        }
        (_, Some(winner)) => text.push_str(&format!(", {winner} wins")),
        _ => {}
    }
    text
}

impl Console {
    pub fn new(config: GameConfig) -> Self {
        Self {
            game: Game::new(config),
        }
    }

    /// A console driving an existing game.
    pub fn with_game(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            writeln!(output, "{prefix} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Execute a command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "new" => {
                let snapshot = self.game.start_game();
                (true, format!("\n{snapshot}"))
            }

            "board" => (true, format!("\n{}", self.game.query_board())),

            "turn" => match self.game.phase() {
                Phase::GameOver { winner } => (true, format!("game over, {winner} wins")),
                _ => (true, self.game.side_to_move().to_string()),
            },

            "moves" => match self.game.phase() {
                Phase::AwaitingDestination { piece, .. } => {
                    let tile = self.game.state().piece(piece).tile();
                    (true, join(&self.game.legal_destinations(tile)))
                }
                _ => (true, join(&self.game.selectable_tiles())),
            },

            "select" => {
                let Some(tile) = args.first().and_then(|a| parse_tile(a)) else {
                    return (false, "missing or invalid tile".to_string());
                };
                match self.game.select_tile(tile) {
                    Ok(sel) => {
                        let kind = if sel.forced { "jumps" } else { "moves" };
                        (true, format!("{kind} {}", join(&sel.legal_destinations)))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "move" => {
                let Some(tile) = args.first().and_then(|a| parse_tile(a)) else {
                    return (false, "missing or invalid tile".to_string());
                };
                match self.game.choose_destination(tile) {
                    Ok(result) => (true, describe(&result)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "cancel" => match self.game.cancel_selection() {
                Ok(()) => (true, String::new()),
                Err(e) => (false, e.to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Side;
    use crate::game::GameState;

    #[test]
    fn test_parse_tile() {
        assert_eq!(parse_tile("17"), Some(17));
        assert_eq!(parse_tile("s9"), Some(17));
        assert_eq!(parse_tile("S13"), Some(24));
        assert_eq!(parse_tile("s0"), None);
        assert_eq!(parse_tile("x"), None);
    }

    #[test]
    fn test_known_command() {
        let mut console = Console::default();
        assert_eq!(console.execute("known_command", &["select"]), (true, "true".to_string()));
        assert_eq!(console.execute("known_command", &["genmove"]), (true, "false".to_string()));
        assert!(!console.execute("known_command", &[]).0);
    }

    #[test]
    fn test_select_and_move() {
        let mut console = Console::default();
        assert_eq!(console.execute("moves", &[]), (true, "17 19 21 23".to_string()));
        assert_eq!(console.execute("select", &["s9"]), (true, "moves 24 26".to_string()));
        assert_eq!(console.execute("move", &["s13"]), (true, "moved 17 -> 24".to_string()));
        assert_eq!(console.execute("turn", &[]), (true, "blue".to_string()));
    }

    #[test]
    fn test_capture_reports_landing_tile() {
        let mut state = GameState::empty(Side::Red);
        state.add_piece(Side::Red, 1, 2, false).unwrap();
        state.add_piece(Side::Blue, 2, 3, false).unwrap();
        state.add_piece(Side::Blue, 4, 5, false).unwrap();
        state.add_piece(Side::Blue, 7, 6, false).unwrap();
        let mut console = Console::with_game(Game::from_state(GameConfig::default(), state));

        assert_eq!(console.execute("select", &["17"]), (true, "jumps 35".to_string()));
        assert_eq!(
            console.execute("move", &["35"]),
            (true, "moved 17 -> 35, captured 26 (blue has lost 1), continue with 53".to_string())
        );
        assert_eq!(
            console.execute("move", &["53"]),
            (true, "moved 35 -> 53, captured 44 (blue has lost 2)".to_string())
        );
    }

    #[test]
    fn test_errors_are_reported() {
        let mut console = Console::default();
        let (ok, msg) = console.execute("select", &["40"]);
        assert!(!ok);
        assert!(msg.contains("opponent"), "{msg}");
        assert!(!console.execute("select", &[]).0);
        assert!(!console.execute("fly", &[]).0);
    }

    #[test]
    fn test_run_loop() {
        let mut console = Console::default();
        let input = b"# comment\nselect 17\nmove 24\nquit\nboard\n";
        let mut out = Vec::new();
        console.run(&input[..], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("= moves 24 26\n\n= moved 17 -> 24\n\n= \n\n"));
        assert!(!text.contains("to move"), "loop stops at quit");
    }
}
