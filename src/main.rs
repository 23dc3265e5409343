//! Checkers-rs: a checkers rules engine.
//!
//! ## Usage
//!
//! - `checkers` - Play on the text console
//! - `checkers play` - Same as above
//! - `checkers selfplay --games 10 --seed 42` - Play random games

use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use checkers_rs::board::Side;
use checkers_rs::console::Console;
use checkers_rs::constants::MAX_SELFPLAY_PLIES;
use checkers_rs::game::{Game, GameConfig};
use checkers_rs::selfplay::play_random_game;

/// Checkers-rs: a checkers rules engine
#[derive(Parser)]
#[command(name = "checkers")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Side that moves first
    #[arg(long, value_enum, default_value_t = FirstSide::Red, global = true)]
    first: FirstSide,

    /// Only allow a man to continue a capture chain forward
    #[arg(long, global = true)]
    no_backward_chains: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Copy, Clone, ValueEnum)]
enum FirstSide {
    Red,
    Blue,
}

impl From<FirstSide> for Side {
    fn from(side: FirstSide) -> Self {
        match side {
            FirstSide::Red => Side::Red,
            FirstSide::Blue => Side::Blue,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively on the text console
    Play,
    /// Play random games and report the results
    Selfplay {
        /// Number of games
        #[arg(short, long, default_value_t = 10)]
        games: usize,
        /// RNG seed
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Turns before a game is abandoned as a draw
        #[arg(long, default_value_t = MAX_SELFPLAY_PLIES)]
        max_plies: usize,
    },
}

fn init_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = GameConfig {
        first_to_move: cli.first.into(),
        backward_chain_captures: !cli.no_backward_chains,
    };

    match cli.command {
        Some(Commands::Selfplay {
            games,
            seed,
            max_plies,
        }) => run_selfplay(config, games, seed, max_plies),
        Some(Commands::Play) | None => {
            let mut console = Console::new(config);
            console.run(io::stdin().lock(), io::stdout())
        }
    }
}

fn run_selfplay(config: GameConfig, games: usize, seed: u64, max_plies: usize) -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut wins = [0usize; 2];
    let mut draws = 0;

    for n in 0..games {
        let mut game = Game::new(config);
        let outcome = play_random_game(&mut game, &mut rng, max_plies)?;
        match outcome.winner {
            Some(side) => {
                wins[side.index()] += 1;
                println!("game {n}: {side} wins after {} plies", outcome.plies);
            }
            None => {
                draws += 1;
                println!("game {n}: abandoned after {} plies", outcome.plies);
            }
        }
    }

    println!(
        "red {} / blue {} / unfinished {draws}",
        wins[Side::Red.index()],
        wins[Side::Blue.index()]
    );
    Ok(())
}
