//! Random self-play.
//!
//! Drives a [`Game`] through uniformly random legal selections and
//! destinations. Used by the `selfplay` subcommand and to exercise the rules
//! over many reachable positions in tests.

use log::debug;

use crate::board::Side;
use crate::error::RulesResult;
use crate::game::{Game, MoveKind, MoveResult, Phase};

/// Summary of one finished (or abandoned) game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelfPlayOutcome {
    /// `None` if the ply limit was reached first.
    pub winner: Option<Side>,
    /// Completed turns.
    pub plies: usize,
    /// Pieces lost by each side, indexed by [`Side::index`].
    pub lost: [usize; 2],
}

fn pick<T: Copy>(rng: &mut fastrand::Rng, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.usize(..items.len())])
}

/// Make one random selection-and-destination pair.
///
/// Returns `None` when nothing can be played (the game is over).
pub fn random_step(game: &mut Game, rng: &mut fastrand::Rng) -> RulesResult<Option<MoveResult>> {
    if let Phase::AwaitingSelection = game.phase() {
        let Some(tile) = pick(rng, &game.selectable_tiles()) else {
            return Ok(None);
        };
        game.select_tile(tile)?;
    }
    let Phase::AwaitingDestination { piece, .. } = game.phase() else {
        return Ok(None);
    };
    let from = game.state().piece(piece).tile();
    let Some(to) = pick(rng, &game.legal_destinations(from)) else {
        return Ok(None);
    };
    game.choose_destination(to).map(Some)
}

/// Play random moves until the game ends or `max_plies` turns have passed.
pub fn play_random_game(game: &mut Game, rng: &mut fastrand::Rng, max_plies: usize) -> RulesResult<SelfPlayOutcome> {
    let mut plies = 0;
    while plies < max_plies {
        let Some(result) = random_step(game, rng)? else {
            break;
        };
        if result.kind != MoveKind::CapturedChainContinues {
            plies += 1;
        }
    }
    let outcome = SelfPlayOutcome {
        winner: game.winner(),
        plies,
        lost: [game.dead_count(Side::Red), game.dead_count(Side::Blue)],
    };
    debug!("self-play finished: {outcome:?}");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    #[test]
    fn test_random_game_is_reproducible() {
        let mut a = Game::new(GameConfig::default());
        let mut b = Game::new(GameConfig::default());
        let ra = play_random_game(&mut a, &mut fastrand::Rng::with_seed(7), 200).unwrap();
        let rb = play_random_game(&mut b, &mut fastrand::Rng::with_seed(7), 200).unwrap();
        assert_eq!(ra, rb);
        assert_eq!(a.query_board(), b.query_board());
    }

    #[test]
    fn test_random_step_after_game_over() {
        let state = crate::game::GameState::empty(Side::Red);
        let mut game = Game::from_state(GameConfig::default(), state);
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(random_step(&mut game, &mut rng), Ok(None));
    }
}
