//! Rules invariants checked over random self-play games.

use std::collections::HashSet;

use checkers_rs::board::{PieceId, Side};
use checkers_rs::constants::PIECES_PER_SIDE;
use checkers_rs::coord::{to_coord, to_index};
use checkers_rs::game::{Game, GameConfig, MoveKind, Phase};
use checkers_rs::selfplay::{play_random_game, random_step};

const SEEDS: u64 = 40;
const MAX_STEPS: usize = 300;

/// Non-king options of the side to move must point toward the far row.
fn assert_men_move_forward(game: &Game) {
    let side = game.side_to_move();
    for (_, piece) in game.state().registry(side).in_play() {
        if piece.is_king {
            continue;
        }
        for dest in piece.moves.iter().chain(piece.jumps.iter()) {
            let (_, y) = to_coord(dest);
            let dy = y as isize - piece.y as isize;
            assert_eq!(dy.signum(), side.forward(), "man at {} offers {dest}", piece.tile());
        }
    }
}

/// Only capturing pieces are selectable while a capture is forced.
fn assert_forced_capture_rule(game: &Game) {
    let side = game.side_to_move();
    let registry = game.state().registry(side);
    let selectable = game.selectable_tiles();
    if registry.must_jump() {
        for tile in &selectable {
            let (_, piece) = game.state().piece_at(*tile).unwrap();
            assert!(piece.must_jump);
        }
        let jumpers = registry.in_play().filter(|(_, p)| p.must_jump).count();
        assert_eq!(selectable.len(), jumpers);
    } else {
        assert!(!selectable.is_empty());
    }
}

fn run_seed(seed: u64, config: GameConfig) {
    let mut game = Game::new(config);
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut kings: HashSet<PieceId> = HashSet::new();

    for _ in 0..MAX_STEPS {
        if game.phase() == Phase::AwaitingSelection {
            assert_men_move_forward(&game);
            assert_forced_capture_rule(&game);
        }

        let before = game.query_board();
        let Some(result) = random_step(&mut game, &mut rng).unwrap() else {
            break;
        };
        let after = game.query_board();
        assert_eq!(after, game.query_board(), "query_board must not mutate");
        assert!(after.state.is_consistent(), "seed {seed}: board and registries disagree");

        let mover = result.piece.side;
        let opponent = mover.opponent();
        let mover_count = after.state.board.count(mover);
        let opponent_count = after.state.board.count(opponent);
        assert_eq!(mover_count, before.state.board.count(mover));

        match result.removed {
            Some(removed) => {
                assert_eq!(opponent_count, before.state.board.count(opponent) - 1);
                assert_eq!(removed.piece.side, opponent);
                let (fx, fy) = to_coord(result.from);
                let (tx, ty) = to_coord(result.to);
                let mid = to_index(((fx + tx) / 2) as isize, ((fy + ty) / 2) as isize).unwrap();
                assert_eq!(removed.tile, mid);
                assert!(!after.state.piece(removed.piece).in_play);
            }
            None => assert_eq!(opponent_count, before.state.board.count(opponent)),
        }

        for side in Side::BOTH {
            assert_eq!(
                after.state.board.count(side) + after.state.dead_count(side),
                PIECES_PER_SIDE
            );
        }

        let piece = after.state.piece(result.piece);
        let (_, y) = to_coord(result.to);
        if y == 0 || y == 7 {
            assert!(piece.is_king);
        }
        if piece.is_king {
            kings.insert(result.piece);
        }
        for id in &kings {
            assert!(after.state.piece(*id).is_king, "seed {seed}: king {id:?} reverted");
        }

        match result.kind {
            MoveKind::CapturedChainContinues => assert_eq!(game.side_to_move(), mover),
            MoveKind::GameOver => assert_eq!(game.winner(), Some(mover)),
            MoveKind::Moved | MoveKind::Captured => assert_eq!(game.side_to_move(), opponent),
        }
    }
}

#[test]
fn test_invariants_hold_in_random_games() {
    for seed in 0..SEEDS {
        run_seed(seed, GameConfig::default());
    }
}

#[test]
fn test_invariants_without_backward_chains() {
    let config = GameConfig {
        first_to_move: Side::Blue,
        backward_chain_captures: false,
    };
    for seed in 0..SEEDS {
        run_seed(seed, config);
    }
}

#[test]
fn test_random_games_terminate_or_hit_limit() {
    let mut finished = 0;
    for seed in 0..SEEDS {
        let mut game = Game::new(GameConfig::default());
        let outcome = play_random_game(&mut game, &mut fastrand::Rng::with_seed(seed), 400).unwrap();
        if let Some(winner) = outcome.winner {
            finished += 1;
            assert_eq!(game.phase(), Phase::GameOver { winner });
        } else {
            assert_eq!(outcome.plies, 400);
        }
    }
    assert!(finished > 0, "some random game should reach a result");
}
