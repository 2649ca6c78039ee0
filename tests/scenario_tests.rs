//! End-to-end scenarios through the `Game` surface

use std::time::Duration;

use stackfall::core::{EngineConfig, Game, LineClearPhase, ScriptedRng};
use stackfall::types::{ColorToken, Coord, Direction, PieceType, TICK_MS};

const FRAME: Duration = Duration::from_millis(TICK_MS as u64);
const GRAY: ColorToken = ColorToken(8);

fn scripted(sequence: &[PieceType]) -> Game<ScriptedRng> {
    Game::with_rng(EngineConfig::default(), ScriptedRng::new(sequence.to_vec()))
}

fn sorted(coords: &[Coord]) -> Vec<Coord> {
    let mut v = coords.to_vec();
    v.sort();
    v
}

#[test]
fn test_l_piece_spawns_and_rotates_twice() {
    let mut game = scripted(&[PieceType::L]);
    assert!(game.spawn_piece());

    let piece = *game.active_piece().unwrap();
    assert_eq!(
        *piece.coords(),
        [
            Coord::new(1, 4),
            Coord::new(0, 4),
            Coord::new(2, 4),
            Coord::new(2, 5)
        ]
    );

    assert!(game.rotate_active_piece(true));
    assert_eq!(
        sorted(game.active_piece().unwrap().coords()),
        sorted(&[
            Coord::new(1, 4),
            Coord::new(1, 5),
            Coord::new(1, 3),
            Coord::new(2, 3)
        ])
    );

    assert!(game.rotate_active_piece(true));
    assert_eq!(
        sorted(game.active_piece().unwrap().coords()),
        sorted(&[
            Coord::new(1, 4),
            Coord::new(2, 4),
            Coord::new(0, 4),
            Coord::new(0, 3)
        ])
    );
    assert_eq!(game.grid().occupied_count(), 4);
}

#[test]
fn test_dropping_into_gap_clears_only_the_bottom_row() {
    let mut game = scripted(&[PieceType::Line]);
    for col in 0..9 {
        game.grid_mut().set_cell(19, col, GRAY);
    }

    assert!(game.spawn_piece());
    assert!(game.move_active_piece(Direction::Right, 4));
    assert_eq!(game.drop_active_piece(), 16);

    let event = game.take_last_event().unwrap();
    assert_eq!(event.piece_type, PieceType::Line);
    assert_eq!(event.cleared_rows, vec![19]);
    assert!(game.active_piece().is_none());
    assert!(game.is_line_clear_in_progress());

    while game.tick_line_clear(FRAME) {}
    assert_eq!(game.line_clear_phase(), LineClearPhase::Idle);

    // The three leftover line cells drop by one row.
    assert_eq!(game.grid().occupied_count(), 3);
    for row in 17..20 {
        assert!(game.grid().is_occupied(row, 9));
    }
    assert!(game.spawn_piece());
}

#[test]
fn test_input_ignored_until_clear_finishes() {
    let mut game = scripted(&[PieceType::Square, PieceType::T]);
    for col in 2..10 {
        game.grid_mut().set_cell(19, col, GRAY);
        game.grid_mut().set_cell(18, col, GRAY);
    }

    assert!(game.spawn_piece());
    assert!(game.move_active_piece(Direction::Left, 4));
    game.drop_active_piece();
    assert_eq!(game.take_last_event().unwrap().cleared_rows, vec![18, 19]);

    assert!(game.is_line_clear_in_progress());
    // Spawning is ignored (not game over) while the clear runs.
    assert!(game.spawn_piece());
    assert!(game.active_piece().is_none());
    assert!(!game.move_active_piece(Direction::Left, 1));
    assert!(!game.rotate_active_piece(true));

    // Clearing everything leaves nothing to fall; the first tick finishes.
    assert!(!game.tick_line_clear(FRAME));
    assert_eq!(game.grid().occupied_count(), 0);
    assert!(game.spawn_piece());
    assert_eq!(game.active_piece().unwrap().kind(), PieceType::T);
}

#[test]
fn test_stack_to_the_top_ends_the_game() {
    let mut game = scripted(&[PieceType::Square]);
    let mut spawned = 0;
    while game.spawn_piece() {
        spawned += 1;
        game.drop_active_piece();
        while game.tick_line_clear(FRAME) {}
        assert!(spawned < 100);
    }

    assert!(game.game_over());
    // Ten squares of height two fill the center columns.
    assert_eq!(spawned, 10);
    assert!(!game.spawn_piece());
    assert!(!game.move_active_piece(Direction::Down, 1));
    assert!(game.board_snapshot().game_over);
}

#[test]
fn test_seeded_games_are_deterministic() {
    let config = EngineConfig {
        seed: 99,
        ..EngineConfig::default()
    };
    let mut a = Game::new(config.clone());
    let mut b = Game::new(config);

    for _ in 0..20 {
        assert_eq!(a.spawn_piece(), b.spawn_piece());
        assert_eq!(a.active_piece().map(|p| p.kind()), b.active_piece().map(|p| p.kind()));
        a.drop_active_piece();
        b.drop_active_piece();
        while a.tick_line_clear(FRAME) {}
        while b.tick_line_clear(FRAME) {}
    }
    assert_eq!(a.board_snapshot(), b.board_snapshot());
}
