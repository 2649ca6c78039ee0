use serde::Deserialize;
use serde_json::Value;

use stackfall::core::{EngineConfig, Game, ScriptedRng};
use stackfall::types::{Coord, Direction, PieceType};

#[test]
fn test_board_snapshot_serializes_to_json() {
    let mut game = Game::with_rng(EngineConfig::default(), ScriptedRng::new(vec![PieceType::T]));
    assert!(game.spawn_piece());

    let snapshot = game.board_snapshot();
    let json: Value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["rows"], 20);
    assert_eq!(json["cols"], 10);
    assert_eq!(json["cells"].as_array().unwrap().len(), 200);
    assert_eq!(json["line_clear_in_progress"], false);
    assert_eq!(json["game_over"], false);
    assert_eq!(json["active"]["kind"], "T");
    assert_eq!(json["active"]["coords"][0], serde_json::json!({"row": 1, "col": 5}));

    // Occupied cells carry their color token, empty cells are null.
    assert_eq!(json["cells"][5], 5);
    assert!(json["cells"][0].is_null());
}

/// What a JSON consumer of a snapshot relies on
#[derive(Debug, Deserialize)]
struct SnapshotView {
    rows: usize,
    cols: usize,
    cells: Vec<Option<u8>>,
    active: Option<ActiveView>,
    line_clear_in_progress: bool,
    game_over: bool,
}

#[derive(Debug, Deserialize)]
struct ActiveView {
    kind: PieceType,
    coords: Vec<Coord>,
    color: u8,
}

#[test]
fn test_board_snapshot_reads_back_as_plain_data() {
    let mut game = Game::with_rng(EngineConfig::default(), ScriptedRng::new(vec![PieceType::S]));
    assert!(game.spawn_piece());

    let json = serde_json::to_string(&game.board_snapshot()).unwrap();
    let view: SnapshotView = serde_json::from_str(&json).unwrap();

    assert_eq!((view.rows, view.cols), (20, 10));
    assert_eq!(view.cells.len(), view.rows * view.cols);
    assert_eq!(view.cells.iter().filter(|c| c.is_some()).count(), 4);
    assert!(!view.line_clear_in_progress);
    assert!(!view.game_over);

    let active = view.active.unwrap();
    assert_eq!(active.kind, PieceType::S);
    assert_eq!(active.coords.len(), 4);
    for coord in &active.coords {
        let index = coord.row as usize * view.cols + coord.col as usize;
        assert_eq!(view.cells[index], Some(active.color));
    }
}

#[test]
fn test_render_text_marks_active_piece() {
    let mut game = Game::with_rng(EngineConfig::default(), ScriptedRng::new(vec![PieceType::Line]));
    assert!(game.spawn_piece());
    assert!(game.move_active_piece(Direction::Left, 5));

    let text = game.board_snapshot().render_text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 20);
    for line in &lines[..4] {
        assert_eq!(*line, "I.........");
    }
    assert_eq!(lines[4], "..........");
}
