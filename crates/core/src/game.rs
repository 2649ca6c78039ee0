//! Game module - one play session over a shared grid
//!
//! Ties the grid, active piece, line-clear engine and piece RNG together and
//! exposes the surface a frame pump drives:
//!
//! - [`Game::spawn_piece`] after start and after every lock/clear
//! - [`Game::move_active_piece`], [`Game::rotate_active_piece`] and
//!   [`Game::drop_active_piece`] for input
//! - [`Game::tick_line_clear`] every frame while
//!   [`Game::is_line_clear_in_progress`] is true
//! - [`Game::board_snapshot`] for rendering
//!
//! A downward move that fails locks the piece. Full rows are detected at once;
//! if there are none the caller can spawn immediately, otherwise it ticks the
//! clear until `tick_line_clear` returns false and then spawns.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{ConfigError, EngineConfig};
use crate::grid::Grid;
use crate::line_clear::{Chunk, LineClearEngine, LineClearPhase};
use crate::piece::{ActivePiece, RotationFailure, RotationOutcome};
use crate::rng::{PieceRng, SimpleRng};
use crate::snapshot::BoardSnapshot;
use crate::types::{Direction, PieceType};

/// Emitted each time a piece locks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub piece_type: PieceType,
    /// Rows cleared by this lock, top to bottom
    pub cleared_rows: Vec<usize>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Game<R: PieceRng = SimpleRng> {
    grid: Grid,
    active: Option<ActivePiece>,
    line_clear: LineClearEngine,
    rng: R,
    config: EngineConfig,
    /// Monotonic id for spawned pieces (increments only on successful spawn)
    pieces_spawned: u32,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
    game_over: bool,
}

impl Game<SimpleRng> {
    /// Create a session seeded from `config.seed`.
    ///
    /// The config is assumed valid; use [`Game::try_new`] for untrusted input.
    pub fn new(config: EngineConfig) -> Self {
        let rng = SimpleRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    pub fn try_new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }
}

impl<R: PieceRng> Game<R> {
    /// Create a session that draws pieces from `rng`
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        Self {
            grid: Grid::new(config.rows, config.cols),
            active: None,
            line_clear: LineClearEngine::new(config.rows, config.fall_acceleration),
            rng,
            config,
            pieces_spawned: 0,
            last_event: None,
            game_over: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for setting up positions. Do not call while a piece
    /// is live or a clear is running.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn line_clear_phase(&self) -> LineClearPhase {
        self.line_clear.phase()
    }

    /// Chunks of the running clear (empty when idle)
    pub fn falling_chunks(&self) -> &[Chunk] {
        self.line_clear.chunks()
    }

    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Spawn a random piece. Returns false on game over (spawn cells
    /// occupied).
    pub fn spawn_piece(&mut self) -> bool {
        if !self.can_spawn() {
            return !self.game_over;
        }
        let kind = self.rng.next_piece();
        self.spawn(kind)
    }

    /// Spawn a specific piece type, bypassing the RNG
    pub fn spawn_piece_of(&mut self, kind: PieceType) -> bool {
        if !self.can_spawn() {
            return !self.game_over;
        }
        self.spawn(kind)
    }

    fn can_spawn(&self) -> bool {
        if self.game_over {
            return false;
        }
        if self.line_clear.in_progress() {
            warn!("spawn requested while a line clear is running");
            return false;
        }
        if self.active.is_some() {
            warn!("spawn requested while a piece is still active");
            return false;
        }
        true
    }

    fn spawn(&mut self, kind: PieceType) -> bool {
        match ActivePiece::spawn(kind, &mut self.grid) {
            Some(piece) => {
                self.active = Some(piece);
                self.pieces_spawned += 1;
                debug!(?kind, id = self.pieces_spawned, "spawned piece");
                true
            }
            None => {
                self.game_over = true;
                info!(?kind, pieces = self.pieces_spawned, "spawn blocked, game over");
                false
            }
        }
    }

    /// Move the active piece.
    ///
    /// Downward moves advance one row at a time; if a step is blocked the
    /// piece locks where it landed and this returns false. Sideways moves
    /// either cover the full distance or leave the piece untouched.
    pub fn move_active_piece(&mut self, direction: Direction, units: u32) -> bool {
        if self.line_clear.in_progress() || units == 0 {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if direction != Direction::Down {
            return piece.try_move(&mut self.grid, direction, units);
        }

        let mut landed = false;
        for _ in 0..units {
            if !piece.try_move(&mut self.grid, Direction::Down, 1) {
                landed = true;
                break;
            }
        }
        if landed {
            self.lock_active_piece();
        }
        !landed
    }

    pub fn rotate_active_piece(&mut self, clockwise: bool) -> bool {
        self.rotate_active_piece_detailed(clockwise).is_success()
    }

    /// Rotate and report how the resolver decided
    pub fn rotate_active_piece_detailed(&mut self, clockwise: bool) -> RotationOutcome {
        if self.line_clear.in_progress() {
            return RotationOutcome::Rejected(RotationFailure::IllegalMove);
        }
        match self.active.as_mut() {
            Some(piece) => piece.rotate(&mut self.grid, clockwise),
            None => RotationOutcome::Rejected(RotationFailure::IllegalMove),
        }
    }

    /// Move down until blocked, then lock. Returns rows travelled.
    pub fn drop_active_piece(&mut self) -> u32 {
        let mut rows = 0;
        while self.move_active_piece(Direction::Down, 1) {
            rows += 1;
        }
        rows
    }

    fn lock_active_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        let cleared_rows = self.line_clear.begin(&mut self.grid).to_vec();
        debug!(kind = ?piece.kind(), cleared = cleared_rows.len(), "piece locked");
        self.last_event = Some(LockEvent {
            piece_type: piece.kind(),
            cleared_rows,
        });
    }

    pub fn is_line_clear_in_progress(&self) -> bool {
        self.line_clear.in_progress()
    }

    /// Advance the line-clear animation. Returns false once it has finished
    /// (or if none was running); the caller should then spawn.
    pub fn tick_line_clear(&mut self, delta: Duration) -> bool {
        self.line_clear.tick(&mut self.grid, delta)
    }

    pub fn board_snapshot(&self) -> BoardSnapshot {
        let mut out = BoardSnapshot::new(self.grid.rows(), self.grid.cols());
        self.snapshot_into(&mut out);
        out
    }

    /// Fill an existing snapshot, reusing its allocation when the dimensions
    /// match.
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.rows = self.grid.rows();
        out.cols = self.grid.cols();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.active.map(Into::into);
        out.line_clear_in_progress = self.line_clear.in_progress();
        out.game_over = self.game_over;
    }
}

impl Default for Game<SimpleRng> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use crate::types::ColorToken;

    fn game_with(sequence: &[PieceType]) -> Game<ScriptedRng> {
        Game::with_rng(EngineConfig::default(), ScriptedRng::new(sequence.to_vec()))
    }

    #[test]
    fn test_new_game_has_no_piece() {
        let game = Game::default();
        assert!(game.active_piece().is_none());
        assert!(!game.game_over());
        assert!(!game.is_line_clear_in_progress());
        assert_eq!(game.grid().occupied_count(), 0);
    }

    #[test]
    fn test_spawn_uses_rng() {
        let mut game = game_with(&[PieceType::Z]);
        assert!(game.spawn_piece());
        assert_eq!(game.active_piece().map(|p| p.kind()), Some(PieceType::Z));
        assert_eq!(game.pieces_spawned(), 1);
    }

    #[test]
    fn test_spawn_while_active_is_ignored() {
        let mut game = game_with(&[PieceType::T, PieceType::Line]);
        assert!(game.spawn_piece());
        assert!(game.spawn_piece());
        assert_eq!(game.active_piece().map(|p| p.kind()), Some(PieceType::T));
        assert_eq!(game.grid().occupied_count(), 4);
    }

    #[test]
    fn test_drop_locks_and_records_event() {
        let mut game = game_with(&[PieceType::Line]);
        game.spawn_piece();
        // Line spawns in rows 0..=3 and lands in rows 16..=19.
        assert_eq!(game.drop_active_piece(), 16);
        assert!(game.active_piece().is_none());
        let event = game.take_last_event().unwrap();
        assert_eq!(event.piece_type, PieceType::Line);
        assert!(event.cleared_rows.is_empty());
        assert!(game.take_last_event().is_none());
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut game = game_with(&[PieceType::Square]);
        game.grid_mut().set_cell(0, 5, ColorToken(9));
        assert!(!game.spawn_piece());
        assert!(game.game_over());
        assert!(!game.spawn_piece());
        assert!(!game.move_active_piece(Direction::Left, 1));
    }

    #[test]
    fn test_input_ignored_during_line_clear() {
        let mut game = game_with(&[PieceType::Line, PieceType::T]);
        for col in 0..9 {
            game.grid_mut().set_cell(19, col, ColorToken(8));
        }
        game.grid_mut().set_cell(10, 0, ColorToken(8));
        game.spawn_piece();
        assert!(game.move_active_piece(Direction::Right, 4));
        game.drop_active_piece();
        assert!(game.is_line_clear_in_progress());
        assert!(!game.move_active_piece(Direction::Left, 1));
        assert!(!game.rotate_active_piece(true));
        assert!(game.spawn_piece());
        assert!(game.active_piece().is_none());
    }

    #[test]
    fn test_snapshot_into_matches_board_snapshot() {
        let mut game = game_with(&[PieceType::J]);
        game.spawn_piece();
        let mut reused = BoardSnapshot::new(1, 1);
        game.snapshot_into(&mut reused);
        assert_eq!(reused, game.board_snapshot());
        assert_eq!(reused.active.map(|a| a.kind), Some(PieceType::J));
    }

    #[test]
    fn test_long_down_move_lands_on_obstacle() {
        let mut game = game_with(&[PieceType::T]);
        game.grid_mut().set_cell(10, 5, ColorToken(9));
        assert!(game.spawn_piece());

        // The stack is reached after eight rows; the piece locks there, not
        // at its spawn position.
        assert!(!game.move_active_piece(Direction::Down, 10));
        assert!(game.active_piece().is_none());
        assert_eq!(game.take_last_event().map(|e| e.piece_type), Some(PieceType::T));
        for (row, col) in [(8, 5), (9, 4), (9, 5), (9, 6)] {
            assert!(game.grid().is_occupied(row, col), "({row},{col})");
        }
        assert!(!game.grid().is_occupied(0, 5));
    }

    #[test]
    fn test_long_down_move_stops_above_stack() {
        let mut game = game_with(&[PieceType::T]);
        game.grid_mut().set_cell(5, 5, ColorToken(9));
        assert!(game.spawn_piece());

        assert!(!game.move_active_piece(Direction::Down, 12));
        assert!(game.active_piece().is_none());
        assert!(game.grid().is_occupied(3, 5));
        assert!(game.grid().is_occupied(4, 4));
        assert!(!game.grid().is_occupied(13, 5));
        assert_eq!(game.grid().occupied_count(), 5);
    }

    #[test]
    fn test_down_move_in_open_space_keeps_piece_live() {
        let mut game = game_with(&[PieceType::T]);
        assert!(game.spawn_piece());
        assert!(game.move_active_piece(Direction::Down, 10));
        assert_eq!(game.active_piece().map(|p| p.pivot().row), Some(11));
        assert!(!game.move_active_piece(Direction::Down, 0));
        assert!(game.active_piece().is_some());
        assert!(game.take_last_event().is_none());
    }

    #[test]
    fn test_lock_above_top_drops_hidden_cells() {
        let mut game = game_with(&[PieceType::Line]);
        assert!(game.spawn_piece());
        // Two clockwise turns point the line up to rows -1..=2.
        assert!(game.rotate_active_piece(true));
        assert!(game.rotate_active_piece(true));
        let top = game.active_piece().map(|p| p.coords().iter().map(|c| c.row).min());
        assert_eq!(top, Some(Some(-1)));
        assert_eq!(game.grid().occupied_count(), 3);

        game.grid_mut().set_cell(3, 5, ColorToken(9));
        assert!(!game.move_active_piece(Direction::Down, 1));

        // Only the three visible cells are kept.
        let event = game.take_last_event().unwrap();
        assert_eq!(event.piece_type, PieceType::Line);
        assert!(event.cleared_rows.is_empty());
        assert_eq!(game.grid().occupied_count(), 4);
        assert!(!game.game_over());

        // The next spawn overlaps the locked cells and ends the game.
        assert!(!game.spawn_piece());
        assert!(game.game_over());
    }
}
