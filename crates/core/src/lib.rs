//! Core engine module - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block puzzle: the grid, the
//! piece catalog, the active piece with its wall-kick rotation resolver, and
//! the line-clear engine that drops the surviving stack in chunks. It has
//! **no dependencies** on rendering, input, audio or windowing, making it:
//!
//! - **Deterministic**: Same seed and same inputs produce identical games
//! - **Testable**: Every rule is reachable without a frame loop
//! - **Portable**: Runs headless, in a terminal, or behind any renderer
//!
//! # Module Structure
//!
//! - [`grid`]: Fixed-size cell matrix with bounds, occupancy and row primitives
//! - [`catalog`]: Spawn templates and color tokens for the seven piece types
//! - [`piece`]: Active piece movement and the rotation resolver
//! - [`collision`]: Side classification and kick vectors for rotations
//! - [`line_clear`]: Full-row detection and chunked gravity animation
//! - [`game`]: Session facade tying everything together
//! - [`rng`], [`timer`]: Injected randomness and time
//! - [`config`], [`snapshot`]: Configuration and render snapshots
//!
//! # Rules
//!
//! - **Rotation**: 90° about the pivot subsquare, then at most one kick;
//!   square pieces never rotate
//! - **Lock**: A failed downward move locks the piece in place
//! - **Line clear**: Full rows vanish and the stack above falls as rigid
//!   chunks under constant acceleration, landing exactly on the row below
//! - **Game over**: A new piece cannot be placed at its spawn position
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use stackfall_core::{EngineConfig, Game};
//! use stackfall_core::types::{Direction, PieceType};
//!
//! let mut game = Game::new(EngineConfig::default());
//! assert!(game.spawn_piece_of(PieceType::T));
//!
//! game.move_active_piece(Direction::Left, 2);
//! game.rotate_active_piece(true);
//! game.drop_active_piece();
//!
//! // The piece locked; run any line clear to completion, then spawn again.
//! while game.tick_line_clear(Duration::from_millis(16)) {}
//! assert!(game.spawn_piece());
//! ```

pub mod catalog;
pub mod collision;
pub mod config;
pub mod game;
pub mod grid;
pub mod line_clear;
pub mod piece;
pub mod rng;
pub mod snapshot;
pub mod timer;

pub use stackfall_types as types;

// Re-export commonly used types for convenience
pub use collision::{CollisionList, CollisionRecord, Side};
pub use config::{ConfigError, EngineConfig};
pub use game::{Game, LockEvent};
pub use grid::Grid;
pub use line_clear::{Chunk, FallingCell, LineClearEngine, LineClearPhase};
pub use piece::{ActivePiece, RotationFailure, RotationOutcome};
pub use rng::{PieceRng, ScriptedRng, SimpleRng};
pub use snapshot::{ActiveSnapshot, BoardSnapshot};
pub use timer::{ManualClock, MonotonicClock, Stopwatch, TimeSource};
