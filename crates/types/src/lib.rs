//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond conversions, making them
//! usable in any context (core logic, rendering collaborators, tooling).
//!
//! # Board Dimensions
//!
//! The default playfield:
//!
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Cols**: 10 (indexed 0-9, left to right)
//!
//! Coordinates are `(row, col)` pairs. Row 0 is the top of the board, and a
//! piece may legally sit partly above it (negative rows) while it falls.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval used by headless drivers (~60 FPS) |
//! | `DEFAULT_FALL_ACCELERATION` | 11.875 | Chunk fall acceleration in rows/s² |
//!
//! # Examples
//!
//! ```
//! use stackfall_types::{Coord, Direction, PieceType, BOARD_COLS, BOARD_ROWS};
//!
//! // Parse a piece type (case-insensitive)
//! assert_eq!(PieceType::from_str("line"), Some(PieceType::Line));
//!
//! // Offsets follow (row, col)
//! let c = Coord::new(3, 4).offset(Direction::Down.unit_offset());
//! assert_eq!(c, Coord::new(4, 4));
//!
//! assert_eq!(BOARD_ROWS, 20);
//! assert_eq!(BOARD_COLS, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Default board height in cells (20 rows)
pub const BOARD_ROWS: u8 = 20;

/// Default board width in cells (10 columns)
pub const BOARD_COLS: u8 = 10;

/// Number of subsquares in every piece
pub const PIECE_CELLS: usize = 4;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default chunk fall acceleration in rows per second squared.
///
/// Equivalent to 285 px/s² with 24 px cells.
pub const DEFAULT_FALL_ACCELERATION: f32 = 11.875;

/// A `(row, col)` position on the grid.
///
/// Rows grow downward, columns grow to the right. Values may be negative or
/// past the far edge while a candidate position is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Translate by a `(d_row, d_col)` offset
    pub fn offset(self, (d_row, d_col): (i32, i32)) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

/// Directions a piece can be translated in.
///
/// There is no `Up`: pieces only rise as the result of a wall kick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(d_row, d_col)` for a single unit step
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_types::Direction;
    ///
    /// assert_eq!(Direction::Down.unit_offset(), (1, 0));
    /// assert_eq!(Direction::Left.unit_offset(), (0, -1));
    /// assert_eq!(Direction::Right.unit_offset(), (0, 1));
    /// ```
    pub fn unit_offset(&self) -> (i32, i32) {
        match self {
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Offset for `units` steps
    pub fn offset(&self, units: u32) -> (i32, i32) {
        let (dr, dc) = self.unit_offset();
        let units = units as i32;
        (dr * units, dc * units)
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// The seven tetromino piece types.
///
/// Declaration order is the catalog order used when mapping a random draw in
/// `[0, PieceType::COUNT)` to a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    L,
    J,
    S,
    Z,
    T,
    Square,
    Line,
}

impl PieceType {
    /// Number of piece types
    pub const COUNT: usize = 7;

    /// Every piece type, in catalog order
    pub const ALL: [PieceType; Self::COUNT] = [
        PieceType::L,
        PieceType::J,
        PieceType::S,
        PieceType::Z,
        PieceType::T,
        PieceType::Square,
        PieceType::Line,
    ];

    /// Map a catalog index to a piece type
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_types::PieceType;
    ///
    /// assert_eq!(PieceType::from_index(0), Some(PieceType::L));
    /// assert_eq!(PieceType::from_index(6), Some(PieceType::Line));
    /// assert_eq!(PieceType::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this type in the catalog
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse piece type from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_types::PieceType;
    ///
    /// assert_eq!(PieceType::from_str("l"), Some(PieceType::L));
    /// assert_eq!(PieceType::from_str("Square"), Some(PieceType::Square));
    /// assert_eq!(PieceType::from_str("o"), Some(PieceType::Square));
    /// assert_eq!(PieceType::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "l" => Some(PieceType::L),
            "j" => Some(PieceType::J),
            "s" => Some(PieceType::S),
            "z" => Some(PieceType::Z),
            "t" => Some(PieceType::T),
            "square" | "o" => Some(PieceType::Square),
            "line" | "i" => Some(PieceType::Line),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceType::L => "l",
            PieceType::J => "j",
            PieceType::S => "s",
            PieceType::Z => "z",
            PieceType::T => "t",
            PieceType::Square => "square",
            PieceType::Line => "line",
        }
    }
}

/// Opaque color/sprite token carried by occupied cells.
///
/// The engine never interprets the value; a rendering collaborator uses it to
/// look up a visual asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorToken(pub u8);

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(ColorToken)`: Occupied cell with the color of the piece that filled it
pub type Cell = Option<ColorToken>;
