use serde::Serialize;

use crate::catalog;
use crate::piece::ActivePiece;
use crate::types::{Cell, ColorToken, Coord, PieceType, PIECE_CELLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceType,
    pub coords: [Coord; PIECE_CELLS],
    pub color: ColorToken,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind(),
            coords: *value.coords(),
            color: value.color(),
        }
    }
}

/// Everything a renderer needs for one frame of the grid
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major, `rows * cols` entries
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub line_clear_in_progress: bool,
    pub game_over: bool,
}

impl BoardSnapshot {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            active: None,
            line_clear_in_progress: false,
            game_over: false,
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
        self.active = None;
        self.line_clear_in_progress = false;
        self.game_over = false;
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col]
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some()
    }

    /// One line per row: `.` for empty, the piece letter for cells whose
    /// color belongs to a catalog piece, `#` otherwise.
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in self.cells.chunks(self.cols.max(1)) {
            for cell in row {
                out.push(match cell {
                    None => '.',
                    Some(color) => match catalog::kind_for_color(*color) {
                        Some(PieceType::Square) => 'O',
                        Some(PieceType::Line) => 'I',
                        Some(kind) => kind
                            .as_str()
                            .to_ascii_uppercase()
                            .chars()
                            .next()
                            .unwrap_or('#'),
                        None => '#',
                    },
                });
            }
            out.push('\n');
        }
        out
    }
}
