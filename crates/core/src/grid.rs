//! Grid module - the shared playfield
//!
//! The grid is a `rows x cols` matrix where each cell is either empty or holds
//! the color token of the piece that filled it. Storage is a flat row-major
//! vector for cache locality; dimensions are fixed at construction.
//!
//! Coordinates are `(row, col)` with row 0 at the top. Queries outside the
//! grid never panic: they report "not occupied" so that a piece hanging above
//! the top edge is not mistaken for a collision.
//!
//! The grid is the only component that mutates cell state. `set_cell` refuses
//! to overwrite an occupied cell, which is how a spawn on top of a filled stack
//! is detected.

use crate::types::{Cell, ColorToken, Coord};

/// The playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.in_bounds(row, col) {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check if (row, col) lies on the grid
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.cols
    }

    /// Bounds check that ignores the top edge.
    ///
    /// A falling piece may protrude above row 0; only the left, right and
    /// bottom edges are hard limits for movement.
    pub fn in_bounds_left_right_bottom(&self, row: i32, col: i32) -> bool {
        col >= 0 && (col as usize) < self.cols && (row < 0 || (row as usize) < self.rows)
    }

    pub fn out_of_bounds_left(&self, coord: Coord) -> bool {
        coord.col < 0
    }

    pub fn out_of_bounds_right(&self, coord: Coord) -> bool {
        coord.col >= self.cols as i32
    }

    pub fn out_of_bounds_bottom(&self, coord: Coord) -> bool {
        coord.row >= self.rows as i32
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Check if (row, col) is occupied. Out of bounds is never occupied.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    pub fn is_occupied_at(&self, coord: Coord) -> bool {
        self.is_occupied(coord.row, coord.col)
    }

    /// True if any of the coordinates is occupied
    pub fn any_occupied(&self, coords: &[Coord]) -> bool {
        coords.iter().any(|&c| self.is_occupied_at(c))
    }

    /// Occupy (row, col) with `color`.
    ///
    /// Returns false without mutating anything if the cell is out of bounds or
    /// already occupied.
    pub fn set_cell(&mut self, row: i32, col: i32, color: ColorToken) -> bool {
        match self.index(row, col) {
            Some(idx) if self.cells[idx].is_none() => {
                self.cells[idx] = Some(color);
                true
            }
            _ => false,
        }
    }

    /// Empty (row, col). Out of bounds is a no-op.
    pub fn clear_cell(&mut self, row: i32, col: i32) {
        if let Some(idx) = self.index(row, col) {
            self.cells[idx] = None;
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.rows {
            return false;
        }
        self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Clear every cell in a row. Rows above are left where they are; gravity
    /// is the line-clear engine's job.
    pub fn clear_row(&mut self, row: usize) {
        if row >= self.rows {
            return;
        }
        let start = row * self.cols;
        for cell in &mut self.cells[start..start + self.cols] {
            *cell = None;
        }
    }

    /// Occupy every empty cell in a row with `color`.
    /// Returns the number of cells written.
    pub fn fill_row(&mut self, row: usize, color: ColorToken) -> usize {
        if row >= self.rows {
            return 0;
        }
        let start = row * self.cols;
        let mut written = 0;
        for cell in &mut self.cells[start..start + self.cols] {
            if cell.is_none() {
                *cell = Some(color);
                written += 1;
            }
        }
        written
    }

    /// Indices of every full row, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.rows).filter(|&r| self.is_row_full(r)).collect()
    }

    /// Slice of one row's cells
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells on the grid
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}
