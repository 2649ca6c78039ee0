//! Line-clear engine - full-row detection and chunked gravity
//!
//! When a piece locks, every full row is cleared in a single pass. The rows
//! that survive are partitioned into chunks: each maximal run of rows between
//! two cleared rows (or a cleared row and a board edge) falls as one rigid
//! body. The run below the lowest cleared row never moves and stays on the
//! grid; every other chunk is lifted off the grid and falls under constant
//! acceleration until it lands on the collision line.
//!
//! Positions are measured in row units. A chunk occupies the edge interval
//! `[top, bottom)`, so a chunk covering rows 3..=5 has `top = 3.0` and
//! `bottom = 6.0`. The collision line starts at the floor (`rows`) or at the
//! top edge of the stationary chunk, and is raised to the top edge of each
//! chunk as it settles.
//!
//! Phases: `Idle -> Detecting -> Falling -> Settling -> Idle`.

use std::time::Duration;

use tracing::{debug, warn};

use crate::grid::Grid;
use crate::types::ColorToken;

/// Where the engine is in a clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineClearPhase {
    Idle,
    Detecting,
    Falling,
    Settling,
}

/// One subsquare in flight, with a fractional row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingCell {
    pub row: f32,
    pub col: i32,
    pub color: ColorToken,
}

/// A run of rows that falls as a unit
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Bottom row first, so `cells[0]` is always a bottom-most representative
    cells: Vec<FallingCell>,
    top: f32,
    bottom: f32,
    stationary: bool,
}

impl Chunk {
    /// Collect every occupied cell in rows `top_row..=bottom_row`.
    ///
    /// Cells of a falling chunk are removed from the grid; a stationary chunk
    /// leaves the grid untouched.
    fn collect(grid: &mut Grid, top_row: usize, bottom_row: usize, stationary: bool) -> Self {
        let mut cells = Vec::new();
        for row in (top_row..=bottom_row).rev() {
            for col in 0..grid.cols() {
                let (r, c) = (row as i32, col as i32);
                if let Some(Some(color)) = grid.get(r, c) {
                    cells.push(FallingCell {
                        row: row as f32,
                        col: c,
                        color,
                    });
                    if !stationary {
                        grid.clear_cell(r, c);
                    }
                }
            }
        }
        Self {
            cells,
            top: top_row as f32,
            bottom: (bottom_row + 1) as f32,
            stationary,
        }
    }

    pub fn cells(&self) -> &[FallingCell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Upper edge of the chunk
    pub fn top(&self) -> f32 {
        self.top
    }

    /// Lower edge of the chunk
    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn is_stationary(&self) -> bool {
        self.stationary
    }

    /// A subsquare from the chunk's lowest occupied row
    pub fn bottom_representative(&self) -> Option<&FallingCell> {
        self.cells.first()
    }

    fn shift(&mut self, amount: f32) {
        for cell in &mut self.cells {
            cell.row += amount;
        }
        self.top += amount;
        self.bottom += amount;
    }

    /// Snap every coordinate to the nearest whole row
    fn align(&mut self) {
        for cell in &mut self.cells {
            cell.row = cell.row.round();
        }
        self.top = self.top.round();
        self.bottom = self.bottom.round();
    }

    fn commit(&self, grid: &mut Grid) {
        if self.stationary {
            return;
        }
        for cell in &self.cells {
            let row = cell.row.round() as i32;
            if !grid.set_cell(row, cell.col, cell.color) {
                warn!(row, col = cell.col, "settled cell landed on an occupied square");
            }
        }
    }
}

/// Drives one line clear at a time
#[derive(Debug, Clone)]
pub struct LineClearEngine {
    phase: LineClearPhase,
    /// Bottom to top. Entries before `first_movable` have settled (or never
    /// moved); the rest form the movable stack.
    chunks: Vec<Chunk>,
    first_movable: usize,
    collision_line: f32,
    floor: f32,
    /// Seconds since the fall began
    elapsed: f32,
    acceleration: f32,
    cleared_rows: Vec<usize>,
}

impl LineClearEngine {
    /// `acceleration` is in rows per second squared
    pub fn new(rows: usize, acceleration: f32) -> Self {
        Self {
            phase: LineClearPhase::Idle,
            chunks: Vec::new(),
            first_movable: 0,
            collision_line: rows as f32,
            floor: rows as f32,
            elapsed: 0.0,
            acceleration,
            cleared_rows: Vec::new(),
        }
    }

    pub fn phase(&self) -> LineClearPhase {
        self.phase
    }

    pub fn in_progress(&self) -> bool {
        self.phase != LineClearPhase::Idle
    }

    pub fn collision_line(&self) -> f32 {
        self.collision_line
    }

    /// Every chunk of the current clear, stationary and falling, bottom to top
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The chunks still falling, lowest first
    pub fn movable(&self) -> &[Chunk] {
        &self.chunks[self.first_movable..]
    }

    /// Rows removed by the current (or most recent) clear, top to bottom
    pub fn cleared_rows(&self) -> &[usize] {
        &self.cleared_rows
    }

    /// Clear every full row and, if there were any, set up the fall.
    ///
    /// Returns the cleared row indices, top to bottom. With no full rows the
    /// engine stays `Idle` and the grid is untouched.
    pub fn begin(&mut self, grid: &mut Grid) -> &[usize] {
        if self.in_progress() {
            warn!(phase = ?self.phase, "line clear requested while one is running");
            return &[];
        }

        self.phase = LineClearPhase::Detecting;
        self.cleared_rows.clear();
        for row in 0..grid.rows() {
            if grid.is_row_full(row) {
                grid.clear_row(row);
                self.cleared_rows.push(row);
            }
        }

        if self.cleared_rows.is_empty() {
            self.phase = LineClearPhase::Idle;
            return &self.cleared_rows;
        }
        debug!(rows = ?self.cleared_rows, "cleared full rows");

        self.partition(grid);
        self.phase = LineClearPhase::Falling;
        &self.cleared_rows
    }

    fn partition(&mut self, grid: &mut Grid) {
        self.chunks.clear();
        self.first_movable = 0;
        self.elapsed = 0.0;
        self.collision_line = self.floor;

        // Intervals are found top to bottom; the stack wants bottom first.
        let mut falling = Vec::new();
        let mut upper = 0;
        for &deleted in &self.cleared_rows {
            if upper < deleted {
                let chunk = Chunk::collect(grid, upper, deleted - 1, false);
                if !chunk.is_empty() {
                    falling.push(chunk);
                }
            }
            upper = deleted + 1;
        }

        if upper < grid.rows() {
            let base = Chunk::collect(grid, upper, grid.rows() - 1, true);
            if !base.is_empty() {
                self.collision_line = base.top();
                self.chunks.push(base);
                self.first_movable = 1;
            }
        }

        falling.reverse();
        self.chunks.extend(falling);
        debug!(
            chunks = self.chunks.len() - self.first_movable,
            collision_line = self.collision_line,
            "partitioned falling chunks"
        );
    }

    /// Advance the fall by `delta`.
    ///
    /// Returns true while the animation is still running. On the tick that
    /// lands the last chunk, the settled layout is written back to the grid,
    /// the engine returns to `Idle`, and this returns false.
    pub fn tick(&mut self, grid: &mut Grid, delta: Duration) -> bool {
        if self.phase != LineClearPhase::Falling {
            return false;
        }

        let dt = delta.as_secs_f32();
        self.elapsed += dt;
        let velocity = self.acceleration * self.elapsed;
        self.advance(velocity * dt);

        if self.first_movable < self.chunks.len() {
            return true;
        }

        self.settle(grid);
        false
    }

    /// Move the movable stack down by `distance`, landing chunks on the
    /// collision line without ever crossing it.
    fn advance(&mut self, mut distance: f32) {
        while self.first_movable < self.chunks.len() {
            let gap = self.collision_line - self.chunks[self.first_movable].bottom();
            if gap > distance {
                self.shift_movable(distance);
                return;
            }

            let step = gap.max(0.0);
            self.shift_movable(step);
            distance -= step;

            let lowest = &mut self.chunks[self.first_movable];
            lowest.align();
            self.collision_line = lowest.top();
            self.first_movable += 1;
            debug!(collision_line = self.collision_line, "chunk settled");
        }
    }

    fn shift_movable(&mut self, amount: f32) {
        for chunk in &mut self.chunks[self.first_movable..] {
            chunk.shift(amount);
        }
    }

    fn settle(&mut self, grid: &mut Grid) {
        self.phase = LineClearPhase::Settling;
        for chunk in &self.chunks {
            chunk.commit(grid);
        }
        debug!(chunks = self.chunks.len(), "committed settled chunks");

        self.chunks.clear();
        self.first_movable = 0;
        self.collision_line = self.floor;
        self.elapsed = 0.0;
        self.phase = LineClearPhase::Idle;
    }
}
