//! Collision classifier - side-aware bookkeeping for the rotation resolver
//!
//! After a rotation, every rotated subsquare that is off the board or lands on
//! an occupied cell is recorded together with the side it violates:
//!
//! - out-of-bounds subsquares are classified against the board edges
//!   (`Left`, `Right`, `Bottom`; the top edge is never a violation)
//! - colliding subsquares are classified against the footprint of the piece
//!   *before* rotation: `Left` if the subsquare's column is strictly left of
//!   every original column, and so on for `Right` and `Bottom`; anything else
//!   counts as `Top`
//!
//! A [`CollisionList`] remembers whether all of its records share one side.
//! Only a unanimous list yields a kick vector.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Coord, PIECE_CELLS};

/// Which side of the reference a subsquare violates.
///
/// `None` is only reported by a [`CollisionList`] that is empty or mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    None,
    Left,
    Right,
    Top,
    Bottom,
}

/// One violating subsquare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionRecord {
    pub subsquare: Coord,
    pub side: Side,
}

impl CollisionRecord {
    pub fn new(subsquare: Coord, side: Side) -> Self {
        Self { subsquare, side }
    }
}

/// Classify a colliding subsquare relative to a reference piece footprint.
///
/// Checks run Left, Right, Bottom; the first side the subsquare is strictly
/// beyond wins. A subsquare above the piece or interleaved with it is `Top`,
/// so its kick pushes the piece down.
pub fn classify(subsquare: Coord, reference: &[Coord; PIECE_CELLS]) -> Side {
    if reference.iter().all(|r| subsquare.col < r.col) {
        Side::Left
    } else if reference.iter().all(|r| subsquare.col > r.col) {
        Side::Right
    } else if reference.iter().all(|r| subsquare.row > r.row) {
        Side::Bottom
    } else {
        Side::Top
    }
}

/// Classify a subsquare against the board edges.
///
/// Returns `None` when the subsquare is on the board or only above it. A
/// subsquare past a side wall and below the floor at once counts as the wall.
pub fn classify_out_of_bounds(subsquare: Coord, grid: &Grid) -> Option<Side> {
    if grid.out_of_bounds_left(subsquare) {
        Some(Side::Left)
    } else if grid.out_of_bounds_right(subsquare) {
        Some(Side::Right)
    } else if grid.out_of_bounds_bottom(subsquare) {
        Some(Side::Bottom)
    } else {
        None
    }
}

/// Aggregated collision records for one rotation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionList {
    records: ArrayVec<CollisionRecord, PIECE_CELLS>,
    first_side: Option<Side>,
    same_type: bool,
}

impl CollisionList {
    pub fn new() -> Self {
        Self {
            records: ArrayVec::new(),
            first_side: None,
            same_type: true,
        }
    }

    /// Record a violation. The first side seen becomes the list's side; any
    /// later mismatch clears `same_type` for good.
    pub fn add(&mut self, record: CollisionRecord) {
        match self.first_side {
            None => self.first_side = Some(record.side),
            Some(side) if side != record.side => self.same_type = false,
            Some(_) => {}
        }
        // A piece has four subsquares, so the list can never overflow.
        let _ = self.records.try_push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[CollisionRecord] {
        &self.records
    }

    pub fn same_type(&self) -> bool {
        self.same_type
    }

    /// The shared side, or `Side::None` when the list is empty or mixed
    pub fn side(&self) -> Side {
        match self.first_side {
            Some(side) if self.same_type => side,
            _ => Side::None,
        }
    }

    /// The subsquare that reaches furthest toward the list's side.
    ///
    /// `None` if the list is empty, mixed, or classified `Side::None`.
    pub fn most_outstanding_subsquare(&self) -> Option<Coord> {
        let subsquares = self.records.iter().map(|r| r.subsquare);
        match self.side() {
            Side::Left => subsquares.min_by_key(|c| c.col),
            Side::Right => subsquares.max_by_key(|c| c.col),
            Side::Bottom => subsquares.max_by_key(|c| c.row),
            Side::Top => subsquares.min_by_key(|c| c.row),
            Side::None => None,
        }
    }

    /// Number of distinct columns (for `Left`/`Right`) or rows (for
    /// `Top`/`Bottom`) among the records. Several subsquares in the same
    /// column or row count once.
    pub fn distinct_lines(&self) -> usize {
        let side = self.side();
        let mut seen: ArrayVec<i32, PIECE_CELLS> = ArrayVec::new();
        for record in &self.records {
            let line = match side {
                Side::Left | Side::Right => record.subsquare.col,
                Side::Top | Side::Bottom => record.subsquare.row,
                Side::None => return 0,
            };
            if !seen.contains(&line) {
                seen.push(line);
            }
        }
        seen.len()
    }

    /// Offset that moves the most outstanding out-of-bounds subsquare back
    /// onto the nearest legal edge.
    pub fn out_of_bounds_kick(&self, grid: &Grid) -> Option<(i32, i32)> {
        let outstanding = self.most_outstanding_subsquare()?;
        match self.side() {
            Side::Left => Some((0, -outstanding.col)),
            Side::Right => Some((0, (grid.cols() as i32 - 1) - outstanding.col)),
            Side::Bottom => Some(((grid.rows() as i32 - 1) - outstanding.row, 0)),
            Side::Top | Side::None => None,
        }
    }

    /// Offset that pushes a piece away from a single-sided collision by the
    /// number of distinct rows/columns involved.
    pub fn collision_kick(&self) -> Option<(i32, i32)> {
        if self.is_empty() {
            return None;
        }
        let amount = self.distinct_lines() as i32;
        match self.side() {
            Side::Left => Some((0, amount)),
            Side::Right => Some((0, -amount)),
            Side::Bottom => Some((-amount, 0)),
            Side::Top => Some((amount, 0)),
            Side::None => None,
        }
    }
}

impl Default for CollisionList {
    fn default() -> Self {
        Self::new()
    }
}
