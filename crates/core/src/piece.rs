//! Active piece controller - movement and the wall-kick rotation resolver
//!
//! The active piece owns four absolute coordinates, pivot first. Its cells are
//! always either fully written to the grid or fully absent; every move and
//! rotation clears the piece, computes a candidate as a plain value copy, and
//! then writes back either the candidate or the untouched snapshot.
//!
//! Rotation turns every subsquare 90° about the pivot and then tries exactly
//! one corrective translation:
//!
//! | Out of bounds | Piece collision | Resolution |
//! |---------------|-----------------|------------|
//! | yes | no | shift the most outstanding subsquare back to the edge; accept if nothing collides |
//! | yes | yes | reject |
//! | no | one side | shift away by the number of distinct colliding rows/columns; accept if fully in bounds and free |
//! | no | mixed sides | reject |
//! | no | no | accept |

use crate::catalog;
use crate::collision::{classify, classify_out_of_bounds, CollisionList, CollisionRecord};
use crate::grid::Grid;
use crate::types::{ColorToken, Coord, Direction, PieceType, PIECE_CELLS};

/// Absolute coordinates of a piece, pivot first
pub type PieceCoords = [Coord; PIECE_CELLS];

/// Why a rotation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationFailure {
    /// The single corrective translation still leaves the piece off the board
    /// or inside the stack.
    IllegalMove,
    /// The violations do not agree on one side (or the piece is both off the
    /// board and colliding), so no kick is well defined.
    AmbiguousKick,
}

/// Result of a rotation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationOutcome {
    /// Square pieces never change
    Unchanged,
    /// Rotated in place
    Rotated,
    /// Rotated and shifted by `(d_row, d_col)`
    Kicked((i32, i32)),
    /// Piece left at its pre-rotation position
    Rejected(RotationFailure),
}

impl RotationOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, RotationOutcome::Rejected(_))
    }
}

/// The live falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    coords: PieceCoords,
    kind: PieceType,
    color: ColorToken,
}

impl ActivePiece {
    /// Build a piece at explicit coordinates without touching any grid.
    pub fn new(kind: PieceType, coords: PieceCoords) -> Self {
        Self {
            coords,
            kind,
            color: catalog::color_of(kind),
        }
    }

    /// Spawn a piece from its catalog template, centered on the grid.
    ///
    /// Returns `None` (and writes nothing) if any spawn cell is occupied.
    pub fn spawn(kind: PieceType, grid: &mut Grid) -> Option<Self> {
        let piece = Self::new(kind, catalog::spawn_coords(kind, grid.cols()));
        piece.place(grid).then_some(piece)
    }

    pub fn coords(&self) -> &PieceCoords {
        &self.coords
    }

    pub fn pivot(&self) -> Coord {
        self.coords[0]
    }

    pub fn kind(&self) -> PieceType {
        self.kind
    }

    pub fn color(&self) -> ColorToken {
        self.color
    }

    /// Write the piece onto the grid if every subsquare is legal.
    ///
    /// Subsquares above the top edge are legal but not written. Returns false
    /// without mutating the grid when any subsquare is past the left, right or
    /// bottom edge, or lands on an occupied cell.
    pub fn place(&self, grid: &mut Grid) -> bool {
        if !is_placeable(grid, &self.coords) {
            return false;
        }
        self.write(grid);
        true
    }

    /// Remove the piece's cells from the grid
    pub fn clear_from(&self, grid: &mut Grid) {
        for c in &self.coords {
            grid.clear_cell(c.row, c.col);
        }
    }

    fn write(&self, grid: &mut Grid) {
        for c in &self.coords {
            if grid.in_bounds(c.row, c.col) {
                grid.set_cell(c.row, c.col, self.color);
            }
        }
    }

    /// Translate the piece `units` cells in `direction`, one cell at a time.
    ///
    /// Every intermediate position must be legal, so a piece never passes
    /// through the stack. On failure (or for zero units) the piece is restored
    /// exactly where it was. A failed single `Direction::Down` step means the
    /// piece has landed.
    pub fn try_move(&mut self, grid: &mut Grid, direction: Direction, units: u32) -> bool {
        if units == 0 {
            return false;
        }
        let snapshot = self.coords;
        self.clear_from(grid);

        let step = direction.unit_offset();
        let mut candidate = snapshot;
        let mut moved = true;
        for _ in 0..units {
            candidate = translate(&candidate, step);
            if !is_placeable(grid, &candidate) {
                moved = false;
                break;
            }
        }
        if moved {
            self.coords = candidate;
        }
        self.write(grid);
        moved
    }

    /// Rotate 90° about the pivot, clockwise or counter-clockwise, resolving
    /// out-of-bounds and collisions with at most one kick.
    pub fn rotate(&mut self, grid: &mut Grid, clockwise: bool) -> RotationOutcome {
        if self.kind == PieceType::Square {
            return RotationOutcome::Unchanged;
        }

        let original = self.coords;
        self.clear_from(grid);

        let rotated = rotate_about_pivot(&original, clockwise);
        let outcome = resolve_rotation(grid, &original, &rotated);
        let accepted = match outcome {
            RotationOutcome::Rotated => Some((0, 0)),
            RotationOutcome::Kicked(offset) => Some(offset),
            _ => None,
        };
        if let Some(offset) = accepted {
            self.coords = translate(&rotated, offset);
        }

        self.write(grid);
        outcome
    }
}

/// Every subsquare is inside the left/right/bottom edges and on a free cell
fn is_placeable(grid: &Grid, coords: &PieceCoords) -> bool {
    coords
        .iter()
        .all(|c| grid.in_bounds_left_right_bottom(c.row, c.col) && !grid.is_occupied_at(*c))
}

fn translate(coords: &PieceCoords, offset: (i32, i32)) -> PieceCoords {
    coords.map(|c| c.offset(offset))
}

/// Rotate every subsquare 90° about `coords[0]`.
///
/// Clockwise maps a pivot offset `(dr, dc)` to `(dc, -dr)`; counter-clockwise
/// maps it to `(-dc, dr)`. Rows grow downward, so "clockwise" is as seen on
/// screen.
pub fn rotate_about_pivot(coords: &PieceCoords, clockwise: bool) -> PieceCoords {
    let pivot = coords[0];
    coords.map(|c| {
        let (dr, dc) = (c.row - pivot.row, c.col - pivot.col);
        let (nr, nc) = if clockwise { (dc, -dr) } else { (-dc, dr) };
        Coord::new(pivot.row + nr, pivot.col + nc)
    })
}

/// Decide whether `rotated` can replace `original`, and with which kick.
///
/// The grid must not contain the piece's own cells while this runs.
pub fn resolve_rotation(
    grid: &Grid,
    original: &PieceCoords,
    rotated: &PieceCoords,
) -> RotationOutcome {
    let mut out_of_bounds = CollisionList::new();
    let mut collisions = CollisionList::new();

    for &sub in rotated {
        if let Some(side) = classify_out_of_bounds(sub, grid) {
            out_of_bounds.add(CollisionRecord::new(sub, side));
        } else if grid.is_occupied_at(sub) {
            collisions.add(CollisionRecord::new(sub, classify(sub, original)));
        }
    }

    match (!out_of_bounds.is_empty(), !collisions.is_empty()) {
        (false, false) => RotationOutcome::Rotated,
        (true, true) => RotationOutcome::Rejected(RotationFailure::AmbiguousKick),
        (true, false) => {
            let Some(offset) = out_of_bounds.out_of_bounds_kick(grid) else {
                return RotationOutcome::Rejected(RotationFailure::AmbiguousKick);
            };
            let kicked = translate(rotated, offset);
            if is_placeable(grid, &kicked) {
                RotationOutcome::Kicked(offset)
            } else {
                RotationOutcome::Rejected(RotationFailure::IllegalMove)
            }
        }
        (false, true) => {
            let Some(offset) = collisions.collision_kick() else {
                return RotationOutcome::Rejected(RotationFailure::AmbiguousKick);
            };
            let kicked = translate(rotated, offset);
            let in_bounds = kicked.iter().all(|c| grid.in_bounds(c.row, c.col));
            if in_bounds && !grid.any_occupied(&kicked) {
                RotationOutcome::Kicked(offset)
            } else {
                RotationOutcome::Rejected(RotationFailure::IllegalMove)
            }
        }
    }
}
