//! Piece catalog - spawn templates and colors for the seven piece types
//!
//! Each template is four `(d_row, d_col)` offsets from the spawn anchor
//! `(0, cols / 2)`. The first offset is the pivot that rotation turns about.
//!
//! Colors are opaque tokens `1..=7` in catalog order; the renderer owns the
//! mapping to actual sprites.

use crate::types::{ColorToken, Coord, PieceType, PIECE_CELLS};

/// Offset of a single subsquare relative to the spawn anchor
pub type CellOffset = (i32, i32);

/// Four subsquare offsets, pivot first
pub type PieceShape = [CellOffset; PIECE_CELLS];

/// Catalog entry for one piece type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSpec {
    pub kind: PieceType,
    pub template: PieceShape,
    pub color: ColorToken,
}

/// Indexed by `PieceType::index()`
const CATALOG: [PieceSpec; PieceType::COUNT] = [
    PieceSpec {
        kind: PieceType::L,
        template: [(1, -1), (0, -1), (2, -1), (2, 0)],
        color: ColorToken(1),
    },
    PieceSpec {
        kind: PieceType::J,
        template: [(1, 0), (0, 0), (2, 0), (2, -1)],
        color: ColorToken(2),
    },
    PieceSpec {
        kind: PieceType::S,
        template: [(0, -1), (0, 0), (1, -1), (1, -2)],
        color: ColorToken(3),
    },
    PieceSpec {
        kind: PieceType::Z,
        template: [(0, -1), (0, -2), (1, -1), (1, 0)],
        color: ColorToken(4),
    },
    PieceSpec {
        kind: PieceType::T,
        template: [(1, 0), (0, 0), (1, -1), (1, 1)],
        color: ColorToken(5),
    },
    PieceSpec {
        kind: PieceType::Square,
        template: [(0, -1), (0, 0), (1, -1), (1, 0)],
        color: ColorToken(6),
    },
    PieceSpec {
        kind: PieceType::Line,
        template: [(1, 0), (0, 0), (2, 0), (3, 0)],
        color: ColorToken(7),
    },
];

/// Look up the catalog entry for a piece type
pub fn spec(kind: PieceType) -> &'static PieceSpec {
    &CATALOG[kind.index()]
}

/// Color token assigned to a piece type
pub fn color_of(kind: PieceType) -> ColorToken {
    spec(kind).color
}

/// Reverse lookup used by debug renderers
pub fn kind_for_color(color: ColorToken) -> Option<PieceType> {
    CATALOG.iter().find(|s| s.color == color).map(|s| s.kind)
}

/// Absolute spawn coordinates for a piece on a board `cols` wide
pub fn spawn_coords(kind: PieceType, cols: usize) -> [Coord; PIECE_CELLS] {
    let anchor = Coord::new(0, (cols / 2) as i32);
    spec(kind).template.map(|offset| anchor.offset(offset))
}
