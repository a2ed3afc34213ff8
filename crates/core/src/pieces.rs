//! Pieces module - piece templates and the rotation transform
//!
//! Every kind is a square boolean template (side 2, 3 or 4) stored top row
//! first. Local template coordinates put `y = 0` on the bottom stored row, the
//! same orientation as the field.
//!
//! Rotations do not use per-rotation shape tables. A query coordinate in the
//! piece's local frame is mapped through one of four 2x2 integer matrices
//! around the frame center and the template is probed at the result. Collision
//! checks and the field's read path both go through [`occupies`], so they can
//! never disagree.

use crate::types::{PieceKind, Rotation};

/// Offset of a single occupied cell relative to the piece anchor (bottom-left).
pub type CellOffset = (i32, i32);

/// Shape of a piece - the 4 occupied cell offsets, bottom row first.
pub type PieceShape = [CellOffset; 4];

/// Static description of one piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceTemplate {
    pub kind: PieceKind,
    pub size: i32,
    /// `size * size` flags, top row first.
    pub rows: &'static [u8],
    /// Display color (RGB).
    pub color: [u8; 3],
}

#[rustfmt::skip]
const TEMPLATES: [PieceTemplate; 7] = [
    PieceTemplate {
        kind: PieceKind::I,
        size: 4,
        rows: &[
            0, 0, 0, 0,
            1, 1, 1, 1,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ],
        color: [0, 240, 240],
    },
    PieceTemplate {
        kind: PieceKind::J,
        size: 3,
        rows: &[
            1, 0, 0,
            1, 1, 1,
            0, 0, 0,
        ],
        color: [0, 0, 240],
    },
    PieceTemplate {
        kind: PieceKind::L,
        size: 3,
        rows: &[
            0, 0, 1,
            1, 1, 1,
            0, 0, 0,
        ],
        color: [240, 158, 0],
    },
    PieceTemplate {
        kind: PieceKind::O,
        size: 2,
        rows: &[
            1, 1,
            1, 1,
        ],
        color: [240, 240, 0],
    },
    PieceTemplate {
        kind: PieceKind::S,
        size: 3,
        rows: &[
            0, 1, 1,
            1, 1, 0,
            0, 0, 0,
        ],
        color: [0, 240, 0],
    },
    PieceTemplate {
        kind: PieceKind::T,
        size: 3,
        rows: &[
            0, 1, 0,
            1, 1, 1,
            0, 0, 0,
        ],
        color: [158, 0, 240],
    },
    PieceTemplate {
        kind: PieceKind::Z,
        size: 3,
        rows: &[
            1, 1, 0,
            0, 1, 1,
            0, 0, 0,
        ],
        color: [240, 0, 0],
    },
];

/// Rotation matrices `[m00, m01, m10, m11]`, indexed by [`Rotation::index`].
#[rustfmt::skip]
pub const ROTATIONS: [[i32; 4]; 4] = [
    [ 1,  0,  0,  1], // 0°
    [ 0, -1,  1,  0], // 90°
    [-1,  0,  0, -1], // 180°
    [ 0,  1, -1,  0], // 270°
];

/// Catalog entry for `kind`.
pub fn template(kind: PieceKind) -> &'static PieceTemplate {
    &TEMPLATES[kind.index()]
}

/// Display color of `kind`.
pub fn color(kind: PieceKind) -> [u8; 3] {
    template(kind).color
}

/// Map `(x, y)` through `rotation` around the center of a `size x size` frame.
///
/// The center `(size - 1) / 2` is a half-integer for even sizes, so the math
/// runs on doubled coordinates and stays exact.
pub fn transform_local(x: i32, y: i32, rotation: Rotation, size: i32) -> (i32, i32) {
    let [m00, m01, m10, m11] = ROTATIONS[rotation.index()];
    let c2 = size - 1;
    let dx = 2 * x - c2;
    let dy = 2 * y - c2;
    let x2 = m00 * dx + m01 * dy + c2;
    let y2 = m10 * dx + m11 * dy + c2;
    (x2 / 2, y2 / 2)
}

/// Unrotated template flag at local `(x, y)`; false outside the frame.
pub fn template_bit(kind: PieceKind, x: i32, y: i32) -> bool {
    let t = template(kind);
    if x < 0 || y < 0 || x >= t.size || y >= t.size {
        return false;
    }
    t.rows[(x + (t.size - 1 - y) * t.size) as usize] != 0
}

/// Whether local `(x, y)` is occupied by `kind` in `rotation`.
pub fn occupies(kind: PieceKind, x: i32, y: i32, rotation: Rotation) -> bool {
    let size = kind.size();
    if x < 0 || y < 0 || x >= size || y >= size {
        return false;
    }
    let (tx, ty) = transform_local(x, y, rotation, size);
    template_bit(kind, tx, ty)
}

/// Occupied local cells of `kind` in `rotation`, bottom row first, left to right.
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let size = kind.size();
    let mut shape = [(0, 0); 4];
    let mut n = 0usize;
    for y in 0..size {
        for x in 0..size {
            if n < shape.len() && occupies(kind, x, y, rotation) {
                shape[n] = (x, y);
                n += 1;
            }
        }
    }
    shape
}
