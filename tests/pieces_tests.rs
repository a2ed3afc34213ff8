//! Piece catalog tests - templates and the rotation transform

use proptest::prelude::*;
use tui_blockfall::core::pieces::{color, get_shape, occupies, template, transform_local};
use tui_blockfall::types::{PieceKind, Rotation};

const ROTATIONS: [Rotation; 4] = [Rotation::North, Rotation::East, Rotation::South, Rotation::West];

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(get_shape(PieceKind::I, Rotation::North), [(0, 2), (1, 2), (2, 2), (3, 2)]);
    assert_eq!(get_shape(PieceKind::I, Rotation::East), [(2, 0), (2, 1), (2, 2), (2, 3)]);
    assert_eq!(get_shape(PieceKind::I, Rotation::South), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(get_shape(PieceKind::I, Rotation::West), [(1, 0), (1, 1), (1, 2), (1, 3)]);
}

#[test]
fn test_o_piece_is_rotation_invariant() {
    let north = get_shape(PieceKind::O, Rotation::North);
    assert_eq!(north, [(0, 0), (1, 0), (0, 1), (1, 1)]);
    for rotation in ROTATIONS {
        assert_eq!(get_shape(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_t_piece_turns_clockwise() {
    // Nub up, right, down, left.
    assert_eq!(get_shape(PieceKind::T, Rotation::North), [(0, 1), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(get_shape(PieceKind::T, Rotation::East), [(1, 0), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(get_shape(PieceKind::T, Rotation::South), [(1, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(get_shape(PieceKind::T, Rotation::West), [(1, 0), (0, 1), (1, 1), (1, 2)]);
}

#[test]
fn test_every_rotation_has_four_cells() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            let size = kind.size();
            let count = (0..size)
                .flat_map(|y| (0..size).map(move |x| (x, y)))
                .filter(|&(x, y)| occupies(kind, x, y, rotation))
                .count();
            assert_eq!(count, 4, "{:?} {:?}", kind, rotation);
        }
    }
}

#[test]
fn test_occupies_is_false_outside_frame() {
    for kind in PieceKind::ALL {
        let size = kind.size();
        for rotation in ROTATIONS {
            assert!(!occupies(kind, -1, 0, rotation));
            assert!(!occupies(kind, 0, size, rotation));
            assert!(!occupies(kind, size, size - 1, rotation));
        }
    }
}

#[test]
fn test_transform_is_bijection() {
    for size in 2..=4 {
        for rotation in ROTATIONS {
            let mut seen = vec![false; (size * size) as usize];
            for y in 0..size {
                for x in 0..size {
                    let (tx, ty) = transform_local(x, y, rotation, size);
                    assert!((0..size).contains(&tx) && (0..size).contains(&ty));
                    let idx = (ty * size + tx) as usize;
                    assert!(!seen[idx], "size {} {:?} maps twice onto ({}, {})", size, rotation, tx, ty);
                    seen[idx] = true;
                }
            }
        }
    }
}

#[test]
fn test_catalog_colors() {
    assert_eq!(color(PieceKind::I), [0, 240, 240]);
    assert_eq!(color(PieceKind::J), [0, 0, 240]);
    assert_eq!(color(PieceKind::L), [240, 158, 0]);
    assert_eq!(color(PieceKind::O), [240, 240, 0]);
    assert_eq!(color(PieceKind::S), [0, 240, 0]);
    assert_eq!(color(PieceKind::T), [158, 0, 240]);
    assert_eq!(color(PieceKind::Z), [240, 0, 0]);
    assert_eq!(template(PieceKind::Z).size, 3);
}

// ============== Properties ==============

proptest! {
    #[test]
    fn transform_round_trips_under_inverse(
        size in 2i32..=4,
        r in 0usize..4,
        x in 0i32..4,
        y in 0i32..4,
    ) {
        prop_assume!(x < size && y < size);
        let rotation = Rotation::from_index(r);
        let inverse = Rotation::from_index(4 - r);
        let (tx, ty) = transform_local(x, y, rotation, size);
        prop_assert_eq!(transform_local(tx, ty, inverse, size), (x, y));
    }

    #[test]
    fn four_quarter_turns_are_identity(kind_idx in 0usize..7, r in 0usize..4) {
        let kind = PieceKind::ALL[kind_idx];
        let rotation = Rotation::from_index(r);
        let mut turned = rotation;
        for _ in 0..4 {
            turned = turned.rotate_cw();
        }
        prop_assert_eq!(get_shape(kind, turned), get_shape(kind, rotation));
    }
}
