//! Pieces tests - shape tables and rigid transforms

use tetrix::core::pieces::{get_shape, shapes, Tetromino, SPAWN_POSITION};
use tetrix::types::{PieceKind, Position};

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(get_shape(PieceKind::I, 0), [(-1, 0), (0, 0), (1, 0), (2, 0)]);
    assert_eq!(get_shape(PieceKind::I, 1), [(1, -1), (1, 0), (1, 1), (1, 2)]);
    assert_eq!(get_shape(PieceKind::I, 2), [(-1, 1), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(get_shape(PieceKind::I, 3), [(0, -1), (0, 0), (0, 1), (0, 2)]);
}

#[test]
fn test_o_piece_has_one_state() {
    assert_eq!(shapes(PieceKind::O).len(), 1);
    for rotation in 0..4 {
        assert_eq!(get_shape(PieceKind::O, rotation), [(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}

#[test]
fn test_t_piece_shapes() {
    assert_eq!(get_shape(PieceKind::T, 0), [(0, 0), (-1, 0), (1, 0), (0, -1)]);
    assert_eq!(get_shape(PieceKind::T, 1), [(0, 0), (0, -1), (0, 1), (1, 0)]);
    assert_eq!(get_shape(PieceKind::T, 2), [(0, 0), (-1, 0), (1, 0), (0, 1)]);
    assert_eq!(get_shape(PieceKind::T, 3), [(0, 0), (0, -1), (0, 1), (-1, 0)]);
}

#[test]
fn test_s_piece_shapes() {
    assert_eq!(get_shape(PieceKind::S, 0), [(0, 0), (1, 0), (0, 1), (-1, 1)]);
    assert_eq!(get_shape(PieceKind::S, 1), [(0, 0), (0, -1), (1, 0), (1, 1)]);
    assert_eq!(get_shape(PieceKind::S, 2), [(0, 0), (1, 0), (0, 1), (-1, 1)]);
    assert_eq!(get_shape(PieceKind::S, 3), [(0, 0), (0, -1), (1, 0), (1, 1)]);
}

#[test]
fn test_z_piece_shapes() {
    assert_eq!(get_shape(PieceKind::Z, 0), [(0, 0), (-1, 0), (0, 1), (1, 1)]);
    assert_eq!(get_shape(PieceKind::Z, 1), [(0, 0), (1, -1), (1, 0), (0, 1)]);
    assert_eq!(get_shape(PieceKind::Z, 2), [(0, 0), (-1, 0), (0, 1), (1, 1)]);
    assert_eq!(get_shape(PieceKind::Z, 3), [(0, 0), (1, -1), (1, 0), (0, 1)]);
}

#[test]
fn test_j_piece_shapes() {
    assert_eq!(get_shape(PieceKind::J, 0), [(0, 0), (-1, 0), (1, 0), (-1, -1)]);
    assert_eq!(get_shape(PieceKind::J, 1), [(0, 0), (0, -1), (0, 1), (1, -1)]);
    assert_eq!(get_shape(PieceKind::J, 2), [(0, 0), (-1, 0), (1, 0), (1, 1)]);
    assert_eq!(get_shape(PieceKind::J, 3), [(0, 0), (0, -1), (0, 1), (-1, 1)]);
}

#[test]
fn test_l_piece_shapes() {
    assert_eq!(get_shape(PieceKind::L, 0), [(0, 0), (-1, 0), (1, 0), (1, -1)]);
    assert_eq!(get_shape(PieceKind::L, 1), [(0, 0), (0, -1), (0, 1), (1, 1)]);
    assert_eq!(get_shape(PieceKind::L, 2), [(0, 0), (-1, 0), (1, 0), (-1, 1)]);
    assert_eq!(get_shape(PieceKind::L, 3), [(0, 0), (0, -1), (0, 1), (-1, -1)]);
}

#[test]
fn test_s_and_z_repeat_after_two_states() {
    for kind in [PieceKind::S, PieceKind::Z] {
        assert_eq!(get_shape(kind, 0), get_shape(kind, 2));
        assert_eq!(get_shape(kind, 1), get_shape(kind, 3));
        assert_ne!(get_shape(kind, 0), get_shape(kind, 1));
    }
}

#[test]
fn test_j_and_l_are_mirrors_at_spawn() {
    let j = get_shape(PieceKind::J, 0);
    let l = get_shape(PieceKind::L, 0);
    let mirrored: Vec<_> = j.iter().map(|&(x, y)| (-x, y)).collect();
    for block in l {
        assert!(mirrored.contains(&block));
    }
}

#[test]
fn test_every_state_has_four_blocks_within_reach() {
    for kind in PieceKind::ALL {
        for shape in shapes(kind) {
            for &(dx, dy) in shape {
                assert!((-1..=2).contains(&dx), "{:?} offset {}", kind, dx);
                assert!((-1..=2).contains(&dy), "{:?} offset {}", kind, dy);
            }
        }
    }
}

// ============== Transform Tests ==============

#[test]
fn test_spawn_position() {
    assert_eq!(SPAWN_POSITION, Position::new(4, 0));
    for kind in PieceKind::ALL {
        let piece = Tetromino::new(kind);
        assert_eq!(piece.position(), SPAWN_POSITION);
        assert_eq!(piece.rotation(), 0);
    }
}

#[test]
fn test_four_rotations_return_to_start() {
    for kind in PieceKind::ALL {
        let start = Tetromino::at(kind, Position::new(5, 5), 0);
        let mut piece = start;
        for _ in 0..4 {
            piece = piece.rotated(true);
        }
        assert_eq!(piece, start);
    }
}

#[test]
fn test_clockwise_then_counter_clockwise_is_identity() {
    let piece = Tetromino::at(PieceKind::L, Position::new(3, 7), 2);
    assert_eq!(piece.rotated(true).rotated(false), piece);
}

#[test]
fn test_moved_translates_every_block() {
    let piece = Tetromino::new(PieceKind::S);
    let moved = piece.moved(2, 3);
    for (a, b) in piece.absolute_blocks().iter().zip(moved.absolute_blocks()) {
        assert_eq!(b, a.translated(2, 3));
    }
    // Transforms return copies
    assert_eq!(piece.position(), SPAWN_POSITION);
}

#[test]
fn test_absolute_blocks_follow_rotation() {
    let piece = Tetromino::at(PieceKind::I, Position::new(4, 5), 1);
    assert_eq!(
        piece.absolute_blocks(),
        [
            Position::new(5, 4),
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(5, 7)
        ]
    );
    assert_eq!(piece.blocks()[0], Position::new(1, -1));
}
