//! Piece tests - shape matrices, rotation, and anchor arithmetic

use gridfall::core::piece::{base_shape, Piece};
use gridfall::types::PieceKind;

fn sorted_cells(piece: &Piece) -> Vec<(i16, i16)> {
    let mut cells: Vec<(i16, i16)> = piece.occupied_cells().into_iter().collect();
    cells.sort_unstable();
    cells
}

#[test]
fn test_four_rotations_restore_every_kind() {
    for kind in PieceKind::ALL {
        let spawned = Piece::spawn(kind);
        let mut piece = spawned;
        for _ in 0..4 {
            piece.rotate_cw();
        }
        assert_eq!(
            piece.rotated_shape(),
            spawned.rotated_shape(),
            "{kind:?} shape changed after four clockwise turns"
        );
        assert_eq!(sorted_cells(&piece), sorted_cells(&spawned));
    }
}

#[test]
fn test_ccw_then_cw_is_identity() {
    for kind in PieceKind::ALL {
        let spawned = Piece::spawn(kind);
        let mut piece = spawned;
        piece.rotate_ccw();
        piece.rotate_cw();
        assert_eq!(piece, spawned);
    }
}

#[test]
fn test_i_spawn_covers_top_row_bar() {
    let piece = Piece::spawn(PieceKind::I);
    // Anchor two rows above the grid puts the solid bar on row 0.
    assert_eq!(
        sorted_cells(&piece),
        vec![(3, 0), (4, 0), (5, 0), (6, 0)]
    );
}

#[test]
fn test_o_spawn_covers_center_square() {
    let piece = Piece::spawn(PieceKind::O);
    assert_eq!(
        sorted_cells(&piece),
        vec![(4, 0), (4, 1), (5, 0), (5, 1)]
    );
}

#[test]
fn test_t_spawn_cells() {
    let piece = Piece::spawn(PieceKind::T);
    assert_eq!(
        sorted_cells(&piece),
        vec![(3, 1), (4, 0), (4, 1), (5, 1)]
    );
}

#[test]
fn test_i_rotated_once_is_vertical() {
    let mut piece = Piece::spawn(PieceKind::I);
    piece.rotate_cw();
    // The bar lands in matrix column 1 after one clockwise turn.
    assert_eq!(
        sorted_cells(&piece),
        vec![(4, -2), (4, -1), (4, 0), (4, 1)]
    );
}

#[test]
fn test_o_rotation_never_moves_cells() {
    let spawned = Piece::spawn(PieceKind::O);
    let mut piece = spawned;
    for _ in 0..3 {
        piece.rotate_cw();
        assert_eq!(sorted_cells(&piece), sorted_cells(&spawned));
    }
}

#[test]
fn test_signed_mutators_accept_negative_amounts() {
    let spawned = Piece::spawn(PieceKind::Z);
    let mut piece = spawned;

    // A negative rise is a fall, and vice versa.
    piece.rise_by(-2);
    piece.fall_by(-2);
    assert_eq!(piece, spawned);

    piece.move_left_by(-3);
    piece.move_right_by(-3);
    assert_eq!(piece, spawned);
}

#[test]
fn test_anchor_can_go_out_of_bounds() {
    let mut piece = Piece::spawn(PieceKind::L);
    piece.move_left_by(10);
    // Validity is the board's concern; the piece just does the arithmetic.
    assert_eq!(piece.col(), -7);
    assert!(piece.occupied_cells().iter().any(|&(x, _)| x < 0));
}

#[test]
fn test_base_shapes_have_expected_sizes() {
    assert_eq!(base_shape(PieceKind::I).size(), 4);
    assert_eq!(base_shape(PieceKind::O).size(), 2);
    for kind in [
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ] {
        assert_eq!(base_shape(kind).size(), 3);
    }
}
