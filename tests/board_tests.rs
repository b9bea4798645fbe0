//! Board tests: bounds, collision, merge and row sweeps through the public API.

use blockfall::core::{template_for, Board, Shape};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..BOARD_WIDTH as i8 {
        assert!(board.set(x, y, Some(kind)));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.cells().len(), 200);
    assert!(board.cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_board_out_of_bounds_access() {
    let mut board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
    assert!(!board.set(BOARD_WIDTH as i8, 0, Some(PieceKind::T)));
    assert!(!board.is_occupied(0, -1));
}

#[test]
fn test_collision_with_walls_and_floor() {
    let board = Board::new();
    let o = template_for(PieceKind::O);

    assert!(!board.collides(&o, 0, 0));
    assert!(!board.collides(&o, 8, 18));
    assert!(board.collides(&o, -1, 0));
    assert!(board.collides(&o, 9, 0));
    assert!(board.collides(&o, 0, 19));
}

#[test]
fn test_blocks_above_board_only_check_walls() {
    let mut board = Board::new();
    fill_row(&mut board, 0, PieceKind::J);
    let o = template_for(PieceKind::O);

    // Entirely above row 0: no settled cell is consulted.
    assert!(!board.collides(&o, 4, -2));
    // Bottom row of the matrix reaches the filled row 0.
    assert!(board.collides(&o, 4, -1));
    // Walls still apply above the board.
    assert!(board.collides(&o, -1, -5));
}

#[test]
fn test_empty_matrix_cells_never_collide() {
    let board = Board::new();
    // Vertical I in matrix column 1: column 0 of the matrix may hang off the left wall.
    let i = template_for(PieceKind::I);
    assert!(!board.collides(&i, -1, 0));
    assert!(board.collides(&i, -2, 0));
}

#[test]
fn test_merge_writes_piece_kind() {
    let mut board = Board::new();
    board.merge(&template_for(PieceKind::S), 0, 18);

    assert_eq!(board.get(1, 18), Some(Some(PieceKind::S)));
    assert_eq!(board.get(2, 18), Some(Some(PieceKind::S)));
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::S)));
    assert_eq!(board.get(1, 19), Some(Some(PieceKind::S)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 4);
}

#[test]
fn test_merge_drops_blocks_above_board() {
    let mut board = Board::new();
    board.merge(&template_for(PieceKind::O), 4, -1);
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
    assert!(board.is_occupied(4, 0));
    assert!(board.is_occupied(5, 0));
}

#[test]
fn test_sweep_no_full_rows() {
    let mut board = Board::new();
    board.set(3, 19, Some(PieceKind::T));
    let before = board.clone();
    assert_eq!(board.sweep_completed_rows(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_sweep_non_adjacent_rows_preserves_order() {
    let mut board = Board::new();
    fill_row(&mut board, 19, PieceKind::I);
    board.set(0, 18, Some(PieceKind::L));
    fill_row(&mut board, 17, PieceKind::I);
    board.set(9, 16, Some(PieceKind::Z));

    assert_eq!(board.sweep_completed_rows(), 2);

    assert_eq!(board.get(0, 19), Some(Some(PieceKind::L)));
    assert_eq!(board.get(9, 18), Some(Some(PieceKind::Z)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
}

#[test]
fn test_sweep_four_rows() {
    let mut board = Board::new();
    for y in 16..20 {
        fill_row(&mut board, y, PieceKind::O);
    }
    board.set(4, 15, Some(PieceKind::T));

    assert_eq!(board.sweep_completed_rows(), 4);
    assert_eq!(board.get(4, 19), Some(Some(PieceKind::T)));
    assert!(!board.is_occupied(4, 15));
}

#[test]
fn test_custom_shape_collision() {
    let board = Board::new();
    let bar = Shape::from_ids([[1, 1], [0, 0]]);
    assert!(!board.collides(&bar, 8, 19));
    assert!(board.collides(&bar, 9, 19));
}
