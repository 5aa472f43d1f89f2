//! Board tests - locking, full-row detection and compaction

use blockfall::core::{ActivePiece, Board, ShapeCatalog};
use blockfall::types::ShapeId;

fn piece(id: ShapeId, x: i16, y: i16) -> ActivePiece {
    let catalog = ShapeCatalog::standard().unwrap();
    ActivePiece::new(catalog.get(id), x, y)
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(16, 24);
    assert_eq!(board.width(), 16);
    assert_eq!(board.height(), 24);
    assert_eq!(board.cells().len(), 16 * 24);
    assert!(board.cells().iter().all(|&c| c == 0));
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(4, 6);

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(4, 0), None);
    assert_eq!(board.get(0, 6), None);
    assert!(board.is_out_of_bounds(4, 5));
    assert!(!board.is_out_of_bounds(3, 5));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new(10, 20);

    assert!(board.set(5, 10, ShapeId::T.value()));
    assert_eq!(board.get(5, 10), Some(6));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, 0));
    assert!(board.is_empty_at(5, 10));

    assert!(!board.set(-1, 0, 1));
    assert!(!board.set(10, 0, 1));
}

#[test]
fn test_row_clear_scenario() {
    let mut board = Board::new(4, 6);
    for x in 1..4 {
        board.set(x, 5, 3);
    }

    let o = piece(ShapeId::O, 0, 4);
    assert!(!o.can_move_down(&board));
    assert_eq!(board.lock_piece(&o), 4);
    assert!(board.is_row_full(5));

    let (_, anchor_y) = o.anchor();
    let rows = board.full_rows(anchor_y, o.matrix().size());
    assert_eq!(rows.as_slice(), &[5]);

    let row4_before = board.row(4).unwrap().to_vec();
    assert_eq!(row4_before, vec![4, 4, 0, 0]);
    board.shift_rows_down(&rows);

    assert_eq!(board.row(5), Some(row4_before.as_slice()));
    assert_eq!(board.row(0), Some(&[0, 0, 0, 0][..]));
}

#[test]
fn test_full_rows_scans_only_piece_span() {
    let mut board = Board::new(4, 8);
    for x in 0..4 {
        board.set(x, 1, 2);
        board.set(x, 6, 2);
    }
    // A piece spanning rows 5..8 sees only row 6
    assert_eq!(board.full_rows(5, 3).as_slice(), &[6]);
    assert_eq!(board.all_full_rows(), vec![1, 6]);
}

#[test]
fn test_shift_non_adjacent_rows() {
    let mut board = Board::from_rows(&[
        vec![0, 0, 1, 0],
        vec![2, 2, 2, 2],
        vec![0, 3, 0, 0],
        vec![4, 4, 4, 4],
        vec![5, 0, 5, 0],
    ])
    .unwrap();

    board.shift_rows_down(&[1, 3]);

    assert_eq!(
        board.to_rows(),
        vec![
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 1, 0],
            vec![0, 3, 0, 0],
            vec![5, 0, 5, 0],
        ]
    );
}

#[test]
fn test_shift_four_rows() {
    let mut board = Board::new(5, 6);
    for y in 2..6 {
        for x in 0..5 {
            board.set(x, y, 1);
        }
    }
    board.set(2, 1, 7);

    let rows = board.full_rows(2, 4);
    assert_eq!(rows.len(), 4);
    board.shift_rows_down(&rows);

    assert_eq!(board.get(2, 5), Some(7));
    assert_eq!(board.cells().iter().filter(|&&c| c != 0).count(), 1);
}

#[test]
fn test_lock_writes_shape_identity() {
    let mut board = Board::new(6, 6);
    let t = piece(ShapeId::T, 1, 3);
    board.lock_piece(&t);
    for (x, y) in t.cells() {
        assert_eq!(board.get(x, y), Some(ShapeId::T.value()));
    }
    assert_eq!(board.cells().iter().filter(|&&c| c != 0).count(), 4);
}

#[test]
fn test_clear_resets_everything() {
    let mut board = Board::new(4, 4);
    board.set(1, 1, 3);
    board.clear();
    assert!(board.cells().iter().all(|&c| c == 0));
}
