//! Active piece - the one falling piece and its movement rules
//!
//! The piece is a mutable copy of its shape's matrix plus an anchor: the board
//! cell of the matrix's top-left corner. The anchor is signed because a matrix
//! whose left columns are empty may hang past the left edge while all of its
//! occupied cells are still on the board.
//!
//! Collision for translations is decided on border cells only. For every matrix
//! row the leftmost (or rightmost) occupied cell is the one that would bump into
//! something; for every column the lowest occupied cell is the one that would
//! land. Empty rows and columns have no border cell and so never block.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::shapes::{Matrix, ShapeDef, MAX_SHAPE_SIZE};
use crate::types::{RotationPolicy, ShapeId};

/// Board coordinate `(x, y)` of a single cell
pub type CellPos = (i16, i16);

/// Occupied cells of a piece, in board coordinates
pub type PieceCells = ArrayVec<CellPos, { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// Border cells along one edge, at most one per matrix row or column
pub type Border = ArrayVec<CellPos, MAX_SHAPE_SIZE>;

/// Result of a rotation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    /// Matrix replaced (and anchor possibly clamped)
    Rotated,
    /// Symmetric shape; nothing to do, reported as success
    Unchanged,
    /// Rejected because the result would overlap locked cells
    Blocked,
}

impl RotateOutcome {
    pub fn is_success(self) -> bool {
        !matches!(self, RotateOutcome::Blocked)
    }
}

/// The currently falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    shape: ShapeId,
    symmetric: bool,
    matrix: Matrix,
    x: i16,
    y: i16,
}

impl ActivePiece {
    /// New piece in spawn orientation with its matrix corner at `(x, y)`
    pub fn new(def: &ShapeDef, x: i16, y: i16) -> Self {
        Self {
            shape: def.id(),
            symmetric: def.is_symmetric(),
            matrix: def.matrix(),
            x,
            y,
        }
    }

    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn anchor(&self) -> CellPos {
        (self.x, self.y)
    }

    /// Occupied cells in board coordinates
    pub fn cells(&self) -> PieceCells {
        self.matrix
            .occupied()
            .map(|(r, c)| (self.x + c as i16, self.y + r as i16))
            .collect()
    }

    /// Every occupied cell is on the board
    pub fn in_bounds(&self, board: &Board) -> bool {
        self.cells()
            .iter()
            .all(|&(x, y)| !board.is_out_of_bounds(x, y))
    }

    /// Every occupied cell is on the board and over an empty cell
    pub fn fits(&self, board: &Board) -> bool {
        self.cells().iter().all(|&(x, y)| board.is_empty_at(x, y))
    }

    /// Leftmost occupied cell of each non-empty row
    pub fn left_border(&self) -> Border {
        (0..self.matrix.size())
            .filter_map(|r| {
                self.matrix
                    .row_extent(r)
                    .map(|(first, _)| (self.x + first as i16, self.y + r as i16))
            })
            .collect()
    }

    /// Rightmost occupied cell of each non-empty row
    pub fn right_border(&self) -> Border {
        (0..self.matrix.size())
            .filter_map(|r| {
                self.matrix
                    .row_extent(r)
                    .map(|(_, last)| (self.x + last as i16, self.y + r as i16))
            })
            .collect()
    }

    /// Lowest occupied cell of each non-empty column
    pub fn bottom_border(&self) -> Border {
        (0..self.matrix.size())
            .filter_map(|c| {
                self.matrix
                    .column_bottom(c)
                    .map(|bottom| (self.x + c as i16, self.y + bottom as i16))
            })
            .collect()
    }

    pub fn can_move_left(&self, board: &Board) -> bool {
        self.left_border()
            .iter()
            .all(|&(x, y)| x > 0 && !board.is_occupied(x - 1, y))
    }

    pub fn can_move_right(&self, board: &Board) -> bool {
        let last_col = board.width() as i16 - 1;
        self.right_border()
            .iter()
            .all(|&(x, y)| x < last_col && !board.is_occupied(x + 1, y))
    }

    pub fn can_move_down(&self, board: &Board) -> bool {
        let last_row = board.height() as i16 - 1;
        self.bottom_border()
            .iter()
            .all(|&(x, y)| y < last_row && !board.is_occupied(x, y + 1))
    }

    /// Shift one cell left; false (and no change) when blocked
    pub fn move_left(&mut self, board: &Board) -> bool {
        if !self.can_move_left(board) {
            return false;
        }
        self.x -= 1;
        true
    }

    /// Shift one cell right; false (and no change) when blocked
    pub fn move_right(&mut self, board: &Board) -> bool {
        if !self.can_move_right(board) {
            return false;
        }
        self.x += 1;
        true
    }

    /// Shift one cell down; false (and no change) when blocked
    pub fn move_down(&mut self, board: &Board) -> bool {
        if !self.can_move_down(board) {
            return false;
        }
        self.y += 1;
        true
    }

    pub fn rotate_cw(&mut self, board: &Board, policy: RotationPolicy) -> RotateOutcome {
        self.rotate(board, policy, true)
    }

    pub fn rotate_ccw(&mut self, board: &Board, policy: RotationPolicy) -> RotateOutcome {
        self.rotate(board, policy, false)
    }

    fn rotate(&mut self, board: &Board, policy: RotationPolicy, clockwise: bool) -> RotateOutcome {
        if self.symmetric {
            return RotateOutcome::Unchanged;
        }

        let before = *self;
        self.matrix = if clockwise {
            self.matrix.rotated_cw()
        } else {
            self.matrix.rotated_ccw()
        };
        self.clamp_to(board);

        if policy == RotationPolicy::Strict && !self.fits(board) {
            *self = before;
            return RotateOutcome::Blocked;
        }

        RotateOutcome::Rotated
    }

    /// Pull the anchor back until every occupied cell is inside the board:
    /// right from the left edge, left from the right edge, up from the floor.
    ///
    /// A matrix side never exceeds 4 and the board is at least 4x4, so after
    /// the right-edge pass the left edge still holds.
    fn clamp_to(&mut self, board: &Board) {
        let last_col = board.width() as i16 - 1;
        let last_row = board.height() as i16 - 1;

        if let Some(left) = self.matrix.leftmost_col() {
            self.x = self.x.max(-(left as i16));
        }
        if let Some(right) = self.matrix.rightmost_col() {
            self.x = self.x.min(last_col - right as i16);
        }
        if let Some(bottom) = self.matrix.bottom_row() {
            self.y = self.y.min(last_row - bottom as i16);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeCatalog;

    fn piece(id: ShapeId, x: i16, y: i16) -> ActivePiece {
        let catalog = ShapeCatalog::standard().unwrap();
        ActivePiece::new(catalog.get(id), x, y)
    }

    #[test]
    fn test_cells_follow_anchor() {
        let p = piece(ShapeId::T, 2, 5);
        assert_eq!(p.cells().as_slice(), &[(2, 6), (3, 6), (4, 6), (3, 7)]);
    }

    #[test]
    fn test_borders_skip_empty_rows() {
        let p = piece(ShapeId::S, 0, 0);
        // Row 0 of S is empty and contributes nothing.
        assert_eq!(p.left_border().as_slice(), &[(1, 1), (0, 2)]);
        assert_eq!(p.right_border().as_slice(), &[(2, 1), (1, 2)]);
        assert_eq!(p.bottom_border().as_slice(), &[(0, 2), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_empty_row_does_not_block() {
        // T at x=0: row 0 of the matrix is empty. A locked cell beside that
        // empty row must not stop a move to the right.
        let mut board = Board::new(6, 6);
        board.set(4, 0, 1);
        let mut p = piece(ShapeId::T, 0, 0);
        assert!(p.move_right(&board));
        assert_eq!(p.anchor(), (1, 0));
    }

    #[test]
    fn test_move_left_blocked_at_edge() {
        let board = Board::new(6, 6);
        let mut p = piece(ShapeId::J, 0, 0);
        // J's leftmost cell is in column 0 already.
        assert!(!p.move_left(&board));
        assert_eq!(p.anchor(), (0, 0));
    }

    #[test]
    fn test_move_right_blocked_by_stack() {
        let mut board = Board::new(6, 6);
        board.set(3, 1, 5);
        let mut p = piece(ShapeId::T, 0, 0);
        assert!(!p.move_right(&board));
    }

    #[test]
    fn test_move_down_until_floor() {
        let board = Board::new(4, 6);
        let mut p = piece(ShapeId::O, 0, 0);
        let mut steps = 0;
        while p.move_down(&board) {
            steps += 1;
        }
        assert_eq!(steps, 4);
        assert_eq!(p.anchor(), (0, 4));
        assert!(!p.can_move_down(&board));
    }

    #[test]
    fn test_move_down_blocked_by_stack() {
        let mut board = Board::new(4, 6);
        board.set(1, 3, 2);
        let mut p = piece(ShapeId::O, 0, 0);
        assert!(p.move_down(&board));
        assert!(!p.move_down(&board));
        assert_eq!(p.anchor(), (0, 1));
    }

    #[test]
    fn test_vertical_i_may_hang_left() {
        // The I bar sits in column 2 of its matrix, so the anchor can go to -2.
        let board = Board::new(6, 8);
        let mut p = piece(ShapeId::I, 0, 0);
        assert!(p.move_left(&board));
        assert!(p.move_left(&board));
        assert!(!p.move_left(&board));
        assert_eq!(p.anchor(), (-2, 0));
        assert!(p.in_bounds(&board));
    }

    #[test]
    fn test_rotation_clamps_left_edge() {
        let board = Board::new(6, 8);
        let mut p = piece(ShapeId::I, -2, 0);
        assert_eq!(p.rotate_cw(&board, RotationPolicy::Strict), RotateOutcome::Rotated);
        // Horizontal bar in matrix row 2 spans columns 0..4.
        assert_eq!(p.anchor(), (0, 0));
        assert_eq!(p.cells().as_slice(), &[(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_rotation_clamps_right_edge_and_floor() {
        let board = Board::new(4, 4);
        // Vertical bar in the last column.
        let mut p = piece(ShapeId::I, 1, 0);
        assert_eq!(p.rotate_cw(&board, RotationPolicy::Strict), RotateOutcome::Rotated);
        assert_eq!(p.anchor(), (0, 0));

        // Horizontal bar on the floor; turning it back must lift the anchor.
        assert!(p.move_down(&board));
        assert_eq!(p.rotate_ccw(&board, RotationPolicy::Strict), RotateOutcome::Rotated);
        assert_eq!(p.anchor(), (0, 0));
        assert_eq!(p.cells().as_slice(), &[(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_o_rotation_is_noop() {
        let board = Board::new(4, 4);
        let mut p = piece(ShapeId::O, 1, 1);
        let before = p;
        assert_eq!(p.rotate_cw(&board, RotationPolicy::Strict), RotateOutcome::Unchanged);
        assert_eq!(p.rotate_ccw(&board, RotationPolicy::Permissive), RotateOutcome::Unchanged);
        assert_eq!(p, before);
    }

    #[test]
    fn test_strict_rotation_undoes_overlap() {
        let mut board = Board::new(6, 6);
        // T rotated clockwise occupies (1,0); block it.
        board.set(1, 0, 3);
        let mut p = piece(ShapeId::T, 0, 0);
        let before = p;
        assert_eq!(p.rotate_cw(&board, RotationPolicy::Strict), RotateOutcome::Blocked);
        assert_eq!(p, before);
    }

    #[test]
    fn test_permissive_rotation_keeps_overlap() {
        let mut board = Board::new(6, 6);
        board.set(1, 0, 3);
        let mut p = piece(ShapeId::T, 0, 0);
        assert_eq!(p.rotate_cw(&board, RotationPolicy::Permissive), RotateOutcome::Rotated);
        assert!(!p.fits(&board));
        assert!(p.in_bounds(&board));
    }
}
