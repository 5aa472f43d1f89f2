//! Board module - manages the settled grid
//!
//! The board is a `cols x rows` grid of cell values: 0 for empty, 1..=7 for the
//! identity of the shape that locked there. Uses a flat row-major vector so the
//! compaction step is a handful of `copy_within` calls.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use arrayvec::ArrayVec;

use crate::piece::ActivePiece;
use crate::shapes::MAX_SHAPE_SIZE;

/// Value of an empty cell
pub const EMPTY: u8 = 0;

/// The settled grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: u16,
    rows: u16,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<u8>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// Cell coordinates are `i16`, so neither dimension may exceed
    /// `i16::MAX`. [`GameConfig::validate`](crate::types::GameConfig::validate)
    /// keeps engine boards far below that.
    pub fn new(cols: u16, rows: u16) -> Self {
        debug_assert!(
            cols <= i16::MAX as u16 && rows <= i16::MAX as u16,
            "board {}x{} exceeds i16 coordinates",
            cols,
            rows
        );
        Self {
            cols,
            rows,
            cells: vec![EMPTY; cols as usize * rows as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.cols as i16 || y < 0 || y >= self.rows as i16 {
            return None;
        }
        Some((y as usize) * (self.cols as usize) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.cols
    }

    pub fn height(&self) -> u16 {
        self.rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<u8> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, value: u8) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty
    pub fn is_empty_at(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(EMPTY))
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(v) if v != EMPTY)
    }

    pub fn is_out_of_bounds(&self, x: i16, y: i16) -> bool {
        self.index(x, y).is_none()
    }

    /// Cells of row `y`, or None if out of bounds
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.rows as usize {
            return None;
        }
        let width = self.cols as usize;
        self.cells.get(y * width..(y + 1) * width)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|&cell| cell != EMPTY))
    }

    /// Write the piece's identity into every cell it occupies.
    ///
    /// The write is unconditional: a piece that overlaps the stack (possible
    /// under the permissive rotation policy) overwrites what is there.
    /// Returns the number of cells written.
    pub fn lock_piece(&mut self, piece: &ActivePiece) -> usize {
        let value = piece.shape().value();
        piece
            .cells()
            .into_iter()
            .filter(|&(x, y)| self.set(x, y, value))
            .count()
    }

    /// Full rows among those spanned by a piece at `anchor_y` with matrix side
    /// `size`, in ascending order
    pub fn full_rows(&self, anchor_y: i16, size: usize) -> ArrayVec<usize, MAX_SHAPE_SIZE> {
        let top = anchor_y.max(0) as usize;
        let bottom = (anchor_y as i32 + size.min(MAX_SHAPE_SIZE) as i32).clamp(0, self.rows as i32) as usize;
        (top..bottom).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Full rows anywhere on the board, in ascending order
    pub fn all_full_rows(&self) -> Vec<usize> {
        (0..self.rows as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Delete row `y`: every row above it moves down by one and row 0 is
    /// zero-filled.
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.rows as usize {
            return;
        }

        let width = self.cols as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells.copy_within(src_start..src_start + width, dst_start);
        }

        self.cells[..width].fill(EMPTY);
    }

    /// Remove the given rows and compact the board.
    ///
    /// Rows are cleared one at a time from the topmost down, so each deletion
    /// only moves rows that lie above every row still pending. Net effect for
    /// `k` distinct rows: they disappear and `k` empty rows appear at the top.
    /// Input order and duplicates don't matter.
    pub fn shift_rows_down(&mut self, rows: &[usize]) {
        let mut done: Option<usize> = None;
        while let Some(y) = rows
            .iter()
            .copied()
            .filter(|&y| done.map_or(true, |d| y > d))
            .min()
        {
            self.clear_row(y);
            done = Some(y);
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Copy the grid into `out`, reusing its allocation
    pub fn write_grid_into(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend_from_slice(&self.cells);
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Build a board from row slices, for tests and fixtures.
    ///
    /// Returns None when rows are ragged or empty.
    pub fn from_rows(rows: &[Vec<u8>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self {
            cols: width as u16,
            rows: height as u16,
            cells: rows.concat(),
        })
    }

    /// Convert to 2D rows for testing/display
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols.max(1) as usize)
            .map(<[u8]>::to_vec)
            .collect()
    }
}
