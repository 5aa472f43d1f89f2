//! Shapes module - the seven tetromino definitions
//!
//! Each shape is a square occupancy matrix in spawn orientation plus its
//! identity and display color. Matrices are square so that a quarter turn is a
//! plain index transform on the same `N×N` grid.

use crate::types::{ConfigError, Rgb, ShapeId};

/// Largest supported matrix side
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy matrix of side 2..=4, stored in a fixed 4x4 array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    size: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Matrix {
    fn empty(size: usize) -> Self {
        Self {
            size,
            cells: [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
        }
    }

    /// Side length N
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `(row, col)` is occupied; false outside the matrix
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row][col]
    }

    /// Occupied cells as `(row, col)`, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size;
        (0..n).flat_map(move |r| (0..n).filter(move |&c| self.cells[r][c]).map(move |c| (r, c)))
    }

    pub fn count(&self) -> usize {
        self.occupied().count()
    }

    /// Quarter turn clockwise: `new[i][j] = old[N-1-j][i]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.size;
        let mut out = Self::empty(n);
        for i in 0..n {
            for j in 0..n {
                out.cells[i][j] = self.cells[n - 1 - j][i];
            }
        }
        out
    }

    /// Quarter turn counter-clockwise: `new[i][j] = old[j][N-1-i]`
    pub fn rotated_ccw(&self) -> Self {
        let n = self.size;
        let mut out = Self::empty(n);
        for i in 0..n {
            for j in 0..n {
                out.cells[i][j] = self.cells[j][n - 1 - i];
            }
        }
        out
    }

    /// First and last occupied column of a row, `None` for an empty row
    pub fn row_extent(&self, row: usize) -> Option<(usize, usize)> {
        if row >= self.size {
            return None;
        }
        let cols = &self.cells[row][..self.size];
        let first = cols.iter().position(|&c| c)?;
        let last = cols.iter().rposition(|&c| c)?;
        Some((first, last))
    }

    /// Lowest occupied row of a column, `None` for an empty column
    pub fn column_bottom(&self, col: usize) -> Option<usize> {
        if col >= self.size {
            return None;
        }
        (0..self.size).rev().find(|&r| self.cells[r][col])
    }

    pub fn leftmost_col(&self) -> Option<usize> {
        self.occupied().map(|(_, c)| c).min()
    }

    pub fn rightmost_col(&self) -> Option<usize> {
        self.occupied().map(|(_, c)| c).max()
    }

    pub fn bottom_row(&self) -> Option<usize> {
        self.occupied().map(|(r, _)| r).max()
    }

    /// Rows as `0`/`1` values, handy for tests and debugging
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.size)
            .map(|r| (0..self.size).map(|c| self.cells[r][c] as u8).collect())
            .collect()
    }
}

/// Immutable definition of one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    id: ShapeId,
    color: Rgb,
    symmetric: bool,
    matrix: Matrix,
}

impl ShapeDef {
    /// Build a shape from a row table of `0`/nonzero values.
    ///
    /// Rejects non-square tables, sides outside `2..=4` and tables without any
    /// occupied cell.
    pub fn from_rows(
        id: ShapeId,
        color: Rgb,
        symmetric: bool,
        rows: &[&[u8]],
    ) -> Result<Self, ConfigError> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(ConfigError::NonSquareShape { shape: id });
        }
        if !(2..=MAX_SHAPE_SIZE).contains(&size) {
            return Err(ConfigError::ShapeSize { shape: id, size });
        }

        let mut matrix = Matrix::empty(size);
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                matrix.cells[r][c] = v != 0;
            }
        }
        if matrix.count() == 0 {
            return Err(ConfigError::EmptyShape { shape: id });
        }

        Ok(Self {
            id,
            color,
            symmetric,
            matrix,
        })
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Spawn-orientation matrix
    pub fn matrix(&self) -> Matrix {
        self.matrix
    }

    /// Rotations of a symmetric shape are no-ops
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }
}

const I_ROWS: [&[u8]; 4] = [&[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0]];
const J_ROWS: [&[u8]; 3] = [&[0, 1, 0], &[0, 1, 0], &[1, 1, 0]];
const L_ROWS: [&[u8]; 3] = [&[0, 1, 0], &[0, 1, 0], &[0, 1, 1]];
const O_ROWS: [&[u8]; 2] = [&[1, 1], &[1, 1]];
const S_ROWS: [&[u8]; 3] = [&[0, 0, 0], &[0, 1, 1], &[1, 1, 0]];
const T_ROWS: [&[u8]; 3] = [&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]];
const Z_ROWS: [&[u8]; 3] = [&[0, 0, 0], &[1, 1, 0], &[0, 1, 1]];

/// Row table, color and symmetry flag of a standard shape
fn standard_table(id: ShapeId) -> (&'static [&'static [u8]], Rgb, bool) {
    match id {
        // deep sky blue
        ShapeId::I => (&I_ROWS, Rgb::new(0, 191, 255), false),
        ShapeId::J => (&J_ROWS, Rgb::new(0, 0, 255), false),
        ShapeId::L => (&L_ROWS, Rgb::new(255, 165, 0), false),
        // gold
        ShapeId::O => (&O_ROWS, Rgb::new(255, 215, 0), true),
        ShapeId::S => (&S_ROWS, Rgb::new(0, 255, 0), false),
        // slate blue
        ShapeId::T => (&T_ROWS, Rgb::new(106, 90, 205), false),
        ShapeId::Z => (&Z_ROWS, Rgb::new(255, 0, 0), false),
    }
}

/// The seven shape definitions, indexed by identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeCatalog {
    shapes: Vec<ShapeDef>,
}

impl ShapeCatalog {
    /// Validate and build the standard tetromino set
    pub fn standard() -> Result<Self, ConfigError> {
        let shapes = ShapeId::ALL
            .iter()
            .map(|&id| {
                let (rows, color, symmetric) = standard_table(id);
                ShapeDef::from_rows(id, color, symmetric, rows)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { shapes })
    }

    pub fn get(&self, id: ShapeId) -> &ShapeDef {
        &self.shapes[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeDef> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[u8]]) -> Matrix {
        ShapeDef::from_rows(ShapeId::T, Rgb::default(), false, rows)
            .unwrap()
            .matrix()
    }

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = ShapeCatalog::standard().unwrap();
        assert_eq!(catalog.len(), 7);
        for (def, id) in catalog.iter().zip(ShapeId::ALL) {
            assert_eq!(def.id(), id);
            assert_eq!(def.matrix().count(), 4, "{:?} is a tetromino", id);
        }
    }

    #[test]
    fn test_matrix_sizes() {
        let catalog = ShapeCatalog::standard().unwrap();
        assert_eq!(catalog.get(ShapeId::I).matrix().size(), 4);
        assert_eq!(catalog.get(ShapeId::O).matrix().size(), 2);
        for id in [ShapeId::J, ShapeId::L, ShapeId::S, ShapeId::T, ShapeId::Z] {
            assert_eq!(catalog.get(id).matrix().size(), 3);
        }
    }

    #[test]
    fn test_only_o_is_symmetric() {
        let catalog = ShapeCatalog::standard().unwrap();
        for def in catalog.iter() {
            assert_eq!(def.is_symmetric(), def.id() == ShapeId::O);
        }
    }

    #[test]
    fn test_rejects_non_square() {
        let err = ShapeDef::from_rows(ShapeId::L, Rgb::default(), false, &[&[1, 1, 1], &[1, 0, 0]]);
        assert_eq!(err, Err(ConfigError::NonSquareShape { shape: ShapeId::L }));
    }

    #[test]
    fn test_rejects_empty() {
        let err = ShapeDef::from_rows(ShapeId::S, Rgb::default(), false, &[&[0, 0], &[0, 0]]);
        assert_eq!(err, Err(ConfigError::EmptyShape { shape: ShapeId::S }));
    }

    #[test]
    fn test_rejects_unsupported_size() {
        let err = ShapeDef::from_rows(ShapeId::O, Rgb::default(), true, &[&[1]]);
        assert_eq!(err, Err(ConfigError::ShapeSize { shape: ShapeId::O, size: 1 }));
    }

    #[test]
    fn test_rotate_cw() {
        let t = matrix(&T_ROWS);
        assert_eq!(
            t.rotated_cw().to_rows(),
            vec![vec![0, 1, 0], vec![1, 1, 0], vec![0, 1, 0]]
        );
    }

    #[test]
    fn test_rotate_ccw() {
        let t = matrix(&T_ROWS);
        assert_eq!(
            t.rotated_ccw().to_rows(),
            vec![vec![0, 1, 0], vec![0, 1, 1], vec![0, 1, 0]]
        );
    }

    #[test]
    fn test_four_turns_are_identity() {
        let l = matrix(&L_ROWS);
        let cw4 = l.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(cw4, l);
        assert_eq!(l.rotated_cw().rotated_ccw(), l);
    }

    #[test]
    fn test_vertical_i_turns_horizontal() {
        let i = matrix(&I_ROWS);
        let rows = i.rotated_cw().to_rows();
        assert_eq!(rows[2], vec![1, 1, 1, 1]);
        assert!(rows[0].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_extents() {
        let s = matrix(&S_ROWS);
        assert_eq!(s.row_extent(0), None);
        assert_eq!(s.row_extent(1), Some((1, 2)));
        assert_eq!(s.row_extent(2), Some((0, 1)));
        assert_eq!(s.column_bottom(0), Some(2));
        assert_eq!(s.column_bottom(2), Some(1));
        assert_eq!(s.leftmost_col(), Some(0));
        assert_eq!(s.rightmost_col(), Some(2));
        assert_eq!(s.bottom_row(), Some(2));
    }
}
