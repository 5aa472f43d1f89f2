use crate::piece::{ActivePiece, PieceCells};
use crate::types::ShapeId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: ShapeId,
    pub anchor_x: i16,
    pub anchor_y: i16,
    /// Occupied cells in board coordinates
    pub cells: PieceCells,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        let (anchor_x, anchor_y) = value.anchor();
        Self {
            shape: value.shape(),
            anchor_x,
            anchor_y,
            cells: value.cells(),
        }
    }
}

/// Read-only copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub cols: u16,
    pub rows: u16,
    /// Row-major settled grid, `rows * cols` cells
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub delay_ms: u32,
    pub paused: bool,
    pub game_over: bool,
    pub pieces_spawned: u32,
}

impl GameSnapshot {
    /// Settled cell at `(x, y)`, 0 when out of range
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        if x >= self.cols as usize || y >= self.rows as usize {
            return 0;
        }
        self.board[y * self.cols as usize + x]
    }

    pub fn clear(&mut self) {
        self.cols = 0;
        self.rows = 0;
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.delay_ms = 0;
        self.paused = false;
        self.game_over = false;
        self.pieces_spawned = 0;
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}
