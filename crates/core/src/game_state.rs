//! Game state module - the engine that owns one game
//!
//! Ties together the board, the active piece, the shape picker and the score
//! keeper. The external scheduler calls [`Engine::tick`] every
//! [`Engine::delay_ms`] milliseconds; the input layer calls the move and rotate
//! operations (or [`Engine::apply_action`]) in between. Every operation takes
//! `&mut self`, so ticks and input are serialized by construction.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::piece::{ActivePiece, CellPos, PieceCells, RotateOutcome};
use crate::rng::ShapePicker;
use crate::scoring::ScoreKeeper;
use crate::shapes::{Matrix, ShapeCatalog, MAX_SHAPE_SIZE};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    ConfigError, GameAction, GameConfig, GameOverPolicy, ShapeId, SPAWN_ANCHOR,
};

/// A freshly spawned piece, for redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnInfo {
    pub shape: ShapeId,
    pub matrix: Matrix,
    pub anchor: CellPos,
}

/// Everything one tick changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// The piece descended one cell
    pub moved: bool,
    /// The piece was written into the board
    pub locked: bool,
    /// Rows removed by this lock, ascending
    pub cleared_rows: ArrayVec<usize, MAX_SHAPE_SIZE>,
    /// Points awarded by this lock
    pub points: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Delay to wait before the next tick
    pub delay_ms: u32,
    pub leveled_up: bool,
    pub spawned: Option<SpawnInfo>,
    pub game_over: bool,
}

/// Result of a move or rotate request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The request succeeded
    pub moved: bool,
    /// The piece actually changed (false for a symmetric rotation)
    pub changed: bool,
    /// Occupied cells after a successful request
    pub cells: Option<PieceCells>,
}

impl MoveOutcome {
    fn rejected() -> Self {
        Self {
            moved: false,
            changed: false,
            cells: None,
        }
    }

    fn accepted(piece: &ActivePiece, changed: bool) -> Self {
        Self {
            moved: true,
            changed,
            cells: Some(piece.cells()),
        }
    }
}

/// One running game
#[derive(Debug, Clone)]
pub struct Engine {
    config: GameConfig,
    catalog: ShapeCatalog,
    board: Board,
    active: Option<ActivePiece>,
    picker: ShapePicker,
    scorer: ScoreKeeper,
    paused: bool,
    game_over: bool,
    pieces_spawned: u32,
}

impl Engine {
    /// Validate the configuration and start a game with its first piece
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = ShapeCatalog::standard()?;

        let mut engine = Self {
            board: Board::new(config.cols, config.rows),
            active: None,
            picker: ShapePicker::new(config.seed),
            scorer: ScoreKeeper::new(config.level_up_ticks),
            paused: false,
            game_over: false,
            pieces_spawned: 0,
            catalog,
            config,
        };
        engine.spawn_piece();
        Ok(engine)
    }

    /// Start a game on a `cols x rows` board with default rules
    pub fn with_size(cols: u16, rows: u16, seed: u32) -> Result<Self, ConfigError> {
        Self::new(GameConfig::new(cols, rows).with_seed(seed))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.scorer.score()
    }

    pub fn level(&self) -> u32 {
        self.scorer.level()
    }

    pub fn lines(&self) -> u32 {
        self.scorer.lines()
    }

    /// Current tick interval in milliseconds
    pub fn delay_ms(&self) -> u32 {
        self.scorer.delay_ms()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    fn playable(&self) -> bool {
        !self.paused && !self.game_over
    }

    /// Draw a shape and place it at the spawn anchor.
    ///
    /// Under [`GameOverPolicy::BlockedSpawn`] a piece that does not fit ends
    /// the game and is not placed.
    fn spawn_piece(&mut self) -> Option<SpawnInfo> {
        let shape = self.picker.draw();
        let (x, y) = SPAWN_ANCHOR;
        let piece = ActivePiece::new(self.catalog.get(shape), x, y);

        if self.config.game_over == GameOverPolicy::BlockedSpawn && !piece.fits(&self.board) {
            self.active = None;
            self.game_over = true;
            return None;
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        Some(SpawnInfo {
            shape,
            matrix: *piece.matrix(),
            anchor: piece.anchor(),
        })
    }

    fn outcome(&self) -> TickOutcome {
        TickOutcome {
            moved: false,
            locked: false,
            cleared_rows: ArrayVec::new(),
            points: 0,
            score: self.scorer.score(),
            level: self.scorer.level(),
            lines: self.scorer.lines(),
            delay_ms: self.scorer.delay_ms(),
            leveled_up: false,
            spawned: None,
            game_over: self.game_over,
        }
    }

    /// One scheduler step: descend, and lock once the piece has landed.
    ///
    /// Does nothing while paused or after game over.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.playable() {
            return self.outcome();
        }

        let leveled_up = self.scorer.on_tick();
        let Some(mut piece) = self.active else {
            let mut out = self.outcome();
            out.leveled_up = leveled_up;
            return out;
        };

        let moved = piece.move_down(&self.board);
        self.active = Some(piece);
        if piece.can_move_down(&self.board) {
            let mut out = self.outcome();
            out.moved = moved;
            out.leveled_up = leveled_up;
            return out;
        }

        // Landed
        self.board.lock_piece(&piece);
        self.active = None;
        let (_, anchor_y) = piece.anchor();
        let cleared_rows = self.board.full_rows(anchor_y, piece.matrix().size());
        let points = self.scorer.on_lock(cleared_rows.len());
        self.board.shift_rows_down(&cleared_rows);
        let spawned = self.spawn_piece();

        let mut out = self.outcome();
        out.moved = moved;
        out.locked = true;
        out.cleared_rows = cleared_rows;
        out.points = points;
        out.leveled_up = leveled_up;
        out.spawned = spawned;
        out
    }

    fn translate(&mut self, step: fn(&mut ActivePiece, &Board) -> bool) -> MoveOutcome {
        if !self.playable() {
            return MoveOutcome::rejected();
        }
        let Some(piece) = self.active.as_mut() else {
            return MoveOutcome::rejected();
        };

        if step(piece, &self.board) {
            MoveOutcome::accepted(piece, true)
        } else {
            MoveOutcome::rejected()
        }
    }

    pub fn move_left(&mut self) -> MoveOutcome {
        self.translate(ActivePiece::move_left)
    }

    pub fn move_right(&mut self) -> MoveOutcome {
        self.translate(ActivePiece::move_right)
    }

    /// Soft drop by one cell. Never locks, even when the piece lands.
    pub fn move_down(&mut self) -> MoveOutcome {
        self.translate(ActivePiece::move_down)
    }

    fn rotate(&mut self, clockwise: bool) -> MoveOutcome {
        if !self.playable() {
            return MoveOutcome::rejected();
        }
        let policy = self.config.rotation;
        let Some(piece) = self.active.as_mut() else {
            return MoveOutcome::rejected();
        };

        let result = if clockwise {
            piece.rotate_cw(&self.board, policy)
        } else {
            piece.rotate_ccw(&self.board, policy)
        };
        match result {
            RotateOutcome::Rotated => MoveOutcome::accepted(piece, true),
            RotateOutcome::Unchanged => MoveOutcome::accepted(piece, false),
            RotateOutcome::Blocked => MoveOutcome::rejected(),
        }
    }

    pub fn rotate_cw(&mut self) -> MoveOutcome {
        self.rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> MoveOutcome {
        self.rotate(false)
    }

    /// Flip the pause flag; ignored after game over
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Start over with the same configuration and a fresh board.
    ///
    /// The shape picker keeps its state, so the new game gets a new sequence.
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = None;
        self.scorer = ScoreKeeper::new(self.config.level_up_ticks);
        self.paused = false;
        self.game_over = false;
        self.pieces_spawned = 0;
        self.spawn_piece();
    }

    /// Apply a game action; returns whether it had an effect
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left().moved,
            GameAction::MoveRight => self.move_right().moved,
            GameAction::SoftDrop => self.move_down().moved,
            GameAction::RotateCw => self.rotate_cw().moved,
            GameAction::RotateCcw => self.rotate_ccw().moved,
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cols = self.board.width();
        out.rows = self.board.height();
        self.board.write_grid_into(&mut out.board);
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.score = self.scorer.score();
        out.level = self.scorer.level();
        out.lines = self.scorer.lines();
        out.delay_ms = self.scorer.delay_ms();
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.pieces_spawned = self.pieces_spawned;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
