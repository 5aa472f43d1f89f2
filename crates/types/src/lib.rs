//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal rendering, runner configuration).
//!
//! # Board Dimensions
//!
//! The board size is chosen at game start. The default is a 16x24 playfield;
//! anything down to 4x4 is accepted (the I piece needs
//! four cells in both directions for its rotation clamp to terminate).
//!
//! # Speed Curve
//!
//! Tick delay in milliseconds per level:
//!
//! | Level | Delay |
//! |-------|-------|
//! | 1 | 500ms |
//! | 2 | 450ms |
//! | 3 | 400ms |
//! | 4 | 350ms |
//! | 5 | 300ms |
//! | 6 | 250ms |
//! | 7 | 175ms |
//! | 8 | 100ms |
//! | 9+ | 25ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameConfig, GameOverPolicy, ShapeId};
//!
//! // Shape identities double as board cell values
//! assert_eq!(ShapeId::O.value(), 4);
//! assert_eq!(ShapeId::from_cell(4), Some(ShapeId::O));
//!
//! // Play goes on forever unless the game-over rule is switched on
//! assert_eq!(GameConfig::default().game_over, GameOverPolicy::Never);
//!
//! // Default configuration is always valid
//! assert!(GameConfig::default().validate().is_ok());
//! ```

use std::fmt;

/// Default board width in cells
pub const DEFAULT_COLS: u16 = 16;

/// Default board height in cells
pub const DEFAULT_ROWS: u16 = 24;

/// Smallest accepted board dimension in either direction
pub const MIN_BOARD_DIM: u16 = 4;

/// Largest accepted board dimension in either direction
pub const MAX_BOARD_DIM: u16 = 512;

/// Anchor of every freshly spawned piece (top-left corner of the board)
pub const SPAWN_ANCHOR: (i16, i16) = (0, 0);

/// Points per lock, indexed by rows cleared; multiplied by the current level.
pub const SCORE_SCALE: [u32; 5] = [0, 50, 150, 350, 1000];

/// Tick delay in milliseconds, indexed by level (index 0 is unused).
pub const DELAY_TABLE: [u32; 10] = [500, 500, 450, 400, 350, 300, 250, 175, 100, 25];

/// Delay floor reached at level 9 and kept for every level after it
pub const MIN_DELAY_MS: u32 = 25;

/// Ticks needed to leave level 1; later thresholds are rescaled from this.
pub const DEFAULT_LEVEL_UP_TICKS: u32 = 120;

/// The seven tetromino shapes
///
/// The discriminant is the value written into board cells when a piece of this
/// shape locks (0 is reserved for empty cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeId {
    I = 1,
    J = 2,
    L = 3,
    O = 4,
    S = 5,
    T = 6,
    Z = 7,
}

impl ShapeId {
    /// All shapes in identity order
    pub const ALL: [ShapeId; 7] = [
        ShapeId::I,
        ShapeId::J,
        ShapeId::L,
        ShapeId::O,
        ShapeId::S,
        ShapeId::T,
        ShapeId::Z,
    ];

    /// Board cell value for this shape (1..=7)
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Map a board cell value back to a shape
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeId;
    ///
    /// assert_eq!(ShapeId::from_cell(1), Some(ShapeId::I));
    /// assert_eq!(ShapeId::from_cell(7), Some(ShapeId::Z));
    /// assert_eq!(ShapeId::from_cell(0), None);
    /// assert_eq!(ShapeId::from_cell(8), None);
    /// ```
    pub fn from_cell(value: u8) -> Option<Self> {
        match value {
            1 => Some(ShapeId::I),
            2 => Some(ShapeId::J),
            3 => Some(ShapeId::L),
            4 => Some(ShapeId::O),
            5 => Some(ShapeId::S),
            6 => Some(ShapeId::T),
            7 => Some(ShapeId::Z),
            _ => None,
        }
    }

    /// Zero-based position in [`ShapeId::ALL`]
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// Single upper-case letter, used by the side panel
    pub fn letter(self) -> &'static str {
        match self {
            ShapeId::I => "I",
            ShapeId::J => "J",
            ShapeId::L => "L",
            ShapeId::O => "O",
            ShapeId::S => "S",
            ShapeId::T => "T",
            ShapeId::Z => "Z",
        }
    }
}

/// 24-bit RGB color.
///
/// Shapes carry one as their display color; the engine never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Commands the input layer routes to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (never locks; only a tick locks)
    SoftDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Restart the game with the same configuration
    Restart,
}

/// What a rotation does when its clamped result overlaps locked cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    /// Undo the rotation and report it as blocked
    #[default]
    Strict,
    /// Keep the rotated piece even though it overlaps the stack
    Permissive,
}

impl RotationPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Some(RotationPolicy::Strict),
            "permissive" => Some(RotationPolicy::Permissive),
            _ => None,
        }
    }

    /// Name accepted by [`RotationPolicy::from_str`]
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationPolicy::Strict => "strict",
            RotationPolicy::Permissive => "permissive",
        }
    }
}

/// When (if ever) the game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameOverPolicy {
    /// The game never ends; new pieces keep stacking over the old ones
    #[default]
    Never,
    /// The game ends when a freshly spawned piece overlaps locked cells
    BlockedSpawn,
}

impl GameOverPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blocked-spawn" | "blocked_spawn" | "blockedspawn" => Some(GameOverPolicy::BlockedSpawn),
            "never" => Some(GameOverPolicy::Never),
            _ => None,
        }
    }

    /// Name accepted by [`GameOverPolicy::from_str`]
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverPolicy::BlockedSpawn => "blocked-spawn",
            GameOverPolicy::Never => "never",
        }
    }
}

/// Engine configuration, fixed for the lifetime of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub cols: u16,
    pub rows: u16,
    /// RNG seed for piece selection
    pub seed: u32,
    /// Ticks needed to leave level 1
    pub level_up_ticks: u32,
    pub rotation: RotationPolicy,
    pub game_over: GameOverPolicy,
}

impl GameConfig {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_rotation(mut self, rotation: RotationPolicy) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_game_over(mut self, game_over: GameOverPolicy) -> Self {
        self.game_over = game_over;
        self
    }

    pub fn with_level_up_ticks(mut self, ticks: u32) -> Self {
        self.level_up_ticks = ticks;
        self
    }

    /// Check the board and progression settings
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{ConfigError, GameConfig};
    ///
    /// assert!(GameConfig::new(4, 4).validate().is_ok());
    /// assert_eq!(
    ///     GameConfig::new(3, 10).validate(),
    ///     Err(ConfigError::BoardTooSmall { cols: 3, rows: 10 })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols < MIN_BOARD_DIM || self.rows < MIN_BOARD_DIM {
            return Err(ConfigError::BoardTooSmall {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.cols > MAX_BOARD_DIM || self.rows > MAX_BOARD_DIM {
            return Err(ConfigError::BoardTooLarge {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.level_up_ticks == 0 {
            return Err(ConfigError::InvalidLevelUpTicks);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            seed: 1,
            level_up_ticks: DEFAULT_LEVEL_UP_TICKS,
            rotation: RotationPolicy::default(),
            game_over: GameOverPolicy::default(),
        }
    }
}

/// Fatal configuration errors, detected before the first tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    BoardTooSmall { cols: u16, rows: u16 },
    BoardTooLarge { cols: u16, rows: u16 },
    InvalidLevelUpTicks,
    NonSquareShape { shape: ShapeId },
    EmptyShape { shape: ShapeId },
    ShapeSize { shape: ShapeId, size: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardTooSmall { cols, rows } => write!(
                f,
                "board {}x{} is too small (minimum {}x{})",
                cols, rows, MIN_BOARD_DIM, MIN_BOARD_DIM
            ),
            ConfigError::BoardTooLarge { cols, rows } => write!(
                f,
                "board {}x{} is too large (maximum {}x{})",
                cols, rows, MAX_BOARD_DIM, MAX_BOARD_DIM
            ),
            ConfigError::InvalidLevelUpTicks => write!(f, "level-up threshold must be at least 1 tick"),
            ConfigError::NonSquareShape { shape } => {
                write!(f, "shape {} is not square", shape.letter())
            }
            ConfigError::EmptyShape { shape } => {
                write!(f, "shape {} has no occupied cells", shape.letter())
            }
            ConfigError::ShapeSize { shape, size } => {
                write!(f, "shape {} has unsupported size {}", shape.letter(), size)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
