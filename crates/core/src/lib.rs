//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on UI, terminal or timers, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule, property tests at the workspace root
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven square shape matrices and the catalog
//! - [`piece`]: the active piece, border-cell collision and rotation clamping
//! - [`board`]: settled grid, locking, full-row detection and compaction
//! - [`scoring`]: score, tick-driven level and speed progression
//! - [`rng`]: seeded uniform shape selection
//! - [`game_state`]: the [`Engine`] tying it all together
//! - [`snapshot`]: read-only copy for renderers
//!
//! # Game Rules
//!
//! - **Uniform spawns**: every new piece is one of the seven shapes with equal
//!   probability, placed at the top-left corner of the board
//! - **Tick-only locking**: a piece locks during the tick in which it lands;
//!   soft drops never lock
//! - **Rotation clamp**: a rotated piece is pushed back inside the walls and
//!   above the floor; no wall kicks
//! - **Level by time**: the level rises after a number of ticks, and the
//!   threshold grows as the game speeds up
//!
//! # Example
//!
//! ```
//! use blockfall_core::Engine;
//! use blockfall_core::types::GameAction;
//!
//! let mut game = Engine::with_size(10, 20, 12345).unwrap();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//!
//! // Ticks until the first piece locks
//! while !game.tick().locked {}
//! assert_eq!(game.pieces_spawned(), 2);
//! ```

pub mod board;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{Engine, MoveOutcome, SpawnInfo, TickOutcome};
pub use piece::{ActivePiece, CellPos, PieceCells, RotateOutcome};
pub use rng::{ShapePicker, SimpleRng};
pub use scoring::{delay_for_level, line_score, threshold_for_delay, ScoreKeeper};
pub use shapes::{Matrix, ShapeCatalog, ShapeDef, MAX_SHAPE_SIZE};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
