//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Terminal
//! auto-repeat is passed through as repeated presses, which gives held keys a
//! natural repeat rate without any timer of our own.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_press, should_quit};
