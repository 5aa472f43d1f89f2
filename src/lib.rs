//! Blockfall (workspace facade crate).
//!
//! Re-exports the engine, input and terminal crates under one name and adds
//! the runner's configuration handling.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
