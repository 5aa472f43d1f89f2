//! Terminal front end for blockfall.
//!
//! [`GameView`] paints a [`core::GameSnapshot`] into a [`FrameBuffer`];
//! [`TerminalRenderer`] writes that framebuffer to the terminal, sending only
//! the cells that changed since the previous frame. The view is pure and can
//! be tested without a terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
