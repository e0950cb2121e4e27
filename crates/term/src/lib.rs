//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: [`GameView`] paints a
//! [`brickfall_core::GameSnapshot`] into a [`FrameBuffer`], and
//! [`TerminalRenderer`] flushes framebuffers to the terminal with crossterm.
//! Drawing into the framebuffer is pure, so layouts are unit-testable.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use brickfall_core as core;
pub use brickfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
