//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::Intent`]s and folds them
//! into the per-tick [`crate::types::InputSnapshot`] the engine consumes.
//! Works in terminals without key-release events by expiring held keys
//! after a short timeout.

pub mod handler;
pub mod map;

pub use brickfall_types as types;

pub use handler::InputHandler;
pub use map::{intent_for_key, should_quit};
