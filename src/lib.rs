//! Brickfall (workspace facade crate).
//!
//! Re-exports the rules engine, input mapping and terminal renderer that live
//! in dedicated crates under `crates/`.

pub use brickfall_core as core;
pub use brickfall_input as input;
pub use brickfall_term as term;
pub use brickfall_types as types;
