//! Playfield deltas emitted by [`crate::GameEngine::tick`].
//!
//! A presentation layer that keeps one visual per settled brick can replay
//! these in order to stay in sync with the grid without holding handles
//! inside the engine.

use crate::types::{Coordinate, FigureKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// A new current figure entered play above the field.
    Spawned { figure_id: u32, kind: FigureKind },
    /// The current figure settled and now occupies `cells`.
    Stamped {
        figure_id: u32,
        kind: FigureKind,
        cells: [Coordinate; 4],
    },
    /// Row `row` was removed; every row above it moved down by one.
    RowRemoved { row: usize },
    /// The round was lost and every cell was emptied.
    Cleared,
}
