//! Snapshot module - read-only views of engine state for presentation layers
//!
//! Snapshots own their data so a renderer never borrows the engine.
//! [`GameEngine::snapshot_into`](crate::GameEngine::snapshot_into) refills an
//! existing snapshot without reallocating the grid.

use crate::engine::Phase;
use crate::figure::Figure;
use crate::types::{Cell, Coordinate, FigureKind};

/// The current figure, resolved to field space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: FigureKind,
    pub figure_id: u32,
    pub bricks: [Coordinate; 4],
}

/// The queued figure, normalised for a preview box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextSnapshot {
    pub kind: FigureKind,
    /// Rotated bricks shifted so the bounding box starts at `(0, 0)`.
    pub preview: [Coordinate; 4],
}

impl NextSnapshot {
    pub fn of(figure: &Figure) -> Self {
        let bbox = figure.local_bounding_box();
        let mut preview = figure.local_bricks();
        for brick in &mut preview {
            *brick = brick.translated(-bbox.x_min, -bbox.y_min);
        }
        Self {
            kind: figure.kind(),
            preview,
        }
    }
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major cells, bottom row first.
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub next: NextSnapshot,
    pub score: u64,
    pub level: u32,
    pub phase: Phase,
}

impl GameSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some()
    }

    /// Occupancy as rows of booleans, bottom row first.
    pub fn occupancy(&self) -> Vec<Vec<bool>> {
        if self.width == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(Option::is_some).collect())
            .collect()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            active: None,
            next: NextSnapshot::of(&Figure::new(FigureKind::I)),
            score: 0,
            level: 0,
            phase: Phase::NoActiveFigure,
        }
    }
}
