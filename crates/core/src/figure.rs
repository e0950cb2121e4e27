//! Figure module - the seven shapes, their pivots, and world-space queries
//!
//! A figure stores only kind, position and a quarter-turn count. Brick
//! coordinates are derived on demand: every template offset is rotated
//! `rotation_steps` times about the kind's pivot, then translated by the
//! position. Rotation always happens in figure-local space.

use rand::Rng;

use crate::geometry::{rotate90, BoundingBox, Pivot};
use crate::types::{Coordinate, FigureKind, BRICKS_PER_FIGURE, ROTATION_STEPS};

/// Brick offsets of a figure relative to its anchor.
pub type FigureShape = [Coordinate; BRICKS_PER_FIGURE];

const fn c(x: i32, y: i32) -> Coordinate {
    Coordinate::new(x, y)
}

const I_TEMPLATE: FigureShape = [c(-1, 0), c(0, 0), c(1, 0), c(2, 0)];
const J_TEMPLATE: FigureShape = [c(-1, 0), c(0, 0), c(1, 0), c(-1, 1)];
const L_TEMPLATE: FigureShape = [c(-1, 0), c(0, 0), c(1, 0), c(1, 1)];
const O_TEMPLATE: FigureShape = [c(0, 0), c(1, 0), c(1, 1), c(0, 1)];
const S_TEMPLATE: FigureShape = [c(-1, 0), c(0, 0), c(0, 1), c(1, 1)];
// Not the mirror of S: the Z template hangs one brick below the anchor row.
const Z_TEMPLATE: FigureShape = [c(1, 0), c(0, 0), c(0, 1), c(1, -1)];
const T_TEMPLATE: FigureShape = [c(-1, 0), c(0, 0), c(1, 0), c(0, 1)];

/// Unrotated brick offsets for a kind.
pub fn template(kind: FigureKind) -> &'static FigureShape {
    match kind {
        FigureKind::I => &I_TEMPLATE,
        FigureKind::J => &J_TEMPLATE,
        FigureKind::L => &L_TEMPLATE,
        FigureKind::O => &O_TEMPLATE,
        FigureKind::S => &S_TEMPLATE,
        FigureKind::Z => &Z_TEMPLATE,
        FigureKind::T => &T_TEMPLATE,
    }
}

/// Rotation centre for a kind.
///
/// I and O turn about a brick corner so they rotate in place; the rest turn
/// about the centre of their anchor brick.
pub fn pivot(kind: FigureKind) -> Pivot {
    match kind {
        FigureKind::I | FigureKind::O => Pivot::CORNER,
        FigureKind::J | FigureKind::L | FigureKind::S | FigureKind::Z | FigureKind::T => {
            Pivot::ORIGIN
        }
    }
}

/// A figure on (or above) the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Figure {
    kind: FigureKind,
    position: Coordinate,
    rotation_steps: u8,
}

impl Figure {
    /// Unrotated figure anchored at the origin.
    pub fn new(kind: FigureKind) -> Self {
        Self::with_rotation(kind, 0)
    }

    /// Figure anchored at the origin, turned `rotation_steps` quarter turns.
    pub fn with_rotation(kind: FigureKind, rotation_steps: u8) -> Self {
        Self {
            kind,
            position: Coordinate::default(),
            rotation_steps: rotation_steps % ROTATION_STEPS,
        }
    }

    /// Uniformly random kind and rotation. Position is left at the origin for
    /// the caller to place.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let kind = FigureKind::ALL[rng.random_range(0..FigureKind::ALL.len())];
        let steps = rng.random_range(0..ROTATION_STEPS);
        Self::with_rotation(kind, steps)
    }

    /// Place `kind` so its local anchor sits at `position`.
    pub fn at(kind: FigureKind, rotation_steps: u8, position: Coordinate) -> Self {
        let mut figure = Self::with_rotation(kind, rotation_steps);
        figure.position = position;
        figure
    }

    pub fn kind(&self) -> FigureKind {
        self.kind
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn rotation_steps(&self) -> u8 {
        self.rotation_steps
    }

    pub fn set_position(&mut self, position: Coordinate) {
        self.position = position;
    }

    /// One more quarter turn. The position does not move.
    pub fn rotate(&mut self) {
        self.rotation_steps = (self.rotation_steps + 1) % ROTATION_STEPS;
    }

    /// Drop one row.
    pub fn fall(&mut self) {
        self.position.y -= 1;
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.position = self.position.translated(dx, dy);
    }

    /// Bricks with rotation applied, before translation.
    pub fn local_bricks(&self) -> FigureShape {
        let pivot = pivot(self.kind);
        let mut bricks = *template(self.kind);
        for brick in &mut bricks {
            for _ in 0..self.rotation_steps {
                *brick = rotate90(*brick, pivot);
            }
        }
        bricks
    }

    /// Bricks in field space.
    pub fn world_bricks(&self) -> FigureShape {
        let mut bricks = self.local_bricks();
        for brick in &mut bricks {
            *brick = *brick + self.position;
        }
        bricks
    }

    /// Bounding box of the rotated, untranslated bricks.
    pub fn local_bounding_box(&self) -> BoundingBox {
        BoundingBox::of_bricks(&self.local_bricks())
    }

    /// Bounding box of the bricks in field space.
    pub fn world_bounding_box(&self) -> BoundingBox {
        BoundingBox::of_bricks(&self.world_bricks())
    }
}
