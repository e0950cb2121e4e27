//! Geometry module - quarter-turn rotation and bounding boxes
//!
//! Rotation is done in floating point about a pivot that may sit on a brick
//! centre `(0, 0)` or on a brick corner `(0.5, 0.5)`, then truncated back to
//! integer cells. Truncation (not rounding) is what keeps footprints compact
//! over successive turns, so it must stay `as i32`.

use crate::error::GeometryError;
use crate::types::{Coordinate, BRICKS_PER_FIGURE};

/// Rotation centre in figure-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    pub x: f64,
    pub y: f64,
}

impl Pivot {
    /// Centre of the brick at the local origin.
    pub const ORIGIN: Pivot = Pivot { x: 0.0, y: 0.0 };

    /// Shared corner of the four bricks around the local origin.
    pub const CORNER: Pivot = Pivot { x: 0.5, y: 0.5 };
}

/// Rotate `point` a quarter turn clockwise about `pivot`.
///
/// ```
/// use brickfall_core::geometry::{rotate90, Pivot};
/// use brickfall_core::types::Coordinate;
///
/// assert_eq!(rotate90(Coordinate::new(1, 0), Pivot::ORIGIN), Coordinate::new(0, -1));
/// assert_eq!(rotate90(Coordinate::new(2, 0), Pivot::CORNER), Coordinate::new(0, -1));
/// ```
pub fn rotate90(point: Coordinate, pivot: Pivot) -> Coordinate {
    let dx = point.x as f64 - pivot.x;
    let dy = point.y as f64 - pivot.y;
    let (rx, ry) = (dy, -dx);
    Coordinate::new((rx + pivot.x) as i32, (ry + pivot.y) as i32)
}

/// Axis-aligned extents of a set of coordinates (inclusive on both ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl BoundingBox {
    /// Bounding box of a figure's bricks. A brick array is never empty.
    pub fn of_bricks(bricks: &[Coordinate; BRICKS_PER_FIGURE]) -> Self {
        let first = bricks[0];
        let seed = BoundingBox {
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
        };
        bricks[1..].iter().fold(seed, |bbox, c| bbox.including(*c))
    }

    fn including(self, c: Coordinate) -> Self {
        Self {
            x_min: self.x_min.min(c.x),
            x_max: self.x_max.max(c.x),
            y_min: self.y_min.min(c.y),
            y_max: self.y_max.max(c.y),
        }
    }

    /// Horizontal extent, `x_max - x_min` (a single column has width 0).
    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    /// Vertical extent, `y_max - y_min`.
    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        c.x >= self.x_min && c.x <= self.x_max && c.y >= self.y_min && c.y <= self.y_max
    }
}

/// Bounding box of an arbitrary slice of coordinates.
///
/// Fails with [`GeometryError::EmptyInput`] on an empty slice.
pub fn bounding_box_of(points: &[Coordinate]) -> Result<BoundingBox, GeometryError> {
    let (first, rest) = points.split_first().ok_or(GeometryError::EmptyInput)?;
    let seed = BoundingBox {
        x_min: first.x,
        x_max: first.x,
        y_min: first.y,
        y_max: first.y,
    };
    Ok(rest.iter().fold(seed, |bbox, c| bbox.including(*c)))
}
