//! Shared value types for the falling-block engine.
//!
//! Everything in here is plain data: coordinates, the closed set of figure
//! kinds, the opaque occupant written into playfield cells, and the logical
//! input snapshot the engine consumes once per tick. No crate in the workspace
//! needs anything heavier than these to talk to another.
//!
//! # Field coordinates
//!
//! - `x` grows to the right, `0..width`
//! - `y` grows upward, `0..height`; row 0 is the bottom row
//! - figures spawn at `y = height`, i.e. just above the visible field
//!
//! # Default timing
//!
//! All intervals are in seconds.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FALL_INTERVAL_SECS` | 0.5 | Gravity at level 1 |
//! | `DEFAULT_FAST_FALL_INTERVAL_SECS` | 0.1 | Gravity while fast-drop is held |
//! | `DEFAULT_INPUT_INTERVAL_SECS` | 0.1 | Rotate/move repeat rate |
//!
//! # Examples
//!
//! ```
//! use brickfall_types::{Coordinate, FigureKind, InputSnapshot};
//!
//! let kind: FigureKind = "t".parse().unwrap();
//! assert_eq!(kind, FigureKind::T);
//!
//! let c = Coordinate::new(3, 4).translated(1, -1);
//! assert_eq!(c, Coordinate::new(4, 3));
//!
//! let input = InputSnapshot {
//!     move_left_held: true,
//!     move_right_held: true,
//!     ..InputSnapshot::default()
//! };
//! assert_eq!(input.horizontal_movement(), -1);
//! ```

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Default field width in cells.
pub const DEFAULT_FIELD_WIDTH: usize = 10;

/// Default field height in cells.
pub const DEFAULT_FIELD_HEIGHT: usize = 20;

/// Gravity interval at level 1.
pub const DEFAULT_FALL_INTERVAL_SECS: f64 = 0.5;

/// Gravity interval while fast-drop is held.
pub const DEFAULT_FAST_FALL_INTERVAL_SECS: f64 = 0.1;

/// Minimum time between two accepted rotate/move inputs.
pub const DEFAULT_INPUT_INTERVAL_SECS: f64 = 0.1;

/// Level a fresh engine starts at. A lost round resets to 0, not to this.
pub const STARTING_LEVEL: u32 = 1;

/// Every figure is made of exactly this many bricks.
pub const BRICKS_PER_FIGURE: usize = 4;

/// Number of distinct quarter turns.
pub const ROTATION_STEPS: u8 = 4;

/// Narrowest field every figure footprint fits in.
pub const MIN_FIELD_WIDTH: usize = 4;

/// Integer cell coordinate, field space or figure-local space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return this coordinate shifted by `(dx, dy)`.
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        self.translated(rhs.x, rhs.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The seven figure kinds.
///
/// The set is fixed by the game rules; geometry for each kind lives in
/// `brickfall_core::figure` and is looked up by pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FigureKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl FigureKind {
    /// All kinds, in index order.
    pub const ALL: [FigureKind; 7] = [
        FigureKind::I,
        FigureKind::J,
        FigureKind::L,
        FigureKind::O,
        FigureKind::S,
        FigureKind::Z,
        FigureKind::T,
    ];

    /// Stable index into [`FigureKind::ALL`].
    pub fn index(self) -> u8 {
        match self {
            FigureKind::I => 0,
            FigureKind::J => 1,
            FigureKind::L => 2,
            FigureKind::O => 3,
            FigureKind::S => 4,
            FigureKind::Z => 5,
            FigureKind::T => 6,
        }
    }

    /// Uppercase single-letter name.
    ///
    /// ```
    /// use brickfall_types::FigureKind;
    ///
    /// assert_eq!(FigureKind::Z.as_str(), "Z");
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            FigureKind::I => "I",
            FigureKind::J => "J",
            FigureKind::L => "L",
            FigureKind::O => "O",
            FigureKind::S => "S",
            FigureKind::Z => "Z",
            FigureKind::T => "T",
        }
    }
}

impl fmt::Display for FigureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A figure kind lookup that matched none of the seven kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidFigureKind {
    #[error("no figure kind has index {0}")]
    Index(u8),
    #[error("no figure kind is named {0:?}")]
    Name(String),
}

impl TryFrom<u8> for FigureKind {
    type Error = InvalidFigureKind;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        FigureKind::ALL
            .get(value as usize)
            .copied()
            .ok_or(InvalidFigureKind::Index(value))
    }
}

impl FromStr for FigureKind {
    type Err = InvalidFigureKind;

    /// Case-insensitive single-letter parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Ok(FigureKind::I),
            "j" => Ok(FigureKind::J),
            "l" => Ok(FigureKind::L),
            "o" => Ok(FigureKind::O),
            "s" => Ok(FigureKind::S),
            "z" => Ok(FigureKind::Z),
            "t" => Ok(FigureKind::T),
            _ => Err(InvalidFigureKind::Name(s.to_string())),
        }
    }
}

/// Occupant of a playfield cell.
///
/// The engine never looks inside it beyond "occupied"; presentation layers
/// use `figure_id` to keep the identity of a brick across row shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Brick {
    pub kind: FigureKind,
    pub figure_id: u32,
}

/// A playfield cell: `None` is empty.
pub type Cell = Option<Brick>;

/// Logical buttons the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    RotateRight,
    DropFast,
}

/// Input state sampled once per tick.
///
/// Movement and fast-drop are level-triggered (held), rotation is
/// edge-triggered (pressed since the previous snapshot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub drop_fast_held: bool,
    pub rotate_right_edge: bool,
    pub move_left_held: bool,
    pub move_right_held: bool,
}

impl InputSnapshot {
    /// Horizontal step requested by the held buttons. Left wins when both are held.
    pub fn horizontal_movement(&self) -> i32 {
        if self.move_left_held {
            -1
        } else if self.move_right_held {
            1
        } else {
            0
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_index_roundtrips_through_try_from() {
        for kind in FigureKind::ALL {
            assert_eq!(FigureKind::try_from(kind.index()), Ok(kind));
        }
        assert_eq!(FigureKind::try_from(7), Err(InvalidFigureKind::Index(7)));
    }

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!("o".parse::<FigureKind>(), Ok(FigureKind::O));
        assert_eq!("O".parse::<FigureKind>(), Ok(FigureKind::O));
        assert!(matches!(
            "x".parse::<FigureKind>(),
            Err(InvalidFigureKind::Name(_))
        ));
    }

    #[test]
    fn test_move_left_takes_priority() {
        let both = InputSnapshot {
            move_left_held: true,
            move_right_held: true,
            ..InputSnapshot::default()
        };
        assert_eq!(both.horizontal_movement(), -1);

        let right = InputSnapshot {
            move_right_held: true,
            ..InputSnapshot::default()
        };
        assert_eq!(right.horizontal_movement(), 1);
        assert_eq!(InputSnapshot::default().horizontal_movement(), 0);
        assert!(InputSnapshot::default().is_idle());
    }

    #[test]
    fn test_default_timing() {
        assert_eq!(DEFAULT_FALL_INTERVAL_SECS, 0.5);
        assert_eq!(DEFAULT_FAST_FALL_INTERVAL_SECS, 0.1);
        assert_eq!(DEFAULT_INPUT_INTERVAL_SECS, 0.1);
        assert_eq!(STARTING_LEVEL, 1);
    }
}
