//! Error types for the engine crate.
//!
//! Losing a round is not an error; see [`crate::engine::TickOutcome::lost`].

pub use crate::types::InvalidFigureKind;

/// Geometry invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("bounding box requested over zero points")]
    EmptyInput,
}

/// A rejected [`crate::EngineConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("field width {got} is narrower than the widest figure ({min})")]
    FieldTooNarrow { got: usize, min: usize },
    #[error("field height must be positive")]
    EmptyField,
    #[error("{name} must be a positive number of seconds, got {value}")]
    BadInterval { name: &'static str, value: f64 },
}
