//! Core rules engine - pure, deterministic, and testable
//!
//! This crate holds every game rule and all mutable game state. It has no
//! dependencies on terminals or I/O, so it runs the same headless, in tests
//! and behind the terminal front end.
//!
//! - **Deterministic**: the random source is injected; a seeded engine
//!   replays the same figures and spawn columns
//! - **Tick-driven**: all state changes happen inside [`GameEngine::tick`]
//!
//! # Module Structure
//!
//! - [`geometry`]: quarter-turn rotation about a pivot, bounding boxes
//! - [`figure`]: the seven figure templates and world-space queries
//! - [`playfield`]: the settled-brick grid, collision, stamping, row collapse
//! - [`queue`]: the next-figure preview and random generation
//! - [`scoring`]: line-clear points, level thresholds, gravity speed
//! - [`engine`]: timers, spawning, gravity, input and losing a round
//! - [`events`]: playfield deltas reported by each tick
//! - [`snapshot`]: read-only view for presentation layers
//!
//! # Example
//!
//! ```
//! use brickfall_core::{EngineConfig, GameEngine, Phase};
//! use brickfall_core::types::InputSnapshot;
//!
//! let mut engine = GameEngine::seeded(EngineConfig::default(), 7).unwrap();
//! assert_eq!(engine.phase(), Phase::NoActiveFigure);
//!
//! let outcome = engine.tick(0.0, InputSnapshot::default());
//! assert!(outcome.spawned);
//! assert_eq!(engine.current().unwrap().position().y, 20);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod figure;
pub mod geometry;
pub mod playfield;
pub mod queue;
pub mod scoring;
pub mod snapshot;

pub use brickfall_types as types;

pub use config::EngineConfig;
pub use engine::{GameEngine, Phase, TickOutcome, Timers};
pub use error::{ConfigError, GeometryError, InvalidFigureKind};
pub use events::FieldEvent;
pub use figure::{Figure, FigureShape};
pub use geometry::{bounding_box_of, rotate90, BoundingBox, Pivot};
pub use playfield::{Playfield, StampOutcome};
pub use queue::FigureQueue;
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
