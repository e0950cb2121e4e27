//! Engine module - the tick-driven game state machine
//!
//! This module ties together the playfield, figures, the figure queue and
//! scoring. It owns every timer and all mutable game state; nothing changes
//! outside [`GameEngine::tick`] / [`GameEngine::tick_at`].
//!
//! Time is a monotonic clock in seconds. Each timer is an absolute threshold
//! and fires once the clock is strictly past it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::events::FieldEvent;
use crate::figure::Figure;
use crate::playfield::{Playfield, StampOutcome};
use crate::queue::FigureQueue;
use crate::scoring::{fall_interval, level_threshold, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::types::{Coordinate, InputSnapshot, STARTING_LEVEL};

/// Whether a figure is currently in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    NoActiveFigure,
    FigureActive,
}

/// Absolute timer thresholds (engine clock seconds) and the current gravity interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timers {
    pub next_fall: f64,
    pub next_fast_fall: f64,
    pub next_input: f64,
    /// Gravity interval for the current level.
    pub fall_interval: f64,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// A new figure entered play.
    pub spawned: bool,
    /// The current figure settled into the grid.
    pub locked: bool,
    pub lines_cleared: usize,
    pub leveled_up: bool,
    /// The round was lost this tick: the grid was emptied and score/level reset.
    pub lost: bool,
    /// Playfield deltas in the order they happened.
    pub events: Vec<FieldEvent>,
}

/// Complete engine state.
#[derive(Debug, Clone)]
pub struct GameEngine<R = SmallRng> {
    config: EngineConfig,
    playfield: Playfield,
    queue: FigureQueue<R>,
    current: Option<Figure>,
    /// Id of the current figure (or of the last one, once it settled).
    current_id: u32,
    /// Last id handed out.
    last_id: u32,
    score: u64,
    level: u32,
    clock: f64,
    timers: Timers,
}

impl GameEngine<SmallRng> {
    /// Engine with a seeded [`SmallRng`], for reproducible figure sequences.
    pub fn seeded(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine with an empty field, level 1 and score 0.
    ///
    /// No figure is in play until the first tick.
    pub fn new(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            playfield: Playfield::new(config.field_width, config.field_height),
            queue: FigureQueue::new(rng),
            current: None,
            current_id: 0,
            last_id: 0,
            score: 0,
            level: STARTING_LEVEL,
            clock: 0.0,
            timers: Timers {
                next_fall: 0.0,
                next_fast_fall: 0.0,
                next_input: 0.0,
                fall_interval: fall_interval(config.fall_interval, STARTING_LEVEL),
            },
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// Mutable grid access for setting up scenarios.
    pub fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.playfield
    }

    pub fn current(&self) -> Option<&Figure> {
        self.current.as_ref()
    }

    pub fn current_figure_id(&self) -> Option<u32> {
        self.current.map(|_| self.current_id)
    }

    /// The queued figure (position not yet chosen).
    pub fn next(&self) -> &Figure {
        self.queue.peek()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Engine clock in seconds.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn timers(&self) -> Timers {
        self.timers
    }

    pub fn phase(&self) -> Phase {
        match self.current {
            Some(_) => Phase::FigureActive,
            None => Phase::NoActiveFigure,
        }
    }

    /// Overwrite all timers, e.g. to resume from a recorded state.
    pub fn set_timers(&mut self, timers: Timers) {
        self.timers = timers;
    }

    /// Set score and level; the gravity interval follows the level.
    pub fn set_progress(&mut self, score: u64, level: u32) {
        self.score = score;
        self.level = level;
        self.update_fall_interval();
    }

    /// Put `figure` in play as-is (or remove the current figure).
    ///
    /// A new figure gets a fresh id.
    pub fn replace_current(&mut self, figure: Option<Figure>) {
        if figure.is_some() {
            self.current_id = self.issue_id();
        }
        self.current = figure;
    }

    /// Advance the clock by `elapsed` seconds and run one tick.
    pub fn tick(&mut self, elapsed: f64, input: InputSnapshot) -> TickOutcome {
        let now = self.clock + elapsed.max(0.0);
        self.tick_at(now, input)
    }

    /// Run one tick at absolute time `now`. The clock never runs backwards.
    ///
    /// Order within a tick: spawn if needed, gravity (with stamping, collapse
    /// and scoring), then rotate and move input.
    pub fn tick_at(&mut self, now: f64, input: InputSnapshot) -> TickOutcome {
        self.clock = self.clock.max(now);
        let now = self.clock;
        let mut out = TickOutcome::default();

        if self.current.is_none() {
            self.spawn(&mut out);
        }
        self.apply_gravity(now, input.drop_fast_held, &mut out);
        self.apply_input(now, input);

        out
    }

    fn issue_id(&mut self) -> u32 {
        self.last_id = self.last_id.wrapping_add(1);
        self.last_id
    }

    /// Promote the queued figure and place it just above the field at a
    /// random column that keeps it horizontally inside the walls.
    fn spawn(&mut self, out: &mut TickOutcome) {
        let mut figure = self.queue.draw();
        let bbox = figure.local_bounding_box();
        let width = self.playfield.width() as i32;
        let min_x = -bbox.x_min;
        let max_x = (width - 1 - bbox.x_max).max(min_x);
        let x = self.queue.rng_mut().random_range(min_x..=max_x);
        figure.set_position(Coordinate::new(x, self.playfield.height() as i32));

        let figure_id = self.issue_id();
        self.current_id = figure_id;
        self.current = Some(figure);

        debug!(figure_id, kind = %figure.kind(), x, "spawned figure");
        out.spawned = true;
        out.events.push(FieldEvent::Spawned {
            figure_id,
            kind: figure.kind(),
        });
    }

    fn apply_gravity(&mut self, now: f64, drop_fast: bool, out: &mut TickOutcome) {
        let Some(current) = self.current else {
            return;
        };

        let threshold = if drop_fast {
            self.timers.next_fast_fall
        } else {
            self.timers.next_fall
        };
        if now <= threshold {
            return;
        }

        // Both thresholds move together, whichever one fired.
        self.timers.next_fall = now + self.timers.fall_interval;
        self.timers.next_fast_fall = now + self.config.fast_fall_interval;

        let mut fallen = current;
        fallen.fall();
        if self.playfield.is_collision(&fallen) {
            self.lock(current, out);
        } else {
            self.current = Some(fallen);
        }

        self.collapse_and_score(out);
    }

    fn lock(&mut self, figure: Figure, out: &mut TickOutcome) {
        self.current = None;
        let figure_id = self.current_id;
        match self.playfield.stamp(&figure, figure_id) {
            StampOutcome::Placed(cells) => {
                out.locked = true;
                out.events.push(FieldEvent::Stamped {
                    figure_id,
                    kind: figure.kind(),
                    cells,
                });
            }
            StampOutcome::Overflow => self.lose(out),
        }
    }

    fn lose(&mut self, out: &mut TickOutcome) {
        info!(score = self.score, level = self.level, "round lost");
        self.playfield.clear();
        self.score = 0;
        self.level = 0;
        self.update_fall_interval();
        out.lost = true;
        out.events.push(FieldEvent::Cleared);
    }

    fn collapse_and_score(&mut self, out: &mut TickOutcome) {
        let events = &mut out.events;
        let cleared = self.playfield.collapse_filled_rows_with(|row| {
            trace!(row, "row removed");
            events.push(FieldEvent::RowRemoved { row });
        });
        out.lines_cleared += cleared;
        self.score = self
            .score
            .saturating_add(line_clear_score(cleared, self.level));

        if self.score > level_threshold(self.level) {
            self.level += 1;
            self.update_fall_interval();
            out.leveled_up = true;
            debug!(level = self.level, score = self.score, "level up");
        }
    }

    fn update_fall_interval(&mut self) {
        self.timers.fall_interval = fall_interval(self.config.fall_interval, self.level);
    }

    fn apply_input(&mut self, now: f64, input: InputSnapshot) {
        if now <= self.timers.next_input || self.current.is_none() {
            return;
        }

        if input.rotate_right_edge {
            self.try_rotate();
            self.timers.next_input = now + self.config.input_interval;
        }

        let movement = input.horizontal_movement();
        if movement != 0 {
            self.try_move(movement);
            self.timers.next_input = now + self.config.input_interval;
        }
    }

    /// Rotate a copy, push it back inside the side walls, and keep it if it fits.
    fn try_rotate(&mut self) -> bool {
        let Some(current) = self.current else {
            return false;
        };

        let mut rotated = current;
        rotated.rotate();
        let bbox = rotated.world_bounding_box();
        let width = self.playfield.width() as i32;
        if bbox.x_min < 0 {
            rotated.translate(-bbox.x_min, 0);
        }
        if bbox.x_max >= width {
            rotated.translate(-(bbox.x_max + 1 - width), 0);
        }

        if self.playfield.is_collision(&rotated) {
            return false;
        }
        self.current = Some(rotated);
        true
    }

    fn try_move(&mut self, dx: i32) -> bool {
        let Some(current) = self.current else {
            return false;
        };

        let mut moved = current;
        moved.translate(dx, 0);
        if self.playfield.is_collision(&moved) {
            return false;
        }
        self.current = Some(moved);
        true
    }

    /// Write the presentation view into `out`, reusing its allocations.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.playfield.width();
        out.height = self.playfield.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.playfield.cells());
        out.active = self.current.map(|figure| ActiveSnapshot {
            kind: figure.kind(),
            figure_id: self.current_id,
            bricks: figure.world_bricks(),
        });
        out.next = NextSnapshot::of(self.queue.peek());
        out.score = self.score;
        out.level = self.level;
        out.phase = self.phase();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}
