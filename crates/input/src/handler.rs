//! Held-key tracking for terminal environments.
//!
//! The engine wants level-triggered state for move and fast-drop, and an
//! edge for rotate. Terminals may or may not report key releases. Without
//! them, a held key that sees no repeat within the release timeout counts as
//! released. With them, keys stay held until their release event arrives.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::map::intent_for_key;
use crate::types::{InputSnapshot, Intent};

// Terminal auto-repeat usually fires faster than this after the initial delay.
const DEFAULT_KEY_RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

/// Folds key presses and releases into per-tick [`InputSnapshot`]s.
#[derive(Debug, Clone)]
pub struct InputHandler {
    left: Option<Instant>,
    right: Option<Instant>,
    drop_fast: Option<Instant>,
    /// Set by a rotate press, cleared by the next snapshot.
    rotate_pending: bool,
    /// `None` when the terminal reports key releases.
    key_release_timeout: Option<Duration>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            left: None,
            right: None,
            drop_fast: None,
            rotate_pending: false,
            key_release_timeout: Some(DEFAULT_KEY_RELEASE_TIMEOUT),
        }
    }

    /// Handler for a terminal that does (`true`) or does not report key releases.
    pub fn for_terminal(reports_releases: bool) -> Self {
        if reports_releases {
            Self::new().without_key_release_timeout()
        } else {
            Self::new()
        }
    }

    pub fn with_key_release_timeout(mut self, timeout: Duration) -> Self {
        self.key_release_timeout = Some(timeout);
        self
    }

    /// Keys stay held until [`handle_key_release`](Self::handle_key_release).
    pub fn without_key_release_timeout(mut self) -> Self {
        self.key_release_timeout = None;
        self
    }

    pub fn key_release_timeout(&self) -> Option<Duration> {
        self.key_release_timeout
    }

    /// Record a press (or auto-repeat) of `code` at `now`. Returns the intent it maps to.
    pub fn handle_key_press(&mut self, code: KeyCode, now: Instant) -> Option<Intent> {
        let intent = intent_for_key(code)?;
        match intent {
            Intent::MoveLeft => self.left = Some(now),
            Intent::MoveRight => self.right = Some(now),
            Intent::DropFast => self.drop_fast = Some(now),
            Intent::RotateRight => self.rotate_pending = true,
        }
        Some(intent)
    }

    /// Terminal auto-repeat of a held key: keeps it held, never re-triggers rotate.
    pub fn handle_key_repeat(&mut self, code: KeyCode, now: Instant) {
        match intent_for_key(code) {
            Some(Intent::RotateRight) | None => {}
            Some(_) => {
                self.handle_key_press(code, now);
            }
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match intent_for_key(code) {
            Some(Intent::MoveLeft) => self.left = None,
            Some(Intent::MoveRight) => self.right = None,
            Some(Intent::DropFast) => self.drop_fast = None,
            Some(Intent::RotateRight) | None => {}
        }
    }

    /// Input state for the tick at `now`. Consumes a pending rotate edge.
    pub fn snapshot(&mut self, now: Instant) -> InputSnapshot {
        if let Some(timeout) = self.key_release_timeout {
            for held in [&mut self.left, &mut self.right, &mut self.drop_fast] {
                if held.is_some_and(|since| now.saturating_duration_since(since) > timeout) {
                    *held = None;
                }
            }
        }

        InputSnapshot {
            drop_fast_held: self.drop_fast.is_some(),
            rotate_right_edge: std::mem::take(&mut self.rotate_pending),
            move_left_held: self.left.is_some(),
            move_right_held: self.right.is_some(),
        }
    }

    pub fn reset(&mut self) {
        self.left = None;
        self.right = None;
        self.drop_fast = None;
        self.rotate_pending = false;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
