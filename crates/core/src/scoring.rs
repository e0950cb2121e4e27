//! Scoring module - line-clear points, level thresholds and gravity speed
//!
//! - A clear of `n` rows at level `l` scores `floor(n^1.5 * 10 * 1.5^l)`.
//! - The level goes up once the score exceeds `floor(l^1.5 * 200)`.
//! - Gravity at level `l` is `base / 1.2^(l - 1)`, so level 1 falls at the
//!   base interval and level 0 (after a lost round) slightly slower.

/// Points per single cleared row at level 0.
pub const LINE_SCORE_BASE: f64 = 10.0;

/// Exponent applied to the number of rows cleared at once.
pub const LINE_COUNT_EXPONENT: f64 = 1.5;

/// Per-level score multiplier.
pub const LEVEL_SCORE_MULTIPLIER: f64 = 1.5;

/// Score threshold scale for leaving a level.
pub const LEVEL_THRESHOLD_BASE: f64 = 200.0;

/// Per-level gravity speed-up.
pub const FALL_SPEEDUP: f64 = 1.2;

/// Points for clearing `lines` rows at once at `level`.
///
/// ```
/// use brickfall_core::scoring::line_clear_score;
///
/// assert_eq!(line_clear_score(1, 1), 15);
/// assert_eq!(line_clear_score(2, 1), 42);
/// assert_eq!(line_clear_score(0, 7), 0);
/// ```
pub fn line_clear_score(lines: usize, level: u32) -> u64 {
    if lines == 0 {
        return 0;
    }
    let points = (lines as f64).powf(LINE_COUNT_EXPONENT)
        * LINE_SCORE_BASE
        * LEVEL_SCORE_MULTIPLIER.powi(level as i32);
    points.floor() as u64
}

/// Score that must be exceeded to leave `level`.
pub fn level_threshold(level: u32) -> u64 {
    ((level as f64).powf(1.5) * LEVEL_THRESHOLD_BASE).floor() as u64
}

/// Gravity interval at `level` for a given level-1 interval.
pub fn fall_interval(base: f64, level: u32) -> f64 {
    base / FALL_SPEEDUP.powi(level as i32 - 1)
}
