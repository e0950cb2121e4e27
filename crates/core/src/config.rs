//! Engine configuration.
//!
//! Deserializes from partial documents: any missing field takes its default.
//!
//! ```
//! use brickfall_core::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert_eq!((config.field_width, config.field_height), (10, 20));
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    DEFAULT_FALL_INTERVAL_SECS, DEFAULT_FAST_FALL_INTERVAL_SECS, DEFAULT_FIELD_HEIGHT,
    DEFAULT_FIELD_WIDTH, DEFAULT_INPUT_INTERVAL_SECS, MIN_FIELD_WIDTH,
};

/// Field dimensions and timing for a [`crate::GameEngine`]. Intervals are seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub field_width: usize,
    pub field_height: usize,
    /// Gravity interval at level 1; other levels are derived from it.
    pub fall_interval: f64,
    /// Gravity interval while fast-drop is held.
    pub fast_fall_interval: f64,
    /// Minimum time between accepted rotate/move inputs.
    pub input_interval: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            fall_interval: DEFAULT_FALL_INTERVAL_SECS,
            fast_fall_interval: DEFAULT_FAST_FALL_INTERVAL_SECS,
            input_interval: DEFAULT_INPUT_INTERVAL_SECS,
        }
    }
}

impl EngineConfig {
    /// Config with a custom field size and default timing.
    pub fn with_field(width: usize, height: usize) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width < MIN_FIELD_WIDTH {
            return Err(ConfigError::FieldTooNarrow {
                got: self.field_width,
                min: MIN_FIELD_WIDTH,
            });
        }
        if self.field_height == 0 {
            return Err(ConfigError::EmptyField);
        }
        for (name, value) in [
            ("fall_interval", self.fall_interval),
            ("fast_fall_interval", self.fast_fall_interval),
            ("input_interval", self.input_interval),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::BadInterval { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "field_width": 12, "fall_interval": 0.8 }"#).unwrap();
        assert_eq!(config.field_width, 12);
        assert_eq!(config.field_height, DEFAULT_FIELD_HEIGHT);
        assert_eq!(config.fall_interval, 0.8);
        assert_eq!(config.input_interval, DEFAULT_INPUT_INTERVAL_SECS);
    }

    #[test]
    fn test_rejects_narrow_field() {
        assert_eq!(
            EngineConfig::with_field(3, 20).validate(),
            Err(ConfigError::FieldTooNarrow { got: 3, min: 4 })
        );
        assert!(EngineConfig::with_field(4, 1).validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_field() {
        assert_eq!(
            EngineConfig::with_field(10, 0).validate(),
            Err(ConfigError::EmptyField)
        );
    }

    #[test]
    fn test_rejects_bad_intervals() {
        let config = EngineConfig {
            fast_fall_interval: 0.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadInterval {
                name: "fast_fall_interval",
                ..
            })
        ));

        let config = EngineConfig {
            input_interval: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
