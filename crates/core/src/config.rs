//! Engine configuration
//!
//! Defaults match the classic 20 x 10 board. Configurations can be built in
//! code or parsed from JSON; either way [`EngineConfig::validate`] must pass
//! before a session is created.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{BOARD_COLS, BOARD_ROWS, DEFAULT_FALL_ACCELERATION, PIECE_CELLS};

/// Largest supported board dimension
pub const MAX_DIMENSION: usize = 255;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board {rows}x{cols} is too small; both dimensions must be at least {min}")]
    BoardTooSmall { rows: usize, cols: usize, min: usize },
    #[error("board {rows}x{cols} is too large; dimensions are capped at {max}")]
    BoardTooLarge { rows: usize, cols: usize, max: usize },
    #[error("fall acceleration must be a positive finite number, got {0}")]
    InvalidAcceleration(f32),
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    /// Chunk fall acceleration during line clears, in rows/s²
    pub fall_acceleration: f32,
    /// Seed for the default piece RNG
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS as usize,
            cols: BOARD_COLS as usize,
            fall_acceleration: DEFAULT_FALL_ACCELERATION,
            seed: 1,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < PIECE_CELLS || self.cols < PIECE_CELLS {
            return Err(ConfigError::BoardTooSmall {
                rows: self.rows,
                cols: self.cols,
                min: PIECE_CELLS,
            });
        }
        if self.rows > MAX_DIMENSION || self.cols > MAX_DIMENSION {
            return Err(ConfigError::BoardTooLarge {
                rows: self.rows,
                cols: self.cols,
                max: MAX_DIMENSION,
            });
        }
        if !self.fall_acceleration.is_finite() || self.fall_acceleration <= 0.0 {
            return Err(ConfigError::InvalidAcceleration(self.fall_acceleration));
        }
        Ok(())
    }

    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!((config.rows, config.cols), (20, 10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "cols": 8, "seed": 99 }"#).unwrap();
        assert_eq!(config.rows, 20);
        assert_eq!(config.cols, 8);
        assert_eq!(config.seed, 99);
    }

    #[test]
    fn test_rejects_degenerate_boards() {
        let small = EngineConfig {
            cols: 3,
            ..EngineConfig::default()
        };
        assert!(matches!(small.validate(), Err(ConfigError::BoardTooSmall { .. })));

        let huge = EngineConfig {
            rows: 1000,
            ..EngineConfig::default()
        };
        assert!(matches!(huge.validate(), Err(ConfigError::BoardTooLarge { .. })));
    }

    #[test]
    fn test_rejects_bad_acceleration() {
        let err = EngineConfig::from_json_str(r#"{ "fall_acceleration": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAcceleration(_)));
        assert!(matches!(
            EngineConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
