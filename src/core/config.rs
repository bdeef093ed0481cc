//! Session configuration
//!
//! One explicit config struct per session, validated once at construction.
//! Board size, win value and spawn odds all live here instead of in
//! process-wide state.

use thiserror::Error;

use crate::types::{
    DEFAULT_FOUR_CHANCE_PCT, DEFAULT_HEIGHT, DEFAULT_TRAVEL_MS, DEFAULT_WIDTH, DEFAULT_WIN_VALUE,
};

/// Fatal configuration errors, raised before any game state exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board {width}x{height} is too small, both sides must be at least 2")]
    BoardTooSmall { width: u8, height: u8 },
    #[error("win value {0} must be a power of two of at least 8")]
    BadWinValue(u32),
    #[error("four-tile spawn chance {0}% exceeds 100%")]
    BadSpawnChance(u8),
}

/// Per-session game parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    /// First tile value that ends the game as a win
    pub win_value: u32,
    /// Chance (in percent) that a spawned tile is a 4 instead of a 2
    pub four_chance_pct: u8,
    /// Slide animation duration in milliseconds. Presentation only; the
    /// engine never reads it.
    pub travel_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            win_value: DEFAULT_WIN_VALUE,
            four_chance_pct: DEFAULT_FOUR_CHANCE_PCT,
            travel_ms: DEFAULT_TRAVEL_MS,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 2 || self.height < 2 {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.win_value < 8 || !self.win_value.is_power_of_two() {
            return Err(ConfigError::BadWinValue(self.win_value));
        }
        if self.four_chance_pct > 100 {
            return Err(ConfigError::BadSpawnChance(self.four_chance_pct));
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_tiny_board() {
        let config = GameConfig {
            width: 1,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooSmall {
                width: 1,
                height: 4
            })
        );
    }

    #[test]
    fn test_rejects_non_power_of_two_win_value() {
        for bad in [0, 2, 4, 100, 2047] {
            let config = GameConfig {
                win_value: bad,
                ..GameConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::BadWinValue(bad)));
        }
    }

    #[test]
    fn test_rejects_spawn_chance_over_100() {
        let config = GameConfig {
            four_chance_pct: 101,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BadSpawnChance(101)));
    }
}
