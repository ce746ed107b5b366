use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::MAX_PIXEL_EXTENT;

pub const MAX_TICKS_PER_SECOND: u32 = 1000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least 1x1 cells, got {width}x{height}")]
    EmptyBoard { width: u16, height: u16 },

    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("board is {width}x{height} pixels, each side must be at most {max}")]
    BoardTooLarge { width: u64, height: u64, max: i32 },

    #[error("tick rate must be between 1 and 1000 ticks per second, got {0}")]
    TickRate(u32),
}

/// Fixed game settings. Board dimensions are in cells, `cell_size` in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: u16,
    pub board_height: u16,
    pub cell_size: u16,
    pub ticks_per_second: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 32,
            board_height: 24,
            cell_size: 20,
            ticks_per_second: 10,
        }
    }
}

impl GameConfig {
    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let width = self.board_width as u64 * self.cell_size as u64;
        let height = self.board_height as u64 * self.cell_size as u64;
        if width > MAX_PIXEL_EXTENT as u64 || height > MAX_PIXEL_EXTENT as u64 {
            return Err(ConfigError::BoardTooLarge { width, height, max: MAX_PIXEL_EXTENT });
        }
        if self.ticks_per_second == 0 || self.ticks_per_second > MAX_TICKS_PER_SECOND {
            return Err(ConfigError::TickRate(self.ticks_per_second));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}
