//! World generation configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest supported side length. Poses are packed with 16-bit coordinates.
pub const MAX_GRID_SIDE: i32 = 4096;

/// Grid dimensions and obstacle density.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Columns, border included.
    pub width: i32,
    /// Rows, border included.
    pub height: i32,
    /// Chance in percent (0-100) that an interior cell is an obstacle.
    pub obstacle_probability: u8,
    /// Seed for reproducible layouts. Entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 33,
            obstacle_probability: 1,
            seed: None,
        }
    }
}

impl WorldConfig {
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_obstacle_probability(mut self, percent: u8) -> Self {
        self.obstacle_probability = percent;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 3 || self.height < 3 {
            return Err(Error::InvalidConfig(format!(
                "grid must be at least 3x3, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_GRID_SIDE || self.height > MAX_GRID_SIDE {
            return Err(Error::InvalidConfig(format!(
                "grid sides are limited to {MAX_GRID_SIDE}, got {}x{}",
                self.width, self.height
            )));
        }
        if self.obstacle_probability > 100 {
            return Err(Error::InvalidConfig(format!(
                "obstacle probability must be 0-100, got {}",
                self.obstacle_probability
            )));
        }
        Ok(())
    }
}
