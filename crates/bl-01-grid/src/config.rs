//! Grid configuration.

use crate::domain::GridBounds;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid grid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("max_blocks must be between 1 and {area}, got {max_blocks}")]
    InvalidCapacity { max_blocks: usize, area: usize },
}

/// Grid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of columns (default: 10).
    pub width: i32,
    /// Number of rows (default: 10).
    pub height: i32,
    /// Upper limit on stored blocks. `None` means one per cell.
    pub max_blocks: Option<usize>,
}

impl GridConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            max_blocks: None,
        }
    }

    pub fn validate(&self) -> Result<(), GridConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GridConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if let Some(max_blocks) = self.max_blocks {
            let area = self.bounds().area();
            if max_blocks == 0 || max_blocks > area {
                return Err(GridConfigError::InvalidCapacity { max_blocks, area });
            }
        }
        Ok(())
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.width, self.height)
    }

    /// Effective block capacity.
    pub fn capacity(&self) -> usize {
        self.max_blocks.unwrap_or_else(|| self.bounds().area())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(10, 10)
    }
}
