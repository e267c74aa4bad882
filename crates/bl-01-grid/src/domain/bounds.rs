use serde::{Deserialize, Serialize};
use shared_types::{GameError, GameResult, Position};

/// Rectangular extent of a grid: `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub width: i32,
    pub height: i32,
}

impl GridBounds {
    /// Both dimensions must be positive; see `GridConfig::validate`.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    /// Number of cells.
    pub fn area(&self) -> usize {
        let w = usize::try_from(self.width).unwrap_or(0);
        let h = usize::try_from(self.height).unwrap_or(0);
        w.saturating_mul(h)
    }

    /// `Ok` when `position` lies inside, `OutOfBounds` otherwise.
    pub fn check(&self, position: Position) -> GameResult<()> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds {
                position,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::new(10, 10)
    }
}
