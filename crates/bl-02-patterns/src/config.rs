//! Pattern processing configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternConfigError {
    #[error("min_match_size must be at least 2, got {0}")]
    MatchTooSmall(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Smallest connected group that counts as a match (default: 3).
    pub min_match_size: usize,
}

impl PatternConfig {
    /// A single block is never a pattern.
    pub fn validate(&self) -> Result<(), PatternConfigError> {
        if self.min_match_size < 2 {
            return Err(PatternConfigError::MatchTooSmall(self.min_match_size));
        }
        Ok(())
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self { min_match_size: 3 }
    }
}
