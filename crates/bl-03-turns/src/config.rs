//! Turn manager configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnConfigError {
    #[error("{name} must not exceed {max:?}, got {value:?}")]
    TimeoutTooLong {
        name: &'static str,
        value: Duration,
        max: Duration,
    },
}

/// Bounded waits used while advancing a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnConfig {
    /// Wait for pattern effects after `TurnEnded` (default: 3s).
    pub settle_timeout: Duration,
    /// Second wait after the increment, for late effects (default: 1s).
    pub recheck_timeout: Duration,
}

impl TurnConfig {
    /// Upper limit for either wait.
    pub const MAX_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn validate(&self) -> Result<(), TurnConfigError> {
        for (name, value) in [
            ("settle_timeout", self.settle_timeout),
            ("recheck_timeout", self.recheck_timeout),
        ] {
            if value > Self::MAX_TIMEOUT {
                return Err(TurnConfigError::TimeoutTooLong {
                    name,
                    value,
                    max: Self::MAX_TIMEOUT,
                });
            }
        }
        Ok(())
    }
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            settle_timeout: Duration::from_secs(3),
            recheck_timeout: Duration::from_secs(1),
        }
    }
}
