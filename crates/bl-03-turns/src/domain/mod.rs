//! Turn advancement results.

use serde::{Deserialize, Serialize};
use shared_types::Turn;

/// Outcome of one successful turn advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnAdvance {
    /// The turn that ended.
    pub previous: Turn,
    /// The turn that started.
    pub current: Turn,
    /// Pattern effects settled before the increment.
    pub settled: bool,
    /// No effect was still running after the increment.
    pub rechecked: bool,
}

impl TurnAdvance {
    /// Both waits finished before their timeouts.
    pub fn fully_settled(&self) -> bool {
        self.settled && self.rechecked
    }
}
