//! # Pattern Effects Adapter
//!
//! Implements the turn manager's `PendingEffects` port (bl-03) on top of the
//! pattern processor's activity tracker (bl-02).

use async_trait::async_trait;
use bl_02_patterns::PatternTracker;
use bl_03_turns::PendingEffects;
use shared_bus::CancellationToken;
use shared_types::GameResult;
use std::time::Duration;

/// Adapter exposing pattern processing as pending turn effects.
#[derive(Clone)]
pub struct PatternEffectsAdapter {
    tracker: PatternTracker,
}

impl PatternEffectsAdapter {
    pub fn new(tracker: PatternTracker) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl PendingEffects for PatternEffectsAdapter {
    fn in_flight(&self) -> usize {
        self.tracker.in_flight()
    }

    async fn wait_for_turn_end(
        &self,
        turn: u32,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> GameResult<bool> {
        self.tracker.wait_for_turn_end(turn, timeout, cancel).await
    }

    async fn wait_until_idle(
        &self,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> GameResult<bool> {
        self.tracker.wait_until_idle(timeout, cancel).await
    }
}
