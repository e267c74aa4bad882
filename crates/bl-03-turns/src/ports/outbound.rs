//! Driven Ports (SPI - Outbound Dependencies)

use async_trait::async_trait;
use shared_bus::CancellationToken;
use shared_types::GameResult;
use std::time::Duration;

/// Asynchronous effects the turn manager must let settle.
#[async_trait]
pub trait PendingEffects: Send + Sync {
    /// Number of effects currently running.
    fn in_flight(&self) -> usize;

    /// Resolve `Ok(true)` once every effect caused by notifications published
    /// before `TurnEnded(turn)` has finished.
    ///
    /// `Ok(false)` if `timeout` elapses first, `Err(Cancelled)` when `cancel`
    /// fires.
    async fn wait_for_turn_end(
        &self,
        turn: u32,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> GameResult<bool>;

    /// Resolve `Ok(true)` when nothing is in flight, `Ok(false)` if `timeout`
    /// elapses first, `Err(Cancelled)` when `cancel` fires.
    async fn wait_until_idle(
        &self,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> GameResult<bool>;
}
