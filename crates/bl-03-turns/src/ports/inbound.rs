//! # Inbound Ports (Driving Ports)

use crate::domain::TurnAdvance;
use async_trait::async_trait;
use shared_bus::CancellationToken;
use shared_types::{GameResult, Turn};

/// Primary API for the turn manager.
#[async_trait]
pub trait TurnApi: Send + Sync {
    /// End the current turn and start the next one.
    ///
    /// ## Sequence
    ///
    /// 1. Publish `TurnEnded` for the current turn
    /// 2. Wait (bounded) for pattern effects to settle
    /// 3. Increment the turn
    /// 4. Wait again (bounded) for effects that started late
    /// 5. Publish `TurnStarted` for the new turn
    ///
    /// A timed-out wait is logged and the advance continues.
    ///
    /// ## Errors
    ///
    /// - `TurnOverflow`: the current turn is `Turn::MAX_NUMBER`; nothing is published
    /// - `Cancelled`: cancelled during a wait
    /// - `PublishFailed`: a turn notification could not be published
    async fn advance_turn(&self, cancel: &CancellationToken) -> GameResult<TurnAdvance>;

    fn current_turn(&self) -> Turn;
}
