//! # Turn Manager
//!
//! Advances the turn counter between two notifications, letting pattern
//! effects settle in between. Advances are serialized: a second caller waits
//! until the first has published `TurnStarted` or failed.
//!
//! Cancellation is honoured until the increment. After it the advance is
//! committed and `TurnStarted` is always published.

use crate::config::TurnConfig;
use crate::domain::TurnAdvance;
use crate::ports::{PendingEffects, TurnApi};
use async_trait::async_trait;
use shared_bus::{CancellationToken, EventPublisher, GameEvent};
use shared_types::{GameError, GameResult, TimeSource, Turn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

/// The turn manager.
pub struct TurnManager {
    publisher: Arc<dyn EventPublisher>,
    effects: Arc<dyn PendingEffects>,
    time_source: Arc<dyn TimeSource>,
    config: TurnConfig,
    /// Current turn; watchers see every increment.
    current: watch::Sender<Turn>,
    advance_lock: Mutex<()>,
}

impl TurnManager {
    /// Start at turn 1.
    pub fn new(
        publisher: Arc<dyn EventPublisher>,
        effects: Arc<dyn PendingEffects>,
        time_source: Arc<dyn TimeSource>,
        config: TurnConfig,
    ) -> Self {
        let first = Turn::first(time_source.now());
        Self::starting_at(first, publisher, effects, time_source, config)
    }

    /// Resume from an existing turn.
    pub fn starting_at(
        turn: Turn,
        publisher: Arc<dyn EventPublisher>,
        effects: Arc<dyn PendingEffects>,
        time_source: Arc<dyn TimeSource>,
        config: TurnConfig,
    ) -> Self {
        let (current, _) = watch::channel(turn);
        Self {
            publisher,
            effects,
            time_source,
            config,
            current,
            advance_lock: Mutex::new(()),
        }
    }

    /// Observe turn changes.
    pub fn watch(&self) -> watch::Receiver<Turn> {
        self.current.subscribe()
    }

    async fn publish(&self, event: GameEvent) -> GameResult<()> {
        self.publisher.publish(event.clone()).await.map_err(|e| {
            warn!(event = event.name(), error = %e, "Turn notification failed");
            e.into_game_error(&event)
        })?;
        Ok(())
    }

    fn report(&self, stage: &'static str, timeout: Duration, settled: bool) -> bool {
        if settled {
            debug!(stage, "Pattern effects settled");
        } else {
            warn!(
                stage,
                ?timeout,
                in_flight = self.effects.in_flight(),
                "Pattern effects did not settle in time, proceeding"
            );
        }
        settled
    }
}

#[async_trait]
impl TurnApi for TurnManager {
    async fn advance_turn(&self, cancel: &CancellationToken) -> GameResult<TurnAdvance> {
        let _guard = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(GameError::Cancelled),
            guard = self.advance_lock.lock() => guard,
        };
        if cancel.is_cancelled() {
            return Err(GameError::Cancelled);
        }

        let previous = *self.current.borrow();
        let ended_at = self.time_source.now();
        // Fail on overflow before anything is published
        previous.next(ended_at)?;

        self.publish(GameEvent::TurnEnded {
            turn: previous,
            ended_at,
        })
        .await?;
        info!(turn = previous.number(), "Turn ended");

        let timeout = self.config.settle_timeout;
        let settled = self
            .effects
            .wait_for_turn_end(previous.number(), timeout, cancel)
            .await?;
        let settled = self.report("turn_end", timeout, settled);

        let current = previous.next(self.time_source.now())?;
        self.current.send_replace(current);

        // Committed: an interrupted recheck only counts as not settled
        tokio::task::yield_now().await;
        let timeout = self.config.recheck_timeout;
        let rechecked = match self.effects.wait_until_idle(timeout, cancel).await {
            Ok(rechecked) => self.report("turn_start", timeout, rechecked),
            Err(e) => {
                debug!(code = e.code(), turn = current.number(), "Recheck interrupted, starting turn");
                false
            }
        };

        self.publish(GameEvent::TurnStarted {
            turn: current,
            started_at: current.created_at(),
        })
        .await?;
        info!(turn = current.number(), settled, rechecked, "Turn started");

        Ok(TurnAdvance {
            previous,
            current,
            settled,
            rechecked,
        })
    }

    fn current_turn(&self) -> Turn {
        *self.current.borrow()
    }
}
