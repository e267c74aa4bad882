//! # Pattern Processor
//!
//! Reacts to grid notifications, detects matches at the affected position
//! and clears them through the grid API.
//!
//! ## Flow
//!
//! ```text
//! Grid ──BlockPlaced/BlockMoved──→ PatternProcessor
//!                                     │ find_match
//!                                     ↓
//!                         GridApi::clear_blocks ──BlockRemoved(PatternCleared)──→ bus
//!                                     ↓
//!                              PatternMatched ──→ bus
//! ```
//!
//! Every notification is tracked by the `PatternTracker` from the moment it
//! is received until its effects are published. The processor also reads
//! `TurnEnded` and acknowledges it to the tracker, so the turn manager can
//! wait until everything published before the turn ended has been handled.

use crate::config::PatternConfig;
use crate::domain::{find_match, PatternListener, PatternMatch, PatternTracker};
use bl_01_grid::GridApi;
use shared_bus::{
    source, CancellationToken, EventFilter, EventPublisher, EventTopic, GameEvent, Subscription,
};
use shared_types::{Block, BlockId, GameError, GameResult, Position, TimeSource};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Subscription filter for the processor: grid events raised by commands and
/// turn notifications.
///
/// Removals published by the processor itself carry the pattern source and
/// are excluded.
pub fn trigger_filter() -> EventFilter {
    EventFilter {
        topics: vec![EventTopic::Grid, EventTopic::Turn],
        source_subsystems: vec![source::GRID, source::TURNS],
    }
}

/// The pattern processor.
pub struct PatternProcessor {
    grid: Arc<dyn GridApi>,
    publisher: Arc<dyn EventPublisher>,
    time_source: Arc<dyn TimeSource>,
    tracker: PatternTracker,
    config: PatternConfig,
}

impl PatternProcessor {
    pub fn new(
        grid: Arc<dyn GridApi>,
        publisher: Arc<dyn EventPublisher>,
        time_source: Arc<dyn TimeSource>,
        tracker: PatternTracker,
        config: PatternConfig,
    ) -> Self {
        Self {
            grid,
            publisher,
            time_source,
            tracker,
            config,
        }
    }

    pub fn tracker(&self) -> &PatternTracker {
        &self.tracker
    }

    /// Handle one notification.
    ///
    /// Only placements and moves trigger detection, and only while the
    /// notified block still sits where the notification says. `TurnEnded` is
    /// acknowledged to the tracker.
    pub async fn handle_event(
        &self,
        event: &GameEvent,
        cancel: &CancellationToken,
    ) -> GameResult<Option<PatternMatch>> {
        let (block_id, position) = match event {
            GameEvent::BlockPlaced { block } => (block.id(), block.position()),
            GameEvent::BlockMoved { block_id, to, .. } => (*block_id, *to),
            GameEvent::TurnEnded { turn, .. } => {
                debug!(turn = turn.number(), "Grid notifications handled through turn end");
                self.tracker.acknowledge_turn_end(turn.number());
                return Ok(None);
            }
            _ => return Ok(None),
        };

        let still_there = self
            .grid
            .block_at(position)?
            .is_some_and(|b| b.id() == block_id);
        if !still_there {
            debug!(%block_id, %position, "Trigger block no longer in place, skipping");
            return Ok(None);
        }

        self.process_trigger(position, cancel).await
    }

    /// Detect and clear a match containing `trigger`.
    pub async fn process_trigger(
        &self,
        trigger: Position,
        cancel: &CancellationToken,
    ) -> GameResult<Option<PatternMatch>> {
        let _activity = self.tracker.begin();

        let snapshot = self.grid.blocks()?;
        let Some(found) = find_match(&snapshot, trigger, self.config.min_match_size) else {
            return Ok(None);
        };

        // Keep the trigger block when the group is everything on the grid
        let retain_trigger = found.len() >= snapshot.len();
        let to_clear: Vec<Block> = found
            .blocks
            .iter()
            .filter(|b| !retain_trigger || b.position() != trigger)
            .cloned()
            .collect();
        let clear_ids: Vec<BlockId> = to_clear.iter().map(Block::id).collect();

        // Fails without removing anything if a block moved since the snapshot
        match self.grid.clear_blocks(&to_clear, cancel).await {
            Ok(_) => {}
            // Committed; only the removal notifications were lost
            Err(GameError::PublishFailed { event, reason }) => {
                warn!(%event, %reason, "Cleared blocks without notifying");
            }
            // The grid changed under the snapshot; the change's own
            // notification triggers a fresh detection
            Err(e @ (GameError::PositionEmpty { .. } | GameError::BlockNotFound { .. })) => {
                debug!(%trigger, code = e.code(), "Match is stale, nothing cleared");
                return Ok(None);
            }
            Err(e) => return Err(e),
        }

        info!(
            block_type = %found.block_type,
            trigger = %trigger,
            matched = found.len(),
            cleared = clear_ids.len(),
            retain_trigger,
            "Pattern matched"
        );

        let event = GameEvent::PatternMatched {
            block_type: found.block_type,
            trigger,
            positions: to_clear.iter().map(|b| b.position()).collect(),
            block_ids: clear_ids,
            matched_at: self.time_source.now(),
        };
        if let Err(e) = self.publisher.publish(event.clone()).await {
            warn!(error = %e, "PatternMatched notification failed");
            return Err(e.into_game_error(&event));
        }

        Ok(Some(found))
    }

    /// Process notifications from `subscription` until cancelled or the bus
    /// closes. The processor is attached to the tracker while this runs.
    pub async fn run(&self, subscription: Subscription, cancel: CancellationToken) {
        let listener = self.tracker.attach();
        self.process(subscription, cancel, listener).await
    }

    /// Run on a task owned by the caller.
    ///
    /// Attaches before returning, so a turn advance issued right after this
    /// call already waits for the new task.
    pub fn spawn(
        self: Arc<Self>,
        subscription: Subscription,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let listener = self.tracker.attach();
        tokio::spawn(async move { self.process(subscription, cancel, listener).await })
    }

    async fn process(
        &self,
        mut subscription: Subscription,
        cancel: CancellationToken,
        _listener: PatternListener,
    ) {
        info!(min_match_size = self.config.min_match_size, "Pattern processor started");

        while let Some(event) = subscription.recv_until_cancelled(&cancel).await {
            let _activity = self.tracker.begin();
            match self.handle_event(&event, &cancel).await {
                Ok(_) => {}
                Err(GameError::Cancelled) => break,
                Err(e) => {
                    warn!(event = event.name(), code = e.code(), error = %e, "Pattern processing failed");
                }
            }
        }

        info!("Pattern processor stopped");
    }
}
