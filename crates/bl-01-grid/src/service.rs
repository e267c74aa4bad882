//! # Grid Service
//!
//! Command handlers for the grid subsystem.
//!
//! ## Architecture
//!
//! Each command:
//! 1. Checks cancellation, then takes the command lock
//! 2. Validates against the rules (no mutation on failure)
//! 3. Commits to the repository, which re-checks the invariants
//! 4. Publishes the notification while still holding the lock, so
//!    notifications leave in commit order

use crate::domain::commands::{MoveBlockCommand, PlaceBlockCommand, RemoveBlockCommand};
use crate::domain::rules;
use crate::domain::GridBounds;
use crate::ports::{BlockRepository, GridApi};
use async_trait::async_trait;
use shared_bus::{CancellationToken, EventPublisher, GameEvent, RemovalCause};
use shared_types::{Block, BlockId, GameError, GameResult, Position, TimeSource};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// The grid service.
pub struct GridService<R: BlockRepository> {
    /// Authoritative block storage.
    repository: Arc<R>,
    /// Outgoing notifications.
    publisher: Arc<dyn EventPublisher>,
    time_source: Arc<dyn TimeSource>,
    /// Serializes commands from validation through publication.
    command_lock: Mutex<()>,
}

impl<R: BlockRepository> GridService<R> {
    pub fn new(
        repository: Arc<R>,
        publisher: Arc<dyn EventPublisher>,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            repository,
            publisher,
            time_source,
            command_lock: Mutex::new(()),
        }
    }

    /// Wait for the command lock unless `cancel` fires first.
    async fn begin_command(&self, cancel: &CancellationToken) -> GameResult<MutexGuard<'_, ()>> {
        if cancel.is_cancelled() {
            return Err(GameError::Cancelled);
        }
        let guard = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(GameError::Cancelled),
            guard = self.command_lock.lock() => guard,
        };
        // Cancelled while queued behind another command
        if cancel.is_cancelled() {
            return Err(GameError::Cancelled);
        }
        Ok(guard)
    }

    /// Publish a notification for an already committed mutation.
    async fn notify(&self, event: GameEvent) -> GameResult<()> {
        match self.publisher.publish(event.clone()).await {
            Ok(receivers) => {
                debug!(event = event.name(), receivers, "Notification published");
                Ok(())
            }
            Err(e) => {
                warn!(
                    event = event.name(),
                    error = %e,
                    "Mutation committed but notification failed"
                );
                Err(e.into_game_error(&event))
            }
        }
    }

    fn removed_event(block: &Block, cause: RemovalCause, now: shared_types::Timestamp) -> GameEvent {
        GameEvent::BlockRemoved {
            block_id: block.id(),
            block_type: block.block_type(),
            position: block.position(),
            cause,
            removed_at: now,
        }
    }
}

#[async_trait]
impl<R: BlockRepository + 'static> GridApi for GridService<R> {
    async fn place_block(
        &self,
        command: PlaceBlockCommand,
        cancel: &CancellationToken,
    ) -> GameResult<Block> {
        let _guard = self.begin_command(cancel).await?;

        if let Err(e) = rules::validate_placement(&command, self.repository.as_ref()) {
            debug!(position = %command.position, code = e.code(), "Placement rejected");
            return Err(e);
        }

        let now = self.time_source.now();
        let block = match command.block_id {
            Some(id) => Block::with_id(id, command.block_type, command.position, now),
            None => Block::new(command.block_type, command.position, now),
        };
        self.repository.add(block.clone())?;

        info!(
            block_id = %block.id(),
            block_type = %block.block_type(),
            position = %block.position(),
            "Block placed"
        );

        self.notify(GameEvent::BlockPlaced {
            block: block.clone(),
        })
        .await?;
        Ok(block)
    }

    async fn move_block(
        &self,
        command: MoveBlockCommand,
        cancel: &CancellationToken,
    ) -> GameResult<Block> {
        let _guard = self.begin_command(cancel).await?;

        let current = match rules::validate_move(&command, self.repository.as_ref()) {
            Ok(block) => block,
            Err(e) => {
                debug!(block_id = %command.block_id, to = %command.to, code = e.code(), "Move rejected");
                return Err(e);
            }
        };

        let now = self.time_source.now();
        let moved = current.move_to(command.to, now);
        self.repository.update(moved.clone())?;

        info!(
            block_id = %moved.id(),
            from = %current.position(),
            to = %moved.position(),
            "Block moved"
        );

        self.notify(GameEvent::BlockMoved {
            block_id: moved.id(),
            block_type: moved.block_type(),
            from: current.position(),
            to: moved.position(),
            moved_at: now,
        })
        .await?;
        Ok(moved)
    }

    async fn remove_block(
        &self,
        command: RemoveBlockCommand,
        cancel: &CancellationToken,
    ) -> GameResult<Block> {
        let _guard = self.begin_command(cancel).await?;

        let target = match rules::validate_removal(&command, self.repository.as_ref()) {
            Ok(block) => block,
            Err(e) => {
                debug!(command = ?command, code = e.code(), "Removal rejected");
                return Err(e);
            }
        };

        let removed = self.repository.remove(target.id())?;
        let now = self.time_source.now();

        info!(
            block_id = %removed.id(),
            position = %removed.position(),
            "Block removed"
        );

        self.notify(Self::removed_event(&removed, RemovalCause::Command, now))
            .await?;
        Ok(removed)
    }

    async fn clear_blocks(
        &self,
        expected: &[Block],
        cancel: &CancellationToken,
    ) -> GameResult<Vec<Block>> {
        let _guard = self.begin_command(cancel).await?;

        let stored = rules::validate_bulk_removal(expected, self.repository.as_ref())?;
        let ids: Vec<BlockId> = stored.iter().map(Block::id).collect();
        let removed = self.repository.remove_many(&ids)?;
        let now = self.time_source.now();

        info!(cleared = removed.len(), "Blocks cleared");

        // Publish every notification even if one fails; report the first failure
        let mut first_failure = None;
        for block in &removed {
            let event = Self::removed_event(block, RemovalCause::PatternCleared, now);
            if let Err(e) = self.notify(event).await {
                first_failure.get_or_insert(e);
            }
        }
        match first_failure {
            Some(e) => Err(e),
            None => Ok(removed),
        }
    }

    fn get_block(&self, id: BlockId) -> GameResult<Block> {
        self.repository
            .get_by_id(id)?
            .ok_or(GameError::BlockNotFound { block_id: id })
    }

    fn block_at(&self, position: Position) -> GameResult<Option<Block>> {
        self.repository.get_at_position(position)
    }

    fn blocks(&self) -> GameResult<Vec<Block>> {
        self.repository.all()
    }

    fn block_count(&self) -> GameResult<usize> {
        self.repository.count()
    }

    fn bounds(&self) -> GridBounds {
        self.repository.bounds()
    }
}
