//! # Command Gateway
//!
//! Front door for player commands. Delegates to the grid and turn ports and
//! records the outcome of every command in the metrics registry.

use bl_01_grid::{GridApi, MoveBlockCommand, PlaceBlockCommand, RemoveBlockCommand};
use bl_03_turns::{TurnAdvance, TurnApi};
use game_telemetry::{
    record_command, time_histogram, BLOCKS_ON_GRID, COMMAND_DURATION, CURRENT_TURN,
    SETTLE_TIMEOUTS, TURN_ADVANCES,
};
use shared_bus::CancellationToken;
use shared_types::{Block, BlockId, GameResult, Position, Turn};
use std::sync::Arc;
use tracing::debug;

/// Instrumented access to the grid and turn subsystems.
#[derive(Clone)]
pub struct CommandGateway {
    grid: Arc<dyn GridApi>,
    turns: Arc<dyn TurnApi>,
}

impl CommandGateway {
    pub fn new(grid: Arc<dyn GridApi>, turns: Arc<dyn TurnApi>) -> Self {
        Self { grid, turns }
    }

    pub async fn place_block(
        &self,
        command: PlaceBlockCommand,
        cancel: &CancellationToken,
    ) -> GameResult<Block> {
        let _timer = time_histogram!(COMMAND_DURATION);
        let result = self.grid.place_block(command, cancel).await;
        self.finish("place", &result);
        result
    }

    pub async fn move_block(
        &self,
        command: MoveBlockCommand,
        cancel: &CancellationToken,
    ) -> GameResult<Block> {
        let _timer = time_histogram!(COMMAND_DURATION);
        let result = self.grid.move_block(command, cancel).await;
        self.finish("move", &result);
        result
    }

    pub async fn remove_block(
        &self,
        command: RemoveBlockCommand,
        cancel: &CancellationToken,
    ) -> GameResult<Block> {
        let _timer = time_histogram!(COMMAND_DURATION);
        let result = self.grid.remove_block(command, cancel).await;
        self.finish("remove", &result);
        result
    }

    /// End the current turn and start the next one.
    pub async fn advance_turn(&self, cancel: &CancellationToken) -> GameResult<TurnAdvance> {
        let result = self.turns.advance_turn(cancel).await;
        match &result {
            Ok(advance) => {
                TURN_ADVANCES.with_label_values(&["ok"]).inc();
                CURRENT_TURN.set(f64::from(advance.current.number()));
                // One count per wait that gave up
                let timeouts = u8::from(!advance.settled) + u8::from(!advance.rechecked);
                SETTLE_TIMEOUTS.inc_by(f64::from(timeouts));
            }
            Err(e) => TURN_ADVANCES.with_label_values(&[e.code()]).inc(),
        }
        result
    }

    pub fn get_block(&self, id: BlockId) -> GameResult<Block> {
        self.grid.get_block(id)
    }

    pub fn block_at(&self, position: Position) -> GameResult<Option<Block>> {
        self.grid.block_at(position)
    }

    pub fn blocks(&self) -> GameResult<Vec<Block>> {
        self.grid.blocks()
    }

    pub fn current_turn(&self) -> Turn {
        self.turns.current_turn()
    }

    fn finish(&self, kind: &str, result: &GameResult<Block>) {
        let outcome = match result {
            Ok(_) => "ok",
            Err(e) => e.code(),
        };
        record_command(kind, outcome);
        debug!(kind, outcome, "Command handled");

        // Pattern clears change the count without a command; refresh on every command
        if let Ok(count) = self.grid.block_count() {
            BLOCKS_ON_GRID.set(count as f64);
        }
    }
}
