//! # Inbound Ports (Driving Ports)
//!
//! The primary API of the grid subsystem. Command operations mutate the grid
//! and publish a notification after each successful commit; queries only read.

use crate::domain::commands::{MoveBlockCommand, PlaceBlockCommand, RemoveBlockCommand};
use crate::domain::GridBounds;
use async_trait::async_trait;
use shared_bus::CancellationToken;
use shared_types::{Block, BlockId, GameResult, Position};

/// Primary API for the grid subsystem.
///
/// Every command is atomic: when it fails the grid is unchanged and nothing
/// is published. A cancellation observed before the commit yields
/// `Cancelled`; once committed the command runs to completion.
#[async_trait]
pub trait GridApi: Send + Sync {
    /// Place a new block.
    ///
    /// ## Errors
    ///
    /// Checked in this order, first failure wins:
    /// - `NotDirectlyPlaceable`: combination-only type
    /// - `OutOfBounds`: position outside the grid
    /// - `CapacityExceeded`: the grid is full
    /// - `PositionOccupied`: another block is at the position
    /// - `IdCollision`: the pre-assigned id is in use
    async fn place_block(
        &self,
        command: PlaceBlockCommand,
        cancel: &CancellationToken,
    ) -> GameResult<Block>;

    /// Move a block to another empty cell.
    ///
    /// ## Errors
    ///
    /// - `BlockNotFound`, `NoOpMove`, `OutOfBounds`, `PositionOccupied`
    async fn move_block(
        &self,
        command: MoveBlockCommand,
        cancel: &CancellationToken,
    ) -> GameResult<Block>;

    /// Remove one block, returning it.
    ///
    /// ## Errors
    ///
    /// - `PositionEmpty` / `BlockNotFound`: nothing to remove
    /// - `MinimumPopulation`: it is the last block on the grid
    async fn remove_block(
        &self,
        command: RemoveBlockCommand,
        cancel: &CancellationToken,
    ) -> GameResult<Block>;

    /// Remove a set of blocks cleared by a pattern match, atomically.
    ///
    /// `expected` is the caller's view of the blocks. Nothing is removed
    /// unless every one still sits at its expected position. Publishes one
    /// `BlockRemoved` per block with the pattern-cleared cause.
    ///
    /// ## Errors
    ///
    /// - `BlockNotFound`: a block is gone
    /// - `PositionEmpty`: a block moved away from its expected position
    /// - `MinimumPopulation`: the grid would be left empty
    async fn clear_blocks(
        &self,
        expected: &[Block],
        cancel: &CancellationToken,
    ) -> GameResult<Vec<Block>>;

    /// Look up a block by id; `BlockNotFound` when absent.
    fn get_block(&self, id: BlockId) -> GameResult<Block>;

    fn block_at(&self, position: Position) -> GameResult<Option<Block>>;

    /// Snapshot of every block in row-major order.
    fn blocks(&self) -> GameResult<Vec<Block>>;

    fn block_count(&self) -> GameResult<usize>;

    fn bounds(&self) -> GridBounds;
}
