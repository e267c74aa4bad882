//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::GridBounds;
use shared_types::{Block, BlockId, GameResult, Position};

/// Storage for the blocks on a grid.
///
/// Implementations are the authoritative grid state: they must refuse any
/// write that would break the bounds, occupancy or capacity invariants, even
/// if the caller skipped validation. Lookups return `Ok(None)` for absence and
/// reserve `Err` for real failures.
pub trait BlockRepository: Send + Sync {
    /// Extent of the grid this repository stores.
    fn bounds(&self) -> GridBounds;

    /// Maximum number of blocks the repository accepts.
    fn capacity(&self) -> usize;

    fn get_by_id(&self, id: BlockId) -> GameResult<Option<Block>>;

    fn get_at_position(&self, position: Position) -> GameResult<Option<Block>>;

    /// Every stored block, in row-major position order.
    fn all(&self) -> GameResult<Vec<Block>>;

    fn count(&self) -> GameResult<usize>;

    /// Insert a new block.
    fn add(&self, block: Block) -> GameResult<()>;

    /// Replace the stored block with the same id, returning the previous value.
    fn update(&self, block: Block) -> GameResult<Block>;

    /// Remove a block by id, returning it.
    fn remove(&self, id: BlockId) -> GameResult<Block>;

    /// Remove several blocks atomically: either all are removed or none.
    fn remove_many(&self, ids: &[BlockId]) -> GameResult<Vec<Block>>;
}
