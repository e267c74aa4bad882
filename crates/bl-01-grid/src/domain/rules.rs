//! Validation rules
//!
//! Stateless predicates consulted by the command handlers. Each rule checks a
//! single invariant; the `validate_*` functions compose them in a fixed order
//! and stop at the first failure. None of them mutate the grid.

use crate::domain::commands::{MoveBlockCommand, PlaceBlockCommand, RemoveBlockCommand};
use crate::domain::GridBounds;
use crate::ports::BlockRepository;
use shared_types::{Block, BlockId, BlockType, GameError, GameResult, Position};

// =============================================================================
// SINGLE RULES
// =============================================================================

/// Combination-only types cannot be placed by a player.
pub fn ensure_placeable_type(block_type: BlockType) -> GameResult<()> {
    if block_type.is_directly_placeable() {
        Ok(())
    } else {
        Err(GameError::NotDirectlyPlaceable { block_type })
    }
}

pub fn ensure_in_bounds(bounds: &GridBounds, position: Position) -> GameResult<()> {
    bounds.check(position)
}

pub fn ensure_capacity(count: usize, capacity: usize) -> GameResult<()> {
    if count < capacity {
        Ok(())
    } else {
        Err(GameError::CapacityExceeded { capacity })
    }
}

/// `occupant` is whatever currently sits at `position`.
pub fn ensure_vacant(position: Position, occupant: Option<&Block>) -> GameResult<()> {
    match occupant {
        None => Ok(()),
        Some(block) => Err(GameError::PositionOccupied {
            position,
            occupant: block.id(),
        }),
    }
}

/// `existing` is whatever is stored under `block_id`.
pub fn ensure_id_unused(block_id: BlockId, existing: Option<&Block>) -> GameResult<()> {
    match existing {
        None => Ok(()),
        Some(_) => Err(GameError::IdCollision { block_id }),
    }
}

pub fn ensure_moves(block: &Block, to: Position) -> GameResult<()> {
    if block.position() == to {
        Err(GameError::NoOpMove {
            block_id: block.id(),
            position: to,
        })
    } else {
        Ok(())
    }
}

/// `block` must still sit where the caller last saw it.
pub fn ensure_at(block: &Block, expected: Position) -> GameResult<()> {
    if block.position() == expected {
        Ok(())
    } else {
        Err(GameError::PositionEmpty { position: expected })
    }
}

/// At least one block must remain after removing `removing` of `count`.
pub fn ensure_population_remains(count: usize, removing: usize, block_id: BlockId) -> GameResult<()> {
    if count > removing {
        Ok(())
    } else {
        Err(GameError::MinimumPopulation { block_id })
    }
}

// =============================================================================
// COMPOSITE VALIDATION
// =============================================================================

/// Check a placement: type, bounds, capacity, occupancy, id collision.
pub fn validate_placement<R>(command: &PlaceBlockCommand, repository: &R) -> GameResult<()>
where
    R: BlockRepository + ?Sized,
{
    ensure_placeable_type(command.block_type)?;
    ensure_in_bounds(&repository.bounds(), command.position)?;
    ensure_capacity(repository.count()?, repository.capacity())?;
    ensure_vacant(
        command.position,
        repository.get_at_position(command.position)?.as_ref(),
    )?;
    if let Some(block_id) = command.block_id {
        ensure_id_unused(block_id, repository.get_by_id(block_id)?.as_ref())?;
    }
    Ok(())
}

/// Check a move and return the block being moved.
pub fn validate_move<R>(command: &MoveBlockCommand, repository: &R) -> GameResult<Block>
where
    R: BlockRepository + ?Sized,
{
    let block = repository
        .get_by_id(command.block_id)?
        .ok_or(GameError::BlockNotFound {
            block_id: command.block_id,
        })?;
    ensure_moves(&block, command.to)?;
    ensure_in_bounds(&repository.bounds(), command.to)?;
    ensure_vacant(command.to, repository.get_at_position(command.to)?.as_ref())?;
    Ok(block)
}

/// Check a removal and return the block being removed.
pub fn validate_removal<R>(command: &RemoveBlockCommand, repository: &R) -> GameResult<Block>
where
    R: BlockRepository + ?Sized,
{
    let block = match *command {
        RemoveBlockCommand::At(position) => repository
            .get_at_position(position)?
            .ok_or(GameError::PositionEmpty { position })?,
        RemoveBlockCommand::ById(block_id) => repository
            .get_by_id(block_id)?
            .ok_or(GameError::BlockNotFound { block_id })?,
    };
    ensure_population_remains(repository.count()?, 1, block.id())?;
    Ok(block)
}

/// Check a bulk removal and return the stored blocks in the order given.
///
/// Each expected block must still exist at the position it had in
/// `expected`; a block that moved since fails with `PositionEmpty` for its
/// old cell.
pub fn validate_bulk_removal<R>(expected: &[Block], repository: &R) -> GameResult<Vec<Block>>
where
    R: BlockRepository + ?Sized,
{
    let mut blocks = Vec::with_capacity(expected.len());
    for wanted in expected {
        let block_id = wanted.id();
        let block = repository
            .get_by_id(block_id)?
            .ok_or(GameError::BlockNotFound { block_id })?;
        ensure_at(&block, wanted.position())?;
        blocks.push(block);
    }
    if let Some(first) = blocks.first() {
        ensure_population_remains(repository.count()?, blocks.len(), first.id())?;
    }
    Ok(blocks)
}
