//! In-memory grid state store.

use crate::config::GridConfig;
use crate::domain::GridBounds;
use crate::ports::BlockRepository;
use parking_lot::RwLock;
use shared_types::{Block, BlockId, GameError, GameResult, Position};
use std::collections::HashMap;

#[derive(Default)]
struct GridState {
    blocks: HashMap<BlockId, Block>,
    positions: HashMap<Position, BlockId>,
}

impl GridState {
    fn occupant(&self, position: Position) -> Option<&Block> {
        self.positions.get(&position).and_then(|id| self.blocks.get(id))
    }

    fn check_vacant(&self, position: Position, mover: Option<BlockId>) -> GameResult<()> {
        match self.positions.get(&position) {
            Some(&occupant) if Some(occupant) != mover => Err(GameError::PositionOccupied {
                position,
                occupant,
            }),
            _ => Ok(()),
        }
    }
}

/// Authoritative in-memory grid.
///
/// Keeps two indexes under one lock: id to block and position to id. Every
/// write re-checks bounds, occupancy and capacity under the write lock, so the
/// store never holds two blocks on one cell even when callers race.
pub struct InMemoryGridStore {
    bounds: GridBounds,
    capacity: usize,
    state: RwLock<GridState>,
}

impl InMemoryGridStore {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            bounds: config.bounds(),
            capacity: config.capacity(),
            state: RwLock::new(GridState::default()),
        }
    }
}

impl BlockRepository for InMemoryGridStore {
    fn bounds(&self) -> GridBounds {
        self.bounds
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn get_by_id(&self, id: BlockId) -> GameResult<Option<Block>> {
        Ok(self.state.read().blocks.get(&id).cloned())
    }

    fn get_at_position(&self, position: Position) -> GameResult<Option<Block>> {
        Ok(self.state.read().occupant(position).cloned())
    }

    fn all(&self) -> GameResult<Vec<Block>> {
        let mut blocks: Vec<Block> = self.state.read().blocks.values().cloned().collect();
        blocks.sort_by_key(|b| b.position().row_major_key());
        Ok(blocks)
    }

    fn count(&self) -> GameResult<usize> {
        Ok(self.state.read().blocks.len())
    }

    fn add(&self, block: Block) -> GameResult<()> {
        self.bounds.check(block.position())?;
        let mut state = self.state.write();
        if state.blocks.len() >= self.capacity {
            return Err(GameError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        state.check_vacant(block.position(), None)?;
        if state.blocks.contains_key(&block.id()) {
            return Err(GameError::IdCollision {
                block_id: block.id(),
            });
        }
        state.positions.insert(block.position(), block.id());
        state.blocks.insert(block.id(), block);
        Ok(())
    }

    fn update(&self, block: Block) -> GameResult<Block> {
        self.bounds.check(block.position())?;
        let mut state = self.state.write();
        let previous = state
            .blocks
            .get(&block.id())
            .cloned()
            .ok_or(GameError::BlockNotFound {
                block_id: block.id(),
            })?;
        state.check_vacant(block.position(), Some(block.id()))?;

        state.positions.remove(&previous.position());
        state.positions.insert(block.position(), block.id());
        state.blocks.insert(block.id(), block);
        Ok(previous)
    }

    fn remove(&self, id: BlockId) -> GameResult<Block> {
        let mut state = self.state.write();
        let block = state
            .blocks
            .remove(&id)
            .ok_or(GameError::BlockNotFound { block_id: id })?;
        state.positions.remove(&block.position());
        Ok(block)
    }

    fn remove_many(&self, ids: &[BlockId]) -> GameResult<Vec<Block>> {
        let mut state = self.state.write();
        if let Some(&missing) = ids.iter().find(|id| !state.blocks.contains_key(id)) {
            return Err(GameError::BlockNotFound { block_id: missing });
        }

        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            // Duplicate ids in the input are removed once
            if let Some(block) = state.blocks.remove(id) {
                state.positions.remove(&block.position());
                removed.push(block);
            }
        }
        Ok(removed)
    }
}
