//! Commands consumed from the input collaborator.

use serde::{Deserialize, Serialize};
use shared_types::{BlockId, BlockType, GameResult, Position};

/// Place a new block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceBlockCommand {
    pub block_type: BlockType,
    pub position: Position,
    /// Pre-assigned identity; a fresh id is generated when absent.
    pub block_id: Option<BlockId>,
}

impl PlaceBlockCommand {
    pub fn new(block_type: BlockType, position: impl Into<Position>) -> Self {
        Self {
            block_type,
            position: position.into(),
            block_id: None,
        }
    }

    /// Build from a type name supplied by an input layer.
    ///
    /// Fails with `InvalidType` when the name is not a defined block type.
    pub fn from_type_name(type_name: &str, position: impl Into<Position>) -> GameResult<Self> {
        Ok(Self::new(type_name.parse()?, position))
    }

    #[must_use]
    pub fn with_id(mut self, block_id: BlockId) -> Self {
        self.block_id = Some(block_id);
        self
    }
}

/// Move an existing block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveBlockCommand {
    pub block_id: BlockId,
    pub to: Position,
}

impl MoveBlockCommand {
    pub fn new(block_id: BlockId, to: impl Into<Position>) -> Self {
        Self {
            block_id,
            to: to.into(),
        }
    }
}

/// Remove a block, addressed by position or by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoveBlockCommand {
    At(Position),
    ById(BlockId),
}
