//! # Error Types
//!
//! Defines the domain error shared by all subsystems. Expected failures are
//! always returned as values; `code()` gives callers a stable identifier to
//! branch on or display.

use thiserror::Error;

use crate::entities::{BlockId, BlockType, Position};

/// Errors produced by grid commands, turn advancement and notification delivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// No block with this id exists.
    #[error("Block not found: {block_id}")]
    BlockNotFound { block_id: BlockId },

    /// No block occupies this position.
    #[error("No block at position {position}")]
    PositionEmpty { position: Position },

    /// Position lies outside `[0, width) x [0, height)`.
    #[error("Position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        position: Position,
        width: i32,
        height: i32,
    },

    /// Position already holds a block.
    #[error("Position {position} is already occupied by block {occupant}")]
    PositionOccupied { position: Position, occupant: BlockId },

    /// Block type name is not defined.
    #[error("Invalid block type: {name}")]
    InvalidType { name: String },

    /// Block type can only be produced by combination.
    #[error("Block type {block_type} can only be created by combination")]
    NotDirectlyPlaceable { block_type: BlockType },

    /// Pre-assigned block id is already in use.
    #[error("Block id {block_id} is already in use")]
    IdCollision { block_id: BlockId },

    /// Move destination equals the current position.
    #[error("Block {block_id} is already at {position}")]
    NoOpMove { block_id: BlockId, position: Position },

    /// The grid holds its maximum number of blocks.
    #[error("Grid capacity exceeded: at most {capacity} blocks")]
    CapacityExceeded { capacity: usize },

    /// Removal would leave the grid without blocks.
    #[error("Cannot remove block {block_id}: the grid must keep at least one block")]
    MinimumPopulation { block_id: BlockId },

    /// Turn counter cannot advance further.
    #[error("Turn number overflow at turn {current}")]
    TurnOverflow { current: u32 },

    /// Turn numbers start at 1.
    #[error("Turn number must be positive, got {number}")]
    InvalidTurnNumber { number: u32 },

    /// A notification could not be delivered.
    #[error("Failed to publish {event}: {reason}")]
    PublishFailed { event: String, reason: String },

    /// The operation observed a cancellation request.
    #[error("Operation cancelled")]
    Cancelled,

    /// Repository backend failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GameError {
    /// Stable machine-readable error code.
    pub const fn code(&self) -> &'static str {
        match self {
            GameError::BlockNotFound { .. } => "BLOCK_NOT_FOUND",
            GameError::PositionEmpty { .. } => "POSITION_EMPTY",
            GameError::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            GameError::PositionOccupied { .. } => "POSITION_OCCUPIED",
            GameError::InvalidType { .. } => "INVALID_TYPE",
            GameError::NotDirectlyPlaceable { .. } => "NOT_DIRECTLY_PLACEABLE",
            GameError::IdCollision { .. } => "ID_COLLISION",
            GameError::NoOpMove { .. } => "NO_OP_MOVE",
            GameError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            GameError::MinimumPopulation { .. } => "MINIMUM_POPULATION",
            GameError::TurnOverflow { .. } => "TURN_OVERFLOW",
            GameError::InvalidTurnNumber { .. } => "INVALID_TURN_NUMBER",
            GameError::PublishFailed { .. } => "PUBLISH_FAILED",
            GameError::Cancelled => "CANCELLED",
            GameError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Whether the error is one of the not-found kinds.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            GameError::BlockNotFound { .. } | GameError::PositionEmpty { .. }
        )
    }
}

/// Result type for domain operations.
pub type GameResult<T> = Result<T, GameError>;
