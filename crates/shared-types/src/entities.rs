//! # Core Domain Entities
//!
//! Defines the values that live on the BlockLife grid.
//!
//! ## Clusters
//!
//! - **Grid**: `Position`, `BlockId`, `BlockType`, `Block`
//! - **Time**: `Turn`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{GameError, GameResult};
use crate::time::Timestamp;

// =============================================================================
// CLUSTER A: THE GRID
// =============================================================================

/// Integer grid coordinate.
///
/// Validity is relative to a grid's bounds; a `Position` on its own may be
/// negative or arbitrarily large.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by `(dx, dy)`, saturating at the `i32` limits.
    #[must_use]
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// The four orthogonal neighbours (up, right, down, left).
    pub fn neighbors(&self) -> [Position; 4] {
        [
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
        ]
    }

    /// Row-major ordering key (`y` first, then `x`).
    pub fn row_major_key(&self) -> (i32, i32) {
        (self.y, self.x)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Opaque block identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub Uuid);

impl BlockId {
    /// Generate a fresh random identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of a block.
///
/// Primary types can be placed directly. Combination-only types only come into
/// existence as the result of combining primary blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockType {
    Work,
    Study,
    Relationship,
    Health,
    Creativity,
    Fun,
    CareerOpportunity,
    Partnership,
    Passion,
}

impl BlockType {
    /// Every defined block type.
    pub const ALL: [BlockType; 9] = [
        BlockType::Work,
        BlockType::Study,
        BlockType::Relationship,
        BlockType::Health,
        BlockType::Creativity,
        BlockType::Fun,
        BlockType::CareerOpportunity,
        BlockType::Partnership,
        BlockType::Passion,
    ];

    /// Types that may be placed by a player.
    pub const PRIMARY: [BlockType; 6] = [
        BlockType::Work,
        BlockType::Study,
        BlockType::Relationship,
        BlockType::Health,
        BlockType::Creativity,
        BlockType::Fun,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            BlockType::Work => "Work",
            BlockType::Study => "Study",
            BlockType::Relationship => "Relationship",
            BlockType::Health => "Health",
            BlockType::Creativity => "Creativity",
            BlockType::Fun => "Fun",
            BlockType::CareerOpportunity => "CareerOpportunity",
            BlockType::Partnership => "Partnership",
            BlockType::Passion => "Passion",
        }
    }

    /// Whether the type exists only as a combination result.
    pub const fn is_combination_only(&self) -> bool {
        matches!(
            self,
            BlockType::CareerOpportunity | BlockType::Partnership | BlockType::Passion
        )
    }

    pub const fn is_directly_placeable(&self) -> bool {
        !self.is_combination_only()
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlockType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::InvalidType {
                name: s.to_string(),
            })
    }
}

/// A typed, positioned unit of game state.
///
/// Blocks are immutable values: `move_to` returns a new block with the
/// updated position and modification time. The grid store owns the only
/// authoritative copy; readers receive clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    block_type: BlockType,
    position: Position,
    created_at: Timestamp,
    modified_at: Timestamp,
}

impl Block {
    /// Create a block with a freshly generated id.
    pub fn new(block_type: BlockType, position: Position, now: Timestamp) -> Self {
        Self::with_id(BlockId::new(), block_type, position, now)
    }

    /// Create a block with a caller-assigned id.
    pub fn with_id(id: BlockId, block_type: BlockType, position: Position, now: Timestamp) -> Self {
        Self {
            id,
            block_type,
            position,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn modified_at(&self) -> Timestamp {
        self.modified_at
    }

    /// Copy of this block relocated to `position`.
    #[must_use]
    pub fn move_to(&self, position: Position, now: Timestamp) -> Self {
        Self {
            position,
            modified_at: now,
            ..self.clone()
        }
    }
}

// =============================================================================
// CLUSTER B: TIME
// =============================================================================

/// A discrete game time unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    number: u32,
    created_at: Timestamp,
}

impl Turn {
    /// Largest representable turn number.
    pub const MAX_NUMBER: u32 = u32::MAX;

    /// Create a turn; the number must be positive.
    pub fn new(number: u32, now: Timestamp) -> GameResult<Self> {
        if number == 0 {
            return Err(GameError::InvalidTurnNumber { number });
        }
        Ok(Self {
            number,
            created_at: now,
        })
    }

    /// Turn 1.
    pub fn first(now: Timestamp) -> Self {
        Self {
            number: 1,
            created_at: now,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// The following turn. Fails at `MAX_NUMBER`.
    pub fn next(&self, now: Timestamp) -> GameResult<Turn> {
        let number = self
            .number
            .checked_add(1)
            .ok_or(GameError::TurnOverflow {
                current: self.number,
            })?;
        Ok(Self {
            number,
            created_at: now,
        })
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Turn {}", self.number)
    }
}
