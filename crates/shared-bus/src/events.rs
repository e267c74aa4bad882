//! # Game Events
//!
//! Defines every notification that flows through the shared bus. Each event
//! carries the affected entity id(s), the relevant positions and a timestamp.

use serde::{Deserialize, Serialize};
use shared_types::{Block, BlockId, BlockType, Position, Timestamp, Turn};

/// Subsystem identifiers used as event sources.
pub mod source {
    /// Grid state and block commands.
    pub const GRID: u8 = 1;
    /// Pattern processing.
    pub const PATTERNS: u8 = 2;
    /// Turn manager.
    pub const TURNS: u8 = 3;
}

/// Why a block left the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalCause {
    /// An explicit remove command.
    Command,
    /// Cleared as part of a matched pattern.
    PatternCleared,
}

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // =========================================================================
    // SUBSYSTEM 1: GRID
    // =========================================================================
    /// A block was placed on the grid.
    BlockPlaced {
        /// The placed block, as committed to the store.
        block: Block,
    },

    /// A block moved to a new position.
    BlockMoved {
        block_id: BlockId,
        block_type: BlockType,
        from: Position,
        to: Position,
        moved_at: Timestamp,
    },

    /// A block left the grid.
    BlockRemoved {
        block_id: BlockId,
        block_type: BlockType,
        position: Position,
        cause: RemovalCause,
        removed_at: Timestamp,
    },

    // =========================================================================
    // SUBSYSTEM 2: PATTERNS
    // =========================================================================
    /// A group of same-type blocks formed a match and was cleared.
    PatternMatched {
        block_type: BlockType,
        /// Position whose placement or move triggered the match.
        trigger: Position,
        /// Ids of the matched blocks, in row-major position order.
        block_ids: Vec<BlockId>,
        /// Positions of the matched blocks, in row-major order.
        positions: Vec<Position>,
        matched_at: Timestamp,
    },

    // =========================================================================
    // SUBSYSTEM 3: TURNS
    // =========================================================================
    /// The current turn finished.
    TurnEnded { turn: Turn, ended_at: Timestamp },

    /// A new turn began.
    TurnStarted { turn: Turn, started_at: Timestamp },
}

impl GameEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::BlockPlaced { .. } | Self::BlockMoved { .. } | Self::BlockRemoved { .. } => {
                EventTopic::Grid
            }
            Self::PatternMatched { .. } => EventTopic::Pattern,
            Self::TurnEnded { .. } | Self::TurnStarted { .. } => EventTopic::Turn,
        }
    }

    /// Get the originating subsystem ID.
    #[must_use]
    pub fn source_subsystem(&self) -> u8 {
        match self {
            Self::BlockPlaced { .. } | Self::BlockMoved { .. } => source::GRID,
            Self::BlockRemoved { cause, .. } => match cause {
                RemovalCause::Command => source::GRID,
                RemovalCause::PatternCleared => source::PATTERNS,
            },
            Self::PatternMatched { .. } => source::PATTERNS,
            Self::TurnEnded { .. } | Self::TurnStarted { .. } => source::TURNS,
        }
    }

    /// Short event name for logs and error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BlockPlaced { .. } => "BlockPlaced",
            Self::BlockMoved { .. } => "BlockMoved",
            Self::BlockRemoved { .. } => "BlockRemoved",
            Self::PatternMatched { .. } => "PatternMatched",
            Self::TurnEnded { .. } => "TurnEnded",
            Self::TurnStarted { .. } => "TurnStarted",
        }
    }

    /// When the notified change happened.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::BlockPlaced { block } => block.created_at(),
            Self::BlockMoved { moved_at, .. } => *moved_at,
            Self::BlockRemoved { removed_at, .. } => *removed_at,
            Self::PatternMatched { matched_at, .. } => *matched_at,
            Self::TurnEnded { ended_at, .. } => *ended_at,
            Self::TurnStarted { started_at, .. } => *started_at,
        }
    }

    /// The single block this event concerns, if any.
    #[must_use]
    pub fn block_id(&self) -> Option<BlockId> {
        match self {
            Self::BlockPlaced { block } => Some(block.id()),
            Self::BlockMoved { block_id, .. } | Self::BlockRemoved { block_id, .. } => {
                Some(*block_id)
            }
            _ => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Subsystem 1 events.
    Grid,
    /// Subsystem 2 events.
    Pattern,
    /// Subsystem 3 events.
    Turn,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Source subsystems to include. Empty means all sources.
    pub source_subsystems: Vec<u8>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            source_subsystems: Vec::new(),
        }
    }

    /// Create a filter for events from specific subsystems.
    #[must_use]
    pub fn from_subsystems(subsystems: Vec<u8>) -> Self {
        Self {
            topics: Vec::new(),
            source_subsystems: subsystems,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &GameEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let source_match = self.source_subsystems.is_empty()
            || self.source_subsystems.contains(&event.source_subsystem());

        topic_match && source_match
    }
}
