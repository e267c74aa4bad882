//! Match detection.
//!
//! A match is an orthogonally connected group of blocks sharing one type,
//! found by flood fill from a trigger position.

use shared_types::{Block, BlockType, Position};
use std::collections::{HashMap, HashSet, VecDeque};

/// A group of same-type blocks connected to a trigger position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub block_type: BlockType,
    pub trigger: Position,
    /// Matched blocks in row-major order, trigger included.
    pub blocks: Vec<Block>,
}

impl PatternMatch {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.blocks.iter().map(Block::position).collect()
    }
}

/// Find the connected same-type group containing `trigger`.
///
/// Returns `None` when `trigger` is empty or the group is smaller than
/// `min_size`.
pub fn find_match(blocks: &[Block], trigger: Position, min_size: usize) -> Option<PatternMatch> {
    let by_position: HashMap<Position, &Block> =
        blocks.iter().map(|b| (b.position(), b)).collect();
    let start = by_position.get(&trigger)?;
    let block_type = start.block_type();

    let mut seen = HashSet::from([trigger]);
    let mut queue = VecDeque::from([trigger]);
    let mut group = Vec::new();

    while let Some(position) = queue.pop_front() {
        if let Some(block) = by_position.get(&position) {
            group.push((*block).clone());
        }
        for neighbor in position.neighbors() {
            let same_type = by_position
                .get(&neighbor)
                .is_some_and(|b| b.block_type() == block_type);
            if same_type && seen.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    if group.len() < min_size {
        return None;
    }
    group.sort_by_key(|b| b.position().row_major_key());
    Some(PatternMatch {
        block_type,
        trigger,
        blocks: group,
    })
}
