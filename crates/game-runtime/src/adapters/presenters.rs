//! # Built-in Presenters
//!
//! Presenters shipped with the runtime: one writes every notification to the
//! log, the other keeps the Prometheus gauges and counters current.

use crate::bridge::GamePresenter;
use game_telemetry::{log_block_event, log_turn_event, BLOCKS_CLEARED, CURRENT_TURN, PATTERN_MATCHES};
use shared_bus::{EventFilter, EventTopic, GameEvent};

/// Writes each notification as a structured log line.
#[derive(Debug, Default)]
pub struct LoggingPresenter;

impl GamePresenter for LoggingPresenter {
    fn name(&self) -> &str {
        "logging"
    }

    fn on_event(&self, event: &GameEvent) {
        match event {
            GameEvent::BlockPlaced { block } => {
                log_block_event!(
                    info,
                    "Block placed",
                    block.id(),
                    block.position(),
                    block_type = %block.block_type()
                );
            }
            GameEvent::BlockMoved { block_id, from, to, .. } => {
                log_block_event!(info, "Block moved", block_id, to, from = %from);
            }
            GameEvent::BlockRemoved { block_id, position, cause, .. } => {
                log_block_event!(info, "Block removed", block_id, position, cause = ?cause);
            }
            GameEvent::PatternMatched { block_type, trigger, block_ids, .. } => {
                tracing::info!(
                    block_type = %block_type,
                    trigger = %trigger,
                    cleared = block_ids.len(),
                    "Pattern matched"
                );
            }
            GameEvent::TurnEnded { turn, .. } => {
                log_turn_event!(info, "Turn ended", turn.number());
            }
            GameEvent::TurnStarted { turn, .. } => {
                log_turn_event!(info, "Turn started", turn.number());
            }
        }
    }
}

/// Mirrors pattern and turn notifications into metrics.
#[derive(Debug, Default)]
pub struct MetricsPresenter;

impl GamePresenter for MetricsPresenter {
    fn name(&self) -> &str {
        "metrics"
    }

    fn filter(&self) -> EventFilter {
        EventFilter::topics(vec![EventTopic::Pattern, EventTopic::Turn])
    }

    fn on_event(&self, event: &GameEvent) {
        match event {
            GameEvent::PatternMatched { block_type, block_ids, .. } => {
                PATTERN_MATCHES.with_label_values(&[block_type.name()]).inc();
                BLOCKS_CLEARED.inc_by(block_ids.len() as f64);
            }
            GameEvent::TurnStarted { turn, .. } => {
                CURRENT_TURN.set(f64::from(turn.number()));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Block, BlockType, FixedTimeSource, Position, TimeSource, Turn};

    #[test]
    fn test_metrics_presenter_counts_matches() {
        let now = FixedTimeSource::default().now();
        let blocks: Vec<Block> = (0..3)
            .map(|x| Block::new(BlockType::Health, Position::new(x, 0), now))
            .collect();
        let event = GameEvent::PatternMatched {
            block_type: BlockType::Health,
            trigger: Position::new(2, 0),
            block_ids: blocks.iter().map(Block::id).collect(),
            positions: blocks.iter().map(Block::position).collect(),
            matched_at: now,
        };

        let matches = PATTERN_MATCHES.with_label_values(&["Health"]);
        let before_matches = matches.get();
        let before_cleared = BLOCKS_CLEARED.get();

        MetricsPresenter.on_event(&event);

        assert!(matches.get() >= before_matches + 1.0);
        assert!(BLOCKS_CLEARED.get() >= before_cleared + 3.0);
    }

    #[test]
    fn test_metrics_presenter_ignores_grid_events() {
        let now = FixedTimeSource::default().now();
        let placed = GameEvent::BlockPlaced {
            block: Block::new(BlockType::Work, Position::new(0, 0), now),
        };
        assert!(!MetricsPresenter.filter().matches(&placed));

        let started = GameEvent::TurnStarted {
            turn: Turn::first(now),
            started_at: now,
        };
        assert!(MetricsPresenter.filter().matches(&started));
    }

    #[test]
    fn test_logging_presenter_accepts_everything() {
        let now = FixedTimeSource::default().now();
        let turn = Turn::first(now);
        LoggingPresenter.on_event(&GameEvent::TurnEnded { turn, ended_at: now });
        assert!(LoggingPresenter.filter().matches(&GameEvent::TurnStarted {
            turn,
            started_at: now
        }));
    }
}
