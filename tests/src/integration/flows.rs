//! # Integration Test Flows
//!
//! Commands, pattern clears and turn sequencing through the wired container.
//!
//! ```text
//! CommandGateway ──→ Grid(1) ──BlockPlaced──→ Event Bus ──→ PatternProcessor(2)
//!                                                 │              │ clear_blocks
//!                                                 │              ↓
//!                                                 │      BlockRemoved ×N, PatternMatched
//!                                                 ↓
//!                                         NotificationBridge ──→ RecordingPresenter
//! ```

use std::time::Duration;

use bl_01_grid::{MoveBlockCommand, PlaceBlockCommand, RemoveBlockCommand};
use game_runtime::GameConfig;
use shared_bus::{GameEvent, RemovalCause};
use shared_types::{BlockType, GameError, Position};

use super::harness::{TestGame, EVENT_TIMEOUT};

// =============================================================================
// GRID COMMANDS
// =============================================================================

/// 10x10 grid: place at (2,2), place again, move onto itself, move off the grid
#[tokio::test]
async fn test_reference_session_on_ten_by_ten_grid() {
    let game = TestGame::start();
    let at = Position::new(2, 2);

    let work = game
        .commands
        .place_block(PlaceBlockCommand::new(BlockType::Work, at), &game.cancel)
        .await
        .expect("first placement succeeds");
    assert_eq!(game.commands.block_at(at).unwrap(), Some(work.clone()));

    let err = game
        .commands
        .place_block(PlaceBlockCommand::new(BlockType::Work, at), &game.cancel)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GameError::PositionOccupied {
            position: at,
            occupant: work.id()
        }
    );

    let err = game
        .commands
        .move_block(MoveBlockCommand::new(work.id(), at), &game.cancel)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NO_OP_MOVE");

    let err = game
        .commands
        .move_block(MoveBlockCommand::new(work.id(), (11, 2)), &game.cancel)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GameError::OutOfBounds {
            position: Position::new(11, 2),
            width: 10,
            height: 10
        }
    );

    // Only the successful placement was announced
    assert!(game.recorder.wait_for("BlockPlaced", 1).await);
    assert_eq!(game.recorder.names(), vec!["BlockPlaced"]);
    assert_eq!(game.commands.blocks().unwrap(), vec![work]);

    game.stop().await;
}

#[tokio::test]
async fn test_move_round_trip_is_visible_before_notification() {
    let game = TestGame::start();
    let from = Position::new(1, 1);
    let to = Position::new(4, 6);

    let block = game
        .commands
        .place_block(PlaceBlockCommand::new(BlockType::Study, from), &game.cancel)
        .await
        .unwrap();
    let moved = game
        .commands
        .move_block(MoveBlockCommand::new(block.id(), to), &game.cancel)
        .await
        .unwrap();

    assert_eq!(moved.id(), block.id());
    assert_eq!(game.commands.block_at(to).unwrap().map(|b| b.id()), Some(block.id()));
    assert_eq!(game.commands.block_at(from).unwrap(), None);

    assert!(game.recorder.wait_for("BlockMoved", 1).await);
    match game.recorder.events().last() {
        Some(GameEvent::BlockMoved {
            block_id,
            from: f,
            to: t,
            ..
        }) => {
            assert_eq!(*block_id, block.id());
            assert_eq!((*f, *t), (from, to));
        }
        other => panic!("expected BlockMoved, got {other:?}"),
    }

    game.stop().await;
}

#[tokio::test]
async fn test_last_block_cannot_be_removed() {
    let game = TestGame::start();
    let a = game
        .commands
        .place_block(PlaceBlockCommand::new(BlockType::Fun, (0, 0)), &game.cancel)
        .await
        .unwrap();
    let b = game
        .commands
        .place_block(PlaceBlockCommand::new(BlockType::Health, (9, 9)), &game.cancel)
        .await
        .unwrap();

    let removed = game
        .commands
        .remove_block(RemoveBlockCommand::At(a.position()), &game.cancel)
        .await
        .unwrap();
    assert_eq!(removed.id(), a.id());

    let err = game
        .commands
        .remove_block(RemoveBlockCommand::ById(b.id()), &game.cancel)
        .await
        .unwrap_err();
    assert_eq!(err, GameError::MinimumPopulation { block_id: b.id() });
    assert_eq!(game.commands.blocks().unwrap(), vec![b]);

    assert!(game.recorder.wait_for("BlockRemoved", 1).await);
    let causes: Vec<_> = game
        .recorder
        .events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::BlockRemoved { cause, .. } => Some(cause),
            _ => None,
        })
        .collect();
    assert_eq!(causes, vec![RemovalCause::Command]);

    game.stop().await;
}

#[tokio::test]
async fn test_combination_types_are_rejected_by_name() {
    let game = TestGame::start();

    let err = PlaceBlockCommand::from_type_name("Dragon", (0, 0)).unwrap_err();
    assert_eq!(err.code(), "INVALID_TYPE");

    let command = PlaceBlockCommand::from_type_name("Passion", (0, 0)).unwrap();
    let err = game
        .commands
        .place_block(command, &game.cancel)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GameError::NotDirectlyPlaceable {
            block_type: BlockType::Passion
        }
    );
    assert!(game.commands.blocks().unwrap().is_empty());

    game.stop().await;
}

// =============================================================================
// PATTERN PROCESSING
// =============================================================================

#[tokio::test]
async fn test_three_in_a_row_are_cleared() {
    let game = TestGame::start();
    let anchor = game
        .commands
        .place_block(PlaceBlockCommand::new(BlockType::Work, (5, 5)), &game.cancel)
        .await
        .unwrap();

    for x in 0..3 {
        game.commands
            .place_block(PlaceBlockCommand::new(BlockType::Health, (x, 0)), &game.cancel)
            .await
            .unwrap();
    }

    assert!(game.recorder.wait_for("PatternMatched", 1).await);
    let events = game.recorder.events();

    let matched: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::PatternMatched {
                block_type,
                positions,
                ..
            } => Some((*block_type, positions.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        matched,
        vec![(
            BlockType::Health,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        )]
    );

    // Removals precede the match notification
    let matched_at = events
        .iter()
        .position(|e| e.name() == "PatternMatched")
        .unwrap();
    let cleared: Vec<_> = events[..matched_at]
        .iter()
        .filter(|e| {
            matches!(
                e,
                GameEvent::BlockRemoved {
                    cause: RemovalCause::PatternCleared,
                    ..
                }
            )
        })
        .collect();
    assert_eq!(cleared.len(), 3);

    assert_eq!(game.commands.blocks().unwrap(), vec![anchor]);

    game.stop().await;
}

#[tokio::test]
async fn test_match_clearing_whole_grid_keeps_trigger() {
    let game = TestGame::start();

    for y in 0..3 {
        game.commands
            .place_block(PlaceBlockCommand::new(BlockType::Study, (4, y)), &game.cancel)
            .await
            .unwrap();
    }

    assert!(game.recorder.wait_for("PatternMatched", 1).await);
    let remaining = game.commands.blocks().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].block_type(), BlockType::Study);

    game.stop().await;
}

#[tokio::test]
async fn test_larger_minimum_leaves_short_rows() {
    let config = GameConfig {
        patterns: bl_02_patterns::PatternConfig { min_match_size: 4 },
        ..GameConfig::default()
    };
    let game = TestGame::start_with(config);

    for x in 0..3 {
        game.commands
            .place_block(PlaceBlockCommand::new(BlockType::Creativity, (x, 3)), &game.cancel)
            .await
            .unwrap();
    }

    // The turn advance waits for pattern effects to settle
    game.commands.advance_turn(&game.cancel).await.unwrap();
    assert!(game.recorder.wait_for("TurnStarted", 1).await);
    assert!(!game.recorder.names().contains(&"PatternMatched"));
    assert_eq!(game.commands.blocks().unwrap().len(), 3);

    game.stop().await;
}

// =============================================================================
// TURN SEQUENCING
// =============================================================================

#[tokio::test]
async fn test_turn_ended_precedes_turn_started() {
    let game = TestGame::start();

    for expected in 2..=4u32 {
        let advance = game.commands.advance_turn(&game.cancel).await.unwrap();
        assert_eq!(advance.previous.number() + 1, advance.current.number());
        assert_eq!(advance.current.number(), expected);
    }

    assert!(game.recorder.wait_for("TurnStarted", 3).await);
    let turns: Vec<_> = game
        .recorder
        .events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::TurnEnded { turn, .. } => Some(("ended", turn.number())),
            GameEvent::TurnStarted { turn, .. } => Some(("started", turn.number())),
            _ => None,
        })
        .collect();
    assert_eq!(
        turns,
        vec![
            ("ended", 1),
            ("started", 2),
            ("ended", 2),
            ("started", 3),
            ("ended", 3),
            ("started", 4),
        ]
    );
    assert_eq!(game.commands.current_turn().number(), 4);

    game.stop().await;
}

/// Advance straight after the placements, with the processor on another
/// worker; the clear must land inside the turn that ended.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_turn_waits_for_pattern_clear() {
    for round in 0..20 {
        let game = TestGame::start();
        game.commands
            .place_block(PlaceBlockCommand::new(BlockType::Work, (9, 0)), &game.cancel)
            .await
            .unwrap();
        // Alternating fillers queue work ahead of the matching row
        let fillers = round % 10;
        for x in 0..fillers {
            let block_type = if x % 2 == 0 { BlockType::Study } else { BlockType::Health };
            game.commands
                .place_block(PlaceBlockCommand::new(block_type, (x, 3)), &game.cancel)
                .await
                .unwrap();
        }
        for x in 0..3 {
            game.commands
                .place_block(PlaceBlockCommand::new(BlockType::Fun, (x, 9)), &game.cancel)
                .await
                .unwrap();
        }

        let advance = game.commands.advance_turn(&game.cancel).await.unwrap();
        assert!(advance.settled, "round {round}: settle wait timed out");

        let blocks = game.commands.blocks().unwrap();
        assert!(
            blocks.iter().all(|b| b.block_type() != BlockType::Fun),
            "round {round}: row still on the grid after the advance"
        );
        assert_eq!(blocks.len(), 1 + fillers as usize);

        assert!(game.recorder.wait_for("TurnStarted", 1).await);
        let names = game.recorder.names();
        let matched = names.iter().position(|n| *n == "PatternMatched");
        let started = names.iter().position(|n| *n == "TurnStarted");
        assert!(
            matches!((matched, started), (Some(m), Some(s)) if m < s),
            "round {round}: {names:?}"
        );

        game.stop().await;
    }
}

#[tokio::test]
async fn test_concurrent_advances_are_serialized() {
    let game = TestGame::start();
    let commands = game.commands.clone();
    let cancel = game.cancel.clone();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let commands = commands.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move { commands.advance_turn(&cancel).await })
        })
        .collect();

    let mut reached = Vec::new();
    for handle in handles {
        reached.push(handle.await.unwrap().unwrap().current.number());
    }
    reached.sort_unstable();
    assert_eq!(reached, vec![2, 3, 4, 5]);

    assert!(game.recorder.wait_for("TurnStarted", 4).await);
    let names: Vec<_> = game
        .recorder
        .names()
        .into_iter()
        .filter(|n| n.starts_with("Turn"))
        .collect();
    // Never two ends in a row
    for pair in names.chunks(2) {
        assert_eq!(pair, ["TurnEnded", "TurnStarted"]);
    }

    game.stop().await;
}

#[tokio::test]
async fn test_shutdown_cancels_commands() {
    let game = TestGame::start();
    let commands = game.commands.clone();
    let cancel = game.cancel.clone();

    let forwarded = tokio::time::timeout(EVENT_TIMEOUT, game.stop())
        .await
        .expect("shutdown completes");
    assert_eq!(forwarded, 0);

    let err = commands
        .place_block(PlaceBlockCommand::new(BlockType::Work, (0, 0)), &cancel)
        .await
        .unwrap_err();
    assert_eq!(err, GameError::Cancelled);
    assert!(matches!(
        commands.advance_turn(&cancel).await,
        Err(GameError::Cancelled)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_short_settle_timeouts_still_advance() {
    let mut config = GameConfig::default();
    config.turns.settle_timeout = Duration::from_millis(10);
    config.turns.recheck_timeout = Duration::from_millis(10);
    let game = TestGame::start_with(config);

    let advance = game.commands.advance_turn(&game.cancel).await.unwrap();
    assert_eq!(advance.current.number(), 2);

    game.stop().await;
}
