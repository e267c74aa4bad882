//! # Notification Bridge Tests
//!
//! Presenter registration, filtering and failure isolation with the real bus
//! and bridge task in between.

use std::sync::Arc;

use bl_01_grid::PlaceBlockCommand;
use game_runtime::{GamePresenter, MetricsPresenter};
use shared_bus::{EventFilter, EventTopic, GameEvent};
use shared_types::{BlockType, Position};

use super::harness::{RecordingPresenter, TestGame};

struct PanickingPresenter;

impl GamePresenter for PanickingPresenter {
    fn name(&self) -> &str {
        "panicking"
    }

    fn on_event(&self, _event: &GameEvent) {
        panic!("presenter torn down mid-frame");
    }
}

#[tokio::test]
async fn test_unregistered_presenter_receives_nothing() {
    let game = TestGame::start();
    let late = Arc::new(RecordingPresenter::named("late"));
    let handle = game.container.presenters.register(late.clone());
    assert!(game.container.presenters.unregister(handle));

    game.commands
        .place_block(PlaceBlockCommand::new(BlockType::Work, (3, 3)), &game.cancel)
        .await
        .unwrap();

    assert!(game.recorder.wait_for("BlockPlaced", 1).await);
    assert!(late.events().is_empty());

    game.stop().await;
}

#[tokio::test]
async fn test_unregistering_mid_session_stops_delivery() {
    let game = TestGame::start();
    let cancel = &game.cancel;

    game.commands
        .place_block(PlaceBlockCommand::new(BlockType::Study, (0, 0)), cancel)
        .await
        .unwrap();
    assert!(game.recorder.wait_for("BlockPlaced", 1).await);

    assert!(game.container.presenters.unregister(game.recorder_handle));
    let witness = Arc::new(RecordingPresenter::named("witness"));
    game.container.presenters.register(witness.clone());

    game.commands
        .place_block(PlaceBlockCommand::new(BlockType::Study, (5, 0)), cancel)
        .await
        .unwrap();
    assert!(witness.wait_for("BlockPlaced", 1).await);

    assert_eq!(game.recorder.names(), vec!["BlockPlaced"]);
    match witness.events().as_slice() {
        [GameEvent::BlockPlaced { block }] => assert_eq!(block.position(), Position::new(5, 0)),
        other => panic!("unexpected events {other:?}"),
    }

    game.stop().await;
}

#[tokio::test]
async fn test_panicking_presenter_does_not_stop_others() {
    let game = TestGame::start();
    game.container
        .presenters
        .register(Arc::new(PanickingPresenter));
    let after = Arc::new(RecordingPresenter::named("after"));
    game.container.presenters.register(after.clone());

    for x in [1, 7] {
        game.commands
            .place_block(PlaceBlockCommand::new(BlockType::Fun, (x, 4)), &game.cancel)
            .await
            .unwrap();
    }

    assert!(game.recorder.wait_for("BlockPlaced", 2).await);
    assert!(after.wait_for("BlockPlaced", 2).await);
    assert_eq!(game.container.presenters.len(), 3);

    let failures = game_telemetry_failures("panicking");
    assert!(failures >= 2.0);

    game.stop().await;
}

#[tokio::test]
async fn test_presenter_filters_apply() {
    let game = TestGame::start();
    let turns_only = Arc::new(
        RecordingPresenter::named("turns").with_filter(EventFilter::topics(vec![EventTopic::Turn])),
    );
    game.container.presenters.register(turns_only.clone());
    game.container.presenters.register(Arc::new(MetricsPresenter));

    game.commands
        .place_block(PlaceBlockCommand::new(BlockType::Relationship, (2, 8)), &game.cancel)
        .await
        .unwrap();
    game.commands.advance_turn(&game.cancel).await.unwrap();

    assert!(game.recorder.wait_for("TurnStarted", 1).await);
    assert!(turns_only.wait_for("TurnStarted", 1).await);
    assert_eq!(turns_only.names(), vec!["TurnEnded", "TurnStarted"]);
    assert_eq!(
        game.recorder.names(),
        vec!["BlockPlaced", "TurnEnded", "TurnStarted"]
    );

    game.stop().await;
}

#[tokio::test]
async fn test_shutdown_reports_forwarded_events() {
    let game = TestGame::start();
    game.commands
        .place_block(PlaceBlockCommand::new(BlockType::Health, (6, 6)), &game.cancel)
        .await
        .unwrap();
    game.commands.advance_turn(&game.cancel).await.unwrap();
    assert!(game.recorder.wait_for("TurnStarted", 1).await);

    let presenters = game.container.presenters.clone();
    assert_eq!(game.stop().await, 3);
    assert!(presenters.is_empty());
}

fn game_telemetry_failures(presenter: &str) -> f64 {
    game_telemetry::PRESENTER_FAILURES
        .with_label_values(&[presenter])
        .get()
}
