//! # Property Tests
//!
//! "For all positions" and "for all advance counts" properties checked
//! against the wired subsystems.

use std::sync::Arc;

use proptest::prelude::*;

use bl_01_grid::{MoveBlockCommand, PlaceBlockCommand};
use bl_02_patterns::PatternTracker;
use bl_03_turns::{TurnApi, TurnConfig, TurnManager};
use game_runtime::{GameConfig, GameContainer, PatternEffectsAdapter};
use shared_bus::{CancellationToken, InMemoryEventBus};
use shared_types::{BlockType, FixedTimeSource, GameError, Position, TimeSource, Turn};

fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => panic!("runtime: {e}"),
    }
}

fn container(width: i32, height: i32) -> GameContainer {
    let mut config = GameConfig::default();
    config.grid.width = width;
    config.grid.height = height;
    GameContainer::new(config).unwrap()
}

fn coordinate() -> impl Strategy<Value = i32> {
    -3..15i32
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_placement_respects_bounds(
        width in 1..12i32,
        height in 1..12i32,
        x in coordinate(),
        y in coordinate(),
    ) {
        let rt = runtime();
        let game = container(width, height);
        let commands = game.commands();
        let cancel = CancellationToken::none();

        let result = rt.block_on(
            commands.place_block(PlaceBlockCommand::new(BlockType::Creativity, (x, y)), &cancel),
        );
        let inside = (0..width).contains(&x) && (0..height).contains(&y);
        if inside {
            let block = result.unwrap();
            prop_assert_eq!(commands.block_at(Position::new(x, y)).unwrap(), Some(block));
        } else {
            prop_assert_eq!(
                result.unwrap_err(),
                GameError::OutOfBounds { position: Position::new(x, y), width, height }
            );
            prop_assert!(commands.blocks().unwrap().is_empty());
        }
    }

    #[test]
    fn prop_move_to_own_position_is_rejected(x in 0..10i32, y in 0..10i32) {
        let rt = runtime();
        let game = container(10, 10);
        let commands = game.commands();
        let cancel = CancellationToken::none();

        let block = rt
            .block_on(commands.place_block(PlaceBlockCommand::new(BlockType::Work, (x, y)), &cancel))
            .unwrap();
        let err = rt
            .block_on(commands.move_block(MoveBlockCommand::new(block.id(), (x, y)), &cancel))
            .unwrap_err();

        prop_assert_eq!(err.code(), "NO_OP_MOVE");
        prop_assert_eq!(commands.get_block(block.id()).unwrap(), block);
    }

    #[test]
    fn prop_place_then_move_round_trips(
        from in (0..10i32, 0..10i32),
        to in (0..10i32, 0..10i32),
    ) {
        prop_assume!(from != to);
        let rt = runtime();
        let game = container(10, 10);
        let commands = game.commands();
        let cancel = CancellationToken::none();

        let block = rt
            .block_on(commands.place_block(PlaceBlockCommand::new(BlockType::Study, from), &cancel))
            .unwrap();
        rt.block_on(commands.move_block(MoveBlockCommand::new(block.id(), to), &cancel))
            .unwrap();

        prop_assert_eq!(commands.block_at(to.into()).unwrap().map(|b| b.id()), Some(block.id()));
        prop_assert_eq!(commands.block_at(from.into()).unwrap(), None);
    }

    #[test]
    fn prop_each_advance_adds_one(advances in 1..6usize) {
        let rt = runtime();
        let game = container(10, 10);
        let commands = game.commands();
        let cancel = CancellationToken::none();

        let mut last = commands.current_turn().number();
        for _ in 0..advances {
            let advance = rt.block_on(commands.advance_turn(&cancel)).unwrap();
            prop_assert_eq!(advance.previous.number(), last);
            prop_assert_eq!(advance.current.number(), last + 1);
            last = advance.current.number();
        }
        prop_assert_eq!(commands.current_turn().number(), 1 + advances as u32);
    }

    #[test]
    fn prop_advance_near_max_only_fails_at_max(offset in 0..3u32) {
        let rt = runtime();
        let time = Arc::new(FixedTimeSource::default());
        let start = Turn::new(Turn::MAX_NUMBER - offset, time.now()).unwrap();
        let manager = TurnManager::starting_at(
            start,
            Arc::new(InMemoryEventBus::new()),
            Arc::new(PatternEffectsAdapter::new(PatternTracker::new())),
            time,
            TurnConfig::default(),
        );
        let cancel = CancellationToken::none();

        for _ in 0..offset {
            rt.block_on(manager.advance_turn(&cancel)).unwrap();
        }
        let err = rt.block_on(manager.advance_turn(&cancel)).unwrap_err();
        prop_assert_eq!(err, GameError::TurnOverflow { current: Turn::MAX_NUMBER });
        prop_assert_eq!(manager.current_turn().number(), Turn::MAX_NUMBER);
    }
}
