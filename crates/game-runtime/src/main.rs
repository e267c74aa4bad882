//! # BlockLife Demo
//!
//! Runs a scripted session against the game core with logging and metrics
//! presenters attached. There is no UI; everything shows up in the log.
//!
//! ## Session
//!
//! 1. Load telemetry and game configuration from the environment
//! 2. Build the container and register presenters
//! 3. Place, move and remove blocks, including the rejected cases
//! 4. Line up three `Health` blocks so the pattern processor clears them
//! 5. Advance the turn twice
//! 6. Shut down and dump the metrics

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use bl_01_grid::{MoveBlockCommand, PlaceBlockCommand, RemoveBlockCommand};
use game_runtime::{CommandGateway, GameConfig, GameContainer, LoggingPresenter, MetricsPresenter};
use game_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use shared_bus::CancellationToken;
use shared_types::{BlockType, GameResult, Position};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("failed to initialize telemetry")?;

    let config = GameConfig::from_env().context("invalid game configuration")?;
    let container = GameContainer::new(config).context("failed to build game container")?;

    container.presenters.register(Arc::new(LoggingPresenter));
    container.presenters.register(Arc::new(MetricsPresenter));
    container.start();

    let cancel = container.cancel_token();
    let session = run_session(&container.commands(), &cancel).await;

    let forwarded = container.shutdown().await;
    info!(forwarded, "Session finished");

    match encode_metrics() {
        Ok(text) => println!("{text}"),
        Err(e) => warn!(error = %e, "Could not encode metrics"),
    }

    session.context("scripted session failed")
}

async fn run_session(gateway: &CommandGateway, cancel: &CancellationToken) -> GameResult<()> {
    let work = gateway
        .place_block(PlaceBlockCommand::new(BlockType::Work, (2, 2)), cancel)
        .await?;

    expect_rejected(
        "place on occupied cell",
        gateway
            .place_block(PlaceBlockCommand::new(BlockType::Study, (2, 2)), cancel)
            .await,
    );
    expect_rejected(
        "move onto itself",
        gateway
            .move_block(MoveBlockCommand::new(work.id(), (2, 2)), cancel)
            .await,
    );
    expect_rejected(
        "move off the grid",
        gateway
            .move_block(MoveBlockCommand::new(work.id(), (11, 2)), cancel)
            .await,
    );
    expect_rejected(
        "remove the last block",
        gateway
            .remove_block(RemoveBlockCommand::ById(work.id()), cancel)
            .await,
    );

    gateway
        .move_block(MoveBlockCommand::new(work.id(), (3, 3)), cancel)
        .await?;

    for x in 0..3 {
        gateway
            .place_block(PlaceBlockCommand::new(BlockType::Health, (x, 5)), cancel)
            .await?;
    }

    // Waits until the processor has read past these placements and cleared the row
    let advance = gateway.advance_turn(cancel).await?;
    info!(
        turn = advance.current.number(),
        settled = advance.fully_settled(),
        blocks = gateway.blocks()?.len(),
        "Turn advanced"
    );

    let study = gateway
        .place_block(PlaceBlockCommand::from_type_name("Study", (7, 7))?, cancel)
        .await?;
    gateway
        .remove_block(RemoveBlockCommand::At(study.position()), cancel)
        .await?;
    gateway.advance_turn(cancel).await?;

    for block in gateway.blocks()? {
        info!(block_id = %block.id(), position = %block.position(), block_type = %block.block_type(), "On grid");
    }
    info!(
        turn = gateway.current_turn().number(),
        occupied = gateway.block_at(Position::new(3, 3))?.is_some(),
        "Final state"
    );
    Ok(())
}

fn expect_rejected<T>(what: &str, result: GameResult<T>) {
    match result {
        Ok(_) => warn!(what, "Command unexpectedly succeeded"),
        Err(e) => info!(what, code = e.code(), error = %e, "Command rejected"),
    }
}
