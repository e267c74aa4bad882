//! # Grid Subsystem (bl-01)
//!
//! The authoritative grid of blocks and the commands that mutate it.
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Bounds | Every block lies in `[0, width) x [0, height)` |
//! | Occupancy | At most one block per position |
//! | Capacity | The grid never holds more than its configured maximum |
//! | Minimum population | A removal never leaves the grid empty |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Bounds, commands and stateless validation rules
//! - `ports/` - `GridApi` (inbound) and `BlockRepository` (outbound)
//! - `adapters/` - In-memory grid state store
//! - `service.rs` - Command handlers implementing `GridApi`
//!
//! ## Usage
//!
//! ```ignore
//! use bl_01_grid::{GridApi, GridConfig, GridService, InMemoryGridStore, PlaceBlockCommand};
//!
//! let store = Arc::new(InMemoryGridStore::new(&GridConfig::default()));
//! let grid = GridService::new(store, bus, Arc::new(SystemTimeSource));
//!
//! let block = grid
//!     .place_block(PlaceBlockCommand::new(BlockType::Work, (2, 2)), &cancel)
//!     .await?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryGridStore;
pub use config::{GridConfig, GridConfigError};
pub use domain::{GridBounds, MoveBlockCommand, PlaceBlockCommand, RemoveBlockCommand};
pub use ports::{BlockRepository, GridApi};
pub use service::GridService;
