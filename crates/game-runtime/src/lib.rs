//! # Game Runtime Library
//!
//! Composition root for BlockLife. Builds the grid, pattern and turn
//! subsystems around one event bus, owns the presenter registry, and runs the
//! long-lived tasks. The `blocklife` binary drives a scripted session on top.
//!
//! ## Notification Flow
//!
//! ```text
//! CommandGateway ──place/move/remove──→ Grid(1) ──BlockPlaced/Moved/Removed──→ Event Bus
//!                                                                                  │
//!                 ┌────────────────────────────────────────────────────────────────┤
//!                 ↓                                                                ↓
//!          PatternProcessor(2) ──clear_blocks──→ Grid(1)                NotificationBridge
//!                 │                                                                │
//!                 └──PatternMatched──→ Event Bus                          PresenterRegistry
//!
//! CommandGateway ──advance_turn──→ TurnManager(3) ──TurnEnded ... TurnStarted──→ Event Bus
//!                                        │
//!                                        └── waits on PatternEffectsAdapter
//! ```

pub mod adapters;
pub mod bridge;
pub mod container;
pub mod handlers;

pub use adapters::{LoggingPresenter, MetricsPresenter, PatternEffectsAdapter};
pub use bridge::{GamePresenter, NotificationBridge, PresenterHandle, PresenterRegistry};
pub use container::{ConfigError, GameConfig, GameContainer};
pub use handlers::CommandGateway;
