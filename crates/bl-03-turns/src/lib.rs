//! # Turn Subsystem (bl-03)
//!
//! Owns the monotonically increasing turn counter.
//!
//! ## Ordering Guarantees
//!
//! - `TurnEnded(n)` is published before `TurnStarted(n + 1)`
//! - `TurnStarted` is published only after both settle waits finished
//! - Overflow at `Turn::MAX_NUMBER` fails before any notification
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - `TurnAdvance` report
//! - `ports/` - `TurnApi` (inbound), `PendingEffects` (outbound)
//! - `service.rs` - `TurnManager`

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::{TurnConfig, TurnConfigError};
pub use domain::TurnAdvance;
pub use ports::{PendingEffects, TurnApi};
pub use service::TurnManager;
