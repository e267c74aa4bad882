//! # Shared Types Crate
//!
//! This crate contains the domain entities and the error type shared by every
//! BlockLife subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Copy-on-Write Values**: `Block` and `Turn` are immutable. Every mutation
//!   (`Block::move_to`, `Turn::next`) returns a new value.
//! - **Explicit Results**: Expected domain failures are `GameError` values,
//!   never panics.

pub mod entities;
pub mod errors;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use time::{FixedTimeSource, SystemTimeSource, TimeSource, Timestamp};
