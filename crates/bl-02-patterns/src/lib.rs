//! # Pattern Subsystem (bl-02)
//!
//! Detects connected groups of same-type blocks after placements and moves,
//! clears them from the grid, and tracks the in-flight work so turn
//! advancement can wait for it.
//!
//! ## Crate Structure
//!
//! - `domain/` - Flood-fill matcher and the in-flight tracker
//! - `config.rs` - Minimum match size
//! - `service.rs` - `PatternProcessor`, driven by grid notifications

pub mod config;
pub mod domain;
pub mod service;

pub use config::{PatternConfig, PatternConfigError};
pub use domain::{find_match, PatternActivity, PatternListener, PatternMatch, PatternTracker};
pub use service::{trigger_filter, PatternProcessor};
