//! # Game Container
//!
//! Dependency injection container for all BlockLife subsystems.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, GameConfig};
pub use subsystems::{ConcreteGridService, GameContainer};
