//! # Handlers
//!
//! Entry points the outside world drives the game through.

pub mod commands;

pub use commands::CommandGateway;
