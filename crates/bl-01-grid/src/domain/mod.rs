//! Grid domain: bounds, commands and validation rules.

pub mod bounds;
pub mod commands;
pub mod rules;

pub use bounds::GridBounds;
pub use commands::{MoveBlockCommand, PlaceBlockCommand, RemoveBlockCommand};
