//! Adapters for the grid ports.

pub mod memory_store;

pub use memory_store::InMemoryGridStore;
