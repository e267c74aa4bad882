//! Ports module for the Grid subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::GridApi;
pub use outbound::BlockRepository;
