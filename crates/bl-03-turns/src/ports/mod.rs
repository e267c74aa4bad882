pub mod inbound;
pub mod outbound;

pub use inbound::TurnApi;
pub use outbound::PendingEffects;
