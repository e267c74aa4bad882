pub mod matcher;
pub mod tracker;

pub use matcher::{find_match, PatternMatch};
pub use tracker::{PatternActivity, PatternListener, PatternTracker};
