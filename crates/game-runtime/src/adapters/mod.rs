//! # Adapter Implementations
//!
//! Concrete adapters that connect the subsystems at the composition root:
//!
//! - `PatternEffectsAdapter` implements the turn manager's outbound
//!   `PendingEffects` port over the pattern tracker
//! - `LoggingPresenter` and `MetricsPresenter` consume notifications through
//!   the presenter registry

pub mod pattern_effects;
pub mod presenters;

pub use pattern_effects::PatternEffectsAdapter;
pub use presenters::{LoggingPresenter, MetricsPresenter};
