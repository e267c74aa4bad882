//! # Notification Bridge
//!
//! ```text
//! Grid / Patterns / Turns ──GameEvent──→ Event Bus
//!                                           │ Subscription
//!                                           ↓
//!                                   NotificationBridge
//!                                           │ dispatch (filter, catch_unwind)
//!                                           ↓
//!                                   PresenterRegistry ──→ presenters
//! ```

pub mod notification;
pub mod registry;

pub use notification::NotificationBridge;
pub use registry::{GamePresenter, PresenterHandle, PresenterRegistry};
