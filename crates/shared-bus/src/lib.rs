//! # Shared Bus - Event Bus for Inter-Subsystem Communication
//!
//! Grid commands, pattern processing and the turn manager never call the UI
//! layer. They publish `GameEvent`s here; consumers hold their own
//! subscriptions.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────────┐
//! │ Grid / Turns │                    │ Pattern processor│
//! │              │    publish()       │ Presenter bridge │
//! │              │ ──────┐            │                  │
//! └──────────────┘       │            └──────────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Cancellation tokens live here as well because every asynchronous call that
//! touches the bus accepts one.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod cancellation;
pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use cancellation::{CancellationSource, CancellationToken};
pub use events::{source, EventFilter, EventTopic, GameEvent, RemovalCause};
pub use publisher::{EventPublisher, InMemoryEventBus, PublishError};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
