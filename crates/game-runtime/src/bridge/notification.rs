//! # Notification Bridge
//!
//! Forwards bus events to the presenter registry. The bridge owns its bus
//! subscription; the domain never sees a presenter.

use crate::bridge::PresenterRegistry;
use shared_bus::{CancellationToken, Subscription};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub struct NotificationBridge {
    registry: Arc<PresenterRegistry>,
}

impl NotificationBridge {
    pub fn new(registry: Arc<PresenterRegistry>) -> Self {
        Self { registry }
    }

    /// Forward events until cancelled or the bus closes. Returns the number
    /// of events forwarded.
    pub async fn run(&self, mut subscription: Subscription, cancel: CancellationToken) -> u64 {
        info!("Notification bridge started");
        let mut forwarded = 0u64;

        while let Some(event) = subscription.recv_until_cancelled(&cancel).await {
            forwarded += 1;
            if let Err(e) = self.registry.dispatch(&event) {
                // Already logged per presenter; keep forwarding
                warn!(event = event.name(), code = e.code(), "Dispatch incomplete");
            }
        }

        info!(forwarded, "Notification bridge stopped");
        forwarded
    }

    /// Run on a task owned by the caller.
    pub fn spawn(self, subscription: Subscription, cancel: CancellationToken) -> JoinHandle<u64> {
        tokio::spawn(async move { self.run(subscription, cancel).await })
    }
}
