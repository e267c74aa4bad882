//! # Presenter Registry
//!
//! Explicit observer registry owned by the composition root. Presenters are
//! held by the registry, never by the domain, so dropping the registry or
//! unregistering a handle tears a presenter down deterministically.

use game_telemetry::{EVENTS_FORWARDED, PRESENTER_FAILURES};
use parking_lot::RwLock;
use shared_bus::{EventFilter, GameEvent};
use shared_types::{GameError, GameResult};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error};

/// A UI-layer consumer of game notifications.
pub trait GamePresenter: Send + Sync {
    /// Name used in logs and metrics.
    fn name(&self) -> &str;

    /// Which events this presenter wants.
    fn filter(&self) -> EventFilter {
        EventFilter::all()
    }

    fn on_event(&self, event: &GameEvent);
}

/// Ticket returned by `register`, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PresenterHandle(u64);

struct Registration {
    handle: PresenterHandle,
    filter: EventFilter,
    presenter: Arc<dyn GamePresenter>,
}

/// Registry of presenters.
#[derive(Default)]
pub struct PresenterRegistry {
    registrations: RwLock<Vec<Registration>>,
    next_handle: AtomicU64,
}

impl PresenterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a presenter. Its filter is captured now.
    pub fn register(&self, presenter: Arc<dyn GamePresenter>) -> PresenterHandle {
        let handle = PresenterHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        debug!(presenter = presenter.name(), ?handle, "Presenter registered");
        self.registrations.write().push(Registration {
            handle,
            filter: presenter.filter(),
            presenter,
        });
        handle
    }

    /// Remove a presenter. Returns `false` if the handle was not registered.
    pub fn unregister(&self, handle: PresenterHandle) -> bool {
        let mut registrations = self.registrations.write();
        let before = registrations.len();
        registrations.retain(|r| r.handle != handle);
        let removed = registrations.len() != before;
        if removed {
            debug!(?handle, "Presenter unregistered");
        }
        removed
    }

    /// Remove every presenter.
    pub fn clear(&self) {
        self.registrations.write().clear();
    }

    pub fn len(&self) -> usize {
        self.registrations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.read().is_empty()
    }

    /// Deliver `event` to every presenter whose filter matches.
    ///
    /// A panicking presenter is isolated: the others still receive the event
    /// and the panic is reported as `PublishFailed`. Returns the number of
    /// presenters that handled the event.
    pub fn dispatch(&self, event: &GameEvent) -> GameResult<usize> {
        // Snapshot so presenters may (un)register from inside a callback
        let targets: Vec<Arc<dyn GamePresenter>> = self
            .registrations
            .read()
            .iter()
            .filter(|r| r.filter.matches(event))
            .map(|r| Arc::clone(&r.presenter))
            .collect();

        let mut delivered = 0;
        let mut failure = None;
        for presenter in targets {
            match panic::catch_unwind(AssertUnwindSafe(|| presenter.on_event(event))) {
                Ok(()) => {
                    delivered += 1;
                    EVENTS_FORWARDED.with_label_values(&[event.name()]).inc();
                }
                Err(payload) => {
                    let reason = format!(
                        "presenter {} panicked: {}",
                        presenter.name(),
                        panic_message(payload.as_ref())
                    );
                    error!(presenter = presenter.name(), event = event.name(), %reason, "Presenter failed");
                    PRESENTER_FAILURES.with_label_values(&[presenter.name()]).inc();
                    failure.get_or_insert(GameError::PublishFailed {
                        event: event.name().to_string(),
                        reason,
                    });
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(delivered),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
