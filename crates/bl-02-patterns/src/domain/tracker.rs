//! In-flight pattern effect tracking.
//!
//! Besides counting running effects, the tracker records how far the
//! attached processor has read the notification stream. The processor
//! acknowledges each `TurnEnded` it receives; since delivery is in publish
//! order, every grid notification published before that turn ended has
//! been handled by then.

use shared_bus::CancellationToken;
use shared_types::{GameError, GameResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TrackerState {
    in_flight: usize,
    /// Processors currently reading notifications.
    listeners: usize,
    /// Highest `TurnEnded` number acknowledged.
    turn_ended: u32,
}

impl TrackerState {
    fn settled_through(&self, turn: u32) -> bool {
        self.listeners == 0 || (self.turn_ended >= turn && self.in_flight == 0)
    }
}

/// Counts pattern effects that have started but not finished.
///
/// Clones share the same state.
#[derive(Debug, Clone)]
pub struct PatternTracker {
    state: Arc<watch::Sender<TrackerState>>,
}

impl PatternTracker {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(TrackerState::default());
        Self {
            state: Arc::new(sender),
        }
    }

    /// Mark one effect as started. It finishes when the guard drops.
    #[must_use = "the effect ends as soon as the guard is dropped"]
    pub fn begin(&self) -> PatternActivity {
        self.state.send_modify(|state| state.in_flight += 1);
        PatternActivity {
            state: Arc::clone(&self.state),
        }
    }

    /// Register a processor reading notifications. Until the guard drops,
    /// `wait_for_turn_end` waits for it to acknowledge.
    #[must_use = "the processor detaches as soon as the guard is dropped"]
    pub fn attach(&self) -> PatternListener {
        self.state.send_modify(|state| state.listeners += 1);
        PatternListener {
            state: Arc::clone(&self.state),
        }
    }

    /// Record that notifications up to `TurnEnded(turn)` have been handled.
    pub fn acknowledge_turn_end(&self, turn: u32) {
        self.state.send_if_modified(|state| {
            if turn > state.turn_ended {
                state.turn_ended = turn;
                true
            } else {
                false
            }
        });
    }

    pub fn in_flight(&self) -> usize {
        self.state.borrow().in_flight
    }

    pub fn is_attached(&self) -> bool {
        self.state.borrow().listeners > 0
    }

    /// Highest acknowledged `TurnEnded` number, 0 before the first.
    pub fn last_turn_end(&self) -> u32 {
        self.state.borrow().turn_ended
    }

    /// Wait until no effect is in flight.
    ///
    /// Returns `Ok(true)` once idle and `Ok(false)` if `timeout` elapses
    /// first. Fails with `Cancelled` when `cancel` fires.
    pub async fn wait_until_idle(
        &self,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> GameResult<bool> {
        self.wait_for(timeout, cancel, |state| state.in_flight == 0)
            .await
    }

    /// Wait until the attached processor has acknowledged `TurnEnded(turn)`
    /// and nothing is in flight.
    ///
    /// Resolves at once when no processor is attached. Same results as
    /// `wait_until_idle` otherwise.
    pub async fn wait_for_turn_end(
        &self,
        turn: u32,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> GameResult<bool> {
        self.wait_for(timeout, cancel, |state| state.settled_through(turn))
            .await
    }

    async fn wait_for(
        &self,
        timeout: Duration,
        cancel: &CancellationToken,
        done: impl Fn(&TrackerState) -> bool,
    ) -> GameResult<bool> {
        let mut receiver = self.state.subscribe();
        let reached = async move {
            loop {
                let state = *receiver.borrow_and_update();
                if done(&state) {
                    return true;
                }
                // The sender lives as long as `self`
                if receiver.changed().await.is_err() {
                    return false;
                }
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(GameError::Cancelled),
            settled = tokio::time::timeout(timeout, reached) => {
                let settled = settled.unwrap_or(false);
                if !settled {
                    let state = *self.state.borrow();
                    debug!(
                        in_flight = state.in_flight,
                        turn_ended = state.turn_ended,
                        ?timeout,
                        "Pattern effects still running"
                    );
                }
                Ok(settled)
            }
        }
    }
}

impl Default for PatternTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard for one in-flight effect.
#[derive(Debug)]
pub struct PatternActivity {
    state: Arc<watch::Sender<TrackerState>>,
}

impl Drop for PatternActivity {
    fn drop(&mut self) {
        self.state
            .send_modify(|state| state.in_flight = state.in_flight.saturating_sub(1));
    }
}

/// RAII guard for an attached processor.
#[derive(Debug)]
pub struct PatternListener {
    state: Arc<watch::Sender<TrackerState>>,
}

impl Drop for PatternListener {
    fn drop(&mut self) {
        self.state
            .send_modify(|state| state.listeners = state.listeners.saturating_sub(1));
    }
}
