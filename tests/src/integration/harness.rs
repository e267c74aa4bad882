//! Test harness around a started `GameContainer`.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use game_runtime::{CommandGateway, GameConfig, GameContainer, GamePresenter, PresenterHandle};
use shared_bus::{CancellationToken, EventFilter, GameEvent};

/// Default wait for asynchronous notifications.
pub const EVENT_TIMEOUT: Duration = Duration::from_secs(2);

/// Presenter that keeps every notification it receives.
#[derive(Default)]
pub struct RecordingPresenter {
    name: String,
    filter: EventFilter,
    events: Mutex<Vec<GameEvent>>,
}

impl RecordingPresenter {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: EventFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(GameEvent::name).collect()
    }

    /// Poll until `done` holds for the recorded events or `timeout` elapses.
    pub async fn wait_until(
        &self,
        timeout: Duration,
        done: impl Fn(&[GameEvent]) -> bool,
    ) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if done(self.events.lock().as_slice()) {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    /// Wait until at least `count` events named `name` arrived.
    pub async fn wait_for(&self, name: &str, count: usize) -> bool {
        self.wait_until(EVENT_TIMEOUT, |events| {
            events.iter().filter(|e| e.name() == name).count() >= count
        })
        .await
    }
}

impl GamePresenter for RecordingPresenter {
    fn name(&self) -> &str {
        if self.name.is_empty() {
            "recording"
        } else {
            &self.name
        }
    }

    fn filter(&self) -> EventFilter {
        self.filter.clone()
    }

    fn on_event(&self, event: &GameEvent) {
        self.events.lock().push(event.clone());
    }
}

/// A started container with a recording presenter attached.
pub struct TestGame {
    pub container: GameContainer,
    pub recorder: Arc<RecordingPresenter>,
    pub recorder_handle: PresenterHandle,
    pub commands: CommandGateway,
    pub cancel: CancellationToken,
}

impl TestGame {
    pub fn start() -> Self {
        Self::start_with(GameConfig::default())
    }

    pub fn start_with(config: GameConfig) -> Self {
        let container = match GameContainer::new(config) {
            Ok(container) => container,
            Err(e) => panic!("test configuration rejected: {e}"),
        };
        let recorder = Arc::new(RecordingPresenter::default());
        let recorder_handle = container.presenters.register(recorder.clone());
        container.start();

        let commands = container.commands();
        let cancel = container.cancel_token();
        Self {
            container,
            recorder,
            recorder_handle,
            commands,
            cancel,
        }
    }

    pub async fn stop(self) -> u64 {
        self.container.shutdown().await
    }
}
