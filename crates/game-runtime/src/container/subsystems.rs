//! # Game Container
//!
//! Holds every subsystem instance and manages the lifecycle of the long-lived
//! tasks.
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: Event bus, time source
//! Level 1: Grid (store + service)
//! Level 2: Pattern processor (depends on the grid port)
//! Level 3: Turn manager (depends on pattern activity)
//! Level 4: Presenter registry and notification bridge
//! ```
//!
//! ## Task Ownership
//!
//! `start()` subscribes the processor and the bridge before either task is
//! spawned, so no command issued afterwards is missed. `shutdown()` cancels,
//! closes the bus and awaits both handles; nothing is detached.

use crate::adapters::PatternEffectsAdapter;
use crate::bridge::{NotificationBridge, PresenterRegistry};
use crate::container::config::{ConfigError, GameConfig};
use crate::handlers::CommandGateway;
use bl_01_grid::{GridService, InMemoryGridStore};
use bl_02_patterns::{trigger_filter, PatternProcessor, PatternTracker};
use bl_03_turns::TurnManager;
use parking_lot::Mutex;
use shared_bus::{CancellationSource, CancellationToken, EventFilter, InMemoryEventBus};
use shared_types::{SystemTimeSource, TimeSource};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

/// Grid service with the in-memory store.
pub type ConcreteGridService = GridService<InMemoryGridStore>;

struct RuntimeTasks {
    processor: JoinHandle<()>,
    bridge: JoinHandle<u64>,
}

/// Central container holding all subsystem instances.
pub struct GameContainer {
    /// Grid (Subsystem 1)
    pub grid: Arc<ConcreteGridService>,

    /// Pattern processor (Subsystem 2)
    pub patterns: Arc<PatternProcessor>,

    /// Turn manager (Subsystem 3)
    pub turns: Arc<TurnManager>,

    /// Presenters fed by the notification bridge.
    pub presenters: Arc<PresenterRegistry>,

    /// Event bus for inter-subsystem communication.
    pub event_bus: Arc<InMemoryEventBus>,

    /// Game configuration (immutable after initialization).
    pub config: GameConfig,

    shutdown: CancellationSource,
    tasks: Mutex<Option<RuntimeTasks>>,
}

impl GameContainer {
    /// Build every subsystem with the system clock.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_time_source(config, Arc::new(SystemTimeSource))
    }

    /// Build every subsystem with the given clock.
    #[instrument(name = "container_init", skip_all)]
    pub fn with_time_source(
        config: GameConfig,
        time_source: Arc<dyn TimeSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        info!("Initializing BlockLife game container");

        let event_bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));

        let store = Arc::new(InMemoryGridStore::new(&config.grid));
        let grid = Arc::new(GridService::new(
            store,
            event_bus.clone(),
            time_source.clone(),
        ));
        info!(
            width = config.grid.width,
            height = config.grid.height,
            capacity = config.grid.capacity(),
            "  [1] Grid initialized"
        );

        let tracker = PatternTracker::new();
        let patterns = Arc::new(PatternProcessor::new(
            grid.clone(),
            event_bus.clone(),
            time_source.clone(),
            tracker.clone(),
            config.patterns.clone(),
        ));
        info!(min_match_size = config.patterns.min_match_size, "  [2] Pattern processor initialized");

        let turns = Arc::new(TurnManager::new(
            event_bus.clone(),
            Arc::new(PatternEffectsAdapter::new(tracker)),
            time_source,
            config.turns.clone(),
        ));
        info!(
            settle_timeout = ?config.turns.settle_timeout,
            recheck_timeout = ?config.turns.recheck_timeout,
            "  [3] Turn manager initialized"
        );

        Ok(Self {
            grid,
            patterns,
            turns,
            presenters: Arc::new(PresenterRegistry::new()),
            event_bus,
            config,
            shutdown: CancellationSource::new(),
            tasks: Mutex::new(None),
        })
    }

    /// Spawn the pattern processor and the notification bridge.
    ///
    /// Must be called from within a Tokio runtime. A second call is ignored.
    pub fn start(&self) {
        let mut tasks = self.tasks.lock();
        if tasks.is_some() {
            warn!("Game container already started");
            return;
        }

        let processor_subscription = self.event_bus.subscribe(trigger_filter());
        let bridge_subscription = self.event_bus.subscribe(EventFilter::all());

        let processor = self
            .patterns
            .clone()
            .spawn(processor_subscription, self.shutdown.token());
        let bridge = NotificationBridge::new(self.presenters.clone())
            .spawn(bridge_subscription, self.shutdown.token());

        *tasks = Some(RuntimeTasks { processor, bridge });
        info!(subscribers = self.event_bus.subscriber_count(), "Game container started");
    }

    pub fn is_running(&self) -> bool {
        self.tasks.lock().is_some()
    }

    /// Token cancelled when the container shuts down.
    pub fn cancel_token(&self) -> CancellationToken {
        self.shutdown.token()
    }

    /// Instrumented command front door over this container's subsystems.
    pub fn commands(&self) -> CommandGateway {
        CommandGateway::new(self.grid.clone(), self.turns.clone())
    }

    /// Stop the long-lived tasks and wait for them to finish.
    ///
    /// Returns the number of notifications the bridge forwarded.
    pub async fn shutdown(&self) -> u64 {
        self.shutdown.cancel();
        self.event_bus.close();

        let tasks = self.tasks.lock().take();
        let Some(tasks) = tasks else {
            return 0;
        };

        if let Err(e) = tasks.processor.await {
            warn!(error = %e, "Pattern processor task failed");
        }
        let forwarded = match tasks.bridge.await {
            Ok(forwarded) => forwarded,
            Err(e) => {
                warn!(error = %e, "Notification bridge task failed");
                0
            }
        };

        self.presenters.clear();
        info!(forwarded, "Game container stopped");
        forwarded
    }
}
