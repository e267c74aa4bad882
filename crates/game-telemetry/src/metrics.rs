//! Prometheus metrics for BlockLife subsystems.
//!
//! All metrics follow the naming convention: `bl_<subsystem>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., pattern_matches_total)
//! - **Gauge**: Value that can go up or down (e.g., grid_blocks)
//! - **Histogram**: Distribution of values (e.g., command_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // GRID METRICS (Subsystem 1)
    // =========================================================================

    /// Commands handled, by kind and outcome
    pub static ref COMMANDS: CounterVec = CounterVec::new(
        Opts::new("bl_grid_commands_total", "Grid commands handled"),
        &["kind", "outcome"]  // kind: place/move/remove, outcome: ok or an error code
    ).expect("metric creation failed");

    /// Blocks currently on the grid
    pub static ref BLOCKS_ON_GRID: Gauge = Gauge::new(
        "bl_grid_blocks",
        "Number of blocks on the grid"
    ).expect("metric creation failed");

    /// Command handling duration
    pub static ref COMMAND_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "bl_grid_command_duration_seconds",
            "Time spent handling a grid command"
        ).buckets(exponential_buckets(0.00001, 2.0, 15).unwrap_or_default())
    ).expect("metric creation failed");

    // =========================================================================
    // PATTERN METRICS (Subsystem 2)
    // =========================================================================

    /// Matches found, by block type
    pub static ref PATTERN_MATCHES: CounterVec = CounterVec::new(
        Opts::new("bl_patterns_matches_total", "Patterns matched and cleared"),
        &["block_type"]
    ).expect("metric creation failed");

    /// Blocks cleared by patterns
    pub static ref BLOCKS_CLEARED: Counter = Counter::new(
        "bl_patterns_blocks_cleared_total",
        "Blocks removed by pattern clears"
    ).expect("metric creation failed");

    // =========================================================================
    // TURN METRICS (Subsystem 3)
    // =========================================================================

    /// Current turn number
    pub static ref CURRENT_TURN: Gauge = Gauge::new(
        "bl_turns_current",
        "Current turn number"
    ).expect("metric creation failed");

    /// Turn advances by outcome
    pub static ref TURN_ADVANCES: CounterVec = CounterVec::new(
        Opts::new("bl_turns_advances_total", "Turn advance attempts"),
        &["outcome"]  // outcome: ok or an error code
    ).expect("metric creation failed");

    /// Settle waits that hit their timeout
    pub static ref SETTLE_TIMEOUTS: Counter = Counter::new(
        "bl_turns_settle_timeouts_total",
        "Turn advances that proceeded before pattern effects settled"
    ).expect("metric creation failed");

    // =========================================================================
    // NOTIFICATION BRIDGE METRICS
    // =========================================================================

    /// Events forwarded to presenters
    pub static ref EVENTS_FORWARDED: CounterVec = CounterVec::new(
        Opts::new("bl_bridge_events_forwarded_total", "Events delivered to presenters"),
        &["event_type"]
    ).expect("metric creation failed");

    /// Presenter failures (panics during dispatch)
    pub static ref PRESENTER_FAILURES: CounterVec = CounterVec::new(
        Opts::new("bl_bridge_presenter_failures_total", "Presenter dispatch failures"),
        &["presenter"]
    ).expect("metric creation failed");
}

/// Handle proving the metrics were registered.
#[derive(Debug, Clone)]
pub struct MetricsHandle {
    registry: Registry,
}

impl MetricsHandle {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Register all metrics with the global registry.
///
/// Registering twice is harmless.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Grid
        Box::new(COMMANDS.clone()),
        Box::new(BLOCKS_ON_GRID.clone()),
        Box::new(COMMAND_DURATION.clone()),
        // Patterns
        Box::new(PATTERN_MATCHES.clone()),
        Box::new(BLOCKS_CLEARED.clone()),
        // Turns
        Box::new(CURRENT_TURN.clone()),
        Box::new(TURN_ADVANCES.clone()),
        Box::new(SETTLE_TIMEOUTS.clone()),
        // Bridge
        Box::new(EVENTS_FORWARDED.clone()),
        Box::new(PRESENTER_FAILURES.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: REGISTRY.clone(),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Count one handled command.
pub fn record_command(kind: &str, outcome: &str) {
    COMMANDS.with_label_values(&[kind, outcome]).inc();
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
