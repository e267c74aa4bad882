//! # Game Configuration
//!
//! Unified configuration for all subsystems and runtime parameters.
//! All timeouts and limits have sane defaults with environment overrides.

use bl_01_grid::{GridConfig, GridConfigError};
use bl_02_patterns::{PatternConfig, PatternConfigError};
use bl_03_turns::{TurnConfig, TurnConfigError};
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid grid configuration: {0}")]
    Grid(#[from] GridConfigError),

    #[error("invalid pattern configuration: {0}")]
    Pattern(#[from] PatternConfigError),

    #[error("invalid turn configuration: {0}")]
    Turn(#[from] TurnConfigError),

    #[error("bus capacity must be positive")]
    ZeroBusCapacity,

    #[error("{var}={value:?} is not a valid value")]
    InvalidValue { var: &'static str, value: String },
}

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub patterns: PatternConfig,
    pub turns: TurnConfig,
    /// Event bus channel capacity.
    pub bus_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            patterns: PatternConfig::default(),
            turns: TurnConfig::default(),
            bus_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl GameConfig {
    /// Defaults overridden from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BL_GRID_WIDTH`, `BL_GRID_HEIGHT`: grid size (default: 10x10)
    /// - `BL_MAX_BLOCKS`: block capacity (default: one per cell)
    /// - `BL_MIN_MATCH`: minimum match size (default: 3)
    /// - `BL_SETTLE_TIMEOUT_MS`: first turn wait (default: 3000)
    /// - `BL_RECHECK_TIMEOUT_MS`: second turn wait (default: 1000)
    /// - `BL_BUS_CAPACITY`: event bus capacity (default: 1000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, then validate.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(width) = parse(&lookup, "BL_GRID_WIDTH")? {
            config.grid.width = width;
        }
        if let Some(height) = parse(&lookup, "BL_GRID_HEIGHT")? {
            config.grid.height = height;
        }
        if let Some(max_blocks) = parse(&lookup, "BL_MAX_BLOCKS")? {
            config.grid.max_blocks = Some(max_blocks);
        }
        if let Some(min_match) = parse(&lookup, "BL_MIN_MATCH")? {
            config.patterns.min_match_size = min_match;
        }
        if let Some(ms) = parse(&lookup, "BL_SETTLE_TIMEOUT_MS")? {
            config.turns.settle_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse(&lookup, "BL_RECHECK_TIMEOUT_MS")? {
            config.turns.recheck_timeout = Duration::from_millis(ms);
        }
        if let Some(capacity) = parse(&lookup, "BL_BUS_CAPACITY")? {
            config.bus_capacity = capacity;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.patterns.validate()?;
        self.turns.validate()?;
        if self.bus_capacity == 0 {
            return Err(ConfigError::ZeroBusCapacity);
        }
        Ok(())
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}
