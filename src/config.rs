//! Configuration for the simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub terrain: TerrainConfig,
    pub agents: AgentConfig,
    pub spawner: SpawnerConfig,
    pub logging: LoggingConfig,
}

/// World/grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Grid width in cells
    pub width: u16,
    /// Grid height in cells
    pub height: u16,
    /// Fraction of cells flagged as impassable obstacles (0.0 - 1.0)
    pub obstacle_fraction: f32,
}

/// Terrain cost configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Movement cost of ordinary cells
    pub default_cost: f32,
    /// Movement cost of rough cells
    pub high_cost: f32,
    /// Probability that a cell is rough (0.0 - 1.0)
    pub high_cost_prob: f32,
}

/// Agent population configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Number of prey at start
    pub initial_prey: usize,
    /// Number of predators at start
    pub initial_predators: usize,
    /// Prey vision range (Chebyshev radius)
    pub prey_vision: u16,
    /// Predator vision range (Chebyshev radius)
    pub predator_vision: u16,
}

/// Spawner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnerConfig {
    /// Ticks between predator emissions
    pub interval: u32,
    /// Lower bound the interval may accelerate down to
    pub min_interval: u32,
    /// Whether each emission shortens the interval by one tick
    pub accelerate: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Ticks between population summaries
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            terrain: TerrainConfig::default(),
            agents: AgentConfig::default(),
            spawner: SpawnerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 30,
            obstacle_fraction: 0.05,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            default_cost: 1.0,
            high_cost: 3.0,
            high_cost_prob: 0.08,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            initial_prey: 20,
            initial_predators: 5,
            prey_vision: 5,
            predator_vision: 6,
        }
    }
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            interval: 30,
            min_interval: 5,
            accelerate: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 10,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.world.width,
                height: self.world.height,
            });
        }
        if !(0.0..=1.0).contains(&self.world.obstacle_fraction) {
            return Err(ConfigError::InvalidFraction {
                field: "obstacle_fraction",
                value: self.world.obstacle_fraction,
            });
        }
        if !(0.0..=1.0).contains(&self.terrain.high_cost_prob) {
            return Err(ConfigError::InvalidFraction {
                field: "high_cost_prob",
                value: self.terrain.high_cost_prob,
            });
        }
        if !self.terrain.default_cost.is_finite() || self.terrain.default_cost < 0.0 {
            return Err(ConfigError::InvalidCost {
                field: "default_cost",
                value: self.terrain.default_cost,
            });
        }
        if !self.terrain.high_cost.is_finite() || self.terrain.high_cost < 0.0 {
            return Err(ConfigError::InvalidCost {
                field: "high_cost",
                value: self.terrain.high_cost,
            });
        }
        if self.spawner.min_interval == 0 || self.spawner.interval < self.spawner.min_interval {
            return Err(ConfigError::InvalidInterval {
                interval: self.spawner.interval,
                min_interval: self.spawner.min_interval,
            });
        }
        if self.logging.stats_interval == 0 {
            return Err(ConfigError::InvalidInterval {
                interval: 0,
                min_interval: 1,
            });
        }
        Ok(())
    }
}

/// Errors raised while building or loading a configuration
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    InvalidDimensions { width: u16, height: u16 },
    InvalidFraction { field: &'static str, value: f32 },
    InvalidCost { field: &'static str, value: f32 },
    InvalidInterval { interval: u32, min_interval: u32 },
    /// Every cell is an obstacle; nowhere to place agents
    NoFreeCells,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::InvalidDimensions { width, height } => {
                write!(f, "Grid dimensions must be at least 1x1, got {}x{}", width, height)
            }
            Self::InvalidFraction { field, value } => {
                write!(f, "{} must be within [0, 1], got {}", field, value)
            }
            Self::InvalidCost { field, value } => {
                write!(f, "{} must be finite and non-negative, got {}", field, value)
            }
            Self::InvalidInterval { interval, min_interval } => {
                write!(
                    f,
                    "Spawn interval {} must be at least its floor {} (and the floor at least 1)",
                    interval, min_interval
                )
            }
            Self::NoFreeCells => write!(f, "Grid has no unblocked cells left for placement"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e)
    }
}
