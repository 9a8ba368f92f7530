//! # QUARRY
//!
//! Predator-prey ecosystem simulator on a bounded 2D grid.
//!
//! ## Features
//!
//! - **Cost-aware pathfinding**: weighted shortest paths over variable terrain
//! - **Species policies**: per-species decision logic for prey, predators, and spawners
//! - **Fog of war**: per-tick visible set plus a cumulative explored set
//! - **Configurable**: YAML configuration files
//! - **Reproducible**: seeded random number generation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quarry::{Config, World};
//!
//! // Create world with default config
//! let config = Config::default();
//! let mut world = World::new(config).unwrap();
//!
//! // Run until a species dies out or the tick limit is reached
//! world.run(1000);
//!
//! // Check results
//! println!("Prey: {}", world.prey_count());
//! println!("Predators: {}", world.predator_count());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use quarry::Config;
//!
//! let mut config = Config::default();
//! config.world.width = 60;
//! config.agents.initial_prey = 80;
//! ```

pub mod agents;
pub mod config;
pub mod grid;
pub mod path;
pub mod snapshot;
pub mod stats;
pub mod visibility;
pub mod world;

// Re-export main types
pub use agents::{Action, Agent, AgentId, Species};
pub use config::{Config, ConfigError};
pub use grid::{Grid, Pos};
pub use path::find_path;
pub use snapshot::WorldSnapshot;
pub use stats::StatsHistory;
pub use visibility::VisibilityMap;
pub use world::World;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark on a square grid
pub fn benchmark(ticks: u64, size: u16) -> Result<BenchmarkResult, ConfigError> {
    use std::time::Instant;

    let mut config = Config::default();
    config.world.width = size;
    config.world.height = size;
    let cells = size as usize * size as usize;
    config.agents.initial_prey = (cells / 45).max(1);
    config.agents.initial_predators = (cells / 180).max(1);

    let initial_prey = config.agents.initial_prey;
    let initial_predators = config.agents.initial_predators;
    let mut world = World::new(config)?;

    let start = Instant::now();
    let processed = world.run(ticks);
    let elapsed = start.elapsed();

    Ok(BenchmarkResult {
        ticks,
        processed,
        initial_prey,
        initial_predators,
        final_prey: world.prey_count(),
        final_predators: world.predator_count(),
        elapsed_secs: elapsed.as_secs_f64(),
        ticks_per_second: processed as f64 / elapsed.as_secs_f64(),
    })
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub ticks: u64,
    pub processed: u64,
    pub initial_prey: usize,
    pub initial_predators: usize,
    pub final_prey: usize,
    pub final_predators: usize,
    pub elapsed_secs: f64,
    pub ticks_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Ticks: {} of {}", self.processed, self.ticks)?;
        writeln!(f, "Prey: {} -> {}", self.initial_prey, self.final_prey)?;
        writeln!(
            f,
            "Predators: {} -> {}",
            self.initial_predators, self.final_predators
        )?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} ticks/s", self.ticks_per_second)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_quick_simulation() {
        let config = Config::default();
        let mut world = World::new_with_seed(config, 42).unwrap();

        let processed = world.run(50);

        assert_eq!(world.tick, processed);
        assert!(processed <= 50);
        assert_eq!(world.history().len(), processed as usize + 1);
    }

    #[test]
    fn test_benchmark() {
        let result = benchmark(20, 16).unwrap();

        assert_eq!(result.ticks, 20);
        assert!(result.processed >= 1);
        assert!(result.ticks_per_second > 0.0);
    }
}
