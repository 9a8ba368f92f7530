//! Population tracking across a run.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Live population counts at the end of one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSample {
    pub tick: u64,
    pub prey: usize,
    pub predators: usize,
}

impl PopulationSample {
    /// One-line summary for periodic console output
    pub fn summary(&self) -> String {
        format!(
            "T:{:6} | Prey:{:5} | Predators:{:5}",
            self.tick, self.prey, self.predators
        )
    }
}

/// Tick-indexed population series, one sample per completed tick plus the
/// initial state at tick 0.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    samples: Vec<PopulationSample>,
}

impl StatsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample
    pub fn record(&mut self, tick: u64, prey: usize, predators: usize) {
        self.samples.push(PopulationSample {
            tick,
            prey,
            predators,
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn samples(&self) -> &[PopulationSample] {
        &self.samples
    }

    pub fn latest(&self) -> Option<&PopulationSample> {
        self.samples.last()
    }

    /// Prey counts over time
    pub fn prey_series(&self) -> Vec<(u64, usize)> {
        self.samples.iter().map(|s| (s.tick, s.prey)).collect()
    }

    /// Predator counts over time
    pub fn predator_series(&self) -> Vec<(u64, usize)> {
        self.samples.iter().map(|s| (s.tick, s.predators)).collect()
    }

    /// Write the series as CSV rows of (tick, prey, predators)
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "tick,prey,predators")?;
        for sample in &self.samples {
            writeln!(file, "{},{},{}", sample.tick, sample.prey, sample.predators)?;
        }
        Ok(())
    }

    /// Save the series to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.samples)?;
        std::fs::write(path, json)
    }
}
