//! Simulation configuration.
//!
//! Values come from an optional TOML file, overlaid by command-line flags.
//! Every field has a documented default so a missing file or a partial
//! file is always valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Shortest tick interval the engine accepts
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// All tunables of the simulation in one place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid height in cells
    pub rows: usize,
    /// Grid width in cells
    pub cols: usize,
    /// Delay between generations while running, in milliseconds
    pub tick_interval_ms: u64,
    /// Live-cell probability used to seed the grid at start-up
    pub initial_density: f64,
    /// Live-cell probability used by the "randomize" control
    pub randomize_density: f64,
    /// Seed randomly and start running as soon as the engine boots
    pub auto_run: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            cols: 50,
            tick_interval_ms: 100,
            initial_density: 0.15,
            randomize_density: 0.30,
            auto_run: true,
        }
    }
}

impl SimulationConfig {
    /// Load and validate a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must have at least one cell, got {}x{}",
                self.rows, self.cols
            )));
        }
        for (name, density) in [
            ("initial_density", self.initial_density),
            ("randomize_density", self.randomize_density),
        ] {
            if !(0.0..=1.0).contains(&density) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within [0, 1], got {density}"
                )));
            }
        }
        if self.tick_interval() < MIN_TICK_INTERVAL {
            return Err(ConfigError::Invalid(format!(
                "tick_interval_ms must be at least {}",
                MIN_TICK_INTERVAL.as_millis()
            )));
        }
        Ok(())
    }
}

/// Command-line flags shared by every binary
#[derive(Args, Debug, Clone, Default)]
pub struct SimulationArgs {
    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Grid height in cells
    #[arg(long)]
    pub rows: Option<usize>,

    /// Grid width in cells
    #[arg(long)]
    pub cols: Option<usize>,

    /// Delay between generations in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Live-cell probability for the randomize control
    #[arg(long)]
    pub density: Option<f64>,

    /// Live-cell probability for the start-up seed
    #[arg(long)]
    pub initial_density: Option<f64>,

    /// Start with an empty, paused grid
    #[arg(long)]
    pub no_auto_run: bool,
}

impl SimulationArgs {
    /// Config file (or defaults) overlaid by the flags that were given
    pub fn resolve(&self) -> Result<SimulationConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_file(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(ms) = self.interval_ms {
            config.tick_interval_ms = ms;
        }
        if let Some(density) = self.density {
            config.randomize_density = density;
        }
        if let Some(density) = self.initial_density {
            config.initial_density = density;
        }
        if self.no_auto_run {
            config.auto_run = false;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!((config.rows, config.cols), (30, 50));
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert!(config.auto_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml("rows = 40\ntick_interval_ms = 250\n").unwrap();
        assert_eq!(config.rows, 40);
        assert_eq!(config.cols, 50);
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.initial_density, 0.15);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            SimulationConfig::from_toml("cols = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimulationConfig::from_toml("randomize_density = 1.5"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimulationConfig::from_toml("tick_interval_ms = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            SimulationConfig::from_toml("rows = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            SimulationConfig::from_file("/definitely/not/here.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = SimulationArgs {
            rows: Some(12),
            interval_ms: Some(500),
            density: Some(0.4),
            no_auto_run: true,
            ..Default::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.rows, 12);
        assert_eq!(config.cols, 50);
        assert_eq!(config.tick_interval_ms, 500);
        assert_eq!(config.randomize_density, 0.4);
        assert!(!config.auto_run);
    }

    #[test]
    fn test_flags_are_validated() {
        let args = SimulationArgs {
            initial_density: Some(-0.1),
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }
}
