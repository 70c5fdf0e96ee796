// Domain layer - Core simulation logic
pub mod domain;

// Application layer - Engine, timer and threaded host
pub mod application;

// Cross-cutting configuration and errors
pub mod config;
pub mod error;

// Infrastructure layer - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Cell, Grid, Pattern, PatternId, presets};
pub use application::{SimulationEngine, SimulationHandle, Snapshot, Ticker};
pub use config::{SimulationArgs, SimulationConfig};
pub use error::{ConfigError, EngineError};
