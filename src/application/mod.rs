mod engine;
mod runner;
mod ticker;

pub use engine::SimulationEngine;
pub use runner::{SimulationHandle, Snapshot};
pub use ticker::Ticker;
