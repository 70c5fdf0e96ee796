use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use super::Ticker;
use crate::config::{MIN_TICK_INTERVAL, SimulationConfig};
use crate::domain::{Cell, Grid, Pattern, PatternId};
use crate::error::{EngineError, Result};

/// SimulationEngine owns the grid, the generation counter and the play/pause
/// timer. Every mutation goes through its methods.
pub struct SimulationEngine {
    config: SimulationConfig,
    grid: Grid,
    /// Back buffer for `step`, swapped with `grid` after each generation
    scratch: Grid,
    generation: u64,
    interval: Duration,
    /// Active timer; present iff running
    schedule: Option<Ticker>,
    /// Bumped every time a new schedule begins
    schedule_epoch: u64,
}

impl SimulationEngine {
    /// Empty, stopped engine at generation 1
    pub fn new(config: SimulationConfig) -> Self {
        let (rows, cols) = (config.rows, config.cols);
        Self {
            interval: config.tick_interval().max(MIN_TICK_INTERVAL),
            grid: Grid::new(rows, cols),
            scratch: Grid::new(rows, cols),
            generation: 1,
            schedule: None,
            schedule_epoch: 0,
            config,
        }
    }

    /// Engine in its start-up state: randomly seeded and running when
    /// `auto_run` is set, otherwise the same as [`SimulationEngine::new`]
    pub fn boot(config: SimulationConfig) -> Self {
        let mut engine = Self::new(config);
        if engine.config.auto_run {
            let density = engine.config.initial_density;
            if let Err(err) = engine.randomize(density) {
                warn!("Start-up seed skipped: {}", err);
            }
            engine.start();
        }
        engine
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Read-only view of the current generation's grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.schedule.is_some()
    }

    /// Changes whenever `start` begins a new schedule. Lets an external
    /// timer tell whether the time it waited belongs to the current run.
    pub fn schedule_epoch(&self) -> u64 {
        self.schedule_epoch
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn tick_interval(&self) -> Duration {
        self.interval
    }

    /// Change the delay between generations; applies to a running timer immediately
    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.interval = interval.max(MIN_TICK_INTERVAL);
        if let Some(ticker) = self.schedule.as_mut() {
            ticker.set_interval(self.interval);
        }
        debug!("Tick interval set to {:?}", self.interval);
    }

    /// Advance one generation against a frozen snapshot of the grid
    pub fn step(&mut self) {
        self.grid.evolve_into(&mut self.scratch);
        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.generation += 1;
        debug!(
            "Generation {}: population={}",
            self.generation,
            self.grid.population()
        );
    }

    /// Feed elapsed host time to the timer. Returns true if a generation ran.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let fired = self
            .schedule
            .as_mut()
            .is_some_and(|ticker| ticker.advance(elapsed));
        if fired {
            self.step();
        }
        fired
    }

    /// Begin stepping on the timer. No-op when already running.
    pub fn start(&mut self) {
        if self.schedule.is_none() {
            self.schedule = Some(Ticker::new(self.interval));
            self.schedule_epoch += 1;
            info!("Simulation started: interval={:?}", self.interval);
        }
    }

    /// Cancel the timer. No-op when already stopped.
    pub fn stop(&mut self) {
        if self.schedule.take().is_some() {
            info!("Simulation stopped at generation {}", self.generation);
        }
    }

    /// Start if stopped, stop if running
    pub fn toggle_running(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Flip one cell. The generation counter is left alone.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<Cell> {
        self.grid.toggle(row, col)
    }

    /// Kill every cell, reset the generation to 1 and stop the timer
    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 1;
        self.stop();
        info!("Grid cleared");
    }

    /// Seed every cell alive with probability `density`
    pub fn randomize(&mut self, density: f64) -> Result<()> {
        self.randomize_with(&mut rand::rng(), density)
    }

    /// [`SimulationEngine::randomize`] with a caller-supplied random source
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&density) {
            return Err(EngineError::InvalidDensity(density));
        }
        self.grid.fill_random(rng, density);
        info!(
            "Grid randomized: density={}, population={}",
            density,
            self.grid.population()
        );
        Ok(())
    }

    /// Randomize with the configured density
    pub fn randomize_default(&mut self) -> Result<()> {
        self.randomize(self.config.randomize_density)
    }

    /// Seed the grid from the pattern catalogue by menu id.
    ///
    /// Id 0 does nothing. Any real pattern clears the grid first, exactly
    /// like [`SimulationEngine::clear`]. Unknown ids leave the grid cleared
    /// and report [`EngineError::UnknownPattern`].
    pub fn apply_pattern(&mut self, id: u32) -> Result<()> {
        match PatternId::try_from(id) {
            Ok(pattern_id) => {
                if let Some(pattern) = pattern_id.pattern() {
                    self.load_pattern(pattern);
                }
                Ok(())
            }
            Err(err) => {
                self.clear();
                warn!("Unknown pattern ID: {}", id);
                Err(err)
            }
        }
    }

    /// Clear, then place `pattern`, clipping cells that fall off the grid
    pub fn load_pattern(&mut self, pattern: &Pattern) {
        self.clear();
        let placed = pattern.place_on(&mut self.grid);
        if placed < pattern.len() {
            debug!(
                "Pattern {} clipped: {} of {} cells placed",
                pattern.name,
                placed,
                pattern.len()
            );
        }
        info!("Pattern loaded: {}", pattern.name);
    }

    /// Replace the whole grid. The matrix must match the engine's dimensions.
    pub fn set_grid(&mut self, matrix: Vec<Vec<Cell>>) -> Result<()> {
        let (rows, cols) = self.grid.dimensions();
        self.grid = Grid::from_matrix(rows, cols, matrix)?;
        Ok(())
    }
}

impl Drop for SimulationEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
