//! Background thread that drives a [`SimulationEngine`] on its tick interval.
//!
//! Grid, generation and running state stay together behind one mutex; the
//! thread only steps while holding it, so nothing steps after `stop` returns.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, info};

use super::SimulationEngine;
use crate::domain::Grid;

/// Messages sent to the timer thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerCommand {
    /// Cut the current wait short, picking up state changes
    Wake,
    Shutdown,
}

/// Copy of the observable engine state
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub grid: Grid,
    pub generation: u64,
    pub running: bool,
    pub population: usize,
}

/// Handle for controlling a simulation running on its own thread
pub struct SimulationHandle {
    engine: Arc<Mutex<SimulationEngine>>,
    command_tx: Sender<TimerCommand>,
    thread: Option<JoinHandle<()>>,
}

impl SimulationHandle {
    /// Move `engine` onto a timer thread
    pub fn spawn(engine: SimulationEngine) -> Self {
        let engine = Arc::new(Mutex::new(engine));
        let (command_tx, command_rx) = mpsc::channel();

        let shared = Arc::clone(&engine);
        let thread = thread::spawn(move || {
            loop {
                let (interval, epoch) = {
                    let engine = lock(&shared);
                    (engine.tick_interval(), engine.schedule_epoch())
                };
                let waited_from = Instant::now();
                match command_rx.recv_timeout(interval) {
                    Ok(TimerCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                    // A wake-up still counts the time already waited, but only
                    // toward the schedule that was active when the wait began
                    Ok(TimerCommand::Wake) | Err(RecvTimeoutError::Timeout) => {
                        let mut engine = lock(&shared);
                        if engine.schedule_epoch() == epoch {
                            engine.tick(waited_from.elapsed());
                        }
                    }
                }
            }
            debug!("Timer thread exited");
        });

        info!("Simulation thread spawned");
        Self {
            engine,
            command_tx,
            thread: Some(thread),
        }
    }

    /// Run `f` with exclusive access to the engine
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut SimulationEngine) -> R) -> R {
        let mut engine = lock(&self.engine);
        let result = f(&mut *engine);
        drop(engine);
        let _ = self.command_tx.send(TimerCommand::Wake);
        result
    }

    pub fn snapshot(&self) -> Snapshot {
        let engine = lock(&self.engine);
        Snapshot {
            grid: engine.grid().clone(),
            generation: engine.generation(),
            running: engine.is_running(),
            population: engine.population(),
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.engine).is_running()
    }

    /// Stop the engine and join the timer thread. Safe to call twice.
    pub fn shutdown(&mut self) {
        lock(&self.engine).stop();
        let _ = self.command_tx.send(TimerCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
            info!("Simulation thread joined");
        }
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn lock(engine: &Mutex<SimulationEngine>) -> MutexGuard<'_, SimulationEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::domain::PatternId;
    use std::time::Duration;

    fn fast_engine() -> SimulationEngine {
        SimulationEngine::new(SimulationConfig {
            tick_interval_ms: 1,
            auto_run: false,
            ..SimulationConfig::default()
        })
    }

    fn wait_for(handle: &SimulationHandle, done: impl Fn(&Snapshot) -> bool) -> Snapshot {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let snapshot = handle.snapshot();
            if done(&snapshot) || Instant::now() > deadline {
                return snapshot;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_idle_until_started() {
        let handle = SimulationHandle::spawn(fast_engine());
        thread::sleep(Duration::from_millis(20));
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.generation, 1);
        assert!(!snapshot.running);
    }

    #[test]
    fn test_runs_after_start() {
        let handle = SimulationHandle::spawn(fast_engine());
        handle.with_engine(|engine| {
            engine.apply_pattern(PatternId::Glider as u32).unwrap();
            engine.start();
        });

        let snapshot = wait_for(&handle, |s| s.generation >= 5);
        assert!(snapshot.generation >= 5);
        assert!(snapshot.running);
        // The glider keeps its five cells until it reaches the bottom edge
        if snapshot.generation < 80 {
            assert_eq!(snapshot.population, 5);
        }
    }

    #[test]
    fn test_start_late_in_wait_gets_full_interval() {
        let handle = SimulationHandle::spawn(SimulationEngine::new(SimulationConfig {
            tick_interval_ms: 500,
            auto_run: false,
            ..SimulationConfig::default()
        }));
        thread::sleep(Duration::from_millis(450));

        let started = Instant::now();
        handle.with_engine(SimulationEngine::start);
        thread::sleep(Duration::from_millis(80));
        handle.with_engine(|_| ());
        thread::sleep(Duration::from_millis(20));

        if started.elapsed() < Duration::from_millis(450) {
            assert_eq!(handle.snapshot().generation, 1);
        }
    }

    #[test]
    fn test_no_steps_after_stop() {
        let handle = SimulationHandle::spawn(fast_engine());
        handle.with_engine(SimulationEngine::start);
        wait_for(&handle, |s| s.generation >= 3);

        let stopped_at = handle.with_engine(|engine| {
            engine.stop();
            engine.generation()
        });
        thread::sleep(Duration::from_millis(20));
        assert_eq!(handle.snapshot().generation, stopped_at);
        assert!(!handle.is_running());
    }

    #[test]
    fn test_shutdown_stops_engine() {
        let mut handle = SimulationHandle::spawn(fast_engine());
        handle.with_engine(SimulationEngine::start);
        handle.shutdown();
        handle.shutdown();

        let generation = handle.snapshot().generation;
        assert!(!handle.is_running());
        thread::sleep(Duration::from_millis(10));
        assert_eq!(handle.snapshot().generation, generation);
    }
}
