//! Terminal runner: drives the engine from its timer thread and prints the result

use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use conway_life::{
    EngineError, SimulationArgs, SimulationConfig, SimulationEngine, SimulationHandle,
};

/// Run Conway's Game of Life without a window
#[derive(Parser, Debug)]
#[command(name = "headless", version)]
struct Cli {
    #[command(flatten)]
    sim: SimulationArgs,

    /// Pattern to seed with (1 glider gun, 2 pulsar, 3 glider, 4 spaceship)
    #[arg(long)]
    pattern: Option<u32>,

    /// Generations to run before printing. Ignored with --no-auto-run,
    /// which prints the starting grid without stepping.
    #[arg(long, default_value_t = 100)]
    generations: u64,
}

/// Boot the engine, seed the chosen pattern, and leave it running only when
/// the configuration asks for auto-run
fn prepare_engine(
    config: SimulationConfig,
    pattern: Option<u32>,
) -> Result<SimulationEngine, EngineError> {
    let mut engine = SimulationEngine::boot(config);
    if let Some(id) = pattern {
        engine.apply_pattern(id)?;
    }
    if engine.config().auto_run {
        engine.start();
    }
    Ok(engine)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("conway_life=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match cli.sim.resolve() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let engine = match prepare_engine(config, cli.pattern) {
        Ok(engine) => engine,
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let running = engine.is_running();
    let target = 1 + cli.generations;
    let poll = engine.tick_interval().min(Duration::from_millis(50));
    let handle = SimulationHandle::spawn(engine);
    let started = Instant::now();

    while running && handle.snapshot().generation < target {
        thread::sleep(poll);
    }

    handle.with_engine(SimulationEngine::stop);
    let final_state = handle.snapshot();

    print!("{}", final_state.grid);
    println!(
        "generation {} | population {} | {:.2}s",
        final_state.generation,
        final_state.population,
        started.elapsed().as_secs_f64()
    );
    ExitCode::SUCCESS
}
