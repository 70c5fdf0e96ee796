use std::time::Duration;

use clap::Parser;
use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;

use conway_life::{
    SimulationArgs, SimulationEngine,
    ui::{self, Layout, Notice},
    rendering, input,
};

/// Conway's Game of Life viewer
#[derive(Parser, Debug)]
#[command(name = "conway_life", version)]
struct Cli {
    #[command(flatten)]
    sim: SimulationArgs,

    /// Pattern to load at start-up (1 glider gun, 2 pulsar, 3 glider, 4 spaceship)
    #[arg(long)]
    pattern: Option<u32>,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Conway's Game of Life".to_owned(),
        window_width: 1100,
        window_height: 640,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
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
            return;
        }
    };
    tracing::info!("Starting {}x{} grid", config.rows, config.cols);

    let mut engine = SimulationEngine::boot(config);
    let mut notice: Option<Notice> = None;

    if let Some(id) = cli.pattern {
        if let Err(err) = engine.apply_pattern(id) {
            notice = Some(Notice::from_error(&err));
        }
    }

    loop {
        let mouse_pos = mouse_position();
        let frame_time = get_frame_time();

        let (rows, cols) = engine.grid().dimensions();
        let layout = Layout::fit(rows, cols, ui::grid_area_width(), ui::grid_area_height());
        let buttons = ui::create_buttons(engine.is_running());

        // Input
        let outcome = input::process_button_clicks(&mut engine, &buttons, mouse_pos)
            .and_then(|()| input::handle_cell_click(&mut engine, &layout, mouse_pos))
            .and_then(|()| input::process_keyboard_input(&mut engine));
        if let Err(err) = outcome {
            tracing::warn!("{}", err);
            notice = Some(Notice::from_error(&err));
        }
        if notice.as_mut().is_some_and(|n| !n.update(frame_time)) {
            notice = None;
        }

        // Simulation
        engine.tick(Duration::from_secs_f32(frame_time));

        // Render
        clear_background(BLACK);
        rendering::draw_grid(engine.grid(), &layout);
        rendering::draw_controls(&engine, &buttons, mouse_pos, notice.as_ref());

        next_frame().await;
    }
}
