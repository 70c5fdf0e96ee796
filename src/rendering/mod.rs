use macroquad::prelude::*;

use crate::application::SimulationEngine;
use crate::domain::Grid;
use crate::input::generations_per_second;
use crate::ui::{Button, Layout, Notice, PANEL_WIDTH, panel_x};

const ALIVE_COLOR: Color = Color::new(0.4, 1.0, 0.2, 1.0); // #66ff33
const DEAD_COLOR: Color = BLACK;
const FRAME_COLOR: Color = Color::new(0.149, 0.149, 0.149, 1.0);

/// Draw the grid: frame first, then one square per cell
pub fn draw_grid(grid: &Grid, layout: &Layout) {
    let (x, y, width, height) = layout.bounds();
    draw_rectangle(x, y, width, height, FRAME_COLOR);

    let size = layout.cell_size();
    for (row, col, cell) in grid.iter_cells() {
        let (cx, cy) = layout.cell_origin(row, col);
        let color = if cell.is_alive() { ALIVE_COLOR } else { DEAD_COLOR };
        draw_rectangle(cx, cy, size, size, color);
    }
}

/// Draw control panel background
fn draw_panel_background() {
    draw_rectangle(panel_x(), 0.0, PANEL_WIDTH, screen_height(), FRAME_COLOR);
}

/// Draw the control panel with buttons, counters and the current notice
pub fn draw_controls(
    engine: &SimulationEngine,
    buttons: &[Button],
    mouse_pos: (f32, f32),
    notice: Option<&Notice>,
) {
    draw_panel_background();

    let px = panel_x() + 10.0;

    // Generation badge
    draw_rectangle(px, 15.0, PANEL_WIDTH - 20.0, 60.0, ALIVE_COLOR);
    draw_text("Generation", px + 10.0, 38.0, 18.0, BLACK);
    draw_text(&engine.generation().to_string(), px + 10.0, 64.0, 26.0, BLACK);

    let (status, status_color) = if engine.is_running() {
        ("Running", ALIVE_COLOR)
    } else {
        ("Paused", ORANGE)
    };
    draw_text(status, px, 98.0, 18.0, status_color);
    draw_text(
        &format!(
            "{:.0} gen/s | pop {}",
            generations_per_second(engine),
            engine.population()
        ),
        px,
        116.0,
        14.0,
        GRAY,
    );

    buttons.iter().for_each(|btn| btn.draw(mouse_pos));

    let help_y = screen_height() - 70.0;
    [
        "Click: toggle cell",
        "Space: play  N: step",
        "R: random  C: clear",
        "1-4: patterns  Up/Down: speed",
    ]
    .iter()
    .enumerate()
    .for_each(|(idx, line)| {
        draw_text(line, px, help_y + idx as f32 * 14.0, 12.0, GRAY);
    });

    if let Some(notice) = notice {
        let mut color = Color::from_rgba(255, 90, 90, 255);
        color.a = notice.alpha();
        draw_text(&notice.text, 10.0, screen_height() - 12.0, 18.0, color);
    }
}
