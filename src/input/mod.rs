use std::time::Duration;

use macroquad::prelude::*;

use crate::application::SimulationEngine;
use crate::domain::PatternId;
use crate::error::EngineError;
use crate::ui::{Button, ButtonAction, Layout, grid_area_width};

const MIN_SPEED: f32 = 1.0;
const MAX_SPEED: f32 = 60.0;

/// Current speed in generations per second
pub fn generations_per_second(engine: &SimulationEngine) -> f32 {
    1.0 / engine.tick_interval().as_secs_f32()
}

/// Adjust simulation speed, clamped to 1-60 generations per second.
///
/// A configured speed outside that range is never pushed the wrong way:
/// Faster can't slow it down and Slower can't speed it up.
pub fn adjust_speed(engine: &mut SimulationEngine, delta: f32) {
    let current = generations_per_second(engine);
    let target = current + delta;
    let speed = if delta >= 0.0 {
        target.min(MAX_SPEED.max(current))
    } else {
        target.max(MIN_SPEED.min(current))
    };
    engine.set_tick_interval(Duration::from_secs_f32(1.0 / speed));
}

/// Run one control action against the engine
pub fn apply_action(engine: &mut SimulationEngine, action: ButtonAction) -> Result<(), EngineError> {
    match action {
        ButtonAction::TogglePlay => engine.toggle_running(),
        ButtonAction::Step => engine.step(),
        ButtonAction::Randomize => {
            engine.randomize_default()?;
            engine.stop();
        }
        ButtonAction::Clear => engine.clear(),
        ButtonAction::Pattern(id) => engine.apply_pattern(id as u32)?,
        ButtonAction::Faster => adjust_speed(engine, 1.0),
        ButtonAction::Slower => adjust_speed(engine, -1.0),
    }
    Ok(())
}

/// Toggle the cell under the cursor on left click
pub fn handle_cell_click(
    engine: &mut SimulationEngine,
    layout: &Layout,
    mouse_pos: (f32, f32),
) -> Result<(), EngineError> {
    if !is_mouse_button_pressed(MouseButton::Left) || mouse_pos.0 >= grid_area_width() {
        return Ok(());
    }
    match layout.cell_at(mouse_pos.0, mouse_pos.1) {
        Some((row, col)) => engine.toggle_cell(row, col).map(|_| ()),
        None => Ok(()),
    }
}

/// Process keyboard shortcuts
pub fn process_keyboard_input(engine: &mut SimulationEngine) -> Result<(), EngineError> {
    let bindings: [(KeyCode, ButtonAction); 10] = [
        (KeyCode::Space, ButtonAction::TogglePlay),
        (KeyCode::N, ButtonAction::Step),
        (KeyCode::R, ButtonAction::Randomize),
        (KeyCode::C, ButtonAction::Clear),
        (KeyCode::Key1, ButtonAction::Pattern(PatternId::GliderGun)),
        (KeyCode::Key2, ButtonAction::Pattern(PatternId::Pulsar)),
        (KeyCode::Key3, ButtonAction::Pattern(PatternId::Glider)),
        (KeyCode::Key4, ButtonAction::Pattern(PatternId::Spaceship)),
        (KeyCode::Up, ButtonAction::Faster),
        (KeyCode::Down, ButtonAction::Slower),
    ];

    bindings
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .try_for_each(|&(_, action)| apply_action(engine, action))
}

/// Process button clicks
pub fn process_button_clicks(
    engine: &mut SimulationEngine,
    buttons: &[Button],
    mouse_pos: (f32, f32),
) -> Result<(), EngineError> {
    buttons
        .iter()
        .filter(|btn| btn.is_clicked(mouse_pos))
        .try_for_each(|btn| apply_action(engine, btn.action()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    fn engine() -> SimulationEngine {
        SimulationEngine::new(SimulationConfig::default())
    }

    #[test]
    fn test_speed_adjustment() {
        let mut engine = engine();
        assert!((generations_per_second(&engine) - 10.0).abs() < 1e-3);

        adjust_speed(&mut engine, 1.0);
        assert!((generations_per_second(&engine) - 11.0).abs() < 1e-2);

        adjust_speed(&mut engine, 500.0);
        assert!((generations_per_second(&engine) - MAX_SPEED).abs() < 0.5);

        adjust_speed(&mut engine, -500.0);
        assert!((generations_per_second(&engine) - MIN_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_speed_outside_range_moves_only_toward_it() {
        let mut slow = SimulationEngine::new(SimulationConfig {
            tick_interval_ms: 5000,
            ..SimulationConfig::default()
        });
        apply_action(&mut slow, ButtonAction::Slower).unwrap();
        assert!((generations_per_second(&slow) - 0.2).abs() < 1e-3);
        apply_action(&mut slow, ButtonAction::Faster).unwrap();
        assert!((generations_per_second(&slow) - 1.2).abs() < 1e-2);

        let mut fast = SimulationEngine::new(SimulationConfig {
            tick_interval_ms: 5,
            ..SimulationConfig::default()
        });
        apply_action(&mut fast, ButtonAction::Faster).unwrap();
        assert!((generations_per_second(&fast) - 200.0).abs() < 0.1);
        apply_action(&mut fast, ButtonAction::Slower).unwrap();
        assert!((generations_per_second(&fast) - 199.0).abs() < 0.1);
    }

    #[test]
    fn test_randomize_action_pauses() {
        let mut engine = engine();
        engine.start();
        apply_action(&mut engine, ButtonAction::Randomize).unwrap();
        assert!(!engine.is_running());
        assert!(engine.population() > 0);
    }

    #[test]
    fn test_pattern_action() {
        let mut engine = engine();
        apply_action(&mut engine, ButtonAction::Pattern(PatternId::Pulsar)).unwrap();
        assert_eq!(engine.population(), 48);
    }

    #[test]
    fn test_play_and_step_actions() {
        let mut engine = engine();
        apply_action(&mut engine, ButtonAction::TogglePlay).unwrap();
        assert!(engine.is_running());
        apply_action(&mut engine, ButtonAction::Step).unwrap();
        assert_eq!(engine.generation(), 2);
        apply_action(&mut engine, ButtonAction::Clear).unwrap();
        assert_eq!(engine.generation(), 1);
        assert!(!engine.is_running());
    }
}
