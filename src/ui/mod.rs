mod button;
mod layout;

pub use button::Button;
pub use layout::Layout;

use macroquad::prelude::{screen_height, screen_width};

use crate::domain::PatternId;
use crate::error::EngineError;

pub const PANEL_WIDTH: f32 = 200.0;
pub const BUTTON_HEIGHT: f32 = 34.0;
const BUTTON_SPACING: f32 = 42.0;

/// How long a notice stays on screen, in seconds
pub const NOTICE_SECONDS: f32 = 4.0;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the width of the grid area
pub fn grid_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the height of the grid area
pub fn grid_area_height() -> f32 {
    screen_height()
}

/// Everything a control can ask the engine to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    TogglePlay,
    Step,
    Randomize,
    Clear,
    Pattern(PatternId),
    Faster,
    Slower,
}

/// Create UI buttons in the side panel
pub fn create_buttons(running: bool) -> Vec<Button> {
    let px = panel_x() + 10.0;
    let width = PANEL_WIDTH - 20.0;
    let play_label = if running { "Pause" } else { "Start" };

    let controls = [
        (play_label, ButtonAction::TogglePlay),
        ("Step", ButtonAction::Step),
        ("Randomize", ButtonAction::Randomize),
        ("Clear", ButtonAction::Clear),
    ];
    let patterns = PatternId::ALL
        .iter()
        .filter_map(|&id| id.pattern().map(|pattern| (pattern.name, ButtonAction::Pattern(id))));

    controls
        .into_iter()
        .chain(patterns)
        .enumerate()
        .map(|(idx, (text, action))| {
            let y = 130.0 + idx as f32 * BUTTON_SPACING;
            Button::new(px, y, width, BUTTON_HEIGHT, text, action)
        })
        .collect()
}

/// Non-blocking message shown after a rejected operation
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub text: String,
    pub remaining: f32,
}

impl Notice {
    pub fn from_error(err: &EngineError) -> Self {
        Self {
            text: err.to_string(),
            remaining: NOTICE_SECONDS,
        }
    }

    /// Count down; returns false once the notice has expired
    pub fn update(&mut self, delta_time: f32) -> bool {
        self.remaining -= delta_time;
        self.remaining > 0.0
    }

    /// Fade-out factor in `[0, 1]`
    pub fn alpha(&self) -> f32 {
        self.remaining.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires() {
        let mut notice = Notice::from_error(&EngineError::UnknownPattern(9));
        assert_eq!(notice.text, "unknown pattern id: 9");
        assert_eq!(notice.alpha(), 1.0);
        assert!(notice.update(NOTICE_SECONDS - 0.5));
        assert!((notice.alpha() - 0.5).abs() < 1e-6);
        assert!(!notice.update(1.0));
    }
}
