//! Selects how a grid world run should be displayed

use crate::settings::GridworldSettings;
use serde::{Deserialize, Serialize};

/// The kind of display a renderer should set up
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Plain text output
    Text,
    /// A graphical window
    Graphics {
        /// Width in pixels of each grid cell
        window_size: u32,
        /// Animation speed; above 1.0 is faster
        speed: f32,
    },
}

impl DisplayMode {
    /// Returns whether this is the text display
    pub fn is_text(&self) -> bool {
        matches!(self, DisplayMode::Text)
    }
}

/// Picks the [`DisplayMode`] requested by the settings.
///
/// ```
/// use gridworld_util::display::{select_display, DisplayMode};
/// use gridworld_util::settings::GridworldSettings;
///
/// let settings = GridworldSettings {
///     text_display: true,
///     ..Default::default()
/// };
/// assert_eq!(select_display(&settings), DisplayMode::Text);
/// ```
pub fn select_display(settings: &GridworldSettings) -> DisplayMode {
    if settings.text_display {
        DisplayMode::Text
    } else {
        DisplayMode::Graphics {
            window_size: settings.window_size,
            speed: settings.speed,
        }
    }
}
