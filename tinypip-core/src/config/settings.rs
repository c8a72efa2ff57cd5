//! User settings
//!
//! Brightness and theme are process-wide: every app renders with them and
//! SETTINGS is the only app that changes them.

use serde::{Deserialize, Serialize};
use tinypip_display::Theme;

/// Brightness on first boot
pub const DEFAULT_BRIGHTNESS: u8 = 50;

/// Brightness the level wraps back to after 100
pub const MIN_BRIGHTNESS: u8 = 10;

/// Brightness increment per press
pub const BRIGHTNESS_STEP: u8 = 10;

/// Persisted user settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Backlight level in percent
    pub brightness: u8,
    /// Foreground palette
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            theme: Theme::Green,
        }
    }
}

impl Settings {
    /// Raise brightness one step, wrapping past 100 back to the minimum
    pub fn step_brightness(&mut self) {
        let next = self.brightness.saturating_add(BRIGHTNESS_STEP);
        self.brightness = if next > 100 { MIN_BRIGHTNESS } else { next };
    }

    /// Switch to the other palette
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Clamp values loaded from storage into their valid range
    pub fn sanitized(self) -> Self {
        Self {
            brightness: self.brightness.clamp(MIN_BRIGHTNESS, 100),
            theme: self.theme,
        }
    }
}
