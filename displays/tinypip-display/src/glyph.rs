//! Glyphs and colour themes shared between the renderer and the panel

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Small pictograms that do not exist in the text font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// Filled square, "on" half of the update pulse
    PulseOn,
    /// Hollow square, "off" half of the update pulse
    PulseOff,
    /// Check mark in a box
    Check,
    /// Small X
    Cross,
    /// Target dot on the tracker minimap
    Marker,
}

/// Foreground palette of the terminal look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Theme {
    #[default]
    Green,
    Amber,
}

impl Theme {
    /// The other palette
    pub fn toggled(self) -> Self {
        match self {
            Theme::Green => Theme::Amber,
            Theme::Amber => Theme::Green,
        }
    }

    /// Upper-case name shown in settings
    pub fn label(self) -> &'static str {
        match self {
            Theme::Green => "GREEN",
            Theme::Amber => "AMBER",
        }
    }

    /// Foreground colour as (r, g, b)
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Theme::Green => (0, 255, 0),
            Theme::Amber => (255, 176, 0),
        }
    }

    /// Dimmed foreground for scanlines and inactive text
    pub fn dim_rgb(self) -> (u8, u8, u8) {
        let (r, g, b) = self.rgb();
        (r / 4, g / 4, b / 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_round_trip() {
        assert_eq!(Theme::Green.toggled(), Theme::Amber);
        assert_eq!(Theme::Green.toggled().toggled(), Theme::Green);
    }

    #[test]
    fn test_dim_is_darker() {
        let (r, g, b) = Theme::Amber.dim_rgb();
        let (fr, fg, fb) = Theme::Amber.rgb();
        assert!(r <= fr && g <= fg && b <= fb);
    }
}
