//! Input source abstraction
//!
//! The handheld has a D-pad plus three action keys. Boards report the
//! instantaneous level of each; debouncing happens in the core.

/// Physical buttons of the handheld
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    /// Key A: select / change
    Confirm,
    /// Key B: return to the previous screen
    Back,
    /// Key Y: out-of-band "update now"
    Secondary,
}

impl Button {
    /// Number of buttons
    pub const COUNT: usize = 7;

    /// Every button, in index order
    pub const ALL: [Button; Button::COUNT] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Confirm,
        Button::Back,
        Button::Secondary,
    ];

    /// Stable index for per-button tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true for the D-pad directions
    pub fn is_direction(self) -> bool {
        matches!(
            self,
            Button::Up | Button::Down | Button::Left | Button::Right
        )
    }
}

/// Source of raw button levels
pub trait InputSource {
    /// Whether `button` is held down right now
    fn is_pressed(&mut self, button: Button) -> bool;
}
