//! Timestamp debouncer
//!
//! A press is accepted when the button is down and at least the given
//! interval has passed since that button's last accepted press. Holding a
//! button therefore repeats at the interval, independent of how long a
//! frame takes to render.

use tinypip_display::{Button, InputSource};

/// An accepted press on a navigation button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press {
    Up,
    Down,
    Left,
    Right,
}

/// Per-button last-accepted timestamps
#[derive(Debug, Clone)]
pub struct Debouncer {
    last_accepted_ms: [Option<u64>; Button::COUNT],
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debouncer {
    /// Create a debouncer with no press history
    pub const fn new() -> Self {
        Self {
            last_accepted_ms: [None; Button::COUNT],
        }
    }

    /// Whether enough time has passed since the last accepted press
    pub fn ready(&self, button: Button, now_ms: u64, interval_ms: u16) -> bool {
        match self.last_accepted_ms[button.index()] {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= u64::from(interval_ms),
        }
    }

    /// Record an accepted press
    pub fn accept(&mut self, button: Button, now_ms: u64) {
        self.last_accepted_ms[button.index()] = Some(now_ms);
    }

    /// Poll `button` and accept the press if it is due
    pub fn poll(
        &mut self,
        input: &mut dyn InputSource,
        button: Button,
        now_ms: u64,
        interval_ms: u16,
    ) -> bool {
        if input.is_pressed(button) && self.ready(button, now_ms, interval_ms) {
            self.accept(button, now_ms);
            true
        } else {
            false
        }
    }

    /// Poll the vertical axis; Up wins when both are held
    pub fn poll_vertical(
        &mut self,
        input: &mut dyn InputSource,
        now_ms: u64,
        interval_ms: u16,
    ) -> Option<Press> {
        if self.poll(input, Button::Up, now_ms, interval_ms) {
            Some(Press::Up)
        } else if self.poll(input, Button::Down, now_ms, interval_ms) {
            Some(Press::Down)
        } else {
            None
        }
    }

    /// Poll all four directions in Up, Down, Left, Right order
    pub fn poll_direction(
        &mut self,
        input: &mut dyn InputSource,
        now_ms: u64,
        interval_ms: u16,
    ) -> Option<Press> {
        if let Some(press) = self.poll_vertical(input, now_ms, interval_ms) {
            return Some(press);
        }
        if self.poll(input, Button::Left, now_ms, interval_ms) {
            Some(Press::Left)
        } else if self.poll(input, Button::Right, now_ms, interval_ms) {
            Some(Press::Right)
        } else {
            None
        }
    }

    /// Treat `button` as just accepted so a press carried over from the
    /// previous screen is not seen again
    pub fn suppress(&mut self, button: Button, now_ms: u64) {
        self.accept(button, now_ms);
    }
}
