//! D-pad and action keys
//!
//! Every key pulls its GPIO to ground when pressed.

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;
use tinypip_display::{Button, InputSource};

/// GPIO inputs indexed by `Button::index`
pub struct Buttons {
    pins: [Input<'static>; Button::COUNT],
}

impl Buttons {
    /// Bind the keys, in `Button::ALL` order
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        up: Peri<'static, impl Pin>,
        down: Peri<'static, impl Pin>,
        left: Peri<'static, impl Pin>,
        right: Peri<'static, impl Pin>,
        confirm: Peri<'static, impl Pin>,
        back: Peri<'static, impl Pin>,
        secondary: Peri<'static, impl Pin>,
    ) -> Self {
        Self {
            pins: [
                Input::new(up, Pull::Up),
                Input::new(down, Pull::Up),
                Input::new(left, Pull::Up),
                Input::new(right, Pull::Up),
                Input::new(confirm, Pull::Up),
                Input::new(back, Pull::Up),
                Input::new(secondary, Pull::Up),
            ],
        }
    }
}

impl InputSource for Buttons {
    fn is_pressed(&mut self, button: Button) -> bool {
        self.pins[button.index()].is_low()
    }
}
