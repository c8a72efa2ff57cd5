//! CLOCK: full time and date

use tinypip_display::Screen;

use super::text;
use crate::app::{App, AppContext, CONTENT_TOP};
use crate::time::DateTime;
use crate::traits::Board;

const WEEKDAYS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

#[derive(Debug, Default)]
pub struct ClockApp;

impl ClockApp {
    pub fn new() -> Self {
        Self
    }
}

impl App for ClockApp {
    fn title(&self) -> &'static str {
        "CLOCK"
    }

    fn frame(&mut self, _ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let dt = DateTime::from_epoch(board.clock.now_epoch_s());
        screen.set_centered(CONTENT_TOP + 3, &dt.hhmmss());

        let weekday = WEEKDAYS[usize::from(dt.weekday) % WEEKDAYS.len()];
        let date = text(format_args!(
            "{} {:04}-{:02}-{:02}",
            weekday, dt.year, dt.month, dt.day
        ));
        screen.set_centered(CONTENT_TOP + 5, &date);
    }

    fn frame_ms(&self, _ctx: &AppContext) -> u16 {
        200
    }
}
