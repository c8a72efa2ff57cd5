//! SET DATE and SET TIME: manual wall-clock entry
//!
//! Both edit three fields of the current time. Left/Right pick a field,
//! Up/Down change it with wrap-around and A writes the result to the
//! clock. Editing the date keeps the time of day and the other way round.

use tinypip_display::{Button, Screen};

use super::text;
use crate::app::{App, AppContext, CONTENT_TOP};
use crate::input::Press;
use crate::log::info;
use crate::time::{days_in_month, DateTime};
use crate::traits::Board;

/// Years offered by SET DATE
pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2099;

/// Which half of the clock is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockPart {
    Date,
    Time,
}

impl ClockPart {
    fn labels(self) -> [&'static str; 3] {
        match self {
            ClockPart::Date => ["YEAR", "MONTH", "DAY"],
            ClockPart::Time => ["HOUR", "MINUTE", "SECOND"],
        }
    }
}

#[derive(Debug)]
pub struct SetClockApp {
    part: ClockPart,
    /// Value being edited; read from the clock on enter
    draft: DateTime,
    field: usize,
    applied: bool,
}

impl SetClockApp {
    pub fn date() -> Self {
        Self::new(ClockPart::Date)
    }

    pub fn time() -> Self {
        Self::new(ClockPart::Time)
    }

    fn new(part: ClockPart) -> Self {
        Self {
            part,
            draft: DateTime::from_epoch(0),
            field: 0,
            applied: false,
        }
    }

    pub fn part(&self) -> ClockPart {
        self.part
    }

    fn adjust(&mut self, up: bool) {
        let d = &mut self.draft;
        match (self.part, self.field) {
            (ClockPart::Date, 0) => {
                let year = if up { d.year + 1 } else { d.year - 1 };
                d.year = year.clamp(MIN_YEAR, MAX_YEAR);
            }
            (ClockPart::Date, 1) => d.month = wrap(d.month, 1, 12, up),
            (ClockPart::Date, _) => d.day = wrap(d.day, 1, days_in_month(d.year, d.month), up),
            (ClockPart::Time, 0) => d.hour = wrap(d.hour, 0, 23, up),
            (ClockPart::Time, 1) => d.minute = wrap(d.minute, 0, 59, up),
            (ClockPart::Time, _) => d.second = wrap(d.second, 0, 59, up),
        }
        // A shorter month or a non-leap February can strand the day
        let last = days_in_month(d.year, d.month);
        d.day = d.day.min(last);
        self.applied = false;
    }

    fn value(&self, field: usize) -> super::Line {
        let d = &self.draft;
        match (self.part, field) {
            (ClockPart::Date, 0) => text(format_args!("{}", d.year)),
            (ClockPart::Date, 1) => text(format_args!("{:02}", d.month)),
            (ClockPart::Date, _) => text(format_args!("{:02}", d.day)),
            (ClockPart::Time, 0) => text(format_args!("{:02}", d.hour)),
            (ClockPart::Time, 1) => text(format_args!("{:02}", d.minute)),
            (ClockPart::Time, _) => text(format_args!("{:02}", d.second)),
        }
    }
}

/// Step `value` within `min..=max`, wrapping at both ends
fn wrap(value: u8, min: u8, max: u8, up: bool) -> u8 {
    match (up, value) {
        (true, v) if v >= max => min,
        (true, v) => v + 1,
        (false, v) if v <= min => max,
        (false, v) => v - 1,
    }
}

impl App for SetClockApp {
    fn title(&self) -> &'static str {
        match self.part {
            ClockPart::Date => "SET DATE",
            ClockPart::Time => "SET TIME",
        }
    }

    fn footer(&self) -> (&'static str, &'static str) {
        ("A: APPLY", "B: BACK")
    }

    fn enter(&mut self, _ctx: &mut AppContext, board: &mut Board<'_>) {
        self.draft = DateTime::from_epoch(board.clock.now_epoch_s());
        self.draft.year = self.draft.year.clamp(MIN_YEAR, MAX_YEAR);
        self.field = 0;
        self.applied = false;
    }

    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let now = board.clock.now_ticks_ms();
        match ctx.direction(&mut *board.input, now) {
            Some(Press::Left) => self.field = (self.field + 2) % 3,
            Some(Press::Right) => self.field = (self.field + 1) % 3,
            Some(Press::Up) => self.adjust(true),
            Some(Press::Down) => self.adjust(false),
            None => {}
        }

        if ctx.pressed(&mut *board.input, Button::Confirm, now) {
            // Keep the half of the clock this app does not edit
            let current = DateTime::from_epoch(board.clock.now_epoch_s());
            let mut target = self.draft;
            match self.part {
                ClockPart::Date => {
                    target.hour = current.hour;
                    target.minute = current.minute;
                    target.second = current.second;
                }
                ClockPart::Time => {
                    target.year = current.year;
                    target.month = current.month;
                    target.day = current.day;
                }
            }
            let epoch_s = target.to_epoch();
            info!("{}: clock set to {}", self.title(), epoch_s);
            board.clock.set_epoch_s(epoch_s);
            self.applied = true;
        }

        for (i, label) in self.part.labels().iter().enumerate() {
            let row = CONTENT_TOP + 1 + i * 2;
            let marker = if i == self.field { ">" } else { " " };
            screen.set_text(
                row,
                2,
                &text(format_args!("{} {:<7}{}", marker, label, self.value(i))),
            );
        }
        if self.applied {
            screen.set_centered(CONTENT_TOP + 8, "APPLIED");
        }
    }
}
