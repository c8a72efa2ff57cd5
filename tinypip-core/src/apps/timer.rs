//! TIMER: whole-minute countdown
//!
//! Up/Down set 1-99 minutes while stopped. A starts the countdown or
//! stops it early; it also stops by itself at zero.

use tinypip_display::{Button, Screen};

use super::{text, Line};
use crate::app::{App, AppContext, CONTENT_TOP};
use crate::input::Press;
use crate::log::info;
use crate::traits::Board;

pub const MIN_MINUTES: u8 = 1;
pub const MAX_MINUTES: u8 = 99;

#[derive(Debug)]
pub struct TimerApp {
    minutes: u8,
    /// Tick at which the running countdown hits zero
    end_ms: Option<u64>,
    /// Set when the last countdown ran out rather than being stopped
    finished: bool,
}

impl Default for TimerApp {
    fn default() -> Self {
        Self {
            minutes: MIN_MINUTES,
            end_ms: None,
            finished: false,
        }
    }
}

impl TimerApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn is_running(&self) -> bool {
        self.end_ms.is_some()
    }

    fn toggle(&mut self, now_ms: u64) {
        self.end_ms = match self.end_ms {
            Some(_) => None,
            None => Some(now_ms + u64::from(self.minutes) * 60_000),
        };
        self.finished = false;
    }
}

/// `MM:SS`, rounding a partial second up so the display never shows 00:00
/// while time is left
fn format_remaining(ms: u64) -> Line {
    let total_s = ms.div_ceil(1000);
    text(format_args!("{:02}:{:02}", total_s / 60, total_s % 60))
}

impl App for TimerApp {
    fn title(&self) -> &'static str {
        "TIMER"
    }

    fn footer(&self) -> (&'static str, &'static str) {
        ("A: START/STOP", "B: BACK")
    }

    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let now = board.clock.now_ticks_ms();

        if !self.is_running() {
            match ctx.vertical(&mut *board.input, now) {
                Some(Press::Up) => self.minutes = (self.minutes + 1).min(MAX_MINUTES),
                Some(Press::Down) => self.minutes = self.minutes.saturating_sub(1).max(MIN_MINUTES),
                _ => {}
            }
        }
        if ctx.pressed(&mut *board.input, Button::Confirm, now) {
            self.toggle(now);
        }

        let remaining = match self.end_ms {
            Some(end) if now >= end => {
                info!("timer: {} min elapsed", self.minutes);
                self.end_ms = None;
                self.finished = true;
                0
            }
            Some(end) => end - now,
            None if self.finished => 0,
            None => u64::from(self.minutes) * 60_000,
        };

        screen.set_centered(CONTENT_TOP + 3, &format_remaining(remaining));
        let state = if self.is_running() {
            "RUNNING"
        } else if self.finished {
            "TIME UP"
        } else {
            "STOPPED"
        };
        screen.set_centered(CONTENT_TOP + 5, state);
    }

    fn frame_ms(&self, _ctx: &AppContext) -> u16 {
        100
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::run_frame;
    use crate::config::{DeviceConfig, Settings};
    use crate::testing::FakeBoard;

    fn setup() -> (FakeBoard, AppContext, Screen, TimerApp) {
        let ctx = AppContext::new(DeviceConfig::default(), Settings::default(), 0);
        (FakeBoard::new(0), ctx, Screen::new(), TimerApp::new())
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(120_000).as_str(), "02:00");
        assert_eq!(format_remaining(59_001).as_str(), "01:00");
        assert_eq!(format_remaining(500).as_str(), "00:01");
        assert_eq!(format_remaining(0).as_str(), "00:00");
    }

    #[test]
    fn test_minutes_clamp() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        fakes.buttons.hold(Button::Down, 0, 1_000);
        while fakes.clock.now_ms() < 1_000 {
            run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        }
        assert_eq!(app.minutes(), MIN_MINUTES);

        fakes.buttons.hold(Button::Up, 1_000, 20_000);
        while fakes.clock.now_ms() < 21_000 {
            run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        }
        assert_eq!(app.minutes(), MAX_MINUTES);
        assert!(screen.contains("99:00"));
    }

    #[test]
    fn test_countdown_runs_out() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        fakes.buttons.tap(Button::Up, 0);
        fakes.buttons.tap(Button::Confirm, 200);
        while fakes.clock.now_ms() < 30_000 {
            run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        }
        assert!(app.is_running());
        assert!(screen.contains("01:31"));

        // Up is ignored while running
        fakes.buttons.tap(Button::Up, 30_000);
        while fakes.clock.now_ms() < 121_000 {
            run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        }
        assert_eq!(app.minutes(), 2);
        assert!(!app.is_running());
        assert!(screen.contains("00:00"));
        assert!(screen.contains("TIME UP"));
    }

    #[test]
    fn test_stop_early_resets_display() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        fakes.buttons.tap(Button::Confirm, 0);
        fakes.buttons.tap(Button::Confirm, 10_000);
        while fakes.clock.now_ms() < 10_500 {
            run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        }
        assert!(!app.is_running());
        assert!(screen.contains("01:00"));
        assert!(screen.contains("STOPPED"));
    }
}
