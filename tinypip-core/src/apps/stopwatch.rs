//! STOPWATCH: start/stop on A, reset on Y, tenths of a second

use tinypip_display::{Button, Screen};

use super::text;
use crate::app::{App, AppContext, CONTENT_TOP};
use crate::traits::Board;

#[derive(Debug, Default)]
pub struct StopwatchApp {
    running: bool,
    /// Tick at which the current run would have started from zero
    start_ms: u64,
    elapsed_ms: u64,
}

impl StopwatchApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    fn toggle(&mut self, now_ms: u64) {
        if self.running {
            self.elapsed_ms = now_ms.saturating_sub(self.start_ms);
            self.running = false;
        } else {
            self.start_ms = now_ms.saturating_sub(self.elapsed_ms);
            self.running = true;
        }
    }

    fn reset(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }
}

/// `MM:SS.t`
fn format_elapsed(ms: u64) -> super::Line {
    let tenths = (ms / 100) % 10;
    let total_s = ms / 1000;
    text(format_args!(
        "{:02}:{:02}.{}",
        total_s / 60,
        total_s % 60,
        tenths
    ))
}

impl App for StopwatchApp {
    fn title(&self) -> &'static str {
        "STOPWATCH"
    }

    fn footer(&self) -> (&'static str, &'static str) {
        ("A: START/STOP", "Y: RESET")
    }

    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let now = board.clock.now_ticks_ms();

        if ctx.pressed(&mut *board.input, Button::Confirm, now) {
            self.toggle(now);
        } else if ctx.pressed(&mut *board.input, Button::Secondary, now) {
            self.reset();
        }

        if self.running {
            self.elapsed_ms = now.saturating_sub(self.start_ms);
        }

        screen.set_centered(CONTENT_TOP + 3, &format_elapsed(self.elapsed_ms));
        screen.set_centered(
            CONTENT_TOP + 5,
            if self.running { "RUNNING" } else { "STOPPED" },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::run_frame;
    use crate::config::{DeviceConfig, Settings};
    use crate::testing::FakeBoard;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0).as_str(), "00:00.0");
        assert_eq!(format_elapsed(61_250).as_str(), "01:01.2");
    }

    #[test]
    fn test_start_stop_resume_reset() {
        let mut fakes = FakeBoard::new(0);
        let mut ctx = AppContext::new(DeviceConfig::default(), Settings::default(), 0);
        let mut screen = Screen::new();
        let mut app = StopwatchApp::new();

        // Start at 0, stop at 1000, resume at 2000, stop at 2500
        fakes.buttons.tap(Button::Confirm, 0);
        fakes.buttons.tap(Button::Confirm, 1000);
        fakes.buttons.tap(Button::Confirm, 2000);
        fakes.buttons.tap(Button::Confirm, 2500);
        while fakes.clock.now_ms() < 3000 {
            run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        }
        assert!(!app.is_running());
        assert_eq!(app.elapsed_ms(), 1500);
        assert!(screen.contains("00:01.5"));

        fakes.buttons.tap(Button::Secondary, 3000);
        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        assert_eq!(app.elapsed_ms(), 0);
        assert!(screen.contains("STOPPED"));
    }
}
