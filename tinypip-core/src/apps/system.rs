//! SYSTEM: device facts, scrollable

use heapless::Vec;
use tinypip_display::Screen;

use super::{text, Line};
use crate::app::{App, AppContext, CONTENT_ROWS, CONTENT_TOP};
use crate::input::Press;
use crate::time::format_uptime;
use crate::traits::Board;
use crate::{DEVICE_MODEL, OS_VERSION};

const MAX_LINES: usize = 16;

#[derive(Debug, Default)]
pub struct SystemApp {
    scroll: usize,
}

impl SystemApp {
    pub fn new() -> Self {
        Self::default()
    }
}

fn info_lines(ctx: &AppContext, board: &mut Board<'_>) -> Vec<Line, MAX_LINES> {
    let now = board.clock.now_ticks_ms();
    let online = board.radio.is_connected();
    let last_update = match ctx.status.last_outcome() {
        Some(true) => "OK",
        Some(false) => "FAILED",
        None => "NEVER",
    };

    let mut lines = Vec::new();
    for line in [
        text(format_args!("DEVICE")),
        text(format_args!("Model: {}", DEVICE_MODEL)),
        text(format_args!("OS: TinyPIP {}", OS_VERSION)),
        text(format_args!("Uptime: {}", format_uptime(ctx.uptime_ms(now)))),
        Line::new(),
        text(format_args!("NETWORK")),
        text(format_args!(
            "WiFi: {}",
            if online { "Connected" } else { "Offline" }
        )),
        text(format_args!("Last update: {}", last_update)),
        text(format_args!("Beacon: {}", ctx.config.beacon.prefix.as_str())),
        Line::new(),
        text(format_args!("DISPLAY")),
        text(format_args!("Theme: {}", ctx.settings.theme.label())),
        text(format_args!("Brightness: {}%", ctx.settings.brightness)),
    ] {
        let _ = lines.push(line);
    }
    lines
}

impl App for SystemApp {
    fn title(&self) -> &'static str {
        "SYSTEM"
    }

    fn footer(&self) -> (&'static str, &'static str) {
        ("B: BACK", "UP/DOWN: SCROLL")
    }

    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let lines = info_lines(ctx, board);
        let max_scroll = lines.len().saturating_sub(CONTENT_ROWS);

        let now = board.clock.now_ticks_ms();
        match ctx.vertical(&mut *board.input, now) {
            Some(Press::Up) => self.scroll = self.scroll.saturating_sub(1),
            Some(Press::Down) => self.scroll = (self.scroll + 1).min(max_scroll),
            _ => {}
        }

        for (row, line) in lines.iter().skip(self.scroll).take(CONTENT_ROWS).enumerate() {
            screen.set_text(CONTENT_TOP + row, 0, line);
        }
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
    use tinypip_display::Button;

    #[test]
    fn test_shows_version_and_uptime() {
        let mut fakes = FakeBoard::new(0);
        fakes.clock.advance(3_725_000);
        let mut ctx = AppContext::new(DeviceConfig::default(), Settings::default(), 0);
        ctx.status.begin(0);
        ctx.status.finish(true, 0);
        let mut screen = Screen::new();
        let mut app = SystemApp::new();

        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        assert!(screen.contains("Model: Pico + LCD hat"));
        assert!(!screen.contains("Pico W"));
        assert!(screen.contains("OS: TinyPIP v1.8.0"));
        assert!(screen.contains("Uptime: 1h 2m"));
        assert!(screen.contains("WiFi: Offline"));
        assert!(screen.contains("Last update: OK"));
        assert!(!screen.contains("Brightness"));
    }

    #[test]
    fn test_scroll_stops_at_last_line() {
        let mut fakes = FakeBoard::new(0);
        fakes.buttons.hold(Button::Down, 0, 2_000);
        let mut ctx = AppContext::new(DeviceConfig::default(), Settings::default(), 0);
        let mut screen = Screen::new();
        let mut app = SystemApp::new();

        while fakes.clock.now_ms() < 2_000 {
            run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        }
        assert_eq!(app.scroll, 3);
        assert!(screen.contains("Brightness: 50%"));
        assert!(!screen.contains("DEVICE"));
    }
}
