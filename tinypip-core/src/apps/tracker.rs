//! TRACKER: distance to the paired beacon
//!
//! Every frame averages a fresh `SignalSample` and turns it into a
//! distance, a signal bar and a marker on a one-row minimap. Near is
//! drawn to the right.

use tinypip_display::{Glyph, Screen, SCREEN_COLS};

use super::text;
use crate::app::{App, AppContext, CONTENT_TOP};
use crate::log::debug;
use crate::signal::{map_position, sample, signal_percent, DistanceEstimate};
use crate::traits::Board;

/// Leftmost minimap cell
const MAP_LEFT: usize = 1;

/// Minimap cells between the brackets
const MAP_WIDTH: usize = SCREEN_COLS - 2;

const STATE_ROW: usize = CONTENT_TOP + 1;
const DIST_ROW: usize = CONTENT_TOP + 3;
const BAT_ROW: usize = CONTENT_TOP + 4;
const BAR_ROW: usize = CONTENT_TOP + 6;
const MAP_ROW: usize = CONTENT_TOP + 8;

/// Minimap column for a position between 0.0 (far) and 1.0 (near)
pub fn marker_col(position: f32) -> usize {
    let span = (MAP_WIDTH - 1) as f32;
    let offset = libm::roundf(position.clamp(0.0, 1.0) * span) as usize;
    MAP_LEFT + offset
}

#[derive(Debug, Default)]
pub struct TrackerApp {
    /// Radio state before the app took it over
    radio_was_enabled: bool,
}

impl TrackerApp {
    pub fn new() -> Self {
        Self::default()
    }
}

fn draw_map(screen: &mut Screen, position: f32) {
    let mut track = super::Line::new();
    let _ = track.push('[');
    for _ in 0..MAP_WIDTH {
        let _ = track.push('.');
    }
    let _ = track.push(']');
    screen.set_line(MAP_ROW, &track);
    screen.put_glyph(MAP_ROW, marker_col(position), Glyph::Marker);
}

impl App for TrackerApp {
    fn title(&self) -> &'static str {
        "TRACKER"
    }

    fn enter(&mut self, _ctx: &mut AppContext, board: &mut Board<'_>) {
        self.radio_was_enabled = board.radio.is_enabled();
        board.radio.set_enabled(true);
    }

    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let beacon = &ctx.config.beacon;
        let found = sample(
            &mut *board.radio,
            &mut *board.clock,
            &beacon.prefix,
            beacon.rounds,
            beacon.round_pause_ms,
        );

        let (Some(avg), Some(estimate)) = (
            found.average_rssi(),
            DistanceEstimate::from_sample(&found, beacon.reference_freq_mhz),
        ) else {
            screen.set_centered(STATE_ROW, "SEARCHING...");
            draw_map(screen, 0.5);
            return;
        };

        debug!(
            "tracker: {} readings, avg {} dBm",
            found.readings().len(),
            avg
        );

        screen.set_centered(STATE_ROW, "BEACON FOUND");
        screen.set_text(DIST_ROW, 0, &text(format_args!("DIST: {:.1} m", estimate.meters)));
        if let Some(percent) = found
            .identity(&beacon.prefix)
            .and_then(|id| id.battery_percent)
        {
            screen.set_text(BAT_ROW, 0, &text(format_args!("BAT: {}%", percent)));
        }
        screen.set_bar(BAR_ROW, 0, SCREEN_COLS, signal_percent(avg));
        draw_map(screen, map_position(avg));
    }

    fn leave(&mut self, _ctx: &mut AppContext, board: &mut Board<'_>) {
        board.radio.set_enabled(self.radio_was_enabled);
    }

    fn frame_ms(&self, _ctx: &AppContext) -> u16 {
        40
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::run_frame;
    use crate::config::{DeviceConfig, Settings};
    use crate::testing::FakeBoard;
    use crate::traits::ScanResult;
    use tinypip_display::Button;

    fn context() -> AppContext {
        AppContext::new(DeviceConfig::default(), Settings::default(), 0)
    }

    #[test]
    fn test_marker_col_bounds() {
        assert_eq!(marker_col(0.0), MAP_LEFT);
        assert_eq!(marker_col(1.0), MAP_LEFT + MAP_WIDTH - 1);
        assert_eq!(marker_col(0.45), 13);
        assert_eq!(marker_col(7.0), MAP_LEFT + MAP_WIDTH - 1);
    }

    #[test]
    fn test_beacon_found() {
        let mut fakes = FakeBoard::new(0);
        fakes
            .radio
            .set_networks(&[ScanResult::new("BEACON|60", -55, 1, true)]);
        let mut ctx = context();
        let mut screen = Screen::new();
        let mut app = TrackerApp::new();

        app.enter(&mut ctx, &mut fakes.board());
        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);

        assert_eq!(fakes.radio.scan_count(), 8);
        assert!(screen.contains("BEACON FOUND"));
        assert!(screen.contains("DIST: 5.6 m"));
        assert!(screen.contains("BAT: 60%"));
        assert_eq!(screen.glyph_at(MAP_ROW, 13), Some(Glyph::Marker));
        // 8 rounds of 30 ms plus the 40 ms frame sleep
        assert_eq!(fakes.clock.now_ms(), 280);
    }

    #[test]
    fn test_searching_centres_marker() {
        let mut fakes = FakeBoard::new(0);
        fakes
            .radio
            .set_networks(&[ScanResult::new("HOME", -40, 6, false)]);
        let mut ctx = context();
        let mut screen = Screen::new();
        let mut app = TrackerApp::new();

        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        assert!(screen.contains("SEARCHING..."));
        assert!(!screen.contains("DIST:"));
        assert_eq!(screen.glyph_at(MAP_ROW, marker_col(0.5)), Some(Glyph::Marker));
    }

    #[test]
    fn test_unparsed_battery_hidden() {
        let mut fakes = FakeBoard::new(0);
        fakes
            .radio
            .set_networks(&[ScanResult::new("BEACON-X", -70, 1, true)]);
        let mut ctx = context();
        let mut screen = Screen::new();
        let mut app = TrackerApp::new();

        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        assert!(screen.contains("BEACON FOUND"));
        assert!(!screen.contains("BAT:"));
    }

    #[test]
    fn test_radio_restored_on_exit() {
        let mut fakes = FakeBoard::new(0);
        fakes.buttons.press(Button::Back);
        let mut ctx = context();
        let mut screen = Screen::new();
        let mut app = TrackerApp::new();

        crate::app::run_app(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        assert!(!fakes.radio.enabled());
        assert_eq!(fakes.radio.enable_log(), std::vec![true, false]);
    }
}
