//! WIFI SCANNER: nearby networks and their estimated distance

use tinypip_display::{Button, Screen, SCREEN_COLS};

use super::text;
use crate::app::{App, AppContext, AppControl, CONTENT_ROWS, CONTENT_TOP};
use crate::input::Press;
use crate::log::{debug, warn};
use crate::menu::MenuCursor;
use crate::signal::{estimate_distance_m, signal_percent, REFERENCE_FREQ_MHZ};
use crate::traits::{Board, ScanList, ScanResult};

/// Characters of the SSID shown in the list
const LIST_SSID_CHARS: usize = 18;

#[derive(Debug, Default)]
pub struct WifiScannerApp {
    networks: ScanList,
    cursor: MenuCursor,
    /// Network whose details are open
    detail: Option<ScanResult>,
    radio_was_enabled: bool,
}

impl WifiScannerApp {
    pub fn new() -> Self {
        Self::default()
    }

    fn rescan(&mut self, board: &mut Board<'_>) {
        if let Err(e) = board.radio.scan(&mut self.networks) {
            warn!("wifi: scan failed: {:?}", e);
            self.networks.clear();
        }

        let len = self.networks.len();
        if self.cursor.selected() >= len {
            self.cursor = MenuCursor::at(len.saturating_sub(1), len);
        }
    }

    fn draw_list(&mut self, screen: &mut Screen) {
        if self.networks.is_empty() {
            screen.set_centered(CONTENT_TOP + 3, "NO NETWORKS FOUND");
            return;
        }

        self.cursor.recompute_viewport(CONTENT_ROWS);
        let range = self.cursor.visible_range(self.networks.len(), CONTENT_ROWS);
        for (row, index) in range.enumerate() {
            let network = &self.networks[index];
            let line = CONTENT_TOP + row;
            let name = display_name(network);
            screen.set_text(
                line,
                2,
                &text(format_args!(
                    "{:.width$} ({})",
                    name,
                    network.rssi,
                    width = LIST_SSID_CHARS
                )),
            );
            if index == self.cursor.selected() {
                screen.set_text(line, 0, ">");
                screen.set_highlight(line, 0, SCREEN_COLS as u8);
            }
        }
    }
}

fn display_name(network: &ScanResult) -> &str {
    if network.ssid.is_empty() {
        "<HIDDEN>"
    } else {
        network.ssid.as_str()
    }
}

fn draw_detail(screen: &mut Screen, network: &ScanResult) {
    let rssi = f32::from(network.rssi);
    let meters = estimate_distance_m(rssi, REFERENCE_FREQ_MHZ);

    screen.set_text(
        CONTENT_TOP,
        0,
        &text(format_args!("SSID: {}", display_name(network))),
    );
    screen.set_text(
        CONTENT_TOP + 1,
        0,
        &text(format_args!("RSSI: {} dBm", network.rssi)),
    );
    screen.set_text(
        CONTENT_TOP + 2,
        0,
        &text(format_args!("CHAN: {}", network.channel)),
    );
    screen.set_text(CONTENT_TOP + 3, 0, &text(format_args!("DIST: {:.1} m", meters)));
    screen.set_text(
        CONTENT_TOP + 4,
        0,
        if network.open { "SECURITY: OPEN" } else { "SECURITY: WPA" },
    );
    screen.set_text(CONTENT_TOP + 6, 0, "SIGNAL");
    screen.set_bar(CONTENT_TOP + 7, 0, SCREEN_COLS, signal_percent(rssi));
}

impl App for WifiScannerApp {
    fn title(&self) -> &'static str {
        if self.detail.is_some() {
            "NETWORK"
        } else {
            "WIFI SCANNER"
        }
    }

    fn footer(&self) -> (&'static str, &'static str) {
        if self.detail.is_some() {
            ("B: BACK", "")
        } else {
            ("B: BACK", "A: DETAILS")
        }
    }

    fn enter(&mut self, _ctx: &mut AppContext, board: &mut Board<'_>) {
        self.radio_was_enabled = board.radio.is_enabled();
        board.radio.set_enabled(true);
    }

    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        if let Some(network) = &self.detail {
            draw_detail(screen, network);
            return;
        }

        self.rescan(board);

        let now = board.clock.now_ticks_ms();
        let len = self.networks.len();
        match ctx.vertical(&mut *board.input, now) {
            Some(Press::Up) => self.cursor.move_up(len),
            Some(Press::Down) => self.cursor.move_down(len),
            _ => {}
        }

        if ctx.pressed(&mut *board.input, Button::Confirm, now) {
            if let Some(network) = self.networks.get(self.cursor.selected()) {
                debug!("wifi: details for {}", network.ssid.as_str());
                self.detail = Some(network.clone());
                draw_detail(screen, network);
                return;
            }
        }

        self.draw_list(screen);
    }

    fn on_back(&mut self, _ctx: &mut AppContext, _board: &mut Board<'_>) -> AppControl {
        if self.detail.take().is_some() {
            AppControl::Continue
        } else {
            AppControl::Exit
        }
    }

    fn leave(&mut self, _ctx: &mut AppContext, board: &mut Board<'_>) {
        board.radio.set_enabled(self.radio_was_enabled);
    }

    fn frame_ms(&self, _ctx: &AppContext) -> u16 {
        200
    }
}
