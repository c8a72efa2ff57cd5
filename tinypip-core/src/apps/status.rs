//! STATUS: link state and a one-scan beacon check
//!
//! Unlike TRACKER this does not average: each frame runs a single
//! discovery scan and reports whether the beacon answered, with the
//! battery level from its advertised name.

use tinypip_display::Screen;

use super::text;
use crate::app::{App, AppContext, CONTENT_TOP};
use crate::signal::sample;
use crate::time::format_uptime;
use crate::traits::Board;

#[derive(Debug, Default)]
pub struct StatusApp {
    radio_was_enabled: bool,
}

impl StatusApp {
    pub fn new() -> Self {
        Self::default()
    }
}

impl App for StatusApp {
    fn title(&self) -> &'static str {
        "STATUS"
    }

    fn enter(&mut self, _ctx: &mut AppContext, board: &mut Board<'_>) {
        self.radio_was_enabled = board.radio.is_enabled();
        board.radio.set_enabled(true);
    }

    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let online = board.radio.is_connected();
        let prefix = &ctx.config.beacon.prefix;
        let found = sample(&mut *board.radio, &mut *board.clock, prefix, 1, 0);
        let now = board.clock.now_ticks_ms();

        screen.set_text(CONTENT_TOP, 0, "NETWORK");
        screen.set_text(
            CONTENT_TOP + 1,
            0,
            &text(format_args!(
                "WiFi: {}",
                if online { "Connected" } else { "Offline" }
            )),
        );

        screen.set_text(CONTENT_TOP + 3, 0, "BEACON");
        match found.readings().first() {
            Some(rssi) => {
                screen.set_text(CONTENT_TOP + 4, 0, "Status: ONLINE");
                match found.identity(prefix).and_then(|id| id.battery_percent) {
                    Some(percent) => screen.set_text(
                        CONTENT_TOP + 5,
                        0,
                        &text(format_args!("Battery: {}%", percent)),
                    ),
                    None => screen.set_text(CONTENT_TOP + 5, 0, "Battery: --"),
                }
                screen.set_text(
                    CONTENT_TOP + 6,
                    0,
                    &text(format_args!("Signal: {} dBm", rssi)),
                );
            }
            None => screen.set_text(CONTENT_TOP + 4, 0, "Status: OFFLINE"),
        }

        screen.set_text(
            CONTENT_TOP + 8,
            0,
            &text(format_args!("Uptime: {}", format_uptime(ctx.uptime_ms(now)))),
        );
    }

    fn leave(&mut self, _ctx: &mut AppContext, board: &mut Board<'_>) {
        board.radio.set_enabled(self.radio_was_enabled);
    }

    fn frame_ms(&self, _ctx: &AppContext) -> u16 {
        250
    }
}
