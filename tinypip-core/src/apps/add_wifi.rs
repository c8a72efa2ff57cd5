//! ADD WIFI: pick a scanned network, type its password, join it
//!
//! A network that joins is saved as the one the background update tries
//! first, and the clock and weather are refreshed while the link is up.

use heapless::String;
use tinypip_display::{Button, Screen, SCREEN_COLS};

use super::editor::CharEditor;
use super::text;
use crate::app::{App, AppContext, AppControl, CONTENT_ROWS, CONTENT_TOP};
use crate::input::Press;
use crate::log::{info, warn};
use crate::menu::MenuCursor;
use crate::traits::{Board, ScanList, MAX_SSID_LEN};
use crate::update::{join_network, WifiCredentials, MAX_SECRET_LEN};

/// Characters offered for a password
pub const PASSWORD_CHARSET: &str =
    "abcdefghijklmnopqrstuvwxyz0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ _-.!@#";

#[derive(Debug, Default)]
enum Stage {
    #[default]
    Pick,
    Password {
        ssid: String<MAX_SSID_LEN>,
        editor: CharEditor<MAX_SECRET_LEN>,
    },
    /// Shown for one frame before the blocking join
    Joining(WifiCredentials),
    Done {
        ssid: String<MAX_SSID_LEN>,
        joined: bool,
    },
}

#[derive(Debug, Default)]
pub struct AddWifiApp {
    networks: ScanList,
    cursor: MenuCursor,
    stage: Stage,
    radio_was_enabled: bool,
}

impl AddWifiApp {
    pub fn new() -> Self {
        Self::default()
    }

    fn pick_frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let now = board.clock.now_ticks_ms();
        let len = self.networks.len();
        match ctx.vertical(&mut *board.input, now) {
            Some(Press::Up) => self.cursor.move_up(len),
            Some(Press::Down) => self.cursor.move_down(len),
            _ => {}
        }

        if ctx.pressed(&mut *board.input, Button::Confirm, now) {
            if let Some(network) = self.networks.get(self.cursor.selected()) {
                let editor = CharEditor::new(PASSWORD_CHARSET);
                editor.draw(screen, "PASSWORD:", "Y: JOIN  B: CANCEL");
                self.stage = Stage::Password {
                    ssid: network.ssid.clone(),
                    editor,
                };
                return;
            }
        }

        if self.networks.is_empty() {
            screen.set_centered(CONTENT_TOP + 3, "NO NETWORKS FOUND");
            return;
        }

        self.cursor.recompute_viewport(CONTENT_ROWS);
        let range = self.cursor.visible_range(len, CONTENT_ROWS);
        for (row, index) in range.enumerate() {
            let network = &self.networks[index];
            let line = CONTENT_TOP + row;
            screen.set_text(
                line,
                2,
                &text(format_args!(
                    "{} {}",
                    network.ssid.as_str(),
                    if network.open { "" } else { "*" }
                )),
            );
            if index == self.cursor.selected() {
                screen.set_text(line, 0, ">");
                screen.set_highlight(line, 0, SCREEN_COLS as u8);
            }
        }
    }
}

fn draw_joining(screen: &mut Screen, ssid: &str) {
    screen.set_centered(CONTENT_TOP + 2, "CONNECTING TO");
    screen.set_centered(CONTENT_TOP + 3, ssid);
    screen.set_centered(CONTENT_TOP + 5, "PLEASE WAIT");
}

fn draw_done(screen: &mut Screen, ssid: &str, joined: bool) {
    if joined {
        screen.set_centered(CONTENT_TOP + 2, "WIFI CONNECTED!");
        screen.set_centered(CONTENT_TOP + 3, ssid);
        screen.set_centered(CONTENT_TOP + 5, "SAVED FOR UPDATES");
    } else {
        screen.set_centered(CONTENT_TOP + 2, "CONNECTION FAILED");
        screen.set_centered(CONTENT_TOP + 3, ssid);
    }
}

impl App for AddWifiApp {
    fn title(&self) -> &'static str {
        match &self.stage {
            Stage::Pick => "ADD WIFI",
            Stage::Password { .. } => "PASSWORD",
            Stage::Joining(_) => "CONNECTING",
            Stage::Done { joined: true, .. } => "CONNECTED",
            Stage::Done { joined: false, .. } => "FAILED",
        }
    }

    fn footer(&self) -> (&'static str, &'static str) {
        match &self.stage {
            Stage::Pick => ("B: BACK", "A: SELECT"),
            Stage::Password { .. } => ("A: ADD", "Y: JOIN"),
            Stage::Joining(_) => ("", ""),
            Stage::Done { .. } => ("B: BACK", ""),
        }
    }

    fn enter(&mut self, _ctx: &mut AppContext, board: &mut Board<'_>) {
        self.radio_was_enabled = board.radio.is_enabled();
        board.radio.set_enabled(true);

        if let Err(e) = board.radio.scan(&mut self.networks) {
            warn!("add wifi: scan failed: {:?}", e);
            self.networks.clear();
        }
        self.networks.retain(|n| !n.ssid.is_empty());
        self.cursor = MenuCursor::new();
        self.stage = Stage::Pick;
    }

    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        if let Stage::Pick = self.stage {
            return self.pick_frame(ctx, board, screen);
        }

        match &mut self.stage {
            Stage::Pick => {}
            Stage::Password { ssid, editor } => {
                let finished = editor.handle_input(ctx, board);
                if !finished {
                    editor.draw(screen, "PASSWORD:", "Y: JOIN  B: CANCEL");
                    return;
                }
                let creds = WifiCredentials {
                    ssid: ssid.clone(),
                    password: String::try_from(editor.draft()).unwrap_or_default(),
                };
                draw_joining(screen, &creds.ssid);
                self.stage = Stage::Joining(creds);
            }
            Stage::Joining(creds) => {
                let joined = join_network(board, &ctx.config, creds);
                info!("add wifi: {} joined={}", creds.ssid.as_str(), joined);
                let ssid = creds.ssid.clone();
                draw_done(screen, &ssid, joined);
                self.stage = Stage::Done { ssid, joined };
            }
            Stage::Done { ssid, joined } => draw_done(screen, ssid, *joined),
        }
    }

    fn on_back(&mut self, _ctx: &mut AppContext, _board: &mut Board<'_>) -> AppControl {
        if let Stage::Password { .. } = self.stage {
            self.stage = Stage::Pick;
            AppControl::Continue
        } else {
            AppControl::Exit
        }
    }

    fn leave(&mut self, _ctx: &mut AppContext, board: &mut Board<'_>) {
        board.radio.set_enabled(self.radio_was_enabled);
    }
}
