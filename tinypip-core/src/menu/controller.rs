//! Menu controller
//!
//! One call to [`MenuController::step`] is one menu frame: draw the
//! window of entries around the cursor, then apply at most one cursor
//! move, a launch, or the "update now" action. [`run_menu`] repeats it
//! until something is launched.

use heapless::String;
use tinypip_display::{Button, Screen, SCREEN_COLS};

use super::catalog::{AppId, CatalogEntry, MenuCatalog};
use super::cursor::MenuCursor;
use crate::app::chrome::{draw_chrome, draw_status_bar, draw_title};
use crate::app::runner::present;
use crate::app::{AppContext, CONTENT_TOP};
use crate::input::Press;
use crate::log::info;
use crate::traits::Board;
use crate::update::run_background_update;

/// Title of the menu screen
pub const MENU_TITLE: &str = "TINYPIP OS";

/// Frames of the "updating" spinner
pub const SPINNER: [char; 4] = ['-', '\\', '|', '/'];

/// Column where entry labels start
const LABEL_COL: usize = 2;

/// Result of one menu frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuOutcome {
    /// Keep showing the menu
    Stay,
    /// Hand control to an app
    Launch(AppId),
}

/// Catalog plus the cursor that persists across app runs
#[derive(Debug, Clone)]
pub struct MenuController {
    catalog: MenuCatalog,
    cursor: MenuCursor,
}

impl MenuController {
    pub fn new(catalog: MenuCatalog) -> Self {
        Self {
            catalog,
            cursor: MenuCursor::new(),
        }
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    pub fn cursor(&self) -> &MenuCursor {
        &self.cursor
    }

    /// Entry under the cursor
    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.catalog.get(self.cursor.selected())
    }

    /// Draw the menu into `screen`
    pub fn render(&mut self, ctx: &AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let rows = usize::from(ctx.config.menu.visible_rows);
        self.cursor.recompute_viewport(rows);

        screen.clear();
        draw_chrome(ctx, &*board.clock, screen, MENU_TITLE, ("A: SELECT", "Y: UPDATE"));

        if self.catalog.is_empty() {
            screen.set_text(CONTENT_TOP, LABEL_COL, "NO APPS");
            return;
        }

        let range = self.cursor.visible_range(self.catalog.len(), rows);
        for (row, index) in range.enumerate() {
            let Some(entry) = self.catalog.get(index) else {
                break;
            };
            let line = CONTENT_TOP + row;
            screen.set_text(line, LABEL_COL, entry.label);
            if index == self.cursor.selected() {
                screen.set_text(line, 0, ">");
                screen.set_highlight(line, 0, SCREEN_COLS as u8);
            }
        }
    }

    /// Run one menu frame
    pub fn step(
        &mut self,
        ctx: &mut AppContext,
        board: &mut Board<'_>,
        screen: &mut Screen,
    ) -> MenuOutcome {
        self.render(ctx, board, screen);
        present(screen, board);

        let now = board.clock.now_ticks_ms();
        let len = self.catalog.len();
        match ctx.vertical(&mut *board.input, now) {
            Some(Press::Up) => self.cursor.move_up(len),
            Some(Press::Down) => self.cursor.move_down(len),
            _ => {}
        }

        if let Some(entry) = self.selected_entry().copied() {
            if ctx.pressed(&mut *board.input, Button::Confirm, now) {
                info!("menu: launching {}", entry.label);
                return MenuOutcome::Launch(entry.app);
            }
        }

        if ctx.pressed(&mut *board.input, Button::Secondary, now) {
            self.update_now(ctx, board, screen);
            return MenuOutcome::Stay;
        }

        board.clock.sleep_ms(u32::from(ctx.config.frame_ms));
        MenuOutcome::Stay
    }

    /// The "update now" action
    ///
    /// Blocks through the spinner, the update itself and the result
    /// screen, then returns to the same menu state.
    pub fn update_now(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        info!("menu: update requested");
        ctx.status.begin(board.clock.now_epoch_s());

        for cycle in 0..usize::from(ctx.config.update.spinner_cycles) {
            let mut title: String<16> = String::new();
            let _ = title.push_str("UPDATING ");
            let _ = title.push(SPINNER[cycle % SPINNER.len()]);
            self.show_banner(ctx, board, screen, &title);
            board
                .clock
                .sleep_ms(u32::from(ctx.config.update.spinner_frame_ms));
        }

        let ok = run_background_update(board, &ctx.config);
        ctx.status.finish(ok, board.clock.now_epoch_s());
        info!("menu: update finished, ok={}", ok);

        self.show_banner(ctx, board, screen, if ok { "UPDATED" } else { "NO WIFI" });
        board
            .clock
            .sleep_ms(u32::from(ctx.config.update.result_hold_ms));

        // A key still held from before the update must not start another one
        let now = board.clock.now_ticks_ms();
        ctx.debouncer.suppress(Button::Secondary, now);
    }

    fn show_banner(&self, ctx: &AppContext, board: &mut Board<'_>, screen: &mut Screen, title: &str) {
        screen.clear();
        draw_status_bar(ctx, &*board.clock, screen);
        draw_title(screen, title);
        present(screen, board);
    }
}

/// Show the menu until an entry is confirmed
pub fn run_menu(
    controller: &mut MenuController,
    ctx: &mut AppContext,
    board: &mut Board<'_>,
    screen: &mut Screen,
) -> CatalogEntry {
    loop {
        if let MenuOutcome::Launch(_) = controller.step(ctx, board, screen) {
            if let Some(entry) = controller.selected_entry() {
                return *entry;
            }
        }
    }
}
