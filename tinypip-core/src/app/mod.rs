//! The app contract
//!
//! An app owns the panel and buttons from the moment the menu launches it
//! until it asks to exit. The runner gives it one frame at a time: the
//! shared chrome (status bar, title, footer) is drawn around whatever the
//! app puts in the content rows.
//!
//! Apps never return errors. A failed scan or an unreadable record is
//! shown as a placeholder ("NO DATA", "OFFLINE") and the loop goes on.
//!
//! An app that changes board state it does not own, such as powering the
//! radio, must put it back in `leave`. Nothing else will.

pub mod chrome;
pub mod context;
pub mod runner;

pub use context::AppContext;
pub use runner::{run_app, run_frame};

use tinypip_display::Screen;

use crate::traits::Board;

/// Row of the status bar
pub const STATUS_ROW: usize = 0;

/// Row of the screen title
pub const TITLE_ROW: usize = 2;

/// First content row
pub const CONTENT_TOP: usize = 4;

/// Number of content rows
pub const CONTENT_ROWS: usize = 10;

/// Row of the key hints
pub const FOOTER_ROW: usize = 15;

/// What the runner should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppControl {
    /// Keep running
    Continue,
    /// Return to the menu
    Exit,
}

/// A single-screen application
pub trait App {
    /// Title drawn under the status bar
    fn title(&self) -> &'static str;

    /// Key hints for the footer (left, right)
    fn footer(&self) -> (&'static str, &'static str) {
        ("B: BACK", "")
    }

    /// Called once before the first frame
    fn enter(&mut self, _ctx: &mut AppContext, _board: &mut Board<'_>) {}

    /// Handle input and draw the content rows
    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen);

    /// Back was pressed; `Exit` leaves the app
    fn on_back(&mut self, _ctx: &mut AppContext, _board: &mut Board<'_>) -> AppControl {
        AppControl::Exit
    }

    /// Called once after the last frame
    fn leave(&mut self, _ctx: &mut AppContext, _board: &mut Board<'_>) {}

    /// Sleep after each frame
    fn frame_ms(&self, ctx: &AppContext) -> u16 {
        ctx.config.frame_ms
    }
}
