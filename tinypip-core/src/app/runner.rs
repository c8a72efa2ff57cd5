//! App runner
//!
//! Drives an `App` one frame at a time. `run_app` is the blocking form the
//! menu hands control to; the shell calls `run_frame` directly so it can
//! interleave its own bookkeeping.

use tinypip_display::{Button, Screen};

use super::chrome::draw_chrome;
use super::{App, AppContext, AppControl};
use crate::log::warn;
use crate::traits::Board;

/// Push a finished frame to the panel; a failed push only costs the frame
pub fn present(screen: &Screen, board: &mut Board<'_>) {
    if let Err(e) = screen.present(&mut *board.display) {
        warn!("display: frame dropped: {:?}", e);
    }
}

/// Run one frame of `app`
///
/// Draws chrome and content, presents, then checks Back. On `Exit` the
/// app's `leave` hook has already run when this returns.
pub fn run_frame<A: App + ?Sized>(
    app: &mut A,
    ctx: &mut AppContext,
    board: &mut Board<'_>,
    screen: &mut Screen,
) -> AppControl {
    screen.clear();
    app.frame(ctx, board, screen);
    draw_chrome(ctx, &*board.clock, screen, app.title(), app.footer());
    present(screen, board);

    let now = board.clock.now_ticks_ms();
    if ctx.pressed(&mut *board.input, Button::Back, now)
        && app.on_back(ctx, board) == AppControl::Exit
    {
        app.leave(ctx, board);
        return AppControl::Exit;
    }

    board.clock.sleep_ms(u32::from(app.frame_ms(ctx)));
    AppControl::Continue
}

/// Run `app` until it exits
pub fn run_app<A: App + ?Sized>(
    app: &mut A,
    ctx: &mut AppContext,
    board: &mut Board<'_>,
    screen: &mut Screen,
) {
    app.enter(ctx, board);
    while run_frame(app, ctx, board, screen) == AppControl::Continue {}
}
