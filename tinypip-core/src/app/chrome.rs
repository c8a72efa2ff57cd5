//! Shared screen chrome
//!
//! Status bar on top, title and a rule below it, key hints at the bottom.

use tinypip_display::{Screen, SCREEN_COLS};

use super::{AppContext, CONTENT_TOP, FOOTER_ROW, STATUS_ROW, TITLE_ROW};
use crate::time::DateTime;
use crate::traits::Clock;

/// Column of the update badge
pub const BADGE_COL: usize = SCREEN_COLS - 1;

/// Draw `HH:MM  MM/DD` and the update badge
pub fn draw_status_bar(ctx: &AppContext, clock: &dyn Clock, screen: &mut Screen) {
    let now_s = clock.now_epoch_s();
    let dt = DateTime::from_epoch(now_s);

    screen.set_text(STATUS_ROW, 0, &dt.hhmm());
    screen.set_text(STATUS_ROW, 7, &dt.mmdd());

    if let Some(glyph) = ctx.status.glyph(now_s, clock.now_ticks_ms()) {
        screen.put_glyph(STATUS_ROW, BADGE_COL, glyph);
    }
}

/// Draw the screen title and the rule under it
pub fn draw_title(screen: &mut Screen, title: &str) {
    screen.set_text(TITLE_ROW, 0, title);
    let mut rule: heapless::String<SCREEN_COLS> = heapless::String::new();
    for _ in 0..SCREEN_COLS {
        let _ = rule.push('-');
    }
    screen.set_line(CONTENT_TOP - 1, &rule);
}

/// Draw key hints, left-aligned and right-aligned
pub fn draw_footer(screen: &mut Screen, left: &str, right: &str) {
    screen.set_text(FOOTER_ROW, 0, left);
    let len = right.chars().count();
    if len > 0 && len <= SCREEN_COLS {
        screen.set_text(FOOTER_ROW, SCREEN_COLS - len, right);
    }
}

/// Everything around the content rows
pub fn draw_chrome(
    ctx: &AppContext,
    clock: &dyn Clock,
    screen: &mut Screen,
    title: &str,
    footer: (&str, &str),
) {
    draw_status_bar(ctx, clock, screen);
    draw_title(screen, title);
    draw_footer(screen, footer.0, footer.1);
}
