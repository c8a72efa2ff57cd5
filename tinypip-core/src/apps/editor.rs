//! One-key-at-a-time text entry
//!
//! There is no keyboard, so text is built by cycling through a fixed
//! character set: Up/Down pick a character, A appends it, Left erases
//! and Y finishes. NOTES and ADD WIFI both use it with their own
//! character sets.

use heapless::String;
use tinypip_display::{Button, Screen};

use super::text;
use crate::app::{AppContext, CONTENT_TOP};
use crate::input::Press;
use crate::traits::Board;

#[derive(Debug)]
pub(crate) struct CharEditor<const N: usize> {
    draft: String<N>,
    charset: &'static str,
    /// Index into `charset`
    index: usize,
}

impl<const N: usize> CharEditor<N> {
    pub(crate) fn new(charset: &'static str) -> Self {
        Self {
            draft: String::new(),
            charset,
            index: 0,
        }
    }

    pub(crate) fn draft(&self) -> &str {
        &self.draft
    }

    pub(crate) fn into_draft(self) -> String<N> {
        self.draft
    }

    pub(crate) fn current(&self) -> char {
        self.charset.chars().nth(self.index).unwrap_or(' ')
    }

    pub(crate) fn cycle(&mut self, forward: bool) {
        let len = self.charset.chars().count();
        if len == 0 {
            return;
        }
        self.index = if forward {
            (self.index + 1) % len
        } else {
            (self.index + len - 1) % len
        };
    }

    /// Apply this frame's keys; true once Y asks to finish
    pub(crate) fn handle_input(&mut self, ctx: &mut AppContext, board: &mut Board<'_>) -> bool {
        let now = board.clock.now_ticks_ms();
        match ctx.direction(&mut *board.input, now) {
            Some(Press::Up) => self.cycle(false),
            Some(Press::Down) => self.cycle(true),
            Some(Press::Left) => {
                self.draft.pop();
            }
            _ => {}
        }
        if ctx.pressed(&mut *board.input, Button::Confirm, now) {
            let _ = self.draft.push(self.current());
        }
        ctx.pressed(&mut *board.input, Button::Secondary, now)
    }

    /// Draft under `label`, the current character and the key hints
    pub(crate) fn draw(&self, screen: &mut Screen, label: &str, finish_hint: &str) {
        screen.set_text(CONTENT_TOP, 1, label);
        screen.set_text(CONTENT_TOP + 1, 1, &self.draft);
        screen.set_text(
            CONTENT_TOP + 3,
            1,
            &text(format_args!("CHAR: {}", self.current())),
        );
        screen.set_text(CONTENT_TOP + 5, 1, "UP/DOWN: CHANGE");
        screen.set_text(CONTENT_TOP + 6, 1, "A: ADD CHAR  LEFT: ERASE");
        screen.set_text(CONTENT_TOP + 7, 1, finish_hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_both_ways() {
        let mut editor = CharEditor::<4>::new("ABC");
        assert_eq!(editor.current(), 'A');
        editor.cycle(false);
        assert_eq!(editor.current(), 'C');
        editor.cycle(true);
        editor.cycle(true);
        assert_eq!(editor.current(), 'B');
    }

    #[test]
    fn test_draft_stops_at_capacity() {
        use crate::config::{DeviceConfig, Settings};
        use crate::testing::FakeBoard;

        let mut fakes = FakeBoard::new(0);
        let mut ctx = AppContext::new(DeviceConfig::default(), Settings::default(), 0);
        let mut editor = CharEditor::<2>::new("xy");
        for at in [0, 250, 500] {
            fakes.buttons.tap(Button::Confirm, at);
        }
        while fakes.clock.now_ms() < 600 {
            assert!(!editor.handle_input(&mut ctx, &mut fakes.board()));
            fakes.clock.advance(50);
        }
        assert_eq!(editor.draft(), "xx");
    }
}
