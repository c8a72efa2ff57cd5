//! SETTINGS: backlight level and colour theme
//!
//! Changes apply to the panel at once and are saved best-effort; a failed
//! write only means the next boot starts from the old values.

use tinypip_display::{Button, Screen, SCREEN_COLS};

use super::text;
use crate::app::{App, AppContext, CONTENT_TOP};
use crate::log::info;
use crate::persist;
use crate::traits::{Board, StorageKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Field {
    #[default]
    Brightness,
    ColorMode,
}

impl Field {
    const ALL: [Field; 2] = [Field::Brightness, Field::ColorMode];

    fn label(self) -> &'static str {
        match self {
            Field::Brightness => "BRIGHTNESS",
            Field::ColorMode => "COLOR MODE",
        }
    }

    fn other(self) -> Self {
        match self {
            Field::Brightness => Field::ColorMode,
            Field::ColorMode => Field::Brightness,
        }
    }
}

const OPTIONS_ROW: usize = CONTENT_TOP + 3;
const VALUE_ROW: usize = CONTENT_TOP + 6;

#[derive(Debug, Default)]
pub struct SettingsApp {
    selected: Field,
}

impl SettingsApp {
    pub fn new() -> Self {
        Self::default()
    }

    fn change(&mut self, ctx: &mut AppContext, board: &mut Board<'_>) {
        match self.selected {
            Field::Brightness => {
                ctx.settings.step_brightness();
                board.backlight.set_level(ctx.settings.brightness);
            }
            Field::ColorMode => {
                ctx.settings.toggle_theme();
                board.display.set_theme(ctx.settings.theme);
            }
        }
        info!(
            "settings: brightness {} theme {}",
            ctx.settings.brightness,
            ctx.settings.theme.label()
        );
        persist::save(&mut *board.storage, StorageKey::Settings, &ctx.settings);
    }
}

impl App for SettingsApp {
    fn title(&self) -> &'static str {
        "SETTINGS"
    }

    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let now = board.clock.now_ticks_ms();
        if ctx.vertical(&mut *board.input, now).is_some() {
            self.selected = self.selected.other();
        }
        if ctx.pressed(&mut *board.input, Button::Confirm, now) {
            self.change(ctx, board);
        }

        screen.set_text(CONTENT_TOP, 0, "UP/DOWN: SELECT OPTION");
        screen.set_text(CONTENT_TOP + 1, 0, "A: CHANGE VALUE");

        for (i, field) in Field::ALL.iter().enumerate() {
            let row = OPTIONS_ROW + i;
            screen.set_text(row, 2, field.label());
            if *field == self.selected {
                screen.set_text(row, 0, ">");
                screen.set_highlight(row, 0, SCREEN_COLS as u8);
            }
        }

        match self.selected {
            Field::Brightness => {
                let level = ctx.settings.brightness;
                screen.set_text(VALUE_ROW, 0, &text(format_args!("LEVEL: {}%", level)));
                screen.set_bar(VALUE_ROW + 1, 0, SCREEN_COLS, level);
            }
            Field::ColorMode => {
                screen.set_text(
                    VALUE_ROW,
                    0,
                    &text(format_args!("MODE: {}", ctx.settings.theme.label())),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::run_frame;
    use crate::config::{DeviceConfig, Settings};
    use crate::testing::FakeBoard;
    use tinypip_display::Theme;

    fn setup() -> (FakeBoard, AppContext, Screen, SettingsApp) {
        (
            FakeBoard::new(0),
            AppContext::new(DeviceConfig::default(), Settings::default(), 0),
            Screen::new(),
            SettingsApp::new(),
        )
    }

    #[test]
    fn test_brightness_applied_and_saved() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        fakes.buttons.tap(Button::Confirm, 0);
        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);

        assert_eq!(ctx.settings.brightness, 60);
        assert_eq!(fakes.backlight.level(), Some(60));
        assert!(screen.contains("LEVEL: 60%"));

        let saved: Option<Settings> = persist::load(&mut fakes.storage, StorageKey::Settings);
        assert_eq!(saved, Some(ctx.settings));
    }

    #[test]
    fn test_down_then_confirm_toggles_theme() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        fakes.buttons.tap(Button::Down, 0);
        fakes.buttons.tap(Button::Confirm, 100);
        while fakes.clock.now_ms() < 200 {
            run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        }

        assert_eq!(ctx.settings.theme, Theme::Amber);
        assert_eq!(ctx.settings.brightness, 50);
        assert_eq!(fakes.display.theme(), Theme::Amber);
        assert!(screen.contains("> COLOR MODE"));
        assert!(screen.contains("MODE: AMBER"));
    }

    #[test]
    fn test_failed_save_keeps_new_value() {
        let (mut fakes, mut ctx, mut screen, mut app) = setup();
        fakes.storage.fail_writes(true);
        fakes.buttons.tap(Button::Confirm, 0);
        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);

        assert_eq!(ctx.settings.brightness, 60);
        assert_eq!(fakes.storage.writes(), 0);
    }
}
