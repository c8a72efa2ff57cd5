//! The shell: boot, then menu and apps forever
//!
//! Exactly one screen is active at a time. [`Shell::step`] runs one frame
//! of it and performs the menu/app switch when the frame asks for one, so
//! the loop itself is just `loop { shell.step() }`.

use tinypip_display::Screen;

use crate::app::{run_frame, App, AppContext, AppControl};
use crate::apps::ActiveApp;
use crate::boot::run_boot_log;
use crate::config::{DeviceConfig, Settings};
use crate::log::info;
use crate::menu::{AppId, MenuCatalog, MenuController, MenuOutcome};
use crate::persist;
use crate::traits::{Board, StorageKey};

/// What owns the panel right now
pub enum ActiveScreen {
    Menu,
    App(ActiveApp),
}

/// Owner of the board and all process-wide state
pub struct Shell<'a> {
    ctx: AppContext,
    board: Board<'a>,
    screen: Screen,
    menu: MenuController,
    active: ActiveScreen,
}

impl<'a> Shell<'a> {
    /// Shell over `board` with the stock catalog
    ///
    /// Loads saved settings (falling back to defaults) and applies them
    /// to the backlight and panel before anything is drawn.
    pub fn new(config: DeviceConfig, board: Board<'a>) -> Self {
        Self::with_catalog(config, board, MenuCatalog::standard())
    }

    /// Shell with a custom catalog
    pub fn with_catalog(config: DeviceConfig, board: Board<'a>, catalog: MenuCatalog) -> Self {
        let settings = persist::load::<Settings>(&mut *board.storage, StorageKey::Settings)
            .map(Settings::sanitized)
            .unwrap_or_default();
        board.backlight.set_level(settings.brightness);
        board.display.set_theme(settings.theme);
        info!(
            "shell: brightness {} theme {}",
            settings.brightness,
            settings.theme.label()
        );

        let boot_ticks = board.clock.now_ticks_ms();
        Self {
            ctx: AppContext::new(config, settings, boot_ticks),
            board,
            screen: Screen::new(),
            menu: MenuController::new(catalog),
            active: ActiveScreen::Menu,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    /// App currently running, if any
    pub fn active_app(&self) -> Option<AppId> {
        match &self.active {
            ActiveScreen::Menu => None,
            ActiveScreen::App(app) => Some(app.id()),
        }
    }

    /// Print the boot log
    pub fn boot(&mut self) {
        info!("shell: TinyPIP {}", crate::OS_VERSION);
        run_boot_log(&mut self.board, &mut self.screen);
    }

    /// Run one frame of the active screen
    pub fn step(&mut self) {
        match &mut self.active {
            ActiveScreen::Menu => {
                let outcome = self.menu.step(&mut self.ctx, &mut self.board, &mut self.screen);
                if let MenuOutcome::Launch(id) = outcome {
                    self.launch(id);
                }
            }
            ActiveScreen::App(app) => {
                let control = run_frame(app, &mut self.ctx, &mut self.board, &mut self.screen);
                if control == AppControl::Exit {
                    info!("shell: back to menu");
                    self.active = ActiveScreen::Menu;
                }
            }
        }
    }

    fn launch(&mut self, id: AppId) {
        info!("shell: starting {}", id.label());
        let mut app = ActiveApp::new(id, self.board.clock.now_ticks_ms());
        app.enter(&mut self.ctx, &mut self.board);
        self.active = ActiveScreen::App(app);
    }

    /// Boot, then step forever
    pub fn run(mut self) -> ! {
        self.boot();
        loop {
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBoard;
    use tinypip_display::{Button, Theme};

    #[test]
    fn test_saved_settings_applied_at_start() {
        let mut fakes = FakeBoard::new(0);
        let saved = Settings {
            brightness: 80,
            theme: Theme::Amber,
        };
        assert!(persist::save(&mut fakes.storage, StorageKey::Settings, &saved));
        let inspect = fakes.clone();

        let shell = Shell::new(DeviceConfig::default(), fakes.board());
        assert_eq!(shell.context().settings, saved);
        assert_eq!(inspect.backlight.level(), Some(80));
        assert_eq!(inspect.display.theme(), Theme::Amber);
    }

    #[test]
    fn test_out_of_range_brightness_is_clamped() {
        let mut fakes = FakeBoard::new(0);
        let saved = Settings {
            brightness: 0,
            theme: Theme::Green,
        };
        assert!(persist::save(&mut fakes.storage, StorageKey::Settings, &saved));

        let shell = Shell::new(DeviceConfig::default(), fakes.board());
        assert_eq!(shell.context().settings.brightness, 10);
    }

    #[test]
    fn test_launch_and_return() {
        let mut fakes = FakeBoard::new(1_700_000_000);
        fakes.buttons.tap(Button::Confirm, 0);
        fakes.buttons.tap(Button::Back, 1_000);
        let inspect = fakes.clone();

        let mut shell = Shell::new(DeviceConfig::default(), fakes.board());
        shell.step();
        assert_eq!(shell.active_app(), Some(AppId::Clock));

        while inspect.clock.now_ms() < 1_000 {
            shell.step();
            assert_eq!(shell.active_app(), Some(AppId::Clock));
        }
        assert!(inspect.display.shows("22:13:20"));

        shell.step();
        assert_eq!(shell.active_app(), None);
        shell.step();
        assert!(inspect.display.shows("TINYPIP OS"));
        assert_eq!(shell.menu().cursor().selected(), 0);
    }
}
