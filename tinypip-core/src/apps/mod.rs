//! Built-in apps
//!
//! Each app is a plain struct implementing [`App`]. [`ActiveApp`] holds
//! whichever one is running, so the shell dispatches with a `match` over
//! [`AppId`] instead of looking handlers up by label.

pub mod add_wifi;
pub mod clock;
mod editor;
pub mod notes;
pub mod set_clock;
pub mod settings;
pub mod snake;
pub mod status;
pub mod stopwatch;
pub mod system;
pub mod timer;
pub mod tracker;
pub mod weather;
pub mod wifi;

pub use add_wifi::AddWifiApp;
pub use clock::ClockApp;
pub use notes::NotesApp;
pub use set_clock::{ClockPart, SetClockApp};
pub use settings::SettingsApp;
pub use snake::SnakeApp;
pub use status::StatusApp;
pub use stopwatch::StopwatchApp;
pub use system::SystemApp;
pub use timer::TimerApp;
pub use tracker::TrackerApp;
pub use weather::WeatherApp;
pub use wifi::WifiScannerApp;

use core::fmt;
use core::fmt::Write;

use heapless::String;
use tinypip_display::{Screen, SCREEN_COLS};

use crate::app::{App, AppContext, AppControl};
use crate::menu::AppId;
use crate::traits::Board;

/// One formatted screen row
pub(crate) type Line = String<SCREEN_COLS>;

/// Writer that keeps the leading characters that fit in a row
struct Truncating<'a>(&'a mut Line);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.0.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Format into a row-sized string, dropping what does not fit
pub(crate) fn text(args: fmt::Arguments<'_>) -> Line {
    let mut line = Line::new();
    let _ = Truncating(&mut line).write_fmt(args);
    line
}

/// The app currently owning the screen
pub enum ActiveApp {
    Clock(ClockApp),
    Stopwatch(StopwatchApp),
    Notes(NotesApp),
    WifiScanner(WifiScannerApp),
    Tracker(TrackerApp),
    Weather(WeatherApp),
    Settings(SettingsApp),
    System(SystemApp),
    Snake(SnakeApp),
    Status(StatusApp),
    Timer(TimerApp),
    AddWifi(AddWifiApp),
    SetDate(SetClockApp),
    SetTime(SetClockApp),
}

macro_rules! each_app {
    ($self:expr, $app:ident => $body:expr) => {
        match $self {
            ActiveApp::Clock($app) => $body,
            ActiveApp::Stopwatch($app) => $body,
            ActiveApp::Notes($app) => $body,
            ActiveApp::WifiScanner($app) => $body,
            ActiveApp::Tracker($app) => $body,
            ActiveApp::Weather($app) => $body,
            ActiveApp::Settings($app) => $body,
            ActiveApp::System($app) => $body,
            ActiveApp::Snake($app) => $body,
            ActiveApp::Status($app) => $body,
            ActiveApp::Timer($app) => $body,
            ActiveApp::AddWifi($app) => $body,
            ActiveApp::SetDate($app) => $body,
            ActiveApp::SetTime($app) => $body,
        }
    };
}

impl ActiveApp {
    /// Fresh instance of `id`; `now_ms` seeds anything random
    pub fn new(id: AppId, now_ms: u64) -> Self {
        match id {
            AppId::Clock => ActiveApp::Clock(ClockApp::new()),
            AppId::Stopwatch => ActiveApp::Stopwatch(StopwatchApp::new()),
            AppId::Notes => ActiveApp::Notes(NotesApp::new()),
            AppId::WifiScanner => ActiveApp::WifiScanner(WifiScannerApp::new()),
            AppId::Tracker => ActiveApp::Tracker(TrackerApp::new()),
            AppId::Weather => ActiveApp::Weather(WeatherApp::new()),
            AppId::Settings => ActiveApp::Settings(SettingsApp::new()),
            AppId::System => ActiveApp::System(SystemApp::new()),
            AppId::Snake => ActiveApp::Snake(SnakeApp::new(now_ms)),
            AppId::Status => ActiveApp::Status(StatusApp::new()),
            AppId::Timer => ActiveApp::Timer(TimerApp::new()),
            AppId::AddWifi => ActiveApp::AddWifi(AddWifiApp::new()),
            AppId::SetDate => ActiveApp::SetDate(SetClockApp::date()),
            AppId::SetTime => ActiveApp::SetTime(SetClockApp::time()),
        }
    }

    pub fn id(&self) -> AppId {
        match self {
            ActiveApp::Clock(_) => AppId::Clock,
            ActiveApp::Stopwatch(_) => AppId::Stopwatch,
            ActiveApp::Notes(_) => AppId::Notes,
            ActiveApp::WifiScanner(_) => AppId::WifiScanner,
            ActiveApp::Tracker(_) => AppId::Tracker,
            ActiveApp::Weather(_) => AppId::Weather,
            ActiveApp::Settings(_) => AppId::Settings,
            ActiveApp::System(_) => AppId::System,
            ActiveApp::Snake(_) => AppId::Snake,
            ActiveApp::Status(_) => AppId::Status,
            ActiveApp::Timer(_) => AppId::Timer,
            ActiveApp::AddWifi(_) => AppId::AddWifi,
            ActiveApp::SetDate(_) => AppId::SetDate,
            ActiveApp::SetTime(_) => AppId::SetTime,
        }
    }
}

impl App for ActiveApp {
    fn title(&self) -> &'static str {
        each_app!(self, app => app.title())
    }

    fn footer(&self) -> (&'static str, &'static str) {
        each_app!(self, app => app.footer())
    }

    fn enter(&mut self, ctx: &mut AppContext, board: &mut Board<'_>) {
        each_app!(self, app => app.enter(ctx, board))
    }

    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        each_app!(self, app => app.frame(ctx, board, screen))
    }

    fn on_back(&mut self, ctx: &mut AppContext, board: &mut Board<'_>) -> AppControl {
        each_app!(self, app => app.on_back(ctx, board))
    }

    fn leave(&mut self, ctx: &mut AppContext, board: &mut Board<'_>) {
        each_app!(self, app => app.leave(ctx, board))
    }

    fn frame_ms(&self, ctx: &AppContext) -> u16 {
        each_app!(self, app => app.frame_ms(ctx))
    }
}
