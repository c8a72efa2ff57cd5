//! WEATHER: cached forecast, today or the whole week

use tinypip_display::{Button, Screen};

use super::text;
use crate::app::{App, AppContext, CONTENT_TOP};
use crate::persist;
use crate::traits::{Board, StorageKey};
use crate::weather::WeatherReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum View {
    #[default]
    Today,
    Week,
}

#[derive(Debug, Default)]
pub struct WeatherApp {
    report: Option<WeatherReport>,
    view: View,
}

impl WeatherApp {
    pub fn new() -> Self {
        Self::default()
    }
}

impl App for WeatherApp {
    fn title(&self) -> &'static str {
        match self.view {
            View::Today => "WEATHER: TODAY",
            View::Week => "WEATHER: WEEK",
        }
    }

    fn footer(&self) -> (&'static str, &'static str) {
        ("B: BACK", "A: TODAY/WEEK")
    }

    fn enter(&mut self, _ctx: &mut AppContext, board: &mut Board<'_>) {
        self.report = persist::load(&mut *board.storage, StorageKey::Weather);
    }

    fn frame(&mut self, ctx: &mut AppContext, board: &mut Board<'_>, screen: &mut Screen) {
        let now = board.clock.now_ticks_ms();
        if ctx.pressed(&mut *board.input, Button::Confirm, now) {
            self.view = match self.view {
                View::Today => View::Week,
                View::Week => View::Today,
            };
        }

        let Some(report) = &self.report else {
            screen.set_centered(CONTENT_TOP + 3, "NO DATA");
            screen.set_centered(CONTENT_TOP + 5, "Y ON MENU TO UPDATE");
            return;
        };

        match self.view {
            View::Today => {
                let today = &report.today;
                screen.set_centered(CONTENT_TOP + 2, &today.temperature);
                screen.set_centered(CONTENT_TOP + 4, today.condition.label());
            }
            View::Week => {
                for (row, day) in report.week.iter().enumerate() {
                    screen.set_text(
                        CONTENT_TOP + row,
                        2,
                        &text(format_args!(
                            "{:<4} {:>5}  {}",
                            day.label.as_str(),
                            day.temperature.as_str(),
                            day.condition.label()
                        )),
                    );
                }
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
    use crate::traits::{DailyForecast, Forecast};

    fn stored_report(fakes: &mut FakeBoard) {
        let mut daily = heapless::Vec::new();
        for i in 0..7i16 {
            let _ = daily.push(DailyForecast {
                max_temp_f: 70 + i,
                code: if i == 1 { 63 } else { 3 },
            });
        }
        let report = WeatherReport::from_forecast(&Forecast {
            current_temp_f: 68,
            current_code: 0,
            daily,
        });
        assert!(persist::save(&mut fakes.storage, StorageKey::Weather, &report));
    }

    #[test]
    fn test_no_cache_shows_no_data() {
        let mut fakes = FakeBoard::new(0);
        let mut ctx = AppContext::new(DeviceConfig::default(), Settings::default(), 0);
        let mut screen = Screen::new();
        let mut app = WeatherApp::new();

        app.enter(&mut ctx, &mut fakes.board());
        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        assert!(screen.contains("NO DATA"));
    }

    #[test]
    fn test_corrupt_cache_shows_no_data() {
        let mut fakes = FakeBoard::new(0);
        fakes.storage.insert_raw(StorageKey::Weather, &[0xff, 0xff, 0xff]);
        let mut ctx = AppContext::new(DeviceConfig::default(), Settings::default(), 0);
        let mut screen = Screen::new();
        let mut app = WeatherApp::new();

        app.enter(&mut ctx, &mut fakes.board());
        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        assert!(screen.contains("NO DATA"));
    }

    #[test]
    fn test_confirm_toggles_today_and_week() {
        let mut fakes = FakeBoard::new(0);
        stored_report(&mut fakes);
        let mut ctx = AppContext::new(DeviceConfig::default(), Settings::default(), 0);
        let mut screen = Screen::new();
        let mut app = WeatherApp::new();

        app.enter(&mut ctx, &mut fakes.board());
        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        assert!(screen.contains("WEATHER: TODAY"));
        assert!(screen.contains("68F"));
        assert!(screen.contains("CLEAR"));

        fakes.buttons.tap(Button::Confirm, fakes.clock.now_ms());
        run_frame(&mut app, &mut ctx, &mut fakes.board(), &mut screen);
        assert!(screen.contains("WEATHER: WEEK"));
        assert!(screen.contains("MON    70F  CLOUDY"));
        assert!(screen.contains("TUE    71F  RAIN"));
        assert!(screen.contains("SUN    76F  CLOUDY"));
    }
}
