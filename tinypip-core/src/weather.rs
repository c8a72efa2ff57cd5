//! Cached weather report
//!
//! The background update turns a raw forecast into a small display-ready
//! report and stores it; the WEATHER app only ever reads the cache.

use core::fmt::Write;

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use crate::traits::{Forecast, FORECAST_DAYS};

/// Day labels of the week view
pub const WEEK_LABELS: [&str; FORECAST_DAYS] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

/// Coarse sky condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Condition {
    Clear,
    Part,
    Cloudy,
    Rain,
}

impl Condition {
    /// Map a WMO weather code; anything unlisted reads as cloudy
    pub fn from_wmo_code(code: u8) -> Self {
        match code {
            0 | 1 => Condition::Clear,
            2 => Condition::Part,
            3 => Condition::Cloudy,
            51 | 53 | 55 | 61 | 63 | 65 | 80 | 81 | 82 => Condition::Rain,
            _ => Condition::Cloudy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Condition::Clear => "CLEAR",
            Condition::Part => "PART",
            Condition::Cloudy => "CLOUDY",
            Condition::Rain => "RAIN",
        }
    }
}

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DayReport {
    pub label: String<6>,
    /// Temperature text, e.g. `72F`
    pub temperature: String<8>,
    pub condition: Condition,
}

impl DayReport {
    fn new(label: &str, temp_f: i16, condition: Condition) -> Self {
        let mut temperature = String::new();
        let _ = write!(temperature, "{}F", temp_f);
        Self {
            label: String::try_from(label).unwrap_or_default(),
            temperature,
            condition,
        }
    }
}

/// Stored weather report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherReport {
    pub today: DayReport,
    pub week: Vec<DayReport, FORECAST_DAYS>,
}

impl WeatherReport {
    /// Build the report from a raw forecast
    pub fn from_forecast(forecast: &Forecast) -> Self {
        let today = DayReport::new(
            "TODAY",
            forecast.current_temp_f,
            Condition::from_wmo_code(forecast.current_code),
        );

        let mut week = Vec::new();
        for (label, day) in WEEK_LABELS.iter().zip(forecast.daily.iter()) {
            let _ = week.push(DayReport::new(
                label,
                day.max_temp_f,
                Condition::from_wmo_code(day.code),
            ));
        }

        Self { today, week }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DailyForecast;

    #[test]
    fn test_code_mapping() {
        assert_eq!(Condition::from_wmo_code(0), Condition::Clear);
        assert_eq!(Condition::from_wmo_code(1), Condition::Clear);
        assert_eq!(Condition::from_wmo_code(2), Condition::Part);
        assert_eq!(Condition::from_wmo_code(3), Condition::Cloudy);
        for code in [51, 53, 55, 61, 63, 65, 80, 81, 82] {
            assert_eq!(Condition::from_wmo_code(code), Condition::Rain);
        }
        assert_eq!(Condition::from_wmo_code(45), Condition::Cloudy);
        assert_eq!(Condition::from_wmo_code(95), Condition::Cloudy);
    }

    #[test]
    fn test_report_from_forecast() {
        let mut daily = Vec::new();
        for i in 0..7u8 {
            let _ = daily.push(DailyForecast {
                max_temp_f: 60 + i16::from(i),
                code: if i == 2 { 61 } else { 0 },
            });
        }
        let forecast = Forecast {
            current_temp_f: -3,
            current_code: 2,
            daily,
        };

        let report = WeatherReport::from_forecast(&forecast);
        assert_eq!(report.today.label.as_str(), "TODAY");
        assert_eq!(report.today.temperature.as_str(), "-3F");
        assert_eq!(report.today.condition, Condition::Part);
        assert_eq!(report.week.len(), 7);
        assert_eq!(report.week[0].label.as_str(), "MON");
        assert_eq!(report.week[6].label.as_str(), "SUN");
        assert_eq!(report.week[2].temperature.as_str(), "62F");
        assert_eq!(report.week[2].condition, Condition::Rain);
    }

    #[test]
    fn test_short_forecast_gives_short_week() {
        let forecast = Forecast {
            current_temp_f: 50,
            current_code: 0,
            daily: Vec::new(),
        };
        assert!(WeatherReport::from_forecast(&forecast).week.is_empty());
    }
}
