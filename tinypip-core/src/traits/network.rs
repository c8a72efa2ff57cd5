//! Network services used by the background update
//!
//! Only reachable while the radio is associated. The HTTP and NTP clients
//! behind these calls belong to the board.

use heapless::Vec;

/// Days in a forecast
pub const FORECAST_DAYS: usize = 7;

/// One day of a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DailyForecast {
    /// Daily maximum in whole degrees Fahrenheit
    pub max_temp_f: i16,
    /// WMO weather code
    pub code: u8,
}

/// Raw forecast as returned by the weather service
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Forecast {
    /// Current temperature in whole degrees Fahrenheit
    pub current_temp_f: i16,
    /// Current WMO weather code
    pub current_code: u8,
    /// Upcoming days, first entry is today
    pub daily: Vec<DailyForecast, FORECAST_DAYS>,
}

/// Trait for online services
pub trait NetServices {
    /// Query a time server, returning seconds since the Unix epoch
    fn sync_time(&mut self) -> Option<u64>;

    /// Fetch the forecast for a location
    fn fetch_forecast(&mut self, latitude: f32, longitude: f32) -> Option<Forecast>;
}
