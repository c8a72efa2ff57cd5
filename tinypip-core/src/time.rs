//! Calendar time from the epoch clock
//!
//! The clock only counts seconds; the status bar and the clock app need a
//! civil date. Conversion is proleptic Gregorian in UTC.

use core::fmt::Write;

use heapless::String;

const SECONDS_PER_DAY: u64 = 86_400;

/// Broken-down UTC time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: i32,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// 0 = Monday
    pub weekday: u8,
}

impl DateTime {
    /// Convert seconds since 1970-01-01T00:00:00Z
    pub fn from_epoch(epoch_s: u64) -> Self {
        let days = (epoch_s / SECONDS_PER_DAY) as i64;
        let secs = epoch_s % SECONDS_PER_DAY;

        // Days to civil date, shifted so the year starts on March 1st
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + i64::from(month <= 2);

        Self {
            year: year as i32,
            month: month as u8,
            day: day as u8,
            hour: (secs / 3600) as u8,
            minute: ((secs / 60) % 60) as u8,
            second: (secs % 60) as u8,
            // 1970-01-01 was a Thursday
            weekday: ((days + 3).rem_euclid(7)) as u8,
        }
    }

    /// Seconds since the epoch; dates before 1970 clamp to zero
    ///
    /// `weekday` is ignored. A day past the end of its month rolls into
    /// the next month.
    pub fn to_epoch(&self) -> u64 {
        let days = days_from_civil(self.year, self.month, self.day);
        let secs = days * SECONDS_PER_DAY as i64
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second);
        secs.max(0) as u64
    }

    /// `HH:MM`
    pub fn hhmm(&self) -> String<8> {
        let mut s = String::new();
        let _ = write!(s, "{:02}:{:02}", self.hour, self.minute);
        s
    }

    /// `HH:MM:SS`
    pub fn hhmmss(&self) -> String<8> {
        let mut s = String::new();
        let _ = write!(s, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second);
        s
    }

    /// `MM/DD`
    pub fn mmdd(&self) -> String<8> {
        let mut s = String::new();
        let _ = write!(s, "{:02}/{:02}", self.month, self.day);
        s
    }
}

/// Days from 1970-01-01 to a civil date
fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let month = i64::from(month);
    let year = i64::from(year) - i64::from(month <= 2);
    let era = year.div_euclid(400);
    let yoe = year - era * 400;
    let mp = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Length of `month` (1-12) in `year`
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// `Hh Mm` for an uptime in milliseconds
pub fn format_uptime(uptime_ms: u64) -> String<16> {
    let minutes = uptime_ms / 60_000;
    let mut s = String::new();
    let _ = write!(s, "{}h {}m", minutes / 60, minutes % 60);
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_epoch_zero() {
        let t = DateTime::from_epoch(0);
        assert_eq!((t.year, t.month, t.day), (1970, 1, 1));
        assert_eq!((t.hour, t.minute, t.second), (0, 0, 0));
        assert_eq!(t.weekday, 3);
    }

    #[test]
    fn test_known_instant() {
        // 2023-11-14 22:13:20 UTC, a Tuesday
        let t = DateTime::from_epoch(1_700_000_000);
        assert_eq!((t.year, t.month, t.day), (2023, 11, 14));
        assert_eq!(t.hhmmss().as_str(), "22:13:20");
        assert_eq!(t.hhmm().as_str(), "22:13");
        assert_eq!(t.mmdd().as_str(), "11/14");
        assert_eq!(t.weekday, 1);
    }

    #[test]
    fn test_leap_day() {
        // 2024-02-29 12:00:00 UTC
        let t = DateTime::from_epoch(1_709_208_000);
        assert_eq!((t.year, t.month, t.day), (2024, 2, 29));
        assert_eq!(t.hour, 12);
    }

    #[test]
    fn test_to_epoch_inverts_from_epoch() {
        for epoch in [0, 59, 86_399, 951_782_400, 1_700_000_000, 1_709_208_000, 4_102_444_799] {
            assert_eq!(DateTime::from_epoch(epoch).to_epoch(), epoch);
        }
    }

    #[test]
    fn test_to_epoch_before_1970_clamps() {
        let mut t = DateTime::from_epoch(0);
        t.year = 1969;
        assert_eq!(t.to_epoch(), 0);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    proptest! {
        #[test]
        fn test_civil_round_trip(epoch in 0u64..8_000_000_000) {
            prop_assert_eq!(DateTime::from_epoch(epoch).to_epoch(), epoch);
        }
    }

    #[test]
    fn test_uptime_format() {
        assert_eq!(format_uptime(0).as_str(), "0h 0m");
        assert_eq!(format_uptime(3_725_000).as_str(), "1h 2m");
    }
}
