//! Averaged beacon sampling
//!
//! One tracker frame runs a fixed number of discovery scans. Each scan
//! contributes the RSSI of the first result whose name carries the beacon
//! prefix. With two beacons in range, which one wins a round depends on
//! the order the radio lists them in; no attempt is made to tell them
//! apart.

use heapless::{String, Vec};

use super::beacon::BeaconIdentity;
use crate::log::{trace, warn};
use crate::traits::{Clock, Radio, ScanList, MAX_SSID_LEN};

/// Upper bound on scan rounds per sample
pub const MAX_ROUNDS: usize = 16;

/// Readings gathered for one estimate
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalSample {
    readings: Vec<i16, MAX_ROUNDS>,
    matched_name: Option<String<MAX_SSID_LEN>>,
}

impl SignalSample {
    /// At least one round saw the beacon
    pub fn matched(&self) -> bool {
        !self.readings.is_empty()
    }

    /// RSSI per matching round, in scan order
    pub fn readings(&self) -> &[i16] {
        &self.readings
    }

    /// Name of the most recent match
    pub fn matched_name(&self) -> Option<&str> {
        self.matched_name.as_ref().map(|s| s.as_str())
    }

    /// Mean RSSI over the readings
    pub fn average_rssi(&self) -> Option<f32> {
        if self.readings.is_empty() {
            return None;
        }
        let sum: i32 = self.readings.iter().map(|&r| i32::from(r)).sum();
        Some(sum as f32 / self.readings.len() as f32)
    }

    /// Identity parsed from the matched name
    pub fn identity(&self, prefix: &str) -> Option<BeaconIdentity> {
        self.matched_name()
            .map(|name| BeaconIdentity::parse(name, prefix))
    }

    /// Add a reading; ignored once `MAX_ROUNDS` readings are held
    pub fn push(&mut self, name: &str, rssi: i16) {
        if self.readings.push(rssi).is_ok() {
            self.matched_name = String::try_from(name).ok();
        }
    }
}

/// Run `rounds` discovery scans and collect the beacon's readings
///
/// Performs exactly `min(rounds, MAX_ROUNDS)` scans with `pause_ms`
/// after each, so the call blocks for a bounded time. A failed scan
/// counts as a round with no results.
pub fn sample(
    radio: &mut dyn Radio,
    clock: &mut dyn Clock,
    prefix: &str,
    rounds: u8,
    pause_ms: u16,
) -> SignalSample {
    let mut result = SignalSample::default();
    let mut scan = ScanList::new();
    let rounds = usize::from(rounds).min(MAX_ROUNDS);

    for round in 0..rounds {
        if let Err(e) = radio.scan(&mut scan) {
            warn!("tracker: scan {} failed: {:?}", round, e);
            scan.clear();
        }

        if let Some(hit) = scan.iter().find(|n| n.ssid.starts_with(prefix)) {
            trace!("tracker: round {} rssi {}", round, hit.rssi);
            result.push(hit.ssid.as_str(), hit.rssi);
        }

        clock.sleep_ms(u32::from(pause_ms));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeClock, ScriptedRadio};
    use crate::traits::ScanResult;

    #[test]
    fn test_no_match_runs_every_round() {
        let mut radio = ScriptedRadio::new();
        radio.set_networks(&[ScanResult::new("HOME", -40, 6, false)]);
        let mut clock = FakeClock::new(0);

        let s = sample(&mut radio, &mut clock, "BEACON", 8, 30);
        assert!(!s.matched());
        assert!(s.readings().is_empty());
        assert_eq!(s.average_rssi(), None);
        assert_eq!(radio.scan_count(), 8);
        assert_eq!(clock.now_ms(), 240);
    }

    #[test]
    fn test_first_match_per_round() {
        let mut radio = ScriptedRadio::new();
        radio.set_networks(&[
            ScanResult::new("CAFE", -30, 1, true),
            ScanResult::new("BEACON|60", -50, 1, true),
            ScanResult::new("BEACON|10", -90, 1, true),
        ]);
        let mut clock = FakeClock::new(0);

        let s = sample(&mut radio, &mut clock, "BEACON", 3, 30);
        assert_eq!(s.readings(), &[-50, -50, -50]);
        assert_eq!(s.matched_name(), Some("BEACON|60"));
    }

    #[test]
    fn test_failed_scans_count_as_empty_rounds() {
        let mut radio = ScriptedRadio::new();
        radio.set_networks(&[ScanResult::new("BEACON|60", -60, 1, true)]);
        radio.fail_scans(2);
        let mut clock = FakeClock::new(0);

        let s = sample(&mut radio, &mut clock, "BEACON", 5, 0);
        assert_eq!(radio.scan_count(), 5);
        assert_eq!(s.readings().len(), 3);
    }

    #[test]
    fn test_average_and_identity() {
        let mut s = SignalSample::default();
        s.push("BEACON|42", -50);
        s.push("BEACON|41", -61);
        assert!((s.average_rssi().unwrap() + 55.5).abs() < 1e-6);
        let id = s.identity("BEACON").unwrap();
        assert!(id.matches);
        assert_eq!(id.battery_percent, Some(41));
    }

    #[test]
    fn test_rounds_capped() {
        let mut radio = ScriptedRadio::new();
        let mut clock = FakeClock::new(0);
        let _ = sample(&mut radio, &mut clock, "BEACON", 200, 0);
        assert_eq!(radio.scan_count(), MAX_ROUNDS);
    }
}
