//! Path-loss distance estimation
//!
//! Free-space log-distance model:
//!
//! ```text
//! d[m] = 10 ^ ((27.55 - 20 * log10(f[MHz]) + |RSSI[dBm]|) / 20)
//! ```
//!
//! It assumes open air and an isotropic transmitter, so indoors the number
//! is a rough guide at best. A single RSSI reading swings by several dB
//! between scans, which is why callers average a `SignalSample` first.

use super::sampler::SignalSample;

/// 2.4 GHz channel 1
pub const REFERENCE_FREQ_MHZ: f32 = 2412.0;

/// Free-space path-loss constant for metres and MHz
const FSPL_CONSTANT_DB: f32 = 27.55;

/// Estimated distance to a transmitter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DistanceEstimate {
    pub meters: f32,
}

impl DistanceEstimate {
    /// Estimate from a sample; `None` when nothing matched
    pub fn from_sample(sample: &SignalSample, freq_mhz: f32) -> Option<Self> {
        sample.average_rssi().map(|avg| Self {
            meters: estimate_distance_m(avg, freq_mhz),
        })
    }
}

/// Distance in metres for an averaged RSSI at `freq_mhz`
///
/// `freq_mhz` must be positive. Only the magnitude of the RSSI is used.
pub fn estimate_distance_m(avg_rssi_dbm: f32, freq_mhz: f32) -> f32 {
    let exponent =
        (FSPL_CONSTANT_DB - 20.0 * libm::log10f(freq_mhz) + libm::fabsf(avg_rssi_dbm)) / 20.0;
    libm::powf(10.0, exponent)
}

/// Signal bar fill: `100 + rssi`, clamped to 0-100
pub fn signal_percent(rssi_dbm: f32) -> u8 {
    (100 + rssi_dbm as i32).clamp(0, 100) as u8
}

/// Horizontal minimap position of the target, 0.0 (far) to 1.0 (near)
pub fn map_position(avg_rssi_dbm: f32) -> f32 {
    ((100.0 + avg_rssi_dbm) / 100.0).clamp(0.0, 1.0)
}
