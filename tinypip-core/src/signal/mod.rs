//! Beacon signal processing
//!
//! - `sampler`: repeated discovery scans averaged into one reading
//! - `distance`: log-distance path-loss estimate from an averaged RSSI
//! - `beacon`: battery level carried in the beacon's advertised name

pub mod beacon;
pub mod distance;
pub mod sampler;

pub use beacon::{BeaconIdentity, BATTERY_DELIMITER};
pub use distance::{
    estimate_distance_m, map_position, signal_percent, DistanceEstimate, REFERENCE_FREQ_MHZ,
};
pub use sampler::{sample, SignalSample, MAX_ROUNDS};
