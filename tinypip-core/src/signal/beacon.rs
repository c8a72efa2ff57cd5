//! Beacon identity parsing
//!
//! The beacon has no data channel besides its advertised name, so it
//! encodes its battery level there as `<PREFIX>|<percent>`.

/// Separator between the prefix and the battery level
pub const BATTERY_DELIMITER: char = '|';

/// What an advertised name says about the beacon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeaconIdentity {
    /// Name starts with the expected prefix
    pub matches: bool,
    /// Battery level, when the suffix is a valid 0-100 integer
    pub battery_percent: Option<u8>,
}

impl BeaconIdentity {
    /// Parse an advertised name
    ///
    /// Never fails: a missing, repeated or malformed suffix only leaves
    /// the battery level unknown.
    pub fn parse(advertised_name: &str, prefix: &str) -> Self {
        if !advertised_name.starts_with(prefix) {
            return Self {
                matches: false,
                battery_percent: None,
            };
        }

        Self {
            matches: true,
            battery_percent: parse_battery(advertised_name),
        }
    }
}

fn parse_battery(name: &str) -> Option<u8> {
    let mut parts = name.split(BATTERY_DELIMITER);
    let _head = parts.next()?;
    let suffix = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let value: u8 = suffix.trim().parse().ok()?;
    (value <= 100).then_some(value)
}
