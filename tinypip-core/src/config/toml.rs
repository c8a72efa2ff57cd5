//! Simple TOML parser for device configuration
//!
//! Handles the flat subset the device file uses and nothing more:
//!
//! - `[section]` headers
//! - `key = value` pairs (string, integer, float)
//! - Comments (`# ...`), including after a value
//!
//! Keys are applied on top of `DeviceConfig::default()`, so a file only
//! lists what it changes. Unknown sections and keys are skipped with a
//! warning; a known key with a bad value is an error.

use heapless::String;

use super::types::{DeviceConfig, MAX_PREFIX_LEN};
use crate::log::warn;
use crate::signal::MAX_ROUNDS;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidSyntax,
    /// Value has the wrong type for its key
    InvalidValue,
    /// Value parsed but is outside the accepted range
    OutOfRange,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Beacon,
    Menu,
    Update,
    Weather,
    Ui,
    Unknown,
}

/// Parse TOML text into a `DeviceConfig`
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidSyntax)?;
        apply_value(&mut config, section, key, value)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();
    if header.is_empty() {
        return Err(ParseError::InvalidSection);
    }

    Ok(match header {
        "beacon" => Section::Beacon,
        "menu" => Section::Menu,
        "update" => Section::Update,
        "weather" => Section::Weather,
        "ui" => Section::Ui,
        _ => {
            warn!("config: skipping unknown section [{}]", header);
            Section::Unknown
        }
    })
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else if value.contains('"') {
        Err(ParseError::InvalidValue)
    } else {
        Ok(value)
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_float(value: &str) -> Result<f32, ParseError> {
    let v: f32 = value.parse().map_err(|_| ParseError::InvalidValue)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseError::InvalidValue)
    }
}

/// Parse an integer and require it to be at least `min`
fn parse_at_least<T>(value: &str, min: T) -> Result<T, ParseError>
where
    T: core::str::FromStr + PartialOrd,
{
    let v = parse_int(value)?;
    if v < min {
        return Err(ParseError::OutOfRange);
    }
    Ok(v)
}

fn apply_value(
    config: &mut DeviceConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Beacon, "prefix") => {
            let s = parse_string(value)?;
            if s.is_empty() {
                return Err(ParseError::OutOfRange);
            }
            config.beacon.prefix =
                String::<MAX_PREFIX_LEN>::try_from(s).map_err(|_| ParseError::OutOfRange)?;
        }
        (Section::Beacon, "rounds") => {
            let rounds: u8 = parse_at_least(value, 1)?;
            if usize::from(rounds) > MAX_ROUNDS {
                return Err(ParseError::OutOfRange);
            }
            config.beacon.rounds = rounds;
        }
        (Section::Beacon, "round_pause_ms") => config.beacon.round_pause_ms = parse_int(value)?,
        (Section::Beacon, "reference_freq_mhz") => {
            let f = parse_float(value)?;
            if f <= 0.0 {
                return Err(ParseError::OutOfRange);
            }
            config.beacon.reference_freq_mhz = f;
        }

        (Section::Menu, "visible_rows") => {
            let rows: u8 = parse_at_least(value, 1)?;
            if rows > crate::app::CONTENT_ROWS as u8 {
                return Err(ParseError::OutOfRange);
            }
            config.menu.visible_rows = rows;
        }
        (Section::Menu, "move_debounce_ms") => config.menu.move_debounce_ms = parse_int(value)?,
        (Section::Menu, "select_debounce_ms") => {
            config.menu.select_debounce_ms = parse_int(value)?
        }

        (Section::Update, "connect_timeout_rounds") => {
            config.update.connect_timeout_rounds = parse_at_least(value, 1)?
        }
        (Section::Update, "connect_poll_ms") => config.update.connect_poll_ms = parse_int(value)?,
        (Section::Update, "spinner_cycles") => config.update.spinner_cycles = parse_int(value)?,
        (Section::Update, "spinner_frame_ms") => {
            config.update.spinner_frame_ms = parse_int(value)?
        }
        (Section::Update, "result_hold_ms") => config.update.result_hold_ms = parse_int(value)?,
        (Section::Update, "badge_expiry_s") => {
            config.update.badge_expiry_s = parse_at_least(value, 1)?
        }

        (Section::Weather, "latitude") => {
            let lat = parse_float(value)?;
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ParseError::OutOfRange);
            }
            config.weather.latitude = lat;
        }
        (Section::Weather, "longitude") => {
            let lon = parse_float(value)?;
            if !(-180.0..=180.0).contains(&lon) {
                return Err(ParseError::OutOfRange);
            }
            config.weather.longitude = lon;
        }

        (Section::Ui, "frame_ms") => config.frame_ms = parse_at_least(value, 1)?,

        (Section::Unknown, _) => {}
        _ => {
            warn!("config: ignoring unknown key '{}'", key);
        }
    }

    Ok(())
}
