//! Build script for tinypip-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Longest beacon prefix the firmware stores
const MAX_PREFIX_LEN: usize = 16;

/// Scans the tracker may average per estimate
const MAX_ROUNDS: i64 = 16;

/// Content rows available to the menu
const MAX_VISIBLE_ROWS: i64 = 10;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml at compile time
///
/// Checks syntax and the value ranges the on-device parser enforces.
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a device.toml configuration file.           ║\n\
            ║  Please create one in the tinypip-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e.to_string()
                    .lines()
                    .map(|line| format!("║  {:<64} ║", line))
                    .collect::<Vec<_>>()
                    .join("\n")
            );
        }
    };

    let mut errors = Vec::new();

    validate_beacon(&config, &mut errors);
    validate_menu(&config, &mut errors);
    validate_weather(&config, &mut errors);
    validate_positive(&config, "update", "connect_timeout_rounds", &mut errors);
    validate_positive(&config, "update", "badge_expiry_s", &mut errors);
    validate_positive(&config, "ui", "frame_ms", &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid device configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=device.toml validated successfully");
}

fn validate_beacon(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(beacon) = config.get("beacon") else {
        return;
    };

    if let Some(prefix) = beacon.get("prefix") {
        match prefix.as_str() {
            Some("") => errors.push("beacon.prefix must not be empty".into()),
            Some(p) if p.len() > MAX_PREFIX_LEN => errors.push(format!(
                "beacon.prefix is longer than {} characters",
                MAX_PREFIX_LEN
            )),
            Some(_) => {}
            None => errors.push("beacon.prefix must be a string".into()),
        }
    }

    if let Some(rounds) = beacon.get("rounds") {
        match rounds.as_integer() {
            Some(r) if (1..=MAX_ROUNDS).contains(&r) => {}
            _ => errors.push(format!("beacon.rounds must be 1-{}", MAX_ROUNDS)),
        }
    }

    if let Some(freq) = beacon.get("reference_freq_mhz") {
        match freq.as_float() {
            Some(f) if f > 0.0 => {}
            _ => errors.push("beacon.reference_freq_mhz must be a positive float".into()),
        }
    }
}

fn validate_menu(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(rows) = config.get("menu").and_then(|m| m.get("visible_rows")) else {
        return;
    };

    match rows.as_integer() {
        Some(r) if (1..=MAX_VISIBLE_ROWS).contains(&r) => {}
        _ => errors.push(format!("menu.visible_rows must be 1-{}", MAX_VISIBLE_ROWS)),
    }
}

fn validate_weather(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(weather) = config.get("weather") else {
        return;
    };

    for (key, limit) in [("latitude", 90.0), ("longitude", 180.0)] {
        if let Some(value) = weather.get(key) {
            match value.as_float() {
                Some(v) if (-limit..=limit).contains(&v) => {}
                _ => errors.push(format!("weather.{} must be within +/-{}", key, limit)),
            }
        }
    }
}

fn validate_positive(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    let Some(value) = config.get(section).and_then(|s| s.get(key)) else {
        return;
    };

    match value.as_integer() {
        Some(v) if v >= 1 => {}
        _ => errors.push(format!("{}.{} must be a positive integer", section, key)),
    }
}
