//! Background update
//!
//! The "update now" payload: get online with whatever network is
//! available, sync the clock, refresh the weather cache and power the
//! radio back down. Every step is synchronous and bounded by a fixed
//! number of polls; nothing here can be cancelled from the buttons.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::config::DeviceConfig;
use crate::log::{info, warn};
use crate::persist;
use crate::traits::{Board, Clock, Radio, ScanList, ScanResult, StorageKey, MAX_SSID_LEN};
use crate::weather::WeatherReport;

/// Longest stored password
pub const MAX_SECRET_LEN: usize = 64;

/// Settle time after toggling the radio power
const RADIO_SETTLE_MS: u32 = 200;

/// Saved network credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WifiCredentials {
    pub ssid: String<MAX_SSID_LEN>,
    pub password: String<MAX_SECRET_LEN>,
}

/// Request a connection and poll until it is up or `timeout_rounds` polls
/// have passed
pub fn attempt_connect(
    radio: &mut dyn Radio,
    clock: &mut dyn Clock,
    ssid: &str,
    secret: &str,
    timeout_rounds: u16,
    poll_ms: u16,
) -> bool {
    if let Err(e) = radio.begin_connect(ssid, secret) {
        warn!("update: connect request rejected: {:?}", e);
        return false;
    }

    for _ in 0..timeout_rounds {
        if radio.is_connected() {
            return true;
        }
        clock.sleep_ms(u32::from(poll_ms));
    }

    false
}

/// Strongest named network that needs no credentials
pub fn strongest_open(networks: &[ScanResult]) -> Option<&ScanResult> {
    networks
        .iter()
        .filter(|n| n.open && !n.ssid.is_empty())
        .max_by_key(|n| n.rssi)
}

/// Power-cycle the radio so every connect starts from a clean state
fn reset_radio(board: &mut Board<'_>) {
    board.radio.set_enabled(false);
    board.clock.sleep_ms(RADIO_SETTLE_MS);
    board.radio.set_enabled(true);
    board.clock.sleep_ms(RADIO_SETTLE_MS);
}

/// Sync the clock and refresh the weather cache over the open connection
fn refresh_online(board: &mut Board<'_>, config: &DeviceConfig) {
    match board.net.sync_time() {
        Some(epoch_s) => board.clock.set_epoch_s(epoch_s),
        None => warn!("update: time sync failed"),
    }

    match board
        .net
        .fetch_forecast(config.weather.latitude, config.weather.longitude)
    {
        Some(forecast) => {
            let report = WeatherReport::from_forecast(&forecast);
            persist::save(&mut *board.storage, StorageKey::Weather, &report);
        }
        None => warn!("update: weather fetch failed"),
    }
}

/// Run the whole update; true when a network was reached
///
/// Time sync and weather refresh are best-effort once connected and do
/// not affect the result. The radio is always left powered down.
pub fn run_background_update(board: &mut Board<'_>, config: &DeviceConfig) -> bool {
    let timeout = config.update.connect_timeout_rounds;
    let poll = config.update.connect_poll_ms;

    reset_radio(board);

    let saved: Option<WifiCredentials> =
        persist::load(&mut *board.storage, StorageKey::WifiCredentials);

    let mut connected = false;
    if let Some(creds) = saved.as_ref().filter(|c| !c.ssid.is_empty()) {
        info!("update: trying saved network {}", creds.ssid.as_str());
        connected = attempt_connect(
            &mut *board.radio,
            &mut *board.clock,
            &creds.ssid,
            &creds.password,
            timeout,
            poll,
        );
    }

    if !connected {
        let mut networks = ScanList::new();
        if let Err(e) = board.radio.scan(&mut networks) {
            warn!("update: scan failed: {:?}", e);
            networks.clear();
        }
        if let Some(open) = strongest_open(&networks) {
            info!("update: trying open network {}", open.ssid.as_str());
            connected = attempt_connect(
                &mut *board.radio,
                &mut *board.clock,
                &open.ssid,
                "",
                timeout,
                poll,
            );
        }
    }

    if !connected {
        warn!("update: no network reachable");
        board.radio.set_enabled(false);
        return false;
    }

    refresh_online(board, config);

    board.radio.disconnect();
    board.radio.set_enabled(false);
    info!("update: complete");
    true
}

/// Join a network chosen by the user and remember it
///
/// On success the credentials become the saved network tried first by
/// [`run_background_update`], and the clock and weather are refreshed
/// while the link is up. The radio is always left powered down.
pub fn join_network(
    board: &mut Board<'_>,
    config: &DeviceConfig,
    creds: &WifiCredentials,
) -> bool {
    reset_radio(board);

    info!("update: joining {}", creds.ssid.as_str());
    let connected = attempt_connect(
        &mut *board.radio,
        &mut *board.clock,
        &creds.ssid,
        &creds.password,
        config.update.connect_timeout_rounds,
        config.update.connect_poll_ms,
    );

    if !connected {
        warn!("update: could not join {}", creds.ssid.as_str());
        board.radio.set_enabled(false);
        return false;
    }

    if !persist::save(&mut *board.storage, StorageKey::WifiCredentials, creds) {
        warn!("update: joined but credentials were not saved");
    }
    refresh_online(board, config);

    board.radio.disconnect();
    board.radio.set_enabled(false);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBoard;
    use crate::traits::{DailyForecast, Forecast};

    fn config() -> DeviceConfig {
        DeviceConfig::default()
    }

    fn creds(ssid: &str, password: &str) -> WifiCredentials {
        WifiCredentials {
            ssid: String::try_from(ssid).unwrap(),
            password: String::try_from(password).unwrap(),
        }
    }

    fn save_creds(fakes: &mut FakeBoard, ssid: &str, password: &str) {
        let creds = creds(ssid, password);
        assert!(persist::save(
            &mut fakes.storage,
            StorageKey::WifiCredentials,
            &creds
        ));
    }

    #[test]
    fn test_strongest_open_skips_secured_and_hidden() {
        let nets = [
            ScanResult::new("SECURE", -30, 1, false),
            ScanResult::new("", -35, 1, true),
            ScanResult::new("CAFE", -70, 6, true),
            ScanResult::new("LIBRARY", -50, 11, true),
        ];
        assert_eq!(strongest_open(&nets).unwrap().ssid.as_str(), "LIBRARY");
        assert!(strongest_open(&nets[..2]).is_none());
    }

    #[test]
    fn test_attempt_connect_times_out() {
        let mut fakes = FakeBoard::new(0);
        fakes.radio.set_networks(&[]);
        let mut radio = fakes.radio.clone();
        radio.set_enabled(true);
        let ok = attempt_connect(&mut radio, &mut fakes.clock, "NOPE", "", 150, 100);
        assert!(!ok);
        assert_eq!(fakes.clock.now_ms(), 15_000);
    }

    #[test]
    fn test_saved_network_used_first() {
        let mut fakes = FakeBoard::new(1_000);
        save_creds(&mut fakes, "HOME", "hunter22");
        fakes.radio.accept("HOME", "hunter22", 3);
        fakes.radio.set_networks(&[ScanResult::new("CAFE", -40, 1, true)]);
        fakes.net.set_time(Some(1_700_000_000));

        let inspect = fakes.clone();
        let ok = run_background_update(&mut fakes.board(), &config());
        assert!(ok);
        assert_eq!(inspect.radio.attempts(), ["HOME"]);
        assert_eq!(inspect.radio.scan_count(), 0);
        assert!(!inspect.radio.enabled());
        assert!(inspect.clock.now_epoch_s() >= 1_700_000_000);
    }

    #[test]
    fn test_falls_back_to_strongest_open_network() {
        let mut fakes = FakeBoard::new(0);
        save_creds(&mut fakes, "HOME", "wrong");
        fakes.radio.accept("HOME", "right", 0);
        fakes.radio.accept("LIBRARY", "", 0);
        fakes.radio.set_networks(&[
            ScanResult::new("CAFE", -80, 1, true),
            ScanResult::new("LIBRARY", -45, 6, true),
        ]);

        let inspect = fakes.clone();
        assert!(run_background_update(&mut fakes.board(), &config()));
        assert_eq!(inspect.radio.attempts(), ["HOME", "LIBRARY"]);
    }

    #[test]
    fn test_no_network_fails_and_powers_down() {
        let mut fakes = FakeBoard::new(0);
        fakes.radio.set_networks(&[ScanResult::new("SECURE", -40, 1, false)]);

        let inspect = fakes.clone();
        assert!(!run_background_update(&mut fakes.board(), &config()));
        assert!(inspect.radio.attempts().is_empty());
        assert!(!inspect.radio.enabled());
        assert_eq!(inspect.net.time_calls(), 0);
    }

    #[test]
    fn test_weather_cached_on_success() {
        let mut fakes = FakeBoard::new(0);
        fakes.radio.accept("OPEN", "", 1);
        fakes.radio.set_networks(&[ScanResult::new("OPEN", -50, 1, true)]);
        let mut daily = heapless::Vec::new();
        let _ = daily.push(DailyForecast {
            max_temp_f: 71,
            code: 0,
        });
        fakes.net.set_forecast(Some(Forecast {
            current_temp_f: 68,
            current_code: 3,
            daily,
        }));

        let inspect = fakes.clone();
        assert!(run_background_update(&mut fakes.board(), &config()));
        assert_eq!(inspect.net.last_location(), Some((43.0, -83.7)));

        let mut storage = inspect.storage.clone();
        let report: WeatherReport = persist::load(&mut storage, StorageKey::Weather).unwrap();
        assert_eq!(report.today.temperature.as_str(), "68F");
        assert_eq!(report.week.len(), 1);
    }

    #[test]
    fn test_weather_failure_still_succeeds() {
        let mut fakes = FakeBoard::new(0);
        fakes.radio.accept("OPEN", "", 0);
        fakes.radio.set_networks(&[ScanResult::new("OPEN", -50, 1, true)]);

        let inspect = fakes.clone();
        assert!(run_background_update(&mut fakes.board(), &config()));
        assert_eq!(inspect.net.forecast_calls(), 1);
        assert_eq!(inspect.storage.raw(StorageKey::Weather), None);
    }

    #[test]
    fn test_joined_network_becomes_saved_network() {
        let mut fakes = FakeBoard::new(0);
        fakes.radio.accept("HOME", "hunter22", 2);
        fakes.net.set_time(Some(1_700_000_000));

        let inspect = fakes.clone();
        assert!(join_network(
            &mut fakes.board(),
            &config(),
            &creds("HOME", "hunter22")
        ));
        assert!(!inspect.radio.enabled());
        assert!(inspect.clock.now_epoch_s() >= 1_700_000_000);

        let mut storage = inspect.storage.clone();
        let saved: WifiCredentials =
            persist::load(&mut storage, StorageKey::WifiCredentials).unwrap();
        assert_eq!(saved, creds("HOME", "hunter22"));

        // The next update goes straight to the joined network
        fakes.radio.set_networks(&[ScanResult::new("CAFE", -40, 1, true)]);
        assert!(run_background_update(&mut fakes.board(), &config()));
        assert_eq!(inspect.radio.attempts(), ["HOME", "HOME"]);
        assert_eq!(inspect.radio.scan_count(), 0);
    }

    #[test]
    fn test_failed_join_saves_nothing() {
        let mut fakes = FakeBoard::new(0);
        save_creds(&mut fakes, "OLD", "secret");
        fakes.radio.accept("HOME", "right", 0);

        let inspect = fakes.clone();
        assert!(!join_network(
            &mut fakes.board(),
            &config(),
            &creds("HOME", "wrong")
        ));
        assert!(!inspect.radio.enabled());
        assert_eq!(inspect.net.time_calls(), 0);

        let mut storage = inspect.storage.clone();
        let saved: WifiCredentials =
            persist::load(&mut storage, StorageKey::WifiCredentials).unwrap();
        assert_eq!(saved.ssid.as_str(), "OLD");
    }
}
