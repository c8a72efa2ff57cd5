//! Whole-shell scenarios: menu, apps and the update badge together

use tinypip_core::config::DeviceConfig;
use tinypip_core::menu::AppId;
use tinypip_core::shell::Shell;
use tinypip_core::status::UpdatePhase;
use tinypip_core::testing::FakeBoard;
use tinypip_core::traits::ScanResult;
use tinypip_display::{Button, Glyph};

const EPOCH: u64 = 1_700_000_000;

/// Step until the shared clock reaches `ms`
fn run_until(shell: &mut Shell<'_>, fakes: &FakeBoard, ms: u64) {
    while fakes.clock.now_ms() < ms {
        shell.step();
    }
}

#[test]
fn test_boot_then_menu() {
    let mut fakes = FakeBoard::new(EPOCH);
    let inspect = fakes.clone();
    let mut shell = Shell::new(DeviceConfig::default(), fakes.board());

    shell.boot();
    assert!(inspect.display.shows("[ OK ] STARTING TINYPIP OS"));

    shell.step();
    assert!(inspect.display.shows("TINYPIP OS"));
    assert!(inspect.display.shows("> CLOCK"));
    assert!(inspect.display.shows("A: SELECT"));
}

#[test]
fn test_cursor_survives_app_round_trip() {
    let mut fakes = FakeBoard::new(EPOCH);
    // Down to STOPWATCH, launch it, then back out
    fakes.buttons.tap(Button::Down, 0);
    fakes.buttons.tap(Button::Confirm, 500);
    fakes.buttons.tap(Button::Back, 1_000);
    let inspect = fakes.clone();
    let mut shell = Shell::new(DeviceConfig::default(), fakes.board());

    run_until(&mut shell, &inspect, 500);
    shell.step();
    assert_eq!(shell.active_app(), Some(AppId::Stopwatch));

    run_until(&mut shell, &inspect, 1_100);
    assert_eq!(shell.active_app(), None);
    assert_eq!(shell.menu().cursor().selected(), 1);
    assert!(inspect.display.shows("> STOPWATCH"));
}

#[test]
fn test_update_badge_visible_inside_apps() {
    let mut fakes = FakeBoard::new(EPOCH);
    fakes
        .radio
        .set_networks(&[ScanResult::new("OPEN_NET", -50, 1, true)]);
    fakes.radio.accept("OPEN_NET", "", 0);
    fakes.buttons.tap(Button::Secondary, 0);
    let inspect = fakes.clone();
    let mut shell = Shell::new(DeviceConfig::default(), fakes.board());

    shell.step();
    assert!(inspect.display.ever_showed("UPDATED"));
    let now_s = EPOCH + inspect.clock.now_ms() / 1000;
    assert_eq!(shell.context().status.phase(now_s), UpdatePhase::Success);

    // Launch CLOCK; its status bar carries the check mark
    let launch_at = inspect.clock.now_ms() + 200;
    inspect.buttons.tap(Button::Confirm, launch_at);
    run_until(&mut shell, &inspect, launch_at + 1);
    shell.step();
    assert_eq!(shell.active_app(), Some(AppId::Clock));
    assert!(inspect
        .display
        .glyphs()
        .iter()
        .any(|&(row, _, glyph)| row == 0 && glyph == Glyph::Check));
}

#[test]
fn test_badge_expires_after_five_minutes() {
    let mut fakes = FakeBoard::new(EPOCH);
    fakes.buttons.tap(Button::Secondary, 0);
    let inspect = fakes.clone();
    let mut shell = Shell::new(DeviceConfig::default(), fakes.board());

    shell.step();
    assert!(inspect.display.ever_showed("NO WIFI"));
    let since = shell.context().status.since();
    assert_eq!(
        shell.context().status.phase(since + 299),
        UpdatePhase::Fail
    );

    inspect.clock.advance(300_000);
    shell.step();
    assert_eq!(
        shell.context().status.phase(EPOCH + inspect.clock.now_ms() / 1000),
        UpdatePhase::Idle
    );
    assert!(inspect.display.glyphs().is_empty());
}

#[test]
fn test_added_network_feeds_update_now() {
    let mut fakes = FakeBoard::new(EPOCH);
    fakes.radio.set_networks(&[
        ScanResult::new("HOME", -50, 6, false),
        ScanResult::new("CAFE", -40, 1, true),
    ]);
    fakes.radio.accept("HOME", "a", 0);
    // Up wraps to SET TIME; two more reach ADD WIFI
    fakes.buttons.tap(Button::Up, 0);
    fakes.buttons.tap(Button::Up, 300);
    fakes.buttons.tap(Button::Up, 600);
    fakes.buttons.tap(Button::Confirm, 900);
    // Pick HOME, type "a", join
    fakes.buttons.tap(Button::Confirm, 1_300);
    fakes.buttons.tap(Button::Confirm, 1_700);
    fakes.buttons.tap(Button::Secondary, 2_100);
    fakes.buttons.tap(Button::Back, 3_000);
    let inspect = fakes.clone();
    let mut shell = Shell::new(DeviceConfig::default(), fakes.board());

    run_until(&mut shell, &inspect, 1_000);
    assert_eq!(shell.active_app(), Some(AppId::AddWifi));

    run_until(&mut shell, &inspect, 3_100);
    assert!(inspect.display.ever_showed("WIFI CONNECTED!"));
    assert_eq!(shell.active_app(), None);
    assert_eq!(inspect.radio.attempts(), ["HOME"]);

    // Y in the menu runs the update against the saved network
    let update_at = inspect.clock.now_ms() + 200;
    inspect.buttons.tap(Button::Secondary, update_at);
    run_until(&mut shell, &inspect, update_at + 1);
    assert!(inspect.display.ever_showed("UPDATED"));
    assert_eq!(inspect.radio.attempts(), ["HOME", "HOME"]);
    assert_eq!(inspect.radio.scan_count(), 1);
}
