//! Beacon sampling through distance and battery, as the tracker sees it

use tinypip_core::signal::{
    estimate_distance_m, sample, BeaconIdentity, DistanceEstimate, REFERENCE_FREQ_MHZ,
};
use tinypip_core::testing::{FakeClock, ScriptedRadio};
use tinypip_core::traits::ScanResult;

#[test]
fn test_eight_rounds_at_minus_55() {
    let mut radio = ScriptedRadio::new();
    radio.set_networks(&[ScanResult::new("BEACON|60", -55, 1, true)]);
    let mut clock = FakeClock::new(0);

    let found = sample(&mut radio, &mut clock, "BEACON", 8, 30);
    assert!(found.matched());
    assert_eq!(found.readings().len(), 8);
    assert!(found.readings().iter().all(|&r| r == -55));
    assert_eq!(radio.scan_count(), 8);
    assert_eq!(clock.now_ms(), 240);

    let estimate = DistanceEstimate::from_sample(&found, REFERENCE_FREQ_MHZ).unwrap();
    assert!(estimate.meters.is_finite());
    assert!(estimate.meters > 0.0);
    assert!((estimate.meters - 5.56).abs() < 0.01);

    let identity = found.identity("BEACON").unwrap();
    assert!(identity.matches);
    assert_eq!(identity.battery_percent, Some(60));
}

#[test]
fn test_identity_examples() {
    assert_eq!(
        BeaconIdentity::parse("BEACON|87", "BEACON"),
        BeaconIdentity {
            matches: true,
            battery_percent: Some(87)
        }
    );
    assert_eq!(
        BeaconIdentity::parse("BEACON|abc", "BEACON"),
        BeaconIdentity {
            matches: true,
            battery_percent: None
        }
    );
    assert_eq!(
        BeaconIdentity::parse("OTHER|50", "BEACON"),
        BeaconIdentity {
            matches: false,
            battery_percent: None
        }
    );
}

#[test]
fn test_absent_beacon_gives_no_estimate() {
    let mut radio = ScriptedRadio::new();
    radio.set_networks(&[ScanResult::new("HOME", -30, 6, false)]);
    let mut clock = FakeClock::new(0);

    let found = sample(&mut radio, &mut clock, "BEACON", 8, 30);
    assert!(!found.matched());
    assert!(DistanceEstimate::from_sample(&found, REFERENCE_FREQ_MHZ).is_none());
}

#[test]
fn test_weaker_signal_reads_farther() {
    assert!(
        estimate_distance_m(-80.0, REFERENCE_FREQ_MHZ)
            > estimate_distance_m(-40.0, REFERENCE_FREQ_MHZ)
    );
}
