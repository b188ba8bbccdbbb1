//! Checks against the published de440s kernel
//!
//! These tests need `de440s.bsp` in the cache directory and are ignored by
//! default. Run with `cargo test -- --ignored`.

use approx::assert_abs_diff_eq;
use hdgraph::jplephem::names::targets;
use hdgraph::planetlib::{self, Body};
use hdgraph::{ChartBuilder, EphemerisFile, GregorianDateTime, Loader};

fn load() -> EphemerisFile {
    Loader::new()
        .load_ephemeris()
        .expect("de440s.bsp should be in the cache directory")
}

#[test]
#[ignore]
fn test_kernel_layout() {
    let eph = load();
    assert_eq!(eph.header().locidw, "DAF/SPK");
    assert_eq!((eph.header().nd, eph.header().ni), (2, 6));
    assert_eq!(eph.segments().len(), 14);
    assert!(eph.segments().iter().all(|s| s.data_type == 2));

    let (start, end) = eph.covered_span().unwrap();
    // 1849-12-26 .. 2150-01-22
    assert!(start < -4_733_000_000.0 && end > 4_733_000_000.0);
}

#[test]
#[ignore]
fn test_sun_at_j2000() {
    let eph = load();
    let (lon, speed) = planetlib::geocentric_longitude(&eph, targets::SUN, 0.0).unwrap();
    // Geometric Sun, no aberration: about 280.37°
    assert_abs_diff_eq!(lon, 280.37, epsilon = 0.05);
    assert_abs_diff_eq!(speed, 1.019, epsilon = 0.005);
}

#[test]
#[ignore]
fn test_moon_distance_at_j2000() {
    let eph = load();
    let moon = eph.state_from_ssb(targets::MOON, 0.0).unwrap();
    let earth = eph.state_from_ssb(targets::EARTH, 0.0).unwrap();
    let distance = (moon - earth).position.norm();
    assert!((356_000.0..407_000.0).contains(&distance), "{}", distance);
}

#[test]
#[ignore]
fn test_chart_for_known_birth() {
    let eph = load();
    let ts = Loader::new().timescale();
    let local = GregorianDateTime::new(1985, 4, 12, 9, 15, 0).unwrap();
    let birth = ts.local(local, 3 * 3600, "Moscow").unwrap();

    let chart = ChartBuilder::new(&eph, &ts).assemble(&birth).unwrap();
    let sun = chart.personality.planet(Body::Sun).unwrap();
    let earth = chart.personality.planet(Body::Earth).unwrap();

    // Sun in early Aries on April 12
    assert!((21.0..23.5).contains(&sun.longitude), "{}", sun.longitude);
    assert_abs_diff_eq!((earth.longitude - sun.longitude).rem_euclid(360.0), 180.0, epsilon = 1e-9);

    // The Design Sun trails the Personality Sun by about 88°
    let design_sun = chart.design.planet(Body::Sun).unwrap();
    let arc = (sun.longitude - design_sun.longitude).rem_euclid(360.0);
    assert_abs_diff_eq!(arc, 88.0, epsilon = 2.5);
}
