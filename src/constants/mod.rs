//! Constants module for ephemeris and chart calculations

use std::f64::consts::PI;

// Astronomical distances
/// Astronomical Unit in kilometers
pub const AU_KM: f64 = 149_597_870.700;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// Whole seconds in a day
pub const DAY_S_I64: i64 = 86_400;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Julian day number of the civil day containing J2000.0 (2000-01-01)
pub const J2000_JDN: i64 = 2_451_545;
/// Days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

// Angles
/// Arcseconds to degrees conversion factor
pub const ASEC2DEG: f64 = 1.0 / 3600.0;
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

// Ecliptic
/// Mean obliquity of the ecliptic at J2000.0 (23°26'21.448") in radians
pub const MED_EPS: f64 = 0.4090928042223289;
/// General precession in longitude, linear term (arcseconds per Julian century)
pub const PRECESSION_RATE_ASEC: f64 = 5_029.0966;
/// General precession in longitude, quadratic term (arcseconds per century squared)
pub const PRECESSION_QUADRATIC_ASEC: f64 = 1.11113;

// Design snapshot
/// Solar arc between the Design and Personality snapshots (88 degrees) in radians
pub const DESIGN_SOLAR_ARC: f64 = 1.535_889_741_755_009_918_48;
/// Mean angular rate of the Sun along the ecliptic (radians per second),
/// one tropical year of 365.242189 days per revolution
pub const SUN_MEAN_RATE: f64 = TAU / (365.242_189 * DAY_S);

// Lunar node (Meeus, mean ascending node)
/// Mean node longitude at J2000.0 in degrees
pub const NODE_L0: f64 = 125.044_52;
/// Mean node motion in degrees per Julian century
pub const NODE_L1: f64 = -1_934.136_261;
/// Quadratic term in degrees per century squared
pub const NODE_L2: f64 = 0.002_070_8;
/// Cubic term divisor
pub const NODE_L3_DIV: f64 = 450_000.0;

// Lunar arguments of Meeus ch. 47 in degrees, as polynomials in Julian
// centuries: constant, T, T^2, T^3, T^4
/// Mean elongation of the Moon (D)
pub const MOON_ELONGATION: [f64; 5] =
    [297.850_192_1, 445_267.111_403_4, -0.001_881_9, 1.0 / 545_868.0, -1.0 / 113_065_000.0];
/// Mean anomaly of the Sun (M)
pub const SUN_ANOMALY: [f64; 5] =
    [357.529_109_2, 35_999.050_290_9, -0.000_153_6, 1.0 / 24_490_000.0, 0.0];
/// Mean anomaly of the Moon (M')
pub const MOON_ANOMALY: [f64; 5] =
    [134.963_396_4, 477_198.867_505_5, 0.008_741_4, 1.0 / 69_699.0, -1.0 / 14_712_000.0];
/// Argument of latitude of the Moon (F)
pub const MOON_LATITUDE: [f64; 5] =
    [93.272_095_0, 483_202.017_523_3, -0.003_653_9, -1.0 / 3_526_000.0, 1.0 / 863_310_000.0];

// Motion
/// Longitude speed (degrees/day) under which a body is reported as stationary
pub const STATIONARY_SPEED: f64 = 0.001;
