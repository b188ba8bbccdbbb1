//! # Angle Helpers
//!
//! Small helpers for ecliptic longitudes expressed in degrees: wrapping into
//! the `[0, 360)` circle and splitting a value into degrees, arcminutes and
//! arcseconds.
//!
//! ## Examples
//!
//! ```rust
//! use hdgraph::coordinates::angle::{normalize_degrees, Dms};
//!
//! assert_eq!(normalize_degrees(-90.0), 270.0);
//! assert_eq!(normalize_degrees(720.0), 0.0);
//!
//! let dms = Dms::from_degrees(12.5);
//! assert_eq!((dms.degrees, dms.minutes, dms.seconds), (12, 30, 0));
//! ```

use serde::Serialize;

/// Wrap an angle in degrees into `[0, 360)`
///
/// `rem_euclid` can round up to exactly 360.0 for tiny negative inputs, which
/// is folded back to 0.0.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle in radians into `[0, 2π)`
pub fn normalize_radians(radians: f64) -> f64 {
    let tau = std::f64::consts::TAU;
    let wrapped = radians.rem_euclid(tau);
    if wrapped >= tau {
        0.0
    } else {
        wrapped
    }
}

/// A non-negative angle split into whole degrees, arcminutes and arcseconds
///
/// Seconds are truncated, not rounded, so the triple never rolls over into
/// the next degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Dms {
    /// Split a non-negative angle in degrees
    pub fn from_degrees(value: f64) -> Self {
        let value = value.abs();
        let degrees = value.floor();
        let minutes_f = (value - degrees) * 60.0;
        let minutes = minutes_f.floor();
        let seconds = ((minutes_f - minutes) * 60.0).floor();

        Self {
            degrees: degrees as u32,
            minutes: (minutes as u32).min(59),
            seconds: (seconds as u32).min(59),
        }
    }
}

impl std::fmt::Display for Dms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°{:02}'{:02}\"", self.degrees, self.minutes, self.seconds)
    }
}
