//! # Cartesian and Polar State Vectors
//!
//! Positions decoded from the kernel are Cartesian states in the ICRF/J2000
//! equatorial frame: kilometers for position and km/s for velocity.
//!
//! ## Coordinate System Convention
//!
//! - **X-axis**: Points toward the vernal equinox
//! - **Y-axis**: Completes the right-handed system in the reference plane
//! - **Z-axis**: Points toward the pole of the reference plane
//!
//! Chart longitudes are measured in the ecliptic, so states are rotated about
//! the X-axis by the obliquity before being converted to polar form.
//!
//! ## Examples
//!
//! ```rust
//! use hdgraph::coordinates::cartesian::Position;
//! use nalgebra::Vector3;
//!
//! let state = Position::new(Vector3::new(0.0, 1.0, 0.0), Vector3::zeros());
//! let polar = state.to_polar();
//! assert!((polar.longitude - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
//! ```

use nalgebra::{Rotation3, Vector3};
use serde::Serialize;
use std::ops::{Add, Sub};

use crate::constants::{DAY_S, RAD2DEG};
use crate::coordinates::angle::normalize_radians;

/// Cartesian state: position in km and velocity in km/s
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    /// Position vector (km)
    pub position: Vector3<f64>,
    /// Velocity vector (km/s)
    pub velocity: Vector3<f64>,
}

impl Position {
    /// Create a state from position and velocity
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self { position, velocity }
    }

    /// The zero state at the origin
    pub fn zero() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros())
    }

    /// Rotate an equatorial state into the ecliptic frame of obliquity `eps`
    ///
    /// The rotation is about +X by -eps, so the equatorial pole tilts onto
    /// the ecliptic pole.
    pub fn to_ecliptic(&self, eps: f64) -> Self {
        let rot = Rotation3::from_axis_angle(&Vector3::x_axis(), -eps);
        Self::new(rot * self.position, rot * self.velocity)
    }

    /// Convert to longitude/latitude/radius, keeping the Cartesian velocity
    pub fn to_polar(&self) -> PolarPosition {
        let p = &self.position;
        let rho = (p.x * p.x + p.y * p.y).sqrt();

        PolarPosition {
            longitude: normalize_radians(p.y.atan2(p.x)),
            latitude: p.z.atan2(rho),
            radius: p.norm(),
            velocity: self.velocity,
        }
    }

    /// Rate of change of longitude in degrees per day
    ///
    /// dλ/dt = (x·vy − y·vx) / (x² + y²)
    pub fn longitude_rate(&self) -> f64 {
        let p = &self.position;
        let v = &self.velocity;
        let rho2 = p.x * p.x + p.y * p.y;
        if rho2 == 0.0 {
            return 0.0;
        }
        (p.x * v.y - p.y * v.x) / rho2 * RAD2DEG * DAY_S
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.position + other.position, self.velocity + other.velocity)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, other: Position) -> Position {
        Position::new(self.position - other.position, self.velocity - other.velocity)
    }
}

/// Polar form of a state: longitude and latitude in radians, radius in km
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarPosition {
    /// Longitude in `[0, 2π)`
    pub longitude: f64,
    /// Latitude in `[-π/2, π/2]`
    pub latitude: f64,
    /// Distance from the origin (km)
    pub radius: f64,
    /// Cartesian velocity carried over from the source state (km/s)
    pub velocity: Vector3<f64>,
}

impl PolarPosition {
    /// Longitude in degrees
    pub fn longitude_degrees(&self) -> f64 {
        self.longitude * RAD2DEG
    }

    /// Latitude in degrees
    pub fn latitude_degrees(&self) -> f64 {
        self.latitude * RAD2DEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MED_EPS;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_polar_axes() {
        let x = Position::new(Vector3::new(2.0, 0.0, 0.0), Vector3::zeros()).to_polar();
        assert_relative_eq!(x.longitude, 0.0);
        assert_relative_eq!(x.latitude, 0.0);
        assert_relative_eq!(x.radius, 2.0);

        let neg_y = Position::new(Vector3::new(0.0, -1.0, 0.0), Vector3::zeros()).to_polar();
        assert_relative_eq!(neg_y.longitude, 1.5 * PI, epsilon = 1e-12);

        let pole = Position::new(Vector3::new(0.0, 0.0, 3.0), Vector3::zeros()).to_polar();
        assert_relative_eq!(pole.latitude, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_ecliptic_rotation() {
        // The equatorial direction of the ecliptic pole maps onto +Z
        let pole = Vector3::new(0.0, -MED_EPS.sin(), MED_EPS.cos());
        let ecl = Position::new(pole, Vector3::zeros()).to_ecliptic(MED_EPS);
        assert_relative_eq!(ecl.position.z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(ecl.position.y, 0.0, epsilon = 1e-12);

        // The equinox direction is unchanged
        let x = Position::new(Vector3::new(1.0, 0.0, 0.0), Vector3::zeros()).to_ecliptic(MED_EPS);
        assert_relative_eq!(x.position, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_longitude_rate() {
        // Circular motion of 1 rad/s at radius 1 km
        let state = Position::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(state.longitude_rate(), RAD2DEG * DAY_S, epsilon = 1e-6);

        let reversed = Position::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        assert!(reversed.longitude_rate() < 0.0);

        assert_eq!(Position::zero().longitude_rate(), 0.0);
    }

    #[test]
    fn test_state_arithmetic() {
        let a = Position::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.1, 0.2, 0.3));
        let b = Position::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(0.1, 0.1, 0.1));
        let d = a - b;
        assert_relative_eq!(d.position, Vector3::new(0.0, 1.0, 2.0));
        assert_relative_eq!((d + b).velocity, a.velocity, epsilon = 1e-15);
    }
}
