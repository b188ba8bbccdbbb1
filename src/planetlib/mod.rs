//! Planetary positions for a chart snapshot
//!
//! Positions come from the kernel as barycentric equatorial states. The
//! geocentric state is rotated into the J2000 ecliptic and carried to the
//! equinox of date with the general precession in longitude. The lunar nodes
//! are the true nodes: the mean node plus the periodic terms of Meeus ch. 47.

use log::debug;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::constants::{
    ASEC2DEG, DAYS_PER_CENTURY, DAY_S, DEG2RAD, MED_EPS, MOON_ANOMALY, MOON_ELONGATION,
    MOON_LATITUDE, NODE_L0, NODE_L1, NODE_L2, NODE_L3_DIV, PRECESSION_QUADRATIC_ASEC,
    PRECESSION_RATE_ASEC, STATIONARY_SPEED, SUN_ANOMALY,
};
use crate::coordinates::{normalize_degrees, ZodiacStructure};
use crate::hexagram::{self, HdStructure, HexagramError};
use crate::jplephem::names::targets;
use crate::jplephem::{EphemerisFile, JplephemError};

/// Error type for planetary calculations
#[derive(Debug, Error)]
pub enum PlanetError {
    #[error("Ephemeris error for {body}: {source}")]
    Ephemeris {
        body: Body,
        #[source]
        source: JplephemError,
    },

    #[error("Quantization error for {body}: {source}")]
    Quantization {
        body: Body,
        #[source]
        source: HexagramError,
    },
}

/// Result type for planetary calculations
pub type Result<T> = std::result::Result<T, PlanetError>;

/// The bodies placed in a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Body {
    Sun,
    Earth,
    Moon,
    NorthNode,
    SouthNode,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// Bodies in chart order
    pub const CHART_ORDER: [Body; 13] = [
        Body::Sun,
        Body::Earth,
        Body::Moon,
        Body::NorthNode,
        Body::SouthNode,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Earth => "Earth",
            Body::Moon => "Moon",
            Body::NorthNode => "NorthNode",
            Body::SouthNode => "SouthNode",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    /// Chart numbering: planets 1-9 from Mercury outwards, Sun 10, Moon 11,
    /// North Node 12, South Node 13
    pub fn number(&self) -> u8 {
        match self {
            Body::Mercury => 1,
            Body::Venus => 2,
            Body::Earth => 3,
            Body::Mars => 4,
            Body::Jupiter => 5,
            Body::Saturn => 6,
            Body::Uranus => 7,
            Body::Neptune => 8,
            Body::Pluto => 9,
            Body::Sun => 10,
            Body::Moon => 11,
            Body::NorthNode => 12,
            Body::SouthNode => 13,
        }
    }

    /// Kernel target evaluated for this body, if it is read from the kernel
    pub fn naif_id(&self) -> Option<i32> {
        match self {
            Body::Sun => Some(targets::SUN),
            Body::Moon => Some(targets::MOON),
            Body::Mercury => Some(targets::MERCURY_BARYCENTER),
            Body::Venus => Some(targets::VENUS_BARYCENTER),
            Body::Mars => Some(targets::MARS_BARYCENTER),
            Body::Jupiter => Some(targets::JUPITER_BARYCENTER),
            Body::Saturn => Some(targets::SATURN_BARYCENTER),
            Body::Uranus => Some(targets::URANUS_BARYCENTER),
            Body::Neptune => Some(targets::NEPTUNE_BARYCENTER),
            Body::Pluto => Some(targets::PLUTO_BARYCENTER),
            Body::Earth | Body::NorthNode | Body::SouthNode => None,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apparent direction of motion along the ecliptic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Direct,
    Retrograde,
    Stationary,
}

impl Direction {
    /// Classify a longitude speed in degrees per day
    pub fn from_speed(speed: f64) -> Self {
        if speed.abs() < STATIONARY_SPEED {
            Direction::Stationary
        } else if speed < 0.0 {
            Direction::Retrograde
        } else {
            Direction::Direct
        }
    }

    /// One-letter code: D, R or S
    pub fn code(&self) -> char {
        match self {
            Direction::Direct => 'D',
            Direction::Retrograde => 'R',
            Direction::Stationary => 'S',
        }
    }
}

/// Motion of a body along the ecliptic
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FdStructure {
    /// Longitude speed in degrees per day
    pub speed: f64,
    pub direction: Direction,
}

impl FdStructure {
    pub fn from_speed(speed: f64) -> Self {
        Self {
            speed,
            direction: Direction::from_speed(speed),
        }
    }
}

/// One body of a chart snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Planet {
    pub body: Body,
    /// Ecliptic longitude of date in degrees, `[0, 360)`
    pub longitude: f64,
    pub hd: HdStructure,
    pub fd: FdStructure,
    pub zodiac: ZodiacStructure,
}

impl Planet {
    /// Place a body at a longitude moving at `speed` degrees per day
    pub fn from_longitude(body: Body, longitude: f64, speed: f64) -> Result<Self> {
        let longitude = normalize_degrees(longitude);
        let hd = hexagram::map(longitude)
            .map_err(|source| PlanetError::Quantization { body, source })?;

        Ok(Self {
            body,
            longitude,
            hd,
            fd: FdStructure::from_speed(speed),
            zodiac: ZodiacStructure::from_longitude(longitude),
        })
    }
}

/// Julian centuries from J2000.0
fn centuries(seconds: f64) -> f64 {
    seconds / (DAYS_PER_CENTURY * DAY_S)
}

/// General precession in longitude since J2000.0, in degrees, and its rate in degrees per day
pub fn precession(seconds: f64) -> (f64, f64) {
    let t = centuries(seconds);
    let angle = (PRECESSION_RATE_ASEC * t + PRECESSION_QUADRATIC_ASEC * t * t) * ASEC2DEG;
    let rate =
        (PRECESSION_RATE_ASEC + 2.0 * PRECESSION_QUADRATIC_ASEC * t) * ASEC2DEG / DAYS_PER_CENTURY;
    (angle, rate)
}

/// Longitude of the mean ascending lunar node in degrees, and its rate in degrees per day
pub fn mean_node(seconds: f64) -> (f64, f64) {
    let t = centuries(seconds);
    let longitude = NODE_L0 + NODE_L1 * t + NODE_L2 * t * t + t * t * t / NODE_L3_DIV;
    let rate = (NODE_L1 + 2.0 * NODE_L2 * t + 3.0 * t * t / NODE_L3_DIV) / DAYS_PER_CENTURY;
    (normalize_degrees(longitude), rate)
}

/// Value and derivative (per century) of a polynomial in `t`, lowest power first
fn polynomial(coefficients: &[f64; 5], t: f64) -> (f64, f64) {
    let value = coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c);
    let slope = coefficients[1..]
        .iter()
        .enumerate()
        .rev()
        .fold(0.0, |acc, (i, &c)| acc * t + (i + 1) as f64 * c);
    (value, slope)
}

/// Longitude of the true ascending lunar node in degrees, and its rate in degrees per day
///
/// Unlike the mean node, the true node wobbles by up to about 1.9° and
/// briefly moves direct every couple of weeks.
pub fn true_node(seconds: f64) -> (f64, f64) {
    // [D, M, M', F multipliers, amplitude in degrees]
    #[rustfmt::skip]
    static TERMS: [[f64; 5]; 5] = [
        // D     M     M'    F     amplitude
        [ 2.0,  0.0,  0.0, -2.0, -1.4979],
        [ 0.0,  1.0,  0.0,  0.0, -0.1500],
        [ 2.0,  0.0,  0.0,  0.0, -0.1226],
        [ 0.0,  0.0,  0.0,  2.0,  0.1176],
        [ 0.0,  0.0,  2.0, -2.0, -0.0801],
    ];

    let t = centuries(seconds);
    let arguments = [MOON_ELONGATION, SUN_ANOMALY, MOON_ANOMALY, MOON_LATITUDE]
        .map(|coefficients| polynomial(&coefficients, t));

    let (mean, mean_rate) = mean_node(seconds);
    let mut correction = 0.0;
    let mut correction_rate = 0.0;
    for term in &TERMS {
        let (angle, angle_rate) = arguments
            .iter()
            .zip(&term[..4])
            .fold((0.0, 0.0), |(a, r), (&(value, slope), &n)| (a + n * value, r + n * slope));
        let angle = angle * DEG2RAD;
        correction += term[4] * angle.sin();
        correction_rate += term[4] * angle.cos() * angle_rate * DEG2RAD / DAYS_PER_CENTURY;
    }

    (normalize_degrees(mean + correction), mean_rate + correction_rate)
}

/// Geocentric ecliptic longitude of date (degrees) and its rate (degrees/day)
/// of a kernel target
pub fn geocentric_longitude(
    ephemeris: &EphemerisFile,
    target: i32,
    seconds: f64,
) -> std::result::Result<(f64, f64), JplephemError> {
    let earth = ephemeris.state_from_ssb(targets::EARTH, seconds)?;
    let body = ephemeris.state_from_ssb(target, seconds)?;
    let ecliptic = (body - earth).to_ecliptic(MED_EPS);

    let (precession, precession_rate) = precession(seconds);
    let longitude = ecliptic.to_polar().longitude_degrees() + precession;
    let speed = ecliptic.longitude_rate() + precession_rate;

    Ok((normalize_degrees(longitude), speed))
}

/// All chart bodies at `seconds` past J2000, in [`Body::CHART_ORDER`]
pub fn positions(ephemeris: &EphemerisFile, seconds: i64) -> Result<Vec<Planet>> {
    let t = seconds as f64;
    let from_kernel = |body: Body, target: i32| {
        geocentric_longitude(ephemeris, target, t)
            .map_err(|source| PlanetError::Ephemeris { body, source })
    };

    let (sun, sun_speed) = from_kernel(Body::Sun, targets::SUN)?;
    let (node, node_speed) = true_node(t);

    let mut planets = Vec::with_capacity(Body::CHART_ORDER.len());
    for body in Body::CHART_ORDER {
        let (longitude, speed) = match (body, body.naif_id()) {
            (Body::Sun, _) => (sun, sun_speed),
            (Body::Earth, _) => (sun + 180.0, sun_speed),
            (Body::NorthNode, _) => (node, node_speed),
            (Body::SouthNode, _) => (node + 180.0, node_speed),
            (_, Some(target)) => from_kernel(body, target)?,
            (_, None) => continue,
        };

        let planet = Planet::from_longitude(body, longitude, speed)?;
        debug!(
            "{:>9} {:10.6}° {} {:+.4}°/d",
            body.name(),
            planet.longitude,
            planet.hd,
            speed
        );
        planets.push(planet);
    }

    Ok(planets)
}
