//! Ecliptic longitude to hexagram quantization
//!
//! The ecliptic is divided into 64 gate spans. Each span is subdivided into
//! 6 lines, each line into 6 colors, each color into 6 tones and each tone
//! into 5 bases. Span boundaries are stored as data; they are not a uniform
//! `360 / 64` grid (gate 12 ends, and gate 15 begins, at 88.255°).
//!
//! ```rust
//! use hdgraph::hexagram;
//!
//! let hd = hexagram::map(0.0).unwrap();
//! assert_eq!((hd.gate, hd.line), (25, 1));
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::coordinates::normalize_degrees;

/// Width of a line in degrees
pub const LINE_DEG: f64 = 0.9375;
/// Width of a color in degrees
pub const COLOR_DEG: f64 = 0.15625;
/// Width of a tone in degrees
pub const TONE_DEG: f64 = COLOR_DEG / 6.0;
/// Width of a base in degrees
pub const BASE_DEG: f64 = TONE_DEG / 5.0;

/// Error type for quantization
#[derive(Debug, Error)]
pub enum HexagramError {
    /// No gate span contains the longitude; the span table does not tile the circle
    #[error("Longitude {longitude} is not covered by any gate span")]
    Unmapped { longitude: f64 },
}

/// Result type for quantization
pub type Result<T> = std::result::Result<T, HexagramError>;

/// Start and end longitude of a gate, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateSpan {
    pub start: f64,
    pub end: f64,
}

impl GateSpan {
    const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Whether the span contains a normalized longitude
    ///
    /// A span with `start > end` wraps through 0°.
    pub fn contains(&self, longitude: f64) -> bool {
        if self.start > self.end {
            longitude >= self.start || longitude < self.end
        } else {
            self.start <= longitude && longitude < self.end
        }
    }

    /// Width in degrees
    pub fn width(&self) -> f64 {
        normalize_degrees(self.end - self.start)
    }
}

/// Gate spans indexed by `gate - 1`
pub const GATE_SPANS: [GateSpan; 64] = [
    GateSpan::new(223.25, 228.875),  // 1
    GateSpan::new(43.25, 48.875),    // 2
    GateSpan::new(26.375, 32.0),     // 3
    GateSpan::new(138.875, 144.5),   // 4
    GateSpan::new(251.375, 257.0),   // 5
    GateSpan::new(172.625, 178.25),  // 6
    GateSpan::new(133.25, 138.875),  // 7
    GateSpan::new(54.5, 60.125),     // 8
    GateSpan::new(245.75, 251.375),  // 9
    GateSpan::new(268.25, 273.875),  // 10
    GateSpan::new(262.625, 268.25),  // 11
    GateSpan::new(82.625, 88.255),   // 12
    GateSpan::new(313.25, 318.875),  // 13
    GateSpan::new(234.5, 240.125),   // 14
    GateSpan::new(88.255, 93.875),   // 15
    GateSpan::new(65.75, 71.375),    // 16
    GateSpan::new(3.875, 9.5),       // 17
    GateSpan::new(183.875, 189.5),   // 18
    GateSpan::new(307.625, 313.25),  // 19
    GateSpan::new(60.125, 65.75),    // 20
    GateSpan::new(9.5, 15.125),      // 21
    GateSpan::new(347.0, 352.625),   // 22
    GateSpan::new(48.875, 54.5),     // 23
    GateSpan::new(37.625, 43.25),    // 24
    GateSpan::new(358.25, 3.875),    // 25
    GateSpan::new(257.0, 262.625),   // 26
    GateSpan::new(32.0, 37.625),     // 27
    GateSpan::new(212.0, 217.625),   // 28
    GateSpan::new(144.5, 150.125),   // 29
    GateSpan::new(324.5, 330.125),   // 30
    GateSpan::new(122.0, 127.625),   // 31
    GateSpan::new(200.75, 206.375),  // 32
    GateSpan::new(127.625, 133.25),  // 33
    GateSpan::new(240.125, 245.75),  // 34
    GateSpan::new(71.375, 77.0),     // 35
    GateSpan::new(352.625, 358.25),  // 36
    GateSpan::new(335.75, 341.375),  // 37
    GateSpan::new(279.5, 285.125),   // 38
    GateSpan::new(99.5, 105.125),    // 39
    GateSpan::new(155.75, 161.375),  // 40
    GateSpan::new(302.0, 307.625),   // 41
    GateSpan::new(20.75, 26.375),    // 42
    GateSpan::new(228.875, 234.5),   // 43
    GateSpan::new(217.625, 223.25),  // 44
    GateSpan::new(77.0, 82.625),     // 45
    GateSpan::new(178.25, 183.875),  // 46
    GateSpan::new(167.0, 172.625),   // 47
    GateSpan::new(189.5, 195.125),   // 48
    GateSpan::new(318.875, 324.5),   // 49
    GateSpan::new(206.375, 212.0),   // 50
    GateSpan::new(15.125, 20.75),    // 51
    GateSpan::new(93.875, 99.5),     // 52
    GateSpan::new(105.125, 110.75),  // 53
    GateSpan::new(285.125, 290.75),  // 54
    GateSpan::new(330.125, 335.75),  // 55
    GateSpan::new(116.375, 122.0),   // 56
    GateSpan::new(195.125, 200.75),  // 57
    GateSpan::new(273.875, 279.5),   // 58
    GateSpan::new(150.125, 155.75),  // 59
    GateSpan::new(296.375, 302.0),   // 60
    GateSpan::new(290.75, 296.375),  // 61
    GateSpan::new(110.75, 116.375),  // 62
    GateSpan::new(341.375, 347.0),   // 63
    GateSpan::new(161.375, 167.0),   // 64
];

/// Gates in order of increasing longitude, starting from gate 41 at 302°
pub const WHEEL_ORDER: [u8; 64] = [
    41, 19, 13, 49, 30, 55, 37, 63, 22, 36, 25, 17, 21, 51, 42, 3, 27, 24, 2, 23, 8, 20, 16, 35,
    45, 12, 15, 52, 39, 53, 62, 56, 31, 33, 7, 4, 29, 59, 40, 64, 47, 6, 46, 18, 48, 57, 32, 50,
    28, 44, 1, 43, 14, 34, 9, 5, 26, 11, 10, 58, 38, 54, 61, 60,
];

/// Span of a gate (1..=64)
pub fn gate_span(gate: u8) -> Option<GateSpan> {
    match gate {
        1..=64 => Some(GATE_SPANS[gate as usize - 1]),
        _ => None,
    }
}

/// Hexagram position of a longitude: gate, line, color, tone and base
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HdStructure {
    pub gate: u8,
    /// 1..=6
    pub line: u8,
    /// 1..=6
    pub color: u8,
    /// 1..=6
    pub tone: u8,
    /// 1..=5
    pub base: u8,
    /// Degrees into the gate the subdivisions are taken from; for the part of
    /// gate 25 past 0° this is the longitude itself
    pub degrees_passed: f64,
}

impl fmt::Display for HdStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}.{}",
            self.gate, self.line, self.color, self.tone, self.base
        )
    }
}

/// Quantize an ecliptic longitude in degrees
pub fn map(longitude: f64) -> Result<HdStructure> {
    let lon = normalize_degrees(longitude);
    let (index, span) = GATE_SPANS
        .iter()
        .enumerate()
        .find(|(_, span)| span.contains(lon))
        .ok_or(HexagramError::Unmapped { longitude })?;

    // Past 0° the wrapping gate is measured from 0°, not from its start
    let degrees_passed = if span.start > span.end && lon < span.end {
        lon
    } else {
        lon - span.start
    };
    let (line, rest) = subdivide(degrees_passed, LINE_DEG, 6);
    let (color, rest) = subdivide(rest, COLOR_DEG, 6);
    let (tone, rest) = subdivide(rest, TONE_DEG, 6);
    let (base, _) = subdivide(rest, BASE_DEG, 5);

    Ok(HdStructure {
        gate: index as u8 + 1,
        line,
        color,
        tone,
        base,
        degrees_passed,
    })
}

/// 1-based index of `value` in steps of `unit`, clamped to `count`, and the remainder
fn subdivide(value: f64, unit: f64, count: u8) -> (u8, f64) {
    let steps = (value / unit).floor().clamp(0.0, (count - 1) as f64);
    (steps as u8 + 1, value - steps * unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_zero_is_gate_25_line_1() {
        let hd = map(0.0).unwrap();
        assert_eq!(hd.gate, 25);
        assert_eq!(hd.line, 1);
        assert_eq!(hd.to_string(), "25.1.1.1.1");
        assert_relative_eq!(hd.degrees_passed, 0.0);
    }

    #[test]
    fn test_wrapping_gate_restarts_at_zero() {
        let before = map(359.0).unwrap();
        assert_eq!((before.gate, before.line), (25, 1));
        assert_relative_eq!(before.degrees_passed, 0.75, epsilon = 1e-12);

        let after = map(1.003).unwrap();
        assert_eq!(after.to_string(), "25.2.1.3.3");
        assert_relative_eq!(after.degrees_passed, 1.003);
    }

    #[rstest]
    #[case(358.25, "25.1.1.1.1")]
    #[case(3.874_999, "25.5.1.5.4")]
    #[case(3.875, "17.1.1.1.1")]
    #[case(302.0, "41.1.1.1.1")]
    #[case(88.254_999, "12.6.6.6.5")]
    #[case(88.255, "15.1.1.1.1")]
    #[case(88.255 + 0.9375 * 5.0 + 0.001, "15.6.1.1.1")]
    #[case(88.255 + 0.9375 * 5.0 + 0.01, "15.6.1.1.2")]
    #[case(223.25 + 0.9375 * 2.0 + 0.15625 * 3.0, "1.3.4.1.1")]
    fn test_structure_strings(#[case] longitude: f64, #[case] expected: &str) {
        assert_eq!(map(longitude).unwrap().to_string(), expected);
    }

    #[test]
    fn test_tone_and_base_subdivision() {
        // Two tones and three bases into the first color of gate 41
        let lon = 302.0 + 2.0 * TONE_DEG + 3.0 * BASE_DEG + BASE_DEG / 2.0;
        let hd = map(lon).unwrap();
        assert_eq!((hd.gate, hd.line, hd.color, hd.tone, hd.base), (41, 1, 1, 3, 4));
    }

    #[test]
    fn test_normalization() {
        assert_eq!(map(-0.5).unwrap().gate, 25);
        assert_eq!(map(360.0).unwrap(), map(0.0).unwrap());
        assert_eq!(map(720.0 + 100.0).unwrap().gate, 39);
    }

    #[test]
    fn test_non_finite_is_unmapped() {
        assert!(matches!(map(f64::NAN), Err(HexagramError::Unmapped { .. })));
    }

    #[test]
    fn test_spans_tile_the_circle() {
        let total: f64 = GATE_SPANS.iter().map(GateSpan::width).sum();
        assert_relative_eq!(total, 360.0, epsilon = 1e-9);

        // Every wheel neighbour starts where the previous one ends
        for (i, &gate) in WHEEL_ORDER.iter().enumerate() {
            let next = WHEEL_ORDER[(i + 1) % 64];
            assert_eq!(gate_span(gate).unwrap().end, gate_span(next).unwrap().start);
        }

        let mut sorted = WHEEL_ORDER.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=64).collect::<Vec<u8>>());
    }

    #[test]
    fn test_shared_boundary_of_gates_12_and_15() {
        let twelve = gate_span(12).unwrap();
        let fifteen = gate_span(15).unwrap();
        assert_eq!(twelve.end, 88.255);
        assert_eq!(fifteen.start, twelve.end);
        assert_relative_eq!(twelve.width(), 5.63, epsilon = 1e-9);
        assert_relative_eq!(fifteen.width(), 5.62, epsilon = 1e-9);

        for gate in (1..=64).filter(|&g| g != 12 && g != 15) {
            assert_relative_eq!(gate_span(gate).unwrap().width(), 5.625, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_every_longitude_has_exactly_one_gate() {
        let mut lon = 0.0;
        while lon < 360.0 {
            let matching = GATE_SPANS.iter().filter(|s| s.contains(lon)).count();
            assert_eq!(matching, 1, "longitude {}", lon);

            let hd = map(lon).unwrap();
            assert!((1..=6).contains(&hd.line));
            assert!((1..=6).contains(&hd.color));
            assert!((1..=6).contains(&hd.tone));
            assert!((1..=5).contains(&hd.base));
            lon += 0.0137;
        }
    }

    #[test]
    fn test_gate_span_lookup() {
        assert_eq!(gate_span(25), Some(GateSpan { start: 358.25, end: 3.875 }));
        assert_eq!(gate_span(0), None);
        assert_eq!(gate_span(65), None);
    }
}
