//! Tropical zodiac placement of an ecliptic longitude

use serde::Serialize;

use crate::coordinates::angle::{normalize_degrees, Dms};

/// The twelve 30° signs, starting at the vernal equinox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// Signs in ecliptic order
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign containing the given longitude in degrees
    pub fn from_longitude(longitude: f64) -> Self {
        let index = (normalize_degrees(longitude) / 30.0).floor() as usize;
        Self::ALL[index.min(11)]
    }

    /// English name of the sign
    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

/// Position of a longitude within its sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZodiacStructure {
    /// Degrees, arcminutes and arcseconds past the start of the sign
    pub position: Dms,
    pub sign: ZodiacSign,
}

impl ZodiacStructure {
    /// Place an ecliptic longitude in degrees
    pub fn from_longitude(longitude: f64) -> Self {
        let lon = normalize_degrees(longitude);
        let sign = ZodiacSign::from_longitude(lon);
        let within = lon - 30.0 * (sign as usize as f64);

        Self {
            position: Dms::from_degrees(within.max(0.0)),
            sign,
        }
    }
}

impl std::fmt::Display for ZodiacStructure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.position, self.sign.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, ZodiacSign::Aries)]
    #[case(29.999, ZodiacSign::Aries)]
    #[case(30.0, ZodiacSign::Taurus)]
    #[case(185.0, ZodiacSign::Libra)]
    #[case(359.99, ZodiacSign::Pisces)]
    #[case(-10.0, ZodiacSign::Pisces)]
    fn test_sign_from_longitude(#[case] longitude: f64, #[case] expected: ZodiacSign) {
        assert_eq!(ZodiacSign::from_longitude(longitude), expected);
    }

    #[test]
    fn test_structure_within_sign() {
        let z = ZodiacStructure::from_longitude(95.5);
        assert_eq!(z.sign, ZodiacSign::Cancer);
        assert_eq!(z.position.degrees, 5);
        assert_eq!(z.position.minutes, 30);
        assert_eq!(z.to_string(), "5°30'00\" Cancer");
    }
}
