//! Coordinate types used between the kernel reader and the chart

pub mod angle;
pub mod cartesian;
pub mod zodiac;

pub use angle::{normalize_degrees, Dms};
pub use cartesian::{PolarPosition, Position};
pub use zodiac::{ZodiacSign, ZodiacStructure};
