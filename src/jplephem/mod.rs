//! JPL Ephemeris module for planetary positions
//!
//! This module reads the JPL Development Ephemeris kernel `de440s.bsp` and
//! evaluates the position and velocity of the bodies it stores.
//!
//! # Overview
//!
//! JPL Ephemerides are distributed as binary SPK (Spacecraft Planet Kernel) files
//! in the SPICE format. The kernel is verified against a pinned length and
//! SHA-512 before any parsing, then decoded once into an immutable
//! [`EphemerisFile`] that can be shared between threads.
//!
//! # Main Components
//!
//! - `daf`: Double Array File container reader and integrity check
//! - `spk`: segment descriptors and Type 2 evaluation
//! - `chebyshev`: Clenshaw evaluation of Chebyshev series
//! - `calendar`: Julian day and J2000 second conversions
//! - `names`: mappings between body names and NAIF ID numbers
//! - Error types for proper error handling

pub mod calendar;
pub mod chebyshev;
pub mod daf;
pub mod errors;
pub mod names;
pub mod spk;


// Re-export primary types for convenience
pub use self::daf::{Integrity, DE440S_FILENAME};
pub use self::errors::JplephemError;
pub use self::spk::{EphemerisFile, SegmentDescriptor};
