//! hdgraph: Human Design charts computed from the JPL DE440s ephemeris
//!
//! The crate reads the `de440s.bsp` kernel, evaluates geocentric ecliptic
//! longitudes of the Sun, Moon, planets and lunar nodes, quantizes each
//! longitude onto the 64-gate hexagram wheel and assembles a bodygraph from
//! two snapshots: the Personality at birth and the Design about 88 days before.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod bodygraph;
pub mod chart;
pub mod constants;
pub mod coordinates;
pub mod data;
pub mod hexagram;
pub mod jplephem;
pub mod planetlib;
pub mod time;

// Re-export commonly used types
pub use bodygraph::{Bodygraph, Classification};
pub use chart::{Chart, ChartBuilder, HdObjects};
pub use hexagram::HdStructure;
pub use jplephem::{EphemerisFile, Integrity, JplephemError};
pub use planetlib::{Body, Planet};
pub use time::{GregorianDateTime, TimeData, Timescale};

/// Main error type for the hdgraph library
#[derive(Debug, Error)]
pub enum HdError {
    #[error("Ephemeris error: {0}")]
    Ephemeris(#[from] JplephemError),

    #[error("Time error: {0}")]
    Time(#[from] time::TimeError),

    #[error("Hexagram error: {0}")]
    Hexagram(#[from] hexagram::HexagramError),

    #[error("Planet error: {0}")]
    Planet(#[from] planetlib::PlanetError),

    #[error("Missing from chart: {0}")]
    Missing(String),
}

/// Result type for hdgraph operations
pub type Result<T> = std::result::Result<T, HdError>;

/// Entry point for loading the kernel and the timescale
#[derive(Debug, Clone)]
pub struct Loader {
    data_dir: Option<PathBuf>,
    file_name: String,
    integrity: Integrity,
}

impl Loader {
    /// A loader for `de440s.bsp` in the default cache directory
    pub fn new() -> Self {
        Self {
            data_dir: None,
            file_name: jplephem::DE440S_FILENAME.to_string(),
            integrity: Integrity::de440s(),
        }
    }

    /// Set a custom data directory
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_string();
        self
    }

    /// Expect a kernel other than the published de440s
    pub fn with_integrity(mut self, integrity: Integrity) -> Self {
        self.integrity = integrity;
        self
    }

    /// Where the kernel is read from
    pub fn kernel_path(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.join(&self.file_name),
            None => data::kernel_path(&self.file_name),
        }
    }

    /// Open, verify and decode the kernel
    pub fn load_ephemeris(&self) -> Result<EphemerisFile> {
        let path = self.kernel_path();
        log::info!("loading ephemeris from {}", path.display());
        Ok(EphemerisFile::open(&path, &self.integrity)?)
    }

    /// Timescale with the built-in Delta-T table
    pub fn timescale(&self) -> Timescale {
        Timescale::default()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
