//! Error types for the jplephem module
//!
//! This module defines error types for reading and evaluating the SPK kernel.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for jplephem functionality
#[derive(Error, Debug)]
pub enum JplephemError {
    /// Error when a file I/O operation fails
    #[error("File I/O error on {path:?}: {source}")]
    FileError {
        /// The path of the file that caused the error
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The kernel bytes do not match the pinned length or digest.
    /// A file failing this check must not be used.
    #[error("Integrity check failed: {0}")]
    IntegrityError(String),

    /// Error when the file format is invalid or unsupported
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// Error when the requested body has no segment in the kernel
    #[error("Body not found: target={target}")]
    BodyNotFound {
        /// The target body ID
        target: i32,
    },

    /// Error when a time is outside the range covered by the body's segments
    #[error("Time {seconds} s for target {target} is outside ephemeris range ({start}..{end})")]
    OutOfRangeError {
        /// The target body ID
        target: i32,
        /// The requested time in seconds past J2000
        seconds: f64,
        /// The start of the covered range
        start: f64,
        /// The end of the covered range
        end: f64,
    },
}

/// Extension of the Result type for jplephem operations
pub type Result<T> = std::result::Result<T, JplephemError>;

/// Helper function to convert a std::io::Error to JplephemError
pub fn io_err(path: impl Into<PathBuf>, err: std::io::Error) -> JplephemError {
    JplephemError::FileError {
        path: path.into(),
        source: err,
    }
}

/// Shorthand for an `InvalidFormat` error
pub(crate) fn format_err(msg: impl Into<String>) -> JplephemError {
    JplephemError::InvalidFormat(msg.into())
}
