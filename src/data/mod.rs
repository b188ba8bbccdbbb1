//! Data directory for the ephemeris kernel
//!
//! The kernel is not downloaded by this crate; it is expected to be placed in
//! the cache directory (or a directory given to [`crate::Loader`]).

use std::env;
use std::fs;
use std::path::PathBuf;

/// Get the cache directory path
pub fn get_cache_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".cache").join("hdgraph")
}

/// Path of a kernel file in the cache directory
pub fn kernel_path(file_name: &str) -> PathBuf {
    get_cache_dir().join(file_name)
}

/// Whether a kernel is present in the cache directory
pub fn is_cached(file_name: &str) -> bool {
    fs::metadata(kernel_path(file_name))
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}
