//! Errors for the fallible edges of the crate: save files and config.
//!
//! Game commands never return these. They fail closed with `false`/`None`.

use std::io;
use thiserror::Error;

/// Save file errors.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Could not determine save directory")]
    NoSaveDirectory,
    #[error("Save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Save payload could not be encoded or decoded: {0}")]
    Codec(#[from] bincode::Error),
    #[error("Invalid save version: expected 0x{expected:016X}, got 0x{found:016X}")]
    BadMagic { expected: u64, found: u64 },
    #[error("Save file checksum mismatch")]
    ChecksumMismatch,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config: {0}")]
    Io(#[from] io::Error),
    #[error("Config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Result type for save operations.
pub type SaveResult<T> = Result<T, SaveError>;
