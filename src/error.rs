//! Error types shared across the shell.
//!
//! None of these are fatal: callers log them and fall back to defaults.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the durable key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read storage file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write storage file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("storage file {} is not a JSON object: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
    #[error("failed to serialize storage: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures while loading a translation catalog.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("catalog for '{language}' is malformed: {reason}")]
    MalformedCatalog {
        language: &'static str,
        reason: String,
    },
    #[error("locale change task was aborted: {0}")]
    TaskAborted(String),
}

/// Failures while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory available on this platform")]
    NoConfigDir,
    #[error("failed to create config dir {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}
