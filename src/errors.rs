//! Structured error types for dialog-queue
//!
//! Uses thiserror for ergonomic error definitions with automatic Display
//! and Error trait implementations. Queue operations themselves are
//! infallible; errors only come from terminal I/O and the config file.

use std::path::PathBuf;
use thiserror::Error;

/// All possible errors in dialog-queue
#[derive(Error, Debug)]
pub enum DialogQueueError {
    /// Terminal or config file I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file exists but is not valid TOML for our schema
    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config could not be rendered back to TOML
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Convenience Result type using DialogQueueError
pub type Result<T> = std::result::Result<T, DialogQueueError>;
