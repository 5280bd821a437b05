//! Error types for veil_core

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up the fullscreen controller
///
/// Runtime transitions never surface errors to the caller; they are logged
/// and the controller keeps going.
#[derive(Error, Debug)]
pub enum VeilError {
    /// Failed to read a configuration file
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for veil_core operations
pub type Result<T> = std::result::Result<T, VeilError>;
