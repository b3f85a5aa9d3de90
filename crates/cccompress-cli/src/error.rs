//! Error types for the command-line front end.

use std::path::PathBuf;

use cccompress_formats::KeyError;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No target given on the command line or in the environment
    #[error("Missing required configuration: target path (-t or CCCOMPRESS_TARGET)")]
    MissingTarget,

    /// The target does not exist
    #[error("Target not found: {}", .0.display())]
    TargetNotFound(PathBuf),

    /// No key given on the command line or in the environment
    #[error("Missing required configuration: obfuscation key (-k or CCCOMPRESS_KEY)")]
    MissingKey,

    /// The key is malformed
    #[error("Invalid obfuscation key: {0}")]
    InvalidKey(#[from] KeyError),

    /// Worker count of zero
    #[error("Invalid worker count: must be at least 1")]
    InvalidWorkerCount,
}
