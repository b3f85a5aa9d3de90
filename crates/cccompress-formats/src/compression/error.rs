//! Compression error types

use thiserror::Error;

use super::mode::CompressionMode;

/// Failure inside a compression strategy
#[derive(Debug, Error)]
pub enum CompressionError {
    /// The encoder failed while writing or finishing its stream
    #[error("{mode} compression failed: {reason}")]
    Encode {
        /// Strategy that failed
        mode: CompressionMode,
        /// Underlying codec message
        reason: String,
    },

    /// The input is not a valid stream for this strategy, or is truncated
    #[error("{mode} decompression failed: {reason}")]
    Decode {
        /// Strategy that failed
        mode: CompressionMode,
        /// Underlying codec message
        reason: String,
    },

    /// Decompressed output grew past the configured ceiling
    #[error("{mode} decompressed size exceeds limit of {limit} bytes")]
    OutputTooLarge {
        /// Strategy that failed
        mode: CompressionMode,
        /// Configured ceiling in bytes
        limit: usize,
    },
}

impl CompressionError {
    pub(crate) fn encode(mode: CompressionMode, err: impl std::fmt::Display) -> Self {
        Self::Encode {
            mode,
            reason: err.to_string(),
        }
    }

    pub(crate) fn decode(mode: CompressionMode, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            mode,
            reason: err.to_string(),
        }
    }

    /// Strategy that produced the error
    pub fn mode(&self) -> CompressionMode {
        match self {
            Self::Encode { mode, .. }
            | Self::Decode { mode, .. }
            | Self::OutputTooLarge { mode, .. } => *mode,
        }
    }
}

/// Result type for compression operations
pub type CompressionResult<T> = Result<T, CompressionError>;
