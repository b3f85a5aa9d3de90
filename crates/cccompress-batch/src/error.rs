//! Error types for file and batch operations.

use std::path::PathBuf;

use cccompress_formats::{CodecError, KeyError};
use thiserror::Error;

/// Failure of a single-file or whole-tree operation
#[derive(Debug, Error)]
pub enum BatchError {
    /// Reading, writing or renaming a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being processed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing the result failed after the original was moved to its backup.
    ///
    /// `path` may no longer exist; the original contents are intact at `backup`.
    #[error("failed to write {path}, original kept at {backup}: {source}")]
    WriteAfterBackup {
        /// File being processed
        path: PathBuf,
        /// Where the original contents now live
        backup: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file's contents could not be encoded or decoded
    #[error("failed to process {path}: {source}")]
    Codec {
        /// File being processed
        path: PathBuf,
        /// Underlying codec error
        #[source]
        source: CodecError,
    },

    /// Obfuscation key is malformed; nothing was touched
    #[error("invalid key: {0}")]
    Key(#[from] KeyError),

    /// Walking the target directory failed
    #[error("failed to list files under {root}: {source}")]
    Walk {
        /// Directory being listed
        root: PathBuf,
        /// Underlying traversal error
        #[source]
        source: walkdir::Error,
    },

    /// Worker count must be at least one
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,

    /// A worker thread panicked before finishing its files
    #[error("a batch worker panicked")]
    WorkerPanicked,
}

impl BatchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn codec(path: impl Into<PathBuf>, source: CodecError) -> Self {
        Self::Codec {
            path: path.into(),
            source,
        }
    }
}

/// Result type for batch operations
pub type BatchResult<T> = Result<T, BatchError>;
