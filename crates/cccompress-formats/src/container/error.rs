//! Container format error types

use thiserror::Error;

use super::header::HEADER_SIZE;

/// The buffer is not a container produced by this crate
#[derive(Debug, Error)]
pub enum FormatError {
    /// Buffer is shorter than the fixed header
    #[error("buffer too short for container header: {0} bytes (need {HEADER_SIZE})")]
    TooShort(usize),

    /// Invalid magic bytes
    #[error("invalid container magic: expected [00 00 43 43], got {0:02X?}")]
    InvalidMagic([u8; 4]),

    /// Mode byte outside the known strategies
    #[error("invalid compression mode in header: {0}")]
    InvalidMode(u8),

    /// `compressed_len` disagrees with the bytes that follow the header
    #[error("payload length mismatch: header declares {declared} bytes, buffer holds {actual}")]
    LengthMismatch {
        /// Length recorded in the header
        declared: u64,
        /// Bytes actually present after the header
        actual: u64,
    },

    /// Input already starts with a valid container header
    #[error("container header already present, refusing to frame it again")]
    AlreadyFramed,

    /// Binary parsing error
    #[error("binary parsing error: {0}")]
    BinRw(#[from] binrw::Error),
}

/// Result type for container format operations
pub type FormatResult<T> = Result<T, FormatError>;
