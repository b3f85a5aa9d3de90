//! File codec: compress, obfuscate and frame a whole file in memory
//!
//! Encoding runs `compress -> obfuscate -> frame`; decoding runs the same
//! steps in reverse. The codec borrows a [`StrategyRegistry`] and holds no
//! other state, so one instance can serve every worker of a batch.

use thiserror::Error;
use tracing::debug;

use crate::cipher::{KeyError, ObfuscationKey};
use crate::compression::{CompressionError, CompressionMode, StrategyRegistry};
use crate::container::{self, ContainerHeader, FormatError};

/// Errors from encoding or decoding a single file body
#[derive(Debug, Error)]
pub enum CodecError {
    /// Obfuscation key could not be parsed
    #[error("invalid key: {0}")]
    Key(#[from] KeyError),

    /// Container header is invalid, or already present on encode
    #[error("container error: {0}")]
    Format(#[from] FormatError),

    /// Compression strategy failed
    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),

    /// Decompressed length disagrees with the header's `origin_len`
    #[error("decoded {actual} bytes but header records an original length of {expected}")]
    OriginLengthMismatch {
        /// Length recorded in the header
        expected: u64,
        /// Length actually produced
        actual: u64,
    },
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Whole-buffer encoder/decoder over a shared strategy registry
#[derive(Debug, Clone, Copy)]
pub struct FileCodec<'r> {
    registry: &'r StrategyRegistry,
}

impl<'r> FileCodec<'r> {
    /// Create a codec that dispatches through `registry`
    pub fn new(registry: &'r StrategyRegistry) -> Self {
        Self { registry }
    }

    /// Compress, obfuscate and frame `plain`.
    ///
    /// Input that already parses as a complete container is refused with
    /// [`FormatError::AlreadyFramed`] so a file is never framed twice.
    pub fn encode(
        &self,
        key: &ObfuscationKey,
        mode: CompressionMode,
        plain: &[u8],
    ) -> CodecResult<Vec<u8>> {
        if container::is_framed(plain) {
            return Err(FormatError::AlreadyFramed.into());
        }

        let mut payload = self.registry.get(mode).compress(plain)?;
        key.apply(&mut payload);

        debug!(
            "Encoded {} bytes as {} ({} bytes, {} obfuscated)",
            plain.len(),
            mode,
            payload.len(),
            ObfuscationKey::obfuscated_len(payload.len())
        );

        Ok(container::encode(mode, &payload, plain.len() as u64)?)
    }

    /// Validate, de-obfuscate and decompress a container
    pub fn decode(
        &self,
        key: &ObfuscationKey,
        framed: &[u8],
    ) -> CodecResult<(ContainerHeader, Vec<u8>)> {
        let (header, body) = container::decode(framed)?;
        let mode = header.mode()?;

        let mut payload = body.to_vec();
        key.apply(&mut payload);

        let plain = self.registry.get(mode).decompress(&payload)?;

        let actual = plain.len() as u64;
        if actual != header.origin_len() {
            return Err(CodecError::OriginLengthMismatch {
                expected: header.origin_len(),
                actual,
            });
        }

        debug!(
            "Decoded {} bytes of {} into {} bytes",
            body.len(),
            mode,
            plain.len()
        );

        Ok((header, plain))
    }
}
