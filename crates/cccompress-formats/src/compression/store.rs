//! Passthrough strategy

use super::{CompressionMode, CompressionResult, CompressionStrategy};

/// Identity strategy for [`CompressionMode::Uncompressed`]
///
/// Copies the payload unchanged in both directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Store;

impl CompressionStrategy for Store {
    fn mode(&self) -> CompressionMode {
        CompressionMode::Uncompressed
    }

    fn compress(&self, plain: &[u8]) -> CompressionResult<Vec<u8>> {
        Ok(plain.to_vec())
    }

    fn decompress(&self, coded: &[u8]) -> CompressionResult<Vec<u8>> {
        Ok(coded.to_vec())
    }
}
