//! bzip2 strategy

use std::io::Write;

use bzip2::Compression;
use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;

use super::{
    CompressionError, CompressionMode, CompressionResult, CompressionStrategy, read_bounded,
};

/// bzip2 stream encoder/decoder
#[derive(Debug, Clone, Copy)]
pub struct Bz2 {
    level: u32,
    max_output: usize,
}

impl Bz2 {
    /// Create a bzip2 strategy with the given block-size level (1-9) and
    /// output ceiling
    pub fn new(level: u32, max_output: usize) -> Self {
        Self {
            level: level.clamp(1, 9),
            max_output,
        }
    }
}

impl CompressionStrategy for Bz2 {
    fn mode(&self) -> CompressionMode {
        CompressionMode::Bz2
    }

    fn compress(&self, plain: &[u8]) -> CompressionResult<Vec<u8>> {
        let mut encoder = BzEncoder::new(
            Vec::with_capacity(plain.len() / 2),
            Compression::new(self.level),
        );
        encoder
            .write_all(plain)
            .map_err(|e| CompressionError::encode(self.mode(), e))?;
        encoder
            .finish()
            .map_err(|e| CompressionError::encode(self.mode(), e))
    }

    fn decompress(&self, coded: &[u8]) -> CompressionResult<Vec<u8>> {
        read_bounded(BzDecoder::new(coded), self.mode(), self.max_output)
    }
}
