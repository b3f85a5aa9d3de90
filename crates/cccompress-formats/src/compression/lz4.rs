//! LZ4 strategy

use std::io::Write;

use lz4_flex::frame::{FrameDecoder, FrameEncoder};

use super::{
    CompressionError, CompressionMode, CompressionResult, CompressionStrategy, read_bounded,
};

/// LZ4 frame format encoder/decoder
///
/// Uses the self-delimiting frame format (magic `04 22 4D 18`) rather than a
/// raw block, so the decoder can detect truncation.
#[derive(Debug, Clone, Copy)]
pub struct Lz4 {
    max_output: usize,
}

impl Lz4 {
    /// Create an LZ4 strategy with the given output ceiling
    pub fn new(max_output: usize) -> Self {
        Self { max_output }
    }
}

impl CompressionStrategy for Lz4 {
    fn mode(&self) -> CompressionMode {
        CompressionMode::Lz4
    }

    fn compress(&self, plain: &[u8]) -> CompressionResult<Vec<u8>> {
        let mut encoder = FrameEncoder::new(Vec::with_capacity(plain.len() / 2));
        encoder
            .write_all(plain)
            .map_err(|e| CompressionError::encode(self.mode(), e))?;
        encoder
            .finish()
            .map_err(|e| CompressionError::encode(self.mode(), e))
    }

    fn decompress(&self, coded: &[u8]) -> CompressionResult<Vec<u8>> {
        read_bounded(FrameDecoder::new(coded), self.mode(), self.max_output)
    }
}
