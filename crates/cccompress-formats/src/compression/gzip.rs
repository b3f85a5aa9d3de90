//! gzip strategy

use std::io::Write;

use flate2::Compression;
use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;

use super::{
    CompressionError, CompressionMode, CompressionResult, CompressionStrategy, read_bounded,
};

/// gzip member encoder/decoder
#[derive(Debug, Clone, Copy)]
pub struct Gzip {
    level: Compression,
    max_output: usize,
}

impl Gzip {
    /// Create a gzip strategy with the given level (0-9) and output ceiling
    pub fn new(level: u32, max_output: usize) -> Self {
        Self {
            level: Compression::new(level.min(9)),
            max_output,
        }
    }
}

impl CompressionStrategy for Gzip {
    fn mode(&self) -> CompressionMode {
        CompressionMode::GZip
    }

    fn compress(&self, plain: &[u8]) -> CompressionResult<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::with_capacity(plain.len() / 2), self.level);
        encoder
            .write_all(plain)
            .map_err(|e| CompressionError::encode(self.mode(), e))?;
        encoder
            .finish()
            .map_err(|e| CompressionError::encode(self.mode(), e))
    }

    fn decompress(&self, coded: &[u8]) -> CompressionResult<Vec<u8>> {
        let mut decoder = GzDecoder::new(coded);
        let decompressed = read_bounded(&mut decoder, self.mode(), self.max_output)?;

        let trailing = decoder.get_ref().len();
        if trailing > 0 {
            return Err(CompressionError::decode(
                self.mode(),
                format!("{trailing} trailing bytes after gzip member"),
            ));
        }

        Ok(decompressed)
    }
}
