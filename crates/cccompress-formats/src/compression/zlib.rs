//! zlib strategy

use std::io::Write;

use flate2::Compression;
use flate2::bufread::ZlibDecoder;
use flate2::write::ZlibEncoder;

use super::{
    CompressionError, CompressionMode, CompressionResult, CompressionStrategy, read_bounded,
};

/// zlib stream encoder/decoder
#[derive(Debug, Clone, Copy)]
pub struct Zlib {
    level: Compression,
    max_output: usize,
}

impl Zlib {
    /// Create a zlib strategy with the given level (0-9) and output ceiling
    pub fn new(level: u32, max_output: usize) -> Self {
        Self {
            level: Compression::new(level.min(9)),
            max_output,
        }
    }
}

impl CompressionStrategy for Zlib {
    fn mode(&self) -> CompressionMode {
        CompressionMode::Zlib
    }

    fn compress(&self, plain: &[u8]) -> CompressionResult<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(plain.len() / 2), self.level);
        encoder
            .write_all(plain)
            .map_err(|e| CompressionError::encode(self.mode(), e))?;
        encoder
            .finish()
            .map_err(|e| CompressionError::encode(self.mode(), e))
    }

    fn decompress(&self, coded: &[u8]) -> CompressionResult<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(coded);
        let decompressed = read_bounded(&mut decoder, self.mode(), self.max_output)?;

        let trailing = decoder.get_ref().len();
        if trailing > 0 {
            return Err(CompressionError::decode(
                self.mode(),
                format!("{trailing} trailing bytes after zlib stream"),
            ));
        }

        Ok(decompressed)
    }
}
