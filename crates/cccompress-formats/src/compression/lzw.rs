//! LZW strategy

use std::io::{self, ErrorKind, Read};

use weezl::decode::Decoder;
use weezl::encode::Encoder;
use weezl::{BitOrder, LzwStatus};

use super::{
    CompressionError, CompressionMode, CompressionResult, CompressionStrategy, read_bounded,
};

/// Literal code width; every byte value is a literal
const LITERAL_WIDTH: u8 = 8;

/// LZW with least-significant-bit-first packing and 8-bit literals
///
/// Matches the GIF/TIFF-style variable-width code stream with clear and end
/// codes.
#[derive(Debug, Clone, Copy)]
pub struct Lzw {
    max_output: usize,
}

impl Lzw {
    /// Create an LZW strategy with the given output ceiling
    pub fn new(max_output: usize) -> Self {
        Self { max_output }
    }
}

impl CompressionStrategy for Lzw {
    fn mode(&self) -> CompressionMode {
        CompressionMode::Lzw
    }

    fn compress(&self, plain: &[u8]) -> CompressionResult<Vec<u8>> {
        Encoder::new(BitOrder::Lsb, LITERAL_WIDTH)
            .encode(plain)
            .map_err(|e| CompressionError::encode(self.mode(), e))
    }

    fn decompress(&self, coded: &[u8]) -> CompressionResult<Vec<u8>> {
        read_bounded(LzwReader::new(coded), self.mode(), self.max_output)
    }
}

/// Incremental LZW decoder over an in-memory code stream
///
/// Yields decoded bytes one output buffer at a time, so the caller decides
/// how much output to accept. A stream without an end code is an error.
struct LzwReader<'a> {
    decoder: Decoder,
    input: &'a [u8],
    finished: bool,
}

impl<'a> LzwReader<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            decoder: Decoder::new(BitOrder::Lsb, LITERAL_WIDTH),
            input,
            finished: false,
        }
    }
}

impl Read for LzwReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.finished || buf.is_empty() {
            return Ok(0);
        }

        loop {
            let result = self.decoder.decode_bytes(self.input, buf);
            self.input = &self.input[result.consumed_in..];

            match result.status {
                Err(e) => return Err(io::Error::new(ErrorKind::InvalidData, e)),
                Ok(LzwStatus::Done) => {
                    self.finished = true;
                    return Ok(result.consumed_out);
                }
                Ok(LzwStatus::NoProgress) if result.consumed_out == 0 => {
                    return Err(io::Error::new(
                        ErrorKind::UnexpectedEof,
                        "LZW stream ended without an end code",
                    ));
                }
                Ok(_) if result.consumed_out > 0 => return Ok(result.consumed_out),
                Ok(_) => {}
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compression::MAX_DECOMPRESSION_SIZE;

    #[test]
    fn test_lzw_round_trip_all_byte_values() {
        let lzw = Lzw::new(MAX_DECOMPRESSION_SIZE);
        let data: Vec<u8> = (0..=255u8).cycle().take(2048).collect();

        let compressed = lzw.compress(&data).expect("Test operation should succeed");
        let decompressed = lzw
            .decompress(&compressed)
            .expect("Test operation should succeed");
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_lzw_missing_end_code_rejected() {
        let lzw = Lzw::new(MAX_DECOMPRESSION_SIZE);
        let data: Vec<u8> = (0..=255u8).cycle().take(2048).collect();
        let compressed = lzw.compress(&data).expect("Test operation should succeed");

        let err = lzw
            .decompress(&compressed[..compressed.len() / 2])
            .expect_err("truncated stream should not decode");
        assert!(matches!(err, CompressionError::Decode { .. }), "{err}");
    }

    /// Counts the bytes a reader hands out
    struct Counted<R> {
        inner: R,
        produced: usize,
    }

    impl<R: Read> Read for Counted<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.inner.read(buf)?;
            self.produced += n;
            Ok(n)
        }
    }

    #[test]
    fn test_lzw_ceiling_stops_decoding_early() {
        let data = vec![0u8; 4 * 1024 * 1024];
        let compressed = Lzw::new(MAX_DECOMPRESSION_SIZE)
            .compress(&data)
            .expect("Test operation should succeed");

        let mut reader = Counted {
            inner: LzwReader::new(&compressed),
            produced: 0,
        };
        let err = read_bounded(&mut reader, CompressionMode::Lzw, 1024)
            .expect_err("ceiling should trip");

        assert!(matches!(
            err,
            CompressionError::OutputTooLarge { limit: 1024, .. }
        ));
        // At most one buffer past the ceiling is ever decoded
        assert!(reader.produced <= 1024 + 8192, "decoded {}", reader.produced);
    }
}
