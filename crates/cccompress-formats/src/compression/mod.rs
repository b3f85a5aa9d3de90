//! Compression strategies
//!
//! Each [`CompressionMode`] maps to one stateless [`CompressionStrategy`]
//! implementation. Strategies are looked up through a [`StrategyRegistry`]
//! that callers build once and share by reference; nothing here holds
//! process-wide state.
//!
//! | Mode | Codec | Default level |
//! |------|-------|---------------|
//! | `Uncompressed` | identity copy | - |
//! | `GZip` | gzip member | 6 |
//! | `Zlib` | zlib stream | 6 |
//! | `Bz2` | bzip2 stream | 6 |
//! | `Lzw` | LZW, LSB, 8-bit literals | - |
//! | `Lz4` | LZ4 frame | - |

mod bz2;
mod error;
mod gzip;
mod lz4;
mod lzw;
mod mode;
mod store;
mod zlib;

pub use bz2::Bz2;
pub use error::{CompressionError, CompressionResult};
pub use gzip::Gzip;
pub use lz4::Lz4;
pub use lzw::Lzw;
pub use mode::CompressionMode;
pub use store::Store;
pub use zlib::Zlib;

use std::io::{ErrorKind, Read};

/// Maximum allowed decompression size (1 GB)
///
/// Stream decoders stop and fail once their output would grow past this
/// ceiling, which bounds the damage of a crafted compression bomb.
pub const MAX_DECOMPRESSION_SIZE: usize = 1024 * 1024 * 1024;

/// Default level for the level-driven codecs (gzip, zlib, bzip2)
pub const DEFAULT_LEVEL: u32 = 6;

/// A reversible byte-to-byte compression algorithm
///
/// Implementations must be stateless across calls so a single instance can be
/// shared by every worker of a batch.
pub trait CompressionStrategy: Send + Sync {
    /// Mode this strategy serves
    fn mode(&self) -> CompressionMode;

    /// Compress `plain` into a fresh buffer
    fn compress(&self, plain: &[u8]) -> CompressionResult<Vec<u8>>;

    /// Decompress `coded` into a fresh buffer
    fn decompress(&self, coded: &[u8]) -> CompressionResult<Vec<u8>>;
}

/// Lookup table from [`CompressionMode`] to its strategy
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    store: Store,
    gzip: Gzip,
    zlib: Zlib,
    bz2: Bz2,
    lzw: Lzw,
    lz4: Lz4,
}

impl StrategyRegistry {
    /// Registry with default levels and the default decompression ceiling
    pub fn new() -> Self {
        Self::with_max_output(MAX_DECOMPRESSION_SIZE)
    }

    /// Registry whose decoders refuse to produce more than `max_output` bytes
    pub fn with_max_output(max_output: usize) -> Self {
        Self {
            store: Store,
            gzip: Gzip::new(DEFAULT_LEVEL, max_output),
            zlib: Zlib::new(DEFAULT_LEVEL, max_output),
            bz2: Bz2::new(DEFAULT_LEVEL, max_output),
            lzw: Lzw::new(max_output),
            lz4: Lz4::new(max_output),
        }
    }

    /// Strategy for `mode`
    pub fn get(&self, mode: CompressionMode) -> &dyn CompressionStrategy {
        match mode {
            CompressionMode::Uncompressed => &self.store,
            CompressionMode::GZip => &self.gzip,
            CompressionMode::Zlib => &self.zlib,
            CompressionMode::Bz2 => &self.bz2,
            CompressionMode::Lzw => &self.lzw,
            CompressionMode::Lz4 => &self.lz4,
        }
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain a decoder into memory, failing once `limit` bytes would be exceeded.
pub(crate) fn read_bounded<R: Read>(
    mut reader: R,
    mode: CompressionMode,
    limit: usize,
) -> CompressionResult<Vec<u8>> {
    let mut decompressed = Vec::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CompressionError::decode(mode, e)),
        };

        if decompressed.len() + bytes_read > limit {
            return Err(CompressionError::OutputTooLarge { mode, limit });
        }

        decompressed.extend_from_slice(&buffer[..bytes_read]);
    }

    Ok(decompressed)
}
