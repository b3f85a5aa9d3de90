//! Compression mode selector stored in the container header

use std::fmt;

/// Compression strategy selector
///
/// The discriminant is the byte written to the `mode` field of the container
/// header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CompressionMode {
    /// Payload stored as-is (mode 0)
    Uncompressed = 0,
    /// gzip member (mode 1)
    GZip = 1,
    /// zlib stream (mode 2)
    Zlib = 2,
    /// bzip2 stream (mode 3)
    Bz2 = 3,
    /// LZW, LSB-first with 8-bit literals (mode 4)
    Lzw = 4,
    /// LZ4 frame (mode 5)
    Lz4 = 5,
}

impl CompressionMode {
    /// Every mode, in discriminant order
    pub const ALL: [Self; 6] = [
        Self::Uncompressed,
        Self::GZip,
        Self::Zlib,
        Self::Bz2,
        Self::Lzw,
        Self::Lz4,
    ];

    /// Parse a mode byte, rejecting values outside the enumeration.
    ///
    /// This is the check applied to headers read back from disk.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Uncompressed),
            1 => Some(Self::GZip),
            2 => Some(Self::Zlib),
            3 => Some(Self::Bz2),
            4 => Some(Self::Lzw),
            5 => Some(Self::Lz4),
            _ => None,
        }
    }

    /// Map a requested mode byte onto a strategy, falling back to
    /// [`CompressionMode::Uncompressed`] for unknown values.
    ///
    /// Producers accept any byte; the fallback mode is what gets recorded in
    /// the header, so the container stays readable.
    pub fn from_byte_lossy(byte: u8) -> Self {
        Self::from_byte(byte).unwrap_or(Self::Uncompressed)
    }

    /// Get the byte representation
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Short lowercase name, used in logs and error messages
    pub fn name(self) -> &'static str {
        match self {
            Self::Uncompressed => "uncompressed",
            Self::GZip => "gzip",
            Self::Zlib => "zlib",
            Self::Bz2 => "bz2",
            Self::Lzw => "lzw",
            Self::Lz4 => "lz4",
        }
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for CompressionMode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_byte(byte).ok_or(byte)
    }
}
