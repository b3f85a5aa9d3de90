//! Container header structure and parsing

use binrw::io::Cursor;
use binrw::{BinRead, BinWrite};

use super::error::{FormatError, FormatResult};
use crate::compression::CompressionMode;

/// Container magic bytes
pub const CONTAINER_MAGIC: [u8; 4] = [0x00, 0x00, 0x43, 0x43];

/// Container format version string
pub const CONTAINER_VERSION: [u8; 7] = *b"1010905";

/// Encoded header size: magic (4) + version (7) + mode (1) + two u64 lengths
pub const HEADER_SIZE: usize = 28;

/// Fixed 28-byte header at the start of every container
///
/// ```text
/// offset  size  field
///      0     4  magic            00 00 43 43
///      4     7  version          "1010905"
///     11     1  mode             CompressionMode byte
///     12     8  compressed_len   u64 LE, bytes after the header
///     20     8  origin_len       u64 LE, bytes before compression
/// ```
///
/// Built fresh for every encode and parsed fresh for every decode; the fields
/// cannot be changed after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct ContainerHeader {
    magic: [u8; 4],
    version: [u8; 7],
    mode: u8,
    compressed_len: u64,
    origin_len: u64,
}

impl ContainerHeader {
    /// Header for a payload of `compressed_len` bytes that expands to
    /// `origin_len` bytes under `mode`
    pub fn new(mode: CompressionMode, compressed_len: u64, origin_len: u64) -> Self {
        Self {
            magic: CONTAINER_MAGIC,
            version: CONTAINER_VERSION,
            mode: mode.as_byte(),
            compressed_len,
            origin_len,
        }
    }

    /// Parse and check the header at the start of `data`.
    ///
    /// Checks the buffer length, the magic and the mode byte. The payload
    /// length is checked separately by [`ContainerHeader::validate_body`].
    pub fn parse(data: &[u8]) -> FormatResult<Self> {
        if data.len() < HEADER_SIZE {
            return Err(FormatError::TooShort(data.len()));
        }

        let mut cursor = Cursor::new(&data[..HEADER_SIZE]);
        let header = Self::read_le(&mut cursor)?;

        if header.magic != CONTAINER_MAGIC {
            return Err(FormatError::InvalidMagic(header.magic));
        }

        if CompressionMode::from_byte(header.mode).is_none() {
            return Err(FormatError::InvalidMode(header.mode));
        }

        Ok(header)
    }

    /// Check that `body_len` bytes follow the header, as recorded
    pub fn validate_body(&self, body_len: usize) -> FormatResult<()> {
        let actual = body_len as u64;
        if self.compressed_len != actual {
            return Err(FormatError::LengthMismatch {
                declared: self.compressed_len,
                actual,
            });
        }
        Ok(())
    }

    /// Serialize to the 28-byte wire form
    pub fn to_bytes(&self) -> FormatResult<Vec<u8>> {
        let mut data = Vec::with_capacity(HEADER_SIZE);
        let mut cursor = Cursor::new(&mut data);
        self.write_le(&mut cursor)?;
        Ok(data)
    }

    /// Version string bytes
    pub fn version(&self) -> [u8; 7] {
        self.version
    }

    /// Compression mode, checked against the enumeration
    pub fn mode(&self) -> FormatResult<CompressionMode> {
        CompressionMode::from_byte(self.mode).ok_or(FormatError::InvalidMode(self.mode))
    }

    /// Mode byte exactly as stored
    pub fn raw_mode(&self) -> u8 {
        self.mode
    }

    /// Payload length after the header
    pub fn compressed_len(&self) -> u64 {
        self.compressed_len
    }

    /// Length of the original, uncompressed input
    pub fn origin_len(&self) -> u64 {
        self.origin_len
    }
}
