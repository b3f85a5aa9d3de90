//! Container format
//!
//! A container is a fixed 28-byte [`ContainerHeader`] followed by the
//! (compressed, obfuscated) payload. The header is self-describing: it names
//! the compression mode and records both the payload length and the original
//! input length.
//!
//! Three checks decide whether a buffer is a container: the magic, the mode
//! byte, and the payload length matching the bytes that follow the header.
//! The same checks guard the encoder against framing a buffer twice.

mod error;
mod header;

pub use error::{FormatError, FormatResult};
pub use header::{CONTAINER_MAGIC, CONTAINER_VERSION, ContainerHeader, HEADER_SIZE};

use crate::compression::CompressionMode;

/// Prepend a header describing `payload` to a copy of it
pub fn encode(mode: CompressionMode, payload: &[u8], origin_len: u64) -> FormatResult<Vec<u8>> {
    let header = ContainerHeader::new(mode, payload.len() as u64, origin_len);

    let mut framed = header.to_bytes()?;
    framed.reserve_exact(payload.len());
    framed.extend_from_slice(payload);
    Ok(framed)
}

/// Split a container into its validated header and payload
pub fn decode(framed: &[u8]) -> FormatResult<(ContainerHeader, &[u8])> {
    let header = ContainerHeader::parse(framed)?;
    let body = &framed[HEADER_SIZE..];
    header.validate_body(body.len())?;
    Ok((header, body))
}

/// Whether `data` already parses as a complete, valid container
pub fn is_framed(data: &[u8]) -> bool {
    decode(data).is_ok()
}
