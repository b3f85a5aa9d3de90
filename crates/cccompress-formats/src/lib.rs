//! Keyed container format with pluggable compression strategies
//!
#![allow(clippy::cast_possible_truncation)] // Header lengths are u64 on the wire
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::must_use_candidate)] // Accessors
//! A container is a 28-byte header followed by a compressed payload whose
//! leading bytes are scrambled with a two-part key. This crate provides the
//! pieces and a one-call API over them.
//!
//! # Modules
//!
//! - **compression**: one stateless strategy per [`CompressionMode`]
//! - **cipher**: the keyed XOR obfuscation applied to the payload prefix
//! - **container**: header layout, framing and validation
//! - **codec**: `compress -> obfuscate -> frame` and its inverse
//!
//! # Example
//!
//! ```rust
//! use cccompress_formats::{decode_file, encode_file};
//!
//! let framed = encode_file("ab.cd", 1, b"hello world").expect("encode");
//! assert_eq!(&framed[..4], &[0x00, 0x00, 0x43, 0x43]);
//!
//! let (header, plain) = decode_file("ab.cd", &framed).expect("decode");
//! assert_eq!(header.origin_len(), 11);
//! assert_eq!(plain, b"hello world");
//! ```

#![warn(missing_docs)]

pub mod cipher;
pub mod codec;
pub mod compression;
pub mod container;

pub use cipher::{KeyError, ObfuscationKey};
pub use codec::{CodecError, CodecResult, FileCodec};
pub use compression::{CompressionMode, CompressionStrategy, StrategyRegistry};
pub use container::{ContainerHeader, FormatError, HEADER_SIZE};

/// Encode `plain` with a freshly parsed key and the default registry.
///
/// `mode` is a raw mode byte; values outside the enumeration fall back to
/// [`CompressionMode::Uncompressed`], and that is what the header records.
pub fn encode_file(key: &str, mode: u8, plain: &[u8]) -> CodecResult<Vec<u8>> {
    let key = ObfuscationKey::parse(key)?;
    let registry = StrategyRegistry::default();
    FileCodec::new(&registry).encode(&key, CompressionMode::from_byte_lossy(mode), plain)
}

/// Decode a container with a freshly parsed key and the default registry
pub fn decode_file(key: &str, framed: &[u8]) -> CodecResult<(ContainerHeader, Vec<u8>)> {
    let key = ObfuscationKey::parse(key)?;
    let registry = StrategyRegistry::default();
    FileCodec::new(&registry).decode(&key, framed)
}
