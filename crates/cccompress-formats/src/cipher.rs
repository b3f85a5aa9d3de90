//! Keyed XOR obfuscation for container payloads.
//!
//! The key is a string of the form `a.b`. The two subkeys are cycled
//! independently over the payload: the even byte of each two-byte pair is
//! XORed with the next byte of `a`, the odd byte with the next byte of `b`.
//!
//! Only the first [`OBFUSCATION_LIMIT`] bytes are touched, rounded down to a
//! whole number of pairs. That is enough to scramble the stream headers of
//! every supported codec while keeping the cost flat for large files.
//!
//! ## Security Warning
//!
//! This is a scrambling step, not a cipher. It offers no confidentiality and
//! no integrity protection.
//!
//! ## Usage
//!
//! ```rust
//! use cccompress_formats::cipher::ObfuscationKey;
//!
//! let key = ObfuscationKey::parse("ab.cd").expect("well-formed key");
//!
//! let mut data = b"Hello, World!".to_vec();
//! key.apply(&mut data);
//! assert_ne!(&data[..], b"Hello, World!");
//!
//! // The transform is its own inverse
//! key.apply(&mut data);
//! assert_eq!(&data[..], b"Hello, World!");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separator between the two subkeys
pub const KEY_SEPARATOR: char = '.';

/// Upper bound on the number of payload bytes that get obfuscated
pub const OBFUSCATION_LIMIT: usize = 848;

/// Errors that can occur while parsing an obfuscation key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// No separator in the key
    #[error("obfuscation key '{key}' has no '{KEY_SEPARATOR}' separator")]
    MissingSeparator {
        /// Offending key
        key: String,
    },

    /// One side of the separator is empty
    #[error("obfuscation key '{key}' has an empty subkey")]
    EmptySubkey {
        /// Offending key
        key: String,
    },
}

/// A parsed two-part obfuscation key.
///
/// Both subkeys are guaranteed non-empty, so [`ObfuscationKey::apply`] never
/// has to deal with a zero-length cycle.
#[derive(Clone, PartialEq, Eq)]
pub struct ObfuscationKey {
    a: Vec<u8>,
    b: Vec<u8>,
}

impl ObfuscationKey {
    /// Parse a key of the form `a.b`.
    ///
    /// The key is split on every [`KEY_SEPARATOR`]; the first two segments are
    /// the subkeys and anything after a second separator is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::MissingSeparator`] if the key has no separator and
    /// [`KeyError::EmptySubkey`] if either of the first two segments is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cccompress_formats::cipher::{KeyError, ObfuscationKey};
    ///
    /// assert!(ObfuscationKey::parse("left.right").is_ok());
    /// assert!(matches!(
    ///     ObfuscationKey::parse("nodot"),
    ///     Err(KeyError::MissingSeparator { .. })
    /// ));
    /// assert!(matches!(
    ///     ObfuscationKey::parse(".right"),
    ///     Err(KeyError::EmptySubkey { .. })
    /// ));
    /// ```
    pub fn parse(key: &str) -> Result<Self, KeyError> {
        let mut parts = key.split(KEY_SEPARATOR);
        let (Some(a), Some(b)) = (parts.next(), parts.next()) else {
            return Err(KeyError::MissingSeparator {
                key: key.to_string(),
            });
        };

        if a.is_empty() || b.is_empty() {
            return Err(KeyError::EmptySubkey {
                key: key.to_string(),
            });
        }

        Ok(Self {
            a: a.as_bytes().to_vec(),
            b: b.as_bytes().to_vec(),
        })
    }

    /// Number of leading bytes of a `len`-byte payload that [`apply`] touches
    ///
    /// [`apply`]: ObfuscationKey::apply
    pub fn obfuscated_len(len: usize) -> usize {
        len.min(OBFUSCATION_LIMIT) & !1
    }

    /// Obfuscate or de-obfuscate `data` in place.
    ///
    /// Applying the same key twice restores the input, provided the buffer
    /// length (and therefore the obfuscated prefix) is the same both times.
    pub fn apply(&self, data: &mut [u8]) {
        let span = Self::obfuscated_len(data.len());
        let (mut m, mut n) = (0usize, 0usize);

        for pair in data[..span].chunks_exact_mut(2) {
            pair[0] ^= self.a[m];
            pair[1] ^= self.b[n];
            m = (m + 1) % self.a.len();
            n = (n + 1) % self.b.len();
        }
    }
}

impl FromStr for ObfuscationKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for ObfuscationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObfuscationKey")
            .field("a_len", &self.a.len())
            .field("b_len", &self.b.len())
            .finish()
    }
}
