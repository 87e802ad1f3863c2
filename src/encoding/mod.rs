//! Text encodings for hash sums.
//!
//! An [`Encoder`] turns the raw sum of a hash function into the encoded
//! portion of a digest string, and checks encoded text without decoding it.
//!
//! - [`EncodeHex`] - lowercase hexadecimal, used by every built-in algorithm

use std::fmt;

use crate::error::DigestError;

/// Generates and verifies the encoded portion of a digest for one algorithm.
///
/// Implementations must be pure: `validate(&encode(sum)?)` holds for every
/// sum of the length the encoder was configured for.
pub trait Encoder: fmt::Debug + Send + Sync {
    /// Encodes a hash sum.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::EncodingInvalid`] if the sum has the wrong length.
    fn encode(&self, sum: &[u8]) -> Result<String, DigestError>;

    /// Returns true if `text` is a valid encoding for this encoder.
    fn validate(&self, text: &str) -> bool;
}

/// Lowercase hexadecimal encoding with a fixed text length.
///
/// # Example
///
/// ```
/// use oci_digest::{EncodeHex, Encoder};
///
/// let enc = EncodeHex::for_size(4);
/// assert_eq!(enc.encode(&[0xde, 0xad, 0xbe, 0xef])?, "deadbeef");
/// assert!(enc.validate("deadbeef"));
/// assert!(!enc.validate("DEADBEEF"));
/// # Ok::<(), oci_digest::DigestError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodeHex {
    len: usize,
}

impl EncodeHex {
    /// Creates an encoder producing exactly `len` characters.
    pub const fn new(len: usize) -> Self {
        Self { len }
    }

    /// Creates an encoder for a hash sum of `size` bytes.
    pub const fn for_size(size: usize) -> Self {
        Self { len: size * 2 }
    }

    /// Returns the length of the encoded text.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the encoder produces empty text.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Encoder for EncodeHex {
    fn encode(&self, sum: &[u8]) -> Result<String, DigestError> {
        if sum.len() * 2 != self.len {
            return Err(DigestError::EncodingInvalid(format!(
                "{} byte sum for {} hex characters",
                sum.len(),
                self.len
            )));
        }
        Ok(hex::encode(sum))
    }

    fn validate(&self, text: &str) -> bool {
        text.len() == self.len
            && text
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}
