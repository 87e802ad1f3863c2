//! The digest value type.
//!
//! A [`Digest`] pairs an algorithm name with the encoded hash value and
//! renders as `algorithm:encoded`. Every public constructor validates its
//! input, so a `Digest` is either the zero value or valid for a registered
//! algorithm.

mod text;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::algorithm::{Algorithm, global};
use crate::error::DigestError;
use crate::hash;

const ALGORITHM_PATTERN: &str = r"[a-z0-9]+(?:[.+_-][a-z0-9]+)*";
const ENCODED_PATTERN: &str = r"[a-zA-Z0-9=_-]+";

/// Matches a digest anywhere in a string, following the OCI character set.
pub static DIGEST_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("{ALGORITHM_PATTERN}:{ENCODED_PATTERN}")).expect("static regex")
});

/// [`DIGEST_REGEX`] anchored at both ends.
pub static DIGEST_REGEX_ANCHORED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{ALGORITHM_PATTERN}:{ENCODED_PATTERN}$")).expect("static regex")
});

/// [`DIGEST_REGEX_ANCHORED`] with the algorithm and encoding captured.
pub static DIGEST_REGEX_PARTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^({ALGORITHM_PATTERN}):({ENCODED_PATTERN})$")).expect("static regex")
});

/// An algorithm name combined with an encoded hash value.
///
/// The zero value (`Digest::default()`) has both parts empty; it renders as
/// the empty string and is what `parse("")` returns.
///
/// # Example
///
/// ```
/// use oci_digest::{Digest, parse};
///
/// let d = parse("sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")?;
/// assert_eq!(d.algorithm_name(), "sha256");
/// assert_eq!(d, oci_digest::from_bytes(b"")?);
///
/// assert!(Digest::default().is_zero());
/// # Ok::<(), oci_digest::DigestError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Digest {
    alg: String,
    enc: String,
}

impl Digest {
    /// Creates a digest from the current sum of a live hash accumulator.
    ///
    /// The accumulator is not finalized or reset.
    ///
    /// # Errors
    ///
    /// Fails if the algorithm is the zero value, and returns
    /// [`DigestError::HashInterfaceInvalid`] if `h` is `None` or its output
    /// size differs from the algorithm's.
    pub fn new(alg: &Algorithm, h: Option<&dyn ::digest::DynDigest>) -> Result<Digest, DigestError> {
        alg.validate()?;
        let h = match h {
            Some(h) if h.output_size() == alg.size() => h,
            _ => return Err(DigestError::HashInterfaceInvalid),
        };
        let enc = alg.encode(&hash::current_sum(h))?;
        Ok(Digest {
            alg: alg.name().to_string(),
            enc,
        })
    }

    /// Creates a digest from an already encoded value.
    ///
    /// No hashing occurs; the value is only checked against the algorithm's
    /// encoder.
    ///
    /// # Errors
    ///
    /// Fails if the algorithm is the zero value, and returns
    /// [`DigestError::EncodingInvalid`] if the encoding is rejected.
    pub fn from_encoded(alg: &Algorithm, encoded: &str) -> Result<Digest, DigestError> {
        alg.validate()?;
        let valid = alg.encoder().is_some_and(|enc| enc.validate(encoded));
        if !valid {
            return Err(DigestError::EncodingInvalid(encoded.to_string()));
        }
        Ok(Digest {
            alg: alg.name().to_string(),
            enc: encoded.to_string(),
        })
    }

    /// Returns the algorithm name, empty for the zero value.
    pub fn algorithm_name(&self) -> &str {
        &self.alg
    }

    /// Resolves the algorithm through the process-wide registry.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::AlgorithmInvalidName`] for the zero value.
    pub fn algorithm(&self) -> Result<Algorithm, DigestError> {
        global().lookup(&self.alg)
    }

    /// Returns the encoded portion of the digest.
    pub fn encoded(&self) -> &str {
        &self.enc
    }

    /// Returns true if both the algorithm name and the encoded value are empty.
    pub fn is_zero(&self) -> bool {
        self.alg.is_empty() && self.enc.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_parts_unchecked(alg: &str, enc: &str) -> Digest {
        Digest {
            alg: alg.to_string(),
            enc: enc.to_string(),
        }
    }
}

impl fmt::Display for Digest {
    /// Writes `algorithm:encoded`, or nothing if either part is empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alg.is_empty() || self.enc.is_empty() {
            return Ok(());
        }
        write!(f, "{}:{}", self.alg, self.enc)
    }
}

impl FromStr for Digest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        global().parse(s)
    }
}
