//! oci-digest
//!
//! Verified OCI content digests for Rust.
//!
//! A digest is an algorithm name paired with an encoded hash value, written
//! `algorithm:encoded` (for example `sha256:e3b0c442...`). This crate keeps
//! that value verified from construction onwards:
//!
//! - algorithms are registered once with a name, encoder and hash function
//! - digests are computed by streaming bytes through pass-through readers
//!   and writers, without buffering or teeing the data
//! - digest strings are parsed and validated against the registry, so an
//!   invalid [`Digest`] can never be built
//!
//! The crate intentionally:
//! - does NOT store content
//! - does NOT speak any network protocol
//! - does NOT decide which algorithm a caller should prefer
//!
//! # Sync
//!
//! ```
//! use std::io::Read;
//! use oci_digest::{Algorithm, Reader, DigestError};
//!
//! fn main() -> Result<(), DigestError> {
//!     let expected = oci_digest::parse(
//!         "sha256:44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a",
//!     )?;
//!
//!     let mut reader = Reader::new(&b"{}"[..], &Algorithm::canonical());
//!     let mut body = Vec::new();
//!     reader.read_to_end(&mut body)?;
//!
//!     assert!(reader.verify(&expected));
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::io::AsyncReadExt;
//! use oci_digest::{Algorithm, AsyncReader};
//!
//! async fn demo<R: futures_io::AsyncRead + Unpin>(src: R) -> Result<(), oci_digest::DigestError> {
//!     let mut reader = AsyncReader::new(src, &Algorithm::sha512());
//!     reader.read_all().await?;
//!     println!("{}", reader.digest()?);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod algorithm;
mod digest;
mod encoding;
mod error;
pub mod hash;
mod io;

#[cfg(feature = "async-io")]
mod async_io;

//
// Public surface
//

pub use algorithm::{ALGORITHM_REGEX, Algorithm, Registry};
pub use crate::digest::{DIGEST_REGEX, DIGEST_REGEX_ANCHORED, DIGEST_REGEX_PARTS, Digest};
pub use encoding::{EncodeHex, Encoder};
pub use error::DigestError;
pub use io::{Digester, Reader, Writer};

#[cfg(feature = "async-io")]
pub use async_io::{AsyncReader, AsyncWriter};

use std::sync::Arc;

use crate::hash::HashFn;

/// Registers a hash algorithm in the process-wide registry.
///
/// See [`Registry::register`] for the checks performed.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use oci_digest::{EncodeHex, hash::HashState};
///
/// fn sha384() -> HashState {
///     Box::new(<sha2::Sha384 as Default>::default())
/// }
///
/// let alg = oci_digest::register("sha384", Some(Arc::new(EncodeHex::for_size(48))), Some(sha384))?;
/// assert_eq!(oci_digest::lookup("sha384")?, alg);
/// # Ok::<(), oci_digest::DigestError>(())
/// ```
pub fn register(
    name: &str,
    enc: Option<Arc<dyn Encoder>>,
    new_fn: Option<HashFn>,
) -> Result<Algorithm, DigestError> {
    algorithm::global().register(name, enc, new_fn)
}

/// Looks up an algorithm in the process-wide registry.
pub fn lookup(name: &str) -> Result<Algorithm, DigestError> {
    algorithm::global().lookup(name)
}

/// Returns the canonical default algorithm, currently SHA-256.
pub fn canonical() -> Algorithm {
    Algorithm::canonical()
}

/// Parses and validates a digest string.
///
/// The empty string yields the zero [`Digest`] without error. Anything else
/// must match [`DIGEST_REGEX_ANCHORED`], name a registered algorithm, and
/// carry an encoding that algorithm accepts.
///
/// # Errors
///
/// - [`DigestError::DigestInvalid`] if the string is malformed
/// - [`DigestError::AlgorithmUnknown`] if the algorithm is not registered
/// - [`DigestError::EncodingInvalid`] if the encoding is rejected
pub fn parse(s: &str) -> Result<Digest, DigestError> {
    algorithm::global().parse(s)
}

/// Digests a byte slice with the canonical algorithm.
pub fn from_bytes(p: impl AsRef<[u8]>) -> Result<Digest, DigestError> {
    Algorithm::canonical().from_bytes(p)
}

/// Digests everything produced by `rd` with the canonical algorithm.
pub fn from_reader<R: std::io::Read>(rd: R) -> Result<Digest, DigestError> {
    Algorithm::canonical().from_reader(rd)
}

/// Digests a string with the canonical algorithm.
pub fn from_string(s: &str) -> Result<Digest, DigestError> {
    Algorithm::canonical().from_string(s)
}
