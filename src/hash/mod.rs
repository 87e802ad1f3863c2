//! Hash function constructors for the built-in algorithms.
//!
//! Every algorithm is backed by a [`HashFn`]: a constructor for a fresh
//! streaming accumulator implementing [`DynDigest`]. Any hasher from
//! the RustCrypto family can be registered this way.
//!
//! - [`sha256`] / [`sha512`] - always available
//! - [`blake3`] - BLAKE3 (requires `hash-blake3` feature)

#[cfg(feature = "hash-blake3")]
mod blake3;

use ::digest::DynDigest;

/// A live, append-only hash accumulator.
pub type HashState = Box<dyn DynDigest + Send>;

/// Constructor for a fresh [`HashState`].
pub type HashFn = fn() -> HashState;

/// Creates a SHA-256 accumulator.
pub fn sha256() -> HashState {
    Box::new(sha2::Sha256::default())
}

/// Creates a SHA-512 accumulator.
pub fn sha512() -> HashState {
    Box::new(sha2::Sha512::default())
}

/// Creates a BLAKE3 accumulator with a 32-byte output.
#[cfg(feature = "hash-blake3")]
pub fn blake3() -> HashState {
    Box::new(self::blake3::Blake3Hasher::default())
}

/// Returns the current sum of `state` without finalizing it.
pub(crate) fn current_sum(state: &dyn DynDigest) -> Box<[u8]> {
    state.box_clone().finalize()
}
