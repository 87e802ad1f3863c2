//! Pass-through digesting for [`std::io`] streams.
//!
//! - [`Reader`] - wraps a [`Read`](std::io::Read) source, hashing every byte read
//! - [`Writer`] - wraps an optional [`Write`] sink, hashing every byte accepted
//! - [`Digester`] - the hashing surface shared by writers
//!
//! Both wrappers forward each call to the wrapped stream and mirror exactly
//! the bytes that stream reported into the running hash, so no second copy
//! or tee is needed. [`Reader::digest`] and [`Writer::digest`] may be called
//! at any point and never disturb the running hash.
//!
//! A reader or writer is owned by whichever thread drives it; sharing one
//! across threads needs external synchronization.
//!
//! # Example
//!
//! ```
//! use std::io::{self, Write};
//! use oci_digest::{Algorithm, Writer};
//!
//! let mut sink = Vec::new();
//! let mut w = Writer::new(&mut sink, &Algorithm::sha256());
//! w.write_all(b"{}")?;
//! let d = w.digest()?;
//! assert_eq!(d, oci_digest::from_string("{}")?);
//! assert_eq!(sink, b"{}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod reader;
mod writer;

use std::io::{self, Write};

use ::digest::DynDigest;
use log::trace;

use crate::algorithm::Algorithm;
use crate::digest::Digest;
use crate::error::DigestError;
use crate::hash::HashState;

pub use reader::Reader;
pub use writer::Writer;

/// A live digest computation that accepts bytes through [`Write`].
pub trait Digester: Write {
    /// Returns the underlying accumulator.
    ///
    /// Direct updates to it are included in later digests.
    fn hash(&mut self) -> Option<&mut (dyn DynDigest + Send + 'static)>;

    /// Returns the digest of every byte seen so far.
    fn digest(&self) -> Result<Digest, DigestError>;
}

/// Checks a byte count reported by a wrapped stream against its buffer.
pub(crate) fn checked_len(n: usize, len: usize) -> io::Result<usize> {
    if n > len {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("stream reported {n} bytes for a buffer of {len}"),
        ));
    }
    Ok(n)
}

/// Algorithm and accumulator shared by [`Reader`] and [`Writer`].
///
/// `state` is `None` only for values that were never constructed through
/// `new`; that is distinct from a constructed state with no bytes yet.
#[derive(Default)]
pub(crate) struct HashCore {
    alg: Algorithm,
    state: Option<HashState>,
}

impl HashCore {
    /// Binds a fresh accumulator, using the canonical algorithm if `alg` is
    /// incomplete.
    pub(crate) fn new(alg: &Algorithm) -> Self {
        let alg = if alg.validate().is_ok() {
            alg.clone()
        } else {
            trace!("digester falling back to canonical algorithm (given {alg:?})");
            Algorithm::canonical()
        };
        let state = alg.hash();
        Self { alg, state }
    }

    pub(crate) fn algorithm(&self) -> &Algorithm {
        &self.alg
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        if let Some(state) = self.state.as_mut() {
            state.update(data);
        }
    }

    pub(crate) fn state_mut(&mut self) -> Option<&mut (dyn DynDigest + Send + 'static)> {
        self.state.as_deref_mut()
    }

    /// Returns `invalid` when the accumulator was never constructed.
    pub(crate) fn digest(&self, invalid: DigestError) -> Result<Digest, DigestError> {
        match self.state.as_deref() {
            Some(state) => Digest::new(&self.alg, Some(state)),
            None => Err(invalid),
        }
    }

    pub(crate) fn verify(&self, cmp: &Digest, invalid: DigestError) -> bool {
        match self.digest(invalid) {
            Ok(d) => !cmp.is_zero() && d == *cmp,
            Err(_) => false,
        }
    }
}
