//! Digesting writer.

use std::fmt;
use std::io::{self, Write};

use ::digest::DynDigest;

use super::{Digester, HashCore, checked_len};
use crate::algorithm::Algorithm;
use crate::digest::Digest;
use crate::error::DigestError;

/// A [`Write`] adapter that computes a digest of everything written.
///
/// Writes are passed to the wrapped sink first, and only the bytes the sink
/// accepted are hashed. Without a sink every byte is accepted.
///
/// `Writer::default()` is an uninitialized writer: writes fail and
/// [`Writer::digest`] returns [`DigestError::WriterInvalid`].
pub struct Writer<W> {
    inner: Option<W>,
    core: HashCore,
}

impl<W> Writer<W> {
    /// Creates a writer passing data through to `inner`.
    ///
    /// If `alg` is the zero value, the canonical algorithm is used.
    pub fn new(inner: W, alg: &Algorithm) -> Self {
        Self {
            inner: Some(inner),
            core: HashCore::new(alg),
        }
    }

    /// Creates a writer with no sink; written bytes are only hashed.
    pub fn detached(alg: &Algorithm) -> Self {
        Self {
            inner: None,
            core: HashCore::new(alg),
        }
    }

    /// Returns the algorithm in use.
    pub fn algorithm(&self) -> &Algorithm {
        self.core.algorithm()
    }

    /// Returns the digest of every byte written so far.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::WriterInvalid`] for an uninitialized writer.
    pub fn digest(&self) -> Result<Digest, DigestError> {
        self.core.digest(DigestError::WriterInvalid)
    }

    /// Returns the underlying accumulator.
    ///
    /// Direct updates to it are included in later digests.
    pub fn hash(&mut self) -> Option<&mut (dyn DynDigest + Send + 'static)> {
        self.core.state_mut()
    }

    /// Returns true if `cmp` is non-zero and equals the current digest.
    ///
    /// Any error computing the digest yields `false`.
    pub fn verify(&self, cmp: &Digest) -> bool {
        self.core.verify(cmp, DigestError::WriterInvalid)
    }

    /// Returns a reference to the wrapped sink.
    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref()
    }

    /// Unwraps the writer, returning the sink.
    pub fn into_inner(self) -> Option<W> {
        self.inner
    }
}

impl<W: Write> Write for Writer<W> {
    /// Writes to the sink, if any, and adds the accepted bytes to the digest.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.core.is_ready() {
            return Err(DigestError::WriterInvalid.into());
        }
        // A sink error carries no accepted bytes, so it is returned as is.
        let n = match self.inner.as_mut() {
            Some(inner) => checked_len(inner.write(buf)?, buf.len())?,
            None => buf.len(),
        };
        if n > 0 {
            self.core.update(&buf[..n]);
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.inner.as_mut() {
            Some(inner) => inner.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Digester for Writer<W> {
    fn hash(&mut self) -> Option<&mut (dyn DynDigest + Send + 'static)> {
        Writer::hash(self)
    }

    fn digest(&self) -> Result<Digest, DigestError> {
        Writer::digest(self)
    }
}

impl<W> Default for Writer<W> {
    fn default() -> Self {
        Self {
            inner: None,
            core: HashCore::default(),
        }
    }
}

impl<W: fmt::Debug> fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("inner", &self.inner)
            .field("algorithm", self.core.algorithm())
            .finish_non_exhaustive()
    }
}
