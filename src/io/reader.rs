//! Digesting reader.

use std::fmt;
use std::io::{self, Read};

use ::digest::DynDigest;

use super::{HashCore, checked_len};
use crate::algorithm::Algorithm;
use crate::digest::Digest;
use crate::error::DigestError;

/// A [`Read`] adapter that computes a digest of everything read through it.
///
/// `Reader::default()` is an uninitialized reader: reads fail and
/// [`Reader::digest`] returns [`DigestError::ReaderInvalid`]. A reader from
/// [`Reader::new`] that has not read anything yet returns the digest of the
/// empty input.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use oci_digest::{Algorithm, Reader};
///
/// let expected = oci_digest::from_string("hello world")?;
///
/// let mut r = Reader::new(&b"hello world"[..], &Algorithm::canonical());
/// let mut out = String::new();
/// r.read_to_string(&mut out)?;
///
/// assert_eq!(out, "hello world");
/// assert!(r.verify(&expected));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Reader<R> {
    inner: Option<R>,
    core: HashCore,
}

impl<R> Reader<R> {
    /// Creates a reader over `inner`.
    ///
    /// If `alg` is the zero value, the canonical algorithm is used.
    pub fn new(inner: R, alg: &Algorithm) -> Self {
        Self {
            inner: Some(inner),
            core: HashCore::new(alg),
        }
    }

    /// Creates a reader with no source.
    ///
    /// Reads fail with [`DigestError::ReaderInvalid`]; the hash can still be
    /// fed through [`Reader::hash`].
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

    /// Returns the digest of every byte read so far.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::ReaderInvalid`] for an uninitialized reader.
    pub fn digest(&self) -> Result<Digest, DigestError> {
        self.core.digest(DigestError::ReaderInvalid)
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
        self.core.verify(cmp, DigestError::ReaderInvalid)
    }

    /// Returns a reference to the wrapped source.
    pub fn get_ref(&self) -> Option<&R> {
        self.inner.as_ref()
    }

    /// Unwraps the reader, returning the source.
    pub fn into_inner(self) -> Option<R> {
        self.inner
    }
}

impl<R: Read> Reader<R> {
    /// Reads the source to the end, hashing and discarding the data.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::ReaderInvalid`] if there is no source, or the
    /// first read error.
    pub fn read_all(&mut self) -> Result<(), DigestError> {
        let Some(inner) = self.inner.as_mut() else {
            return Err(DigestError::ReaderInvalid);
        };
        if !self.core.is_ready() {
            return Err(DigestError::ReaderInvalid);
        }
        let mut buf = [0u8; 8192];
        loop {
            match inner.read(&mut buf).and_then(|n| checked_len(n, buf.len())) {
                Ok(0) => return Ok(()),
                Ok(n) => self.core.update(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> Read for Reader<R> {
    /// Reads from the source and adds the bytes read to the digest.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(inner) = self.inner.as_mut() else {
            return Err(DigestError::ReaderInvalid.into());
        };
        if !self.core.is_ready() {
            return Err(DigestError::ReaderInvalid.into());
        }
        // A source error carries no bytes, so it is returned as is.
        let n = checked_len(inner.read(buf)?, buf.len())?;
        if n > 0 {
            self.core.update(&buf[..n]);
        }
        Ok(n)
    }
}

impl<R> Default for Reader<R> {
    fn default() -> Self {
        Self {
            inner: None,
            core: HashCore::default(),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Reader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("inner", &self.inner)
            .field("algorithm", self.core.algorithm())
            .finish_non_exhaustive()
    }
}
