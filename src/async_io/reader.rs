//! Async digesting reader.

use std::future::poll_fn;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use ::digest::DynDigest;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::algorithm::Algorithm;
use crate::digest::Digest;
use crate::error::DigestError;
use crate::io::{HashCore, checked_len};

pin_project! {
    /// An [`AsyncRead`] adapter that computes a digest of everything read.
    ///
    /// Behaves like [`crate::Reader`]: only the bytes the source returns are
    /// hashed, the digest can be taken at any point, and a default value is
    /// uninitialized.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use futures_util::io::AsyncReadExt;
    /// use oci_digest::{Algorithm, AsyncReader};
    ///
    /// async fn demo() -> Result<(), Box<dyn std::error::Error>> {
    ///     let mut r = AsyncReader::new(&b"hello"[..], &Algorithm::sha256());
    ///     let mut out = Vec::new();
    ///     r.read_to_end(&mut out).await?;
    ///     assert!(r.verify(&oci_digest::from_string("hello")?));
    ///     Ok(())
    /// }
    /// ```
    pub struct AsyncReader<R> {
        #[pin]
        inner: Option<R>,
        core: HashCore,
    }
}

impl<R> AsyncReader<R> {
    /// Creates a reader over `inner`.
    ///
    /// If `alg` is the zero value, the canonical algorithm is used.
    pub fn new(inner: R, alg: &Algorithm) -> Self {
        Self {
            inner: Some(inner),
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
    pub fn hash(&mut self) -> Option<&mut (dyn DynDigest + Send + 'static)> {
        self.core.state_mut()
    }

    /// Returns true if `cmp` is non-zero and equals the current digest.
    pub fn verify(&self, cmp: &Digest) -> bool {
        self.core.verify(cmp, DigestError::ReaderInvalid)
    }

    /// Unwraps the reader, returning the source.
    pub fn into_inner(self) -> Option<R> {
        self.inner
    }
}

impl<R: AsyncRead + Unpin> AsyncReader<R> {
    /// Reads the source to the end, hashing and discarding the data.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::ReaderInvalid`] if there is no source, or the
    /// first read error.
    pub async fn read_all(&mut self) -> Result<(), DigestError> {
        let mut buf = [0u8; 8192];
        loop {
            match poll_fn(|cx| Pin::new(&mut *self).poll_read(cx, &mut buf)).await {
                Ok(0) => return Ok(()),
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: AsyncRead> AsyncRead for AsyncReader<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.project();
        let Some(inner) = this.inner.as_pin_mut() else {
            return Poll::Ready(Err(DigestError::ReaderInvalid.into()));
        };
        if !this.core.is_ready() {
            return Poll::Ready(Err(DigestError::ReaderInvalid.into()));
        }
        let n = checked_len(ready!(inner.poll_read(cx, buf))?, buf.len())?;
        if n > 0 {
            this.core.update(&buf[..n]);
        }
        Poll::Ready(Ok(n))
    }
}

impl<R> Default for AsyncReader<R> {
    fn default() -> Self {
        Self {
            inner: None,
            core: HashCore::default(),
        }
    }
}
