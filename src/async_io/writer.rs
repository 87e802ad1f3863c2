//! Async digesting writer.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use ::digest::DynDigest;
use futures_io::AsyncWrite;
use pin_project_lite::pin_project;

use crate::algorithm::Algorithm;
use crate::digest::Digest;
use crate::error::DigestError;
use crate::io::{HashCore, checked_len};

pin_project! {
    /// An [`AsyncWrite`] adapter that computes a digest of everything written.
    ///
    /// Behaves like [`crate::Writer`]: bytes go to the sink first and only
    /// the accepted bytes are hashed; without a sink every byte is accepted.
    pub struct AsyncWriter<W> {
        #[pin]
        inner: Option<W>,
        core: HashCore,
    }
}

impl<W> AsyncWriter<W> {
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
    pub fn hash(&mut self) -> Option<&mut (dyn DynDigest + Send + 'static)> {
        self.core.state_mut()
    }

    /// Returns true if `cmp` is non-zero and equals the current digest.
    pub fn verify(&self, cmp: &Digest) -> bool {
        self.core.verify(cmp, DigestError::WriterInvalid)
    }

    /// Unwraps the writer, returning the sink.
    pub fn into_inner(self) -> Option<W> {
        self.inner
    }
}

impl<W: AsyncWrite> AsyncWrite for AsyncWriter<W> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.project();
        if !this.core.is_ready() {
            return Poll::Ready(Err(DigestError::WriterInvalid.into()));
        }
        let n = match this.inner.as_pin_mut() {
            Some(inner) => checked_len(ready!(inner.poll_write(cx, buf))?, buf.len())?,
            None => buf.len(),
        };
        if n > 0 {
            this.core.update(&buf[..n]);
        }
        Poll::Ready(Ok(n))
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.project().inner.as_pin_mut() {
            Some(inner) => inner.poll_flush(cx),
            None => Poll::Ready(Ok(())),
        }
    }

    fn poll_close(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.project().inner.as_pin_mut() {
            Some(inner) => inner.poll_close(cx),
            None => Poll::Ready(Ok(())),
        }
    }
}

impl<W> Default for AsyncWriter<W> {
    fn default() -> Self {
        Self {
            inner: None,
            core: HashCore::default(),
        }
    }
}
