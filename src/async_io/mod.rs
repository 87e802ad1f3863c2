//! Async pass-through digesting.
//!
//! This module mirrors [`crate::io`] on top of the `futures-io` traits,
//! making it runtime-agnostic and compatible with tokio, async-std, smol,
//! and other async runtimes.
//!
//! - [`AsyncReader`] - wraps an `AsyncRead` source
//! - [`AsyncWriter`] - wraps an optional `AsyncWrite` sink
//!
//! This module requires the `async-io` feature to be enabled.
//!
//! # Runtime Compatibility
//!
//! For tokio users, `tokio_util::compat` converts tokio's I/O traits:
//!
//! ```ignore
//! use tokio_util::compat::TokioAsyncReadCompatExt;
//! use oci_digest::{AsyncReader, Algorithm};
//!
//! let file = tokio::fs::File::open("blob").await?;
//! let mut reader = AsyncReader::new(file.compat(), &Algorithm::canonical());
//! reader.read_all().await?;
//! println!("{}", reader.digest()?);
//! ```

mod reader;
mod writer;

pub use reader::AsyncReader;
pub use writer::AsyncWriter;
