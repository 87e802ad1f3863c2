//! Digest a file asynchronously on a tokio runtime.
//!
//! Run with:
//!     cargo run --example async_verify --features async-io -- <path> [sha256|sha512]

use futures_util::io::AsyncReadExt;
use tokio_util::compat::TokioAsyncReadCompatExt;

use oci_digest::{AsyncReader, DigestError};

#[tokio::main]
async fn main() -> Result<(), DigestError> {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: async_verify <path> [algorithm]");
        std::process::exit(2);
    };
    let alg = oci_digest::lookup(args.next().as_deref().unwrap_or("sha256"))?;

    let file = tokio::fs::File::open(&path).await?;
    let mut reader = AsyncReader::new(file.compat(), &alg);

    let mut head = [0u8; 16];
    let n = reader.read(&mut head).await?;
    println!("first {n} bytes: {}", hex_preview(&head[..n]));

    // Hash the rest without keeping it
    reader.read_all().await?;
    println!("{}  {path}", reader.digest()?);
    Ok(())
}

fn hex_preview(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
