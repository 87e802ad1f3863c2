//! Verify a file (or stdin) against an expected digest while copying it.
//!
//! Run with:
//!     cargo run --example verify_stream -- <expected-digest> [path]
//!
//! Without an expected digest, prints the canonical digest of the input.

use std::fs::File;
use std::io::{self, Read};

use oci_digest::{Algorithm, Digest, DigestError, Reader, Writer};

fn main() -> Result<(), DigestError> {
    let mut args = std::env::args().skip(1);
    let expected: Option<Digest> = match args.next() {
        Some(s) if s != "-" => Some(s.parse()?),
        _ => None,
    };
    let source: Box<dyn Read> = match args.next() {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    };

    // Digest with whatever algorithm the expected value names
    let alg = match &expected {
        Some(d) => d.algorithm()?,
        None => Algorithm::canonical(),
    };

    let mut reader = Reader::new(source, &alg);
    let mut copy = Writer::new(io::sink(), &alg);
    let bytes = io::copy(&mut reader, &mut copy)?;

    let actual = reader.digest()?;
    println!("{actual}  ({bytes} bytes)");

    if let Some(expected) = expected {
        if reader.verify(&expected) && copy.verify(&expected) {
            println!("OK");
        } else {
            eprintln!("MISMATCH: expected {expected}");
            std::process::exit(1);
        }
    }
    Ok(())
}
