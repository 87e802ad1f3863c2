//! Error types for oci-digest.

use std::io;

use thiserror::Error;

/// Errors returned by registry, parsing, encoding and digesting operations.
///
/// Variants that concern a specific name or text carry it so the failure can
/// be reported without the caller keeping its own copy.
#[derive(Debug, Error)]
pub enum DigestError {
    /// An algorithm with this name is already registered.
    #[error("algorithm is already registered: {0}")]
    AlgorithmExists(String),

    /// The algorithm name is empty or does not follow the naming grammar.
    #[error("invalid algorithm name: {0:?}")]
    AlgorithmInvalidName(String),

    /// The algorithm name was never registered.
    #[error("algorithm is not registered: {0}")]
    AlgorithmUnknown(String),

    /// A digest string is malformed, or a digest value is inconsistent.
    #[error("digest is invalid: {0:?}")]
    DigestInvalid(String),

    /// The encoder capability is missing.
    #[error("invalid encoding interface: {0}")]
    EncodeInterfaceInvalid(String),

    /// Encoded text fails validation, or a raw sum has the wrong length.
    #[error("encoding contains invalid characters or the wrong length for the algorithm: {0:?}")]
    EncodingInvalid(String),

    /// The hash function is missing or reports a non-positive output size.
    #[error("invalid hash function: {0}")]
    HashFunctionInvalid(String),

    /// The hash accumulator is missing or does not match the algorithm.
    #[error("invalid hash interface")]
    HashInterfaceInvalid,

    /// The reader was not created with a source and an algorithm.
    #[error("invalid reader")]
    ReaderInvalid,

    /// The writer was not created with an algorithm.
    #[error("invalid writer")]
    WriterInvalid,

    /// An I/O error occurred in the wrapped source or sink.
    #[error("io error: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for DigestError {
    fn from(e: io::Error) -> Self {
        // Readers and writers surface classified errors through io::Error;
        // recover the classification when one comes back out.
        if e.get_ref().is_some_and(|inner| inner.is::<DigestError>()) {
            if let Some(inner) = e.into_inner() {
                return match inner.downcast::<DigestError>() {
                    Ok(err) => *err,
                    Err(other) => DigestError::Io(io::Error::other(other)),
                };
            }
            return DigestError::Io(io::Error::other("unrecoverable wrapped error"));
        }
        DigestError::Io(e)
    }
}

impl From<DigestError> for io::Error {
    fn from(e: DigestError) -> Self {
        match e {
            DigestError::Io(e) => e,
            other => io::Error::other(other),
        }
    }
}
