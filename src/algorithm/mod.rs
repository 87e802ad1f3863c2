//! Hash algorithms and the registry that names them.
//!
//! - [`Algorithm`] - a registered hash function with its name, output size and encoder
//! - [`Registry`] - name to algorithm map with reader-writer locking
//!
//! The process-wide registry is created on first use with the built-in
//! `sha256` and `sha512` algorithms (plus `blake3` with the `hash-blake3`
//! feature). Registrations are permanent for the life of the process.

mod registry;

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

use crate::digest::Digest;
use crate::encoding::Encoder;
use crate::error::DigestError;
use crate::hash::{HashFn, HashState};
use crate::io::Writer;

pub use registry::{ALGORITHM_REGEX, Registry};
pub(crate) use registry::global;

/// A hash algorithm used to generate a digest.
///
/// An `Algorithm` is either the zero value (`Algorithm::default()`, no name)
/// or a complete record obtained from a [`Registry`]. Handles are cheap to
/// clone and compare equal when their names match.
///
/// # Example
///
/// ```
/// use oci_digest::Algorithm;
///
/// let alg = Algorithm::sha512();
/// assert_eq!(alg.name(), "sha512");
/// assert_eq!(alg.size(), 64);
///
/// let d = alg.from_string("hello")?;
/// assert_eq!(d.encoded().len(), 128);
/// # Ok::<(), oci_digest::DigestError>(())
/// ```
#[derive(Clone, Default)]
pub struct Algorithm {
    name: Arc<str>,
    size: usize,
    enc: Option<Arc<dyn Encoder>>,
    new_fn: Option<HashFn>,
}

impl Algorithm {
    pub(crate) fn new(name: &str, size: usize, enc: Arc<dyn Encoder>, new_fn: HashFn) -> Self {
        Self {
            name: Arc::from(name),
            size,
            enc: Some(enc),
            new_fn: Some(new_fn),
        }
    }

    /// Returns the built-in SHA-256 algorithm.
    pub fn sha256() -> Algorithm {
        global().builtins().sha256.clone()
    }

    /// Returns the built-in SHA-512 algorithm.
    pub fn sha512() -> Algorithm {
        global().builtins().sha512.clone()
    }

    /// Returns the built-in BLAKE3 algorithm.
    #[cfg(feature = "hash-blake3")]
    pub fn blake3() -> Algorithm {
        global().builtins().blake3.clone()
    }

    /// Returns the canonical default algorithm, currently SHA-256.
    pub fn canonical() -> Algorithm {
        global().builtins().canonical.clone()
    }

    /// Returns the name of the algorithm, empty for the zero value.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the output size of the hash function in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if this is the zero value.
    pub fn is_zero(&self) -> bool {
        self.name.is_empty()
    }

    /// Returns the encoder, `None` for the zero value.
    pub fn encoder(&self) -> Option<&dyn Encoder> {
        self.enc.as_deref()
    }

    /// Returns a fresh hash accumulator, `None` for the zero value.
    pub fn hash(&self) -> Option<HashState> {
        self.new_fn.map(|f| f())
    }

    /// Creates a [`Writer`] with no underlying sink for this algorithm.
    ///
    /// # Errors
    ///
    /// Fails if the algorithm is the zero value.
    pub fn digester(&self) -> Result<Writer<io::Sink>, DigestError> {
        self.validate()?;
        Ok(Writer::detached(self))
    }

    /// Encodes a raw hash sum with the algorithm's encoder.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::EncodeInterfaceInvalid`] for the zero value and
    /// [`DigestError::EncodingInvalid`] if the sum has the wrong length.
    pub fn encode(&self, sum: &[u8]) -> Result<String, DigestError> {
        match &self.enc {
            Some(enc) => enc.encode(sum),
            None => Err(DigestError::EncodeInterfaceInvalid(self.name.to_string())),
        }
    }

    /// Digests a byte slice.
    pub fn from_bytes(&self, p: impl AsRef<[u8]>) -> Result<Digest, DigestError> {
        let mut dw = self.digester()?;
        io::Write::write_all(&mut dw, p.as_ref())?;
        dw.digest()
    }

    /// Digests everything produced by `rd`.
    ///
    /// # Errors
    ///
    /// Fails if the algorithm is the zero value or on any read error.
    pub fn from_reader<R: Read>(&self, mut rd: R) -> Result<Digest, DigestError> {
        let mut dw = self.digester()?;
        io::copy(&mut rd, &mut dw)?;
        dw.digest()
    }

    /// Digests a string.
    pub fn from_string(&self, s: &str) -> Result<Digest, DigestError> {
        self.from_bytes(s.as_bytes())
    }

    /// Verifies the algorithm is complete before it is used.
    pub(crate) fn validate(&self) -> Result<(), DigestError> {
        if self.name.is_empty() {
            return Err(DigestError::AlgorithmInvalidName(String::new()));
        }
        if self.new_fn.is_none() {
            return Err(DigestError::HashFunctionInvalid(self.name.to_string()));
        }
        if self.enc.is_none() {
            return Err(DigestError::EncodeInterfaceInvalid(self.name.to_string()));
        }
        Ok(())
    }
}

impl PartialEq for Algorithm {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Algorithm {}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Algorithm")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("enc", &self.enc)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins() {
        let a = Algorithm::sha256();
        assert_eq!(a.name(), "sha256");
        assert_eq!(a.size(), 32);
        assert_eq!(a.to_string(), "sha256");

        let a = Algorithm::sha512();
        assert_eq!(a.name(), "sha512");
        assert_eq!(a.size(), 64);

        assert_eq!(Algorithm::canonical(), Algorithm::sha256());
    }

    #[test]
    fn test_zero_value() {
        let a = Algorithm::default();
        assert!(a.is_zero());
        assert_eq!(a.size(), 0);
        assert_eq!(a.to_string(), "");
        assert!(a.hash().is_none());
        assert!(a.encoder().is_none());
        assert!(matches!(
            a.digester(),
            Err(DigestError::AlgorithmInvalidName(_))
        ));
        assert!(matches!(
            a.encode(&[0u8; 32]),
            Err(DigestError::EncodeInterfaceInvalid(_))
        ));
        assert!(matches!(
            a.from_bytes(b"data"),
            Err(DigestError::AlgorithmInvalidName(_))
        ));
    }

    #[test]
    fn test_equal_by_name() {
        assert_eq!(Algorithm::sha256(), Algorithm::sha256());
        assert_ne!(Algorithm::sha256(), Algorithm::sha512());
        assert_ne!(Algorithm::sha256(), Algorithm::default());
        assert_eq!(Algorithm::default(), Algorithm::default());
    }

    #[test]
    fn test_hash_is_fresh() {
        let a = Algorithm::sha256();
        let mut h1 = a.hash().unwrap();
        h1.update(b"dirty");
        let h2 = a.hash().unwrap();
        assert_eq!(h2.output_size(), 32);
        assert_ne!(
            crate::hash::current_sum(&*h1),
            crate::hash::current_sum(&*h2)
        );
    }

    #[test]
    fn test_from_bytes() {
        let d = Algorithm::sha256().from_bytes(b"").unwrap();
        assert_eq!(
            d.encoded(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        let d = Algorithm::sha256().from_string("{}").unwrap();
        assert_eq!(
            d.encoded(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );

        let d = Algorithm::sha512().from_bytes(b"").unwrap();
        assert_eq!(
            d.to_string(),
            "sha512:cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }

    #[test]
    fn test_from_reader() {
        let data = vec![0x5au8; 100_000];
        let from_reader = Algorithm::sha512().from_reader(&data[..]).unwrap();
        let from_bytes = Algorithm::sha512().from_bytes(&data).unwrap();
        assert_eq!(from_reader, from_bytes);
    }

    #[test]
    fn test_from_reader_propagates_read_error() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            }
        }

        let err = Algorithm::sha256().from_reader(Failing).unwrap_err();
        assert!(matches!(err, DigestError::Io(ref e) if e.kind() == io::ErrorKind::ConnectionReset));
    }

    #[test]
    fn test_encode() {
        let a = Algorithm::sha256();
        let text = a.encode(&[0xffu8; 32]).unwrap();
        assert_eq!(text, "f".repeat(64));
        assert!(matches!(
            a.encode(&[0u8; 64]),
            Err(DigestError::EncodingInvalid(_))
        ));
    }

    #[test]
    #[cfg(feature = "hash-blake3")]
    fn test_blake3_builtin() {
        let a = Algorithm::blake3();
        assert_eq!(a.name(), "blake3");
        assert_eq!(a.size(), 32);
        let d = a.from_bytes(b"hello world").unwrap();
        assert_eq!(d.encoded(), ::blake3::hash(b"hello world").to_hex().as_str());
    }
}
