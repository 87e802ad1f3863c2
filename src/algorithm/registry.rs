//! Algorithm registry.
//!
//! A [`Registry`] maps algorithm names to [`Algorithm`] records behind a
//! reader-writer lock: lookups proceed concurrently, registrations are
//! serialized against each other and against lookups. Entries are never
//! removed.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::Algorithm;
use crate::digest::{DIGEST_REGEX_PARTS, Digest};
use crate::encoding::{EncodeHex, Encoder};
use crate::error::DigestError;
use crate::hash::{self, HashFn};

/// Grammar for algorithm names.
pub static ALGORITHM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+([+._-][a-z0-9]+)*$").expect("static regex"));

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::with_builtins);

/// Returns the process-wide registry.
pub(crate) fn global() -> &'static Registry {
    &GLOBAL
}

/// Handles to the algorithms registered by [`Registry::with_builtins`].
#[derive(Debug, Clone, Default)]
pub(crate) struct Builtins {
    pub(crate) sha256: Algorithm,
    pub(crate) sha512: Algorithm,
    #[cfg(feature = "hash-blake3")]
    pub(crate) blake3: Algorithm,
    pub(crate) canonical: Algorithm,
}

/// A set of registered hash algorithms.
///
/// The crate-level functions ([`crate::register`], [`crate::lookup`],
/// [`crate::parse`]) use a process-wide instance seeded with the built-in
/// algorithms. Separate instances are useful for isolation in tests.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use oci_digest::{EncodeHex, Registry, hash};
///
/// let registry = Registry::new();
/// let alg = registry.register("sha256", Some(Arc::new(EncodeHex::for_size(32))), Some(hash::sha256))?;
/// assert_eq!(registry.lookup("sha256")?, alg);
/// # Ok::<(), oci_digest::DigestError>(())
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    algorithms: RwLock<HashMap<String, Algorithm>>,
    builtins: Builtins,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in algorithms.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let sha256 = registry.register_builtin("sha256", hash::sha256);
        let sha512 = registry.register_builtin("sha512", hash::sha512);
        #[cfg(feature = "hash-blake3")]
        let blake3 = registry.register_builtin("blake3", hash::blake3);

        registry.builtins = Builtins {
            canonical: sha256.clone(),
            sha256,
            sha512,
            #[cfg(feature = "hash-blake3")]
            blake3,
        };
        registry
    }

    fn register_builtin(&mut self, name: &str, new_fn: HashFn) -> Algorithm {
        let size = new_fn().output_size();
        let alg = Algorithm::new(name, size, Arc::new(EncodeHex::for_size(size)), new_fn);
        debug!("registered built-in digest algorithm {name} ({size} bytes)");
        self.algorithms
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), alg.clone());
        alg
    }

    pub(crate) fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    /// Registers a new hash algorithm.
    ///
    /// The checks run in order: the name must be unused, the name must match
    /// [`ALGORITHM_REGEX`], the encoder must be present, and the hash function
    /// must be present and report a positive output size.
    ///
    /// # Errors
    ///
    /// - [`DigestError::AlgorithmExists`] if the name is taken
    /// - [`DigestError::AlgorithmInvalidName`] if the name breaks the grammar
    /// - [`DigestError::EncodeInterfaceInvalid`] if `enc` is `None`
    /// - [`DigestError::HashFunctionInvalid`] if `new_fn` is `None` or its
    ///   accumulator has a zero output size
    pub fn register(
        &self,
        name: &str,
        enc: Option<Arc<dyn Encoder>>,
        new_fn: Option<HashFn>,
    ) -> Result<Algorithm, DigestError> {
        let mut algorithms = self
            .algorithms
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let result = if algorithms.contains_key(name) {
            Err(DigestError::AlgorithmExists(name.to_string()))
        } else {
            build(name, enc, new_fn)
        };

        match result {
            Ok(alg) => {
                debug!("registered digest algorithm {name} ({} bytes)", alg.size());
                algorithms.insert(name.to_string(), alg.clone());
                Ok(alg)
            }
            Err(e) => {
                debug!("rejected digest algorithm registration: {e}");
                Err(e)
            }
        }
    }

    /// Looks up a previously registered algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::AlgorithmInvalidName`] for an empty name and
    /// [`DigestError::AlgorithmUnknown`] if the name was never registered.
    pub fn lookup(&self, name: &str) -> Result<Algorithm, DigestError> {
        if name.is_empty() {
            return Err(DigestError::AlgorithmInvalidName(String::new()));
        }
        self.algorithms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| DigestError::AlgorithmUnknown(name.to_string()))
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.algorithms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Parses a digest string against the algorithms in this registry.
    ///
    /// See [`crate::parse`] for the accepted grammar.
    pub fn parse(&self, s: &str) -> Result<Digest, DigestError> {
        if s.is_empty() {
            return Ok(Digest::default());
        }
        let caps = DIGEST_REGEX_PARTS
            .captures(s)
            .ok_or_else(|| DigestError::DigestInvalid(s.to_string()))?;
        let (alg_part, enc_part) = match (caps.get(1), caps.get(2)) {
            (Some(a), Some(e)) => (a.as_str(), e.as_str()),
            _ => return Err(DigestError::DigestInvalid(s.to_string())),
        };

        let alg = self.lookup(alg_part)?;
        Digest::from_encoded(&alg, enc_part)
    }
}

/// Checks a new registration in order: name grammar, encoder, hash function.
fn build(
    name: &str,
    enc: Option<Arc<dyn Encoder>>,
    new_fn: Option<HashFn>,
) -> Result<Algorithm, DigestError> {
    if !ALGORITHM_REGEX.is_match(name) {
        return Err(DigestError::AlgorithmInvalidName(name.to_string()));
    }
    let enc = enc.ok_or_else(|| DigestError::EncodeInterfaceInvalid(name.to_string()))?;
    let new_fn = new_fn.ok_or_else(|| DigestError::HashFunctionInvalid(name.to_string()))?;
    let size = new_fn().output_size();
    if size == 0 {
        return Err(DigestError::HashFunctionInvalid(name.to_string()));
    }
    Ok(Algorithm::new(name, size, enc, new_fn))
}
