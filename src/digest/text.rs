//! Text marshaling hooks for [`Digest`].
//!
//! These let a `Digest` act as a plain string scalar inside larger
//! serialized records. With the `serde` feature the same rules back the
//! `Serialize` and `Deserialize` impls.

use bytes::{BufMut, Bytes, BytesMut};

use super::Digest;
use crate::algorithm::global;
use crate::error::DigestError;

impl Digest {
    /// Appends `algorithm:encoded` to `buf`.
    ///
    /// The zero value appends nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::DigestInvalid`] if exactly one of the two parts
    /// is empty; `buf` is left untouched.
    pub fn append_text<B: BufMut>(&self, buf: &mut B) -> Result<(), DigestError> {
        if self.is_zero() {
            return Ok(());
        }
        if self.alg.is_empty() || self.enc.is_empty() {
            return Err(DigestError::DigestInvalid(format!(
                "{}:{}",
                self.alg, self.enc
            )));
        }
        buf.put_slice(self.alg.as_bytes());
        buf.put_u8(b':');
        buf.put_slice(self.enc.as_bytes());
        Ok(())
    }

    /// Returns the text encoding of the digest.
    ///
    /// Equivalent to [`Digest::append_text`] into a fresh buffer.
    pub fn marshal_text(&self) -> Result<Bytes, DigestError> {
        let mut buf = BytesMut::with_capacity(self.alg.len() + self.enc.len() + 1);
        self.append_text(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Replaces the digest with the result of parsing `text`.
    ///
    /// On error the digest is left unchanged.
    pub fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), DigestError> {
        let s = std::str::from_utf8(text)
            .map_err(|_| DigestError::DigestInvalid(String::from_utf8_lossy(text).into_owned()))?;
        *self = global().parse(s)?;
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Digest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.marshal_text().map_err(serde::ser::Error::custom)?;
        // append_text only writes the algorithm name, ':' and validated text
        let s = std::str::from_utf8(&text).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Digest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DigestVisitor;

        impl serde::de::Visitor<'_> for DigestVisitor {
            type Value = Digest;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a digest string of the form algorithm:encoded")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Digest, E> {
                global().parse(v).map_err(E::custom)
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Digest, E> {
                let mut d = Digest::default();
                d.unmarshal_text(v).map_err(E::custom)?;
                Ok(d)
            }
        }

        deserializer.deserialize_str(DigestVisitor)
    }
}
