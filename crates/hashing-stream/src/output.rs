use std::fmt;

use crate::{Error, Result};

/// Finalized output of a hash engine.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Digest(Vec<u8>);

impl Digest {
    pub fn new(bytes: Vec<u8>) -> Self { Self(bytes) }

    pub fn from_hex(hex: &str) -> Result<Self> {
        hex::decode(hex.trim())
            .map(Self)
            .map_err(|_| Error::InvalidArgument("digest is not valid hex"))
    }

    pub fn as_bytes(&self) -> &[u8] { &self.0 }

    pub fn into_bytes(self) -> Vec<u8> { self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn to_hex(&self) -> String { hex::encode(&self.0) }

    /// Compare against an expected value.
    pub fn verify(&self, expected: &[u8]) -> Result<()> {
        if self.0 == expected {
            Ok(())
        } else {
            Err(Error::Mismatch {
                expected: Digest(expected.to_vec()),
                actual:   self.clone(),
            })
        }
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] { &self.0 }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self { Self(bytes) }
}

impl PartialEq<[u8]> for Digest {
    fn eq(&self, other: &[u8]) -> bool { self.0 == other }
}

impl PartialEq<&[u8]> for Digest {
    fn eq(&self, other: &&[u8]) -> bool { self.0 == *other }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.to_hex()) }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Digest").field(&self.to_hex()).finish()
    }
}
