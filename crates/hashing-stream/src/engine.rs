//! Incremental hash engines.
//!
//! A [`HashEngine`] consumes byte blocks over any number of calls and only
//! produces its digest when finalized. Engines report their framing through
//! [`Capabilities`]; the channel only drives engines that accept a plain byte
//! stream.

use std::fmt;
use std::str::FromStr;

use digest::Digest as DigestAlgorithm;

use crate::Error;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("hash finalization failed: {0}")]
    Finalization(String),
}

/// Framing properties of an engine's transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub can_reuse_transform:           bool,
    pub can_transform_multiple_blocks: bool,
    pub input_block_size:              usize,
    pub output_block_size:             usize,
}

impl Capabilities {
    /// Byte-granular, reusable, multi-block: what every digest engine reports.
    pub const STREAM: Self = Self {
        can_reuse_transform:           true,
        can_transform_multiple_blocks: true,
        input_block_size:              1,
        output_block_size:             1,
    };

    pub fn is_stream_compatible(&self) -> bool {
        self.can_reuse_transform
            && self.can_transform_multiple_blocks
            && self.input_block_size == 1
            && self.output_block_size == 1
    }
}

pub trait HashEngine: Send {
    fn capabilities(&self) -> Capabilities;

    /// Feed bytes without finalizing.
    fn transform_block(&mut self, input: &[u8]);

    /// Feed the last bytes and return the digest. The engine starts over
    /// afterwards.
    fn transform_final(&mut self, input: &[u8]) -> Result<Vec<u8>, EngineError>;

    fn algorithm_name(&self) -> &'static str;
}

/// Adapter for any RustCrypto [`digest::Digest`] implementation.
pub struct DigestEngine<D> {
    state: D,
    name:  &'static str,
}

impl<D: DigestAlgorithm> DigestEngine<D> {
    pub fn new(name: &'static str) -> Self {
        Self {
            state: D::new(),
            name,
        }
    }
}

impl<D: DigestAlgorithm + Send> HashEngine for DigestEngine<D> {
    fn capabilities(&self) -> Capabilities { Capabilities::STREAM }

    fn transform_block(&mut self, input: &[u8]) { self.state.update(input); }

    fn transform_final(&mut self, input: &[u8]) -> Result<Vec<u8>, EngineError> {
        self.state.update(input);
        let state = std::mem::replace(&mut self.state, D::new());
        Ok(state.finalize().to_vec())
    }

    fn algorithm_name(&self) -> &'static str { self.name }
}

pub type Sha256Engine = DigestEngine<sha2::Sha256>;

impl Default for Sha256Engine {
    fn default() -> Self { Self::new(HashAlgorithm::Sha256.as_str()) }
}

#[cfg(feature = "blake3")]
pub struct Blake3Engine(blake3::Hasher);

#[cfg(feature = "blake3")]
impl Default for Blake3Engine {
    fn default() -> Self { Self::new() }
}

#[cfg(feature = "blake3")]
impl Blake3Engine {
    pub fn new() -> Self { Self(blake3::Hasher::new()) }
}

#[cfg(feature = "blake3")]
impl HashEngine for Blake3Engine {
    fn capabilities(&self) -> Capabilities { Capabilities::STREAM }

    fn transform_block(&mut self, input: &[u8]) { self.0.update(input); }

    fn transform_final(&mut self, input: &[u8]) -> Result<Vec<u8>, EngineError> {
        self.0.update(input);
        let digest = self.0.finalize().as_bytes().to_vec();
        self.0.reset();
        Ok(digest)
    }

    fn algorithm_name(&self) -> &'static str { HashAlgorithm::Blake3.as_str() }
}

/// Built-in algorithms a channel can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
    #[cfg(feature = "sha3")]
    Sha3_256,
    #[cfg(feature = "blake3")]
    Blake3,
}

impl HashAlgorithm {
    /// Digest length in bytes.
    pub fn digest_length(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
            #[cfg(feature = "sha3")]
            HashAlgorithm::Sha3_256 => 32,
            #[cfg(feature = "blake3")]
            HashAlgorithm::Blake3 => 32,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            #[cfg(feature = "sha3")]
            HashAlgorithm::Sha3_256 => "sha3-256",
            #[cfg(feature = "blake3")]
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    /// A fresh engine for this algorithm.
    pub fn engine(&self) -> Box<dyn HashEngine> {
        let name = self.as_str();
        match self {
            HashAlgorithm::Sha256 => Box::new(DigestEngine::<sha2::Sha256>::new(name)),
            HashAlgorithm::Sha384 => Box::new(DigestEngine::<sha2::Sha384>::new(name)),
            HashAlgorithm::Sha512 => Box::new(DigestEngine::<sha2::Sha512>::new(name)),
            #[cfg(feature = "sha3")]
            HashAlgorithm::Sha3_256 => Box::new(DigestEngine::<sha3::Sha3_256>::new(name)),
            #[cfg(feature = "blake3")]
            HashAlgorithm::Blake3 => Box::new(Blake3Engine::new()),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "sha384" | "sha-384" => Ok(HashAlgorithm::Sha384),
            "sha512" | "sha-512" => Ok(HashAlgorithm::Sha512),
            #[cfg(feature = "sha3")]
            "sha3-256" | "sha3_256" => Ok(HashAlgorithm::Sha3_256),
            #[cfg(feature = "blake3")]
            "blake3" => Ok(HashAlgorithm::Blake3),
            _ => Err(Error::InvalidArgument("unsupported hash algorithm")),
        }
    }
}
