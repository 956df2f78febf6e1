//! Sequential byte-stream decorator that digests everything passing through.
//!
//! [`HashingChannel`] wraps a reader or a writer and feeds every transferred
//! byte to an incremental hash engine. Payload bytes are never modified. The
//! digest is produced once, when the channel is closed.
//!
//! # Key Features
//!
//! - **Single pass**: bytes are hashed while they move, no second read
//! - **Full reads**: partial reads from the underlying source are retried, so a
//!   short read always means end of data
//! - **Degrades, never blocks I/O**: an unusable engine or a failed finalization
//!   leaves the digest unset instead of failing the transfer
//! - **Extensible**: any [`HashEngine`] can be plugged in; RustCrypto digests
//!   are adapted by [`DigestEngine`]
//!
//! # Example
//!
//! ```
//! use std::io::Write;
//! use hashing_stream::HashingChannel;
//!
//! let mut sink: Vec<u8> = Vec::new();
//! let mut channel = HashingChannel::writing(&mut sink);
//! channel.write_all(b"abc")?;
//! channel.close();
//!
//! let digest = channel.digest().cloned().expect("sha256 is always available");
//! drop(channel);
//!
//! assert_eq!(sink, b"abc");
//! assert_eq!(
//!     digest.to_hex(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! # Ok::<(), hashing_stream::Error>(())
//! ```

pub use self::channel::{HashingChannel, HashingChannelBuilder};
pub use self::engine::{
    Capabilities, DigestEngine, EngineError, HashAlgorithm, HashEngine, Sha256Engine,
};
pub use self::error::{Error, Result};
pub use self::options::{Direction, HashingOptions};
pub use self::output::Digest;

#[cfg(feature = "blake3")]
pub use self::engine::Blake3Engine;

mod channel;
mod engine;
mod error;
mod options;
mod output;
