use std::fmt;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, trace, warn};

use crate::{Digest, Direction, Error, HashAlgorithm, HashEngine, HashingOptions, Result};

const CLOSED: Error = Error::InvalidState("channel is closed");

/// Sequential decorator that digests every byte crossing it.
///
/// Bytes flow in one direction, fixed at construction. Reads hash the bytes
/// after they arrive from the underlying channel, writes hash them before
/// forwarding. The digest becomes available once [`close`](Self::close) has
/// run; dropping the channel closes it too.
///
/// An engine that cannot hash a plain byte stream is discarded at
/// construction and the channel keeps passing data through without hashing.
/// In that case, and when finalization fails, [`digest`](Self::digest)
/// stays `None`.
pub struct HashingChannel<C> {
    inner:       Option<C>,
    engine:      Option<Box<dyn HashEngine>>,
    direction:   Direction,
    digest:      Option<Digest>,
    transferred: u64,
}

impl<C> HashingChannel<C> {
    pub fn builder() -> HashingChannelBuilder<C> { HashingChannelBuilder::new() }

    /// Read-mode channel hashing with SHA-256.
    pub fn reading(inner: C) -> Self {
        Self::new(inner, Direction::Reading, HashAlgorithm::default().engine())
    }

    /// Write-mode channel hashing with SHA-256.
    pub fn writing(inner: C) -> Self {
        Self::new(inner, Direction::Writing, HashAlgorithm::default().engine())
    }

    pub fn new(inner: C, direction: Direction, engine: Box<dyn HashEngine>) -> Self {
        let capabilities = engine.capabilities();
        let engine = if capabilities.is_stream_compatible() {
            debug!(%direction, algorithm = engine.algorithm_name(), "hashing channel opened");
            Some(engine)
        } else {
            warn!(
                %direction,
                algorithm = engine.algorithm_name(),
                ?capabilities,
                "hash engine cannot process a byte stream, passing data through unhashed"
            );
            None
        };

        Self {
            inner: Some(inner),
            engine,
            direction,
            digest: None,
            transferred: 0,
        }
    }

    /// Finalized digest, or `None` before close, without a usable engine, or
    /// when finalization failed.
    pub fn digest(&self) -> Option<&Digest> { self.digest.as_ref() }

    pub fn is_hashing(&self) -> bool { self.engine.is_some() }

    pub fn is_closed(&self) -> bool { self.inner.is_none() }

    /// Bytes moved through the channel so far, hashed or not.
    pub fn bytes_transferred(&self) -> u64 { self.transferred }

    pub fn direction(&self) -> Direction { self.direction }

    pub fn can_read(&self) -> bool { self.direction.can_read() }

    pub fn can_write(&self) -> bool { self.direction.can_write() }

    pub fn can_seek(&self) -> bool { false }

    pub fn get_ref(&self) -> Option<&C> { self.inner.as_ref() }

    pub fn seek(&mut self, _pos: SeekFrom) -> Result<u64> { Err(Error::NotSupported("seek")) }

    pub fn set_len(&mut self, _len: u64) -> Result<()> { Err(Error::NotSupported("set_len")) }

    pub fn set_position(&mut self, _pos: u64) -> Result<()> {
        Err(Error::NotSupported("set_position"))
    }

    /// Finalize the digest and release the underlying channel.
    ///
    /// Runs once; later calls do nothing. Never fails: a finalization error,
    /// or a panic inside the engine, is logged and leaves the digest unset.
    pub fn close(&mut self) {
        let Some(inner) = self.inner.take() else {
            return;
        };

        if let Some(mut engine) = self.engine.take() {
            let algorithm = engine.algorithm_name();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| engine.transform_final(&[])));
            match outcome {
                Ok(Ok(bytes)) => self.digest = Some(Digest::new(bytes)),
                Ok(Err(e)) => error!(
                    algorithm,
                    error = %e,
                    "hash finalization failed, digest unavailable"
                ),
                Err(_) => error!(
                    algorithm,
                    "hash engine panicked during finalization, digest unavailable"
                ),
            }
        }

        debug!(
            direction = %self.direction,
            bytes = self.transferred,
            digest = ?self.digest,
            "hashing channel closed"
        );
        drop(inner);
    }

    fn inner_mut(&mut self) -> Result<&mut C> { self.inner.as_mut().ok_or(CLOSED) }
}

impl<C: Read> HashingChannel<C> {
    /// Fill `buf` from the underlying channel, retrying partial reads.
    ///
    /// Returns fewer than `buf.len()` bytes only at end of data.
    ///
    /// If the underlying channel fails after a partial read, the bytes already
    /// taken from it are still hashed and counted before the error is returned,
    /// so the digest keeps tracking everything consumed from the channel.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.direction.can_read() {
            return Err(Error::InvalidState("read on a writing channel"));
        }
        let inner = self.inner.as_mut().ok_or(CLOSED)?;

        let mut total = 0;
        let mut failure = None;
        while total < buf.len() {
            match inner.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if total > 0 {
            if let Some(engine) = self.engine.as_mut() {
                engine.transform_block(&buf[..total]);
            }
        }
        self.transferred += total as u64;

        if let Some(e) = failure {
            warn!(read = total, error = %e, "hashing channel read failed after partial data");
            return Err(e.into());
        }
        trace!(requested = buf.len(), read = total, "hashing channel read");
        Ok(total)
    }
}

impl<C: Write> HashingChannel<C> {
    /// Hash `buf`, then write all of it to the underlying channel.
    ///
    /// On a failed write the engine has already seen `buf`; the digest of a
    /// failed stream is not meaningful.
    pub fn write(&mut self, buf: &[u8]) -> Result<()> {
        if !self.direction.can_write() {
            return Err(Error::InvalidState("write on a reading channel"));
        }
        let inner = self.inner.as_mut().ok_or(CLOSED)?;

        if !buf.is_empty() {
            if let Some(engine) = self.engine.as_mut() {
                engine.transform_block(buf);
            }
        }
        inner.write_all(buf)?;

        self.transferred += buf.len() as u64;
        trace!(written = buf.len(), "hashing channel write");
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> { Ok(self.inner_mut()?.flush()?) }
}

impl<C: Seek> HashingChannel<C> {
    /// Position of the underlying channel.
    pub fn position(&mut self) -> Result<u64> { Ok(self.inner_mut()?.stream_position()?) }

    /// Length of the underlying channel. Its position is restored afterwards,
    /// also when seeking to the end fails.
    pub fn length(&mut self) -> Result<u64> {
        let inner = self.inner_mut()?;
        let pos = inner.stream_position()?;
        let end = inner.seek(SeekFrom::End(0));
        let restored = inner.seek(SeekFrom::Start(pos));
        let end = end?;
        restored?;
        Ok(end)
    }
}

impl<C> Drop for HashingChannel<C> {
    fn drop(&mut self) { self.close(); }
}

impl<C: Read> Read for HashingChannel<C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        HashingChannel::read(self, buf).map_err(Into::into)
    }
}

impl<C: Write> Write for HashingChannel<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        HashingChannel::write(self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { HashingChannel::flush(self).map_err(Into::into) }
}

impl<C> fmt::Debug for HashingChannel<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashingChannel")
            .field("direction", &self.direction)
            .field("hashing", &self.is_hashing())
            .field("closed", &self.is_closed())
            .field("transferred", &self.transferred)
            .field("digest", &self.digest)
            .finish()
    }
}

/// Builder for a [`HashingChannel`] with a non-default engine or direction.
pub struct HashingChannelBuilder<C> {
    channel: Option<C>,
    options: HashingOptions,
    engine:  Option<Box<dyn HashEngine>>,
}

impl<C> Default for HashingChannelBuilder<C> {
    fn default() -> Self { Self::new() }
}

impl<C> HashingChannelBuilder<C> {
    pub fn new() -> Self {
        Self {
            channel: None,
            options: HashingOptions::new(),
            engine:  None,
        }
    }

    pub fn channel(mut self, channel: C) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn options(mut self, options: HashingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.options = self.options.direction(direction);
        self
    }

    pub fn algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.options = self.options.algorithm(algorithm);
        self
    }

    /// Use a custom engine. Takes precedence over the configured algorithm.
    pub fn engine(mut self, engine: Box<dyn HashEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn build(self) -> Result<HashingChannel<C>> {
        let channel = self
            .channel
            .ok_or(Error::InvalidArgument("underlying channel is required"))?;
        let engine = self
            .engine
            .unwrap_or_else(|| self.options.get_algorithm().engine());
        Ok(HashingChannel::new(
            channel,
            self.options.get_direction(),
            engine,
        ))
    }
}
