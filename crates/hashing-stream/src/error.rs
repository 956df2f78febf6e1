use std::io;

use crate::Digest;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("operation not supported: {0}")]
    NotSupported(&'static str),

    #[error("digest mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: Digest, actual: Digest },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(e) => e,
            Error::InvalidArgument(_) => io::Error::new(io::ErrorKind::InvalidInput, e),
            Error::NotSupported(_) => io::Error::new(io::ErrorKind::Unsupported, e),
            Error::InvalidState(_) | Error::Mismatch { .. } => io::Error::other(e),
        }
    }
}
