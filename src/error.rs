//! Error type shared by the primitives and both reusable wrappers.
//!
//! Every failing operation reports how far it got: absorb errors carry the
//! number of bytes that made it into the state, squeeze errors the number of
//! output bytes that were produced. A count is never a success signal on its
//! own; callers must check the `Result` as well.

use std::io;

/// Crate-wide result alias.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failure modes of a sponge primitive or of a reusable wrapper around one.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The primitive rejected input, possibly after taking part of it.
    #[error("absorb failed after {absorbed}/{requested} bytes: {reason}")]
    Absorb {
        /// Bytes that were absorbed before the failure.
        absorbed: usize,
        /// Bytes the caller asked to absorb.
        requested: usize,
        /// Primitive-specific description.
        reason: String,
    },
    /// The primitive could not produce the requested output.
    #[error("squeeze failed after {produced}/{requested} bytes: {reason}")]
    Squeeze {
        /// Output bytes written before the failure.
        produced: usize,
        /// Output bytes the caller asked for.
        requested: usize,
        /// Primitive-specific description.
        reason: String,
    },
    /// The length marker of a self-mutating read did not fully reach the
    /// state. The read produced no output, but the part of the marker that
    /// was absorbed stays absorbed.
    #[error("read aborted: only {absorbed}/{expected} bytes written in state mutation")]
    StateMutation {
        /// Marker bytes absorbed before the abort.
        absorbed: usize,
        /// Marker width.
        expected: usize,
        /// Primitive error, when the primitive reported one.
        #[source]
        source: Option<Box<Error>>,
    },
    /// The read length does not fit the 4-byte marker.
    #[error("read of {length} bytes cannot be encoded as a 32-bit length marker")]
    MarkerOverflow {
        /// Requested read length.
        length: usize,
    },
    /// The primitive short-produced without reporting an error.
    #[error("short read: got {produced}/{requested} bytes")]
    ShortRead {
        /// Output bytes produced.
        produced: usize,
        /// Output bytes requested.
        requested: usize,
    },
}

impl Error {
    /// Shorthand for [`Error::Absorb`].
    pub fn absorb(absorbed: usize, requested: usize, reason: impl Into<String>) -> Self {
        Self::Absorb {
            absorbed,
            requested,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Error::Squeeze`].
    pub fn squeeze(produced: usize, requested: usize, reason: impl Into<String>) -> Self {
        Self::Squeeze {
            produced,
            requested,
            reason: reason.into(),
        }
    }

    /// Number of bytes the failed operation still managed to move, whether
    /// absorbed or produced.
    pub fn partial_count(&self) -> usize {
        match self {
            Self::Absorb { absorbed, .. } | Self::StateMutation { absorbed, .. } => *absorbed,
            Self::Squeeze { produced, .. } | Self::ShortRead { produced, .. } => *produced,
            Self::MarkerOverflow { .. } => 0,
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match err {
            Error::MarkerOverflow { .. } => io::ErrorKind::InvalidInput,
            Error::ShortRead { .. } => io::ErrorKind::UnexpectedEof,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}
