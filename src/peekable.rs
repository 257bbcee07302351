//! Sponge whose reads never touch the held state.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::primitive::{Shake256Sponge, SpongePrimitive};

/// Reusable sponge with repeatable reads.
///
/// Every read squeezes from a throw-away clone of the held state, so reads
/// of any lengths, in any order, return the prefix of the same output
/// stream and never get in the way of further writes.
#[derive(Debug, Clone, Default)]
pub struct PeekableSponge<P = Shake256Sponge> {
    state: P,
}

impl<P: SpongePrimitive + Default> PeekableSponge<P> {
    /// Fresh sponge with nothing absorbed.
    pub fn new() -> Self {
        Self::from_primitive(P::default())
    }
}

impl<P: SpongePrimitive> PeekableSponge<P> {
    /// Wrap an existing primitive, keeping whatever it already absorbed.
    pub fn from_primitive(state: P) -> Self {
        Self { state }
    }

    /// Absorb `data` into the held state.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.state.absorb(data)
    }

    /// Fill `out` with the first `out.len()` bytes of the current output
    /// stream. The held state is left exactly as it was, whatever the
    /// outcome of the squeeze.
    pub fn read(&mut self, out: &mut [u8]) -> Result<usize> {
        self.peek(out)
    }

    /// [`read`](Self::read) through a shared reference.
    pub fn peek(&self, out: &mut [u8]) -> Result<usize> {
        squeeze_snapshot(&self.state, out)
    }

    /// Read `length` bytes into a new buffer; short output is an error.
    pub fn read_vec(&mut self, length: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; length];
        let produced = self.read(&mut out)?;
        ensure_full(produced, length)?;
        Ok(out)
    }

    /// Back to the construction-time empty state.
    pub fn reset(&mut self) {
        debug!("resetting peekable sponge");
        self.state.reset();
    }

    /// Borrow the held primitive.
    pub fn primitive(&self) -> &P {
        &self.state
    }

    /// Unwrap the held primitive.
    pub fn into_inner(self) -> P {
        self.state
    }
}

/// Squeeze from a clone of `state` and drop the clone.
pub(crate) fn squeeze_snapshot<P: SpongePrimitive>(state: &P, out: &mut [u8]) -> Result<usize> {
    let mut snapshot = state.clone();
    let produced = snapshot.squeeze(out)?;
    trace!(requested = out.len(), produced, "peeked");
    Ok(produced)
}

pub(crate) fn ensure_full(produced: usize, requested: usize) -> Result<()> {
    if produced < requested {
        return Err(Error::ShortRead {
            produced,
            requested,
        });
    }
    Ok(())
}
