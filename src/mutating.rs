//! Sponge whose reads are folded back into its own history.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::peekable::{PeekableSponge, ensure_full, squeeze_snapshot};
use crate::primitive::{Shake256Sponge, SpongePrimitive};

/// Width of the length marker absorbed before each read.
pub const MARKER_LEN: usize = 4;

/// Reusable sponge whose reads mutate the held state.
///
/// Before each read the requested length is absorbed as a little‑endian
/// `u32`; the output is then squeezed from a clone of the marker‑updated
/// state. The squeeze itself leaves no trace, but the marker does, so two
/// consecutive reads of the same length return different bytes.
///
/// A read whose marker cannot be absorbed in full fails with
/// [`Error::StateMutation`]. Whatever part of the marker the primitive took
/// stays absorbed; there is no rollback.
///
/// [`Clone`] keeps the self‑mutating behaviour. Use
/// [`to_peekable`](Self::to_peekable) for a copy with repeatable reads.
#[derive(Debug, Clone, Default)]
pub struct SelfMutatingPeekableSponge<P = Shake256Sponge> {
    state: P,
}

impl<P: SpongePrimitive + Default> SelfMutatingPeekableSponge<P> {
    /// Fresh sponge with nothing absorbed.
    pub fn new() -> Self {
        Self::from_primitive(P::default())
    }
}

impl<P: SpongePrimitive> SelfMutatingPeekableSponge<P> {
    /// Wrap an existing primitive, keeping whatever it already absorbed.
    pub fn from_primitive(state: P) -> Self {
        Self { state }
    }

    /// Absorb `data` into the held state.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.state.absorb(data)
    }

    /// Absorb the length marker for `out.len()`, then fill `out` from a
    /// snapshot of the updated state.
    ///
    /// On a marker failure nothing is written to `out`.
    pub fn read(&mut self, out: &mut [u8]) -> Result<usize> {
        self.absorb_marker(out.len())?;
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
        debug!("resetting self-mutating sponge");
        self.state.reset();
    }

    /// Copy of the current state behind a non-mutating wrapper.
    pub fn to_peekable(&self) -> PeekableSponge<P> {
        debug!("downgrading self-mutating sponge to peekable");
        PeekableSponge::from_primitive(self.state.clone())
    }

    /// Borrow the held primitive.
    pub fn primitive(&self) -> &P {
        &self.state
    }

    /// Unwrap the held primitive.
    pub fn into_inner(self) -> P {
        self.state
    }

    fn absorb_marker(&mut self, length: usize) -> Result<()> {
        let marker = u32::try_from(length)
            .map_err(|_| Error::MarkerOverflow { length })?
            .to_le_bytes();
        match self.state.absorb(&marker) {
            Ok(MARKER_LEN) => Ok(()),
            Ok(absorbed) => {
                warn!(absorbed, expected = MARKER_LEN, "length marker short-absorbed");
                Err(Error::StateMutation {
                    absorbed,
                    expected: MARKER_LEN,
                    source: None,
                })
            }
            Err(err) => {
                warn!(error = %err, "length marker rejected");
                Err(Error::StateMutation {
                    absorbed: err.partial_count(),
                    expected: MARKER_LEN,
                    source: Some(Box::new(err)),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Sha3rm = SelfMutatingPeekableSponge;

    fn hex_read(sp: &mut Sha3rm, len: usize) -> String {
        hex::encode(sp.read_vec(len).unwrap())
    }

    #[test]
    fn repeated_reads_differ() {
        let mut sp = Sha3rm::new();
        sp.write(b"abc").unwrap();
        assert_eq!(hex_read(&mut sp, 4), "c932b7b8");
        assert_eq!(hex_read(&mut sp, 4), "d6dff933");
    }

    #[test]
    fn read_equals_peek_after_explicit_marker() {
        let mut sp = Sha3rm::new();
        sp.write(b"abc").unwrap();
        let mutated = hex_read(&mut sp, 4);

        let mut plain: PeekableSponge = PeekableSponge::new();
        plain.write(b"abc").unwrap();
        plain.write(&4u32.to_le_bytes()).unwrap();
        assert_eq!(hex::encode(plain.read_vec(4).unwrap()), mutated);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn marker_overflow_leaves_state_alone() {
        let sp = Sha3rm::new();
        let mut probe = sp.clone();
        let err = probe.absorb_marker(u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err, Error::MarkerOverflow { .. }));
        assert_eq!(
            probe.to_peekable().read_vec(8).unwrap(),
            sp.to_peekable().read_vec(8).unwrap()
        );
    }

    #[test]
    fn clone_keeps_mutating_reads() {
        let mut sp = Sha3rm::new();
        sp.write(b"abc").unwrap();
        let mut copy = sp.clone();
        assert_eq!(hex_read(&mut copy, 4), "c932b7b8");
        assert_eq!(hex_read(&mut copy, 4), "d6dff933");
        // the original never saw the clone's markers
        assert_eq!(hex_read(&mut sp, 4), "c932b7b8");
    }

    #[test]
    fn to_peekable_reads_are_repeatable() {
        let mut sp = Sha3rm::new();
        sp.write(b"abc").unwrap();
        let mut peek = sp.to_peekable();
        assert_eq!(hex::encode(peek.read_vec(4).unwrap()), "48336660");
        assert_eq!(hex::encode(peek.read_vec(4).unwrap()), "48336660");
    }

    #[test]
    fn reset_forgets_markers() {
        let mut sp = Sha3rm::new();
        sp.write(b"abc").unwrap();
        hex_read(&mut sp, 16);
        sp.reset();
        sp.write(b"abc").unwrap();
        assert_eq!(hex_read(&mut sp, 4), "c932b7b8");
    }
}
