//! Sponge primitives: the black box the reusable wrappers are built on.

use core::fmt;

use digest::{ExtendableOutput, Update, XofReader};
use tracing::trace;

use crate::error::{Error, Result};

/// Capability set every sponge the wrappers can hold must provide.
///
/// `Clone` is the primitive's snapshot operation: a clone must be fully
/// independent of its source.
pub trait SpongePrimitive: Clone {
    /// Absorb `input`, returning how many bytes were taken. A short count
    /// without an error is allowed.
    fn absorb(&mut self, input: &[u8]) -> Result<usize>;

    /// Fill `output` from the squeeze stream and advance the output cursor.
    /// Returns the number of bytes produced.
    fn squeeze(&mut self, output: &mut [u8]) -> Result<usize>;

    /// Drop all absorbed input and squeeze progress.
    fn reset(&mut self);
}

//  ---------------------------------------------------------------------------
//  XOF-backed sponge
//  ---------------------------------------------------------------------------

/// Plain, non-reusable sponge over any `digest` extendable-output function.
///
/// Absorbs until the first squeeze, which finalises the input into an XOF
/// reader; later squeezes continue the same output stream. Absorbing once
/// squeezing has started is an error, as with any single-use SHAKE object.
pub struct XofSponge<H: ExtendableOutput> {
    hasher: H,
    reader: Option<H::Reader>,
}

/// SHAKE128 sponge.
pub type Shake128Sponge = XofSponge<sha3::Shake128>;
/// SHAKE256 sponge – the default primitive.
pub type Shake256Sponge = XofSponge<sha3::Shake256>;

impl<H> XofSponge<H>
where
    H: Default + ExtendableOutput,
{
    pub fn new() -> Self {
        Self {
            hasher: H::default(),
            reader: None,
        }
    }
}

impl<H: ExtendableOutput> XofSponge<H> {
    /// `true` once output has been squeezed and the input is sealed.
    pub fn is_squeezing(&self) -> bool {
        self.reader.is_some()
    }
}

impl<H> Default for XofSponge<H>
where
    H: Default + ExtendableOutput,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Clone for XofSponge<H>
where
    H: Clone + ExtendableOutput,
    H::Reader: Clone,
{
    fn clone(&self) -> Self {
        Self {
            hasher: self.hasher.clone(),
            reader: self.reader.clone(),
        }
    }
}

impl<H: ExtendableOutput> fmt::Debug for XofSponge<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XofSponge")
            .field("squeezing", &self.is_squeezing())
            .finish_non_exhaustive()
    }
}

impl<H> SpongePrimitive for XofSponge<H>
where
    H: Default + Clone + Update + ExtendableOutput,
    H::Reader: Clone,
{
    fn absorb(&mut self, input: &[u8]) -> Result<usize> {
        if self.is_squeezing() {
            return Err(Error::absorb(0, input.len(), "absorb after squeeze"));
        }
        self.hasher.update(input);
        trace!(bytes = input.len(), "absorbed");
        Ok(input.len())
    }

    fn squeeze(&mut self, output: &mut [u8]) -> Result<usize> {
        let hasher = &mut self.hasher;
        let reader = self
            .reader
            .get_or_insert_with(|| core::mem::take(hasher).finalize_xof());
        reader.read(output);
        trace!(bytes = output.len(), "squeezed");
        Ok(output.len())
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
