//! `std::io` adapters, so the wrappers slot in wherever a reader or writer
//! is expected.
//!
//! `io::Write` is plain absorption. `io::Read` is not a cursor: each `read`
//! call is one independent wrapper read. On the peekable sponge every call
//! starts again at the beginning of the output stream; on the self-mutating
//! sponge every call absorbs its own length marker first. Adapters that split
//! a read into several calls (`take`, `read_to_end`, `BufReader`, `io::copy`)
//! therefore stitch together restarted prefixes rather than one contiguous
//! stream. For `n` contiguous bytes use `read_vec(n)` or a single `read` into
//! a buffer of length `n` (`read_exact` on a fresh buffer does exactly one
//! call as long as the primitive never short-produces).

use std::io;

use crate::mutating::SelfMutatingPeekableSponge;
use crate::peekable::PeekableSponge;
use crate::primitive::SpongePrimitive;

macro_rules! impl_io {
    ($name:ident) => {
        impl<P: SpongePrimitive> io::Write for $name<P> {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                Ok($name::write(self, buf)?)
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        /// One wrapper read per call; successive calls do not continue
        /// where the previous one stopped.
        impl<P: SpongePrimitive> io::Read for $name<P> {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                Ok($name::read(self, buf)?)
            }
        }
    };
}

impl_io!(PeekableSponge);
impl_io!(SelfMutatingPeekableSponge);
