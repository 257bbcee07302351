// SPDX‑License‑Identifier: MIT
//! # `reusable‑sponge`
//!
//! Reusable, *peekable* extendable‑output sponges. A plain SHAKE object is
//! single‑use: once output has been squeezed the input is sealed and every
//! squeeze moves the output cursor forward. The wrappers in this crate keep
//! absorbing after a read and let the same output be read again.
//!
//! ## High‑level architecture
//! * **Primitive** – [`SpongePrimitive`] is the black box: absorb, squeeze,
//!   clone, reset. [`XofSponge`] implements it for any `digest` XOF
//!   (`Shake128`, `Shake256` from the [`sha3`] crate).
//! * **Peekable reads** – [`PeekableSponge`] squeezes from a clone of its
//!   state, so a read never changes what later reads or writes produce.
//! * **Self‑mutating reads** – [`SelfMutatingPeekableSponge`] absorbs the
//!   read length (4 bytes, little‑endian) before each peek, so every read
//!   becomes part of the hashed history.
//! * **Runtime choice** – [`Variant`] and the object‑safe [`ReusableSponge`]
//!   trait, plus `std::io::{Read, Write}` for both wrappers.
//!
//! ```
//! use reusable_sponge::{PeekableSponge, SelfMutatingPeekableSponge};
//!
//! let mut sp: PeekableSponge = PeekableSponge::new();
//! sp.write(b"abc")?;
//! assert_eq!(sp.read_vec(4)?, sp.read_vec(4)?);
//!
//! let mut sp: SelfMutatingPeekableSponge = SelfMutatingPeekableSponge::new();
//! sp.write(b"abc")?;
//! assert_ne!(sp.read_vec(4)?, sp.read_vec(4)?);
//! # Ok::<(), reusable_sponge::Error>(())
//! ```
//!
//! Neither wrapper is meant to be shared between threads without a lock;
//! hand a [`Clone`] to the other thread instead.

pub mod error;
pub mod io;
pub mod mutating;
pub mod peekable;
pub mod primitive;
pub mod variant;

pub use error::{Error, Result};
pub use mutating::{MARKER_LEN, SelfMutatingPeekableSponge};
pub use peekable::PeekableSponge;
pub use primitive::{Shake128Sponge, Shake256Sponge, SpongePrimitive, XofSponge};
pub use variant::{ReusableSponge, UnknownVariant, Variant};

/// Peekable SHAKE256 sponge.
pub type Sha3r = PeekableSponge<Shake256Sponge>;
/// Self-mutating SHAKE256 sponge.
pub type Sha3rm = SelfMutatingPeekableSponge<Shake256Sponge>;
