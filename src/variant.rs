//! Runtime selection between the two reusable sponges.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mutating::SelfMutatingPeekableSponge;
use crate::peekable::PeekableSponge;
use crate::primitive::{Shake256Sponge, SpongePrimitive};

/// Object-safe view of a reusable sponge, for callers that pick the read
/// semantics at runtime.
pub trait ReusableSponge {
    /// Absorb `data`; see the concrete wrapper for details.
    fn write(&mut self, data: &[u8]) -> Result<usize>;
    /// Fill `out` from the output stream without consuming it.
    fn read(&mut self, out: &mut [u8]) -> Result<usize>;
    /// Back to the empty state.
    fn reset(&mut self);
    /// Independent copy with the same read semantics.
    fn box_clone(&self) -> Box<dyn ReusableSponge>;
    /// Which read semantics this sponge has.
    fn variant(&self) -> Variant;
}

impl Clone for Box<dyn ReusableSponge> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

impl fmt::Debug for dyn ReusableSponge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReusableSponge")
            .field("variant", &self.variant())
            .finish_non_exhaustive()
    }
}

macro_rules! impl_reusable {
    ($name:ident, $variant:expr) => {
        impl<P: SpongePrimitive + 'static> ReusableSponge for $name<P> {
            fn write(&mut self, data: &[u8]) -> Result<usize> {
                $name::write(self, data)
            }

            fn read(&mut self, out: &mut [u8]) -> Result<usize> {
                $name::read(self, out)
            }

            fn reset(&mut self) {
                $name::reset(self)
            }

            fn box_clone(&self) -> Box<dyn ReusableSponge> {
                Box::new(self.clone())
            }

            fn variant(&self) -> Variant {
                $variant
            }
        }
    };
}

impl_reusable!(PeekableSponge, Variant::Peekable);
impl_reusable!(SelfMutatingPeekableSponge, Variant::SelfMutating);

/// Read semantics of a reusable sponge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Reads never change the state.
    Peekable,
    /// Reads absorb a length marker first.
    #[default]
    SelfMutating,
}

impl Variant {
    /// Empty SHAKE256-backed sponge with these semantics.
    pub fn build(self) -> Box<dyn ReusableSponge> {
        self.build_with(Shake256Sponge::new())
    }

    /// Wrap `primitive` with these semantics.
    pub fn build_with<P: SpongePrimitive + 'static>(self, primitive: P) -> Box<dyn ReusableSponge> {
        match self {
            Self::Peekable => Box::new(PeekableSponge::from_primitive(primitive)),
            Self::SelfMutating => Box::new(SelfMutatingPeekableSponge::from_primitive(primitive)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Peekable => "peekable",
            Self::SelfMutating => "self-mutating",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised variant name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sponge variant `{0}` (expected `peekable` or `self-mutating`)")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "peekable" | "sha3r" => Ok(Self::Peekable),
            "self-mutating" | "mutating" | "sha3rm" => Ok(Self::SelfMutating),
            _ => Err(UnknownVariant(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_hex(sp: &mut dyn ReusableSponge, len: usize) -> String {
        let mut out = vec![0u8; len];
        assert_eq!(sp.read(&mut out).unwrap(), len);
        hex::encode(out)
    }

    #[test]
    fn build_picks_semantics() {
        let mut peek = Variant::Peekable.build();
        let mut mutating = Variant::SelfMutating.build();
        for sp in [&mut peek, &mut mutating] {
            sp.write(b"abc").unwrap();
        }
        assert_eq!(read_hex(peek.as_mut(), 4), "48336660");
        assert_eq!(read_hex(peek.as_mut(), 4), "48336660");
        assert_eq!(read_hex(mutating.as_mut(), 4), "c932b7b8");
        assert_eq!(read_hex(mutating.as_mut(), 4), "d6dff933");
    }

    #[test]
    fn boxed_clone_keeps_variant() {
        let mut sp = Variant::SelfMutating.build();
        sp.write(b"abc").unwrap();
        let mut copy = sp.clone();
        assert_eq!(copy.variant(), Variant::SelfMutating);
        assert_eq!(read_hex(copy.as_mut(), 4), "c932b7b8");
        assert_eq!(read_hex(sp.as_mut(), 4), "c932b7b8");
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("peekable".parse::<Variant>().unwrap(), Variant::Peekable);
        assert_eq!(" SHA3RM ".parse::<Variant>().unwrap(), Variant::SelfMutating);
        assert!("sha2".parse::<Variant>().is_err());
        for v in [Variant::Peekable, Variant::SelfMutating] {
            assert_eq!(v.to_string().parse::<Variant>().unwrap(), v);
        }
        assert_eq!(Variant::default(), Variant::SelfMutating);
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&Variant::SelfMutating).unwrap();
        assert_eq!(json, "\"self-mutating\"");
        let back: Variant = serde_json::from_str("\"peekable\"").unwrap();
        assert_eq!(back, Variant::Peekable);
    }
}
