//! Strongly typed, zero-cost identifier wrappers.
//!
//! `VertexId` and `EdgeId` are dense indices into the graph's SoA `Vec`s.
//! They are assigned by the graph builder in ascending source-id order, so
//! comparing two `VertexId`s gives the same answer as comparing the OSM node
//! ids they were built from.  The inner integer is `pub` for direct indexing,
//! but callers should prefer the `.index()` helpers for clarity.

use std::fmt;

/// Identifier of a source map element (node or way) as supplied by the
/// map-data collaborator.  OSM ids are signed 64-bit.
pub type OsmId = i64;

/// Dense index newtype over an unsigned integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// `MAX` of the inner type; never a real index.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// As a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// `true` unless this is the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// The `INVALID` sentinel.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a graph vertex (one per accepted OSM node).
    pub struct VertexId(u32);
}

typed_id! {
    /// Index of a directed graph edge.
    pub struct EdgeId(u32);
}
