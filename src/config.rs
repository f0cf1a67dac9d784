//! Retrieval mode selection.

/// How `get` verifies the segments between branch points.
///
/// Every other operation always verifies fully; this only affects pure lookups.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Retrieval {
    /// Compare every byte of every prefix on the way down. Lookups are exact.
    Radix,
    /// Only the byte selecting each child is checked. A key that differs from a stored key
    /// solely inside unverified segments resolves to the stored key's value.
    Optimistic,
}

impl Default for Retrieval {
    /// `Optimistic`, unless the crate is built with the `radix_mode` feature.
    fn default() -> Self {
        if cfg!(feature = "radix_mode") {
            Retrieval::Radix
        } else {
            Retrieval::Optimistic
        }
    }
}
