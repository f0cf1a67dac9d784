//! # optimist-radix
//!
//! A radix tree keyed by strings, with an optional *optimistic* retrieval mode.
//!
//! In optimistic mode [`OptimisticRadixTree::get`] only checks the byte that selects each child
//! on the way down and trusts lengths for everything in between. Workloads whose keys share long
//! segments skip most of the comparison work; the price is that a key that was never stored can
//! resolve to the value of a stored key with the same branching bytes and segment lengths.
//! Insertion, removal and [`OptimisticRadixTree::contains`] always verify every byte.
//!
//! The default mode is [`Retrieval::Optimistic`], or [`Retrieval::Radix`] when the crate is
//! built with the `radix_mode` feature. Either can be picked per tree with
//! [`OptimisticRadixTree::with_retrieval`].
//!
//! ```rust
//! use optimist_radix::{OptimisticRadixTree, Retrieval};
//!
//! let mut tree = OptimisticRadixTree::with_retrieval(Retrieval::Radix);
//! tree.insert("a", 1);
//! tree.insert("b", 2);
//! tree.insert("a", 3);
//!
//! // Most recently touched first.
//! let entries: Vec<_> = tree.iter().collect();
//! assert_eq!(entries, vec![("a", &3), ("b", &2)]);
//!
//! let err = tree.get("c").unwrap_err();
//! assert_eq!(err.key(), "c");
//! ```

mod compare;
pub mod config;
mod debug;
pub mod error;
pub mod iter;
mod mapping;
mod node;
mod partials;
pub mod stats;
mod tracking;
pub mod tree;
pub mod utils;

#[cfg(test)]
mod proptests;

pub use config::Retrieval;
pub use debug::TreeDisplay;
pub use error::NoSuchKey;
pub use iter::{Cursor, CursorMut, Iter};
pub use stats::{TreeStats, TreeStatsTrait};
pub use tree::OptimisticRadixTree;
