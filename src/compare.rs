//! Prefix comparison between a node's segment and the unconsumed part of a key.
//!
//! Two strategies exist. [`RadixMatch`] counts the bytes the two sides really have in common
//! and is used by every mutating path and by `contains`. [`OptimisticMatch`] performs no byte
//! comparison at all and classifies by length only; lookups driven by it verify nothing but the
//! byte used to select each child.

use std::cmp::min;

use crate::partials::Partial;

/// Outcome of comparing a node prefix against a key suffix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Comparison {
    /// The prefix had a byte the key did not have at the very first position.
    NoMatch,
    /// The whole prefix matched, the key continues past it.
    PrefixFullMatch,
    /// Matching stopped inside the prefix: either the key ran out or the two diverged.
    PartialMatch,
    /// Prefix and key matched completely, in length too.
    ExactMatch,
}

/// A way of comparing a node prefix against a key suffix. Returns the outcome together with the
/// number of key bytes consumed.
pub trait MatchStrategy {
    fn compare<P: Partial>(prefix: &P, suffix: &[u8]) -> (Comparison, usize);
}

/// Full verification: every byte up to the shorter of the two is compared.
pub struct RadixMatch;

/// Length-only classification: assumes the shorter side is entirely shared.
pub struct OptimisticMatch;

impl MatchStrategy for RadixMatch {
    #[inline]
    fn compare<P: Partial>(prefix: &P, suffix: &[u8]) -> (Comparison, usize) {
        let matched = prefix.prefix_length_slice(suffix);
        let result = if matched == prefix.len() {
            if matched == suffix.len() {
                Comparison::ExactMatch
            } else {
                Comparison::PrefixFullMatch
            }
        } else if matched == 0 {
            Comparison::NoMatch
        } else {
            Comparison::PartialMatch
        };
        debug_assert!(matched <= min(prefix.len(), suffix.len()));
        (result, matched)
    }
}

impl MatchStrategy for OptimisticMatch {
    #[inline]
    fn compare<P: Partial>(prefix: &P, suffix: &[u8]) -> (Comparison, usize) {
        let prefix_len = prefix.len();
        if prefix_len < suffix.len() {
            (Comparison::PrefixFullMatch, prefix_len)
        } else if prefix_len == suffix.len() {
            (Comparison::ExactMatch, prefix_len)
        } else {
            (Comparison::NoMatch, 0)
        }
    }
}
