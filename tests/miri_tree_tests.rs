//! Small tree workloads for running under Miri.
//!
//! Note: These tests are only compiled when SIMD features are disabled,
//! as Miri cannot handle SIMD instructions.

#![cfg(not(feature = "simd_keys"))]

use optimist_radix::{OptimisticRadixTree, Retrieval};

#[test]
fn miri_insert_erase_cycle() {
    let mut tree = OptimisticRadixTree::with_retrieval(Retrieval::Radix);
    let keys = ["a", "ab", "abc", "abd", "b", "ba", ""];
    for (i, key) in keys.iter().enumerate() {
        tree.insert(key, Box::new(i));
    }
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(**tree.get(key).unwrap(), i);
    }
    for key in keys.iter().rev() {
        assert!(tree.erase(key).is_some());
    }
    assert!(tree.is_empty());
    assert!(tree.verify_integrity().is_empty());
}

#[test]
fn miri_clone_and_drop() {
    let mut tree = OptimisticRadixTree::with_retrieval(Retrieval::Optimistic);
    for i in 0..32 {
        tree.insert(&format!("prefix-{}", i), vec![i; 4]);
    }
    let copy = tree.clone();
    drop(tree);
    assert_eq!(copy.len(), 32);
    assert_eq!(copy.get("prefix-7"), Ok(&vec![7; 4]));
}
