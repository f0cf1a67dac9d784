#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use optimist_radix::{OptimisticRadixTree, Retrieval};

#[derive(Arbitrary, Debug)]
struct Input {
    stored: Vec<String>,
    probes: Vec<String>,
}

// Optimistic lookups must agree with verified lookups on every stored key, and may only ever
// return a value where verified lookup finds nothing.
fuzz_target!(|input: Input| {
    let mut optimistic = OptimisticRadixTree::with_retrieval(Retrieval::Optimistic);
    let mut radix = OptimisticRadixTree::with_retrieval(Retrieval::Radix);
    for (i, key) in input.stored.iter().enumerate() {
        optimistic.insert(key, i);
        radix.insert(key, i);
    }

    for key in &input.stored {
        assert_eq!(optimistic.get(key), radix.get(key));
    }
    for key in &input.probes {
        if let Ok(value) = radix.get(key) {
            assert_eq!(optimistic.get(key), Ok(value));
        }
        assert_eq!(optimistic.contains(key), radix.contains(key));
    }
});
