use proptest::prelude::*;

use crate::config::Retrieval;
use crate::tree::OptimisticRadixTree;

/// Reference model: entries kept most recently touched first.
#[derive(Default)]
struct Model {
    entries: Vec<(String, u32)>,
}

impl Model {
    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn insert(&mut self, key: &str, value: u32) -> Option<u32> {
        let old = self.position(key).map(|i| self.entries.remove(i).1);
        self.entries.insert(0, (key.to_string(), value));
        old
    }

    fn erase(&mut self, key: &str) -> Option<u32> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    fn get(&self, key: &str) -> Option<u32> {
        self.position(key).map(|i| self.entries[i].1)
    }

    fn get_or_insert(&mut self, key: &str) -> u32 {
        let value = self.erase(key).unwrap_or_default();
        self.entries.insert(0, (key.to_string(), value));
        value
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, u32),
    Erase(String),
    Get(String),
    GetOrInsert(String),
    EraseFront,
    Clear,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // A small alphabet and short keys force lots of shared prefixes, splits and merges.
    let key = "[abc]{0,6}";
    let op = prop_oneof![
        40 => (key, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        25 => key.prop_map(Op::Erase),
        20 => key.prop_map(Op::Get),
        10 => key.prop_map(Op::GetOrInsert),
        4 => Just(Op::EraseFront),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=400)
}

fn validate<V>(tree: &OptimisticRadixTree<V>) {
    let issues = tree.verify_integrity();
    assert!(issues.is_empty(), "integrity issues: {:?}", issues);
}

proptest! {
    #[test]
    fn prop_matches_model(ops in ops_strategy()) {
        let mut tree = OptimisticRadixTree::with_retrieval(Retrieval::Radix);
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(tree.insert(&k, v), model.insert(&k, v));
                }
                Op::Erase(k) => {
                    prop_assert_eq!(tree.erase(&k), model.erase(&k));
                    // Erasing again is a no-op.
                    let len = tree.len();
                    prop_assert_eq!(tree.erase(&k), None);
                    prop_assert_eq!(tree.len(), len);
                }
                Op::Get(k) => {
                    prop_assert_eq!(tree.get(&k).ok().copied(), model.get(&k));
                    prop_assert_eq!(tree.contains(&k), model.get(&k).is_some());
                }
                Op::GetOrInsert(k) => {
                    prop_assert_eq!(*tree.get_or_insert(&k), model.get_or_insert(&k));
                }
                Op::EraseFront => {
                    let front = tree.cursor_front();
                    let next = tree.erase_at(front);
                    if !model.entries.is_empty() {
                        model.entries.remove(0);
                    }
                    prop_assert_eq!(
                        tree.entry(next).map(|(k, v)| (k.to_string(), *v)),
                        model.entries.first().cloned()
                    );
                }
                Op::Clear => {
                    tree.clear();
                    model.entries.clear();
                }
            }
            prop_assert_eq!(tree.len(), model.entries.len());
            validate(&tree);
        }

        let order: Vec<(String, u32)> = tree.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        prop_assert_eq!(order, model.entries);
    }

    #[test]
    fn prop_clone_preserves_order(keys in prop::collection::vec("[abc]{0,6}", 0..100)) {
        let mut tree = OptimisticRadixTree::with_retrieval(Retrieval::Radix);
        for (i, k) in keys.iter().enumerate() {
            tree.insert(k, i);
        }
        let copy = tree.clone();
        validate(&copy);
        let original: Vec<_> = tree.iter().collect();
        let copied: Vec<_> = copy.iter().collect();
        prop_assert_eq!(original, copied);
    }

    #[test]
    fn prop_optimistic_agrees_on_stored_keys(keys in prop::collection::vec("[abc]{1,8}", 1..100)) {
        let mut optimistic = OptimisticRadixTree::with_retrieval(Retrieval::Optimistic);
        let mut radix = OptimisticRadixTree::with_retrieval(Retrieval::Radix);
        for (i, k) in keys.iter().enumerate() {
            optimistic.insert(k, i);
            radix.insert(k, i);
        }
        // Stored keys always resolve correctly; only keys never stored can differ.
        for k in &keys {
            prop_assert_eq!(optimistic.get(k), radix.get(k));
        }
    }

    #[test]
    fn prop_optimistic_accepts_same_shape(
        key in "[a-z]{2,10}",
        mask in prop::collection::vec(any::<bool>(), 10),
    ) {
        // With a single stored key, anything with the same first byte and length resolves to it.
        let mut optimistic = OptimisticRadixTree::with_retrieval(Retrieval::Optimistic);
        optimistic.insert(&key, 1);
        let probe: String = key
            .chars()
            .enumerate()
            .map(|(i, c)| if i > 0 && mask[i] { 'Z' } else { c })
            .collect();
        prop_assert_eq!(optimistic.get(&probe), Ok(&1));
        prop_assert_eq!(optimistic.contains(&probe), probe == key);
    }
}
