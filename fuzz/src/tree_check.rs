#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use optimist_radix::{OptimisticRadixTree, Retrieval};

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: String },
    Insert { key: String, val: usize },
    Update { key: String, val: usize },
    GetOrInsert { key: String },
    Delete { key: String },
    DeleteFront,
    Clear,
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let mut tree = OptimisticRadixTree::<usize>::with_retrieval(Retrieval::Radix);
    let mut map = HashMap::<String, usize>::new();

    for m in &methods {
        match m {
            MapMethod::Get { key } => {
                assert_eq!(tree.get(key).ok(), map.get(key));
                assert_eq!(tree.contains(key), map.contains_key(key));
            }
            MapMethod::Insert { key, val } => {
                assert_eq!(tree.insert(key, *val), map.insert(key.clone(), *val));
            }
            MapMethod::Update { key, val } => {
                let old_map = map.get_mut(key);
                let old_tree = tree.get_mut(key).ok();
                assert_eq!(old_tree, old_map);
                if let (Some(t), Some(m)) = (old_tree, old_map) {
                    *t = *val;
                    *m = *val;
                }
                assert_eq!(tree.get(key).ok(), map.get(key));
            }
            MapMethod::GetOrInsert { key } => {
                let expected = *map.entry(key.clone()).or_default();
                assert_eq!(*tree.get_or_insert(key), expected);
            }
            MapMethod::Delete { key } => {
                assert_eq!(tree.erase(key), map.remove(key));
            }
            MapMethod::DeleteFront => {
                let front = tree.cursor_front();
                if let Some((key, _)) = tree.entry(front) {
                    let key = key.to_string();
                    tree.erase_at(front);
                    assert!(map.remove(&key).is_some());
                }
            }
            MapMethod::Clear => {
                tree.clear();
                map.clear();
            }
        }
        assert_eq!(tree.len(), map.len());
    }

    let issues = tree.verify_integrity();
    assert!(issues.is_empty(), "integrity issues: {:?}", issues);
    for (k, expected_value) in map.iter() {
        assert_eq!(tree.get(k), Ok(expected_value), "Expected value for key {:?}", k);
    }
    assert_eq!(tree.iter().count(), map.len());
});
