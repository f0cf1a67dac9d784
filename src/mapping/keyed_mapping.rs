use crate::mapping::NodeMapping;
use crate::utils::u8_keys::u8_keys_find_key_position_sorted;

/// Maps a key to a node, using a sorted array of keys and a corresponding array of nodes.
/// Presence of a key at a position means there is a node at the same position in children.
/// Keeping keys sorted gives binary search on lookup and byte-ordered iteration for free; the
/// cost is shifting on insert and delete, which is cheap at the fanouts string keys produce.
#[derive(Clone, Debug)]
pub struct KeyedMapping<N> {
    keys: Vec<u8>,
    children: Vec<N>,
}

impl<N> Default for KeyedMapping<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> KeyedMapping<N> {
    #[inline]
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u8, &N)> {
        self.keys.iter().copied().zip(self.children.iter())
    }
}

impl<N> NodeMapping<N> for KeyedMapping<N> {
    fn add_child(&mut self, key: u8, node: N) {
        match u8_keys_find_key_position_sorted(key, &self.keys) {
            Ok(idx) => self.children[idx] = node,
            Err(idx) => {
                self.keys.insert(idx, key);
                self.children.insert(idx, node);
            }
        }
    }

    fn update_child(&mut self, key: u8, node: N) {
        if let Some(child) = self.seek_child_mut(key) {
            *child = node;
        }
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let idx = u8_keys_find_key_position_sorted(key, &self.keys).ok()?;
        Some(&self.children[idx])
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let idx = u8_keys_find_key_position_sorted(key, &self.keys).ok()?;
        Some(&mut self.children[idx])
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let idx = u8_keys_find_key_position_sorted(key, &self.keys).ok()?;
        self.keys.remove(idx);
        Some(self.children.remove(idx))
    }

    #[inline]
    fn num_children(&self) -> usize {
        self.keys.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::mapping::keyed_mapping::KeyedMapping;
    use crate::mapping::NodeMapping;

    #[test]
    fn test_add_seek_delete() {
        let mut km = KeyedMapping::new();
        for i in [5u8, 1, 200, 3] {
            km.add_child(i, i as i32);
        }
        assert_eq!(km.num_children(), 4);
        assert_eq!(km.seek_child(200), Some(&200));
        assert_eq!(km.seek_child(4), None);

        *km.seek_child_mut(1).unwrap() = 10;
        assert_eq!(km.seek_child(1), Some(&10));
        km.update_child(3, 30);
        assert_eq!(km.seek_child(3), Some(&30));

        assert_eq!(km.delete_child(5), Some(5));
        assert_eq!(km.delete_child(5), None);
        assert_eq!(km.num_children(), 3);
    }

    #[test]
    fn test_iter_is_sorted() {
        let mut km = KeyedMapping::new();
        for i in (0..=255u8).rev() {
            km.add_child(i, ());
        }
        let keys: Vec<u8> = km.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, (0..=255u8).collect::<Vec<_>>());
        assert_eq!(km.num_children(), 256);
    }

    #[test]
    fn test_add_existing_replaces() {
        let mut km = KeyedMapping::new();
        km.add_child(b'a', 1);
        km.add_child(b'a', 2);
        assert_eq!(km.num_children(), 1);
        assert_eq!(km.seek_child(b'a'), Some(&2));
    }
}
