use crate::tracking::EntryId;
use crate::tree::OptimisticRadixTree;

/// Iterator over `(key, value)` pairs in most-recently-touched order.
pub struct Iter<'a, V> {
    tree: &'a OptimisticRadixTree<V>,
    cur: Option<EntryId>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(tree: &'a OptimisticRadixTree<V>) -> Self {
        Self {
            tree,
            cur: tree.tracking.head(),
            remaining: tree.tracking.len(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let entry = tree.tracking.entry(self.cur?)?;
        self.cur = tree.tracking.next(self.cur?);
        self.remaining -= 1;
        let value = tree.nodes[entry.node].value.as_ref()?;
        Some((entry.key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// A position in a tree's iteration order.
///
/// Cursors are plain handles and do not borrow the tree. A cursor obtained before a mutation
/// may afterwards point at nothing or at a different entry; only the cursor returned by
/// [`OptimisticRadixTree::erase_at`] is guaranteed to stay meaningful across that call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cursor(Option<EntryId>);

impl Cursor {
    pub(crate) fn at(entry: Option<EntryId>) -> Self {
        Self(entry)
    }

    /// The cursor one past the last entry.
    pub fn end() -> Self {
        Self(None)
    }

    pub fn is_end(&self) -> bool {
        self.0.is_none()
    }

    pub(crate) fn entry_id(&self) -> Option<EntryId> {
        self.0
    }
}

/// A cursor holding the tree mutably, able to modify or remove the entry it points at.
pub struct CursorMut<'a, V> {
    tree: &'a mut OptimisticRadixTree<V>,
    cur: Cursor,
}

impl<'a, V> CursorMut<'a, V> {
    pub(crate) fn new(tree: &'a mut OptimisticRadixTree<V>, cur: Cursor) -> Self {
        Self { tree, cur }
    }

    pub fn is_end(&self) -> bool {
        self.cur.is_end()
    }

    pub fn current(&self) -> Option<(&str, &V)> {
        self.tree.entry(self.cur)
    }

    /// Mutable access to the value under the cursor. Does not change the iteration order.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        let node = self.tree.tracking.entry(self.cur.entry_id()?)?.node;
        self.tree.nodes[node].value.as_mut()
    }

    pub fn move_next(&mut self) {
        self.cur = self.tree.next_cursor(self.cur);
    }

    /// Remove the entry under the cursor and move to the one after it.
    pub fn remove_current(&mut self) -> Option<(String, V)> {
        let entry_id = self.cur.entry_id()?;
        let key = self.tree.tracking.entry(entry_id)?.key.clone();
        self.cur = Cursor::at(self.tree.tracking.next(entry_id));
        let value = self.tree.erase(&key)?;
        Some((key, value))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Retrieval;
    use crate::iter::Cursor;
    use crate::tree::OptimisticRadixTree;

    fn sample() -> OptimisticRadixTree<i32> {
        let mut q = OptimisticRadixTree::with_retrieval(Retrieval::Radix);
        for (i, k) in ["apple", "app", "application", "banana"].iter().enumerate() {
            q.insert(k, i as i32);
        }
        q
    }

    #[test]
    fn test_iter_exact_size() {
        let q = sample();
        let it = q.iter();
        assert_eq!(it.len(), 4);
        let keys: Vec<_> = it.map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["banana", "application", "app", "apple"]);
        // Restartable.
        assert_eq!(q.iter().count(), 4);
        assert_eq!((&q).into_iter().next(), Some(("banana", &3)));
    }

    #[test]
    fn test_cursor_walk() {
        let q = sample();
        let mut cursor = q.cursor_front();
        let mut seen = vec![];
        while !cursor.is_end() {
            seen.push(q.entry(cursor).unwrap().0);
            cursor = q.next_cursor(cursor);
        }
        assert_eq!(seen, vec!["banana", "application", "app", "apple"]);
        assert_eq!(q.entry(Cursor::end()), None);
        assert_eq!(q.next_cursor(Cursor::end()), Cursor::end());
    }

    #[test]
    fn test_erase_at_returns_next() {
        let mut q = sample();
        let first = q.cursor_front();
        let second = q.next_cursor(first);
        let next = q.erase_at(second);
        assert_eq!(q.entry(next), Some(("app", &1)));
        assert_eq!(q.len(), 3);
        assert!(!q.contains("application"));

        // Erasing everything through cursors.
        let mut cursor = q.cursor_front();
        while !cursor.is_end() {
            cursor = q.erase_at(cursor);
        }
        assert!(q.is_empty());
        assert_eq!(q.erase_at(Cursor::end()), Cursor::end());
        assert!(q.verify_integrity().is_empty());
    }

    #[test]
    fn test_cursor_mut_remove() {
        let mut q = sample();
        let mut cursor = q.cursor_front_mut();
        while let Some((key, _)) = cursor.current() {
            if key.starts_with("app") {
                let (removed, _) = cursor.remove_current().unwrap();
                assert!(removed.starts_with("app"));
            } else {
                *cursor.value_mut().unwrap() *= 10;
                cursor.move_next();
            }
        }
        assert!(cursor.is_end());
        assert_eq!(cursor.remove_current(), None);

        assert_eq!(q.len(), 1);
        assert_eq!(q.get("banana"), Ok(&30));
        assert!(q.verify_integrity().is_empty());
    }
}
