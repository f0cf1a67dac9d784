//! Radix tree with optional optimistic retrieval.
//!
//! This module contains the main [`OptimisticRadixTree`] implementation.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use crate::compare::{Comparison, MatchStrategy, OptimisticMatch, RadixMatch};
use crate::config::Retrieval;
use crate::error::NoSuchKey;
use crate::iter::{Cursor, CursorMut, Iter};
use crate::mapping::NodeMapping;
use crate::node::{Node, NodeId};
use crate::partials::vector_partial::VectorPartial;
use crate::partials::Partial;
use crate::tracking::TrackingIndex;
use crate::utils::fillvector::FillVector;

/// A radix tree keyed by strings, whose lookups can optionally skip verification of the key
/// segments between branch points.
///
/// Insertion, removal and [`contains`](Self::contains) always compare every byte. Only
/// [`get`](Self::get) and [`get_mut`](Self::get_mut) honour the tree's [`Retrieval`] mode. In
/// [`Retrieval::Optimistic`] mode a lookup checks just the byte used to pick each child, which
/// makes it cheaper on keys with long shared segments but means a key that was never stored
/// can resolve to the value of a stored key of the same shape.
///
/// Iteration yields entries in most-recently-touched order: the last key inserted, overwritten
/// or accessed through [`get_or_insert`](Self::get_or_insert) comes first.
///
/// ## Examples
///
/// ```rust
/// use optimist_radix::{OptimisticRadixTree, Retrieval};
///
/// let mut tree = OptimisticRadixTree::with_retrieval(Retrieval::Radix);
/// tree.insert("apple", 1);
/// tree.insert("app", 2);
/// tree.insert("application", 3);
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.get("app"), Ok(&2));
/// assert!(!tree.contains("appl"));
///
/// tree.erase("app");
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.get("apple"), Ok(&1));
/// ```
///
/// Optimistic lookups only check branching bytes:
///
/// ```rust
/// use optimist_radix::{OptimisticRadixTree, Retrieval};
///
/// let mut tree = OptimisticRadixTree::with_retrieval(Retrieval::Optimistic);
/// tree.insert("helios", 1);
///
/// // Same first byte, same length: accepted without looking at the rest.
/// assert_eq!(tree.get("hxxxxx"), Ok(&1));
/// assert!(!tree.contains("hxxxxx"));
/// ```
pub struct OptimisticRadixTree<V> {
    pub(crate) nodes: FillVector<Node<V>>,
    pub(crate) root: NodeId,
    pub(crate) length: usize,
    pub(crate) tracking: TrackingIndex,
    retrieval: Retrieval,
}

impl<V> Default for OptimisticRadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OptimisticRadixTree<V> {
    /// Create an empty tree using the build's default [`Retrieval`] mode.
    pub fn new() -> Self {
        Self::with_retrieval(Retrieval::default())
    }

    /// Create an empty tree with an explicit retrieval mode.
    pub fn with_retrieval(retrieval: Retrieval) -> Self {
        let mut nodes = FillVector::with_capacity(16);
        let root = nodes.add(|_| Node::new_inner(VectorPartial::empty()));
        Self {
            nodes,
            root,
            length: 0,
            tracking: TrackingIndex::new(),
            retrieval,
        }
    }

    pub fn retrieval(&self) -> Retrieval {
        self.retrieval
    }

    /// Number of keys holding a value.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Store `value` at `key`.
    ///
    /// # Returns
    ///
    /// - `Some(old_value)` if a previous value was replaced
    /// - `None` if this was a new key
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let node = self.find_or_create_slot(key.as_bytes());
        let old = self.nodes[node].value.replace(value);
        if old.is_none() {
            self.length += 1;
        }
        self.tracking.touch(node, key);
        old
    }

    /// Return the value at `key`, inserting `V::default()` first if there is none.
    ///
    /// Every call, including one that only reads, moves `key` to the front of the iteration
    /// order.
    pub fn get_or_insert(&mut self, key: &str) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Like [`get_or_insert`](Self::get_or_insert), with the missing value produced by `f`.
    ///
    /// `f` runs before any node is split or created, so a panic in it leaves the tree untouched.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: &str, f: F) -> &mut V {
        if let Some(node) = self.find_value_node::<RadixMatch>(key.as_bytes()) {
            self.tracking.touch(node, key);
            return self.nodes[node].value.get_or_insert_with(f);
        }

        let value = f();
        let node = self.find_or_create_slot(key.as_bytes());
        self.length += 1;
        self.tracking.touch(node, key);
        self.nodes[node].value.insert(value)
    }

    /// Remove the value at `key`, returning it. Absent keys are a no-op.
    pub fn erase(&mut self, key: &str) -> Option<V> {
        let key = key.as_bytes();
        let mut grandparent: Option<NodeId> = None;
        let mut parent: Option<NodeId> = None;
        let mut node = self.root;
        let mut depth = 0;

        loop {
            let (result, matched) = RadixMatch::compare(&self.nodes[node].prefix, &key[depth..]);
            depth += matched;
            match result {
                Comparison::NoMatch | Comparison::PartialMatch => return None,
                Comparison::PrefixFullMatch => {
                    let child = self.nodes[node].seek_child(key[depth])?;
                    grandparent = parent;
                    parent = Some(node);
                    node = child;
                }
                Comparison::ExactMatch => {
                    let value = self.nodes[node].value.take()?;
                    let tracked = self.tracking.untrack(node);
                    debug_assert!(tracked, "value-bearing node was not tracked");
                    self.length -= 1;

                    // The root is never restructured.
                    if let Some(parent) = parent {
                        self.compact(grandparent, parent, node);
                    }
                    return Some(value);
                }
            }
        }
    }

    /// Remove the entry under `cursor` and return a cursor to the entry after it.
    ///
    /// The key under the cursor is removed with [`erase`](Self::erase), so this walks the tree
    /// from the root again rather than unlinking the node directly.
    pub fn erase_at(&mut self, cursor: Cursor) -> Cursor {
        let Some(entry_id) = cursor.entry_id() else {
            return cursor;
        };
        let Some(entry) = self.tracking.entry(entry_id) else {
            return Cursor::end();
        };
        let key = entry.key.clone();
        let next = Cursor::at(self.tracking.next(entry_id));
        self.erase(&key);
        next
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find_value_node::<RadixMatch>(key.as_bytes()).is_some()
    }

    /// Look up the value at `key`, verifying prefixes according to the tree's [`Retrieval`]
    /// mode.
    pub fn get(&self, key: &str) -> Result<&V, NoSuchKey> {
        self.lookup(key.as_bytes())
            .and_then(|node| self.nodes[node].value.as_ref())
            .ok_or_else(|| NoSuchKey::new(key))
    }

    /// Mutable version of [`get`](Self::get). Does not change the iteration order.
    pub fn get_mut(&mut self, key: &str) -> Result<&mut V, NoSuchKey> {
        match self.lookup(key.as_bytes()) {
            Some(node) => self.nodes[node]
                .value
                .as_mut()
                .ok_or_else(|| NoSuchKey::new(key)),
            None => Err(NoSuchKey::new(key)),
        }
    }

    /// Drop every entry, leaving an empty tree with the same retrieval mode.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.add(|_| Node::new_inner(VectorPartial::empty()));
        self.tracking.clear();
        self.length = 0;
    }

    /// Iterate `(key, value)` pairs, most recently touched first.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self)
    }

    /// A cursor at the most recently touched entry, or the end cursor for an empty tree.
    pub fn cursor_front(&self) -> Cursor {
        Cursor::at(self.tracking.head())
    }

    /// The entry under `cursor`, if it still exists.
    pub fn entry(&self, cursor: Cursor) -> Option<(&str, &V)> {
        let entry = self.tracking.entry(cursor.entry_id()?)?;
        let value = self.nodes.get(entry.node)?.value.as_ref()?;
        Some((entry.key.as_str(), value))
    }

    /// The cursor one position after `cursor`.
    pub fn next_cursor(&self, cursor: Cursor) -> Cursor {
        Cursor::at(cursor.entry_id().and_then(|id| self.tracking.next(id)))
    }

    /// A cursor at the most recently touched entry that can remove entries as it walks.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, V> {
        let head = self.cursor_front();
        CursorMut::new(self, head)
    }

    fn lookup(&self, key: &[u8]) -> Option<NodeId> {
        match self.retrieval {
            Retrieval::Radix => self.find_value_node::<RadixMatch>(key),
            Retrieval::Optimistic => self.find_value_node::<OptimisticMatch>(key),
        }
    }

    /// Walk to the node `key` ends at, returning it only if it holds a value.
    fn find_value_node<S: MatchStrategy>(&self, key: &[u8]) -> Option<NodeId> {
        let mut node = self.root;
        let mut depth = 0;
        loop {
            let cur = &self.nodes[node];
            let (result, matched) = S::compare(&cur.prefix, &key[depth..]);
            depth += matched;
            match result {
                Comparison::PrefixFullMatch => node = cur.seek_child(key[depth])?,
                Comparison::ExactMatch => return cur.has_value().then_some(node),
                Comparison::NoMatch | Comparison::PartialMatch => return None,
            }
        }
    }

    /// Walk to the node `key` ends at, splitting or creating nodes on the way as needed. The
    /// returned node may not hold a value yet; callers fill it in.
    fn find_or_create_slot(&mut self, key: &[u8]) -> NodeId {
        let mut parent: Option<NodeId> = None;
        let mut node = self.root;
        let mut depth = 0;

        loop {
            let (result, matched) = RadixMatch::compare(&self.nodes[node].prefix, &key[depth..]);
            depth += matched;
            match result {
                Comparison::NoMatch => {
                    unreachable!("child selected by first byte shares no prefix with the key")
                }
                Comparison::PrefixFullMatch => {
                    let accessor = key[depth];
                    if let Some(child) = self.nodes[node].seek_child(accessor) {
                        parent = Some(node);
                        node = child;
                        continue;
                    }
                    let leaf = self
                        .nodes
                        .add(|_| Node::new_inner(VectorPartial::from_slice(&key[depth..])));
                    self.nodes[node].children.add_child(accessor, leaf);
                    return leaf;
                }
                Comparison::PartialMatch => {
                    let Some(parent) = parent else {
                        unreachable!("the root prefix is empty and always matches in full")
                    };
                    return self.split(parent, node, matched, &key[depth..]);
                }
                Comparison::ExactMatch => return node,
            }
        }
    }

    /// Split `node` after its first `matched` bytes. An intermediate node carrying those bytes
    /// takes `node`'s place under `parent`, with `node` (shortened) below it. If `rest` is
    /// non-empty a new leaf for it becomes the intermediate node's second child and is returned,
    /// otherwise the intermediate node itself is returned.
    fn split(&mut self, parent: NodeId, node: NodeId, matched: usize, rest: &[u8]) -> NodeId {
        let current = &mut self.nodes[node];
        let accessor = current.first_byte();
        let shared = current.prefix.partial_before(matched);
        current.prefix = current.prefix.partial_after(matched);
        let current_first = current.first_byte();

        let mut intermediate = Node::new_inner(shared);
        intermediate.children.add_child(current_first, node);

        let (intermediate, target) = if rest.is_empty() {
            let id = self.nodes.add(|_| intermediate);
            (id, id)
        } else {
            let leaf = self
                .nodes
                .add(|_| Node::new_inner(VectorPartial::from_slice(rest)));
            intermediate.children.add_child(rest[0], leaf);
            (self.nodes.add(|_| intermediate), leaf)
        };

        self.nodes[parent].children.update_child(accessor, intermediate);
        target
    }

    /// Restore the compaction invariant after the value of `node` (a child of `parent`) was
    /// removed.
    fn compact(&mut self, grandparent: Option<NodeId>, parent: NodeId, node: NodeId) {
        match self.nodes[node].num_children() {
            0 => {
                let accessor = self.nodes[node].first_byte();
                self.nodes[parent].children.delete_child(accessor);
                self.nodes.free(node);

                // The parent may now be a value-less pass-through with a single child.
                let Some(grandparent) = grandparent else {
                    return;
                };
                let p = &self.nodes[parent];
                if p.has_value() {
                    return;
                }
                if let Some(only) = p.only_child() {
                    self.merge_into_child(grandparent, parent, only);
                }
            }
            1 => {
                if let Some(only) = self.nodes[node].only_child() {
                    self.merge_into_child(parent, node, only);
                }
            }
            _ => {}
        }
    }

    /// Fold `node` into its only `child`: the child's prefix is extended at the front with
    /// `node`'s prefix and the child takes `node`'s slot under `parent`.
    fn merge_into_child(&mut self, parent: NodeId, node: NodeId, child: NodeId) {
        debug_assert!(!self.nodes[node].has_value());
        let Some(removed) = self.nodes.take(node) else {
            unreachable!("merging a node that is not in the arena")
        };
        let accessor = removed.first_byte();
        let c = &mut self.nodes[child];
        c.prefix = removed.prefix.partial_extended_with(&c.prefix);
        self.nodes[parent].children.update_child(accessor, child);
    }
}

impl<V: Clone> Clone for OptimisticRadixTree<V> {
    /// Deep copy. Nodes are copied one by one while walking the original depth first, then the
    /// tracking order is replayed from its tail so the copy iterates identically.
    fn clone(&self) -> Self {
        let mut nodes = FillVector::with_capacity(self.nodes.size());
        let mut copies: HashMap<NodeId, NodeId> = HashMap::with_capacity(self.nodes.size());

        let root = nodes.add(|_| self.nodes[self.root].shallow_clone());
        copies.insert(self.root, root);

        let mut stack = vec![(root, self.root)];
        while let Some((copy, original)) = stack.pop() {
            for (first_byte, original_child) in self.nodes[original].iter() {
                let child = nodes.add(|_| self.nodes[original_child].shallow_clone());
                copies.insert(original_child, child);
                nodes[copy].children.add_child(first_byte, child);
                stack.push((child, original_child));
            }
        }

        let mut tracking = TrackingIndex::new();
        let mut cur = self.tracking.tail();
        while let Some(entry_id) = cur {
            if let Some(entry) = self.tracking.entry(entry_id) {
                tracking.touch(copies[&entry.node], &entry.key);
            }
            cur = self.tracking.prev(entry_id);
        }

        Self {
            nodes,
            root,
            length: self.length,
            tracking,
            retrieval: self.retrieval,
        }
    }
}

impl<V: Debug> Debug for OptimisticRadixTree<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a OptimisticRadixTree<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: AsRef<str>, V> Extend<(K, V)> for OptimisticRadixTree<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k.as_ref(), v);
        }
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for OptimisticRadixTree<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
