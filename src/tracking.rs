//! Most-recently-touched ordering of value-bearing nodes.
//!
//! Entries live in their own arena and are chained by handles into a doubly linked list whose
//! head is the most recently inserted or overwritten key. A node handle → entry handle map makes
//! relocation and removal O(1) without scanning the list.

use std::collections::HashMap;

use crate::node::NodeId;
use crate::utils::fillvector::{FVIndex, FillVector};

/// Handle of an entry in the tracking list.
pub(crate) type EntryId = FVIndex;

pub(crate) struct TrackEntry {
    pub(crate) key: String,
    pub(crate) node: NodeId,
    prev: Option<EntryId>,
    next: Option<EntryId>,
}

#[derive(Default)]
pub(crate) struct TrackingIndex {
    entries: FillVector<TrackEntry>,
    by_node: HashMap<NodeId, EntryId>,
    head: Option<EntryId>,
    tail: Option<EntryId>,
}

impl TrackingIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Move `node` to the front, adding an entry for it under `key` if it has none.
    pub(crate) fn touch(&mut self, node: NodeId, key: &str) {
        if let Some(&entry) = self.by_node.get(&node) {
            debug_assert_eq!(self.entries[entry].key, key);
            if self.head != Some(entry) {
                self.unlink(entry);
                self.link_front(entry);
            }
            return;
        }
        let entry = self.entries.add(|_| TrackEntry {
            key: key.to_string(),
            node,
            prev: None,
            next: None,
        });
        self.link_front(entry);
        self.by_node.insert(node, entry);
    }

    /// Forget `node`. Returns false if it was not tracked.
    pub(crate) fn untrack(&mut self, node: NodeId) -> bool {
        let Some(entry) = self.by_node.remove(&node) else {
            return false;
        };
        self.unlink(entry);
        self.entries.free(entry)
    }

    pub(crate) fn is_tracked(&self, node: NodeId) -> bool {
        self.by_node.contains_key(&node)
    }

    pub(crate) fn head(&self) -> Option<EntryId> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<EntryId> {
        self.tail
    }

    pub(crate) fn entry(&self, id: EntryId) -> Option<&TrackEntry> {
        self.entries.get(id)
    }

    pub(crate) fn next(&self, id: EntryId) -> Option<EntryId> {
        self.entries.get(id).and_then(|e| e.next)
    }

    pub(crate) fn prev(&self, id: EntryId) -> Option<EntryId> {
        self.entries.get(id).and_then(|e| e.prev)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.size()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.by_node.clear();
        self.head = None;
        self.tail = None;
    }

    /// Walk from most to least recently touched.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &TrackEntry> + '_ {
        let mut cur = self.head;
        std::iter::from_fn(move || {
            let entry = &self.entries[cur?];
            cur = entry.next;
            Some(entry)
        })
    }

    fn unlink(&mut self, id: EntryId) {
        let (prev, next) = {
            let e = &self.entries[id];
            (e.prev, e.next)
        };
        match prev {
            Some(p) => self.entries[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.entries[n].prev = prev,
            None => self.tail = prev,
        }
        let e = &mut self.entries[id];
        e.prev = None;
        e.next = None;
    }

    fn link_front(&mut self, id: EntryId) {
        let old_head = self.head;
        {
            let e = &mut self.entries[id];
            e.prev = None;
            e.next = old_head;
        }
        match old_head {
            Some(h) => self.entries[h].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }
}
