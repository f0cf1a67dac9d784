use crate::mapping::keyed_mapping::KeyedMapping;
use crate::mapping::NodeMapping;
use crate::partials::vector_partial::VectorPartial;
use crate::partials::Partial;
use crate::utils::fillvector::FVIndex;

/// Handle of a node inside the tree's node arena.
pub(crate) type NodeId = FVIndex;

/// A point of disambiguation for keys. With "hello" and "helium" stored, one node carries the
/// shared segment "hel" and links to nodes for "lo" and "ium", keyed by 'l' and 'i'.
pub(crate) struct Node<V> {
    pub(crate) value: Option<V>,
    pub(crate) prefix: VectorPartial,
    pub(crate) children: KeyedMapping<NodeId>,
}

impl<V> Node<V> {
    #[inline]
    pub(crate) fn new_inner(prefix: VectorPartial) -> Self {
        Self {
            value: None,
            prefix,
            children: KeyedMapping::new(),
        }
    }

    /// Copies prefix and value but not the children.
    pub(crate) fn shallow_clone(&self) -> Self
    where
        V: Clone,
    {
        Self {
            value: self.value.clone(),
            prefix: self.prefix.clone(),
            children: KeyedMapping::new(),
        }
    }

    #[inline]
    pub(crate) fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// The byte this node is registered under in its parent.
    #[inline]
    pub(crate) fn first_byte(&self) -> u8 {
        self.prefix.at(0)
    }

    #[inline]
    pub(crate) fn seek_child(&self, key: u8) -> Option<NodeId> {
        self.children.seek_child(key).copied()
    }

    #[inline]
    pub(crate) fn num_children(&self) -> usize {
        self.children.num_children()
    }

    /// The sole child, if this node has exactly one.
    pub(crate) fn only_child(&self) -> Option<NodeId> {
        if self.num_children() != 1 {
            return None;
        }
        self.children.iter().next().map(|(_, c)| *c)
    }

    pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = (u8, NodeId)> + '_ {
        self.children.iter().map(|(k, c)| (k, *c))
    }
}
