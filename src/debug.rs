//! Debug utilities for troubleshooting tree structure.

use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};

use crate::node::NodeId;
use crate::partials::Partial;
use crate::tree::OptimisticRadixTree;

/// Renders the node structure of a tree, one node per line, indented by depth.
pub struct TreeDisplay<'a, V> {
    tree: &'a OptimisticRadixTree<V>,
}

impl<V: Debug> Display for TreeDisplay<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let tree = self.tree;
        // Root is at level -1 so its children start unindented.
        let mut stack: Vec<(NodeId, isize)> = vec![(tree.root, -1)];
        while let Some((id, level)) = stack.pop() {
            let node = &tree.nodes[id];
            if !node.prefix.is_empty() || node.has_value() {
                for _ in 0..level.max(0) {
                    write!(f, " ")?;
                }
                write!(f, "`{}`", String::from_utf8_lossy(node.prefix.to_slice()))?;
                if let Some(value) = &node.value {
                    write!(f, ": {:?}", value)?;
                }
                writeln!(f)?;
            }
            // Reversed so the smallest byte is popped first.
            for (_k, child) in node.iter().rev() {
                stack.push((child, level + 1));
            }
        }
        Ok(())
    }
}

impl<V> OptimisticRadixTree<V> {
    /// A [`Display`] adaptor rendering the tree structure.
    ///
    /// ```text
    /// `app`: 2
    ///  `l`
    ///   `e`: 1
    ///   `ication`: 3
    /// `banana`: 4
    /// ```
    pub fn display(&self) -> TreeDisplay<'_, V> {
        TreeDisplay { tree: self }
    }

    /// The tree structure as a string; see [`display`](Self::display).
    pub fn dump(&self) -> String
    where
        V: Debug,
    {
        self.display().to_string()
    }

    /// Verify tree integrity - returns list of issues found.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = vec![];

        let Some(root) = self.nodes.get(self.root) else {
            issues.push("root node missing".to_string());
            return issues;
        };
        if !root.prefix.is_empty() {
            issues.push(format!("root prefix is not empty: {:?}", root.prefix));
        }

        // Full key of every value-bearing node, rebuilt from the prefixes on its path.
        let mut value_keys: HashMap<NodeId, Vec<u8>> = HashMap::new();
        let mut reachable = 0usize;
        let mut stack: Vec<(NodeId, Vec<u8>)> = vec![(self.root, vec![])];
        while let Some((id, mut path)) = stack.pop() {
            reachable += 1;
            let Some(node) = self.nodes.get(id) else {
                issues.push(format!("dangling child handle {:?}", id));
                continue;
            };
            path.extend_from_slice(node.prefix.to_slice());

            if id != self.root {
                if node.prefix.is_empty() {
                    issues.push(format!("node at {:?} has an empty prefix", path));
                }
                if !node.has_value() && node.num_children() < 2 {
                    issues.push(format!(
                        "value-less node at {:?} has {} children",
                        path,
                        node.num_children()
                    ));
                }
            }
            if node.has_value() {
                value_keys.insert(id, path.clone());
            }

            for (k, child) in node.iter() {
                match self.nodes.get(child) {
                    Some(c) if c.prefix.is_empty() || c.first_byte() != k => {
                        issues.push(format!("child of {:?} is not keyed by its first byte", path))
                    }
                    _ => {}
                }
                stack.push((child, path.clone()));
            }
        }

        if reachable != self.nodes.size() {
            issues.push(format!(
                "{} nodes allocated but {} reachable",
                self.nodes.size(),
                reachable
            ));
        }
        if value_keys.len() != self.length {
            issues.push(format!(
                "length is {} but {} nodes hold a value",
                self.length,
                value_keys.len()
            ));
        }
        if self.tracking.len() != self.length {
            issues.push(format!(
                "length is {} but {} entries are tracked",
                self.length,
                self.tracking.len()
            ));
        }
        for entry in self.tracking.iter() {
            match value_keys.get(&entry.node) {
                Some(key) if key.as_slice() == entry.key.as_bytes() => {}
                Some(key) => issues.push(format!(
                    "entry {:?} tracks a node whose key is {:?}",
                    entry.key,
                    String::from_utf8_lossy(key)
                )),
                None => issues.push(format!(
                    "entry {:?} tracks a node without a value",
                    entry.key
                )),
            }
        }
        for id in value_keys.keys() {
            if !self.tracking.is_tracked(*id) {
                issues.push(format!("value-bearing node {:?} is not tracked", id));
            }
        }

        issues
    }
}
