//! Statistics and introspection.
//!
//! Statistics can be useful for:
//! - Seeing how much of a workload's key space is shared (long segments between branch points
//!   are where optimistic retrieval pays off)
//! - Debugging tree structure issues
//! - Benchmarking

use std::collections::BTreeMap;

use crate::tree::OptimisticRadixTree;

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

#[derive(Debug, Default)]
pub struct TreeStats {
    /// All nodes, root included.
    pub num_nodes: usize,
    /// Nodes holding a value.
    pub num_values: usize,
    /// Nodes without children.
    pub num_leaves: usize,
    /// Non-root nodes without a value. These only exist to branch.
    pub num_inner_nodes: usize,
    /// Nodes with two or more children.
    pub num_disambiguation_points: usize,
    /// Number of children → number of nodes with that many children.
    pub fanout: BTreeMap<usize, usize>,
    /// Sum of all non-root prefix lengths.
    pub total_prefix_bytes: usize,
    pub max_height: usize,
}

impl TreeStats {
    /// Average number of bytes a node contributes to a key, root excluded.
    pub fn average_prefix_len(&self) -> f64 {
        if self.num_nodes <= 1 {
            return 0.0;
        }
        self.total_prefix_bytes as f64 / (self.num_nodes - 1) as f64
    }
}

impl<V> TreeStatsTrait for OptimisticRadixTree<V> {
    fn get_tree_stats(&self) -> TreeStats {
        let mut tree_stats = TreeStats::default();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, height)) = stack.pop() {
            let node = &self.nodes[id];
            if height > tree_stats.max_height {
                tree_stats.max_height = height;
            }
            tree_stats.num_nodes += 1;
            if node.has_value() {
                tree_stats.num_values += 1;
            } else if id != self.root {
                tree_stats.num_inner_nodes += 1;
            }
            let num_children = node.num_children();
            match num_children {
                0 => tree_stats.num_leaves += 1,
                1 => {}
                _ => tree_stats.num_disambiguation_points += 1,
            }
            *tree_stats.fanout.entry(num_children).or_insert(0) += 1;
            tree_stats.total_prefix_bytes += node.prefix.as_ref().len();

            for (_k, child) in node.iter() {
                stack.push((child, height + 1));
            }
        }
        tree_stats
    }
}
