//! Ordered aggregation of find results
//!
//! [`SearchTree`] is a plain unbalanced binary search tree keyed by full path.
//! `find` builds one per call, drains it in order and drops it. Nodes live in
//! a vector and link by index, so teardown and in-order walks never recurse.

use crate::core::hash::TABLE_CAPACITY;
use crate::core::node::{NodeArena, NodeId};
use crate::core::path::full_path;
use tracing::trace;

#[derive(Debug)]
struct SearchNode {
    key: String,
    left: Option<usize>,
    right: Option<usize>,
}

/// Unbalanced BST of path strings
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    root: Option<usize>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key`; equal keys go to the right of existing ones
    pub fn insert(&mut self, key: String) {
        let new = self.nodes.len();
        let mut cur = match self.root {
            Some(root) => root,
            None => {
                self.nodes.push(SearchNode { key, left: None, right: None });
                self.root = Some(new);
                return;
            }
        };

        loop {
            let node = &mut self.nodes[cur];
            let next = if key < node.key {
                &mut node.left
            } else {
                &mut node.right
            };

            match *next {
                Some(child) => cur = child,
                None => {
                    *next = Some(new);
                    break;
                }
            }
        }

        self.nodes.push(SearchNode { key, left: None, right: None });
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Longest root-to-leaf chain (1 for a single node)
    pub fn height(&self) -> usize {
        let mut best = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            best = best.max(depth);
            let node = &self.nodes[idx];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }

        best
    }

    /// Keys in ascending order
    pub fn iter(&self) -> InOrder<'_> {
        InOrder {
            tree: self,
            stack: Vec::new(),
            next: self.root,
        }
    }

    /// Consume the tree, yielding keys in ascending order
    pub fn into_sorted(mut self) -> Vec<String> {
        let order: Vec<usize> = self.in_order_indices();
        order
            .into_iter()
            .map(|idx| std::mem::take(&mut self.nodes[idx].key))
            .collect()
    }

    fn in_order_indices(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut walk = InOrder {
            tree: self,
            stack: Vec::new(),
            next: self.root,
        };
        while let Some(idx) = walk.next_index() {
            out.push(idx);
        }
        out
    }
}

/// In-order iterator over a [`SearchTree`]
pub struct InOrder<'a> {
    tree: &'a SearchTree,
    stack: Vec<usize>,
    next: Option<usize>,
}

impl InOrder<'_> {
    fn next_index(&mut self) -> Option<usize> {
        while let Some(idx) = self.next {
            self.stack.push(idx);
            self.next = self.tree.nodes[idx].left;
        }

        let idx = self.stack.pop()?;
        self.next = self.tree.nodes[idx].right;
        Some(idx)
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next_index()?;
        let tree: &'a SearchTree = self.tree;
        Some(tree.nodes[idx].key.as_str())
    }
}

/// Walk the whole tree under `root` and collect full paths of nodes named `name`
///
/// Pre-order, slot order. Every occupied slot is compared and every directory
/// is entered, whether alive or dead.
pub fn collect_matches(arena: &NodeArena, root: NodeId, name: &str) -> SearchTree {
    let mut results = SearchTree::new();
    // (directory, next slot to inspect)
    let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];

    while let Some(frame) = stack.last_mut() {
        let (dir, start) = *frame;
        let table = match arena.get(dir).and_then(|node| node.table()) {
            Some(table) => table,
            None => {
                stack.pop();
                continue;
            }
        };

        let hit = (start..TABLE_CAPACITY).find_map(|slot| table.slot(slot).map(|id| (slot, id)));
        let (slot, child) = match hit {
            Some(hit) => hit,
            None => {
                stack.pop();
                continue;
            }
        };
        frame.1 = slot + 1;

        let node = &arena[child];
        if node.name() == name {
            let path = full_path(arena, child);
            trace!(path = %path, "find match");
            results.insert(path);
        }

        if node.is_dir() {
            stack.push((child, 0));
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_is_sorted() {
        let mut tree = SearchTree::new();
        for key in ["/m/x", "/a/x", "/z/x", "/b/x", "/a/a/x"] {
            tree.insert(key.to_string());
        }

        let keys: Vec<&str> = tree.iter().collect();
        assert_eq!(keys, vec!["/a/a/x", "/a/x", "/b/x", "/m/x", "/z/x"]);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut tree = SearchTree::new();
        tree.insert("/d/x".to_string());
        tree.insert("/d/x".to_string());
        tree.insert("/c/x".to_string());

        assert_eq!(tree.into_sorted(), vec!["/c/x", "/d/x", "/d/x"]);
    }

    #[test]
    fn test_byte_order_not_locale_order() {
        let mut tree = SearchTree::new();
        tree.insert("/b".to_string());
        tree.insert("/B".to_string());
        tree.insert("/a".to_string());

        // Uppercase sorts before lowercase in byte order
        assert_eq!(tree.into_sorted(), vec!["/B", "/a", "/b"]);
    }

    #[test]
    fn test_sorted_input_degenerates_to_chain() {
        let mut tree = SearchTree::new();
        for i in 0..5000 {
            tree.insert(format!("/f{:05}", i));
        }

        assert_eq!(tree.height(), 5000);
        let sorted = tree.into_sorted();
        assert_eq!(sorted.len(), 5000);
        assert_eq!(sorted.first().map(String::as_str), Some("/f00000"));
        assert_eq!(sorted.last().map(String::as_str), Some("/f04999"));
    }

    #[test]
    fn test_empty_tree() {
        let tree = SearchTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.iter().count(), 0);
        assert!(tree.into_sorted().is_empty());
    }
}
