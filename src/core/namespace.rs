//! Namespace operations
//!
//! Every path operation follows the same shape: split off the final segment,
//! resolve the rest to an alive parent directory, then act on the parent's
//! table. Find instead walks the whole tree.

use crate::core::error::{NamespaceError, Result};
use crate::core::node::{Node, NodeArena, NodeId, NodeKind};
use crate::core::path::{resolve, split_parent};
use crate::core::search::collect_matches;
use crate::core::table::Occupant;
use tracing::{debug, trace};

/// In-memory hierarchical namespace
///
/// Owns the node arena and the root directory. All operations run to
/// completion on `&mut self`; there is no internal locking.
///
/// # Examples
///
/// ```
/// use slotfs::Namespace;
///
/// let mut ns = Namespace::new();
/// ns.create_dir("/docs").unwrap();
/// ns.create_file("/docs/todo").unwrap();
/// assert_eq!(ns.write("/docs/todo", "milk").unwrap(), 4);
/// assert_eq!(ns.read("/docs/todo").unwrap(), "milk");
/// assert_eq!(ns.find("todo").unwrap(), vec!["/docs/todo"]);
/// ```
#[derive(Debug)]
pub struct Namespace {
    arena: NodeArena,
    root: NodeId,
}

impl Namespace {
    pub fn new() -> Self {
        let mut arena = NodeArena::new();
        let root = arena.insert(Node::new(NodeKind::Directory, ""));
        Namespace { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    /// Nodes currently resident, root and tombstones included
    pub fn resident_nodes(&self) -> usize {
        self.arena.len()
    }

    /// Alive directory that would hold `path`'s final segment, plus that segment
    fn parent_of<'p>(&self, path: &'p str) -> Result<(NodeId, &'p str)> {
        let (prefix, name) = split_parent(path)?;
        let parent = resolve(&self.arena, self.root, prefix)
            .ok_or_else(|| NamespaceError::NotFound(prefix.to_string()))?;
        Ok((parent, name))
    }

    fn lookup(&self, parent: NodeId, name: &str, kind: Option<NodeKind>) -> Option<Occupant> {
        let table = self.arena[parent].table()?;
        match kind {
            Some(NodeKind::Directory) => table.find_child_dir(&self.arena, name),
            Some(NodeKind::File) => table.find_child_file(&self.arena, name),
            None => table.find_child_any(&self.arena, name),
        }
    }

    /// Create a file or directory at `path`
    ///
    /// Fails when an alive node of the same kind and name already exists
    /// under the parent, or when the parent's table has no empty or dead slot.
    pub fn create(&mut self, kind: NodeKind, path: &str) -> Result<NodeId> {
        let (parent, name) = self.parent_of(path)?;

        if self.lookup(parent, name, Some(kind)).is_some() {
            debug!(path, ?kind, "create rejected: already exists");
            return Err(NamespaceError::AlreadyExists(path.to_string()));
        }

        let slot = self.arena[parent]
            .table()
            .and_then(|table| table.find_free_slot(&self.arena, name))
            .ok_or_else(|| {
                debug!(path, "create rejected: directory table full");
                NamespaceError::CapacityExhausted(path.to_string())
            })?;

        let mut node = Node::new(kind, name);
        node.set_parent(parent);
        let id = self.arena.insert(node);

        let displaced = self.arena[parent]
            .table_mut()
            .and_then(|table| table.install(slot, id));
        if let Some(dead) = displaced {
            // Only tombstones are ever displaced, and a dead directory's table
            // was purged when it died.
            self.arena.remove(dead);
            trace!(slot, "reclaimed tombstone on reuse");
        }

        debug!(path, ?kind, slot, "created");
        Ok(id)
    }

    pub fn create_file(&mut self, path: &str) -> Result<NodeId> {
        self.create(NodeKind::File, path)
    }

    pub fn create_dir(&mut self, path: &str) -> Result<NodeId> {
        self.create(NodeKind::Directory, path)
    }

    /// Replace the content of an existing file, returning its new byte length
    ///
    /// `data` is copied only once the target is known to exist.
    pub fn write(&mut self, path: &str, data: &str) -> Result<usize> {
        let (parent, name) = self.parent_of(path)?;
        let target = self
            .lookup(parent, name, Some(NodeKind::File))
            .ok_or_else(|| NamespaceError::NotFound(path.to_string()))?;

        let len = self.arena[target.id].replace_payload(data.to_string());
        debug!(path, len, "written");
        Ok(len)
    }

    /// Content of an existing file
    pub fn read(&self, path: &str) -> Result<&str> {
        let (parent, name) = self.parent_of(path)?;
        let target = self
            .lookup(parent, name, Some(NodeKind::File))
            .ok_or_else(|| NamespaceError::NotFound(path.to_string()))?;

        self.arena[target.id]
            .payload()
            .ok_or_else(|| NamespaceError::NotFound(path.to_string()))
    }

    /// Tombstone a file or an empty directory
    ///
    /// A directory counts as empty when no direct child is alive. Its dead
    /// children are freed and their slots emptied before it is marked dead.
    pub fn delete(&mut self, path: &str) -> Result<()> {
        let (parent, name) = self.parent_of(path)?;
        let target = self
            .lookup(parent, name, None)
            .ok_or_else(|| NamespaceError::NotFound(path.to_string()))?;

        if self.arena[target.id].is_dir() {
            let dead_slots: Vec<usize> = match self.arena[target.id].table() {
                Some(table) if table.has_alive_child(&self.arena) => {
                    debug!(path, "delete rejected: directory not empty");
                    return Err(NamespaceError::NotEmpty(path.to_string()));
                }
                Some(table) => table.occupied().map(|(slot, _)| slot).collect(),
                None => Vec::new(),
            };

            for slot in dead_slots {
                let freed = self.arena[target.id]
                    .table_mut()
                    .and_then(|table| table.clear(slot));
                if let Some(id) = freed {
                    self.arena.remove(id);
                }
            }
        }

        self.arena[target.id].tombstone();
        debug!(path, slot = target.slot, "deleted");
        Ok(())
    }

    /// Remove a node and everything beneath it, alive or dead
    ///
    /// The subtree is freed immediately and the parent's slot is emptied
    /// (not tombstoned).
    pub fn delete_recursive(&mut self, path: &str) -> Result<()> {
        let (parent, name) = self.parent_of(path)?;
        let target = self
            .lookup(parent, name, None)
            .ok_or_else(|| NamespaceError::NotFound(path.to_string()))?;

        let freed = self.release_subtree(target.id);
        if let Some(table) = self.arena[parent].table_mut() {
            table.clear(target.slot);
        }

        debug!(path, freed, "deleted recursively");
        Ok(())
    }

    /// Free `top` and all of its descendants, children before parents
    fn release_subtree(&mut self, top: NodeId) -> usize {
        let mut pending = vec![top];
        let mut order = Vec::new();

        while let Some(id) = pending.pop() {
            order.push(id);
            if let Some(table) = self.arena[id].table() {
                pending.extend(table.occupied().map(|(_, child)| child));
            }
        }

        // Reverse pre-order visits every child before its parent
        let freed = order.len();
        for id in order.into_iter().rev() {
            self.arena.remove(id);
        }
        freed
    }

    /// Full paths of every node named `name`, ascending
    ///
    /// Returns [`NamespaceError::NoMatch`] instead of an empty list.
    pub fn find(&self, name: &str) -> Result<Vec<String>> {
        if name.is_empty() {
            return Err(NamespaceError::NoMatch(name.to_string()));
        }

        let results = collect_matches(&self.arena, self.root, name);
        if results.is_empty() {
            debug!(name, "find: no match");
            return Err(NamespaceError::NoMatch(name.to_string()));
        }

        debug!(name, matches = results.len(), "find");
        Ok(results.into_sorted())
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::TABLE_CAPACITY;
    use crate::core::node::NodeState;

    #[test]
    fn test_create_and_read_empty_file() {
        let mut ns = Namespace::new();
        ns.create_file("/f").unwrap();
        assert_eq!(ns.read("/f").unwrap(), "");
    }

    #[test]
    fn test_create_requires_parent() {
        let mut ns = Namespace::new();
        assert_eq!(
            ns.create_file("/missing/f"),
            Err(NamespaceError::NotFound("/missing".to_string()))
        );
    }

    #[test]
    fn test_parent_must_be_directory() {
        let mut ns = Namespace::new();
        ns.create_file("/f").unwrap();
        assert!(matches!(ns.create_file("/f/g"), Err(NamespaceError::NotFound(_))));
    }

    #[test]
    fn test_duplicate_per_kind() {
        let mut ns = Namespace::new();
        ns.create_dir("/x").unwrap();
        assert!(matches!(ns.create_dir("/x"), Err(NamespaceError::AlreadyExists(_))));

        // A file may share a directory's name
        ns.create_file("/x").unwrap();
        assert!(matches!(ns.create_file("/x"), Err(NamespaceError::AlreadyExists(_))));
    }

    #[test]
    fn test_invalid_paths() {
        let mut ns = Namespace::new();
        assert!(matches!(ns.create_dir("/"), Err(NamespaceError::InvalidPath(_))));
        assert!(matches!(ns.read(""), Err(NamespaceError::InvalidPath(_))));
    }

    #[test]
    fn test_write_replaces_payload() {
        let mut ns = Namespace::new();
        ns.create_file("/f").unwrap();
        assert_eq!(ns.write("/f", "first").unwrap(), 5);
        assert_eq!(ns.write("/f", "2nd").unwrap(), 3);
        assert_eq!(ns.read("/f").unwrap(), "2nd");
    }

    #[test]
    fn test_write_reports_bytes_not_chars() {
        let mut ns = Namespace::new();
        ns.create_file("/f").unwrap();
        assert_eq!(ns.write("/f", "héllo").unwrap(), 6);
    }

    #[test]
    fn test_read_write_ignore_directories() {
        let mut ns = Namespace::new();
        ns.create_dir("/d").unwrap();
        assert!(matches!(ns.read("/d"), Err(NamespaceError::NotFound(_))));
        assert!(matches!(ns.write("/d", "x"), Err(NamespaceError::NotFound(_))));
    }

    #[test]
    fn test_delete_file_leaves_tombstone() {
        let mut ns = Namespace::new();
        let id = ns.create_file("/f").unwrap();
        let before = ns.resident_nodes();

        ns.delete("/f").unwrap();

        let node = ns.node(id).unwrap();
        assert_eq!(node.state(), NodeState::Dead);
        assert_eq!(node.name(), "");
        assert_eq!(ns.resident_nodes(), before);
        assert!(matches!(ns.read("/f"), Err(NamespaceError::NotFound(_))));
        assert!(matches!(ns.delete("/f"), Err(NamespaceError::NotFound(_))));
    }

    #[test]
    fn test_delete_dir_purges_dead_children() {
        let mut ns = Namespace::new();
        ns.create_dir("/d").unwrap();
        let f = ns.create_file("/d/f").unwrap();
        let g = ns.create_file("/d/g").unwrap();

        assert!(matches!(ns.delete("/d"), Err(NamespaceError::NotEmpty(_))));

        ns.delete("/d/f").unwrap();
        ns.delete("/d/g").unwrap();
        assert!(ns.node(f).is_some());

        ns.delete("/d").unwrap();
        assert!(ns.node(f).is_none());
        assert!(ns.node(g).is_none());
        // root plus the tombstoned /d
        assert_eq!(ns.resident_nodes(), 2);
    }

    #[test]
    fn test_reuse_reclaims_tombstone() {
        let mut ns = Namespace::new();
        let old = ns.create_file("/a").unwrap();
        ns.delete("/a").unwrap();

        ns.create_dir("/a").unwrap();
        assert!(ns.node(old).map_or(true, |n| n.is_alive()));
        assert_eq!(ns.resident_nodes(), 2);
    }

    #[test]
    fn test_delete_recursive_frees_everything() {
        let mut ns = Namespace::new();
        ns.create_dir("/a").unwrap();
        ns.create_dir("/a/b").unwrap();
        ns.create_file("/a/b/c").unwrap();
        ns.create_file("/a/d").unwrap();
        ns.delete("/a/d").unwrap();

        ns.delete_recursive("/a").unwrap();

        assert_eq!(ns.resident_nodes(), 1);
        assert!(matches!(ns.read("/a/b/c"), Err(NamespaceError::NotFound(_))));
        ns.create_dir("/a").unwrap();
    }

    #[test]
    fn test_delete_recursive_on_file() {
        let mut ns = Namespace::new();
        ns.create_file("/f").unwrap();
        ns.delete_recursive("/f").unwrap();
        assert_eq!(ns.resident_nodes(), 1);
        assert!(matches!(ns.delete_recursive("/f"), Err(NamespaceError::NotFound(_))));
    }

    #[test]
    fn test_find_sorted_and_nested() {
        let mut ns = Namespace::new();
        for dir in ["/z", "/a", "/m", "/a/q"] {
            ns.create_dir(dir).unwrap();
        }
        for file in ["/z/name", "/a/name", "/m/name", "/a/q/name"] {
            ns.create_file(file).unwrap();
        }

        assert_eq!(
            ns.find("name").unwrap(),
            vec!["/a/name", "/a/q/name", "/m/name", "/z/name"]
        );
    }

    #[test]
    fn test_find_matches_directories_too() {
        let mut ns = Namespace::new();
        ns.create_dir("/x").unwrap();
        ns.create_file("/x").unwrap();
        assert_eq!(ns.find("x").unwrap(), vec!["/x", "/x"]);
    }

    #[test]
    fn test_find_no_match() {
        let ns = Namespace::new();
        assert_eq!(ns.find("nothing"), Err(NamespaceError::NoMatch("nothing".to_string())));
        assert!(matches!(ns.find(""), Err(NamespaceError::NoMatch(_))));
    }

    #[test]
    fn test_capacity_boundary() {
        let mut ns = Namespace::new();
        ns.create_dir("/full").unwrap();
        for i in 0..TABLE_CAPACITY {
            ns.create_file(&format!("/full/f{}", i)).unwrap();
        }
        assert!(matches!(
            ns.create_file("/full/overflow"),
            Err(NamespaceError::CapacityExhausted(_))
        ));

        // A tombstone frees up room again
        ns.delete("/full/f7").unwrap();
        ns.create_file("/full/overflow").unwrap();
    }
}
