//! Path splitting and resolution
//!
//! Paths are `/`-delimited. Empty segments are ignored, so `/a/b`, `a/b` and
//! `//a///b` all name the same resource. There is no `.`/`..` handling.

use crate::core::error::{NamespaceError, Result};
use crate::core::node::{NodeArena, NodeId};

/// Non-empty segments of `path`
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Split `path` into its parent prefix and final segment
///
/// Trailing slashes are ignored.
///
/// # Examples
///
/// ```
/// use slotfs::core::path::split_parent;
///
/// assert_eq!(split_parent("/docs/notes.txt").unwrap(), ("/docs", "notes.txt"));
/// assert_eq!(split_parent("top").unwrap(), ("", "top"));
/// assert!(split_parent("///").is_err());
/// ```
pub fn split_parent(path: &str) -> Result<(&str, &str)> {
    let trimmed = path.trim_end_matches('/');

    let (prefix, name) = match trimmed.rfind('/') {
        Some(idx) => (&trimmed[..idx], &trimmed[idx + 1..]),
        None => ("", trimmed),
    };

    if name.is_empty() {
        return Err(NamespaceError::InvalidPath(path.to_string()));
    }

    Ok((prefix, name))
}

/// Walk `prefix` from `root` through alive directories
///
/// Returns `None` as soon as a segment has no matching alive directory.
/// An empty prefix resolves to `root` itself.
pub fn resolve(arena: &NodeArena, root: NodeId, prefix: &str) -> Option<NodeId> {
    let mut cur = root;

    for segment in segments(prefix) {
        let table = arena.get(cur)?.table()?;
        cur = table.find_child_dir(arena, segment)?.id;
    }

    Some(cur)
}

/// Absolute path of `id`, rebuilt by climbing parent links
///
/// The root itself (no parent) contributes no segment.
pub fn full_path(arena: &NodeArena, id: NodeId) -> String {
    let mut names = Vec::new();
    let mut cur = Some(id);

    while let Some(node) = cur.and_then(|id| arena.get(id)) {
        match node.parent() {
            Some(parent) => {
                names.push(node.name());
                cur = Some(parent);
            }
            None => break,
        }
    }

    let mut path = String::with_capacity(names.iter().map(|n| n.len() + 1).sum());
    for name in names.iter().rev() {
        path.push('/');
        path.push_str(name);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::{Node, NodeKind};

    #[test]
    fn test_segments_skip_empty() {
        let parts: Vec<&str> = segments("//a///b/").collect();
        assert_eq!(parts, vec!["a", "b"]);
        assert_eq!(segments("").count(), 0);
        assert_eq!(segments("/").count(), 0);
    }

    #[test]
    fn test_split_parent_nested() {
        assert_eq!(split_parent("/a/b/c").unwrap(), ("/a/b", "c"));
        assert_eq!(split_parent("a/b/c").unwrap(), ("a/b", "c"));
        assert_eq!(split_parent("/c").unwrap(), ("", "c"));
    }

    #[test]
    fn test_split_parent_trailing_slash() {
        assert_eq!(split_parent("/a/b/").unwrap(), ("/a", "b"));
    }

    #[test]
    fn test_split_parent_rejects_empty() {
        assert!(matches!(split_parent(""), Err(NamespaceError::InvalidPath(_))));
        assert!(matches!(split_parent("/"), Err(NamespaceError::InvalidPath(_))));
    }

    fn tree() -> (NodeArena, NodeId, NodeId, NodeId) {
        let mut arena = NodeArena::new();
        let root = arena.insert(Node::new(NodeKind::Directory, ""));

        let a = arena.insert(Node::new(NodeKind::Directory, "a"));
        arena[a].set_parent(root);
        let slot = arena[root].table().unwrap().find_free_slot(&arena, "a").unwrap();
        arena[root].table_mut().unwrap().install(slot, a);

        let b = arena.insert(Node::new(NodeKind::File, "b"));
        arena[b].set_parent(a);
        let slot = arena[a].table().unwrap().find_free_slot(&arena, "b").unwrap();
        arena[a].table_mut().unwrap().install(slot, b);

        (arena, root, a, b)
    }

    #[test]
    fn test_resolve_walks_directories() {
        let (arena, root, a, _) = tree();
        assert_eq!(resolve(&arena, root, ""), Some(root));
        assert_eq!(resolve(&arena, root, "/a"), Some(a));
        assert_eq!(resolve(&arena, root, "a//"), Some(a));
        assert_eq!(resolve(&arena, root, "/missing"), None);
    }

    #[test]
    fn test_resolve_does_not_enter_files() {
        let (arena, root, _, _) = tree();
        assert_eq!(resolve(&arena, root, "/a/b"), None);
    }

    #[test]
    fn test_full_path() {
        let (arena, root, a, b) = tree();
        assert_eq!(full_path(&arena, root), "");
        assert_eq!(full_path(&arena, a), "/a");
        assert_eq!(full_path(&arena, b), "/a/b");
    }
}
