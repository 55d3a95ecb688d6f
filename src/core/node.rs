//! Namespace nodes and the arena that owns them
//!
//! Every node of a namespace lives in a [`NodeArena`]. Directory slots and
//! parent links refer to nodes by [`NodeId`]; they never own them, so the
//! tree has exactly one owner and no reference cycles.

use crate::core::table::DirTable;
use std::ops::{Index, IndexMut};

/// Compact handle to a node in a [`NodeArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn new(index: usize) -> Self {
        assert!(index < u32::MAX as usize, "node arena index overflow");
        NodeId(index as u32)
    }

    /// Arena slot backing this handle
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// Tombstone flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Alive,
    Dead,
}

/// A directory or file in the namespace
#[derive(Debug)]
pub struct Node {
    kind: NodeKind,
    state: NodeState,
    name: String,
    /// File content; `None` for directories and released tombstones
    payload: Option<String>,
    parent: Option<NodeId>,
    /// Child slots; `None` for files
    children: Option<DirTable>,
}

impl Node {
    /// New alive node with no parent
    ///
    /// Files start with an empty payload; directories with an empty table.
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        let (payload, children) = match kind {
            NodeKind::Directory => (None, Some(DirTable::new())),
            NodeKind::File => (Some(String::new()), None),
        };

        Node {
            kind,
            state: NodeState::Alive,
            name: name.into(),
            payload,
            parent: None,
            children,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == NodeState::Alive
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: NodeId) {
        self.parent = Some(parent);
    }

    /// Replace the payload, returning the new length in bytes
    pub(crate) fn replace_payload(&mut self, data: String) -> usize {
        let len = data.len();
        self.payload = Some(data);
        len
    }

    /// Child table (directories only)
    pub fn table(&self) -> Option<&DirTable> {
        self.children.as_ref()
    }

    pub(crate) fn table_mut(&mut self) -> Option<&mut DirTable> {
        self.children.as_mut()
    }

    /// Release name and payload and mark the node dead
    ///
    /// The record stays in its parent's slot until reclaimed.
    pub(crate) fn tombstone(&mut self) {
        self.name = String::new();
        self.payload = None;
        self.state = NodeState::Dead;
    }
}

/// Slab of nodes with a free list
///
/// Removed slots are recycled by later inserts, so a long-running namespace
/// does not grow without bound under create/delete churn.
#[derive(Debug, Default)]
pub struct NodeArena {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    len: usize,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a node and return its handle
    pub fn insert(&mut self, node: Node) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId::new(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId::new(self.slots.len() - 1)
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Free a node, returning it if it was present
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let node = self.slots.get_mut(id.index())?.take()?;
        self.free.push(id.index());
        self.len -= 1;
        Some(node)
    }

    /// Number of resident nodes (alive and tombstoned)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale node handle {:?}", id),
        }
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("stale node handle {:?}", id),
        }
    }
}
