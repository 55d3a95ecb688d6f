//! Open-addressed directory tables
//!
//! Each directory holds [`TABLE_CAPACITY`] child slots. A name's scan starts
//! at [`slot_hash`] and probes linearly, wrapping once around the table.
//!
//! Lookup rules:
//! - an empty slot ends the scan (nothing further along can match)
//! - a dead node is skipped, never matched
//! - insertion takes the first slot that is empty or dead

use crate::core::hash::{probe_sequence, slot_hash, TABLE_CAPACITY};
use crate::core::node::{NodeArena, NodeId, NodeKind};
use tracing::trace;

/// A located child: its slot in the parent table and its handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub slot: usize,
    pub id: NodeId,
}

/// Fixed-capacity child slot array of one directory
#[derive(Debug, Clone)]
pub struct DirTable {
    slots: Box<[Option<NodeId>]>,
}

impl DirTable {
    pub fn new() -> Self {
        DirTable {
            slots: vec![None; TABLE_CAPACITY].into_boxed_slice(),
        }
    }

    /// Handle stored in `slot`, if any
    pub fn slot(&self, slot: usize) -> Option<NodeId> {
        self.slots.get(slot).copied().flatten()
    }

    /// First slot usable for `name`: empty, or holding a dead node
    ///
    /// Returns `None` when a full wraparound finds neither.
    pub fn find_free_slot(&self, arena: &NodeArena, name: &str) -> Option<usize> {
        let free = probe_sequence(slot_hash(name)).find(|&i| match self.slots[i] {
            None => true,
            Some(id) => !arena[id].is_alive(),
        });
        trace!(name, slot = ?free, "free slot scan");
        free
    }

    /// Alive directory named `name`
    pub fn find_child_dir(&self, arena: &NodeArena, name: &str) -> Option<Occupant> {
        self.find_alive(arena, name, Some(NodeKind::Directory))
    }

    /// Alive file named `name`
    pub fn find_child_file(&self, arena: &NodeArena, name: &str) -> Option<Occupant> {
        self.find_alive(arena, name, Some(NodeKind::File))
    }

    /// Alive node of either kind named `name`, first in probe order
    pub fn find_child_any(&self, arena: &NodeArena, name: &str) -> Option<Occupant> {
        self.find_alive(arena, name, None)
    }

    fn find_alive(&self, arena: &NodeArena, name: &str, kind: Option<NodeKind>) -> Option<Occupant> {
        for slot in probe_sequence(slot_hash(name)) {
            let id = self.slots[slot]?;
            let node = &arena[id];

            if node.is_alive()
                && kind.map_or(true, |k| node.kind() == k)
                && node.name() == name
            {
                return Some(Occupant { slot, id });
            }
        }
        None
    }

    /// Put `id` into `slot`, returning the handle it displaced
    pub fn install(&mut self, slot: usize, id: NodeId) -> Option<NodeId> {
        self.slots[slot].replace(id)
    }

    /// Empty `slot`, returning the handle it held
    pub fn clear(&mut self, slot: usize) -> Option<NodeId> {
        self.slots[slot].take()
    }

    /// Occupied slots in index order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, id)| id.map(|id| (slot, id)))
    }

    pub fn has_alive_child(&self, arena: &NodeArena) -> bool {
        self.occupied().any(|(_, id)| arena[id].is_alive())
    }
}

impl Default for DirTable {
    fn default() -> Self {
        Self::new()
    }
}
