//! Namespace core
//!
//! - [`hash`] - Slot hashing for directory tables
//! - [`node`] - Nodes and the arena that owns them
//! - [`table`] - Open-addressed child tables with tombstones
//! - [`path`] - Path splitting, resolution and reconstruction
//! - [`search`] - Ordered aggregation of find results
//! - [`namespace`] - create/read/write/delete/delete_recursive/find
//!
//! ## Layout
//!
//! ```text
//! Namespace
//! ├── NodeArena ── Node { kind, state, name, payload, parent: NodeId }
//! │                  └── DirTable [1024 x Option<NodeId>]  (directories only)
//! └── root: NodeId
//! ```

pub mod error;
pub mod hash;
pub mod namespace;
pub mod node;
pub mod path;
pub mod search;
pub mod table;


pub use namespace::Namespace;
