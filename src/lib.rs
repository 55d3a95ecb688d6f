//! # slotfs - In-Memory Hierarchical Namespace
//!
//! `slotfs` is a small in-memory filesystem addressable by slash-delimited
//! paths, with:
//!
//! - **Fixed 1024-slot directory tables** using open addressing and
//!   Fibonacci-style slot hashing
//! - **Tombstone deletion** with purge-on-parent-delete reclamation
//! - **Recursive deletion** that frees a whole subtree immediately
//! - **Name search** across the tree with lexicographically ordered results
//! - **A line-oriented command shell** (`create`, `create_dir`, `read`,
//!   `write`, `delete`, `delete_r`, `find`, `exit`)
//!
//! ## Quick Start
//!
//! ```rust
//! use slotfs::{Namespace, Result};
//!
//! # fn main() -> Result<()> {
//! let mut ns = Namespace::new();
//!
//! ns.create_dir("/documents")?;
//! ns.create_file("/documents/report")?;
//! ns.write("/documents/report", "Hello, World!")?;
//!
//! assert_eq!(ns.read("/documents/report")?, "Hello, World!");
//! assert_eq!(ns.find("report")?, vec!["/documents/report"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving the shell
//!
//! ```rust
//! use slotfs::{Outcome, Shell};
//!
//! let mut shell = Shell::new();
//! let mut out = Vec::new();
//! let outcome = shell
//!     .run("create /z\ncreate /a\nfind a\nexit\n".as_bytes(), &mut out)
//!     .unwrap();
//!
//! assert_eq!(outcome, Outcome::Exit);
//! assert_eq!(String::from_utf8(out).unwrap(), "ok\nok\nok /a\n");
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod shell;

pub use crate::config::{LogConfig, ShellConfig, ShellOptions};
pub use crate::core::{
    error::{NamespaceError, Result},
    hash::TABLE_CAPACITY,
    node::{Node, NodeId, NodeKind, NodeState},
    Namespace,
};
pub use crate::error::{ShellError, ShellResult};
pub use crate::protocol::{Command, Response};
pub use crate::shell::{Outcome, Shell, ShellBuilder, Step};
