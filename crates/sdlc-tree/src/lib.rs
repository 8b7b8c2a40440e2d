//! SDLC Tree
//!
//! The canonical hierarchical process dataset and everything that mutates it.
//!
//! # Overview
//!
//! - **TreeNode**: one process step with ordered children and a session-stable [`NodeKey`]
//! - **TreeStore**: owner of the root; add, remove, rename and coverage rollup
//! - **codec**: JSON load/serialize with path-aware [`DecodeError`]s
//! - **dataset**: the built-in SDLC tree used when nothing else is loaded
//!
//! # Example
//!
//! ```rust
//! use sdlc_tree::{TreeNode, TreeStore};
//!
//! let mut store = TreeStore::new(
//!     TreeNode::new("A").with_child(TreeNode::new("B").with_level(1)),
//! );
//! let c = store.add_child(None, TreeNode::new("C").with_level(1));
//! assert!(c.is_some());
//! assert_eq!(store.node_count(), 3);
//!
//! assert_eq!(store.remove_by_name("B"), 1);
//! let reloaded = sdlc_tree::load(&store.serialize()).unwrap();
//! assert_eq!(&reloaded, store.root());
//! ```

#![warn(missing_docs)]

pub mod codec;
pub mod dataset;
pub mod error;
pub mod node;
mod reader;
pub mod store;

// Re-exports
pub use codec::{load, serialize, serialize_pretty};
pub use dataset::default_tree;
pub use error::{DecodeError, ValidationError};
pub use node::{NodeKey, Preorder, TreeNode};
pub use store::TreeStore;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for tree operations
    pub use crate::{default_tree, DecodeError, NodeKey, TreeNode, TreeStore, ValidationError};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
