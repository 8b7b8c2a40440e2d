//! SDLC Projection
//!
//! Turns a process tree, or any subtree of it, into the flat node and edge
//! lists a force-directed layout consumes.
//!
//! # Overview
//!
//! - **project**: iterative pre-order flattening with ids counted from 0
//! - **Projection**: the result, with key lookup and name search
//! - **GraphNode / GraphEdge**: the flattened elements
//!
//! A projection is one-way and disposable. Nothing is ever written back to
//! the tree; make a new projection after every edit.
//!
//! # Example
//!
//! ```rust
//! use sdlc_projection::project;
//! use sdlc_tree::TreeNode;
//!
//! let tree = TreeNode::new("A").with_child(TreeNode::new("B").with_child(TreeNode::new("C")));
//! let projection = project(&tree);
//!
//! assert_eq!(projection.len(), 3);
//! assert_eq!(projection.edges().len(), 2);
//! assert!(projection.search("b").contains(&1));
//! ```

#![warn(missing_docs)]

pub mod graph;
pub mod projection;

// Re-exports
pub use graph::{GraphEdge, GraphNode};
pub use projection::{project, Projection};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for projections
    pub use crate::{project, GraphEdge, GraphNode, Projection};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
