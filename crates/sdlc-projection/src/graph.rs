//! Graph elements produced by a projection

use sdlc_tree::{NodeKey, TreeNode};
use serde::Serialize;

/// Flattened view of one [`TreeNode`]
///
/// `id` is only meaningful within the projection that produced it. `key`
/// resolves back to the live node, which is how a view is later expanded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// Pre-order position in the projection, starting at 0
    pub id: usize,
    /// Session-stable key of the source node
    pub key: NodeKey,
    /// Display name
    pub name: String,
    /// Informational level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    /// AI coverage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_percentage: Option<f64>,
    /// Number of direct children in the source tree
    pub child_count: usize,
}

impl GraphNode {
    pub(crate) fn from_tree(id: usize, node: &TreeNode) -> Self {
        Self {
            id,
            key: node.key(),
            name: node.name().to_string(),
            level: node.level(),
            ai_percentage: node.ai_percentage(),
            child_count: node.children().len(),
        }
    }

    /// True when the source node has children to drill into
    #[inline]
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.child_count > 0
    }
}

/// Directed parent to child link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GraphEdge {
    /// Parent id
    pub source: usize,
    /// Child id
    pub target: usize,
}
