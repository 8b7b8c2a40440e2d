//! Projection - one disposable flattening of a (sub)tree

use crate::graph::{GraphEdge, GraphNode};
use sdlc_tree::{NodeKey, TreeNode};
use serde::Serialize;
use std::collections::BTreeSet;

/// Nodes and edges of a projected subtree
///
/// Node ids equal their index in [`Projection::nodes`]. Edges appear in the
/// order their targets were visited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    root: NodeKey,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl Projection {
    /// All nodes, indexed by id
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// All parent to child edges
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Key of the projected root
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Node with the given id
    #[inline]
    #[must_use]
    pub fn node(&self, id: usize) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Key of the tree node behind `id`
    #[inline]
    #[must_use]
    pub fn key_of(&self, id: usize) -> Option<NodeKey> {
        self.node(id).map(|node| node.key)
    }

    /// Id of the node with `key`, if it is part of this projection
    #[must_use]
    pub fn id_of(&self, key: NodeKey) -> Option<usize> {
        self.nodes.iter().position(|node| node.key == key)
    }

    /// Ids of the direct children of `id`, in order
    pub fn children_of(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .filter(move |edge| edge.source == id)
            .map(|edge| edge.target)
    }

    /// Number of nodes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a projection holds at least its root
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids whose name contains `term`, ignoring case
    ///
    /// An empty term matches nothing.
    #[must_use]
    pub fn search(&self, term: &str) -> BTreeSet<usize> {
        if term.is_empty() {
            return BTreeSet::new();
        }
        let needle = term.to_lowercase();
        self.nodes
            .iter()
            .filter(|node| node.name.to_lowercase().contains(&needle))
            .map(|node| node.id)
            .collect()
    }
}

/// Flatten the subtree under `root`
///
/// Pre-order depth-first: ids count up from 0 in visiting order and every
/// non-root node gets one edge from its parent. Deterministic for a given
/// tree; ids are not stable across edits.
#[must_use]
pub fn project(root: &TreeNode) -> Projection {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut stack: Vec<(&TreeNode, Option<usize>)> = vec![(root, None)];

    while let Some((node, parent)) = stack.pop() {
        let id = nodes.len();
        nodes.push(GraphNode::from_tree(id, node));
        if let Some(source) = parent {
            edges.push(GraphEdge { source, target: id });
        }
        stack.extend(node.children().iter().rev().map(|child| (child, Some(id))));
    }

    tracing::debug!(root = %root.name(), nodes = nodes.len(), edges = edges.len(), "projected tree");
    Projection {
        root: root.key(),
        nodes,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chain() -> TreeNode {
        TreeNode::new("A").with_child(TreeNode::new("B").with_child(TreeNode::new("C")))
    }

    #[test]
    fn chain_projects_to_sequential_ids() {
        let projection = project(&chain());
        let names: Vec<_> = projection.nodes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(
            projection.edges(),
            [
                GraphEdge { source: 0, target: 1 },
                GraphEdge { source: 1, target: 2 },
            ]
        );
    }

    #[test]
    fn siblings_are_numbered_after_earlier_subtrees() {
        let tree = TreeNode::new("R").with_children([
            TreeNode::new("x").with_child(TreeNode::new("x1")),
            TreeNode::new("y"),
        ]);
        let projection = project(&tree);
        assert_eq!(projection.node(3).map(|n| n.name.as_str()), Some("y"));
        assert_eq!(projection.children_of(0).collect::<Vec<_>>(), [1, 3]);
        assert_eq!(projection.children_of(3).count(), 0);
    }

    #[test]
    fn keys_resolve_both_ways() {
        let tree = chain();
        let projection = project(&tree);
        let c = &tree.children()[0].children()[0];
        assert_eq!(projection.root(), tree.key());
        assert_eq!(projection.key_of(2), Some(c.key()));
        assert_eq!(projection.id_of(c.key()), Some(2));
        assert_eq!(projection.key_of(3), None);
    }

    #[test]
    fn child_count_mirrors_tree() {
        let projection = project(&chain());
        assert!(projection.node(0).unwrap().has_children());
        assert_eq!(projection.node(2).unwrap().child_count, 0);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let tree = TreeNode::new("Review").with_children([
            TreeNode::new("code REVIEW"),
            TreeNode::new("Deploy"),
        ]);
        let projection = project(&tree);
        assert_eq!(projection.search("review"), BTreeSet::from([0, 1]));
        assert!(projection.search("").is_empty());
        assert!(projection.search("zzz").is_empty());
    }
}
