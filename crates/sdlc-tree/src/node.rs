//! TreeNode - one step of the process tree
//!
//! Provides [`TreeNode`] and the session-stable [`NodeKey`] it carries.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use uuid::Uuid;

/// Session-stable identity of a [`TreeNode`]
///
/// Minted when a node is created or decoded. Keys are never serialized, so a
/// share link reloaded in another session gets fresh keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeKey(Uuid);

impl NodeKey {
    /// Mint a new random key
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NodeKey {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for NodeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A process step with ordered children
///
/// `level` is informational (1-5 in the shipped data) and is not checked
/// against actual depth. A node with no children and a node whose children
/// were all removed are the same thing.
///
/// Equality is structural: name, level, coverage and children in order.
/// Keys do not take part.
///
/// # Example
/// ```
/// use sdlc_tree::TreeNode;
///
/// let design = TreeNode::new("Design")
///     .with_level(1)
///     .with_child(TreeNode::new("System Architecture").with_level(2));
/// assert_eq!(design.children().len(), 1);
/// assert_eq!(design.node_count(), 2);
/// ```
#[derive(Debug)]
pub struct TreeNode {
    pub(crate) name: String,
    pub(crate) level: Option<u32>,
    pub(crate) ai_percentage: Option<f64>,
    pub(crate) children: Vec<TreeNode>,
    pub(crate) key: NodeKey,
}

impl TreeNode {
    /// Create a leaf with no level
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            ai_percentage: None,
            children: Vec::new(),
            key: NodeKey::new(),
        }
    }

    /// Build a node from raw form input
    ///
    /// The name must be non-empty and the level must parse as a positive
    /// integer.
    ///
    /// # Errors
    /// [`ValidationError::EmptyName`] or [`ValidationError::InvalidLevel`].
    pub fn from_input(name: &str, level: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let parsed = level
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|l| *l > 0)
            .ok_or_else(|| ValidationError::InvalidLevel(level.to_string()))?;
        Ok(Self::new(name).with_level(parsed))
    }

    /// Set the level
    #[inline]
    #[must_use]
    pub fn with_level(self, level: u32) -> Self {
        self.with_level_opt(Some(level))
    }

    /// Set or clear the level
    #[inline]
    #[must_use]
    pub fn with_level_opt(mut self, level: Option<u32>) -> Self {
        self.level = level;
        self
    }

    /// Set AI coverage, clamped to `0..=100`
    #[inline]
    #[must_use]
    pub fn with_ai_percentage(self, pct: f64) -> Self {
        self.with_ai_percentage_opt(Some(pct))
    }

    /// Set or clear AI coverage; non-finite values clear it
    #[inline]
    #[must_use]
    pub fn with_ai_percentage_opt(mut self, pct: Option<f64>) -> Self {
        self.ai_percentage = pct.filter(|p| p.is_finite()).map(|p| p.clamp(0.0, 100.0));
        self
    }

    /// Append one child
    #[inline]
    #[must_use]
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children in order
    #[inline]
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = TreeNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Informational level, if any
    #[inline]
    #[must_use]
    pub fn level(&self) -> Option<u32> {
        self.level
    }

    /// AI coverage, if set or rolled up
    #[inline]
    #[must_use]
    pub fn ai_percentage(&self) -> Option<f64> {
        self.ai_percentage
    }

    /// Children in order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Session-stable key
    #[inline]
    #[must_use]
    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// True when the node has no children
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order walk of this subtree, self first
    #[inline]
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Number of nodes in this subtree, self included
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.preorder().count()
    }

    /// Copy of this node without its children, key included
    fn shallow_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            level: self.level,
            ai_percentage: self.ai_percentage,
            children: Vec::with_capacity(self.children.len()),
            key: self.key,
        }
    }

    /// Mint fresh keys for every node in this subtree
    pub(crate) fn rekey(&mut self) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.key = NodeKey::new();
            stack.extend(node.children.iter_mut());
        }
    }
}

// Copies keep their keys. Built bottom-up so depth costs heap, not stack.
impl Clone for TreeNode {
    fn clone(&self) -> Self {
        let mut root = self.shallow_copy();
        let mut stack: Vec<(&TreeNode, TreeNode)> = Vec::new();
        loop {
            let (source, built) = match stack.last() {
                Some((source, copy)) => (*source, copy.children.len()),
                None => (self, root.children.len()),
            };
            if let Some(next) = source.children.get(built) {
                stack.push((next, next.shallow_copy()));
                continue;
            }
            let Some((_, finished)) = stack.pop() else {
                return root;
            };
            match stack.last_mut() {
                Some((_, parent)) => parent.children.push(finished),
                None => root.children.push(finished),
            }
        }
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.name != b.name
                || a.level != b.level
                || a.ai_percentage != b.ai_percentage
                || a.children.len() != b.children.len()
            {
                return false;
            }
            pending.extend(a.children.iter().zip(b.children.iter()));
        }
        true
    }
}

// Deep chains would otherwise drop recursively.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut orphans = std::mem::take(&mut self.children);
        while let Some(mut node) = orphans.pop() {
            orphans.append(&mut node.children);
        }
    }
}

/// Pre-order iterator over a subtree
///
/// Visits a node before its children and children in order, which is the
/// same order projections number their nodes in.
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        TreeNode::new("A").with_children([
            TreeNode::new("B").with_child(TreeNode::new("C")),
            TreeNode::new("D"),
        ])
    }

    #[test]
    fn preorder_visits_parent_before_children() {
        let tree = sample();
        let names: Vec<_> = tree.preorder().map(TreeNode::name).collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
    }

    #[test]
    fn equality_ignores_keys() {
        let a = sample();
        let b = sample();
        assert_ne!(a.key(), b.key());
        assert_eq!(a, b);
    }

    #[test]
    fn equality_respects_child_order() {
        let a = TreeNode::new("R").with_children([TreeNode::new("x"), TreeNode::new("y")]);
        let b = TreeNode::new("R").with_children([TreeNode::new("y"), TreeNode::new("x")]);
        assert_ne!(a, b);
    }

    #[test]
    fn from_input_validates() {
        assert_eq!(
            TreeNode::from_input("", "2").unwrap_err(),
            ValidationError::EmptyName
        );
        assert_eq!(
            TreeNode::from_input("Review", "abc").unwrap_err(),
            ValidationError::InvalidLevel("abc".into())
        );
        assert_eq!(
            TreeNode::from_input("Review", "0").unwrap_err(),
            ValidationError::InvalidLevel("0".into())
        );

        for partial in ["1.5", "3abc"] {
            assert_eq!(
                TreeNode::from_input("Review", partial).unwrap_err(),
                ValidationError::InvalidLevel(partial.into())
            );
        }

        let node = TreeNode::from_input("Review", " 3 ").unwrap();
        assert_eq!(node.name(), "Review");
        assert_eq!(node.level(), Some(3));
        assert!(node.is_leaf());
    }

    #[test]
    fn ai_percentage_is_clamped() {
        assert_eq!(TreeNode::new("x").with_ai_percentage(140.0).ai_percentage(), Some(100.0));
        assert_eq!(TreeNode::new("x").with_ai_percentage(f64::NAN).ai_percentage(), None);
    }

    #[test]
    fn rekey_changes_every_key() {
        let mut tree = sample();
        let before: Vec<_> = tree.preorder().map(TreeNode::key).collect();
        tree.rekey();
        let after: Vec<_> = tree.preorder().map(TreeNode::key).collect();
        assert!(before.iter().zip(&after).all(|(a, b)| a != b));
    }

    #[test]
    fn clone_keeps_keys_and_order() {
        let tree = sample();
        let copy = tree.clone();
        assert_eq!(copy, tree);
        let keys = |t: &TreeNode| t.preorder().map(TreeNode::key).collect::<Vec<_>>();
        assert_eq!(keys(&copy), keys(&tree));
    }

    #[test]
    fn deep_chain_clones_without_overflow() {
        let mut node = TreeNode::new("leaf");
        for i in 0..50_000 {
            node = TreeNode::new(format!("n{i}")).with_child(node);
        }
        let copy = node.clone();
        assert!(copy == node);
        assert_eq!(copy.node_count(), 50_001);
    }

    #[test]
    fn deep_chain_drops_without_overflow() {
        let mut node = TreeNode::new("leaf");
        for i in 0..50_000 {
            node = TreeNode::new(format!("n{i}")).with_child(node);
        }
        assert_eq!(node.node_count(), 50_001);
        drop(node);
    }
}
