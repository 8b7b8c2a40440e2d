//! TreeStore - owner of the canonical process tree
//!
//! All walks use explicit work-lists, so arbitrarily deep trees are safe.
//! Parents are addressed by [`NodeKey`]. Callers holding only a pre-order
//! position can use [`TreeStore::add_child_at_position`].

use crate::codec;
use crate::dataset::default_tree;
use crate::error::{DecodeError, ValidationError};
use crate::node::{NodeKey, TreeNode};

/// Owner of the root [`TreeNode`]
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStore {
    root: TreeNode,
}

impl TreeStore {
    /// Create a store around an existing tree
    #[inline]
    #[must_use]
    pub fn new(root: TreeNode) -> Self {
        Self { root }
    }

    /// Decode a store from JSON
    ///
    /// # Errors
    /// [`DecodeError`] when the input is not a tree encoding.
    pub fn from_json(input: &str) -> Result<Self, DecodeError> {
        codec::load(input).map(Self::new)
    }

    /// Current root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Give up ownership of the tree
    #[inline]
    #[must_use]
    pub fn into_root(self) -> TreeNode {
        self.root
    }

    /// Replace the root with a decoded tree
    ///
    /// On error the current root is kept.
    ///
    /// # Errors
    /// [`DecodeError`] when the input is not a tree encoding.
    pub fn load(&mut self, input: &str) -> Result<(), DecodeError> {
        let root = codec::load(input)?;
        tracing::info!(nodes = root.node_count(), "loaded tree");
        self.root = root;
        Ok(())
    }

    /// Encode the full tree
    #[inline]
    #[must_use]
    pub fn serialize(&self) -> String {
        codec::serialize(&self.root)
    }

    /// Total number of nodes, root included
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Look up a node by key
    #[must_use]
    pub fn find(&self, key: NodeKey) -> Option<&TreeNode> {
        self.root.preorder().find(|node| node.key == key)
    }

    /// True when a node with this key is in the tree
    #[inline]
    #[must_use]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.find(key).is_some()
    }

    /// Look up a node by pre-order position (0 is the root)
    #[must_use]
    pub fn find_by_position(&self, position: usize) -> Option<&TreeNode> {
        self.root.preorder().nth(position)
    }

    fn find_mut(&mut self, key: NodeKey) -> Option<&mut TreeNode> {
        let mut stack = vec![&mut self.root];
        while let Some(node) = stack.pop() {
            if node.key == key {
                return Some(node);
            }
            stack.extend(node.children.iter_mut());
        }
        None
    }

    /// Append `node` under `parent`, or under the root when `parent` is `None`
    ///
    /// Returns the key of the inserted node, or `None` (and leaves the tree
    /// untouched) when no node has the parent key. A subtree whose keys are
    /// already present, e.g. a clone of an existing branch, is re-keyed first.
    pub fn add_child(&mut self, parent: Option<NodeKey>, mut node: TreeNode) -> Option<NodeKey> {
        if node.preorder().any(|n| self.contains(n.key)) {
            node.rekey();
        }
        let key = node.key;
        let name = node.name.clone();

        let target = match parent {
            None => &mut self.root,
            Some(parent_key) => match self.find_mut(parent_key) {
                Some(target) => target,
                None => {
                    tracing::warn!(parent = %parent_key, name = %name, "parent not found; node not added");
                    return None;
                }
            },
        };
        target.children.push(node);
        tracing::info!(%key, name = %name, parent = ?parent, "added node");
        Some(key)
    }

    /// Append `node` under the node at a pre-order `position`
    ///
    /// Positions are only meaningful against the tree they were taken from;
    /// prefer [`TreeStore::add_child`] with a key.
    pub fn add_child_at_position(
        &mut self,
        position: Option<usize>,
        node: TreeNode,
    ) -> Option<NodeKey> {
        match position {
            None => self.add_child(None, node),
            Some(pos) => {
                let parent = self.find_by_position(pos).map(TreeNode::key);
                match parent {
                    Some(parent) => self.add_child(Some(parent), node),
                    None => {
                        tracing::warn!(position = pos, "no node at position; node not added");
                        None
                    }
                }
            }
        }
    }

    /// Remove every non-root node named exactly `name`, with its subtree
    ///
    /// Matching is exact and case-sensitive. Returns how many subtrees were
    /// removed.
    pub fn remove_by_name(&mut self, name: &str) -> usize {
        let mut removed = 0;
        let mut stack = vec![&mut self.root];
        while let Some(node) = stack.pop() {
            let before = node.children.len();
            node.children.retain(|child| child.name != name);
            removed += before - node.children.len();
            stack.extend(node.children.iter_mut());
        }

        if removed == 0 {
            tracing::debug!(name, "no node to remove");
        } else {
            tracing::info!(name, removed, "removed subtrees");
        }
        removed
    }

    /// Rename every node named exactly `from`, root included
    ///
    /// # Errors
    /// [`ValidationError::EmptyName`] when `to` is empty.
    pub fn rename_by_name(&mut self, from: &str, to: &str) -> Result<usize, ValidationError> {
        if to.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let mut renamed = 0;
        let mut stack = vec![&mut self.root];
        while let Some(node) = stack.pop() {
            if node.name == from {
                node.name = to.to_string();
                renamed += 1;
            }
            stack.extend(node.children.iter_mut());
        }

        tracing::info!(from, to, renamed, "renamed nodes");
        Ok(renamed)
    }

    /// Set AI coverage on every leaf named `name`, then roll it up
    ///
    /// After a match every node with children holds the mean of its
    /// children's coverage, counting unset children as 0.
    ///
    /// # Errors
    /// [`ValidationError::PercentageOutOfRange`] unless `0 <= pct <= 100`.
    pub fn set_ai_percentage(&mut self, name: &str, pct: f64) -> Result<usize, ValidationError> {
        if !(0.0..=100.0).contains(&pct) {
            return Err(ValidationError::PercentageOutOfRange(pct));
        }

        let mut updated = 0;
        let mut stack = vec![&mut self.root];
        while let Some(node) = stack.pop() {
            if node.children.is_empty() && node.name == name {
                node.ai_percentage = Some(pct);
                updated += 1;
            }
            stack.extend(node.children.iter_mut());
        }

        if updated > 0 {
            self.rollup_ai_percentages();
        }
        tracing::info!(name, pct, updated, "set ai coverage");
        Ok(updated)
    }

    /// Recompute coverage of every inner node from its children
    fn rollup_ai_percentages(&mut self) {
        let order: Vec<&TreeNode> = self.root.preorder().collect();
        let mut sizes = vec![1usize; order.len()];
        let mut values: Vec<Option<f64>> = vec![None; order.len()];

        // Reverse pre-order sees every descendant before its ancestor.
        for (pos, node) in order.iter().enumerate().rev() {
            if node.children.is_empty() {
                values[pos] = node.ai_percentage;
                continue;
            }
            let mut child_pos = pos + 1;
            let mut total = 0.0;
            for _ in &node.children {
                total += values[child_pos].unwrap_or(0.0);
                sizes[pos] += sizes[child_pos];
                child_pos += sizes[child_pos];
            }
            #[allow(clippy::cast_precision_loss)]
            let mean = total / node.children.len() as f64;
            values[pos] = Some(mean);
        }

        let mut values = values.into_iter();
        let mut stack = vec![&mut self.root];
        while let Some(node) = stack.pop() {
            node.ai_percentage = values.next().flatten();
            stack.extend(node.children.iter_mut().rev());
        }
    }
}

impl Default for TreeStore {
    /// Store holding the built-in SDLC dataset
    fn default() -> Self {
        Self::new(default_tree())
    }
}
