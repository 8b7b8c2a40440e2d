//! InteractionController - user actions in, fresh frames out
//!
//! Owns the [`TreeStore`] and the projection currently on screen. Graph ids
//! coming back from the user are resolved through that projection to
//! [`NodeKey`]s before the store is touched, so an id always means the node
//! that was displayed under it.
//!
//! Every structural change re-projects the full tree and hands the adapter
//! a complete new frame, leaving any drill-down view.

use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::render::{RenderAdapter, RenderFrame};
use crate::share;
use sdlc_projection::{project, Projection};
use sdlc_tree::{NodeKey, TreeNode, TreeStore};
use std::collections::BTreeSet;
use url::Url;

/// Wires user actions to the store, the projector and a renderer
#[derive(Debug)]
pub struct InteractionController<A: RenderAdapter> {
    store: TreeStore,
    view_root: NodeKey,
    projection: Projection,
    adapter: A,
    config: ExplorerConfig,
    base_url: Url,
}

impl<A: RenderAdapter> InteractionController<A> {
    /// Take ownership of `store` and draw the full tree once
    ///
    /// # Errors
    /// [`ExplorerError::Config`] when the configured base URL does not parse.
    pub fn new(store: TreeStore, adapter: A, config: ExplorerConfig) -> Result<Self, ExplorerError> {
        let base_url = config.base_url()?;
        let projection = project(store.root());
        let mut controller = Self {
            view_root: store.root().key(),
            store,
            projection,
            adapter,
            config,
            base_url,
        };
        controller.render();
        Ok(controller)
    }

    /// Projection currently on screen
    #[inline]
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// The canonical tree
    #[inline]
    #[must_use]
    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// The renderer
    #[inline]
    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Key of the node the view is rooted at
    #[inline]
    #[must_use]
    pub fn view_root(&self) -> NodeKey {
        self.view_root
    }

    /// True when the whole tree is on screen
    #[inline]
    #[must_use]
    pub fn is_full_view(&self) -> bool {
        self.view_root == self.store.root().key()
    }

    /// Add a node from form input
    ///
    /// `parent` is an id from the projection on screen; `None` adds a new
    /// top-level child of the root.
    ///
    /// # Errors
    /// [`ExplorerError::Validation`] for an empty name or a level that is not
    /// a positive integer, [`ExplorerError::UnknownNode`] when `parent` is not
    /// on screen. The tree is unchanged in both cases.
    pub fn add_node(
        &mut self,
        name: &str,
        level: &str,
        parent: Option<usize>,
    ) -> Result<NodeKey, ExplorerError> {
        let node = TreeNode::from_input(name, level).map_err(|err| {
            tracing::warn!(error = %err, "rejected node input");
            err
        })?;
        let parent_key = match parent {
            Some(id) => Some(self.projection.key_of(id).ok_or(ExplorerError::UnknownNode(id))?),
            None => None,
        };

        let key = self
            .store
            .add_child(parent_key, node)
            .ok_or_else(|| ExplorerError::UnknownNode(parent.unwrap_or_default()))?;
        self.show_full_tree();
        Ok(key)
    }

    /// Remove every node named exactly `name` (root excepted) with its subtree
    ///
    /// An empty name does nothing. Returns how many subtrees were removed.
    pub fn remove_node(&mut self, name: &str) -> usize {
        if name.is_empty() {
            return 0;
        }
        let removed = self.store.remove_by_name(name);
        self.show_full_tree();
        removed
    }

    /// Rename every node named exactly `from`
    ///
    /// # Errors
    /// [`ExplorerError::Validation`] when `to` is empty.
    pub fn rename_node(&mut self, from: &str, to: &str) -> Result<usize, ExplorerError> {
        let renamed = self.store.rename_by_name(from, to)?;
        self.show_full_tree();
        Ok(renamed)
    }

    /// Set AI coverage on leaves named `name` and roll it up
    ///
    /// # Errors
    /// [`ExplorerError::Validation`] when `pct` is outside `0..=100`.
    pub fn set_ai_percentage(&mut self, name: &str, pct: f64) -> Result<usize, ExplorerError> {
        let updated = self.store.set_ai_percentage(name, pct)?;
        self.show_full_tree();
        Ok(updated)
    }

    /// Highlight nodes on screen whose name contains `term`, ignoring case
    ///
    /// An empty term matches nothing and leaves the scene alone.
    pub fn search(&mut self, term: &str) -> BTreeSet<usize> {
        if term.is_empty() {
            return BTreeSet::new();
        }
        let matches = self.projection.search(term);
        tracing::debug!(term, matches = matches.len(), "search");
        self.adapter.highlight(&matches);
        matches
    }

    /// Re-root the view at the node shown under `id`
    ///
    /// Returns `false`, and keeps the view, when that node has no children.
    ///
    /// # Errors
    /// [`ExplorerError::UnknownNode`] when `id` is not on screen.
    pub fn drill_into(&mut self, id: usize) -> Result<bool, ExplorerError> {
        let key = self
            .projection
            .key_of(id)
            .ok_or(ExplorerError::UnknownNode(id))?;
        let Some(subtree) = self.store.find(key) else {
            return Err(ExplorerError::UnknownNode(id));
        };
        if subtree.is_leaf() {
            return Ok(false);
        }

        tracing::info!(id, name = %subtree.name(), "drilled into subtree");
        self.projection = project(subtree);
        self.view_root = key;
        self.render();
        Ok(true)
    }

    /// Go back to the full tree
    pub fn reset_view(&mut self) {
        self.show_full_tree();
    }

    /// Link that reconstructs the full tree, whatever the view
    #[must_use]
    pub fn share_link(&self) -> Url {
        share::share_link(&self.base_url, self.store.root())
    }

    /// Give back the store and the adapter
    #[must_use]
    pub fn into_parts(self) -> (TreeStore, A) {
        (self.store, self.adapter)
    }

    fn show_full_tree(&mut self) {
        self.view_root = self.store.root().key();
        self.projection = project(self.store.root());
        self.render();
    }

    fn render(&mut self) {
        let frame = RenderFrame::new(self.projection.clone(), self.config.layout.clone());
        self.adapter.replace(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingAdapter;
    use pretty_assertions::assert_eq;

    fn controller() -> InteractionController<RecordingAdapter> {
        InteractionController::new(
            TreeStore::default(),
            RecordingAdapter::new(),
            ExplorerConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn new_renders_full_tree_once() {
        let ctl = controller();
        assert_eq!(ctl.adapter().frames_rendered(), 1);
        assert_eq!(ctl.projection().len(), 44);
        assert!(ctl.is_full_view());
    }

    #[test]
    fn drill_into_leaf_keeps_view() {
        let mut ctl = controller();
        let leaf = ctl
            .projection()
            .nodes()
            .iter()
            .find(|n| n.child_count == 0)
            .map(|n| n.id)
            .unwrap();
        assert!(!ctl.drill_into(leaf).unwrap());
        assert_eq!(ctl.adapter().frames_rendered(), 1);
        assert!(matches!(ctl.drill_into(999), Err(ExplorerError::UnknownNode(999))));
    }

    #[test]
    fn mutation_leaves_drill_down() {
        let mut ctl = controller();
        assert!(ctl.drill_into(1).unwrap());
        assert!(!ctl.is_full_view());

        ctl.add_node("Kickoff", "2", Some(0)).unwrap();
        assert!(ctl.is_full_view());
        assert_eq!(ctl.projection().len(), 45);
    }
}
