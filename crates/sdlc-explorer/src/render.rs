//! Render adapter seam
//!
//! Layout and drawing live outside this crate. The controller hands an
//! adapter complete [`RenderFrame`]s and never patches a previous one.

use crate::config::LayoutConfig;
use crate::style::{NodeStyle, DIMMED_OPACITY, MATCH_OPACITY};
use sdlc_projection::Projection;
use serde::Serialize;
use std::collections::BTreeSet;

/// Everything a renderer needs for one full redraw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    projection: Projection,
    styles: Vec<NodeStyle>,
    layout: LayoutConfig,
}

impl RenderFrame {
    /// Style every node of `projection` by level
    #[must_use]
    pub fn new(projection: Projection, layout: LayoutConfig) -> Self {
        let styles = projection
            .nodes()
            .iter()
            .map(|node| NodeStyle::for_level(node.level))
            .collect();
        Self {
            projection,
            styles,
            layout,
        }
    }

    /// Graph to lay out
    #[inline]
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// One style per node, indexed by id
    #[inline]
    #[must_use]
    pub fn styles(&self) -> &[NodeStyle] {
        &self.styles
    }

    /// Force parameters
    #[inline]
    #[must_use]
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Consumer of render frames
pub trait RenderAdapter {
    /// Discard the current scene and draw `frame`
    fn replace(&mut self, frame: RenderFrame);

    /// Emphasise `ids` in the current scene and dim the rest
    fn highlight(&mut self, ids: &BTreeSet<usize>);
}

/// Adapter that keeps what it was asked to draw
///
/// Used by the CLI, which prints instead of drawing, and by tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingAdapter {
    last_frame: Option<RenderFrame>,
    highlighted: BTreeSet<usize>,
    frames_rendered: usize,
}

impl RecordingAdapter {
    /// Empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent frame
    #[inline]
    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    /// Ids emphasised in the current scene
    #[inline]
    #[must_use]
    pub fn highlighted(&self) -> &BTreeSet<usize> {
        &self.highlighted
    }

    /// Number of full redraws so far
    #[inline]
    #[must_use]
    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }

    /// Opacity of each node in the current scene, indexed by id
    ///
    /// Everything is opaque while nothing is highlighted.
    #[must_use]
    pub fn opacities(&self) -> Vec<f64> {
        let Some(frame) = &self.last_frame else {
            return Vec::new();
        };
        (0..frame.projection.len())
            .map(|id| {
                if self.highlighted.is_empty() || self.highlighted.contains(&id) {
                    MATCH_OPACITY
                } else {
                    DIMMED_OPACITY
                }
            })
            .collect()
    }
}

impl RenderAdapter for RecordingAdapter {
    fn replace(&mut self, frame: RenderFrame) {
        self.last_frame = Some(frame);
        self.highlighted.clear();
        self.frames_rendered += 1;
    }

    fn highlight(&mut self, ids: &BTreeSet<usize>) {
        self.highlighted.clone_from(ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdlc_projection::project;
    use sdlc_tree::TreeNode;

    fn frame() -> RenderFrame {
        let tree = TreeNode::new("R").with_children([
            TreeNode::new("a").with_level(1),
            TreeNode::new("b").with_level(2),
        ]);
        RenderFrame::new(project(&tree), LayoutConfig::default())
    }

    #[test]
    fn frame_styles_every_node() {
        let frame = frame();
        assert_eq!(frame.styles().len(), frame.projection().len());
        assert_eq!(frame.styles()[1].color, "#1f77b4");
        assert_eq!(frame.styles()[2].color, "#ff7f0e");
    }

    #[test]
    fn highlight_dims_non_matches_until_next_frame() {
        let mut adapter = RecordingAdapter::new();
        adapter.replace(frame());
        assert_eq!(adapter.opacities(), [1.0, 1.0, 1.0]);

        adapter.highlight(&BTreeSet::from([2]));
        assert_eq!(adapter.opacities(), [DIMMED_OPACITY, DIMMED_OPACITY, MATCH_OPACITY]);

        adapter.replace(frame());
        assert!(adapter.highlighted().is_empty());
        assert_eq!(adapter.frames_rendered(), 2);
    }
}
