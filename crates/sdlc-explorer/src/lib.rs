//! SDLC Explorer
//!
//! Interactive layer over the SDLC process tree: user actions go through an
//! [`InteractionController`], which mutates the [`sdlc_tree::TreeStore`],
//! re-projects with [`sdlc_projection::project`] and hands complete frames
//! to a [`RenderAdapter`].
//!
//! # Overview
//!
//! - **controller**: add, remove, rename, coverage, search, drill-down, share
//! - **render**: the adapter trait, render frames and a recording adapter
//! - **style**: level palette and radii
//! - **share**: `?data=` share links and fail-open startup loading
//! - **config**: TOML settings for the share link base and the force layout
//! - **logging**: `tracing-subscriber` setup for the `sdlc-map` binary
//!
//! # Example
//!
//! ```rust
//! use sdlc_explorer::prelude::*;
//!
//! let mut ctl = InteractionController::new(
//!     TreeStore::default(),
//!     RecordingAdapter::new(),
//!     ExplorerConfig::default(),
//! )
//! .unwrap();
//!
//! let hits = ctl.search("stake");
//! assert_eq!(hits.len(), 4);
//!
//! ctl.add_node("Security Review", "2", Some(0)).unwrap();
//! assert_eq!(ctl.projection().len(), 45);
//! assert!(ctl.share_link().query().unwrap().starts_with("data="));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod render;
pub mod share;
pub mod style;

// Re-exports
pub use config::{ExplorerConfig, JitterConfig, LayoutConfig};
pub use controller::InteractionController;
pub use error::{ConfigError, ExplorerError};
pub use logging::LogFormat;
pub use render::{RecordingAdapter, RenderAdapter, RenderFrame};
pub use style::NodeStyle;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the explorer
    pub use crate::{
        ExplorerConfig, ExplorerError, InteractionController, RecordingAdapter, RenderAdapter,
        RenderFrame,
    };
    pub use sdlc_tree::{TreeNode, TreeStore};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
