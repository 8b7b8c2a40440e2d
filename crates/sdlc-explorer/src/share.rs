//! Share links
//!
//! A share link is the page URL with the whole tree, serialized and
//! percent-encoded, in its `data` query parameter.

use crate::error::ExplorerError;
use sdlc_tree::{codec, DecodeError, TreeNode, TreeStore};
use url::Url;

/// Query parameter that carries the tree
pub const DATA_PARAM: &str = "data";

/// Link that reconstructs `root` when opened
///
/// Any query or fragment already on `base` is dropped.
#[must_use]
pub fn share_link(base: &Url, root: &TreeNode) -> Url {
    let mut link = base.clone();
    link.set_fragment(None);
    let encoded = urlencoding::encode(&codec::serialize(root)).into_owned();
    link.set_query(Some(&format!("{DATA_PARAM}={encoded}")));
    link
}

/// Parse user-supplied link text
///
/// # Errors
/// [`ExplorerError::InvalidUrl`] when `input` is not an absolute URL.
pub fn parse_link(input: &str) -> Result<Url, ExplorerError> {
    Url::parse(input).map_err(|source| ExplorerError::InvalidUrl {
        url: input.to_string(),
        source,
    })
}

/// Tree carried by `link`, or `None` when it has no `data` parameter
///
/// # Errors
/// [`DecodeError`] when the parameter is present but not a tree encoding.
pub fn tree_from_link(link: &Url) -> Result<Option<TreeNode>, DecodeError> {
    let data = link
        .query_pairs()
        .find(|(key, _)| key == DATA_PARAM)
        .map(|(_, value)| value.into_owned());
    data.map(|data| codec::load(&data)).transpose()
}

/// Startup store: the tree in `link` if it decodes, else the built-in tree
///
/// Malformed data is logged and otherwise ignored.
#[must_use]
pub fn store_from_link(link: Option<&Url>) -> TreeStore {
    let Some(link) = link else {
        return TreeStore::default();
    };
    match tree_from_link(link) {
        Ok(Some(root)) => {
            tracing::info!(nodes = root.node_count(), "loaded tree from share link");
            TreeStore::new(root)
        }
        Ok(None) => TreeStore::default(),
        Err(err) => {
            tracing::warn!(code = err.code(), error = %err, "share link data is malformed; using default tree");
            TreeStore::default()
        }
    }
}
