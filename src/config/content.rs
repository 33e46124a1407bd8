//! `[content]` section configuration.
//!
//! Locates the content store: an HTTP base URL or a local directory
//! holding the project manifest and per-project markdown.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section in folio.toml.
///
/// # Example
/// ```toml
/// [content]
/// source = "https://example.com/content"   # or a local dir, e.g. "content"
/// manifest = "projects.json"
/// projects_dir = "projects"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Base of the content store. `http://` and `https://` values are
    /// fetched over the network, anything else is a directory relative to root.
    #[serde(default = "defaults::content::source")]
    #[educe(Default = defaults::content::source())]
    pub source: String,

    /// Manifest file name under the source.
    #[serde(default = "defaults::content::manifest")]
    #[educe(Default = defaults::content::manifest())]
    pub manifest: String,

    /// Directory under the source holding `<id>.md` files.
    #[serde(default = "defaults::content::projects_dir")]
    #[educe(Default = defaults::content::projects_dir())]
    pub projects_dir: String,
}

/// Resolved location of the content store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Http(String),
    Local(PathBuf),
}

impl ContentConfig {
    /// Whether `source` names a remote store.
    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }

    /// Classify `source`. Local paths are used as-is (already rooted by the loader).
    pub fn resolve(&self) -> ContentSource {
        if self.is_remote() {
            ContentSource::Http(self.source.trim_end_matches('/').to_owned())
        } else {
            ContentSource::Local(PathBuf::from(&self.source))
        }
    }
}
