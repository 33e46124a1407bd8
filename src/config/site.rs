//! `[site]` section configuration.
//!
//! Contains basic site information like title, author and description.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in folio.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [site]
/// title = "Jane Doe"
/// description = "Projects and notes"
/// author = "Jane Doe"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteInfo {
    /// Site title displayed in browser tab and header.
    pub title: String,

    /// Author name for meta tags and footer.
    #[serde(default = "defaults::site::author")]
    #[educe(Default = defaults::site::author())]
    pub author: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: String,

    /// BCP 47 language code (e.g., "en-GB").
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,

    /// Maximum characters of a project description shown on a card.
    #[serde(default = "defaults::site::card_description_chars")]
    #[educe(Default = defaults::site::card_description_chars())]
    pub card_description_chars: usize,

    /// Copyright notice for the footer.
    #[serde(default)]
    pub copyright: String,
}
