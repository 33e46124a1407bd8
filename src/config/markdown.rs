//! `[markdown]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[markdown]` section in folio.toml - project body rendering.
///
/// # Example
/// ```toml
/// [markdown]
/// allow_raw_html = false       # escape embedded HTML instead of rendering it
/// theme = "InspiredGitHub"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Render raw HTML found in project markdown as live markup.
    ///
    /// Only safe while every content source is first-party.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub allow_raw_html: bool,

    /// Syntax highlighting theme name (one of syntect's bundled themes).
    #[serde(default = "defaults::markdown::theme")]
    #[educe(Default = defaults::markdown::theme())]
    pub theme: String,

    /// How long a copy button shows its acknowledgment, in milliseconds.
    #[serde(default = "defaults::markdown::copy_ack_ms")]
    #[educe(Default = defaults::markdown::copy_ack_ms())]
    pub copy_ack_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_markdown_config_defaults() {
        let config: SiteConfig = toml::from_str("[site]\ntitle = \"T\"").unwrap();

        assert!(config.markdown.allow_raw_html);
        assert_eq!(config.markdown.theme, "base16-ocean.dark");
        assert_eq!(config.markdown.copy_ack_ms, 2000);
    }

    #[test]
    fn test_markdown_config_override() {
        let config = r#"
            [site]
            title = "T"

            [markdown]
            allow_raw_html = false
            theme = "InspiredGitHub"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert!(!config.markdown.allow_raw_html);
        assert_eq!(config.markdown.theme, "InspiredGitHub");
    }
}
