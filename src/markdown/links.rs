//! Hyperlink hardening.
//!
//! Every anchor the site emits opens in a new browsing context with opener
//! and referrer isolation, whatever the link points at.

use crate::utils::html::escape;
use regex::Regex;
use std::sync::LazyLock;

/// Attributes appended to every anchor.
pub const NEW_CONTEXT_ATTRS: &str = r#"target="_blank" rel="noopener noreferrer""#;

/// Opening `<a ...>` tag in raw HTML.
static ANCHOR_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a(\s[^>]*?)?\s*(/?)>").unwrap());

/// `target=` / `rel=` attributes with any quoting style.
static TARGET_OR_REL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\s(?:target|rel)\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+)"#).unwrap()
});

/// Opening tag for a link to `href`, with an optional title.
pub fn anchor_open(href: &str, title: &str) -> String {
    let title = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape(title))
    };
    format!(r#"<a href="{}"{title} {NEW_CONTEXT_ATTRS}>"#, escape(href))
}

/// Full anchor element with escaped text.
pub fn anchor(href: &str, text: &str, class: &str) -> String {
    let class = if class.is_empty() {
        String::new()
    } else {
        format!(r#" class="{class}""#)
    };
    format!(
        r#"<a href="{}"{class} {NEW_CONTEXT_ATTRS}>{}</a>"#,
        escape(href),
        escape(text)
    )
}

/// Rewrite every `<a>` opening tag in a raw HTML fragment so that it carries
/// the new-context attributes, replacing author-supplied `target`/`rel`.
pub fn harden_anchors(html: &str) -> String {
    ANCHOR_OPEN
        .replace_all(html, |caps: &regex::Captures<'_>| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let attrs = TARGET_OR_REL.replace_all(attrs, "");
            let attrs = attrs.trim_end();
            let self_closing = caps.get(2).map_or("", |m| m.as_str());
            format!("<a{attrs} {NEW_CONTEXT_ATTRS}{self_closing}>")
        })
        .into_owned()
}
