//! Syntax highlighting for fenced code blocks.
//!
//! Syntax definitions and themes are syntect's bundled sets, loaded once.

use crate::utils::html::escape;
use regex::Regex;
use std::sync::LazyLock;
use syntect::{
    highlighting::{Theme, ThemeSet},
    html::highlighted_html_for_string,
    parsing::{SyntaxReference, SyntaxSet},
};

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// `language-<name>` class, as produced from a fence info string.
static LANGUAGE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"language-([A-Za-z0-9_+#.-]+)").unwrap());

/// Theme used when the configured one is missing.
const FALLBACK_THEME: &str = "base16-ocean.dark";

/// Whether syntect ships a theme with this name.
pub fn theme_exists(name: &str) -> bool {
    THEMES.themes.contains_key(name)
}

/// Extract the language of a fenced block from its info string.
///
/// The first word of the info string becomes a `language-<word>` class and
/// the name is read back from that class, so both ```` ```rust ```` and
/// ```` ```language-rust ```` yield `rust`. Empty info strings yield `None`.
pub fn fence_language(info: &str) -> Option<String> {
    let token = info.split_whitespace().next()?;
    let class = if token.starts_with("language-") {
        token.to_owned()
    } else {
        format!("language-{token}")
    };
    LANGUAGE_CLASS
        .captures(&class)
        .filter(|caps| caps.get(0).is_some_and(|m| m.start() == 0))
        .map(|caps| caps[1].to_owned())
}

/// Look up a grammar by fence token (extension or name, case-insensitive).
fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
    SYNTAXES.find_syntax_by_token(language)
}

fn theme(name: &str) -> Option<&'static Theme> {
    THEMES
        .themes
        .get(name)
        .or_else(|| THEMES.themes.get(FALLBACK_THEME))
}

/// Highlight `code` as `language` with the named theme.
///
/// Unknown languages highlight as plain text under the same theme, so every
/// block carrying a language still gets the themed rendering.
pub fn highlight(code: &str, language: &str, theme_name: &str) -> String {
    let syntax = find_syntax(language).unwrap_or_else(|| SYNTAXES.find_syntax_plain_text());
    let Some(theme) = theme(theme_name) else {
        return plain(code);
    };
    let lang = escape(language);

    match highlighted_html_for_string(code, &SYNTAXES, syntax, theme) {
        Ok(html) => format!(
            r#"<div class="highlight language-{lang}" data-language="{lang}">{html}</div>"#
        ),
        Err(_) => plain(code),
    }
}

/// Unstyled preformatted rendering for blocks without a language.
pub fn plain(code: &str) -> String {
    format!(r#"<pre class="plain"><code>{}</code></pre>"#, escape(code))
}
