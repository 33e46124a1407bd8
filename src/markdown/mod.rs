//! Markdown rendering pipeline for project pages.
//!
//! Converts a project's markdown body into HTML plus the list of code blocks
//! it contains. The parser runs with tables, strikethrough, task lists and
//! footnotes enabled; its event stream is rewritten on the way to the HTML
//! writer:
//!
//! ```text
//! Parser ──► rewrite ──► pulldown_cmark::html ──► RenderedMarkdown
//!              │
//!              ├── fenced / indented code  → highlighted block + copy button
//!              ├── inline code             → <code class="inline-code">
//!              ├── links                   → new context, no opener/referrer
//!              └── raw HTML                → passthrough (anchors hardened)
//!                                            or escaped text
//! ```

mod copy;
mod highlight;
mod links;

pub use copy::{Clipboard, CopyAck, CopyError, CopyStatus, copy_text, copy_with_ack};
pub use highlight::{fence_language, theme_exists};
pub use links::{anchor, harden_anchors};

#[cfg(test)]
pub use copy::testing;

use crate::{config::SiteConfig, utils::html::escape};
use pulldown_cmark::{CodeBlockKind, Event, LinkType, Options, Parser, Tag, TagEnd, html};
use std::time::{Duration, Instant};

/// Rendering switches, usually taken from `[markdown]`.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Pass raw HTML through as live markup instead of escaping it.
    pub allow_raw_html: bool,
    /// syntect theme name for highlighted blocks.
    pub theme: String,
    /// Acknowledgment window of each block's copy action.
    pub copy_ack: Duration,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            allow_raw_html: true,
            theme: "base16-ocean.dark".into(),
            copy_ack: copy::DEFAULT_ACK_WINDOW,
        }
    }
}

impl MarkdownOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            allow_raw_html: config.markdown.allow_raw_html,
            theme: config.markdown.theme.clone(),
            copy_ack: Duration::from_millis(config.markdown.copy_ack_ms),
        }
    }
}

/// A fenced or indented code block found in the document.
#[derive(Debug, Clone)]
pub struct CodeBlock {
    /// Position among the document's code blocks, from 0.
    pub index: usize,
    /// Language parsed from the fence info string.
    pub language: Option<String>,
    /// Block text exactly as parsed, usually ending in a newline.
    pub source: String,
    ack: CopyAck,
}

impl CodeBlock {
    fn new(index: usize, language: Option<String>, source: String, window: Duration) -> Self {
        Self {
            index,
            language,
            source,
            ack: CopyAck::new(window),
        }
    }

    /// Text placed on the clipboard by the copy action.
    pub fn copy_text(&self) -> &str {
        copy_text(&self.source)
    }

    /// Run this block's copy action.
    pub fn copy<C: Clipboard + ?Sized>(&mut self, clipboard: &mut C, now: Instant) -> CopyStatus {
        copy_with_ack(clipboard, &self.source, &mut self.ack, now)
    }

    #[cfg(test)]
    pub fn copy_status(&self, now: Instant) -> CopyStatus {
        self.ack.status(now)
    }

    /// Block markup: copy button followed by the highlighted or plain body.
    fn to_html(&self, theme: &str) -> String {
        let body = match &self.language {
            Some(language) => highlight::highlight(&self.source, language, theme),
            None => highlight::plain(&self.source),
        };
        format!(
            concat!(
                r#"<div class="code-block" data-copy-index="{index}">"#,
                r#"<button type="button" class="copy-button" data-state="idle" data-copy-text="{text}">Copy</button>"#,
                "{body}</div>"
            ),
            index = self.index,
            text = escape(self.copy_text()),
            body = body,
        )
    }
}

/// Result of rendering one markdown document.
#[derive(Debug, Clone, Default)]
pub struct RenderedMarkdown {
    pub html: String,
    pub code_blocks: Vec<CodeBlock>,
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Render a markdown document.
pub fn render(markdown: &str, options: &MarkdownOptions) -> RenderedMarkdown {
    let mut events: Vec<Event<'_>> = Vec::new();
    let mut code_blocks: Vec<CodeBlock> = Vec::new();
    // (language, buffered text) of the code block being read
    let mut open_block: Option<(Option<String>, String)> = None;
    // Raw lines of the HTML block being read; a tag may span several lines
    let mut html_block: Option<String> = None;

    for event in Parser::new_ext(markdown, parser_options()) {
        if let Some((_, buffer)) = open_block.as_mut() {
            match event {
                Event::Text(text) => buffer.push_str(&text),
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((language, source)) = open_block.take() {
                        let block =
                            CodeBlock::new(code_blocks.len(), language, source, options.copy_ack);
                        events.push(Event::Html(block.to_html(&options.theme).into()));
                        code_blocks.push(block);
                    }
                }
                _ => {}
            }
            continue;
        }

        if let Some(buffer) = html_block.as_mut() {
            match event {
                Event::Html(raw) => buffer.push_str(&raw),
                Event::End(TagEnd::HtmlBlock) => {
                    let raw = html_block.take().unwrap_or_default();
                    events.push(raw_html(raw, options.allow_raw_html));
                    events.push(Event::End(TagEnd::HtmlBlock));
                }
                other => events.push(other),
            }
            continue;
        }

        match event {
            Event::Start(Tag::HtmlBlock) => {
                html_block = Some(String::new());
                events.push(Event::Start(Tag::HtmlBlock));
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info),
                    CodeBlockKind::Indented => None,
                };
                open_block = Some((language, String::new()));
            }
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            }) => {
                let href = if link_type == LinkType::Email && !dest_url.starts_with("mailto:") {
                    format!("mailto:{dest_url}")
                } else {
                    dest_url.into_string()
                };
                events.push(Event::Html(links::anchor_open(&href, &title).into()));
            }
            Event::Code(text) => {
                let html = format!(r#"<code class="inline-code">{}</code>"#, escape(&text));
                events.push(Event::InlineHtml(html.into()));
            }
            Event::Html(raw) => events.push(raw_html(raw.into_string(), options.allow_raw_html)),
            Event::InlineHtml(raw) if options.allow_raw_html => {
                events.push(Event::InlineHtml(harden_anchors(&raw).into()));
            }
            Event::InlineHtml(raw) => events.push(Event::Text(raw)),
            other => events.push(other),
        }
    }

    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, events.into_iter());

    RenderedMarkdown {
        html: html_output,
        code_blocks,
    }
}

/// Raw HTML as an event: hardened markup, or text when raw HTML is off.
fn raw_html(raw: String, allow: bool) -> Event<'static> {
    if allow {
        Event::Html(harden_anchors(&raw).into())
    } else {
        Event::Text(raw.into())
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryClipboard;
    use super::*;

    fn render_default(md: &str) -> RenderedMarkdown {
        render(md, &MarkdownOptions::default())
    }

    #[test]
    fn test_basic_markdown() {
        let out = render_default("# Hello\n\nThis is a **test**.");
        assert!(out.html.contains("<h1>Hello</h1>"));
        assert!(out.html.contains("<strong>test</strong>"));
        assert!(out.code_blocks.is_empty());
    }

    #[test]
    fn test_fenced_block_routes_to_highlighter() {
        let out = render_default("```python\nprint('hi')\n```\n");
        assert_eq!(out.code_blocks.len(), 1);
        assert_eq!(out.code_blocks[0].language.as_deref(), Some("python"));
        assert!(out.html.contains(r#"data-language="python""#));
        assert!(!out.html.contains(r#"class="plain""#));
    }

    #[test]
    fn test_block_without_info_is_plain() {
        let out = render_default("```\nraw <text>\n```\n");
        assert_eq!(out.code_blocks[0].language, None);
        assert!(out.html.contains(r#"<pre class="plain"><code>raw &lt;text&gt;"#));
        assert!(!out.html.contains("data-language"));
    }

    #[test]
    fn test_indented_block_is_plain_and_copyable() {
        let out = render_default("para\n\n    indented code\n");
        assert_eq!(out.code_blocks.len(), 1);
        assert_eq!(out.code_blocks[0].copy_text(), "indented code");
        assert!(out.html.contains(r#"class="plain""#));
    }

    #[test]
    fn test_copy_button_carries_text_without_trailing_newline() {
        let out = render_default("```\nline1\nline2\n```\n");
        assert_eq!(out.code_blocks[0].source, "line1\nline2\n");
        assert!(out.html.contains("data-copy-text=\"line1\nline2\""));
        assert!(out.html.contains(r#"class="copy-button""#));
    }

    #[test]
    fn test_block_copy_action() {
        let mut out = render_default("```rust\nfn main() {}\n```\n");
        let mut clipboard = MemoryClipboard::default();
        let now = Instant::now();

        let status = out.code_blocks[0].copy(&mut clipboard, now);

        assert_eq!(status, CopyStatus::Copied);
        assert_eq!(clipboard.contents.as_deref(), Some("fn main() {}"));
        assert_eq!(
            out.code_blocks[0].copy_status(now + Duration::from_millis(2000)),
            CopyStatus::Idle
        );
    }

    #[test]
    fn test_blocks_are_indexed_in_order() {
        let out = render_default("```js\na\n```\n\ntext\n\n```\nb\n```\n");
        let indices: Vec<_> = out.code_blocks.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert!(out.html.contains(r#"data-copy-index="1""#));
    }

    #[test]
    fn test_inline_code_has_no_copy_action() {
        let out = render_default("Use `cargo <cmd>` here.");
        assert!(out.html.contains(r#"<code class="inline-code">cargo &lt;cmd&gt;</code>"#));
        assert!(!out.html.contains("copy-button"));
        assert!(out.code_blocks.is_empty());
    }

    #[test]
    fn test_links_open_in_new_context() {
        let out = render_default("[site](https://example.com \"Home\") and [local](/projects/)");
        assert!(out.html.contains(
            r#"<a href="https://example.com" title="Home" target="_blank" rel="noopener noreferrer">site</a>"#
        ));
        assert!(out.html.contains(
            r#"<a href="/projects/" target="_blank" rel="noopener noreferrer">local</a>"#
        ));
    }

    #[test]
    fn test_autolinks_open_in_new_context() {
        let out = render_default("<https://example.com> <me@example.com>");
        assert!(out.html.contains(r#"href="https://example.com" target="_blank""#));
        assert!(out.html.contains(r#"href="mailto:me@example.com" target="_blank""#));
    }

    #[test]
    fn test_raw_html_passthrough() {
        let out = render_default("<div class=\"note\"><a href=\"/x\" target=\"_self\">y</a></div>\n");
        assert!(out.html.contains(r#"<div class="note">"#));
        assert!(out.html.contains(r#"<a href="/x" target="_blank" rel="noopener noreferrer">y</a>"#));
    }

    #[test]
    fn test_anchor_split_across_lines_is_hardened() {
        let out = render_default("<div>\n<a href=\"x\"\n target=\"_self\">y</a>\n</div>\n");
        assert!(out.html.contains(r#"<a href="x" target="_blank" rel="noopener noreferrer">y</a>"#));
        assert!(!out.html.contains("_self"));
    }

    #[test]
    fn test_inline_raw_html_passthrough() {
        let out = render_default("Press <kbd>Ctrl</kbd> now");
        assert!(out.html.contains("<kbd>Ctrl</kbd>"));
    }

    #[test]
    fn test_raw_html_escaped_when_disallowed() {
        let options = MarkdownOptions {
            allow_raw_html: false,
            ..Default::default()
        };
        let out = render("Hi <script>alert(1)</script>\n\n<div>x</div>\n", &options);
        assert!(!out.html.contains("<script>"));
        assert!(out.html.contains("&lt;script&gt;"));
        assert!(out.html.contains("&lt;div&gt;"));
    }

    #[test]
    fn test_extended_dialect() {
        let md = "~~gone~~\n\n- [x] done\n- [ ] todo\n\n| a | b |\n|---|---|\n| 1 | 2 |\n";
        let out = render_default(md);
        assert!(out.html.contains("<del>gone</del>"));
        assert!(out.html.contains("checked"));
        assert!(out.html.contains("<table>"));
        assert!(out.html.contains("<td>1</td>"));
    }

    #[test]
    fn test_code_block_inside_list() {
        let out = render_default("- item\n\n  ```sh\n  ls\n  ```\n");
        assert_eq!(out.code_blocks.len(), 1);
        assert_eq!(out.code_blocks[0].copy_text(), "ls");
        assert!(out.html.contains("<li>"));
    }
}
