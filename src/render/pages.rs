//! Full HTML documents, one per route.
//!
//! Every data-backed page renders from a [`ViewState`]:
//!
//! | State        | Shows                                         |
//! |--------------|-----------------------------------------------|
//! | `Loading`    | "Loading ..."                                 |
//! | `Error(msg)` | `Error: {msg}` and nothing else from the data |
//! | `Ready(data)`| the page                                      |

use super::components::{self, section};
use crate::{
    config::SiteConfig,
    content::{Project, ViewState},
    filter::{apply_filter, available_tags},
    markdown::{self, MarkdownOptions},
    utils::html::escape,
};

/// Page skeleton (embedded at compile time)
const LAYOUT_TEMPLATE: &str = include_str!("../embed/layout.html");

const REFRESH_HINT: &str = r#"<p class="hint">Please try refreshing the page</p>"#;

const BACK_TO_PROJECTS: &str = r#"<a class="back-link" href="/projects/">← Back to Projects</a>"#;

/// Top-level navigation entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    About,
    Projects,
    None,
}

impl Section {
    const fn slug(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Projects => "projects",
            Self::None => "other",
        }
    }
}

fn nav(active: Section) -> String {
    [(Section::About, "/", "About"), (Section::Projects, "/projects/", "Projects")]
        .into_iter()
        .map(|(section, href, label)| {
            if section == active {
                format!(r#"<a class="active" href="{href}" aria-current="page">{label}</a>"#)
            } else {
                format!(r#"<a href="{href}">{label}</a>"#)
            }
        })
        .collect()
}

fn footer(config: &SiteConfig) -> String {
    let site = &config.site;
    if site.copyright.is_empty() {
        format!("© {} {}", chrono::Local::now().format("%Y"), escape(&site.author))
    } else {
        format!("© {}", escape(&site.copyright))
    }
}

/// Wrap `content` in the site layout.
#[allow(clippy::literal_string_with_formatting_args)]
fn layout(
    config: &SiteConfig,
    section: Section,
    heading: &str,
    content: &str,
) -> String {
    let site = &config.site;
    let page_title = if heading.is_empty() {
        escape(&site.title)
    } else {
        format!("{} | {}", escape(heading), escape(&site.title))
    };

    // `{content}` goes last so page text is never treated as a placeholder
    LAYOUT_TEMPLATE
        .replace("{lang}", &escape(&site.language))
        .replace("{copy_ack_ms}", &config.markdown.copy_ack_ms.to_string())
        .replace("{author}", &escape(&site.author))
        .replace("{description}", &escape(&site.description))
        .replace("{page_title}", &page_title)
        .replace("{title}", &escape(&site.title))
        .replace("{nav}", &nav(section))
        .replace("{page}", section.slug())
        .replace("{footer}", &footer(config))
        .replace("{content}", content)
}

fn loading(message: &str) -> String {
    format!(r#"<p class="loading" role="status">{message}</p>"#)
}

fn error(message: &str) -> String {
    format!(r#"<p class="error" role="alert">Error: {}</p>"#, escape(message))
}

// ============================================================================
// Pages
// ============================================================================

/// About page. `current` is the state of the "current projects" fetch.
pub fn about_page(config: &SiteConfig, current: &ViewState<Vec<Project>>) -> String {
    let about = &config.about;
    let chars = config.site.card_description_chars;

    let current_projects = if about.current_projects.is_empty() {
        String::new()
    } else {
        let body = match current {
            ViewState::Loading => loading("Loading projects..."),
            ViewState::Error(message) => error(message),
            ViewState::Ready(projects) => components::project_grid(projects, chars),
        };
        section("current-projects", "Current Projects", &body)
    };

    let content = [
        format!(
            r#"<section id="about"><h1>{}</h1>{}</section>"#,
            escape(&about.heading),
            components::intro(about)
        ),
        components::documents(about),
        components::education(&about.education),
        components::work(&about.work),
        current_projects,
        components::skills(&about.skills),
    ]
    .concat();

    layout(config, Section::About, "", &content)
}

/// Project listing, optionally filtered to one tag.
pub fn projects_page(
    config: &SiteConfig,
    state: &ViewState<Vec<Project>>,
    selected: Option<&str>,
) -> String {
    let selected = selected.filter(|tag| !tag.is_empty());
    let heading = match selected {
        Some(tag) => format!("Projects tagged {tag}"),
        None => "Projects".to_owned(),
    };

    let body = match state {
        ViewState::Loading => loading("Loading projects..."),
        ViewState::Error(message) => format!("{}{REFRESH_HINT}", error(message)),
        ViewState::Ready(projects) if projects.is_empty() => {
            r#"<p class="empty">No projects found</p>"#.to_owned()
        }
        ViewState::Ready(projects) => {
            let tags = available_tags(projects);
            format!(
                "{}{}",
                components::tag_chips(&tags, selected),
                components::project_grid(
                    apply_filter(projects, selected),
                    config.site.card_description_chars
                )
            )
        }
    };

    let content = format!(r#"<h1>Projects</h1>{body}"#);
    layout(config, Section::Projects, &heading, &content)
}

/// Project detail page with its rendered markdown body.
pub fn project_page(
    config: &SiteConfig,
    state: &ViewState<Project>,
    options: &MarkdownOptions,
) -> String {
    let (heading, content) = match state {
        ViewState::Loading => (String::new(), loading("Loading project...")),
        ViewState::Error(message) => (
            String::new(),
            format!(r#"<div class="project-error">{}{BACK_TO_PROJECTS}</div>"#, error(message)),
        ),
        ViewState::Ready(project) => {
            let rendered = markdown::render(project.content.as_deref().unwrap_or_default(), options);
            let content = format!(
                concat!(
                    r#"<article class="project-detail">{back}"#,
                    r#"<h1>{title}</h1>{tags}{links}"#,
                    r#"<div class="markdown-body">{body}</div></article>"#
                ),
                back = BACK_TO_PROJECTS,
                title = escape(&project.title),
                tags = components::tag_list(&project.tags),
                links = components::external_links(project),
                body = rendered.html,
            );
            (project.title.clone(), content)
        }
    };

    layout(config, Section::Projects, &heading, &content)
}

/// 404 page.
pub fn not_found_page(config: &SiteConfig, path: &str) -> String {
    let content = format!(
        r#"<h1>Page not found</h1><p>Nothing lives at <code>{}</code>.</p>"#,
        escape(path)
    );
    layout(config, Section::None, "Not Found", &content)
}
