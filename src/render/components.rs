//! HTML fragments shared by the pages.
//!
//! Every function here is pure: already-resolved data in, markup out.

use crate::{
    config::{AboutConfig, Document, DocumentGroup, Education, Experience, Skill},
    content::Project,
    markdown::anchor,
    route::Route,
    utils::html::{escape, truncate_chars},
};

/// Project summary card.
///
/// The card itself is not an anchor: `folio.js` navigates to `data-href` on
/// click or Enter. Its only anchors are the external buttons, which open in a
/// new context and do not trigger the card.
pub fn project_card(project: &Project, description_chars: usize) -> String {
    let href = escape(&project.href());
    let description = truncate_chars(&project.description, description_chars);

    format!(
        concat!(
            r#"<article class="project-card" data-href="{href}" data-id="{id}" tabindex="0">"#,
            r#"<h3 class="project-title">{title}</h3>"#,
            r#"<p class="project-description">{description}</p>"#,
            "{tags}{links}</article>"
        ),
        href = href,
        id = escape(&project.id),
        title = escape(&project.title),
        description = escape(&description),
        tags = tag_list(&project.tags),
        links = external_links(project),
    )
}

/// GitHub / Live Demo buttons, empty when the project has neither.
pub fn external_links(project: &Project) -> String {
    let buttons: Vec<String> = [
        (project.github_link.as_deref(), "GitHub", "button github"),
        (project.demo_link.as_deref(), "Live Demo", "button demo"),
    ]
    .into_iter()
    .filter_map(|(link, text, class)| {
        link.filter(|l| !l.is_empty())
            .map(|href| anchor(href, text, class))
    })
    .collect();

    if buttons.is_empty() {
        return String::new();
    }
    format!(r#"<div class="project-links">{}</div>"#, buttons.concat())
}

/// Read-only tag labels.
pub fn tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let items: String = tags
        .iter()
        .map(|tag| format!(r#"<li class="tag">{}</li>"#, escape(tag)))
        .collect();
    format!(r#"<ul class="tags">{items}</ul>"#)
}

/// Filter chips: "All" followed by one link per tag, the selected one active.
pub fn tag_chips(tags: &[String], selected: Option<&str>) -> String {
    let chip = |route: Route, label: &str, active: bool| {
        let class = if active { "chip active" } else { "chip" };
        let current = if active { r#" aria-current="page""# } else { "" };
        format!(
            r#"<li><a class="{class}" href="{}"{current}>{}</a></li>"#,
            escape(&route.href()),
            escape(label)
        )
    };

    let selected = selected.filter(|tag| !tag.is_empty());
    let mut items = vec![chip(Route::Projects { tag: None }, "All", selected.is_none())];
    items.extend(tags.iter().map(|tag| {
        chip(
            Route::Projects {
                tag: Some(tag.clone()),
            },
            tag,
            selected == Some(tag.as_str()),
        )
    }));

    format!(
        r#"<nav class="tag-filter" aria-label="Filter by tag"><ul>{}</ul></nav>"#,
        items.concat()
    )
}

/// Card grid, or a note when nothing matches.
pub fn project_grid<'a>(
    projects: impl IntoIterator<Item = &'a Project>,
    description_chars: usize,
) -> String {
    let cards: String = projects
        .into_iter()
        .map(|project| project_card(project, description_chars))
        .collect();
    if cards.is_empty() {
        return r#"<p class="empty">No projects to show.</p>"#.into();
    }
    format!(r#"<div class="project-grid">{cards}</div>"#)
}

// ============================================================================
// About sections
// ============================================================================

pub fn intro(about: &AboutConfig) -> String {
    if about.intro.trim().is_empty() {
        return String::new();
    }
    format!(r#"<p class="intro">{}</p>"#, escape(&about.intro))
}

fn document_item(document: &Document, prefix: &str) -> String {
    let updated = if document.last_updated.is_empty() {
        String::new()
    } else {
        format!(
            r#" <span class="updated">Last updated: {}</span>"#,
            escape(&document.last_updated)
        )
    };
    let label = match document.href(prefix) {
        Some(href) => anchor(&href, &document.label, "document"),
        None => format!(r#"<span class="document pending">{}</span>"#, escape(&document.label)),
    };
    format!("<li>{label}{updated}</li>")
}

/// Documents in one column per [`DocumentGroup`], empty groups omitted.
pub fn documents(about: &AboutConfig) -> String {
    let columns: String = DocumentGroup::ALL
        .into_iter()
        .filter_map(|group| {
            let items: String = about
                .documents
                .iter()
                .filter(|doc| doc.group == group)
                .map(|doc| document_item(doc, &about.documents_prefix))
                .collect();
            (!items.is_empty()).then(|| {
                format!(
                    r#"<div class="document-group"><h3>{}</h3><ul>{items}</ul></div>"#,
                    group.heading()
                )
            })
        })
        .collect();

    section("documents", "Documents", &columns)
}

pub fn education(entries: &[Education]) -> String {
    let items: String = entries
        .iter()
        .map(|entry| {
            let details: String = entry
                .details
                .iter()
                .map(|line| format!("<li>{}</li>", escape(line)))
                .collect();
            let details = if details.is_empty() {
                details
            } else {
                format!("<ul>{details}</ul>")
            };
            format!(
                r#"<div class="entry"><h3>{}</h3><p class="period">{}</p>{details}</div>"#,
                escape(&entry.school),
                escape(&entry.period)
            )
        })
        .collect();
    section("education", "Education", &items)
}

pub fn work(entries: &[Experience]) -> String {
    let items: String = entries
        .iter()
        .map(|entry| {
            format!(
                concat!(
                    r#"<div class="entry"><h3>{title}</h3>"#,
                    r#"<p class="role">{role}</p><p class="period">{period}</p>"#,
                    r#"<p>{summary}</p></div>"#
                ),
                title = escape(&entry.title),
                role = escape(&entry.role),
                period = escape(&entry.period),
                summary = escape(&entry.summary),
            )
        })
        .collect();
    section("work", "Work Experience", &items)
}

pub fn skills(entries: &[Skill]) -> String {
    let items: String = entries
        .iter()
        .map(|skill| {
            let icon = if skill.icon.is_empty() {
                String::new()
            } else {
                format!(
                    r#"<span class="skill-icon" data-icon="{}" aria-hidden="true"></span>"#,
                    escape(&skill.icon)
                )
            };
            format!(r#"<li class="skill">{icon}{}</li>"#, escape(&skill.name))
        })
        .collect();
    if items.is_empty() {
        return String::new();
    }
    section("skills", "Skills", &format!(r#"<ul class="skill-list">{items}</ul>"#))
}

/// `<section>` with a heading, or nothing when `body` is empty.
pub fn section(id: &str, heading: &str, body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    format!(r#"<section id="{id}"><h2>{}</h2>{body}</section>"#, escape(heading))
}
