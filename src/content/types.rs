//! Content store record types.

use serde::{Deserialize, Serialize};

/// One entry of the project manifest (`projects.json`).
///
/// `content` is never part of the manifest; it is filled in from
/// `projects/<id>.md` when a single project is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// URL-safe slug, matched case-insensitively.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Project {
    /// Case-insensitive id comparison.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id.to_lowercase() == id.to_lowercase()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Site-relative URL of the detail page.
    pub fn href(&self) -> String {
        format!("/projects/{}/", urlencoding::encode(&self.id))
    }
}

/// Find a project by case-insensitive id.
pub fn find_project<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.matches_id(id))
}

/// Parse a manifest body.
pub fn parse_manifest(json: &str) -> serde_json::Result<Vec<Project>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"[
        {
            "id": "hft-execution",
            "title": "Optimal Execution",
            "description": "Market making simulator",
            "tags": ["C++", "Finance"],
            "githubLink": "https://github.com/x/hft",
            "demoLink": "https://demo.example.com"
        },
        { "id": "pathfinding-maze", "title": "Maze" }
    ]"#;

    #[test]
    fn test_parse_manifest_camel_case() {
        let projects = parse_manifest(MANIFEST).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].github_link.as_deref(), Some("https://github.com/x/hft"));
        assert_eq!(projects[0].demo_link.as_deref(), Some("https://demo.example.com"));
        assert_eq!(projects[0].tags, vec!["C++", "Finance"]);
        assert!(projects[0].content.is_none());
    }

    #[test]
    fn test_parse_manifest_optional_fields() {
        let projects = parse_manifest(MANIFEST).unwrap();
        let maze = &projects[1];
        assert!(maze.tags.is_empty());
        assert_eq!(maze.description, "");
        assert!(maze.github_link.is_none());
    }

    #[test]
    fn test_parse_manifest_rejects_non_array() {
        assert!(parse_manifest(r#"{"id": "x"}"#).is_err());
    }

    #[test]
    fn test_find_project_case_insensitive() {
        let projects = parse_manifest(r#"[{"id": "foo", "title": "Foo"}]"#).unwrap();
        assert_eq!(find_project(&projects, "Foo").map(|p| p.title.as_str()), Some("Foo"));
        assert_eq!(find_project(&projects, "FOO").map(|p| p.id.as_str()), Some("foo"));
        assert!(find_project(&projects, "bar").is_none());
    }

    #[test]
    fn test_href_encodes_id() {
        let projects = parse_manifest(r#"[{"id": "a b", "title": "x"}]"#).unwrap();
        assert_eq!(projects[0].href(), "/projects/a%20b/");
    }

    #[test]
    fn test_has_tag_exact() {
        let projects = parse_manifest(MANIFEST).unwrap();
        assert!(projects[0].has_tag("Finance"));
        assert!(!projects[0].has_tag("finance"));
    }
}
