//! Tag filtering for the project listing.
//!
//! One tag at a time: an absent or empty selection shows everything.

use crate::content::Project;
use std::collections::BTreeSet;

/// Sorted, deduplicated union of every project's tags.
pub fn available_tags(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .flat_map(|project| project.tags.iter())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}

/// Projects carrying `selected`, in their original order.
pub fn apply_filter<'a>(projects: &'a [Project], selected: Option<&str>) -> Vec<&'a Project> {
    match selected.filter(|tag| !tag.is_empty()) {
        None => projects.iter().collect(),
        Some(tag) => projects.iter().filter(|project| project.has_tag(tag)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::types::parse_manifest;

    fn projects() -> Vec<Project> {
        parse_manifest(
            r#"[
                {"id": "a", "title": "A", "tags": ["x", "y"]},
                {"id": "b", "title": "B", "tags": ["y"]}
            ]"#,
        )
        .unwrap()
    }

    fn ids(list: &[&Project]) -> Vec<String> {
        list.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_available_tags_sorted_unique() {
        assert_eq!(available_tags(&projects()), vec!["x", "y"]);
    }

    #[test]
    fn test_available_tags_byte_order() {
        let projects = parse_manifest(
            r#"[{"id": "a", "title": "A", "tags": ["rust", "C++", "Rust", "C++"]}]"#,
        )
        .unwrap();
        assert_eq!(available_tags(&projects), vec!["C++", "Rust", "rust"]);
    }

    #[test]
    fn test_available_tags_empty() {
        assert!(available_tags(&[]).is_empty());
    }

    #[test]
    fn test_filter_by_tag() {
        let projects = projects();
        assert_eq!(ids(&apply_filter(&projects, Some("y"))), vec!["a", "b"]);
        assert_eq!(ids(&apply_filter(&projects, Some("x"))), vec!["a"]);
        assert!(apply_filter(&projects, Some("z")).is_empty());
    }

    #[test]
    fn test_no_selection_is_identity() {
        let projects = projects();
        assert_eq!(ids(&apply_filter(&projects, None)), vec!["a", "b"]);
        assert_eq!(ids(&apply_filter(&projects, Some(""))), vec!["a", "b"]);
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let projects = projects();
        assert!(apply_filter(&projects, Some("Y")).is_empty());
    }
}
