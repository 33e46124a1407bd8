//! `[about]` section configuration.
//!
//! Static content of the About page: introduction, linked documents,
//! education, work experience and skills. The "current projects" list names
//! manifest ids; their records are fetched from the content store.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[about]` section in folio.toml.
///
/// # Example
/// ```toml
/// [about]
/// intro = "Aspiring quantitative developer."
/// current_projects = ["hft-execution", "pathfinding-maze"]
///
/// [[about.documents]]
/// name = "personal-statement"
/// label = "Personal Statement"
/// last_updated = "9/9/2024"
/// group = "other"
///
/// [[about.skills]]
/// name = "Rust"
/// icon = "logos:rust"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct AboutConfig {
    #[serde(default = "defaults::about::heading")]
    #[educe(Default = defaults::about::heading())]
    pub heading: String,

    /// Introductory paragraph.
    #[serde(default)]
    pub intro: String,

    /// Manifest ids shown under "Current Projects", in manifest order.
    #[serde(default)]
    pub current_projects: Vec<String>,

    /// URL prefix documents are served under (`{prefix}/{name}.pdf`).
    #[serde(default = "defaults::about::documents_prefix")]
    #[educe(Default = defaults::about::documents_prefix())]
    pub documents_prefix: String,

    #[serde(default)]
    pub documents: Vec<Document>,

    #[serde(default)]
    pub education: Vec<Education>,

    #[serde(default)]
    pub work: Vec<Experience>,

    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// Which column a document is listed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentGroup {
    Transcript,
    #[default]
    Other,
}

impl DocumentGroup {
    pub const ALL: [Self; 2] = [Self::Transcript, Self::Other];

    pub const fn heading(self) -> &'static str {
        match self {
            Self::Transcript => "Transcripts",
            Self::Other => "Professional",
        }
    }
}

/// A linked PDF on the About page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    /// File stem under the documents prefix. Empty means not yet published.
    #[serde(default)]
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub group: DocumentGroup,
}

impl Document {
    /// Link target, or `None` while the document has no file.
    pub fn href(&self, prefix: &str) -> Option<String> {
        if self.name.is_empty() {
            return None;
        }
        let prefix = prefix.trim_end_matches('/');
        Some(format!("{prefix}/{}.pdf", urlencoding::encode(&self.name)))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Education {
    pub school: String,
    #[serde(default)]
    pub period: String,
    /// One line per entry (subjects, predicted grades, ...).
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Experience {
    pub title: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skill {
    pub name: String,
    /// Iconify identifier, e.g. `logos:python`.
    #[serde(default)]
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_about_config_full() {
        let config = r#"
            [site]
            title = "T"

            [about]
            intro = "Hello"
            current_projects = ["a", "b"]

            [[about.documents]]
            name = "personal-statement"
            label = "Personal Statement"
            last_updated = "9/9/2024"

            [[about.documents]]
            label = "Year 13 Mocks"
            group = "transcript"

            [[about.work]]
            title = "Freelance Software Developer"
            role = "Self-Employed"
            period = "2023 - Present"

            [[about.education]]
            school = "Ellesmere College"
            details = ["Maths", "Physics"]

            [[about.skills]]
            name = "Python"
            icon = "logos:python"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        let about = &config.about;

        assert_eq!(about.heading, "About Me");
        assert_eq!(about.current_projects, vec!["a", "b"]);
        assert_eq!(about.documents.len(), 2);
        assert_eq!(about.documents[0].group, DocumentGroup::Other);
        assert_eq!(about.documents[1].group, DocumentGroup::Transcript);
        assert_eq!(about.work[0].period, "2023 - Present");
        assert_eq!(about.education[0].details.len(), 2);
        assert_eq!(about.skills[0].icon, "logos:python");
    }

    #[test]
    fn test_document_href() {
        let doc = Document {
            name: "personal-statement".into(),
            label: "Personal Statement".into(),
            ..Default::default()
        };
        assert_eq!(
            doc.href("assets/PDF/").as_deref(),
            Some("assets/PDF/personal-statement.pdf")
        );
    }

    #[test]
    fn test_document_without_name_has_no_href() {
        let doc = Document {
            label: "Resume".into(),
            ..Default::default()
        };
        assert!(doc.href("assets/PDF").is_none());
    }

    #[test]
    fn test_group_headings() {
        assert_eq!(DocumentGroup::Transcript.heading(), "Transcripts");
        assert_eq!(DocumentGroup::Other.heading(), "Professional");
    }
}
