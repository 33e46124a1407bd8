//! Requests a page issues against the content store.

use super::{
    store::{ContentStore, StoreError},
    types::{Project, find_project, parse_manifest},
};
use crate::config::ContentConfig;
use thiserror::Error;

/// Why a page's data could not be loaded.
///
/// The display text is what the page shows after `Error: `.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch projects: {0}")]
    Manifest(u16),

    #[error("Failed to fetch project metadata: {0}")]
    Metadata(u16),

    #[error("Project markdown not found: {0}")]
    Markdown(u16),

    #[error("Project metadata not found")]
    MissingProject,

    #[error("Invalid project id: {0}")]
    InvalidId(String),

    #[error("Malformed project manifest: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Transport(String),
}

impl FetchError {
    /// Map a store failure, using `on_status` for non-success answers.
    fn from_store(err: StoreError, on_status: fn(u16) -> Self) -> Self {
        match err {
            StoreError::Status(status) => on_status(status),
            StoreError::Transport(message) => Self::Transport(message),
        }
    }
}

/// Store-relative paths of the manifest and project bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPaths {
    manifest: String,
    projects_dir: String,
}

impl Default for ContentPaths {
    fn default() -> Self {
        Self::from_config(&ContentConfig::default())
    }
}

impl ContentPaths {
    pub fn from_config(config: &ContentConfig) -> Self {
        Self {
            manifest: config.manifest.trim_matches('/').to_owned(),
            projects_dir: config.projects_dir.trim_matches('/').to_owned(),
        }
    }

    pub fn manifest(&self) -> &str {
        &self.manifest
    }

    /// Path of a project's markdown body, using the id exactly as requested.
    pub fn markdown(&self, id: &str) -> String {
        if self.projects_dir.is_empty() {
            format!("{id}.md")
        } else {
            format!("{}/{id}.md", self.projects_dir)
        }
    }
}

/// Fetch and decode the manifest, mapping statuses with `on_status`.
async fn fetch_manifest<S: ContentStore + ?Sized>(
    store: &S,
    paths: &ContentPaths,
    on_status: fn(u16) -> FetchError,
) -> Result<Vec<Project>, FetchError> {
    let body = store
        .get(paths.manifest())
        .await
        .map_err(|err| FetchError::from_store(err, on_status))?;
    Ok(parse_manifest(&body)?)
}

/// All projects, in manifest order.
pub async fn load_projects<S: ContentStore + ?Sized>(
    store: &S,
    paths: &ContentPaths,
) -> Result<Vec<Project>, FetchError> {
    fetch_manifest(store, paths, FetchError::Manifest).await
}

/// Projects whose id appears in `ids`, in manifest order.
///
/// Ids are matched case-insensitively; unknown ids are skipped.
pub async fn load_current_projects<S: ContentStore + ?Sized>(
    store: &S,
    paths: &ContentPaths,
    ids: &[String],
) -> Result<Vec<Project>, FetchError> {
    let projects = load_projects(store, paths).await?;
    Ok(select_current(projects, ids))
}

/// Keep the projects named in `ids`, preserving manifest order.
pub fn select_current(projects: Vec<Project>, ids: &[String]) -> Vec<Project> {
    projects
        .into_iter()
        .filter(|project| ids.iter().any(|id| project.matches_id(id)))
        .collect()
}

/// One project with its markdown body.
///
/// The body is fetched first, then the manifest; the two requests are
/// sequential and either failure ends the load.
pub async fn load_project<S: ContentStore + ?Sized>(
    store: &S,
    paths: &ContentPaths,
    id: &str,
) -> Result<Project, FetchError> {
    if !is_single_segment(id) {
        return Err(FetchError::InvalidId(id.to_owned()));
    }

    let markdown = store
        .get(&paths.markdown(id))
        .await
        .map_err(|err| FetchError::from_store(err, FetchError::Markdown))?;

    let projects = fetch_manifest(store, paths, FetchError::Metadata).await?;

    let mut project = find_project(&projects, id)
        .cloned()
        .ok_or(FetchError::MissingProject)?;
    project.content = Some(markdown);
    Ok(project)
}

/// An id names exactly one file under the projects directory.
fn is_single_segment(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}
