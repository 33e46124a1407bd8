//! Content store access.
//!
//! The store is read-only and addressed by `/`-separated paths relative to
//! its root (`projects.json`, `projects/<id>.md`). Two backends exist:
//!
//! | Backend       | Source value                | Missing file     |
//! |---------------|-----------------------------|------------------|
//! | [`HttpStore`] | `http://...`, `https://...` | server status    |
//! | [`LocalStore`]| directory path              | status 404       |

use crate::{
    config::{ContentConfig, ContentSource},
    log,
};
use std::{future::Future, io::ErrorKind, path::PathBuf};
use thiserror::Error;

/// Failure to read a path from the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
}

/// Read access to the content store.
pub trait ContentStore: Send + Sync {
    /// Fetch the text body stored at `path`.
    fn get(&self, path: &str) -> impl Future<Output = Result<String, StoreError>> + Send;
}

// ============================================================================
// HTTP
// ============================================================================

/// Content store reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base: String,
}

impl HttpStore {
    pub fn new(base: &str) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| StoreError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_owned(),
        })
    }

    /// Absolute URL of `path`, each segment percent-encoded.
    fn url(&self, path: &str) -> String {
        let encoded: Vec<_> = path
            .split('/')
            .filter(|seg| !seg.is_empty())
            .map(urlencoding::encode)
            .collect();
        format!("{}/{}", self.base, encoded.join("/"))
    }
}

impl ContentStore for HttpStore {
    async fn get(&self, path: &str) -> Result<String, StoreError> {
        let url = self.url(path);
        log!("fetch"; "GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| StoreError::Transport(format!("GET {url}: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|err| StoreError::Transport(format!("GET {url}: {err}")))
    }
}

// ============================================================================
// Local directory
// ============================================================================

/// Content store backed by a local directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a store path onto the directory, refusing anything that escapes it.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let mut resolved = self.root.clone();
        for segment in path.split('/').filter(|seg| !seg.is_empty()) {
            if segment == "." || segment == ".." || segment.contains('\\') || segment.contains(':') {
                return None;
            }
            resolved.push(segment);
        }
        Some(resolved)
    }
}

impl ContentStore for LocalStore {
    async fn get(&self, path: &str) -> Result<String, StoreError> {
        let Some(file) = self.resolve(path) else {
            return Err(StoreError::Status(404));
        };

        match tokio::fs::read_to_string(&file).await {
            Ok(body) => Ok(body),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StoreError::Status(404)),
            Err(err) => Err(StoreError::Transport(format!("{}: {err}", file.display()))),
        }
    }
}

// ============================================================================
// Configured store
// ============================================================================

/// The store selected by `[content.source]`.
#[derive(Debug, Clone)]
pub enum Store {
    Http(HttpStore),
    Local(LocalStore),
}

impl Store {
    pub fn from_config(config: &ContentConfig) -> Result<Self, StoreError> {
        Ok(match config.resolve() {
            ContentSource::Http(base) => Self::Http(HttpStore::new(&base)?),
            ContentSource::Local(dir) => Self::Local(LocalStore::new(dir)),
        })
    }
}

impl ContentStore for Store {
    async fn get(&self, path: &str) -> Result<String, StoreError> {
        match self {
            Self::Http(store) => store.get(path).await,
            Self::Local(store) => store.get(path).await,
        }
    }
}

// ============================================================================
// Test fixtures
// ============================================================================
