//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                         |
//! |--------------|-------------------------------------------------|
//! | `[site]`     | Site metadata (title, author, language)         |
//! | `[content]`  | Content store location (URL or directory)       |
//! | `[markdown]` | Raw HTML policy, highlight theme, copy feedback |
//! | `[build]`    | Output paths, minification                      |
//! | `[serve]`    | Preview server (interface, port, fetch timeout) |
//! | `[about]`    | Static About page content                       |
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Jane Doe"
//!
//! [content]
//! source = "https://example.com/content"
//!
//! [markdown]
//! allow_raw_html = true
//!
//! [serve]
//! port = 5277
//! ```

mod about;
mod build;
mod content;
pub mod defaults;
mod error;
mod handle;
mod markdown;
mod serve;
mod site;

pub use about::{AboutConfig, Document, DocumentGroup, Education, Experience, Skill};
pub use content::{ContentConfig, ContentSource};
pub use error::ConfigError;
pub use handle::{cfg, init_config, reload_config};

use build::BuildConfig;
use markdown::MarkdownConfig;
use serve::ServeConfig;
use site::SiteInfo;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub site: SiteInfo,

    /// Content store location
    #[serde(default)]
    pub content: ContentConfig,

    /// Markdown rendering settings
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Preview server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// About page content
    #[serde(default)]
    pub about: AboutConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load, apply CLI overrides and validate.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        if !config_path.exists() {
            bail!("Config file not found: {}", config_path.display());
        }

        let mut config = Self::from_path(&config_path)?;
        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.content.source, cli.source.as_ref());

        match &cli.command {
            Commands::Build {
                clean,
                minify,
                output,
            } => {
                self.build.clean |= *clean;
                Self::update_option(&mut self.build.minify, minify.as_ref());
                Self::update_option(&mut self.build.output, output.as_ref());
            }
            Commands::Serve { interface, port } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Copy { .. } => {}
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));

        if !self.content.is_remote() {
            let expanded = shellexpand::tilde(&self.content.source).into_owned();
            let source = Self::normalize_path(&root.join(expanded));
            self.content.source = source.to_string_lossy().into_owned();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if self.site.title.trim().is_empty() {
            bail!(ConfigError::Validation("[site.title] must not be empty".into()));
        }

        if !crate::markdown::theme_exists(&self.markdown.theme) {
            bail!(ConfigError::Validation(format!(
                "[markdown.theme] unknown theme `{}`",
                self.markdown.theme
            )));
        }

        if let ContentSource::Local(dir) = self.content.resolve()
            && !dir.is_dir()
        {
            bail!(ConfigError::Validation(format!(
                "[content.source] directory not found: {}",
                dir.display()
            )));
        }

        if self.serve.fetch_timeout_ms == 0 {
            bail!(ConfigError::Validation(
                "[serve.fetch_timeout_ms] must be greater than 0".into()
            ));
        }

        if self.build.output == self.config_path.parent().unwrap_or(Path::new("")) {
            bail!(ConfigError::Validation(
                "[build.output] must not be the project root".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
