//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// folio portfolio site CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content store: base URL or directory (overrides [content.source])
    #[arg(short, long)]
    pub source: Option<String>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch all content and write a static snapshot of the site
    Build {
        /// Clean output directory completely before building
        #[arg(long)]
        clean: bool,

        /// Minify the html content
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        minify: Option<bool>,

        /// Output directory path (relative to project root)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the site, fetching content on every page load
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Copy a project's code block to the system clipboard
    Copy {
        /// Project id, spelled as its markdown file is named
        id: String,

        /// Zero-based index of the code block within the project page
        #[arg(default_value_t = 0)]
        index: usize,
    },
}
