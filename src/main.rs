//! folio - a portfolio site rendered from a remote content store.

mod build;
mod cli;
mod config;
mod content;
mod copy;
mod filter;
mod markdown;
mod render;
mod route;
mod serve;
mod utils;

use anyhow::{Context, Result};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use copy::copy_block;
use serve::serve_site;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    init_config(SiteConfig::load(cli)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    match &cli.command {
        Commands::Build { .. } => build_site(&cfg(), &runtime).map(|_| ()),
        Commands::Serve { .. } => serve_site(&runtime),
        Commands::Copy { id, index } => copy_block(&cfg(), &runtime, id, *index),
    }
}
