//! `folio copy`: put a project's code block on the system clipboard.
//!
//! Runs the same copy action as the buttons on a rendered page, so the
//! copied text is the block source minus one trailing newline.

use crate::{
    config::SiteConfig,
    content::{ContentPaths, Mount, Store, ViewState, load_project},
    log,
    markdown::{self, Clipboard, CopyStatus, MarkdownOptions},
    utils::clipboard::SystemClipboard,
};
use anyhow::{Result, bail};
use std::time::Instant;
use tokio::runtime::Runtime;

/// Copy block `index` of project `id` through the system clipboard.
pub fn copy_block(config: &SiteConfig, runtime: &Runtime, id: &str, index: usize) -> Result<()> {
    let mut clipboard = SystemClipboard::default();
    copy_block_with(config, runtime, id, index, &mut clipboard)
}

fn copy_block_with<C: Clipboard + ?Sized>(
    config: &SiteConfig,
    runtime: &Runtime,
    id: &str,
    index: usize,
    clipboard: &mut C,
) -> Result<()> {
    let store = Store::from_config(&config.content)?;
    let paths = ContentPaths::from_config(&config.content);

    let mount = Mount::new();
    runtime.block_on(mount.run(load_project(&store, &paths, id)));
    let project = match mount.finish() {
        ViewState::Ready(project) => project,
        ViewState::Error(message) => bail!("{message}"),
        ViewState::Loading => bail!("project `{id}` never loaded"),
    };

    let options = MarkdownOptions::from_config(config);
    let mut rendered = markdown::render(project.content.as_deref().unwrap_or_default(), &options);
    let count = rendered.code_blocks.len();
    let Some(block) = rendered.code_blocks.get_mut(index) else {
        bail!("`{}` has {count} code block(s), no block at index {index}", project.id);
    };

    match block.copy(clipboard, Instant::now()) {
        CopyStatus::Copied => {
            let language = block.language.as_deref().unwrap_or("plain");
            log!(
                "copy";
                "copied block {index} of `{}` ({language}, {} lines)",
                project.id,
                block.copy_text().lines().count()
            );
            Ok(())
        }
        CopyStatus::Failed(message) => bail!("Copy failed: {message}"),
        CopyStatus::Idle => bail!("Copy failed: acknowledgment window is zero"),
    }
}
