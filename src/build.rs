//! Static snapshot of the whole site.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_projects()      one manifest fetch, shared by every listing page
//!     │
//!     ├── load_details()       one mount per project, fetched concurrently
//!     │
//!     ├── render               About, Projects, tag pages, detail pages (rayon)
//!     │
//!     └── write                pages, embedded static files, assets dir
//! ```
//!
//! A project whose detail fetch fails still gets a page showing the error;
//! the failures are counted in the returned [`BuildReport`].

use crate::{
    config::SiteConfig,
    content::{
        ContentPaths, Mount, Project, Store, ViewState, load_project, load_projects,
        select_current,
    },
    filter::available_tags,
    log,
    markdown::MarkdownOptions,
    render::{STATIC_FILES, about_page, not_found_page, project_page, projects_page},
    route::{ASSETS_DIR, Route},
    utils::{log::ProgressBars, minify::minify},
};
use anyhow::{Context, Result, anyhow, bail};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{runtime::Runtime, task::JoinSet};
use walkdir::WalkDir;

/// Outcome of a build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// HTML pages written.
    pub pages: usize,
    /// Asset files copied.
    pub assets: usize,
    /// Ids of projects whose detail page shows an error.
    pub failed: Vec<String>,
}

/// Fetch everything once and write the site to `[build.output]`.
pub fn build_site(config: &SiteConfig, runtime: &Runtime) -> Result<BuildReport> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let store = Arc::new(Store::from_config(&config.content)?);
    let paths = Arc::new(ContentPaths::from_config(&config.content));

    log!("fetch"; "loading project manifest...");
    let mount = Mount::new();
    runtime.block_on(mount.run(load_projects(&*store, &paths)));
    let projects = match mount.finish() {
        ViewState::Ready(projects) => projects,
        ViewState::Error(message) => bail!("{message}"),
        ViewState::Loading => bail!("project manifest never loaded"),
    };
    log!("fetch"; "found {} projects", projects.len());

    let details = runtime.block_on(load_details(store, paths, &projects));
    let failed: Vec<String> = details
        .iter()
        .filter(|(_, state)| matches!(state, ViewState::Error(_)))
        .map(|(id, _)| id.clone())
        .collect();

    let pages = render_pages(config, projects, &details);
    let asset_files = collect_assets(&config.build.assets);

    let progress = ProgressBars::new(&[("pages", pages.len()), ("assets", asset_files.len())]);

    let (pages_result, assets_result) = rayon::join(
        || {
            pages.par_iter().try_for_each(|(route, html)| {
                write_page(output, route, html, config)?;
                progress.inc_by_name("pages");
                Ok::<_, anyhow::Error>(())
            })
        },
        || {
            asset_files.par_iter().try_for_each(|path| {
                copy_asset(path, &config.build.assets, output)?;
                progress.inc_by_name("assets");
                Ok::<_, anyhow::Error>(())
            })
        },
    );

    progress.finish();
    pages_result?;
    assets_result?;

    write_static_files(output)?;

    let report = BuildReport {
        pages: pages.len(),
        assets: asset_files.len(),
        failed,
    };
    log_build_result(&report, output);
    Ok(report)
}

/// Create the output directory, clearing it first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Load every project's detail page data, one mount each, in manifest order.
async fn load_details(
    store: Arc<Store>,
    paths: Arc<ContentPaths>,
    projects: &[Project],
) -> Vec<(String, ViewState<Project>)> {
    let progress = ProgressBars::new(&[("fetch", projects.len())]);
    let mut tasks = JoinSet::new();

    for (order, project) in projects.iter().enumerate() {
        let store = Arc::clone(&store);
        let paths = Arc::clone(&paths);
        let id = project.id.clone();
        tasks.spawn(async move {
            let mount = Mount::new();
            mount.run(load_project(&*store, &paths, &id)).await;
            (order, id, mount.finish())
        });
    }

    let mut details = Vec::with_capacity(projects.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(detail) => {
                progress.inc_by_name("fetch");
                details.push(detail);
            }
            Err(err) => log!("error"; "fetch task failed: {err}"),
        }
    }
    progress.finish();

    details.sort_by_key(|(order, ..)| *order);
    details.into_iter().map(|(_, id, state)| (id, state)).collect()
}

/// Render every page of the site.
fn render_pages(
    config: &SiteConfig,
    projects: Vec<Project>,
    details: &[(String, ViewState<Project>)],
) -> Vec<(Route, String)> {
    let tags = available_tags(&projects);
    let current = ViewState::Ready(select_current(projects.clone(), &config.about.current_projects));
    let listing = ViewState::Ready(projects);

    let mut pages = vec![
        (Route::About, about_page(config, &current)),
        (Route::Projects { tag: None }, projects_page(config, &listing, None)),
    ];
    pages.extend(tags.into_iter().map(|tag| {
        let html = projects_page(config, &listing, Some(&tag));
        (Route::Projects { tag: Some(tag) }, html)
    }));

    // Markdown highlighting dominates, so detail pages render in parallel
    let options = MarkdownOptions::from_config(config);
    let detail_pages: Vec<_> = details
        .par_iter()
        .map(|(id, state)| {
            let route = Route::Project { id: id.clone() };
            (route, project_page(config, state, &options))
        })
        .collect();
    pages.extend(detail_pages);

    pages
}

/// Write one rendered page, minified if enabled.
fn write_page(output: &Path, route: &Route, html: &str, config: &SiteConfig) -> Result<()> {
    let Some(relative) = route.output_path() else {
        log!("build"; "skipping {}: not usable as a file name", route.href());
        return Ok(());
    };
    let path = output.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let html = minify(html.as_bytes(), config);
    fs::write(&path, &*html).with_context(|| format!("Failed to write {}", path.display()))?;

    // Fallback page for static hosts
    if *route == Route::About {
        let not_found = not_found_page(config, "");
        fs::write(output.join("404.html"), &*minify(not_found.as_bytes(), config))?;
    }
    Ok(())
}

fn write_static_files(output: &Path) -> Result<()> {
    for file in STATIC_FILES {
        let route = Route::Static(file.name.to_owned());
        let path = output.join(
            route
                .output_path()
                .ok_or_else(|| anyhow!("invalid static file name `{}`", file.name))?,
        );
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, file.body).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Every regular file under the assets dir; none when it does not exist.
fn collect_assets(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Copy an asset to `output/assets/<relative path>`.
fn copy_asset(path: &Path, assets: &Path, output: &Path) -> Result<()> {
    let relative = path
        .strip_prefix(assets)
        .with_context(|| format!("{} is outside {}", path.display(), assets.display()))?;
    let dest = output.join(ASSETS_DIR).join(relative);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(path, &dest)
        .with_context(|| format!("Failed to copy {} to {}", path.display(), dest.display()))?;
    Ok(())
}

fn log_build_result(report: &BuildReport, output: &Path) {
    if !report.failed.is_empty() {
        log!(
            "error";
            "{} project page(s) failed to load: {}",
            report.failed.len(),
            report.failed.join(", ")
        );
    }
    log!(
        "build";
        "wrote {} pages and {} assets to {}",
        report.pages,
        report.assets,
        output.display()
    );
}
