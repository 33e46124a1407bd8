//! Preview server that renders every page on request.
//!
//! Built on `tiny_http`. Each request is one page mount: the page's data is
//! fetched from the content store, rendered and returned. Nothing is cached
//! between requests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Tokio Runtime   │
//! │  (HTTP Server)  │────►│  (page fetches)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//!    Route request           Mount with deadline
//!    Render page             Loading / Error / Ready
//! ```
//!
//! A mount that misses `[serve.fetch_timeout_ms]` is answered with its
//! error view; the visitor reloads to try again.

use crate::{
    config::{SiteConfig, cfg, reload_config},
    content::{
        ContentPaths, Mount, Store, ViewState, load_current_projects, load_project, load_projects,
    },
    log,
    markdown::MarkdownOptions,
    render::{about_page, assets, not_found_page, project_page, projects_page},
    route::Route,
};
use anyhow::{Context, Result};
use std::{
    fmt::Display,
    fs,
    future::Future,
    net::{IpAddr, SocketAddr},
    path::Path,
    sync::Arc,
    time::Duration,
};
use tiny_http::{Header, Request, Response, Server};
use tokio::runtime::Runtime;

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

const HTML: &str = "text/html; charset=utf-8";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the preview server.
///
/// Binds to the configured interface and port (with auto-retry on port
/// conflict), sets up Ctrl+C for shutdown, then handles requests until
/// interrupted.
pub fn serve_site(runtime: &Runtime) -> Result<()> {
    let c = cfg();
    let interface: IpAddr = c
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface `{}`", c.serve.interface))?;

    let (server, addr) = try_bind_port(interface, c.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    for request in server.incoming_requests() {
        // Pick up edits to folio.toml on the next page load
        match reload_config() {
            Ok(true) => log!("serve"; "config reloaded"),
            Ok(false) => {}
            Err(err) => log!("error"; "config reload failed: {err:#}"),
        }

        if let Err(e) = handle_request(request, &cfg(), runtime) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// A response body with its status and content type.
#[derive(Debug)]
struct Reply {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Reply {
    fn html(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: HTML,
            body: body.into_bytes(),
        }
    }
}

fn handle_request(request: Request, config: &SiteConfig, runtime: &Runtime) -> Result<()> {
    let reply = respond(request.url(), config, runtime)?;

    let content_type = Header::from_bytes("Content-Type", reply.content_type)
        .map_err(|()| anyhow::anyhow!("invalid content type"))?;
    let no_store = Header::from_bytes("Cache-Control", "no-store")
        .map_err(|()| anyhow::anyhow!("invalid cache header"))?;

    let response = Response::from_data(reply.body)
        .with_status_code(reply.status)
        .with_header(content_type)
        .with_header(no_store);
    request.respond(response)?;
    Ok(())
}

/// Resolve a request URL to a reply.
///
/// Page routes always answer 200 with whatever state their mount reached;
/// unknown paths answer 404.
fn respond(url: &str, config: &SiteConfig, runtime: &Runtime) -> Result<Reply> {
    let store = Store::from_config(&config.content)?;
    let paths = ContentPaths::from_config(&config.content);
    let deadline = config.serve.fetch_timeout();

    let route = Route::parse(url);
    let reply = match &route {
        Route::About => {
            let ids = &config.about.current_projects;
            let state = if ids.is_empty() {
                ViewState::Ready(Vec::new())
            } else {
                mount(runtime, deadline, load_current_projects(&store, &paths, ids))
            };
            Reply::html(200, about_page(config, &state))
        }
        Route::Projects { tag } => {
            let state = mount(runtime, deadline, load_projects(&store, &paths));
            Reply::html(200, projects_page(config, &state, tag.as_deref()))
        }
        Route::Project { id } => {
            let state = mount(runtime, deadline, load_project(&store, &paths, id));
            let options = MarkdownOptions::from_config(config);
            Reply::html(200, project_page(config, &state, &options))
        }
        Route::Static(name) => match assets::lookup(name) {
            Some(file) => Reply {
                status: 200,
                content_type: file.content_type,
                body: file.body.as_bytes().to_vec(),
            },
            None => not_found(config, url),
        },
        Route::Asset(_) => match route.asset_path() {
            Some(relative) => {
                let path = config.build.assets.join(relative);
                if path.is_file() {
                    let body = fs::read(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    Reply {
                        status: 200,
                        content_type: guess_content_type(&path),
                        body,
                    }
                } else {
                    not_found(config, url)
                }
            }
            None => not_found(config, url),
        },
    };

    Ok(reply)
}

/// Run one page mount to completion or `deadline`, and take its state.
fn mount<T, F, E>(runtime: &Runtime, deadline: Duration, fut: F) -> ViewState<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let mount = Mount::new();
    runtime.block_on(mount.run_with_deadline(fut, deadline));
    mount.finish()
}

fn not_found(config: &SiteConfig, url: &str) -> Reply {
    let path = url.split('?').next().unwrap_or(url);
    Reply::html(404, not_found_page(config, path))
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => HTML,
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",

        // Documents
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",

        // Default binary
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(fetch_timeout_ms: u64) -> (tempfile::TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("content/projects")).unwrap();
        fs::write(
            root.join("content/projects.json"),
            r#"[{"id": "Foo", "title": "Foo Project", "tags": ["x"]}]"#,
        )
        .unwrap();
        fs::write(root.join("content/projects/foo.md"), "Hello *there*").unwrap();
        fs::create_dir_all(root.join("assets/PDF")).unwrap();
        fs::write(root.join("assets/PDF/cv.pdf"), b"%PDF").unwrap();

        let mut config = SiteConfig::from_str("[site]\ntitle = \"T\"").unwrap();
        config.content.source = root.join("content").to_string_lossy().into_owned();
        config.build.assets = root.join("assets");
        config.serve.fetch_timeout_ms = fetch_timeout_ms;
        (dir, config)
    }

    fn body(reply: &Reply) -> String {
        String::from_utf8_lossy(&reply.body).into_owned()
    }

    #[test]
    fn test_project_page_case_insensitive() {
        let (_dir, config) = fixture(5000);
        let runtime = Runtime::new().unwrap();

        let reply = respond("/projects/foo/", &config, &runtime).unwrap();
        assert_eq!(reply.status, 200);
        assert!(body(&reply).contains("<em>there</em>"));
        assert!(body(&reply).contains("Foo Project"));
    }

    #[test]
    fn test_project_page_error() {
        let (_dir, config) = fixture(5000);
        let runtime = Runtime::new().unwrap();

        let reply = respond("/projects/missing/", &config, &runtime).unwrap();
        assert!(body(&reply).contains("Error: Project markdown not found: 404"));
    }

    #[test]
    fn test_projects_listing_and_filter() {
        let (_dir, config) = fixture(5000);
        let runtime = Runtime::new().unwrap();

        let all = respond("/projects/", &config, &runtime).unwrap();
        assert!(body(&all).contains(r#"data-id="Foo""#));

        let filtered = respond("/projects/tag/y/", &config, &runtime).unwrap();
        assert!(!body(&filtered).contains(r#"data-id="Foo""#));
        assert!(body(&filtered).contains("No projects to show."));
    }

    #[test]
    fn test_about_without_current_projects_skips_fetch() {
        let (_dir, mut config) = fixture(5000);
        config.content.source = "/definitely/not/here".into();
        let runtime = Runtime::new().unwrap();

        let reply = respond("/", &config, &runtime).unwrap();
        assert_eq!(reply.status, 200);
        assert!(!body(&reply).contains("Error:"));
    }

    #[test]
    fn test_static_and_assets() {
        let (_dir, config) = fixture(5000);
        let runtime = Runtime::new().unwrap();

        let css = respond("/static/folio.css", &config, &runtime).unwrap();
        assert_eq!(css.content_type, "text/css; charset=utf-8");

        let pdf = respond("/assets/PDF/cv.pdf", &config, &runtime).unwrap();
        assert_eq!(pdf.content_type, "application/pdf");
        assert_eq!(pdf.body, b"%PDF");

        assert_eq!(respond("/assets/PDF/nope.pdf", &config, &runtime).unwrap().status, 404);
        assert_eq!(respond("/static/nope.js", &config, &runtime).unwrap().status, 404);
        assert_eq!(respond("/favicon.ico", &config, &runtime).unwrap().status, 404);
    }

    #[test]
    fn test_slow_mount_renders_timeout_error() {
        let runtime = Runtime::new().unwrap();
        let state: ViewState<u32> = mount(
            &runtime,
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Ok::<_, String>(1)
            },
        );
        assert_eq!(state, ViewState::Error("Request timed out after 10ms".into()));
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("a.pdf")), "application/pdf");
        assert_eq!(guess_content_type(Path::new("a")), "application/octet-stream");
    }

    #[test]
    fn test_try_bind_port_skips_busy_port() {
        let busy = Server::http("127.0.0.1:0").unwrap();
        let port = busy.server_addr().to_ip().unwrap().port();

        let (_server, addr) = try_bind_port("127.0.0.1".parse().unwrap(), port, 10).unwrap();
        assert_ne!(addr.port(), port);
    }
}
