//! Preview server.
//!
//! `export` mode builds the site once and serves `build.output`, accepting
//! requests with or without the base path. `server` mode keeps the loaded
//! site in memory and renders each route on request, detecting the prefix
//! from the request path the way `nav.js` does in the browser.
//!
//! With `serve.watch`, content, assets and `folio.toml` are watched and the
//! site is rebuilt on change.

mod lifecycle;
mod path;
mod response;
mod watch;

use crate::{
    config::{OutputMode, SiteConfig, cfg},
    core::{BasePath, build_error, is_shutdown, register_server, set_build_error},
    embed::AssetKind,
    export::{Site, build_site},
    log,
    render::render_route,
    route::{NOT_FOUND, PageKind},
    utils::mime::{self, types},
};
use anyhow::{Context, Result};
use arc_swap::ArcSwapOption;
use crossbeam::channel;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};
use tiny_http::{Request, Server};

/// Site loaded for server mode.
static SITE: LazyLock<ArcSwapOption<Site>> = LazyLock::new(ArcSwapOption::empty);

/// Start the preview server (blocking until Ctrl+C).
pub fn serve_site() -> Result<()> {
    let config = cfg();
    if let Err(e) = rebuild(&config) {
        // Keep serving so the error page shows up and watch can recover.
        if !config.serve.watch {
            return Err(e);
        }
        log!("error"; "{:#}", e);
    }

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    register_server(Arc::clone(&server), shutdown_tx);

    let base = config.base_path();
    log!("serve"; "http://{}{}/", addr, base);

    let watcher = if config.serve.watch {
        Some(watch::spawn(&config, shutdown_rx)?)
    } else {
        None
    };

    run_request_loop(&server)?;
    lifecycle::wait_for_shutdown(watcher);
    Ok(())
}

/// Build the export or reload the in-memory site, recording the outcome.
fn rebuild(config: &SiteConfig) -> Result<()> {
    let result = match config.build.output_mode {
        OutputMode::Export => build_site(config).map(|_| ()),
        OutputMode::Server => Site::load(config).map(|site| {
            SITE.store(Some(Arc::new(site)));
        }),
    };
    set_build_error(result.as_ref().err().map(|e| format!("{e:#}")));
    result
}

fn run_request_loop(server: &Server) -> Result<()> {
    // Rendering a page must not block asset requests
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .context("failed to create request thread pool")?;

    for request in server.incoming_requests() {
        pool.spawn(move || {
            let config = cfg();
            if let Err(e) = handle_request(request, &config) {
                log!("serve"; "request error: {e:#}");
            }
        });
    }
    Ok(())
}

/// What to send back for one request.
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    File(PathBuf),
    Bytes {
        status: u16,
        content_type: &'static str,
        body: Vec<u8>,
    },
    Page {
        status: u16,
        html: String,
    },
    NotFound,
    BuildError(String),
}

fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }
    if !response::is_allowed(request.method()) {
        return response::respond_method_not_allowed(request);
    }

    let path = path::request_path(request.url());
    // Pages get the error screen; assets keep loading from the last good build
    let reply = match build_error() {
        Some(error) if is_page_request(&path) => Reply::BuildError(error),
        _ => match config.build.output_mode {
            OutputMode::Export => resolve_export(&path, config),
            OutputMode::Server => match SITE.load_full() {
                Some(site) => resolve_rendered(&path, config, &site)?,
                None => Reply::BuildError("site is not loaded".into()),
            },
        },
    };

    match reply {
        Reply::File(file) => response::respond_file(request, &file),
        Reply::Bytes {
            status,
            content_type,
            body,
        } => response::respond_bytes(request, status, content_type, body),
        Reply::Page { status, html } => response::respond_html(request, status, html),
        Reply::NotFound => response::respond_not_found(request),
        Reply::BuildError(error) => response::respond_build_error(request, &error),
    }
}

fn is_page_request(path: &str) -> bool {
    path.ends_with('/') || path.ends_with(".html") || !path.rsplit('/').next().unwrap_or("").contains('.')
}

/// Serve the exported files, with the base path stripped if present.
fn resolve_export(path: &str, config: &SiteConfig) -> Reply {
    let base = config.base_path();
    let output = &config.build.output;
    let relative = base.strip(path).unwrap_or(path);

    if let Some(file) = path::resolve_path(relative, output) {
        return Reply::File(file);
    }

    match std::fs::read(output.join(NOT_FOUND.trim_start_matches('/'))) {
        Ok(body) => Reply::Bytes {
            status: 404,
            content_type: types::HTML,
            body,
        },
        Err(_) => Reply::NotFound,
    }
}

/// Render a route, or serve an embedded asset or public file.
fn resolve_rendered(path: &str, config: &SiteConfig, site: &Site) -> Result<Reply> {
    let base = BasePath::detect(path, &config.build.base_path, config.nav.prefix_match);
    let relative = base.strip(path).unwrap_or(path);
    let ctx = site.context_for(&base);

    if let Some(asset) = site.bundle.get(relative) {
        return Ok(Reply::Bytes {
            status: 200,
            content_type: match asset.kind {
                AssetKind::Css => types::CSS,
                AssetKind::JavaScript => types::JAVASCRIPT,
            },
            body: asset.content.clone().into_bytes(),
        });
    }

    if let Some(entry) = site.routes.lookup(relative) {
        return Ok(match render_route(entry, &site.registry, &ctx) {
            Ok(doc) => Reply::Page {
                status: 200,
                html: doc.html,
            },
            Err(e) => Reply::BuildError(e.to_string()),
        });
    }

    if let Some(file) = path::resolve_path(relative, &config.build.assets) {
        if config.build.image_optimization
            && let Some(body) = crate::image::downscale(&file, config.build.image_max_width)?
        {
            return Ok(Reply::Bytes {
                status: 200,
                content_type: mime::from_path(&file),
                body,
            });
        }
        return Ok(Reply::File(file));
    }

    let not_found = site.routes.iter().find(|e| e.page == PageKind::NotFound);
    Ok(match not_found.map(|entry| render_route(entry, &site.registry, &ctx)) {
        Some(Ok(doc)) => Reply::Page {
            status: 404,
            html: doc.html,
        },
        _ => Reply::NotFound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::content::fixture::fixture;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir, mode: &str) -> SiteConfig {
        let mut config = test_parse_config(&format!(
            "[build]\nminify = false\noutput_mode = \"{mode}\"\nbase_path = \"/portfolio\""
        ));
        config.root = dir.path().to_path_buf();
        config.build.content = dir.path().join("content");
        config.build.assets = dir.path().join("public");
        config.build.output = dir.path().join("out");
        config
    }

    fn page(reply: Reply) -> (u16, String) {
        match reply {
            Reply::Page { status, html } => (status, html),
            other => panic!("expected a page, got {other:?}"),
        }
    }

    #[test]
    fn test_export_served_with_and_without_prefix() {
        let dir = fixture();
        let config = config_for(&dir, "export");
        build_site(&config).unwrap();

        let with_prefix = resolve_export("/portfolio/case-studies/", &config);
        let without = resolve_export("/case-studies/", &config);
        assert_eq!(with_prefix, without);
        assert!(matches!(with_prefix, Reply::File(ref f) if f.ends_with("case-studies/index.html")));

        assert!(matches!(
            resolve_export("/portfolio/nope/", &config),
            Reply::Bytes { status: 404, .. }
        ));
    }

    #[test]
    fn test_rendered_prefix_detected_per_request() {
        let dir = fixture();
        let config = config_for(&dir, "server");
        let site = Site::load(&config).unwrap();

        let (status, prefixed) = page(resolve_rendered("/portfolio/", &config, &site).unwrap());
        assert_eq!(status, 200);
        assert!(prefixed.contains(r#"src="/portfolio/image/ME.jpg""#));

        let (_, rooted) = page(resolve_rendered("/", &config, &site).unwrap());
        assert!(rooted.contains(r#"src="/image/ME.jpg""#));

        // substring-looking paths do not pick up the prefix in segment mode
        let (status, _) = page(resolve_rendered("/portfolios/", &config, &site).unwrap());
        assert_eq!(status, 404);
    }

    #[test]
    fn test_rendered_assets_and_files() {
        let dir = fixture();
        let config = config_for(&dir, "server");
        let site = Site::load(&config).unwrap();

        let script = format!("/portfolio{}", site.bundle.script.url());
        assert!(matches!(
            resolve_rendered(&script, &config, &site).unwrap(),
            Reply::Bytes { status: 200, content_type: types::JAVASCRIPT, .. }
        ));
        assert!(matches!(
            resolve_rendered("/portfolio/Enhanced Optical Flow.pdf", &config, &site).unwrap(),
            Reply::File(_)
        ));
        assert!(matches!(
            resolve_rendered("/portfolio/case-studies/kd-trees", &config, &site).unwrap(),
            Reply::Page { status: 200, .. }
        ));
    }

    #[test]
    fn test_page_request_detection() {
        assert!(is_page_request("/"));
        assert!(is_page_request("/case-studies"));
        assert!(is_page_request("/404.html"));
        assert!(!is_page_request("/image/ME.jpg"));
    }
}
