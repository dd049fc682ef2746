//! Static export packager.
//!
//! ```text
//! folio.toml ─► Site::load ─► ContentRegistry ─► RouteTable
//!                                   │
//!                     render_all (rayon) + Bundle + sitemap + .nojekyll
//!                                   │
//!                           Stage (in memory) ─► commit ─► out/
//! ```
//!
//! Loading, rendering and staging all happen before the first write. Any
//! content, route or render error aborts the build with the output
//! directory untouched.

mod stage;

pub use stage::{NOJEKYLL, Origin, Stage, Summary};

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};

use crate::config::SiteConfig;
use crate::content::ContentRegistry;
use crate::core::{BasePath, PrefixMatch};
use crate::embed::site::Bundle;
use crate::generator::sitemap::build_sitemap;
use crate::render::{AssetUrls, Document, RenderContext, RenderError, SiteMeta, render_all};
use crate::route::RouteTable;
use crate::utils::plural_count;
use crate::{debug, log};

/// Everything one build renders from.
#[derive(Debug)]
pub struct Site {
    pub registry: ContentRegistry,
    pub routes: RouteTable,
    pub bundle: Bundle,
    pub meta: SiteMeta,
    pub base: BasePath,
    pub prefix_match: PrefixMatch,
    urls: AssetUrls,
}

impl Site {
    /// Load content and build the route table.
    pub fn load(config: &SiteConfig) -> Result<Self> {
        let registry = ContentRegistry::load(&config.build.content, &config.build.assets)
            .context("failed to load content")?;
        let routes = RouteTable::from_registry(&registry).context("failed to build routes")?;
        let bundle = Bundle::build(config);
        let urls = bundle.urls();

        Ok(Self {
            registry,
            routes,
            bundle,
            meta: SiteMeta::from_config(config),
            base: config.base_path(),
            prefix_match: config.nav.prefix_match,
            urls,
        })
    }

    /// Render context for the configured base path.
    pub fn context(&self) -> RenderContext<'_> {
        self.context_for(&self.base)
    }

    /// Render context for another prefix (server mode detects it per request).
    pub fn context_for<'a>(&'a self, base: &'a BasePath) -> RenderContext<'a> {
        RenderContext {
            base,
            site: &self.meta,
            assets: &self.urls,
            prefix_match: self.prefix_match,
        }
    }

    /// Render every route in parallel.
    pub fn render_all(&self) -> Result<Vec<Document>, RenderError> {
        render_all(&self.routes, &self.registry, &self.context())
    }

    /// Stage the complete export in memory.
    pub fn stage(&self, config: &SiteConfig) -> Result<Stage> {
        let documents = self.render_all().context("failed to render pages")?;

        let mut stage = Stage::new();
        for (doc, entry) in documents.into_iter().zip(&self.routes) {
            stage.page(doc.path.output_file(), entry.page.to_string(), doc.html)?;
        }
        for asset in self.bundle.iter() {
            stage.bytes(
                asset.output_path(),
                Origin::Embedded,
                asset.content.clone().into_bytes(),
            )?;
        }
        if let Some((path, xml)) = build_sitemap(config, &self.routes) {
            stage.bytes(path, Origin::Generated("sitemap"), xml)?;
        }
        stage.bytes(NOJEKYLL.into(), Origin::Generated(NOJEKYLL), Vec::new())?;
        stage.public_dir(&config.build.assets)?;
        Ok(stage)
    }
}

/// Build the site into `build.output`.
pub fn build_site(config: &SiteConfig) -> Result<Summary> {
    let started = Instant::now();
    check_output_dir(config)?;

    let site = Site::load(config)?;
    let hidden = site.registry.hidden_count();
    if hidden > 0 {
        log!("build"; "skipping {}", plural_count(hidden, "hidden case study"));
    }
    debug!(
        "build";
        "{} under base path '{}'",
        plural_count(site.routes.len(), "route"),
        site.base
    );
    let stage = site.stage(config)?;

    let output = &config.build.output;
    let summary = stage.commit(output, config.build.clean)?;
    log!(
        "build";
        "{} and {} written to {} in {:.2?}",
        plural_count(summary.pages, "page"),
        plural_count(summary.assets, "asset"),
        config.root_relative(output).display(),
        started.elapsed()
    );
    Ok(summary)
}

/// The output directory is wiped by `--clean`, so it must not hold sources.
fn check_output_dir(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    let sources: [(&str, &Path); 3] = [
        ("project root", config.get_root()),
        ("content directory", &config.build.content),
        ("assets directory", &config.build.assets),
    ];
    for (name, source) in sources {
        if output == source || source.starts_with(output) {
            bail!(
                "output directory '{}' contains the {name}",
                config.root_relative(output).display()
            );
        }
    }
    Ok(())
}
