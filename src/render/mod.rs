//! Page renderer.
//!
//! Rendering is a pure function of a route, the content registry and a
//! [`RenderContext`]. Every internal link and asset reference goes through
//! the context's [`BasePath`], so the same registry renders identically
//! under any deployment prefix apart from the prefix text itself.
//!
//! ```text
//! RouteEntry ──► render_route ──► Document { path, html }
//!                    │
//!                    ├── home        (/)
//!                    ├── case_study  (/case-studies/, /case-studies/{slug}/)
//!                    └── project     (/{slug}/, /404.html)
//! ```

mod case_study;
mod home;
mod layout;
mod project;

use rayon::prelude::*;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::content::ContentRegistry;
use crate::core::{BasePath, PrefixMatch, UrlPath};
use crate::route::{PageKind, RouteEntry, RouteTable};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("route points at unknown case study `{0}`")]
    UnknownCaseStudy(String),

    #[error("route points at unknown project page `{0}`")]
    UnknownProject(String),
}

/// Site-wide values shown on every page.
#[derive(Debug, Clone)]
pub struct SiteMeta {
    pub title: String,
    pub author: String,
    pub description: String,
    pub language: String,
    pub year: i32,
}

impl SiteMeta {
    pub fn from_config(config: &SiteConfig) -> Self {
        let site = &config.site;
        Self {
            title: site.title.clone(),
            author: if site.author.is_empty() {
                site.title.clone()
            } else {
                site.author.clone()
            },
            description: site.description.clone(),
            language: site.language.clone(),
            year: site
                .copyright_year
                .unwrap_or_else(crate::utils::current_year),
        }
    }
}

/// Root-relative URLs of the stylesheet and navigation script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrls {
    pub style: String,
    pub script: String,
}

/// Everything a page needs besides its content.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub base: &'a BasePath,
    pub site: &'a SiteMeta,
    pub assets: &'a AssetUrls,
    pub prefix_match: PrefixMatch,
}

/// A rendered page, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: UrlPath,
    pub html: String,
}

/// Render the page behind one route.
pub fn render_route(
    entry: &RouteEntry,
    registry: &ContentRegistry,
    ctx: &RenderContext<'_>,
) -> Result<Document, RenderError> {
    let html = match &entry.page {
        PageKind::Home => home::render(registry, ctx),
        PageKind::CaseStudyIndex => case_study::render_index(registry, ctx),
        PageKind::CaseStudy(slug) => {
            let study = registry
                .case_study(slug)
                .ok_or_else(|| RenderError::UnknownCaseStudy(slug.clone()))?;
            case_study::render(study, registry, ctx)
        }
        PageKind::Project(slug) => {
            let project = registry
                .project(slug)
                .ok_or_else(|| RenderError::UnknownProject(slug.clone()))?;
            project::render(project, registry, ctx)
        }
        PageKind::NotFound => project::render_not_found(registry, ctx),
    };
    Ok(Document {
        path: entry.path.clone(),
        html,
    })
}

/// Render every route in parallel. Fails on the first broken route.
pub fn render_all(
    table: &RouteTable,
    registry: &ContentRegistry,
    ctx: &RenderContext<'_>,
) -> Result<Vec<Document>, RenderError> {
    table
        .iter()
        .collect::<Vec<_>>()
        .par_iter()
        .map(|entry| render_route(entry, registry, ctx))
        .collect()
}
