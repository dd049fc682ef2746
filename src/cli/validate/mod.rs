//! `folio validate`: render every page in memory and check what it links to.
//!
//! - Root-relative `href`/`src` values must carry the base path and resolve
//!   to a route, an embedded asset or a file in the assets directory.
//! - In-page anchors are clicked through the [`NavigationController`]
//!   mounted on each page. A `Missing` outcome is a broken anchor.
//! - `/page/#id` links to other pages are checked against that page's ids.
//! - An id used by more than one element is an anchor error: links to it
//!   land on the first one only.
//!
//! Nothing is written to disk.

mod report;

use anyhow::{Context, Result, anyhow, bail};
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::Path;

use crate::cli::args::ValidateArgs;
use crate::config::SiteConfig;
use crate::core::{LinkKind, NavigationLink};
use crate::export::Site;
use crate::nav::{ClickOutcome, NavSettings, NavigationController, StaticDocument};
use crate::route::RouteEntry;
use crate::utils::path::fs::url_to_fs_path;
use crate::utils::path::route::{decode_path, split_path_fragment};
use crate::utils::plural_count;
use crate::{debug, log};

pub use report::{Section, ValidationReport};

/// Validate site links, assets and anchors
pub fn validate_site(args: &ValidateArgs, config: &SiteConfig) -> Result<()> {
    let site = Site::load(config)?;
    let report = check_site(&site, config)?;
    log!("validate"; "checked {}", plural_count(site.routes.len(), "page"));

    report.print();
    let total = report.total();
    if total == 0 {
        log!("validate"; "{}", report);
        return Ok(());
    }
    if args.warn_only {
        log!("warning"; "{}", report);
        return Ok(());
    }
    bail!(
        "validation failed: {} on {}",
        plural_count(total, "error"),
        plural_count(report.page_count(), "page")
    )
}

/// A rendered page parsed for checking.
struct Page<'a> {
    entry: &'a RouteEntry,
    doc: StaticDocument,
    /// hrefs the navigation controller already resolved.
    clicked: FxHashSet<String>,
}

/// Render and check every route.
pub fn check_site(site: &Site, config: &SiteConfig) -> Result<ValidationReport> {
    let documents = site.render_all().context("failed to render pages")?;

    let mut pages = Vec::with_capacity(documents.len());
    for (rendered, entry) in documents.into_iter().zip(&site.routes) {
        let served_at = format!("{}{}", site.base, rendered.path.to_encoded());
        let doc = StaticDocument::parse(&served_at, &rendered.html)
            .map_err(|e| anyhow!("failed to parse the {}: {e:?}", entry.page))?;
        pages.push(Page {
            entry,
            doc,
            clicked: FxHashSet::default(),
        });
    }

    let mut report = ValidationReport::default();
    for page in &pages {
        for id in page.doc.duplicate_ids() {
            report.add(
                Section::Anchors,
                page.entry.path.as_str(),
                &format!("#{id}"),
                "id used by more than one element",
            );
        }
    }
    let settings = NavSettings::from_config(&config.nav, site.base.clone());
    for page in &mut pages {
        click_anchors(page, &settings, &mut report);
    }

    let checker = Checker {
        site,
        assets: &config.build.assets,
        docs: pages
            .iter()
            .map(|p| (p.entry.path.as_str(), &p.doc))
            .collect(),
    };
    for page in &pages {
        checker.check_refs(page, &mut report);
    }
    Ok(report)
}

/// Click every link on the page the way a visitor would.
fn click_anchors(page: &mut Page<'_>, settings: &NavSettings, report: &mut ValidationReport) {
    let source = page.entry.path.as_str();
    let hrefs: Vec<String> = page.doc.links().map(str::to_string).collect();

    let mut controller = NavigationController::new(settings.clone());
    let mut mounted = controller.mount(&mut page.doc);
    for href in hrefs {
        match mounted.click(&href) {
            ClickOutcome::Ignored => continue,
            ClickOutcome::Missing => {
                let link = NavigationLink::parse(&href, mounted.base());
                let id = link.anchor_id().unwrap_or_default();
                report.add(Section::Anchors, source, &href, format!("no element with id `{id}`"));
            }
            ClickOutcome::Scrolled { .. } => mounted.scroll_end(),
        }
        page.clicked.insert(href);
    }
}

struct Checker<'a> {
    site: &'a Site,
    assets: &'a Path,
    /// Parsed pages by route path.
    docs: FxHashMap<&'a str, &'a StaticDocument>,
}

impl Checker<'_> {
    fn check_refs(&self, page: &Page<'_>, report: &mut ValidationReport) {
        let source = page.entry.path.as_str();
        for reference in page.doc.refs() {
            let url = reference.url.as_str();
            if reference.attr == "href" && page.clicked.contains(url) {
                continue;
            }
            match LinkKind::parse(url) {
                LinkKind::SiteRoot(path) if !path.starts_with("//") => {
                    if let Err((section, reason)) = self.resolve(path, reference.attr) {
                        report.add(section, source, url, reason);
                    }
                }
                LinkKind::FileRelative(path) if !path.is_empty() => {
                    debug!("validate"; "{}: skipping relative link {}", source, path);
                }
                _ => {}
            }
        }
    }

    /// Resolve a root-relative reference against routes, embedded assets
    /// and the assets directory.
    fn resolve(&self, url: &str, attr: &str) -> Result<(), (Section, String)> {
        let (path, fragment) = split_path_fragment(url);
        let base = &self.site.base;
        let Some(relative) = base.strip(path) else {
            return Err((section_for(path, attr), format!("missing base path `{base}`")));
        };
        let relative = decode_path(relative);

        if let Some(entry) = self.site.routes.lookup(&relative) {
            let missing_id = !fragment.is_empty()
                && self
                    .docs
                    .get(entry.path.as_str())
                    .is_some_and(|doc| !doc.has_id(fragment));
            if missing_id {
                return Err((
                    Section::Anchors,
                    format!("no element with id `{fragment}` on the {}", entry.page),
                ));
            }
            return Ok(());
        }
        if self.site.bundle.get(&relative).is_some() {
            return Ok(());
        }
        if url_to_fs_path(self.assets, &relative).is_some_and(|file| file.is_file()) {
            return Ok(());
        }

        let reason = match section_for(&relative, attr) {
            Section::Pages => "no such page",
            _ => "not found",
        };
        Err((section_for(&relative, attr), reason.to_string()))
    }
}

/// `src` and file-like paths are assets, everything else a page.
fn section_for(path: &str, attr: &str) -> Section {
    let last = path.rsplit('/').next().unwrap_or_default();
    if attr == "src" || last.contains('.') {
        Section::Assets
    } else {
        Section::Pages
    }
}
