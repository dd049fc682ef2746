//! Route table.
//!
//! Every page the site publishes, keyed by URL path:
//!
//! ```text
//! /                       Home
//! /case-studies/          CaseStudyIndex
//! /case-studies/{slug}/   CaseStudy(slug)
//! /{slug}/                Project(slug)
//! /404.html               NotFound
//! ```
//!
//! Paths are unique. A second entry for an existing path is a
//! [`RouteError::Duplicate`], so a project slug can never shadow another page.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

use crate::content::ContentRegistry;
use crate::core::UrlPath;

pub const CASE_STUDIES: &str = "/case-studies/";
pub const NOT_FOUND: &str = "/404.html";

/// What a route renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "slug", rename_all = "snake_case")]
pub enum PageKind {
    Home,
    CaseStudyIndex,
    CaseStudy(String),
    Project(String),
    NotFound,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("home page"),
            Self::CaseStudyIndex => f.write_str("case study index"),
            Self::CaseStudy(slug) => write!(f, "case study '{slug}'"),
            Self::Project(slug) => write!(f, "project '{slug}'"),
            Self::NotFound => f.write_str("not-found page"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub path: UrlPath,
    pub page: PageKind,
}

impl RouteEntry {
    pub fn new(path: UrlPath, page: PageKind) -> Self {
        Self { path, page }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route `{path}` is claimed by both the {first} and the {second}")]
    Duplicate {
        path: UrlPath,
        first: PageKind,
        second: PageKind,
    },
}

/// Ordered, duplicate-free set of routes.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    #[serde(skip)]
    index: FxHashMap<UrlPath, usize>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table for everything the registry publishes.
    pub fn from_registry(registry: &ContentRegistry) -> Result<Self, RouteError> {
        let mut table = Self::new();
        table.insert(RouteEntry::new(UrlPath::from_page("/"), PageKind::Home))?;
        table.insert(RouteEntry::new(
            UrlPath::from_page(CASE_STUDIES),
            PageKind::CaseStudyIndex,
        ))?;
        for study in registry.case_studies() {
            table.insert(RouteEntry::new(
                UrlPath::from_page(&format!("{CASE_STUDIES}{}", study.slug)),
                PageKind::CaseStudy(study.slug.clone()),
            ))?;
        }
        for (slug, _) in registry.project_pages() {
            table.insert(RouteEntry::new(
                UrlPath::from_page(slug),
                PageKind::Project(slug.to_string()),
            ))?;
        }
        table.insert(RouteEntry::new(
            UrlPath::from_asset(NOT_FOUND),
            PageKind::NotFound,
        ))?;

        crate::debug!("route"; "{}", crate::utils::plural_count(table.len(), "route"));
        Ok(table)
    }

    pub fn insert(&mut self, entry: RouteEntry) -> Result<(), RouteError> {
        if let Some(&i) = self.index.get(&entry.path) {
            return Err(RouteError::Duplicate {
                path: entry.path,
                first: self.entries[i].page.clone(),
                second: entry.page,
            });
        }
        self.index.insert(entry.path.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Find the route for a site-relative request path.
    ///
    /// `/case-studies`, `/case-studies/` and `/case-studies/index.html` all
    /// name the same page.
    pub fn lookup(&self, path: &str) -> Option<&RouteEntry> {
        let path = path.strip_suffix("index.html").unwrap_or(path);
        let key = if path.ends_with(".html") {
            UrlPath::from_asset(path)
        } else {
            UrlPath::from_page(path)
        };
        self.index.get(&key).map(|&i| &self.entries[i])
    }

    #[cfg(test)]
    pub fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteEntry;
    type IntoIter = std::slice::Iter<'a, RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
