//! Display records: the normalized view every renderer works from.

use serde::Serialize;

/// What following a link does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkRole {
    /// Leaves the site, opened in a new tab.
    External,
    /// A file served from the assets directory (paper, CV, code listing).
    Download,
    /// Another page of this site.
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
    pub kind: LinkRole,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>, kind: LinkRole) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            kind,
        }
    }

    pub fn external(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(label, url, LinkRole::External)
    }

    pub fn download(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(label, url, LinkRole::Download)
    }

    pub fn internal(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(label, url, LinkRole::Internal)
    }

    /// Root-relative URL that must exist in the assets directory.
    pub fn local_asset(&self) -> Option<&str> {
        (self.kind == LinkRole::Download && self.url.starts_with('/') && !self.url.starts_with("//"))
            .then_some(self.url.as_str())
    }
}

/// One piece of displayable content (project card, case study, ...).
///
/// Immutable once the registry is loaded. Optional links are simply absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
    pub title: String,
    pub description: String,
    pub media_path: Option<String>,
    pub links: Vec<Link>,
}

impl ContentRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            media_path: None,
            links: Vec::new(),
        }
    }

    pub fn with_media(mut self, media: Option<String>) -> Self {
        self.media_path = media;
        self
    }

    /// Append a link when the URL is present.
    pub fn with_link(mut self, link: Option<Link>) -> Self {
        self.links.extend(link);
        self
    }

    /// Every root-relative asset this record points at.
    pub fn local_assets(&self) -> impl Iterator<Item = &str> {
        self.media_path
            .as_deref()
            .filter(|m| m.starts_with('/') && !m.starts_with("//"))
            .into_iter()
            .chain(self.links.iter().filter_map(Link::local_asset))
    }
}
