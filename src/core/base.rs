//! Deployment base path.
//!
//! A site can be hosted at a domain root (`https://jane.dev/`) or under a
//! project subpath (`https://jane.github.io/portfolio/`). Every internal link
//! and asset reference of a page goes through one [`BasePath`] so the whole
//! page moves together when the prefix changes.

use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::link::LinkKind;

/// One or more clean path segments, e.g. `/portfolio` or `/jane/portfolio`.
static WELL_FORMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(/[A-Za-z0-9._~-]+)+$").unwrap());

/// How the deployment segment is recognised in a request path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixMatch {
    /// Path equals the segment or starts with `segment/`.
    #[default]
    Segment,
    /// Path contains the segment text anywhere (legacy behaviour).
    Substring,
}

impl PrefixMatch {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Segment => "segment",
            Self::Substring => "substring",
        }
    }

    /// Check whether `path` is served under `segment`.
    pub fn matches(self, path: &str, segment: &str) -> bool {
        if segment.is_empty() {
            return false;
        }
        match self {
            Self::Segment => {
                path == segment
                    || path
                        .strip_prefix(segment)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            Self::Substring => path.contains(segment),
        }
    }
}

/// URL prefix applied to root-relative links and assets.
///
/// Either empty (domain root) or `/seg[/seg]` without a trailing slash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BasePath {
    prefix: Arc<str>,
}

impl BasePath {
    /// Empty prefix (site served from the domain root).
    pub fn root() -> Self {
        Self::default()
    }

    /// Normalize a configured prefix.
    ///
    /// `"portfolio/"`, `"/portfolio"` and `"/portfolio/"` all become
    /// `/portfolio`; `""` and `"/"` become the root.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Self::root();
        }
        Self {
            prefix: Arc::from(format!("/{trimmed}")),
        }
    }

    /// Prefix for a page loaded at `current_path`.
    ///
    /// Returns `segment` when the path is under it, the root otherwise.
    pub fn detect(current_path: &str, segment: &str, mode: PrefixMatch) -> Self {
        let segment = Self::new(segment);
        if mode.matches(current_path, &segment.prefix) {
            segment
        } else {
            Self::root()
        }
    }

    /// Check a raw configured value before normalization.
    ///
    /// Empty means root. Anything else must be clean `/segment` parts with no
    /// query, fragment, whitespace or `..`.
    pub fn is_well_formed(raw: &str) -> bool {
        let trimmed = raw.trim_end_matches('/');
        trimmed.is_empty()
            || (WELL_FORMED.is_match(trimmed) && !trimmed.split('/').any(|s| s == ".." || s == "."))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Prefix used for assets: `/portfolio/` or `/`.
    pub fn asset_prefix(&self) -> String {
        format!("{}/", self.prefix)
    }

    /// Apply the prefix to a link.
    ///
    /// Root-relative internal paths are prefixed. External URLs,
    /// `mailto:`/`tel:`, fragments, protocol-relative and file-relative
    /// references pass through.
    pub fn resolve<'a>(&self, href: &'a str) -> Cow<'a, str> {
        if self.is_root() || href.starts_with("//") {
            return Cow::Borrowed(href);
        }
        match LinkKind::parse(href) {
            LinkKind::SiteRoot(path) => Cow::Owned(format!("{}{path}", self.prefix)),
            LinkKind::External(_) | LinkKind::Fragment(_) | LinkKind::FileRelative(_) => {
                Cow::Borrowed(href)
            }
        }
    }

    /// Remove the prefix from a request path.
    ///
    /// Returns `None` when the path is outside the prefix.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.is_root() {
            return Some(path);
        }
        let rest = path.strip_prefix(self.prefix.as_ref())?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}

impl std::fmt::Display for BasePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prefix)
    }
}
