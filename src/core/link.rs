//! Link classification.
//!
//! [`LinkKind`] is the syntactic shape of an `href`; [`NavigationLink`] is
//! what the navigation controller sees when a link is clicked.

use serde::Serialize;

use super::base::BasePath;
use crate::utils::path::route::{is_external_link, split_path_fragment};

/// Syntactic classification of links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// External link with URL scheme (https://, mailto:, tel:, etc.)
    External(&'a str),
    /// Pure fragment/anchor link (#section). Value is anchor without `#`.
    Fragment(&'a str),
    /// Site-root-relative path (/case-studies/, /image/ME.jpg).
    SiteRoot(&'a str),
    /// File-relative path (./figure.png, ../other).
    FileRelative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if is_external_link(link) {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if let Some(anchor) = link.strip_prefix("./#") {
            Self::Fragment(anchor)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::FileRelative(link)
        }
    }
}

/// A clicked link, classified against the page's base path.
///
/// `is_anchor` holds for `#x` and for root-relative `/#x` (after removing
/// the base path), `is_external` for anything with a URL scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationLink {
    pub href: String,
    pub is_anchor: bool,
    pub is_external: bool,
    #[serde(skip)]
    target: Option<AnchorTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AnchorTarget {
    id: String,
    /// `/#x` form: only an in-page jump when the current page is the root.
    site_root: bool,
}

impl NavigationLink {
    pub fn parse(href: &str, base: &BasePath) -> Self {
        let target = match LinkKind::parse(href) {
            LinkKind::Fragment(id) => Some(AnchorTarget {
                id: id.to_string(),
                site_root: false,
            }),
            LinkKind::SiteRoot(path) if !path.starts_with("//") && path.contains('#') => {
                let (page, id) = split_path_fragment(path);
                (base.strip(page).unwrap_or(page) == "/").then(|| AnchorTarget {
                    id: id.to_string(),
                    site_root: true,
                })
            }
            _ => None,
        };

        Self {
            href: href.to_string(),
            is_anchor: target.is_some(),
            is_external: is_external_link(href) || href.starts_with("//"),
            target,
        }
    }

    /// Target id of an anchor link (without `#`).
    pub fn anchor_id(&self) -> Option<&str> {
        self.target.as_ref().map(|t| t.id.as_str())
    }

    /// Id to scroll to when clicked on a page, or `None` to let the browser
    /// follow the link.
    ///
    /// `#x` always qualifies; `/#x` only while `on_root` is true. Empty
    /// fragments never do.
    pub fn in_page_target(&self, on_root: bool) -> Option<&str> {
        let target = self.target.as_ref()?;
        if target.id.is_empty() || (target.site_root && !on_root) {
            return None;
        }
        Some(&target.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_external() {
        assert!(matches!(
            LinkKind::parse("https://example.com"),
            LinkKind::External("https://example.com")
        ));
        assert!(matches!(
            LinkKind::parse("mailto:user@example.com"),
            LinkKind::External("mailto:user@example.com")
        ));
        assert!(matches!(
            LinkKind::parse("tel:+1234567890"),
            LinkKind::External("tel:+1234567890")
        ));
    }

    #[test]
    fn test_parse_fragment() {
        assert!(matches!(LinkKind::parse("#about"), LinkKind::Fragment("about")));
        assert!(matches!(LinkKind::parse("#"), LinkKind::Fragment("")));
        assert!(matches!(
            LinkKind::parse("./#contact"),
            LinkKind::Fragment("contact")
        ));
    }

    #[test]
    fn test_parse_site_root() {
        assert!(matches!(
            LinkKind::parse("/case-studies/"),
            LinkKind::SiteRoot("/case-studies/")
        ));
        assert!(matches!(LinkKind::parse("/#about"), LinkKind::SiteRoot("/#about")));
    }

    #[test]
    fn test_parse_file_relative() {
        assert!(matches!(
            LinkKind::parse("./figure.png"),
            LinkKind::FileRelative("./figure.png")
        ));
        assert!(matches!(
            LinkKind::parse("figure.png"),
            LinkKind::FileRelative("figure.png")
        ));
    }

    #[test]
    fn test_navigation_link_fragment() {
        let link = NavigationLink::parse("#education", &BasePath::root());
        assert!(link.is_anchor);
        assert!(!link.is_external);
        assert_eq!(link.in_page_target(false), Some("education"));
        assert_eq!(link.in_page_target(true), Some("education"));
    }

    #[test]
    fn test_navigation_link_root_anchor() {
        let base = BasePath::new("/portfolio");
        for href in ["/portfolio/#projects", "/portfolio#projects"] {
            let link = NavigationLink::parse(href, &base);
            assert!(link.is_anchor, "{href}");
            assert_eq!(link.in_page_target(true), Some("projects"));
            assert_eq!(link.in_page_target(false), None);
        }

        let link = NavigationLink::parse("/#projects", &BasePath::root());
        assert!(link.is_anchor);
        assert_eq!(link.anchor_id(), Some("projects"));
    }

    #[test]
    fn test_navigation_link_not_anchor() {
        let base = BasePath::new("/portfolio");
        let page = NavigationLink::parse("/portfolio/case-studies/", &base);
        assert!(!page.is_anchor);
        assert!(!page.is_external);

        let deep = NavigationLink::parse("/portfolio/case-studies/#intro", &base);
        assert!(!deep.is_anchor);

        let external = NavigationLink::parse("https://github.com/jane", &base);
        assert!(external.is_external);
        assert!(!external.is_anchor);

        let mail = NavigationLink::parse("mailto:jane@example.com", &base);
        assert!(mail.is_external);
    }

    #[test]
    fn test_navigation_link_empty_fragment() {
        let link = NavigationLink::parse("#", &BasePath::root());
        assert!(link.is_anchor);
        assert_eq!(link.in_page_target(true), None);
    }
}
