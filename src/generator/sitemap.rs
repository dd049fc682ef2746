//! Sitemap generation.
//!
//! Lists every published route for search engine indexing. The not-found
//! page is left out.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://jane.github.io/portfolio/case-studies/</loc>
//!   </url>
//! </urlset>
//! ```

use std::borrow::Cow;
use std::fmt::Write;
use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::core::BasePath;
use crate::route::{PageKind, RouteTable};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Render `sitemap.xml` if enabled and `site.url` is set.
///
/// Returns the output path (relative to the export root) and the file body.
pub fn build_sitemap(config: &SiteConfig, routes: &RouteTable) -> Option<(PathBuf, Vec<u8>)> {
    if !config.build.sitemap.enable {
        return None;
    }
    let Some(origin) = config.site.url.as_deref().and_then(origin) else {
        crate::debug!("sitemap"; "skipped, site.url is not set");
        return None;
    };

    let xml = Sitemap::from_routes(routes, &origin, &config.base_path()).into_xml(config.build.minify);
    Some((config.build.sitemap.path.clone(), xml.into_bytes()))
}

/// Scheme, host and port of the site URL.
fn origin(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed.host_str()?;
    Some(parsed.origin().ascii_serialization())
}

struct Sitemap {
    urls: Vec<String>,
}

impl Sitemap {
    fn from_routes(routes: &RouteTable, origin: &str, base: &BasePath) -> Self {
        let urls = routes
            .iter()
            .filter(|entry| entry.page != PageKind::NotFound)
            .map(|entry| format!("{origin}{base}{}", entry.path.to_encoded()))
            .collect();
        Self { urls }
    }

    /// Serialize, one element per line unless `compact`.
    fn into_xml(self, compact: bool) -> String {
        let (nl, indent) = if compact { ("", "") } else { ("\n", "  ") };
        let mut xml = String::with_capacity(128 + self.urls.len() * 64);

        write!(
            xml,
            r#"<?xml version="1.0" encoding="UTF-8"?>{nl}<urlset xmlns="{SITEMAP_NS}">{nl}"#
        )
        .unwrap();
        for loc in &self.urls {
            write!(
                xml,
                "{indent}<url>{nl}{indent}{indent}<loc>{}</loc>{nl}{indent}</url>{nl}",
                escape_xml(loc)
            )
            .unwrap();
        }
        xml.push_str("</urlset>\n");
        xml
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
