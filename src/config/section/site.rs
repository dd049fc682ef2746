//! `[site]` section configuration.
//!
//! ```toml
//! [site]
//! title = "Jane Doe"
//! author = "Jane Doe"
//! description = "Researcher and engineer"
//! url = "https://jane.github.io/portfolio"   # path becomes the base path
//! language = "en"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Site metadata shown in `<head>`, the footer and the sitemap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title.
    pub title: String,

    /// Author name (footer copyright line).
    pub author: String,

    /// Site description (`<meta name="description">`).
    pub description: String,

    /// Public URL. Its path, if any, is the deployment base path.
    pub url: Option<String>,

    /// Language code (e.g., "en").
    pub language: String,

    /// Fixed copyright year. Defaults to the build year.
    pub copyright_year: Option<i32>,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
            copyright_year: None,
        }
    }
}

impl SiteInfoConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.title");
    pub const URL: FieldPath = FieldPath::new("site.url");

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `title` must not be empty
    /// - `url` must be an absolute http(s) URL with a host
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error(Self::TITLE, "site title is empty")
                .hint(format!("set {}, e.g.: \"Jane Doe\"", Self::TITLE));
        }

        let Some(url_str) = &self.url else {
            return;
        };
        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    let scheme = parsed.scheme();
                    diag.error(Self::URL, format!("scheme '{scheme}' not supported, must be http or https"))
                        .hint("use format like https://jane.github.io/portfolio");
                }
                if parsed.host_str().is_none() {
                    diag.error(Self::URL, "URL must have a valid host")
                        .hint("use format like https://jane.github.io/portfolio");
                }
            }
            Err(e) => {
                diag.error(Self::URL, format!("invalid URL: {e}"))
                    .hint("use format like https://jane.github.io/portfolio");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_site_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.language, "en");
        assert!(config.site.url.is_none());
        assert!(config.site.copyright_year.is_none());
    }

    #[test]
    fn test_site_validate_url() {
        let mut diag = ConfigDiagnostics::new();
        let mut site = test_parse_config("").site;
        site.url = Some("ftp://jane.dev".into());
        site.validate(&mut diag);
        assert_eq!(diag.len(), 1);

        let mut diag = ConfigDiagnostics::new();
        site.url = Some("not a url".into());
        site.validate(&mut diag);
        assert_eq!(diag.len(), 1);

        let mut diag = ConfigDiagnostics::new();
        site.url = Some("https://jane.github.io/portfolio/".into());
        site.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_site_validate_title() {
        let mut diag = ConfigDiagnostics::new();
        SiteInfoConfig::default().validate(&mut diag);
        assert_eq!(diag.errors()[0].field, SiteInfoConfig::TITLE);
    }
}
