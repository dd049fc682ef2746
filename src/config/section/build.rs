//! `[build]` section configuration.
//!
//! ```toml
//! [build]
//! output_mode = "export"        # "export" (static files) | "server" (render on request)
//! base_path = "/portfolio"      # URL prefix for links (derived from site.url if unset)
//! asset_prefix = "/portfolio/"  # URL prefix for assets, must agree with base_path
//! image_optimization = false    # "server" mode only
//! image_max_width = 1600
//! content = "content"
//! assets = "public"
//! output = "out"
//! minify = true
//!
//! [build.sitemap]
//! enable = true
//! path = "sitemap.xml"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::core::BasePath;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the site is delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Static files written to `build.output`.
    #[default]
    Export,
    /// Pages rendered per request by `folio serve`.
    Server,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Enable sitemap generation (needs `site.url`).
    pub enable: bool,
    /// Output path, relative to the export root.
    pub path: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub output_mode: OutputMode,

    /// URL prefix for internal links, as written by the user.
    pub base_path: String,

    /// URL prefix for assets. Defaults to `base_path`.
    pub asset_prefix: Option<String>,

    /// Downscale raster images on request (server mode).
    pub image_optimization: bool,

    /// Widest image served when optimization is on.
    pub image_max_width: u32,

    /// Content directory (TOML records and markdown bodies).
    pub content: PathBuf,

    /// Static assets copied verbatim into the export.
    pub assets: PathBuf,

    /// Export directory.
    pub output: PathBuf,

    /// Minify emitted CSS and JS.
    pub minify: bool,

    /// Remove the output directory before writing (CLI only).
    #[serde(skip)]
    pub clean: bool,

    pub sitemap: SitemapConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_mode: OutputMode::Export,
            base_path: String::new(),
            asset_prefix: None,
            image_optimization: false,
            image_max_width: 1600,
            content: "content".into(),
            assets: "public".into(),
            output: "out".into(),
            minify: true,
            clean: false,
            sitemap: SitemapConfig::default(),
        }
    }
}

impl BuildConfig {
    pub const BASE_PATH: FieldPath = FieldPath::new("build.base_path");
    pub const ASSET_PREFIX: FieldPath = FieldPath::new("build.asset_prefix");
    pub const IMAGE_OPTIMIZATION: FieldPath = FieldPath::new("build.image_optimization");
    pub const IMAGE_MAX_WIDTH: FieldPath = FieldPath::new("build.image_max_width");
    pub const CONTENT: FieldPath = FieldPath::new("build.content");
    pub const OUTPUT: FieldPath = FieldPath::new("build.output");

    /// Normalized link prefix.
    pub fn base(&self) -> BasePath {
        BasePath::new(&self.base_path)
    }

    /// Validate build configuration.
    ///
    /// # Checks
    /// - `base_path` is empty or clean `/segment` parts
    /// - `asset_prefix`, when set, names the same prefix as `base_path`
    /// - `image_optimization` is off for `export`
    /// - `image_max_width` is positive
    /// - `output` is not the content or assets directory
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !BasePath::is_well_formed(&self.base_path) {
            diag.error(Self::BASE_PATH, format!("'{}' is not a valid base path", self.base_path))
                .hint("use a leading slash and plain segments, e.g. \"/portfolio\"");
        }

        if let Some(prefix) = &self.asset_prefix {
            if !BasePath::is_well_formed(prefix) {
                diag.error(Self::ASSET_PREFIX, format!("'{prefix}' is not a valid asset prefix"))
                    .hint("use a leading slash, e.g. \"/portfolio/\"");
            } else if BasePath::new(prefix) != self.base() {
                let base = self.base();
                diag.error(
                    Self::ASSET_PREFIX,
                    format!("asset prefix '{prefix}' disagrees with base path '{base}'"),
                )
                .hint(format!(
                    "remove {} or set it to \"{}\"",
                    Self::ASSET_PREFIX,
                    base.asset_prefix()
                ));
            }
        }

        if self.image_optimization && self.output_mode == OutputMode::Export {
            diag.error(
                Self::IMAGE_OPTIMIZATION,
                "image optimization needs a server and cannot be used with output_mode = \"export\"",
            )
            .hint(format!("set {} = false", Self::IMAGE_OPTIMIZATION));
        }

        if self.image_max_width == 0 {
            diag.error(Self::IMAGE_MAX_WIDTH, "must be greater than 0");
        }

        if self.output == self.content || self.output == self.assets {
            let output = self.output.display();
            diag.error(Self::OUTPUT, format!("'{output}' would overwrite site sources"))
                .hint("pick a dedicated directory, e.g. \"out\"");
        }
    }
}
