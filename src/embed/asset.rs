//! Embedded assets written under a content-hashed filename.
//!
//! ```text
//! style.css + vars ──render──► (minify) ──► _folio/style-<hash>.css
//! ```

use std::path::PathBuf;

use super::minify::{minify_css, minify_js};
use super::template::{Template, TemplateVars};
use crate::utils::hash::fingerprint;

/// Output directory of embedded assets, relative to the site root.
pub const ASSET_DIR: &str = "_folio";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Css,
    JavaScript,
}

impl AssetKind {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::JavaScript => "js",
        }
    }

    fn minify(self, source: &str) -> Option<String> {
        match self {
            Self::Css => minify_css(source),
            Self::JavaScript => minify_js(source),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAsset<V> {
    kind: AssetKind,
    name: &'static str,
    template: Template<V>,
}

impl<V: TemplateVars> EmbeddedAsset<V> {
    pub const fn new(kind: AssetKind, name: &'static str, content: &'static str) -> Self {
        Self {
            kind,
            name,
            template: Template::new(content),
        }
    }

    pub fn render(&self, vars: &V) -> String {
        self.template.render(vars)
    }

    /// Render, optionally minify, and name the result after its content.
    pub fn build(&self, vars: &V, minify: bool) -> BuiltAsset {
        let rendered = self.render(vars);
        let content = if minify {
            self.kind.minify(&rendered).unwrap_or_else(|| {
                crate::debug!("embed"; "minify failed for {}, keeping source", self.name);
                rendered
            })
        } else {
            rendered
        };
        let filename = format!(
            "{}-{}.{}",
            self.name,
            fingerprint(&content),
            self.kind.extension()
        );
        BuiltAsset {
            kind: self.kind,
            filename,
            content,
        }
    }
}

/// A rendered embedded asset ready to be served or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltAsset {
    pub kind: AssetKind,
    pub filename: String,
    pub content: String,
}

impl BuiltAsset {
    /// Root-relative URL, before the base path is applied.
    pub fn url(&self) -> String {
        format!("/{ASSET_DIR}/{}", self.filename)
    }

    /// Path below the output directory.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(ASSET_DIR).join(&self.filename)
    }
}
