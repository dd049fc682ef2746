//! `folio build`: render, stage and export the site.
//!
//! Pipeline: load content -> route table -> render (parallel) -> stage in
//! memory -> commit to `build.output`. See [`crate::export`].

use anyhow::Result;

use crate::config::SiteConfig;
use crate::export::{Summary, build_site};
use crate::log;

/// Build the site into `build.output`.
pub fn build(config: &SiteConfig) -> Result<Summary> {
    if !config.base_path().is_root() {
        log!("build"; "base path {}", config.base_path());
    }
    build_site(config)
}
