//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

/// Decode a request URL into a site path.
pub fn request_path(url: &str) -> String {
    crate::utils::path::route::decode_path(url)
}

/// Resolve a site path to a file under `serve_root`, handling `index.html`
/// for directories.
pub fn resolve_path(path: &str, serve_root: &Path) -> Option<PathBuf> {
    let local = crate::utils::path::fs::url_to_fs_path(serve_root, path)?;

    // Canonicalize to resolve symlinks and verify path is under serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}
