//! Content types for files served by the preview server.

use std::path::Path;

pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const JAVASCRIPT: &str = "text/javascript; charset=utf-8";
    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Extensions a portfolio usually ships: pages, the bundle, images,
/// documents and the source files linked from project pages.
const BY_EXTENSION: &[(&[&str], &str)] = &[
    (&["html", "htm"], types::HTML),
    (&["css"], types::CSS),
    (&["js", "mjs"], types::JAVASCRIPT),
    (&["txt", "py", "c", "h", "rs", "swift"], types::PLAIN),
    (&["md"], "text/markdown; charset=utf-8"),
    (&["json"], "application/json"),
    (&["xml"], "application/xml"),
    (&["pdf"], "application/pdf"),
    (&["zip"], "application/zip"),
    (&["jpg", "jpeg"], "image/jpeg"),
    (&["png"], "image/png"),
    (&["gif"], "image/gif"),
    (&["webp"], "image/webp"),
    (&["svg"], "image/svg+xml"),
    (&["ico"], "image/x-icon"),
    (&["mp4", "m4v"], "video/mp4"),
    (&["woff2"], "font/woff2"),
];

/// Content type for `path`, by case-insensitive extension.
pub fn from_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return types::OCTET_STREAM;
    };
    BY_EXTENSION
        .iter()
        .find(|(exts, _)| exts.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .map_or(types::OCTET_STREAM, |(_, mime)| *mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(from_path(Path::new("index.html")), types::HTML);
        assert_eq!(from_path(Path::new("_folio/nav-3f2a.js")), types::JAVASCRIPT);
        assert_eq!(from_path(Path::new("image/ME.JPG")), "image/jpeg");
        assert_eq!(from_path(Path::new("Enhanced Optical Flow.pdf")), "application/pdf");
        assert_eq!(from_path(Path::new("codes/trie.py")), types::PLAIN);
        assert_eq!(from_path(Path::new("blob.xyz")), types::OCTET_STREAM);
        assert_eq!(from_path(Path::new("LICENSE")), types::OCTET_STREAM);
    }
}
