//! URL string helpers.

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
///
/// A valid scheme has at least one character before the colon and only
/// contains ASCII alphanumerics or `+`, `-`, `.`.
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Split a URL into path and fragment parts.
///
/// `"/about#team"` -> `("/about", "team")`, `"/about"` -> `("/about", "")`
#[inline]
pub fn split_path_fragment(url: &str) -> (&str, &str) {
    url.split_once('#').unwrap_or((url, ""))
}

/// Drop a trailing `?query` from a path.
#[inline]
pub fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

/// Site path of a URL: percent-decoded, query and fragment removed,
/// always starting with `/`.
pub fn decode_path(url: &str) -> String {
    let path = strip_query(url);
    let (path, _) = split_path_fragment(path);
    let decoded = percent_encoding::percent_decode_str(path)
        .decode_utf8()
        .map_or_else(|_| path.to_string(), std::borrow::Cow::into_owned);
    if decoded.starts_with('/') {
        decoded
    } else {
        format!("/{decoded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_external_link() {
        assert!(is_external_link("https://example.com"));
        assert!(is_external_link("mailto:someone@example.com"));
        assert!(is_external_link("tel:+1234567890"));
        assert!(!is_external_link("/about"));
        assert!(!is_external_link("./file.txt"));
        assert!(!is_external_link("#section"));
        assert!(!is_external_link(":nothing"));
    }

    #[test]
    fn test_split_path_fragment() {
        assert_eq!(split_path_fragment("/about#team"), ("/about", "team"));
        assert_eq!(split_path_fragment("/about"), ("/about", ""));
        assert_eq!(split_path_fragment("#section"), ("", "section"));
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(
            decode_path("/Enhanced%20Optical%20Flow.pdf?dl=1#page=2"),
            "/Enhanced Optical Flow.pdf"
        );
        assert_eq!(decode_path("case-studies/"), "/case-studies/");
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("/image/a.png?w=200"), "/image/a.png");
        assert_eq!(strip_query("/image/a.png"), "/image/a.png");
    }
}
