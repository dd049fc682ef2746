//! Slugification for heading ids and route segments.

use deunicode::deunicode;

/// Turn arbitrary text into a lowercase ASCII slug.
///
/// Non-alphanumeric runs collapse into a single `-`; leading and trailing
/// separators are dropped.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Check that a string is already a valid route slug.
///
/// Valid slugs are non-empty and made of `[A-Za-z0-9_-]`, so they never
/// contain `/`, `.` or whitespace.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}
