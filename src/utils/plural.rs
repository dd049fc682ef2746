//! Counted nouns for log messages.

/// `3 pages`, `1 case study`, `2 case studies`.
pub fn plural_count(count: usize, noun: &str) -> String {
    if count == 1 {
        return format!("1 {noun}");
    }
    match noun.strip_suffix('y') {
        Some(stem) if !stem.ends_with(['a', 'e', 'o', 'u']) => format!("{count} {stem}ies"),
        _ => format!("{count} {noun}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "page"), "0 pages");
        assert_eq!(plural_count(1, "page"), "1 page");
        assert_eq!(plural_count(12, "asset"), "12 assets");
        assert_eq!(plural_count(2, "case study"), "2 case studies");
        assert_eq!(plural_count(1, "case study"), "1 case study");
        assert_eq!(plural_count(4, "key"), "4 keys");
    }
}
