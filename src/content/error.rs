//! Content loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal content errors. Any of these aborts the build before output is written.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("{}", format_problems(.0))]
    Invalid(Vec<ContentProblem>),
}

/// A broken reference found while loading content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentProblem {
    #[error("{owner}: markdown body `{}` not found", .path.display())]
    MissingBody { owner: String, path: PathBuf },

    #[error("{owner}: asset `{url}` not found under the assets directory")]
    MissingAsset { owner: String, url: String },

    #[error("{owner}: slug `{slug}` may only contain letters, digits, `-` and `_`")]
    InvalidSlug { owner: String, slug: String },

    #[error("{owner}: has a detail page but no slug")]
    MissingSlug { owner: String },

    #[error("{kind} slug `{slug}` is used more than once")]
    DuplicateSlug { kind: &'static str, slug: String },

    #[error("{owner}: `{field}` is empty")]
    EmptyField { owner: String, field: &'static str },
}

fn format_problems(problems: &[ContentProblem]) -> String {
    let mut out = format!(
        "content has {}:",
        crate::utils::plural_count(problems.len(), "problem")
    );
    for problem in problems {
        out.push_str("\n- ");
        out.push_str(&problem.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_lists_every_problem() {
        let err = ContentError::Invalid(vec![
            ContentProblem::MissingAsset {
                owner: "project 'CEVI'".into(),
                url: "/projects/CEVI.jpg".into(),
            },
            ContentProblem::DuplicateSlug {
                kind: "case study",
                slug: "kd-trees".into(),
            },
        ]);
        let display = err.to_string();
        assert!(display.starts_with("content has 2 problems:"));
        assert!(display.contains("/projects/CEVI.jpg"));
        assert!(display.contains("`kd-trees` is used more than once"));
    }
}
