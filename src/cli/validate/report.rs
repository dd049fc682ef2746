//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_count;

/// What a broken reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Pages,
    Assets,
    Anchors,
}

impl Section {
    const ALL: [Self; 3] = [Self::Pages, Self::Assets, Self::Anchors];

    fn name(self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Assets => "assets",
            Self::Anchors => "anchors",
        }
    }
}

/// A single validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The link/path that failed.
    pub target: String,
    /// Error reason/message.
    pub reason: String,
}

/// Broken references grouped by section, then by the page they appear on.
#[derive(Debug, Default)]
pub struct ValidationReport {
    sections: BTreeMap<Section, BTreeMap<String, Vec<ValidationError>>>,
}

impl ValidationReport {
    pub fn add(&mut self, section: Section, source: &str, target: &str, reason: impl Into<String>) {
        let errors = self
            .sections
            .entry(section)
            .or_default()
            .entry(source.to_string())
            .or_default();
        let error = ValidationError {
            target: target.to_string(),
            reason: reason.into(),
        };
        // Nav links repeat on every page, report each once per page
        if !errors.contains(&error) {
            errors.push(error);
        }
    }

    pub fn errors(&self, section: Section) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.sections.get(&section).into_iter().flat_map(|pages| {
            pages
                .iter()
                .flat_map(|(source, errs)| errs.iter().map(move |e| (source.as_str(), e)))
        })
    }

    pub fn error_count(&self, section: Section) -> usize {
        self.errors(section).count()
    }

    pub fn total(&self) -> usize {
        Section::ALL.iter().map(|s| self.error_count(*s)).sum()
    }

    /// Pages with at least one error.
    pub fn page_count(&self) -> usize {
        let mut sources: Vec<&str> = self
            .sections
            .values()
            .flat_map(|pages| pages.keys().map(String::as_str))
            .collect();
        sources.sort_unstable();
        sources.dedup();
        sources.len()
    }

    /// Print the full report to stderr (pages -> assets -> anchors).
    pub fn print(&self) {
        for section in Section::ALL {
            if let Some(errors) = self.sections.get(&section) {
                Self::print_section(section.name(), errors);
            }
        }
    }

    fn print_section(name: &str, errors: &BTreeMap<String, Vec<ValidationError>>) {
        if errors.is_empty() {
            return;
        }
        eprintln!();

        let page_count = errors.len();
        let error_count: usize = errors.values().map(Vec::len).sum();

        eprintln!(
            "{} {}",
            name.red().bold(),
            format!(
                "({}, {})",
                plural_count(page_count, "page"),
                plural_count(error_count, "error")
            )
            .dimmed()
        );

        for (path, errs) in errors {
            eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
            for e in errs {
                if e.reason.is_empty() {
                    eprintln!("{} {}", "→".red(), e.target);
                } else {
                    eprintln!("{} {} {}", "→".red(), e.target, e.reason.dimmed());
                }
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        if total == 0 {
            write!(f, "{}", "all checks passed".green())
        } else {
            let errors = plural_count(total, "error");
            let pages = plural_count(self.page_count(), "page");
            write!(f, "{} {} {}", "found".dimmed(), errors.red().bold(), format!("on {pages}").dimmed())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapsed_per_page() {
        let mut report = ValidationReport::default();
        report.add(Section::Anchors, "/", "#contact", "no element with this id");
        report.add(Section::Anchors, "/", "#contact", "no element with this id");
        report.add(Section::Anchors, "/case-studies/", "/#contact", "");
        report.add(Section::Assets, "/", "/cv.pdf", "not found");

        assert_eq!(report.error_count(Section::Anchors), 2);
        assert_eq!(report.error_count(Section::Pages), 0);
        assert_eq!(report.total(), 3);
        assert_eq!(report.page_count(), 2);
    }

    #[test]
    fn test_display() {
        let mut report = ValidationReport::default();
        assert!(report.to_string().contains("all checks passed"));
        report.add(Section::Pages, "/", "/nope/", "no such page");
        let text = report.to_string();
        assert!(text.contains("1 error"));
        assert!(text.contains("on 1 page"));
    }
}
