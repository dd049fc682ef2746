//! Content registry.
//!
//! All site content lives in three TOML files plus markdown bodies:
//!
//! ```text
//! content/
//! ├── profile.toml        # about, education, contact, social, domain
//! ├── projects.toml       # [[project]] in display order
//! ├── case-studies.toml   # [intro] + [[case_study]] in display order
//! └── *.md                # bodies referenced from the files above
//! ```
//!
//! [`ContentRegistry::load`] reads everything once, checks every reference
//! (markdown bodies, slugs, local assets) and fails with the full list of
//! problems. After that the registry is read-only.

mod error;
#[cfg(test)]
pub(crate) mod fixture;
mod load;
mod markdown;
mod model;
mod record;

pub use error::{ContentError, ContentProblem};
pub use markdown::{Markdown, render_highlighted};
pub use model::{About, CaseStudyIntro, Contact, Education, SocialLink};
pub use record::{ContentRecord, Link, LinkRole};

use serde::Serialize;

pub const PROFILE_FILE: &str = "profile.toml";
pub const PROJECTS_FILE: &str = "projects.toml";
pub const CASE_STUDIES_FILE: &str = "case-studies.toml";

/// Owner profile shown on the home page and in the footer.
#[derive(Debug, Clone)]
pub struct Profile {
    pub about: About,
    pub education: Vec<Education>,
    pub contact: Contact,
    pub social: Vec<SocialLink>,
    pub domain: Option<Domain>,
}

/// Domain description section with its rendered-on-demand body.
#[derive(Debug, Clone)]
pub struct Domain {
    pub title: String,
    pub body: Markdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    /// Detail page route segment (`/{slug}/`), if the project has one.
    pub slug: Option<String>,
    pub record: ContentRecord,
    #[serde(skip)]
    pub body: Option<Markdown>,
}

impl Project {
    pub fn has_page(&self) -> bool {
        self.body.is_some()
    }
}

/// A code listing attached to a case study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeListing {
    /// File name shown in the list.
    pub name: String,
    /// Root-relative URL in the assets directory.
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseStudy {
    pub slug: String,
    pub record: ContentRecord,
    #[serde(skip)]
    pub body: Markdown,
    pub references: Vec<String>,
    pub code: Vec<CodeListing>,
    pub hidden: bool,
}

/// The deduplicated, immutable set of everything the site displays.
#[derive(Debug, Clone)]
pub struct ContentRegistry {
    pub profile: Profile,
    pub projects: Vec<Project>,
    pub intro: CaseStudyIntro,
    case_studies: Vec<CaseStudy>,
}

impl ContentRegistry {
    /// Published case studies in display order.
    pub fn case_studies(&self) -> impl Iterator<Item = &CaseStudy> {
        self.case_studies.iter().filter(|c| !c.hidden)
    }

    /// Number of case studies left out of the build.
    pub fn hidden_count(&self) -> usize {
        self.case_studies.iter().filter(|c| c.hidden).count()
    }

    pub fn case_study(&self, slug: &str) -> Option<&CaseStudy> {
        self.case_studies().find(|c| c.slug == slug)
    }

    /// Projects that have a detail page.
    pub fn project_pages(&self) -> impl Iterator<Item = (&str, &Project)> {
        self.projects
            .iter()
            .filter_map(|p| Some((p.slug.as_deref()?, p)).filter(|_| p.has_page()))
    }

    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.project_pages().find(|(s, _)| *s == slug).map(|(_, p)| p)
    }
}
