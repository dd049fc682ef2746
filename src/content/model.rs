//! On-disk shapes of the content files.
//!
//! ```text
//! content/profile.toml       [about] [[education]] [contact] [[social]] [domain]
//! content/projects.toml      [[project]]
//! content/case-studies.toml  [intro] [[case_study]]
//! ```
//!
//! Unknown keys are rejected so a typo never silently drops a section.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// profile.toml
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileFile {
    pub about: About,
    #[serde(default)]
    pub education: Vec<Education>,
    pub contact: Contact,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    pub domain: Option<DomainSection>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct About {
    pub name: String,
    pub location: Option<String>,
    /// Markdown paragraphs.
    #[serde(default)]
    pub paragraphs: Vec<String>,
    /// Phrases wrapped in `<mark data-highlight>` wherever they appear.
    #[serde(default)]
    pub highlights: Vec<String>,
    /// Profile picture, root-relative.
    pub portrait: Option<String>,
    pub github: Option<String>,
    /// Downloadable CV, root-relative.
    pub resume: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Contact {
    #[serde(default = "Contact::default_heading")]
    pub heading: String,
    #[serde(default)]
    pub message: String,
    pub email: String,
}

impl Contact {
    fn default_heading() -> String {
        "Get in Touch".into()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DomainSection {
    #[serde(default = "DomainSection::default_title")]
    pub title: String,
    /// Markdown file, relative to the content directory.
    pub body: PathBuf,
}

impl DomainSection {
    fn default_title() -> String {
        "Domain Description".into()
    }
}

// ============================================================================
// projects.toml
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectsFile {
    #[serde(default, rename = "project")]
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectEntry {
    /// Route segment of the detail page. Required when `body` is set.
    pub slug: Option<String>,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    /// Report or paper, root-relative download.
    pub paper: Option<String>,
    /// Source repository URL.
    pub repo: Option<String>,
    /// Markdown detail page, relative to the content directory.
    pub body: Option<PathBuf>,
}

// ============================================================================
// case-studies.toml
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CaseStudiesFile {
    pub intro: CaseStudyIntro,
    #[serde(default, rename = "case_study")]
    pub case_studies: Vec<CaseStudyEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CaseStudyIntro {
    pub title: String,
    /// Banner background image, root-relative.
    pub banner: Option<String>,
    /// Attribution shown in the banner corner.
    pub banner_credit: Option<String>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CaseStudyEntry {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: PathBuf,
    pub github: Option<String>,
    pub paper: Option<String>,
    #[serde(default)]
    pub references: Vec<String>,
    /// Code listings, root-relative downloads.
    #[serde(default)]
    pub code: Vec<String>,
    /// Kept in the file but not published.
    #[serde(default)]
    pub hidden: bool,
}
