//! Loading and reference checking.

use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use rustc_hash::FxHashSet;
use serde::de::DeserializeOwned;

use super::model::{CaseStudiesFile, CaseStudyEntry, ProfileFile, ProjectEntry, ProjectsFile};
use super::{
    CASE_STUDIES_FILE, CaseStudy, CodeListing, ContentError, ContentProblem, ContentRecord,
    ContentRegistry, Domain, Link, Markdown, PROFILE_FILE, PROJECTS_FILE, Profile, Project,
};
use crate::utils::path::fs::url_to_fs_path;
use crate::utils::path::route::{is_external_link, split_path_fragment, strip_query};
use crate::utils::path::slug::is_valid_slug;

impl ContentRegistry {
    /// Load and check all content below `content_dir`.
    ///
    /// Local assets are resolved against `assets_dir`.
    pub fn load(content_dir: &Path, assets_dir: &Path) -> Result<Self, ContentError> {
        let profile: ProfileFile = read_toml(&content_dir.join(PROFILE_FILE))?;
        let projects: ProjectsFile = read_toml(&content_dir.join(PROJECTS_FILE))?;
        let studies: CaseStudiesFile = read_toml(&content_dir.join(CASE_STUDIES_FILE))?;

        let mut loader = Loader {
            content_dir,
            assets_dir,
            problems: Vec::new(),
        };

        let profile = loader.profile(profile);
        let projects = loader.projects(projects.projects);
        loader.intro(&studies.intro);
        let case_studies = loader.case_studies(studies.case_studies);

        if !loader.problems.is_empty() {
            return Err(ContentError::Invalid(loader.problems));
        }

        crate::debug!(
            "content";
            "loaded {}, {} case studies ({} hidden)",
            crate::utils::plural_count(projects.len(), "project"),
            case_studies.len(),
            case_studies.iter().filter(|c| c.hidden).count()
        );

        Ok(Self {
            profile,
            projects,
            intro: studies.intro,
            case_studies,
        })
    }
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let text = fs::read_to_string(path).map_err(|e| ContentError::Io(path.to_path_buf(), e))?;
    toml::from_str(&text).map_err(|e| ContentError::Toml(path.to_path_buf(), e))
}

/// Paper, CV and similar: a download when local, external otherwise.
fn file_link(label: &str, url: &str) -> Link {
    if is_external_link(url) || url.starts_with("//") {
        Link::external(label, url)
    } else {
        Link::download(label, url)
    }
}

/// Last path segment of a URL, decoded.
fn file_name(url: &str) -> String {
    let path = strip_query(split_path_fragment(url).0);
    let last = path.rsplit('/').next().unwrap_or(path);
    percent_decode_str(last).decode_utf8_lossy().into_owned()
}

/// Whether a root-relative markdown destination names a file rather than a page.
fn is_file_url(url: &str) -> bool {
    let path = strip_query(split_path_fragment(url).0);
    path.rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext != "html")
}

struct Loader<'a> {
    content_dir: &'a Path,
    assets_dir: &'a Path,
    problems: Vec<ContentProblem>,
}

impl Loader<'_> {
    fn profile(&mut self, file: ProfileFile) -> Profile {
        let owner = "profile";
        self.non_empty(owner, "about.name", &file.about.name);
        self.non_empty(owner, "contact.email", &file.contact.email);
        for url in file.about.portrait.iter().chain(file.about.resume.iter()) {
            self.asset(owner, url);
        }
        for entry in &file.education {
            self.non_empty(owner, "education.degree", &entry.degree);
        }

        let domain = file.domain.and_then(|d| {
            let body = self.body("domain description", &d.body)?;
            Some(Domain {
                title: d.title,
                body,
            })
        });

        Profile {
            about: file.about,
            education: file.education,
            contact: file.contact,
            social: file.social,
            domain,
        }
    }

    fn projects(&mut self, entries: Vec<ProjectEntry>) -> Vec<Project> {
        let mut seen = FxHashSet::default();
        entries
            .into_iter()
            .map(|entry| {
                let owner = format!("project '{}'", entry.title);
                self.non_empty(&owner, "title", &entry.title);

                if let Some(slug) = &entry.slug {
                    self.slug(&owner, slug);
                    if !seen.insert(slug.clone()) {
                        self.problems.push(ContentProblem::DuplicateSlug {
                            kind: "project",
                            slug: slug.clone(),
                        });
                    }
                } else if entry.body.is_some() {
                    self.problems.push(ContentProblem::MissingSlug {
                        owner: owner.clone(),
                    });
                }

                let body = entry.body.as_ref().and_then(|p| self.body(&owner, p));
                let page_link = entry
                    .slug
                    .as_ref()
                    .filter(|_| body.is_some())
                    .map(|slug| Link::internal("Details", format!("/{slug}/")));

                let record = ContentRecord::new(&entry.title, &entry.description)
                    .with_media(entry.image.clone())
                    .with_link(entry.paper.as_deref().map(|u| file_link("View Paper", u)))
                    .with_link(entry.repo.as_deref().map(|u| Link::external("View Code", u)))
                    .with_link(page_link);
                self.record_assets(&owner, &record);

                Project {
                    slug: entry.slug,
                    record,
                    body,
                }
            })
            .collect()
    }

    fn intro(&mut self, intro: &super::CaseStudyIntro) {
        let owner = "case study intro";
        self.non_empty(owner, "title", &intro.title);
        if let Some(banner) = &intro.banner {
            self.asset(owner, banner);
        }
    }

    fn case_studies(&mut self, entries: Vec<CaseStudyEntry>) -> Vec<CaseStudy> {
        let mut seen = FxHashSet::default();
        entries
            .into_iter()
            .filter_map(|entry| {
                let owner = format!("case study '{}'", entry.slug);
                self.slug(&owner, &entry.slug);
                self.non_empty(&owner, "title", &entry.title);
                if !seen.insert(entry.slug.clone()) {
                    self.problems.push(ContentProblem::DuplicateSlug {
                        kind: "case study",
                        slug: entry.slug.clone(),
                    });
                }

                let record = ContentRecord::new(&entry.title, &entry.description)
                    .with_link(entry.github.as_deref().map(|u| Link::external("View on GitHub", u)))
                    .with_link(entry.paper.as_deref().map(|u| file_link("View Paper", u)));

                let code: Vec<CodeListing> = entry
                    .code
                    .iter()
                    .map(|url| CodeListing {
                        name: file_name(url),
                        url: url.clone(),
                    })
                    .collect();

                // Hidden entries are parsed but never published or checked.
                if !entry.hidden {
                    self.record_assets(&owner, &record);
                    for listing in &code {
                        self.asset(&owner, &listing.url);
                    }
                }

                let body = if entry.hidden {
                    Markdown::new(&entry.body, String::new())
                } else {
                    self.body(&owner, &entry.body)?
                };

                Some(CaseStudy {
                    slug: entry.slug,
                    record,
                    body,
                    references: entry.references,
                    code,
                    hidden: entry.hidden,
                })
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // checks
    // ------------------------------------------------------------------------

    /// Read a markdown body and check the files it references.
    fn body(&mut self, owner: &str, rel: &Path) -> Option<Markdown> {
        let path: PathBuf = self.content_dir.join(rel);
        let Ok(source) = fs::read_to_string(&path) else {
            self.problems.push(ContentProblem::MissingBody {
                owner: owner.to_string(),
                path: rel.to_path_buf(),
            });
            return None;
        };

        let body = Markdown::new(rel, source);
        for url in body.site_refs() {
            if is_file_url(&url) {
                self.asset(owner, &url);
            }
        }
        Some(body)
    }

    fn record_assets(&mut self, owner: &str, record: &ContentRecord) {
        for url in record.local_assets() {
            self.asset(owner, url);
        }
    }

    /// Check that a root-relative asset URL exists. Other URLs are ignored.
    fn asset(&mut self, owner: &str, url: &str) {
        if !url.starts_with('/') || url.starts_with("//") {
            return;
        }
        let path = strip_query(split_path_fragment(url).0);
        let decoded = percent_decode_str(path).decode_utf8_lossy();
        let exists = url_to_fs_path(self.assets_dir, &decoded).is_some_and(|p| p.is_file());
        if !exists {
            self.problems.push(ContentProblem::MissingAsset {
                owner: owner.to_string(),
                url: url.to_string(),
            });
        }
    }

    fn slug(&mut self, owner: &str, slug: &str) {
        if !is_valid_slug(slug) {
            self.problems.push(ContentProblem::InvalidSlug {
                owner: owner.to_string(),
                slug: slug.to_string(),
            });
        }
    }

    fn non_empty(&mut self, owner: &str, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.problems.push(ContentProblem::EmptyField {
                owner: owner.to_string(),
                field,
            });
        }
    }
}
