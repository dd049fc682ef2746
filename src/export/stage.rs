//! In-memory staging of an export.
//!
//! Everything the export will contain is collected first: rendered pages,
//! embedded assets, sitemap, `.nojekyll` and the list of public files to
//! copy. Only a complete stage is written, so a failing build never touches
//! the output directory.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::{fmt, fs};

use anyhow::{Context, Result, anyhow};
use jwalk::WalkDir;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::core::is_shutdown;
use crate::logger::ProgressLine;
use crate::log;

/// Marker telling GitHub Pages not to run Jekyll (which hides `_folio/`).
pub const NOJEKYLL: &str = ".nojekyll";

const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Where a staged file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Page(String),
    Embedded,
    Generated(&'static str),
    Public(PathBuf),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => f.write_str(page),
            Self::Embedded => f.write_str("embedded asset"),
            Self::Generated(name) => f.write_str(name),
            Self::Public(path) => write!(f, "public file `{}`", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Contents {
    Bytes(Vec<u8>),
    Copy(PathBuf),
}

#[derive(Debug, Clone)]
struct StagedFile {
    path: PathBuf,
    contents: Contents,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StageError {
    #[error("output file `{}` would be written by both the {first} and the {second}", .path.display())]
    Collision {
        path: PathBuf,
        first: Origin,
        second: Origin,
    },
}

/// Files counted by [`Stage::commit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub pages: usize,
    pub assets: usize,
}

/// A complete export, held in memory.
#[derive(Debug, Default)]
pub struct Stage {
    pages: Vec<StagedFile>,
    assets: Vec<StagedFile>,
    owners: FxHashMap<PathBuf, Origin>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a rendered page.
    pub fn page(&mut self, path: PathBuf, owner: String, html: String) -> Result<(), StageError> {
        self.claim(&path, Origin::Page(owner))?;
        self.pages.push(StagedFile {
            path,
            contents: Contents::Bytes(html.into_bytes()),
        });
        Ok(())
    }

    /// Stage generated or embedded bytes.
    pub fn bytes(&mut self, path: PathBuf, origin: Origin, bytes: Vec<u8>) -> Result<(), StageError> {
        self.claim(&path, origin)?;
        self.assets.push(StagedFile {
            path,
            contents: Contents::Bytes(bytes),
        });
        Ok(())
    }

    /// Stage every file below `dir` for copying, keeping relative paths.
    pub fn public_dir(&mut self, dir: &Path) -> Result<(), StageError> {
        if !dir.is_dir() {
            return Ok(());
        }
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                let name = e.file_name().to_str().unwrap_or_default();
                !IGNORED_FILES.contains(&name)
            })
            .map(|e| e.path())
            .collect();
        files.sort();

        for source in files {
            let Ok(relative) = source.strip_prefix(dir) else {
                continue;
            };
            let relative = relative.to_path_buf();
            self.claim(&relative, Origin::Public(relative.clone()))?;
            self.assets.push(StagedFile {
                path: relative,
                contents: Contents::Copy(source),
            });
        }
        Ok(())
    }

    fn claim(&mut self, path: &Path, origin: Origin) -> Result<(), StageError> {
        if let Some(first) = self.owners.get(path) {
            return Err(StageError::Collision {
                path: path.to_path_buf(),
                first: first.clone(),
                second: origin,
            });
        }
        self.owners.insert(path.to_path_buf(), origin);
        Ok(())
    }

    /// Does the stage contain `path` (relative to the output root)?
    #[cfg(test)]
    pub fn contains(&self, path: &Path) -> bool {
        self.owners.contains_key(path)
    }

    /// Write everything below `output`, in parallel.
    ///
    /// With `clean`, the previous output directory is removed first.
    pub fn commit(self, output: &Path, clean: bool) -> Result<Summary> {
        if clean && output.exists() {
            fs::remove_dir_all(output)
                .with_context(|| format!("failed to clean '{}'", output.display()))?;
        }

        let dirs: FxHashSet<PathBuf> = self
            .pages
            .iter()
            .chain(&self.assets)
            .filter_map(|file| file.path.parent())
            .map(|parent| output.join(parent))
            .collect();
        fs::create_dir_all(output)
            .with_context(|| format!("failed to create '{}'", output.display()))?;
        for dir in &dirs {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create '{}'", dir.display()))?;
        }

        let summary = Summary {
            pages: self.pages.len(),
            assets: self.assets.len(),
        };
        let progress = ProgressLine::new(&[("pages", summary.pages), ("assets", summary.assets)]);
        let has_error = AtomicBool::new(false);

        write_all(&self.pages, output, "pages", &progress, &has_error)?;
        write_all(&self.assets, output, "assets", &progress, &has_error)?;

        progress.finish();
        Ok(summary)
    }
}

fn write_all(
    files: &[StagedFile],
    output: &Path,
    counter: &str,
    progress: &ProgressLine,
    has_error: &AtomicBool,
) -> Result<()> {
    files.par_iter().try_for_each(|file| {
        if is_shutdown() || has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        let target = output.join(&file.path);
        let result = match &file.contents {
            Contents::Bytes(bytes) => fs::write(&target, bytes),
            Contents::Copy(source) => fs::copy(source, &target).map(|_| ()),
        };
        if let Err(e) = result {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {}", target.display(), e);
            }
            return Err(anyhow!("failed to write '{}'", target.display()));
        }
        progress.inc(counter);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_detected() {
        let mut stage = Stage::new();
        stage
            .page("index.html".into(), "home page".into(), "<html>".into())
            .unwrap();
        let err = stage
            .bytes("index.html".into(), Origin::Generated("sitemap"), vec![])
            .unwrap_err();
        assert_eq!(
            err,
            StageError::Collision {
                path: "index.html".into(),
                first: Origin::Page("home page".into()),
                second: Origin::Generated("sitemap"),
            }
        );
    }

    #[test]
    fn test_public_dir_collides_with_page() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("case-studies")).unwrap();
        fs::write(dir.path().join("case-studies/index.html"), "x").unwrap();

        let mut stage = Stage::new();
        stage
            .page(
                "case-studies/index.html".into(),
                "case study index".into(),
                String::new(),
            )
            .unwrap();
        let err = stage.public_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("case study index"));
    }

    #[test]
    fn test_commit_writes_and_copies() {
        let public = tempfile::tempdir().unwrap();
        fs::create_dir_all(public.path().join("image")).unwrap();
        fs::write(public.path().join("image/ME.jpg"), b"jpg").unwrap();
        fs::write(public.path().join(".DS_Store"), b"").unwrap();

        let mut stage = Stage::new();
        stage
            .page("case-studies/kd-trees/index.html".into(), "kd".into(), "<p>kd</p>".into())
            .unwrap();
        stage
            .bytes(NOJEKYLL.into(), Origin::Generated(NOJEKYLL), Vec::new())
            .unwrap();
        stage.public_dir(public.path()).unwrap();
        assert!(stage.contains(Path::new("image/ME.jpg")));
        assert!(!stage.contains(Path::new(".DS_Store")));

        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("out");
        let summary = stage.commit(&output, false).unwrap();
        assert_eq!(summary, Summary { pages: 1, assets: 2 });
        assert_eq!(
            fs::read_to_string(output.join("case-studies/kd-trees/index.html")).unwrap(),
            "<p>kd</p>"
        );
        assert_eq!(fs::read(output.join("image/ME.jpg")).unwrap(), b"jpg");
        assert!(output.join(NOJEKYLL).is_file());
    }

    #[test]
    fn test_commit_clean_removes_stale_files() {
        let out = tempfile::tempdir().unwrap();
        fs::write(out.path().join("stale.html"), "old").unwrap();

        let mut stage = Stage::new();
        stage.page("index.html".into(), "home".into(), "new".into()).unwrap();
        stage.commit(out.path(), true).unwrap();

        assert!(!out.path().join("stale.html").exists());
        assert!(out.path().join("index.html").exists());
    }
}
