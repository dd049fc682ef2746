//! Site directory structure and sample content.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::content::PROFILE_FILE;
use crate::embed::NoVars;
use crate::embed::init::{CONTENT, PROFILE_TOML, TitleVars};

/// Directories below the project root (`build.content`, `build.assets`).
const SITE_DIRS: &[&str] = &["content", "public/image", "public/projects", "public/codes"];

/// Create the directory layout at `root`, creating `root` if needed.
pub fn create_structure(root: &Path) -> Result<()> {
    if !root.exists() {
        fs::create_dir_all(root)
            .with_context(|| format!("failed to create root directory '{}'", root.display()))?;
    }

    for dir in SITE_DIRS {
        let path = root.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("failed to create directory '{}'", path.display()))?;
    }

    Ok(())
}

/// Write the sample profile, projects and case studies into `content_dir`.
pub fn write_content(content_dir: &Path, title: &str) -> Result<()> {
    let profile = content_dir.join(PROFILE_FILE);
    let vars = TitleVars {
        title: super::config::escape_toml(title),
    };
    fs::write(&profile, PROFILE_TOML.render(&vars))
        .with_context(|| format!("failed to write '{}'", profile.display()))?;

    for (name, template) in CONTENT {
        let path = content_dir.join(name);
        fs::write(&path, template.render(&NoVars))
            .with_context(|| format!("failed to write '{}'", path.display()))?;
    }
    Ok(())
}

/// Every file `write_content` creates, relative to the content directory.
pub fn content_files() -> impl Iterator<Item = &'static str> {
    std::iter::once(PROFILE_FILE).chain(CONTENT.iter().map(|(name, _)| *name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_structure() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my_site");

        create_structure(&root).unwrap();

        assert!(root.join("content").is_dir());
        assert!(root.join("public/image").is_dir());
    }

    #[test]
    fn test_write_content() {
        let temp = TempDir::new().unwrap();
        write_content(temp.path(), "Jane Doe").unwrap();

        for name in content_files() {
            assert!(temp.path().join(name).is_file(), "missing {name}");
        }
        let profile = fs::read_to_string(temp.path().join(PROFILE_FILE)).unwrap();
        assert!(profile.contains("name = \"Jane Doe\""));
    }
}
