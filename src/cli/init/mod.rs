//! Site initialization module.
//!
//! Creates a new site with a sample profile, one project page and two
//! case studies (one hidden), ready for `folio build`.
//!
//! # Module Structure
//!
//! - [`target`]: Refuse to overwrite existing files
//! - [`structure`]: Directories and sample content
//! - [`config`]: Configuration and ignore files

mod config;
mod structure;
mod target;

use crate::{config::SiteConfig, log};
use anyhow::Result;
use std::path::Path;

use target::InitMode;

const DEFAULT_TITLE: &str = "My Portfolio";

/// Create a new site with default structure
///
/// # Steps
/// 1. Validate target directory
/// 2. Create directory structure
/// 3. Write configuration and ignore files
/// 4. Write sample content
///
/// If `dry_run` is true, prints the config and lists the files instead.
pub fn new_site(site_config: &SiteConfig, has_name: bool, dry_run: bool) -> Result<()> {
    let root = site_config.get_root();
    let title = site_title(root);

    if dry_run {
        print!("{}", config::generate_config(&title));
        let content = site_config.root_relative(&site_config.build.content);
        for name in structure::content_files() {
            log!("init"; "would write {}", content.join(name).display());
        }
        return Ok(());
    }

    InitMode::from_name(has_name).check(root)?;

    structure::create_structure(root)?;
    config::write_config(root, &title)?;
    let output_dir = site_config.root_relative(&site_config.build.output);
    config::write_ignore_files(root, &output_dir)?;
    structure::write_content(&site_config.build.content, &title)?;

    log!("init"; "site '{}' initialized in {}", title, root.display());
    Ok(())
}

/// Site title taken from the directory name.
fn site_title(root: &Path) -> String {
    root.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map_or_else(|| DEFAULT_TITLE.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::content::ContentRegistry;
    use crate::export::build_site;
    use tempfile::TempDir;

    fn config_at(root: &Path) -> SiteConfig {
        let mut config = test_parse_config("");
        config.root = root.to_path_buf();
        config.build.content = root.join("content");
        config.build.assets = root.join("public");
        config.build.output = root.join("out");
        config
    }

    #[test]
    fn test_new_site_loads_and_builds() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("jane");
        let config = config_at(&root);

        new_site(&config, true, false).unwrap();
        assert!(root.join(config::CONFIG_FILE).is_file());
        assert!(root.join(".gitignore").is_file());

        let registry = ContentRegistry::load(&config.build.content, &config.build.assets).unwrap();
        assert_eq!(registry.profile.about.name, "jane");
        assert_eq!(registry.case_studies().count(), 1);
        assert_eq!(registry.hidden_count(), 1);

        build_site(&config).unwrap();
        assert!(root.join("out/case-studies/kd-trees/index.html").is_file());
        assert!(!root.join("out/case-studies/draft").exists());
    }

    #[test]
    fn test_new_site_refuses_existing_dir() {
        let temp = TempDir::new().unwrap();
        let config = config_at(temp.path());
        assert!(new_site(&config, true, false).is_err());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("jane");
        new_site(&config_at(&root), true, true).unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn test_site_title() {
        assert_eq!(site_title(Path::new("/home/jane/portfolio")), "portfolio");
        assert_eq!(site_title(Path::new("/")), DEFAULT_TITLE);
    }
}
