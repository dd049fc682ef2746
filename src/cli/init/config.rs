//! Configuration and ignore files for new sites.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::embed::init::{CONFIG_TOML, TitleVars};

/// Default config filename
pub const CONFIG_FILE: &str = "folio.toml";

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore"];

/// Render folio.toml for a site called `title`.
pub fn generate_config(title: &str) -> String {
    let mut out = format!(
        "# generated by folio v{}\n",
        env!("CARGO_PKG_VERSION")
    );
    out.push_str(&CONFIG_TOML.render(&TitleVars {
        title: escape_toml(title),
    }));
    out
}

/// Write folio.toml into `root`.
pub fn write_config(root: &Path, title: &str) -> Result<()> {
    let path = root.join(CONFIG_FILE);
    fs::write(&path, generate_config(title))
        .with_context(|| format!("failed to write config file '{}'", path.display()))?;
    Ok(())
}

/// Write .gitignore with the output directory and OS clutter.
///
/// Existing ignore files are left alone.
pub fn write_ignore_files(root: &Path, output_dir: &Path) -> Result<()> {
    let output_pattern = Path::new("/").join(output_dir);
    let patterns = [
        format!("{}/", output_pattern.to_string_lossy().trim_end_matches('/')),
        ".DS_Store".to_string(),
    ];
    let content = patterns.join("\n") + "\n";

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}

/// Quote-safe value for a basic TOML string.
pub(super) fn escape_toml(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
