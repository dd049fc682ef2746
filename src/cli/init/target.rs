//! Where `folio init` may write.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// How the target directory was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    /// `folio init`: the current directory, which may only hold dotfiles
    /// such as `.git`.
    CurrentDir,
    /// `folio init <name>`: a directory that does not exist yet.
    NewDir,
}

impl InitMode {
    pub fn from_name(has_name: bool) -> Self {
        if has_name { Self::NewDir } else { Self::CurrentDir }
    }

    /// Refuse to initialize over existing files.
    pub fn check(self, root: &Path) -> Result<()> {
        match self {
            Self::NewDir if root.exists() => bail!(
                "'{}' already exists, pick another name or remove it first",
                root.display()
            ),
            Self::CurrentDir => {
                if let Some(name) = first_visible_entry(root)? {
                    bail!(
                        "current directory is not empty (found '{name}'), \
                         use `folio init <name>` to create a new one"
                    );
                }
                Ok(())
            }
            Self::NewDir => Ok(()),
        }
    }
}

fn first_visible_entry(dir: &Path) -> Result<Option<String>> {
    if !dir.exists() {
        return Ok(None);
    }
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read '{}'", dir.display()))?;
    Ok(entries
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .find(|name| !name.starts_with('.')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_current_dir_allows_dotfiles() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        assert!(InitMode::CurrentDir.check(temp.path()).is_ok());

        fs::write(temp.path().join("folio.toml"), "").unwrap();
        let err = InitMode::CurrentDir.check(temp.path()).unwrap_err();
        assert!(err.to_string().contains("folio.toml"));
    }

    #[test]
    fn test_new_dir_must_not_exist() {
        let temp = TempDir::new().unwrap();
        assert!(InitMode::NewDir.check(temp.path()).is_err());
        assert!(InitMode::NewDir.check(&temp.path().join("portfolio")).is_ok());
    }

    #[test]
    fn test_mode_from_name() {
        assert_eq!(InitMode::from_name(true), InitMode::NewDir);
        assert_eq!(InitMode::from_name(false), InitMode::CurrentDir);
    }
}
