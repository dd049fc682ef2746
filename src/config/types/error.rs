//! Configuration errors and diagnostics.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Validation(String),

    // Not a #[source]: the report would print twice
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// One problem with one field.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Attach a suggestion shown under the message.
    pub fn hint(&mut self, hint: impl Into<String>) -> &mut Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {hint}", "hint:".yellow())?;
        }
        Ok(())
    }
}

/// Errors and warnings collected over a whole validation pass, so that
/// every problem is reported at once.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) -> &mut Diagnostic {
        push(&mut self.errors, field, message.into())
    }

    /// Record a problem that does not stop the build.
    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) -> &mut Diagnostic {
        push(&mut self.warnings, field, message.into())
    }

    pub fn print_warnings(&self) {
        for warning in &self.warnings {
            crate::log!("warning"; "{warning}");
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[cfg(test)]
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    #[cfg(test)]
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn push(list: &mut Vec<Diagnostic>, field: FieldPath, message: String) -> &mut Diagnostic {
    list.push(Diagnostic {
        field,
        message,
        hint: None,
    });
    let last = list.len() - 1;
    &mut list[last]
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "invalid config".red().bold())?;
        for error in &self.errors {
            write!(f, "\n\n{} {error}", "→".red())?;
        }
        if self.errors.len() > 1 {
            write!(f, "\n\n{} errors", self.errors.len().to_string().red().bold())?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("folio.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        assert_eq!(io_err.to_string(), "failed to read `folio.toml`");

        let err = ConfigError::Validation("content directory missing".to_string());
        assert!(err.to_string().contains("content directory missing"));
    }

    #[test]
    fn test_diagnostics_collects_all_errors() {
        let mut diag = ConfigDiagnostics::new();
        diag.error(FieldPath::new("build.base_path"), "bad prefix");
        diag.error(FieldPath::new("build.image_optimization"), "not supported with export")
            .hint("set image_optimization = false");
        diag.warn(FieldPath::new("nav.prefix_match"), "legacy mode");

        assert_eq!(diag.len(), 2);
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.errors()[0].hint, None);

        let display = diag.into_result().unwrap_err().to_string();
        assert!(display.contains("build.base_path"));
        assert!(display.contains("set image_optimization = false"));
        assert!(display.contains("2"));
    }

    #[test]
    fn test_warnings_alone_are_ok() {
        let mut diag = ConfigDiagnostics::new();
        diag.warn(FieldPath::new("nav.prefix_match"), "legacy mode");
        assert!(diag.is_empty());
        assert!(diag.into_result().is_ok());
    }
}
