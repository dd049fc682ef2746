//! Dotted config field paths.

use owo_colors::OwoColorize;
use std::fmt;

/// Path of a config field, e.g. `build.base_path`.
///
/// Sections declare one associated const per field they validate, so
/// messages never spell a field name by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).cyan())
    }
}
