//! Types shared by every config section: errors, field paths and the
//! process-wide handle.

mod error;
mod field;
mod handle;

pub use error::{ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
pub use handle::{cfg, init_config, reload_config};
