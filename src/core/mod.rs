//! Core types - pure abstractions shared across the codebase.

mod base;
mod link;
mod state;
mod url;

pub use base::{BasePath, PrefixMatch};
pub use link::{LinkKind, NavigationLink};
pub use state::{build_error, is_shutdown, register_server, set_build_error, setup_shutdown_handler};
pub use url::UrlPath;
