//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module  | TOML Section | Purpose                                   |
//! |---------|--------------|-------------------------------------------|
//! | `build` | `[build]`    | Output mode, base path, directories       |
//! | `nav`   | `[nav]`      | Anchor scrolling and prefix detection     |
//! | `serve` | `[serve]`    | Preview server                            |
//! | `site`  | `[site]`     | Title, author, url, language              |

mod build;
mod nav;
mod serve;
mod site;

pub use build::{BuildConfig, OutputMode};
pub use nav::NavConfig;
pub use serve::ServeConfig;
pub use site::SiteInfoConfig;
