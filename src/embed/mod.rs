//! Embedded static resources for folio.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `asset` - Embedded asset types with content-hash filenames
//! - `minify` - oxc / lightningcss minification
//! - `site` - Stylesheet and navigation runtime shipped with every site
//! - `init` - Sample site written by `folio init`
//!
//! # Usage
//!
//! ```ignore
//! use embed::site::Bundle;
//!
//! let bundle = Bundle::build(&config);
//! let urls = bundle.urls(); // "/_folio/style-<hash>.css", "/_folio/nav-<hash>.js"
//! ```

mod asset;
mod minify;
mod template;

pub use asset::{AssetKind, BuiltAsset, EmbeddedAsset};
pub use template::{NoVars, Template, TemplateVars};

pub mod site {
    use super::{AssetKind, BuiltAsset, EmbeddedAsset, TemplateVars};
    use crate::config::{NavConfig, SiteConfig};
    use crate::render::AssetUrls;

    /// Variables for nav.js.
    #[derive(Debug, Clone, Copy)]
    pub struct NavVars {
        pub header_offset: u32,
        pub smooth: bool,
    }

    impl NavVars {
        pub fn from_config(nav: &NavConfig) -> Self {
            Self {
                header_offset: nav.header_offset,
                smooth: nav.smooth,
            }
        }
    }

    impl TemplateVars for NavVars {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__FOLIO_HEADER_OFFSET__", &self.header_offset.to_string())
                .replace("__FOLIO_SMOOTH__", if self.smooth { "true" } else { "false" })
        }
    }

    /// Variables for style.css.
    #[derive(Debug, Clone, Copy)]
    pub struct StyleVars {
        pub header_offset: u32,
    }

    impl TemplateVars for StyleVars {
        fn apply(&self, content: &str) -> String {
            content.replace("__FOLIO_HEADER_OFFSET__", &self.header_offset.to_string())
        }
    }

    /// Anchor interception, base path detection and entrance animations.
    pub const NAV_JS: EmbeddedAsset<NavVars> =
        EmbeddedAsset::new(AssetKind::JavaScript, "nav", include_str!("site/nav.js"));

    /// Default theme.
    pub const STYLE_CSS: EmbeddedAsset<StyleVars> =
        EmbeddedAsset::new(AssetKind::Css, "style", include_str!("site/style.css"));

    /// The stylesheet and script referenced by every page.
    ///
    /// Neither depends on the base path: the prefix reaches the script
    /// through `<html data-base>`, so filenames stay stable across
    /// deployments.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Bundle {
        pub style: BuiltAsset,
        pub script: BuiltAsset,
    }

    impl Bundle {
        pub fn build(config: &SiteConfig) -> Self {
            Self::with(&config.nav, config.build.minify)
        }

        pub fn with(nav: &NavConfig, minify: bool) -> Self {
            let vars = NavVars::from_config(nav);
            Self {
                style: STYLE_CSS.build(
                    &StyleVars {
                        header_offset: vars.header_offset,
                    },
                    minify,
                ),
                script: NAV_JS.build(&vars, minify),
            }
        }

        pub fn urls(&self) -> AssetUrls {
            AssetUrls {
                style: self.style.url(),
                script: self.script.url(),
            }
        }

        pub fn iter(&self) -> impl Iterator<Item = &BuiltAsset> {
            [&self.style, &self.script].into_iter()
        }

        /// Asset served at a root-relative `path`.
        pub fn get(&self, path: &str) -> Option<&BuiltAsset> {
            self.iter().find(|asset| asset.url() == path)
        }
    }
}

pub mod init {
    use super::{NoVars, Template, TemplateVars};

    /// Variables for templates that mention the site title.
    pub struct TitleVars {
        pub title: String,
    }

    impl TemplateVars for TitleVars {
        fn apply(&self, content: &str) -> String {
            content.replace("__TITLE__", &self.title)
        }
    }

    pub const CONFIG_TOML: Template<TitleVars> =
        Template::new(include_str!("init/folio.toml"));

    pub const PROFILE_TOML: Template<TitleVars> =
        Template::new(include_str!("init/profile.toml"));

    /// Sample content files, relative to the content directory.
    pub const CONTENT: &[(&str, Template<NoVars>)] = &[
        ("domain.md", Template::new(include_str!("init/domain.md"))),
        ("projects.toml", Template::new(include_str!("init/projects.toml"))),
        ("optical-flow.md", Template::new(include_str!("init/optical-flow.md"))),
        ("case-studies.toml", Template::new(include_str!("init/case-studies.toml"))),
        ("kd-trees.md", Template::new(include_str!("init/kd-trees.md"))),
        ("draft.md", Template::new(include_str!("init/draft.md"))),
    ];
}
