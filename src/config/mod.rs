//! Site configuration management for `folio.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [site] [build] [nav] [serve]
//! ├── types/         # ConfigError, diagnostics, field paths, global handle
//! ├── util.rs        # config discovery, URL helpers
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! Loading order: parse file, apply CLI overrides, normalize paths against the
//! project root, derive the base path, then validate everything at once.

pub mod section;
pub mod types;
mod util;

use util::{find_config_file, url_base_path};

pub use section::{BuildConfig, NavConfig, OutputMode, ServeConfig, SiteInfoConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config, reload_config};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    core::BasePath,
    log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteInfoConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub nav: NavConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// For non-init commands, searches upward from cwd to find the config
    /// file. The project root is the config file's parent directory.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        if !cli.is_init() && !exists {
            bail!(ConfigError::Validation(format!(
                "config file '{}' not found, run 'folio init' to create a new site",
                cli.config.display()
            )));
        }

        let mut config = if exists && !cli.is_init() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.config_path = config_path;
        config.cli = Some(cli);
        config.finalize(cli)?;

        if !cli.is_init() {
            config.validate()?;
        }

        Ok(config)
    }

    /// Resolve config file path based on command.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        match &cli.command {
            Commands::Init { name, .. } => {
                let dir = name.as_ref().map_or_else(|| cwd.clone(), |n| cwd.join(n));
                let path = dir.join(&cli.config);
                let exists = path.exists();
                Ok((path, exists))
            }
            _ => match find_config_file(&cli.config) {
                Some(path) => Ok((path, true)),
                None => Ok((cwd.join(&cli.config), false)),
            },
        }
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) -> Result<()> {
        let root = match &cli.command {
            Commands::Init { name, .. } => {
                let cwd = std::env::current_dir().context("Failed to get current working directory")?;
                name.as_ref().map_or_else(|| cwd.clone(), |n| cwd.join(n))
            }
            _ => self
                .config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        let explicit_base = self.apply_command_options(cli);
        self.normalize_paths(cli, &root);
        if !explicit_base {
            self.sync_base_path_from_url();
        }

        // Preview at `/` unless the user wants to test the deployed prefix
        if cli.is_serve() && !self.serve.respect_prefix {
            self.build.base_path.clear();
            self.build.asset_prefix = None;
        }
        Ok(())
    }

    /// Derive the base path from `site.url` when none was configured.
    fn sync_base_path_from_url(&mut self) {
        if self.build.base_path.is_empty()
            && let Some(url) = &self.site.url
            && let Some(path) = url_base_path(url)
        {
            self.build.base_path = path;
        }
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
            if !Self::prompt_continue()? {
                bail!("Aborted due to unknown config fields");
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Prompt user to continue. Returns true only if user explicitly confirms.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, Write};

        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Deployment prefix used for every link and asset.
    pub fn base_path(&self) -> BasePath {
        self.build.base()
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    ///
    /// Returns true when the base path was set explicitly on the command line.
    fn apply_command_options(&mut self, cli: &Cli) -> bool {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args, false),
            Commands::Serve {
                build_args,
                interface,
                port,
                watch,
            } => {
                let explicit = self.apply_build_args(build_args, true);
                self.apply_serve_options(*interface, *port, *watch);
                explicit
            }
            Commands::Init { .. } | Commands::Routes { .. } | Commands::Validate { .. } => {
                !self.build.base_path.is_empty()
            }
        }
    }

    /// Apply build arguments from CLI.
    ///
    /// `is_serve`: sitemap defaults to disabled for local preview.
    fn apply_build_args(&mut self, args: &BuildArgs, is_serve: bool) -> bool {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        self.build.clean = args.clean;

        if let Some(url) = &args.site_url {
            self.site.url = Some(url.clone());
        }

        if is_serve {
            self.build.sitemap.enable = args.sitemap.unwrap_or(false);
        } else {
            Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
        }

        match &args.base_path {
            Some(base) => {
                self.build.base_path = base.clone();
                self.build.asset_prefix = None;
                true
            }
            None => !self.build.base_path.is_empty(),
        }
    }

    /// Apply serve-specific options.
    fn apply_serve_options(
        &mut self,
        interface: Option<std::net::IpAddr>,
        port: Option<u16>,
        watch: Option<bool>,
    ) {
        Self::update_option(&mut self.serve.interface, interface.as_ref());
        Self::update_option(&mut self.serve.port, port.as_ref());
        Self::update_option(&mut self.serve.watch, watch.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, cli: &Cli, root: &Path) {
        use crate::utils::path::normalize_path;

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = normalize_path(root);
        self.config_path = normalize_path(&self.config_path);
        self.build.content = normalize_path(&root.join(&self.build.content));
        self.build.assets = normalize_path(&root.join(&self.build.assets));
        self.build.output = normalize_path(&root.join(&self.build.output));
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the current command.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        if !self.config_path.exists() {
            bail!(ConfigError::Validation("config file not found".into()));
        }

        self.site.validate(&mut diag);
        self.build.validate(&mut diag);
        self.nav.validate(&mut diag);
        self.validate_base_path_sources(&mut diag);

        if !self.build.content.is_dir() {
            let content = self.root_relative(&self.build.content);
            diag.error(
                BuildConfig::CONTENT,
                format!("content directory '{}' not found", content.display()),
            )
            .hint("run 'folio init' to scaffold one");
        }

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Warn when `site.url` and `build.base_path` name different prefixes.
    fn validate_base_path_sources(&self, diag: &mut ConfigDiagnostics) {
        let Some(url_path) = self.site.url.as_deref().and_then(url_base_path) else {
            return;
        };
        let from_url = BasePath::new(&url_path);
        if !self.build.base_path.is_empty() && from_url != self.base_path() && !self.serve_preview()
        {
            diag.warn(
                BuildConfig::BASE_PATH,
                format!(
                    "base path '{}' differs from the path of {} ('{}')",
                    self.base_path(),
                    SiteInfoConfig::URL,
                    from_url
                ),
            );
        }
    }

    /// Serving locally with the prefix stripped.
    fn serve_preview(&self) -> bool {
        self.cli.is_some_and(Cli::is_serve) && !self.serve.respect_prefix
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required `[site]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\ntitle = \"Test\"\ndescription = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn leak_cli(args: &[&str]) -> &'static Cli {
        Box::leak(Box::new(Cli::try_parse_from(args).unwrap()))
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(SiteConfig::from_str("[site\ntitle = \"Jane\"").is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();
        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.title, "");
        assert!(config.build.minify);
        assert_eq!(config.serve.port, 5277);
        assert_eq!(config.nav.header_offset, 80);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.site.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\ntitle = \"Test\"\n[nav]\nheader_offset = 64";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_base_path_from_url() {
        let mut config =
            test_parse_config("url = \"https://jane.github.io/portfolio/\"");
        config.sync_base_path_from_url();
        assert_eq!(config.base_path().as_str(), "/portfolio");
    }

    #[test]
    fn test_explicit_base_path_wins() {
        let mut config = test_parse_config(
            "url = \"https://jane.github.io/portfolio/\"\n[build]\nbase_path = \"/work\"",
        );
        config.sync_base_path_from_url();
        assert_eq!(config.base_path().as_str(), "/work");
    }

    #[test]
    fn test_cli_base_path_override() {
        let cli = leak_cli(&["folio", "build", "--base-path", "/portfolio"]);
        let mut config = test_parse_config("[build]\nasset_prefix = \"/other/\"");
        assert!(config.apply_command_options(cli));
        assert_eq!(config.base_path().as_str(), "/portfolio");
        assert!(config.build.asset_prefix.is_none());
    }

    #[test]
    fn test_cli_site_url_override() {
        let cli = leak_cli(&["folio", "build", "--site-url", "https://jane.github.io/folio"]);
        let mut config = test_parse_config("");
        let explicit = config.apply_command_options(cli);
        assert!(!explicit);
        config.sync_base_path_from_url();
        assert_eq!(config.base_path().as_str(), "/folio");
    }

    #[test]
    fn test_serve_disables_sitemap_by_default() {
        let cli = leak_cli(&["folio", "serve"]);
        let mut config = test_parse_config("");
        config.apply_command_options(cli);
        assert!(!config.build.sitemap.enable);

        let cli = leak_cli(&["folio", "build"]);
        let mut config = test_parse_config("");
        config.apply_command_options(cli);
        assert!(config.build.sitemap.enable);
    }

    #[test]
    fn test_load_from_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();
        let config_path = dir.path().join("folio.toml");
        fs::write(
            &config_path,
            "[site]\ntitle = \"Jane\"\nurl = \"https://jane.github.io/portfolio\"\n",
        )
        .unwrap();

        let path = config_path.to_string_lossy().into_owned();
        let cli = leak_cli(&["folio", "-C", &path, "build"]);
        let config = SiteConfig::load(cli).unwrap();

        let root = crate::utils::path::normalize_path(dir.path());
        assert_eq!(config.get_root(), root);
        assert_eq!(config.build.output, root.join("out"));
        assert_eq!(config.base_path().as_str(), "/portfolio");
    }

    #[test]
    fn test_load_serve_strips_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();
        let config_path = dir.path().join("folio.toml");
        fs::write(
            &config_path,
            "[site]\ntitle = \"Jane\"\n[build]\nbase_path = \"/portfolio\"\n",
        )
        .unwrap();

        let path = config_path.to_string_lossy().into_owned();
        let config = SiteConfig::load(leak_cli(&["folio", "-C", &path, "serve"])).unwrap();
        assert!(config.base_path().is_root());
    }

    #[test]
    fn test_load_reports_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("folio.toml");
        fs::write(
            &config_path,
            "[site]\ntitle = \"Jane\"\n[build]\nimage_optimization = true\n",
        )
        .unwrap();

        let path = config_path.to_string_lossy().into_owned();
        let err = SiteConfig::load(leak_cli(&["folio", "-C", &path, "build"])).unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        // missing content dir + image optimization in export mode
        assert_eq!(diag.len(), 2);
    }
}
