//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// folio portfolio site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a new site with sample content
    #[command(visible_alias = "i")]
    Init {
        /// Site directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print the files that would be created without writing them
        #[arg(long)]
        dry: bool,
    },

    /// Render and export the site
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Start the preview server
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable file watching for auto-rebuild
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },

    /// Print the route table as JSON
    #[command(visible_alias = "r")]
    Routes {
        #[command(flatten)]
        args: RoutesArgs,
    },

    /// Check internal links, assets and anchors without writing output
    #[command(visible_alias = "v")]
    Validate {
        #[command(flatten)]
        args: ValidateArgs,
    },
}

/// Validate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Report problems as warnings and exit successfully
    #[arg(long, short = 'w')]
    pub warn_only: bool,
}

/// Routes command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RoutesArgs {
    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Minify emitted CSS and JS
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Enable sitemap generation
    #[arg(short = 'S', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override the deployment base path (e.g. "/portfolio", "" for root)
    #[arg(short = 'B', long = "base-path")]
    pub base_path: Option<String>,

    /// Override site URL for deployment.
    ///
    /// The path component becomes the base path unless --base-path is given.
    ///
    /// Example: deploying to a GitHub Pages project site:
    ///   folio build --site-url "https://jane.github.io/portfolio"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_args() {
        let cli = Cli::try_parse_from([
            "folio",
            "build",
            "--base-path",
            "/portfolio",
            "--minify=false",
            "--clean",
        ])
        .unwrap();
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(build_args.base_path.as_deref(), Some("/portfolio"));
        assert_eq!(build_args.minify, Some(false));
        assert!(build_args.clean);
        assert_eq!(build_args.sitemap, None);
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from(["folio", "serve", "-p", "8080", "-w"]).unwrap();
        assert!(cli.is_serve());
        let Commands::Serve { port, watch, .. } = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(port, Some(8080));
        assert_eq!(watch, Some(true));
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::try_parse_from(["folio", "-C", "site.toml", "-o", "dist", "routes", "--pretty"])
            .unwrap();
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert_eq!(cli.output, Some(PathBuf::from("dist")));
        assert!(matches!(cli.command, Commands::Routes { args } if args.pretty));
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["folio", "init", "my-site", "--dry"]).unwrap();
        assert!(cli.is_init());
        assert!(matches!(
            cli.command,
            Commands::Init { name: Some(ref n), dry: true } if n == &PathBuf::from("my-site")
        ));
    }
}
