//! `folio routes`: print the route table as JSON.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::args::RoutesArgs;
use crate::config::SiteConfig;
use crate::content::ContentRegistry;
use crate::core::BasePath;
use crate::log;
use crate::route::{PageKind, RouteTable};

/// One route as printed.
#[derive(Debug, Serialize)]
struct RouteRow<'a> {
    path: &'a str,
    /// Deployed URL path, base path included and percent-encoded.
    url: String,
    page: &'a PageKind,
}

fn rows<'a>(routes: &'a RouteTable, base: &BasePath) -> Vec<RouteRow<'a>> {
    routes
        .iter()
        .map(|entry| RouteRow {
            path: entry.path.as_str(),
            url: format!("{}{}", base, entry.path.to_encoded()),
            page: &entry.page,
        })
        .collect()
}

pub fn print_routes(args: &RoutesArgs, config: &SiteConfig) -> Result<()> {
    let registry = ContentRegistry::load(&config.build.content, &config.build.assets)
        .context("failed to load content")?;
    let routes = RouteTable::from_registry(&registry).context("failed to build routes")?;
    let rows = rows(&routes, &config.base_path());

    let formatted = if args.pretty {
        serde_json::to_string_pretty(&rows)?
    } else {
        serde_json::to_string(&rows)?
    };

    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("failed to create '{}'", output_path.display()))?;
        writeln!(file, "{}", formatted)?;
        log!("routes"; "wrote {} routes to {}", rows.len(), output_path.display());
    } else {
        println!("{}", formatted);
    }

    Ok(())
}
