//! The loaded config, swappable while the preview server runs.
//!
//! Readers take a cheap `Arc` snapshot with [`cfg`]. The watcher replaces
//! the whole config with [`reload_config`] when `folio.toml` changes, so a
//! request never sees half of an old config and half of a new one.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use anyhow::Result;
use arc_swap::ArcSwap;

use crate::config::{ConfigError, SiteConfig};
use crate::utils::hash;

static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Hash of the `folio.toml` text behind [`CONFIG`], 0 when there is none.
static SOURCE_HASH: AtomicU64 = AtomicU64::new(0);

pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

pub fn init_config(config: SiteConfig) -> Arc<SiteConfig> {
    let source = fs::read(&config.config_path).ok();
    SOURCE_HASH.store(source.map_or(0, |bytes| hash::compute(&bytes)), Ordering::Relaxed);

    let config = Arc::new(config);
    CONFIG.store(Arc::clone(&config));
    config
}

/// Load `folio.toml` again if its text changed.
///
/// Returns whether a new config was installed. On error the old one stays.
pub fn reload_config() -> Result<bool> {
    let current = cfg();
    let Some(cli) = current.cli else {
        return Ok(false);
    };

    let hash = source_hash(&current.config_path)?;
    if hash == SOURCE_HASH.load(Ordering::Relaxed) {
        return Ok(false);
    }

    let mut config = SiteConfig::load(cli)?;
    // --clean applies to the first build only
    config.build.clean = false;
    CONFIG.store(Arc::new(config));
    SOURCE_HASH.store(hash, Ordering::Relaxed);
    Ok(true)
}

fn source_hash(path: &Path) -> Result<u64, ConfigError> {
    let bytes = fs::read(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    Ok(hash::compute(&bytes))
}
