//! File watching for the preview server.
//!
//! ```text
//! notify ─► crossbeam channel ─► debounce (300ms) ─► reload config? ─► rebuild
//! ```

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam::channel::{self, Receiver, RecvTimeoutError};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::{SiteConfig, cfg, reload_config};
use crate::core::set_build_error;
use crate::logger::{status_error, status_success};
use crate::{debug, log};

const DEBOUNCE: Duration = Duration::from_millis(300);
const TICK: Duration = Duration::from_millis(100);

/// Check if path is a temp/backup file (editor artifacts)
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with(".#")
}

/// Changes collected since the last rebuild.
#[derive(Debug, Default)]
struct Pending {
    since: Option<Instant>,
    config: bool,
}

/// Paths the watcher reacts to.
#[derive(Debug, Clone)]
struct Scope {
    config_file: PathBuf,
    sources: Vec<PathBuf>,
}

impl Scope {
    fn from_config(config: &SiteConfig) -> Self {
        Self {
            config_file: config.config_path.clone(),
            sources: vec![config.build.content.clone(), config.build.assets.clone()],
        }
    }

    fn is_relevant(&self, path: &Path) -> bool {
        if is_temp_file(path) {
            return false;
        }
        path == self.config_file || self.sources.iter().any(|dir| path.starts_with(dir))
    }

    /// Record an event. Returns false when it is ignored.
    fn record(&self, event: &notify::Event, pending: &mut Pending) -> bool {
        match event.kind {
            EventKind::Create(_) | EventKind::Remove(_) => {}
            EventKind::Modify(notify::event::ModifyKind::Metadata(_)) => return false,
            EventKind::Modify(_) => {}
            _ => return false,
        }
        let relevant: Vec<&PathBuf> = event
            .paths
            .iter()
            .filter(|p| self.is_relevant(p))
            .collect();
        if relevant.is_empty() {
            return false;
        }
        pending.config |= relevant.iter().any(|p| **p == self.config_file);
        pending.since.get_or_insert_with(Instant::now);
        true
    }
}

/// Start watching content, assets and the config file.
pub fn spawn(config: &SiteConfig, shutdown_rx: Receiver<()>) -> Result<JoinHandle<()>> {
    let (tx, rx) = channel::unbounded();
    let mut watcher: RecommendedWatcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let _ = tx.send(res);
    })
    .context("failed to create file watcher")?;

    for path in [&config.build.content, &config.build.assets] {
        if path.exists() {
            watcher
                .watch(path, RecursiveMode::Recursive)
                .with_context(|| format!("failed to watch '{}'", path.display()))?;
        }
    }
    // Editors often replace the file, so watch its directory
    watcher
        .watch(config.get_root(), RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch '{}'", config.get_root().display()))?;

    log!("watch"; "watching for changes");
    let scope = Scope::from_config(config);

    Ok(thread::spawn(move || {
        // Keep the watcher alive for the lifetime of the loop
        let _watcher = watcher;
        let mut pending = Pending::default();

        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }
            match rx.recv_timeout(TICK) {
                Ok(Ok(event)) => {
                    if scope.record(&event, &mut pending) {
                        debug!("watch"; "{:?} {:?}", event.kind, event.paths);
                    }
                }
                Ok(Err(e)) => log!("watch"; "notify error: {}", e),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if pending.since.is_some_and(|t| t.elapsed() >= DEBOUNCE) {
                let config_changed = std::mem::take(&mut pending).config;
                rebuild_after_change(config_changed);
            }
        }
    }))
}

fn rebuild_after_change(config_changed: bool) {
    if config_changed {
        match reload_config() {
            Ok(true) => debug!("watch"; "config reloaded"),
            Ok(false) => {}
            Err(e) => {
                let message = format!("{e:#}");
                status_error("config error", &message);
                set_build_error(Some(message));
                return;
            }
        }
    }

    let started = Instant::now();
    match super::rebuild(&cfg()) {
        Ok(()) => status_success(&format!("rebuilt in {:.2?}", started.elapsed())),
        Err(e) => status_error("build failed", &format!("{e:#}")),
    }
}
