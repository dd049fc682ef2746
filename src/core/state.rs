//! Process-wide state shared by the preview server, the watcher and the
//! Ctrl+C handler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crossbeam::channel::Sender;
use parking_lot::Mutex;
use tiny_http::Server;

static STOPPING: AtomicBool = AtomicBool::new(false);

/// Error of the last failed (re)build. `None` while the site is good.
static BUILD_ERROR: Mutex<Option<String>> = Mutex::new(None);

/// What the Ctrl+C handler has to stop once serving has started.
struct Running {
    server: Arc<Server>,
    stop_watch: Sender<()>,
}

static RUNNING: OnceLock<Running> = OnceLock::new();

/// Record the outcome of a (re)build.
pub fn set_build_error(error: Option<String>) {
    *BUILD_ERROR.lock() = error;
}

/// Error of the last (re)build, if it failed.
pub fn build_error() -> Option<String> {
    BUILD_ERROR.lock().clone()
}

/// Install the Ctrl+C handler.
///
/// Before [`register_server`] the process exits right away. Afterwards the
/// request loop is unblocked and the watcher told to stop.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        STOPPING.store(true, Ordering::SeqCst);
        match RUNNING.get() {
            Some(running) => {
                crate::log!("serve"; "shutting down...");
                let _ = running.stop_watch.send(());
                running.server.unblock();
            }
            None => std::process::exit(0),
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {e}"))
}

pub fn register_server(server: Arc<Server>, stop_watch: Sender<()>) {
    let _ = RUNNING.set(Running { server, stop_watch });
}

pub fn is_shutdown() -> bool {
    STOPPING.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_recorded() {
        set_build_error(Some("missing image".into()));
        assert_eq!(build_error().as_deref(), Some("missing image"));
        set_build_error(None);
        assert_eq!(build_error(), None);
    }

    #[test]
    fn test_not_stopping_by_default() {
        assert!(!is_shutdown());
    }
}
