//! Terminal output.
//!
//! - `log!` prints `[module] message`, `debug!` only with `--verbose`
//! - [`ProgressLine`] redraws one line of export counters in place
//! - [`status_success`] / [`status_error`] replace the previous status block
//!   in watch mode, so the terminal shows only the latest rebuild
//!
//! ```ignore
//! log!("build"; "rendering {} routes", table.len());
//!
//! let progress = ProgressLine::new(&[("pages", 12), ("assets", 40)]);
//! progress.inc("pages");
//! progress.finish();
//! ```

use std::io::{StdoutLock, Write, stdout};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// A progress line is on screen; log lines must clear it first.
static PROGRESS_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Height of the last status block printed in watch mode.
static STATUS_LINES: Mutex<usize> = Mutex::new(0);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// `log!("module"; "format {}", args)`
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like `log!`, printed only with `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

pub fn log(module: &str, message: &str) {
    let mut out = stdout().lock();
    if PROGRESS_ACTIVE.load(Ordering::SeqCst) {
        clear_line(&mut out);
    }
    writeln!(out, "{} {message}", prefix(module)).ok();
    out.flush().ok();
}

fn prefix(module: &str) -> String {
    let tag = format!("[{module}]");
    match module {
        "error" => tag.bright_red().bold().to_string(),
        "warning" => tag.yellow().bold().to_string(),
        "hint" => tag.bright_cyan().bold().to_string(),
        "serve" => tag.bright_blue().bold().to_string(),
        "watch" => tag.bright_green().bold().to_string(),
        _ => tag.bright_yellow().bold().to_string(),
    }
}

fn clear_line(out: &mut StdoutLock<'_>) {
    execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
}

// ---------------------------------------------------------------------------
// Watch status
// ---------------------------------------------------------------------------

pub fn status_success(message: &str) {
    print_status(&"✓".green().to_string(), message);
}

pub fn status_error(summary: &str, detail: &str) {
    let message = match detail {
        "" => summary.to_string(),
        detail => format!("{summary}\n{detail}"),
    };
    print_status(&"✗".red().to_string(), &message);
}

fn print_status(symbol: &str, message: &str) {
    let mut previous = STATUS_LINES.lock();
    let mut out = stdout().lock();
    if let Ok(lines @ 1..) = u16::try_from(*previous) {
        execute!(out, cursor::MoveUp(lines), Clear(ClearType::FromCursorDown)).ok();
    }
    let time = format!("[{}]", clock(SystemTime::now()));
    writeln!(out, "{} {symbol} {message}", time.dimmed()).ok();
    out.flush().ok();
    *previous = message.lines().count().max(1);
}

/// UTC wall clock as `HH:MM:SS`.
fn clock(now: SystemTime) -> String {
    let secs = now.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs()) % 86_400;
    format!("{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

// ---------------------------------------------------------------------------
// Progress line
// ---------------------------------------------------------------------------

/// `[build] pages(4/12) assets(30/40)`, redrawn as rayon workers finish files.
///
/// A redraw is skipped when another thread is already drawing.
pub struct ProgressLine {
    counters: Vec<(&'static str, usize, AtomicUsize)>,
    drawing: Mutex<()>,
    finished: bool,
}

impl ProgressLine {
    /// Counters with a zero total are left out.
    pub fn new(items: &[(&'static str, usize)]) -> Self {
        let progress = Self {
            counters: items
                .iter()
                .filter(|(_, total)| *total > 0)
                .map(|&(name, total)| (name, total, AtomicUsize::new(0)))
                .collect(),
            drawing: Mutex::new(()),
            finished: false,
        };
        PROGRESS_ACTIVE.store(true, Ordering::SeqCst);
        progress.draw(false);
        progress
    }

    pub fn inc(&self, name: &str) {
        let Some((_, _, done)) = self.counters.iter().find(|(n, ..)| *n == name) else {
            return;
        };
        done.fetch_add(1, Ordering::Relaxed);
        if let Some(_guard) = self.drawing.try_lock() {
            self.draw(false);
        }
    }

    /// Leave the final counts on screen.
    pub fn finish(mut self) {
        PROGRESS_ACTIVE.store(false, Ordering::SeqCst);
        {
            let _guard = self.drawing.lock();
            self.draw(true);
        }
        self.finished = true;
    }

    fn text(&self) -> String {
        self.counters
            .iter()
            .map(|(name, total, done)| format!("{name}({}/{total})", done.load(Ordering::Relaxed)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn draw(&self, keep: bool) {
        let mut out = stdout().lock();
        clear_line(&mut out);
        write!(out, "{} {}", prefix("build"), self.text()).ok();
        if keep {
            writeln!(out).ok();
        }
        out.flush().ok();
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        PROGRESS_ACTIVE.store(false, Ordering::SeqCst);
        let mut out = stdout().lock();
        clear_line(&mut out);
        out.flush().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_progress_text_skips_empty_counters() {
        let progress = ProgressLine {
            counters: vec![("pages", 3, AtomicUsize::new(1)), ("assets", 10, AtomicUsize::new(0))],
            drawing: Mutex::new(()),
            finished: true,
        };
        assert_eq!(progress.text(), "pages(1/3) assets(0/10)");
    }

    #[test]
    fn test_clock() {
        let t = UNIX_EPOCH + Duration::from_secs(86_400 * 3 + 13 * 3600 + 7 * 60 + 5);
        assert_eq!(clock(t), "13:07:05");
        assert_eq!(clock(UNIX_EPOCH), "00:00:00");
    }
}
