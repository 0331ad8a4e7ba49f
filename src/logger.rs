//! Logging utilities with colored output and a self-overwriting status line.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, only printed when `--verbose` is enabled
//! - `StatusLine` for single-line progress while harvesting the feed
//!
//! # Example
//!
//! ```ignore
//! log!("feed"; "fetched {} entries", count);
//!
//! let mut status = StatusLine::new("feed");
//! status.update("page 3, 1500 entries");
//! status.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use std::{
    io::{IsTerminal, Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
///
/// Logs go to stderr so stdout carries only the run summary.
#[inline]
pub fn log(module: &str, message: &str) {
    let stderr = stderr();
    let interactive = stderr.is_terminal();
    write_log(&mut stderr.lock(), interactive, module, message);
}

/// Write one log line, clearing leftover status text only on a terminal.
fn write_log(out: &mut impl Write, interactive: bool, module: &str, message: &str) {
    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());
    if interactive {
        execute!(out, Clear(ClearType::UntilNewLine)).ok();
    }
    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "feed" => prefix.bright_blue().bold().to_string(),
        "sitemap" | "index" => prefix.bright_green().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Status Line (single-line progress with overwrite)
// ============================================================================

/// Single-line progress display that overwrites itself.
///
/// Displays: `[feed] page 3 (1500 entries)`
///
/// When stderr is not a terminal, updates are suppressed and only the
/// final line written by [`StatusLine::finish`] is kept.
pub struct StatusLine {
    module: &'static str,
    last: Option<String>,
    interactive: bool,
}

impl StatusLine {
    pub fn new(module: &'static str) -> Self {
        Self {
            module,
            last: None,
            interactive: stderr().is_terminal(),
        }
    }

    /// Replace the current status text.
    pub fn update(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.interactive {
            let prefix = colorize_prefix(self.module, &self.module.to_ascii_lowercase());
            let mut stderr = stderr().lock();
            execute!(
                stderr,
                cursor::MoveToColumn(0),
                Clear(ClearType::CurrentLine)
            )
            .ok();
            write!(stderr, "{prefix} {message}").ok();
            stderr.flush().ok();
        }
        self.last = Some(message);
    }

    /// Keep the last status as a regular log line.
    pub fn finish(self) {
        let Some(last) = self.last else {
            return;
        };
        if self.interactive {
            let mut stderr = stderr().lock();
            execute!(
                stderr,
                cursor::MoveToColumn(0),
                Clear(ClearType::CurrentLine)
            )
            .ok();
        }
        log(self.module, &last);
    }
}
