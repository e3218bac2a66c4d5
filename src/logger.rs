//! Structured logging with box-drawing output.
//!
//! Every run prints a single visual block: a header from `log_version!`, a
//! series of pipe-prefixed lines, and a closing `log_end!`. Reports produced
//! by the commands are separate from this stream. When a report is written
//! to standard output, the log is moved to standard error so that the two
//! never interleave.
//!
//! Logging can be switched off at runtime, which tests use to stay quiet.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static LOG_TO_STDERR: AtomicBool = AtomicBool::new(false);

/// Main logging interface.
///
/// ## Logging Conventions
///
/// - **`log_block_start!`**: opens a new conceptual block (e.g. "Loading
///   configuration", "Computing carpet"). Prints an empty pipe `┃` for spacing
///   and then `┣ message`.
/// - **`log_decorated!`**: a line that belongs to the current block, `┣ message`.
/// - **`log_indented!`**: nested detail under the previous line, `┃   message`.
/// - **`log_pipe!`**: an empty `┃` line, used before a semantic message that
///   starts its own block. Not for use right before `log_block_start!` or
///   `log_end!`.
/// - **`log_version!`**: the `┏ daylight vX.Y.Z ━━╸` header, once per run.
/// - **`log_end!`**: the closing `╹`, once per run.
/// - **`log_info!`, `log_warning!`, `log_debug!`**:
///   semantic messages with a colored `[LEVEL]` tag.
/// - **`log_error_exit!`**: an error that terminates the flow, drawn with the
///   closing corner `┗`.
pub struct Log;

impl Log {
    /// Enable or disable logging.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Send log output to standard error instead of standard output.
    pub fn set_stderr(to_stderr: bool) {
        LOG_TO_STDERR.store(to_stderr, Ordering::SeqCst);
    }

    fn uses_stderr() -> bool {
        LOG_TO_STDERR.load(Ordering::SeqCst)
    }
}

/// Write already formatted log text to the active stream.
pub fn write_output(text: &str) {
    if !Log::is_enabled() {
        return;
    }
    if Log::uses_stderr() {
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(text.as_bytes());
        let _ = stderr.flush();
    } else {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

/// Format one log line with the given prefix and write it.
pub fn write_line(prefix: &str, message: &str) {
    write_output(&format!("{prefix}{message}\n"));
}

/// ANSI-colored `[LEVEL]` tag.
pub fn level_tag(level: &str, color: u8) -> String {
    format!("[\x1b[{color}m{level}\x1b[0m] ")
}

// # Logging Macros

/// Log a line that belongs to the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)+) => {{
        $crate::logger::write_line("┣ ", &format!($($arg)+));
    }};
}

/// Log nested detail under the previous line.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)+) => {{
        $crate::logger::write_line("┃   ", &format!($($arg)+));
    }};
}

/// Log an empty pipe line for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {{
        $crate::logger::write_output("┃\n");
    }};
}

/// Start a new block.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)+) => {{
        $crate::logger::write_output("┃\n");
        $crate::logger::write_line("┣ ", &format!($($arg)+));
    }};
}

/// Log the application header.
#[macro_export]
macro_rules! log_version {
    () => {{
        let version = env!("CARGO_PKG_VERSION");
        $crate::logger::write_output(&format!("┏ daylight v{version} ━━╸\n"));
    }};
}

/// Log the closing marker.
#[macro_export]
macro_rules! log_end {
    () => {{
        $crate::logger::write_output("╹\n");
    }};
}

/// Log a warning in yellow.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => {{
        let tag = $crate::logger::level_tag("WARNING", 33);
        $crate::logger::write_line(&format!("┣{tag}"), &format!($($arg)+));
    }};
}

/// Log an error that ends the run, with a spacing pipe and the closing corner.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)+) => {{
        let tag = $crate::logger::level_tag("ERROR", 31);
        $crate::logger::write_output("┃\n");
        $crate::logger::write_line(&format!("┗{tag}"), &format!($($arg)+));
    }};
}

/// Log an informational message in green.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {{
        let tag = $crate::logger::level_tag("INFO", 32);
        $crate::logger::write_line(&format!("┣{tag}"), &format!($($arg)+));
    }};
}

/// Log a debug message in green.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {{
        let tag = $crate::logger::level_tag("DEBUG", 32);
        $crate::logger::write_line(&format!("┣{tag}"), &format!($($arg)+));
    }};
}
