//! Logging utilities with colored module prefixes.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for messages shown only with `--verbose`

use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};

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

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    println!("{} {}", colorize_prefix(module), message);
}

fn colorize_prefix(module: &str) -> String {
    let padded = format!("{module:>8}");
    match module {
        "error" => padded.red().bold().to_string(),
        "warning" => padded.yellow().bold().to_string(),
        "serve" => padded.green().bold().to_string(),
        "assets" => padded.cyan().bold().to_string(),
        "data" => padded.blue().bold().to_string(),
        _ => padded.magenta().bold().to_string(),
    }
}
