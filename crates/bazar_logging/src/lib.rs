#![deny(missing_docs)]
//! Shared logging utilities for the Campus Bazar workspace.
//!
//! This crate provides the `bazar_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every line is tagged
//! with the dispatch sequence number of the message being processed, so a log
//! can be lined up against the wizard messages that produced it.

use std::cell::Cell;

thread_local! {
    /// Sequence number of the message currently being dispatched on this thread.
    static DISPATCH_SEQ: Cell<u64> = const { Cell::new(0) };
}

/// Sets the dispatch sequence number for the current thread.
/// The app calls this once per dispatched wizard message.
pub fn set_dispatch_seq(seq: u64) {
    DISPATCH_SEQ.with(|v| v.set(seq));
}

/// Advances the dispatch sequence number for the current thread and returns it.
pub fn next_dispatch_seq() -> u64 {
    DISPATCH_SEQ.with(|v| {
        let next = v.get().wrapping_add(1);
        v.set(next);
        next
    })
}

/// Retrieves the dispatch sequence number for the current thread.
/// Returns 0 outside of a dispatch.
pub fn dispatch_seq() -> u64 {
    DISPATCH_SEQ.with(|v| v.get())
}

/// Logs a trace-level message tagged with the dispatch sequence.
#[macro_export]
macro_rules! bazar_trace {
    ($($arg:tt)*) => {{
        log::trace!("[#{}] {}", $crate::dispatch_seq(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the dispatch sequence.
#[macro_export]
macro_rules! bazar_debug {
    ($($arg:tt)*) => {{
        log::debug!("[#{}] {}", $crate::dispatch_seq(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the dispatch sequence.
#[macro_export]
macro_rules! bazar_info {
    ($($arg:tt)*) => {{
        log::info!("[#{}] {}", $crate::dispatch_seq(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the dispatch sequence.
#[macro_export]
macro_rules! bazar_warn {
    ($($arg:tt)*) => {{
        log::warn!("[#{}] {}", $crate::dispatch_seq(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the dispatch sequence.
#[macro_export]
macro_rules! bazar_error {
    ($($arg:tt)*) => {{
        log::error!("[#{}] {}", $crate::dispatch_seq(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
