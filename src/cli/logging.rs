//! Console output helpers for the CLI

/// Output verbosity selected by the global flags
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Errors only
    Quiet,
    /// Progress messages
    Normal,
    /// Progress plus per-step detail
    Verbose,
}

/// Print a message when the selected level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

/// Print a warning to stderr unless output is suppressed
pub fn warn(level: LogLevel, msg: &str) {
    if level != LogLevel::Quiet {
        eprintln!("warning: {msg}");
    }
}
