//! Colored diagnostic output
//!
//! Everything here goes to stderr so that `print` output and command
//! output on stdout stay clean. Callers decide whether a message is shown;
//! see [`crate::runner::Context`] for the verbosity gating.

use colored::Colorize;

/// Echo a command before it is run
pub fn command(cmd: &str) {
    eprintln!("{} {}", "[CMD]".cyan().bold(), cmd);
}

pub fn info(message: &str) {
    eprintln!("{} {}", "[INFO]".green(), message);
}

pub fn debug(message: &str) {
    eprintln!("{} {}", "[DEBUG]".dimmed(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}

/// Report a load error as `error: <path>: line N: <message>`
pub fn load_error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

/// Report an error raised while a task was running
pub fn runtime_error(message: &str) {
    eprintln!("{} {}", "Runtime Error:".red().bold(), message);
}
