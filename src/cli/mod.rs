//! CLI interface and argument parsing
//!
//! This module handles command-line parsing, loading the requested script
//! and mapping the result onto a process exit code.

pub mod app;

// Re-export main types
pub use app::*;
