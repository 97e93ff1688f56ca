//! Interpreter settings
//!
//! This module handles the optional `config.yml` settings file: discovery,
//! parsing and validation.

pub mod settings;

// Re-export main types
pub use settings::*;
