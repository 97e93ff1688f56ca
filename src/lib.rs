//! kmak - a minimal task-based build script interpreter
//!
//! A kmak script defines variables and named tasks. Loading a script
//! expands `$(name)` references and records each task's body; running a
//! task replays its `print`, `call`, `cmd` and `exit` lines in order.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod runner;
pub mod script;
pub mod ui;

// Re-export commonly used types
pub use error::{KmakError, Result};
pub use interpreter::Interpreter;

/// Current version of kmak
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
