//! Task execution engine
//!
//! This module holds the variable store and substitution engine used while
//! loading, and the task table, command runner and execution context used
//! while running.

pub mod command;
pub mod context;
pub mod interpolate;
pub mod task;
pub mod vars;

// Re-export main types
pub use command::*;
pub use context::*;
pub use interpolate::*;
pub use task::*;
pub use vars::*;
