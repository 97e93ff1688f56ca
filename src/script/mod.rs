//! Script reading
//!
//! This module turns script text into variables and tasks: line splitting,
//! comment stripping, directive classification and file loading with
//! nested includes.

pub mod directive;
pub mod lines;
pub mod loader;

// Re-export main types
pub use directive::*;
pub use lines::*;
pub use loader::*;
