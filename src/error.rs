//! Error types for kmak

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for kmak operations
pub type Result<T> = std::result::Result<T, KmakError>;

/// Main error type for kmak
#[derive(Error, Debug)]
pub enum KmakError {
    /// Settings file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Script loading errors
    #[error("{0}")]
    Load(#[from] LoadError),

    /// Task execution errors
    #[error("Runtime Error: {0}")]
    Execution(#[from] ExecutionError),

    /// The script given on the command line could not be read
    #[error("Couldn't open {}: {error}", .path.display())]
    InputFile { path: PathBuf, error: io::Error },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Settings parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read settings file '{}': {error}", .path.display())]
    Read { path: PathBuf, error: String },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// An error raised while loading a script, tagged with where it happened
#[derive(Error, Debug)]
#[error("{}: line {line}: {kind}", .path.display())]
pub struct LoadError {
    /// File being read when the error was detected
    pub path: PathBuf,
    /// Line number inside `path` (1-based, 0 when no line was read yet)
    pub line: usize,
    pub kind: LoadErrorKind,
}

#[derive(Error, Debug)]
pub enum LoadErrorKind {
    #[error("missing closing ')' in variable")]
    UnterminatedVariable,

    #[error("referenced an undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("variable name is too long")]
    VariableNameTooLong,

    #[error("malformed variable definition")]
    MalformedVariable,

    #[error("task has no name")]
    MissingTaskName,

    #[error("include depth exceeded {0}")]
    IncludeDepthExceeded(usize),

    #[error("couldn't open {}: {error}", .path.display())]
    Open { path: PathBuf, error: io::Error },
}

impl From<InterpolationError> for LoadErrorKind {
    fn from(err: InterpolationError) -> Self {
        match err {
            InterpolationError::UnterminatedVariable => LoadErrorKind::UnterminatedVariable,
            InterpolationError::UndefinedVariable(name) => LoadErrorKind::UndefinedVariable(name),
            InterpolationError::NameTooLong => LoadErrorKind::VariableNameTooLong,
        }
    }
}

/// Task execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("command failed with {}: {command}", status_text(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("failed to start '{command}': {error}")]
    Spawn { command: String, error: io::Error },

    #[error("task {0} isn't defined.")]
    TaskNotFound(String),

    #[error("call depth exceeded {0}")]
    CallDepthExceeded(usize),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn status_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code".to_string(),
    }
}

/// Variable substitution errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InterpolationError {
    #[error("Variable '{0}' is not defined")]
    UndefinedVariable(String),

    #[error("missing closing ')' in variable")]
    UnterminatedVariable,

    #[error("variable name is too long")]
    NameTooLong,
}

/// Specialized result type for settings operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for script loading
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// Specialized result type for interpolation operations
pub type InterpolationResult<T> = std::result::Result<T, InterpolationError>;
