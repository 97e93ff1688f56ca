//! Execution context for loading and task running
//!
//! The context tracks the knobs and state shared by both phases: the shell,
//! depth limits, verbosity and the stack of tasks being executed.

use crate::config::Settings;
use crate::ui;
use std::env;
use std::path::PathBuf;

/// Execution context that tracks state during loading and execution
pub struct Context {
    /// Working directory for commands
    pub working_dir: PathBuf,

    /// Shell invocation prefix (e.g., ["bash", "-c"])
    pub interpreter: Vec<String>,

    /// Stack of tasks being executed, innermost last
    pub task_stack: Vec<String>,

    /// Verbosity level
    pub verbosity: Verbosity,

    /// Maximum nesting of `include`
    pub max_include_depth: usize,

    /// Maximum nesting of `call`
    pub max_call_depth: usize,

    /// Echo commands before running them
    pub echo_commands: bool,
}

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

impl Context {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Context {
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            interpreter: Vec::new(),
            task_stack: Vec::new(),
            verbosity: Verbosity::Normal,
            max_include_depth: 0,
            max_call_depth: 0,
            echo_commands: true,
        }
        .with_settings(&Settings::default())
    }

    /// Apply settings loaded from a settings file
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.interpreter = settings.shell.clone();
        self.max_include_depth = settings.max_include_depth;
        self.max_call_depth = settings.max_call_depth;
        self.echo_commands = settings.echo_commands;
        self
    }

    /// Create a context with a specific working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    /// Set the interpreter
    pub fn with_interpreter(mut self, interpreter: Vec<String>) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Push a task onto the execution stack
    pub fn push_task(&mut self, task_name: String) {
        self.task_stack.push(task_name);
    }

    /// Pop a task from the execution stack
    pub fn pop_task(&mut self) -> Option<String> {
        self.task_stack.pop()
    }

    /// Number of tasks currently executing
    pub fn call_depth(&self) -> usize {
        self.task_stack.len()
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            ui::info(message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        if self.verbosity >= Verbosity::Quiet {
            ui::error(message);
        }
    }

    /// Print debug message (only in verbose mode)
    pub fn print_debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            ui::debug(message);
        }
    }

    /// Echo a command about to run
    pub fn print_command(&self, command: &str) {
        if self.echo_commands && self.verbosity >= Verbosity::Normal {
            ui::command(command);
        }
    }

    /// Print task start message
    pub fn print_task_start(&self, task_name: &str) {
        self.print_debug(&format!("Running task: {}", task_name));
    }

    /// Print task complete message
    pub fn print_task_complete(&self, task_name: &str) {
        self.print_debug(&format!("Task completed: {}", task_name));
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
