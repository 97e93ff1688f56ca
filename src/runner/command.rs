//! Command execution
//!
//! This module runs `cmd` lines through the configured shell.

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::Context;
use std::io;
use std::process::{Command as StdCommand, Stdio};

/// Status reported when a child ended without an exit code (e.g., killed
/// by a signal)
pub const UNOBSERVED_STATUS: i32 = -1;

/// Run a command string through the shell and wait for it
///
/// The child inherits stdin, stdout and stderr. Returns its exit status,
/// or [`UNOBSERVED_STATUS`] when it has none.
pub fn run_command(command: &str, ctx: &Context) -> ExecutionResult<i32> {
    let Some((program, args)) = ctx.interpreter.split_first() else {
        return Err(ExecutionError::Spawn {
            command: command.to_string(),
            error: io::Error::new(io::ErrorKind::InvalidInput, "no shell configured"),
        });
    };

    // Build the command
    let mut process = StdCommand::new(program);
    process.args(args);
    process.arg(command);
    process.current_dir(&ctx.working_dir);

    // Set up stdio
    process.stdin(Stdio::inherit());
    process.stdout(Stdio::inherit());
    process.stderr(Stdio::inherit());

    let status = process.status().map_err(|error| ExecutionError::Spawn {
        command: command.to_string(),
        error,
    })?;

    Ok(status.code().unwrap_or(UNOBSERVED_STATUS))
}

/// Run a `cmd` line; any non-zero status is an error
pub fn execute_command(command: &str, ctx: &Context) -> ExecutionResult<()> {
    ctx.print_command(command);

    let code = run_command(command, ctx)?;
    if code != 0 {
        return Err(ExecutionError::CommandFailed {
            command: command.to_string(),
            code: (code != UNOBSERVED_STATUS).then_some(code),
        });
    }

    Ok(())
}
