//! Main CLI application

use crate::config::load_settings;
use crate::error::{ExecutionError, KmakError};
use crate::interpreter::Interpreter;
use crate::runner::{Context, Outcome, Verbosity};
use crate::ui;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

/// Exit code for usage, load and runtime errors
pub const EXIT_FAILURE: i32 = -1;

/// Build the clap command
fn build_command() -> Command {
    Command::new("kmak")
        .version(crate::VERSION)
        .about("A minimal task-based build script interpreter")
        .arg(
            Arg::new("input")
                .value_name("INPUT_FILE")
                .help("Script to load")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("task")
                .value_name("TASK")
                .help("Task to run"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("CONFIG")
                .help("Path to a settings file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("List the tasks defined by the script")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no diagnostics")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Report an error the way it is shown to users
fn report(err: &KmakError, verbosity: Verbosity) {
    if verbosity < Verbosity::Quiet {
        return;
    }
    match err {
        KmakError::Execution(inner @ ExecutionError::TaskNotFound(_)) => {
            ui::load_error(&inner.to_string())
        }
        KmakError::Execution(inner) => ui::runtime_error(&inner.to_string()),
        KmakError::Config(inner) => ui::error(&inner.to_string()),
        other => ui::load_error(&other.to_string()),
    }
}

/// Print the usage line followed by every task name
fn print_task_listing(interpreter: &Interpreter, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", build_command().render_usage())?;
    writeln!(out, "Tasks:")?;
    for name in interpreter.task_names() {
        writeln!(out, "  - {}", name)?;
    }
    Ok(())
}

/// Run with the process arguments and return the exit code
pub fn run() -> i32 {
    run_from(std::env::args_os())
}

/// Run with explicit arguments and return the exit code
///
/// Everything the run allocated is dropped before this returns.
pub fn run_from<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match build_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { EXIT_FAILURE } else { 0 };
        }
    };

    let verbosity = get_verbosity(&matches);
    match execute(&matches, verbosity) {
        Ok(code) => code,
        Err(e) => {
            report(&e, verbosity);
            EXIT_FAILURE
        }
    }
}

fn execute(matches: &ArgMatches, verbosity: Verbosity) -> Result<i32, KmakError> {
    let settings = load_settings(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let mut ctx = Context::new()
        .with_settings(&settings)
        .with_verbosity(verbosity);

    let mut interpreter = Interpreter::new();
    if let Some(input) = matches.get_one::<PathBuf>("input") {
        interpreter.load_file(input, &ctx)?;
    }

    let mut stdout = io::stdout();

    if matches.get_flag("list") {
        for name in interpreter.task_names() {
            writeln!(stdout, "{}", name)?;
        }
        return Ok(0);
    }

    let Some(task) = matches.get_one::<String>("task") else {
        ctx.print_error("no task provided.");
        print_task_listing(&interpreter, &mut stdout)?;
        return Ok(EXIT_FAILURE);
    };

    match interpreter.run_task(task, &mut ctx, &mut stdout)? {
        Outcome::Completed => Ok(0),
        Outcome::Exit(code) => Ok(code),
    }
}
