//! Task table and task execution
//!
//! Tasks are built at load time and replayed here. Body lines were already
//! substituted while loading, so variables resolve to the values they had
//! when the task was read, not when it runs.

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{execute_command, Context};
use crate::script::{classify, Directive, RUN_DIRECTIVES};
use std::io::Write;

/// A task body line and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line number in the file that defined the task
    pub number: usize,
    /// Line text after comment stripping, trimming and substitution
    pub text: String,
}

/// A named sequence of body lines
#[derive(Debug, Clone)]
pub struct Task {
    pub name: String,

    /// Line number of the `task` header
    pub line_start: usize,

    pub body: Vec<Line>,
}

/// How a task run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every line ran
    Completed,
    /// An `exit` directive asked to stop with this status
    Exit(i32),
}

impl Task {
    pub fn new(name: impl Into<String>, line_start: usize) -> Self {
        Task {
            name: name.into(),
            line_start,
            body: Vec::new(),
        }
    }

    /// Body line texts in order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.body.iter().map(|line| line.text.as_str())
    }

    /// Execute the task, looking up `call` targets in `tasks`
    pub fn execute(
        &self,
        tasks: &TaskTable,
        ctx: &mut Context,
        out: &mut dyn Write,
    ) -> ExecutionResult<Outcome> {
        if ctx.call_depth() >= ctx.max_call_depth {
            return Err(ExecutionError::CallDepthExceeded(ctx.max_call_depth));
        }

        ctx.push_task(self.name.clone());
        ctx.print_task_start(&self.name);

        let result = self.execute_lines(tasks, ctx, out);

        ctx.pop_task();

        if result.is_ok() {
            ctx.print_task_complete(&self.name);
        }

        result
    }

    fn execute_lines(
        &self,
        tasks: &TaskTable,
        ctx: &mut Context,
        out: &mut dyn Write,
    ) -> ExecutionResult<Outcome> {
        for line in &self.body {
            if let Outcome::Exit(code) = self.execute_line(line, tasks, ctx, out)? {
                return Ok(Outcome::Exit(code));
            }
        }
        Ok(Outcome::Completed)
    }

    /// Execute a single body line; unrecognized lines are skipped
    fn execute_line(
        &self,
        line: &Line,
        tasks: &TaskTable,
        ctx: &mut Context,
        out: &mut dyn Write,
    ) -> ExecutionResult<Outcome> {
        match classify(&line.text, RUN_DIRECTIVES) {
            Some(Directive::Print(text)) => {
                writeln!(out, "{}", text)?;
            }
            Some(Directive::Call(name)) => {
                return tasks.run(name, ctx, out);
            }
            Some(Directive::Cmd(command)) => {
                // Keep our output ordered before the child's
                out.flush()?;
                execute_command(command, ctx)?;
            }
            Some(Directive::Exit(code)) => {
                ctx.print_info(&format!(
                    "kmak exited at line {} with error code {}",
                    line.number, code
                ));
                return Ok(Outcome::Exit(code));
            }
            _ => {}
        }
        Ok(Outcome::Completed)
    }
}

/// Tasks in definition order
///
/// Names need not be unique: lookups return the first task with a name,
/// later ones are kept but unreachable.
#[derive(Debug, Clone, Default)]
pub struct TaskTable {
    tasks: Vec<Task>,
}

impl TaskTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty task and return its index
    pub fn open(&mut self, name: impl Into<String>, line_start: usize) -> usize {
        self.tasks.push(Task::new(name, line_start));
        self.tasks.len() - 1
    }

    /// Append a body line to the task at `index`
    pub fn push_line(&mut self, index: usize, line: Line) {
        if let Some(task) = self.tasks.get_mut(index) {
            task.body.push(line);
        }
    }

    /// First task named `name`
    pub fn find(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.name == name)
    }

    /// Names of all tasks in definition order, duplicates included
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|task| task.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a task by name and execute it
    pub fn run(
        &self,
        name: &str,
        ctx: &mut Context,
        out: &mut dyn Write,
    ) -> ExecutionResult<Outcome> {
        let task = self
            .find(name)
            .ok_or_else(|| ExecutionError::TaskNotFound(name.to_string()))?;
        task.execute(self, ctx, out)
    }
}
