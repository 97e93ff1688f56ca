//! The script interpreter
//!
//! An [`Interpreter`] owns everything a script defines. Independent
//! interpreters can load and run different scripts in one process.

use crate::error::{ExecutionResult, KmakError, LoadResult, Result};
use crate::runner::{Context, Outcome, TaskTable, VariableStore};
use crate::script::{read_script, Loader};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Variables and tasks of a loaded script
#[derive(Debug, Default)]
pub struct Interpreter {
    vars: VariableStore,
    tasks: TaskTable,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and load a script file
    pub fn load_file(&mut self, path: &Path, ctx: &Context) -> Result<()> {
        let text = read_script(path).map_err(|error| KmakError::InputFile {
            path: path.to_path_buf(),
            error,
        })?;

        self.load_str(path, &text, ctx)?;
        Ok(())
    }

    /// Load script text; `path` names it in errors and anchors includes
    pub fn load_str(&mut self, path: impl Into<PathBuf>, text: &str, ctx: &Context) -> LoadResult<()> {
        let path = path.into();
        Loader::new(&mut self.vars, &mut self.tasks, ctx).load_source(&path, text)
    }

    /// Run a task by name
    pub fn run_task(
        &self,
        name: &str,
        ctx: &mut Context,
        out: &mut dyn Write,
    ) -> ExecutionResult<Outcome> {
        self.tasks.run(name, ctx, out)
    }

    /// Names of the defined tasks in definition order
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.names()
    }

    pub fn variables(&self) -> &VariableStore {
        &self.vars
    }

    pub fn tasks(&self) -> &TaskTable {
        &self.tasks
    }
}
