//! File loading and include resolution
//!
//! The loader walks a script line by line, substitutes variables and
//! dispatches load-time directives. Lines inside a task body are stored
//! in the task instead.

use crate::error::{LoadError, LoadErrorKind, LoadResult};
use crate::runner::{interpolate, Context, Line, TaskTable, VariableStore};
use crate::script::{
    classify, ends_task_body, strip_comment, trim_indent, Directive, LineSplitter, LOAD_DIRECTIVES,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read a script file
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
/// rejecting the whole file.
pub fn read_script(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// Where loading stood in an including file
#[derive(Debug, Clone)]
pub struct SavedPosition {
    pub path: PathBuf,
    pub line: usize,
}

/// Transient state of a load pass
#[derive(Debug, Clone, Default)]
pub struct LoadContext {
    /// File currently being read
    pub path: PathBuf,

    /// Number of the last line read from `path`
    pub line: usize,

    /// Index of the task whose body is being filled, if any
    pub current_task: Option<usize>,

    /// Positions of the including files, outermost first
    pub saved: Vec<SavedPosition>,
}

impl LoadContext {
    pub fn is_inside_task(&self) -> bool {
        self.current_task.is_some()
    }

    pub fn include_depth(&self) -> usize {
        self.saved.len()
    }
}

/// Fills a variable store and task table from script text
pub struct Loader<'a> {
    vars: &'a mut VariableStore,
    tasks: &'a mut TaskTable,
    ctx: &'a Context,
    state: LoadContext,
}

impl<'a> Loader<'a> {
    pub fn new(vars: &'a mut VariableStore, tasks: &'a mut TaskTable, ctx: &'a Context) -> Self {
        Loader {
            vars,
            tasks,
            ctx,
            state: LoadContext::default(),
        }
    }

    /// Load the text of `path`
    ///
    /// `path` is used for error messages and to resolve includes.
    pub fn load_source(&mut self, path: &Path, text: &str) -> LoadResult<()> {
        self.ctx
            .print_debug(&format!("Loading file: {}", path.display()));

        self.state.path = path.to_path_buf();
        self.state.line = 0;
        self.state.current_task = None;

        for raw in LineSplitter::lines(text) {
            self.state.line += 1;
            self.process_line(raw)?;
        }

        Ok(())
    }

    fn process_line(&mut self, raw: &str) -> LoadResult<()> {
        let line = strip_comment(raw);

        if self.state.is_inside_task() && ends_task_body(line) {
            self.state.current_task = None;
        }

        let line = interpolate(trim_indent(line), self.vars).map_err(|e| self.error(e.into()))?;

        if let Some(index) = self.state.current_task {
            self.tasks.push_line(
                index,
                Line {
                    number: self.state.line,
                    text: line,
                },
            );
            return Ok(());
        }

        // Anything else outside a task is ignored
        match classify(&line, LOAD_DIRECTIVES) {
            Some(Directive::Task(name)) => self.open_task(name),
            Some(Directive::Include(path)) => self.include(path),
            Some(Directive::Variable { name, value }) => self.define(name, value),
            _ => Ok(()),
        }
    }

    fn open_task(&mut self, name: &str) -> LoadResult<()> {
        if name.is_empty() {
            return Err(self.error(LoadErrorKind::MissingTaskName));
        }

        let index = self.tasks.open(name, self.state.line);
        self.state.current_task = Some(index);
        Ok(())
    }

    fn define(&mut self, name: &str, value: &str) -> LoadResult<()> {
        if name.is_empty() {
            return Err(self.error(LoadErrorKind::MalformedVariable));
        }

        self.vars.define(name, value);
        Ok(())
    }

    /// Load another file as if its lines appeared here
    fn include(&mut self, target: &str) -> LoadResult<()> {
        let max = self.ctx.max_include_depth;
        if self.state.include_depth() >= max {
            return Err(self.error(LoadErrorKind::IncludeDepthExceeded(max)));
        }

        let path = self.resolve(target);
        let text = read_script(&path).map_err(|error| {
            self.error(LoadErrorKind::Open {
                path: path.clone(),
                error,
            })
        })?;

        self.state.saved.push(SavedPosition {
            path: self.state.path.clone(),
            line: self.state.line,
        });

        let result = self.load_source(&path, &text);

        if let Some(saved) = self.state.saved.pop() {
            self.state.path = saved.path;
            self.state.line = saved.line;
        }
        // The including file continues at top level
        self.state.current_task = None;

        self.ctx
            .print_debug(&format!("Back in file: {}", self.state.path.display()));

        result
    }

    /// Resolve an include path against the including file's directory
    fn resolve(&self, target: &str) -> PathBuf {
        let target = Path::new(target);
        if target.is_absolute() {
            return target.to_path_buf();
        }
        match self.state.path.parent() {
            Some(dir) => dir.join(target),
            None => target.to_path_buf(),
        }
    }

    fn error(&self, kind: LoadErrorKind) -> LoadError {
        LoadError {
            path: self.state.path.clone(),
            line: self.state.line,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Verbosity;

    fn load(text: &str) -> (LoadResult<()>, VariableStore, TaskTable) {
        let mut vars = VariableStore::new();
        let mut tasks = TaskTable::new();
        let ctx = Context::new().with_verbosity(Verbosity::Silent);
        let result = Loader::new(&mut vars, &mut tasks, &ctx).load_source(Path::new("test.kmk"), text);
        (result, vars, tasks)
    }

    fn body(tasks: &TaskTable, name: &str) -> Vec<String> {
        tasks
            .find(name)
            .map(|task| task.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_variables_and_task() {
        let (result, vars, tasks) = load("greeting = hello\ntask hi\n  print $(greeting) world\n");
        assert!(result.is_ok());
        assert_eq!(vars.get("greeting"), Some("hello"));
        assert_eq!(body(&tasks, "hi"), vec!["print hello world"]);
    }

    #[test]
    fn test_task_body_ends_at_unindented_line() {
        let text = "task a\n  print 1\n\tprint 2\nx = 1\n  print 3\ntask b\n  print 4\n";
        let (result, vars, tasks) = load(text);
        assert!(result.is_ok());
        assert_eq!(body(&tasks, "a"), vec!["print 1", "print 2"]);
        assert_eq!(body(&tasks, "b"), vec!["print 4"]);
        assert_eq!(vars.get("x"), Some("1"));
    }

    #[test]
    fn test_blank_and_comment_lines_stay_in_body() {
        let text = "task a\n  print 1\n\n# note\n  print 2\nlater = x\n";
        let (_, vars, tasks) = load(text);
        assert_eq!(body(&tasks, "a"), vec!["print 1", "", "", "print 2"]);
        assert!(vars.contains("later"));
    }

    #[test]
    fn test_body_line_numbers() {
        let (_, _, tasks) = load("\ntask a\n  print 1\n  exit 2\n");
        let task = tasks.find("a").unwrap();
        assert_eq!(task.line_start, 2);
        let numbers: Vec<usize> = task.body.iter().map(|line| line.number).collect();
        assert_eq!(numbers, vec![3, 4]);
    }

    #[test]
    fn test_directives_inside_body_are_stored() {
        let (_, vars, tasks) = load("task a\n  cmd cc -DX=1 main.c\n");
        assert_eq!(body(&tasks, "a"), vec!["cmd cc -DX=1 main.c"]);
        assert!(vars.is_empty());
    }

    #[test]
    fn test_value_uses_earlier_variables() {
        let (result, vars, _) = load("base = /opt\nbin = $(base)/bin\n");
        assert!(result.is_ok());
        assert_eq!(vars.get("bin"), Some("/opt/bin"));
    }

    #[test]
    fn test_body_uses_values_at_load_time() {
        let (_, _, tasks) = load("v = early\ntask t\n  print $(v)\nv = late\n");
        assert_eq!(body(&tasks, "t"), vec!["print early"]);
    }

    #[test]
    fn test_undefined_variable_reports_line() {
        let (result, _, _) = load("a = 1\n\ntask t\n  print $(missing)\n");
        let err = result.unwrap_err();
        assert_eq!(err.line, 4);
        assert!(matches!(err.kind, LoadErrorKind::UndefinedVariable(ref name) if name == "missing"));
    }

    #[test]
    fn test_unterminated_reference_reports_line() {
        let (result, _, _) = load("a = 1\nb = $(a\n");
        let err = result.unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(err.kind, LoadErrorKind::UnterminatedVariable));
    }

    #[test]
    fn test_commented_reference_is_ignored() {
        let (result, _, _) = load("a = 1 # $(nothing\n");
        assert!(result.is_ok());
    }

    #[test]
    fn test_missing_task_name() {
        let (result, _, _) = load("task\n");
        assert!(matches!(result.unwrap_err().kind, LoadErrorKind::MissingTaskName));
    }

    #[test]
    fn test_empty_variable_name() {
        let (result, _, _) = load(" = 3\n");
        assert!(matches!(result.unwrap_err().kind, LoadErrorKind::MalformedVariable));
    }

    #[test]
    fn test_unmatched_top_level_lines_are_ignored() {
        let (result, vars, tasks) = load("print not in a task\nrandom words\n");
        assert!(result.is_ok());
        assert!(vars.is_empty());
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_read_script_accepts_invalid_utf8() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.kmk");
        fs::write(&path, b"task t\n  print caf\xe9\n").unwrap();

        let text = read_script(&path).unwrap();
        assert_eq!(text, "task t\n  print caf\u{fffd}\n");
    }

    #[test]
    fn test_include_with_invalid_utf8() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        fs::write(temp_dir.path().join("inc.kmk"), b"# caf\xe9\nfrom_inc = yes\n").unwrap();

        let mut vars = VariableStore::new();
        let mut tasks = TaskTable::new();
        let ctx = Context::new().with_verbosity(Verbosity::Silent);
        let result = Loader::new(&mut vars, &mut tasks, &ctx)
            .load_source(&temp_dir.path().join("main.kmk"), "include inc.kmk\n");

        assert!(result.is_ok());
        assert_eq!(vars.get("from_inc"), Some("yes"));
    }

    #[test]
    fn test_missing_include() {
        let (result, _, _) = load("\ninclude does-not-exist.kmk\n");
        let err = result.unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(err.kind, LoadErrorKind::Open { .. }));
    }
}
