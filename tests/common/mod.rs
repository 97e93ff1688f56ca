//! Common test utilities
#![allow(dead_code)]

use kmak::runner::{Context, Outcome, Verbosity};
use kmak::Interpreter;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory with a build.kmk script
pub fn create_test_script(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let script_path = temp_dir.path().join("build.kmk");
    fs::write(&script_path, content).unwrap();
    (temp_dir, script_path)
}

/// Write an extra file next to the test script
pub fn add_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// A context that prints no diagnostics
pub fn silent_context() -> Context {
    Context::new().with_verbosity(Verbosity::Silent)
}

/// Load `content` and run `task`, returning the result and captured output
pub fn run_script(content: &str, task: &str) -> (kmak::Result<Outcome>, String) {
    let (temp_dir, script_path) = create_test_script(content);
    let mut ctx = silent_context().with_working_dir(temp_dir.path().to_path_buf());
    let mut interpreter = Interpreter::new();
    let mut out = Vec::new();

    let result = interpreter
        .load_file(&script_path, &ctx)
        .and_then(|()| Ok(interpreter.run_task(task, &mut ctx, &mut out)?));

    (result, String::from_utf8(out).unwrap())
}
