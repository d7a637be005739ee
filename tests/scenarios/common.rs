//! Common test utilities for scenario tests.

use docargs::{Arguments, Callable, CommandSet, Value};
use std::path::PathBuf;
use std::process::Command;
use std::sync::{Arc, Mutex};

/// Records handler calls as (command name, arguments).
#[derive(Clone, Default)]
pub struct Calls(Arc<Mutex<Vec<(String, Arguments)>>>);

impl Calls {
    /// Declares a callable whose handler records its arguments.
    pub fn callable(&self, decl: &str, doc: &str) -> Callable {
        let calls = self.0.clone();
        let name = decl.split('(').next().unwrap_or_default().to_string();
        Callable::declare(decl, move |args| {
            calls.lock().unwrap().push((name.clone(), args.clone()));
            Ok(Value::None)
        })
        .unwrap()
        .doc(doc)
    }

    /// Returns every recorded call.
    pub fn all(&self) -> Vec<(String, Arguments)> {
        self.0.lock().unwrap().clone()
    }

    /// Returns the single recorded call, panicking otherwise.
    pub fn only(&self) -> (String, Arguments) {
        let calls = self.all();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls.into_iter().next().unwrap()
    }
}

/// The git example with documented parameters.
pub struct GitClone {
    pub calls: Calls,
}

impl CommandSet for GitClone {
    fn doc(&self) -> Option<&str> {
        Some("A git clone")
    }

    fn members(&self) -> docargs::Result<Vec<Callable>> {
        Ok(vec![
            self.calls.callable(
                "clone(self, src, _dest)",
                "
                Clone a repository
                :param src: the repository to clone
                :param _dest: the destination for cloning
                ",
            ),
            self.calls.callable(
                "commit(self, a=False, m=None, amend=False)",
                "
                Commit a change to the index
                :param a: Add all modified flags to the index
                :param amend: Amend the last commit
                ",
            ),
            self.calls.callable("_bottom(self, c, d)", "Not exposed"),
        ])
    }
}

/// Returns the path to the docargs-git binary built alongside the tests.
pub fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_docargs-git"))
}

/// Runs docargs-git with the given arguments and an isolated config path.
pub fn run_git(args: &[&str], config: Option<&str>) -> (i32, String, String) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = dir.path().join("config.toml");
    if let Some(contents) = config {
        std::fs::write(&config_path, contents).expect("Failed to write config");
    }

    let output = Command::new(binary_path())
        .args(args)
        .env("DOCARGS_CONFIG", &config_path)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}
