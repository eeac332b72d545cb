//! Scripted host for tests.
//!
//! `FakeHost` implements [`HostSystem`] from an in-memory description of
//! the machine and records every call so tests can assert on what was
//! probed and what was executed.
//!
//! # Example
//!
//! ```
//! use syncprep::preconditions::{FakeHost, FakeResponse, HostSystem};
//! use syncprep::shell::CommandOptions;
//!
//! let host = FakeHost::new()
//!     .with_executable("brew")
//!     .on_command("brew install rsync", FakeResponse::ok().installs("rsync"));
//!
//! assert!(host.executable_on_path("rsync").is_none());
//! host.run_command("brew install rsync", &CommandOptions::install(None)).unwrap();
//! assert!(host.executable_on_path("rsync").is_some());
//! assert_eq!(host.commands_run(), ["brew install rsync"]);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PreflightError, Result};
use crate::shell::{CommandOptions, CommandResult};

use super::host::HostSystem;

/// Exit code returned for commands the fake has no script for.
pub const UNSCRIPTED_EXIT_CODE: i32 = 127;

/// Directory executables resolve to unless placed elsewhere.
pub const DEFAULT_BIN_DIR: &str = "/usr/local/bin";

/// Scripted result of one command.
#[derive(Debug, Clone, Default)]
pub struct FakeResponse {
    exit_code: i32,
    stderr: String,
    timed_out: bool,
    spawn_error: bool,
    adds_executables: Vec<String>,
    removes_paths: Vec<PathBuf>,
    enables_commands: Vec<String>,
}

impl FakeResponse {
    /// Command exits 0.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Command exits with `code`.
    pub fn exit(code: i32) -> Self {
        Self {
            exit_code: code,
            ..Default::default()
        }
    }

    /// Command is killed on timeout.
    pub fn timeout() -> Self {
        Self {
            timed_out: true,
            ..Default::default()
        }
    }

    /// The shell itself cannot be started.
    pub fn spawn_error() -> Self {
        Self {
            spawn_error: true,
            ..Default::default()
        }
    }

    /// Command writes `stderr`.
    pub fn with_stderr(mut self, stderr: &str) -> Self {
        self.stderr = stderr.to_string();
        self
    }

    /// A successful run puts `executable` on the path.
    pub fn installs(mut self, executable: &str) -> Self {
        self.adds_executables.push(executable.to_string());
        self
    }

    /// A successful run deletes `path`.
    pub fn removes(mut self, path: impl Into<PathBuf>) -> Self {
        self.removes_paths.push(path.into());
        self
    }

    /// A successful run makes `command` succeed from then on.
    pub fn enables(mut self, command: &str) -> Self {
        self.enables_commands.push(command.to_string());
        self
    }
}

/// One recorded interaction with the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// A command was run.
    Run(String),
    /// An executable was looked up.
    Lookup(String),
    /// A path was checked.
    Exists(PathBuf),
}

/// In-memory host with scripted commands.
#[derive(Debug, Default)]
pub struct FakeHost {
    executables: RefCell<HashMap<String, PathBuf>>,
    paths: RefCell<HashSet<PathBuf>>,
    responses: RefCell<HashMap<String, FakeResponse>>,
    calls: RefCell<Vec<HostCall>>,
}

impl FakeHost {
    /// Create an empty host: nothing installed, every command unscripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an executable on the path at `/usr/local/bin/<name>`.
    pub fn with_executable(self, name: &str) -> Self {
        let path = PathBuf::from(DEFAULT_BIN_DIR).join(name);
        self.with_executable_at(name, path)
    }

    /// Put an executable on the path that resolves to `path`.
    pub fn with_executable_at(self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.executables
            .borrow_mut()
            .insert(name.to_string(), path.into());
        self
    }

    /// Create a filesystem path.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        self.paths.borrow_mut().insert(path.into());
        self
    }

    /// Script the response to an exact command string.
    pub fn on_command(self, command: &str, response: FakeResponse) -> Self {
        self.responses
            .borrow_mut()
            .insert(command.to_string(), response);
        self
    }

    /// All recorded calls in order.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    /// Commands run, in order.
    pub fn commands_run(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                HostCall::Run(cmd) => Some(cmd.clone()),
                _ => None,
            })
            .collect()
    }

    /// Executables looked up, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                HostCall::Lookup(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether `command` was run at least once.
    pub fn ran(&self, command: &str) -> bool {
        self.commands_run().iter().any(|c| c == command)
    }

    /// Whether anything about `name` was asked: a lookup or a command
    /// mentioning it.
    pub fn touched(&self, name: &str) -> bool {
        self.calls.borrow().iter().any(|c| match c {
            HostCall::Run(cmd) => cmd.contains(name),
            HostCall::Lookup(exe) => exe == name,
            HostCall::Exists(path) => path.to_string_lossy().contains(name),
        })
    }
}

impl HostSystem for FakeHost {
    fn run_command(&self, command: &str, _options: &CommandOptions) -> Result<CommandResult> {
        self.calls.borrow_mut().push(HostCall::Run(command.to_string()));

        let Some(response) = self.responses.borrow().get(command).cloned() else {
            return Ok(CommandResult::failure(
                Some(UNSCRIPTED_EXIT_CODE),
                String::new(),
                format!("sh: {}: command not found", command),
                Duration::ZERO,
            ));
        };

        if response.spawn_error {
            return Err(PreflightError::InfrastructureUnavailable {
                command: command.to_string(),
                message: "scripted spawn failure".to_string(),
            });
        }

        if response.timed_out {
            return Ok(CommandResult::timeout(
                String::new(),
                response.stderr.clone(),
                Duration::ZERO,
            ));
        }

        if response.exit_code != 0 {
            return Ok(CommandResult::failure(
                Some(response.exit_code),
                String::new(),
                response.stderr.clone(),
                Duration::ZERO,
            ));
        }

        self.executables.borrow_mut().extend(
            response
                .adds_executables
                .iter()
                .map(|name| (name.clone(), PathBuf::from(DEFAULT_BIN_DIR).join(name))),
        );
        let mut paths = self.paths.borrow_mut();
        for path in &response.removes_paths {
            paths.remove(path);
        }
        let mut responses = self.responses.borrow_mut();
        for enabled in &response.enables_commands {
            responses.insert(enabled.clone(), FakeResponse::ok());
        }

        Ok(CommandResult::success(
            String::new(),
            response.stderr.clone(),
            Duration::ZERO,
        ))
    }

    fn executable_on_path(&self, name: &str) -> Option<PathBuf> {
        self.calls.borrow_mut().push(HostCall::Lookup(name.to_string()));
        self.executables.borrow().get(name).cloned()
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.calls
            .borrow_mut()
            .push(HostCall::Exists(path.to_path_buf()));
        self.paths.borrow().contains(path)
    }
}
