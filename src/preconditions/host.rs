//! Host process execution and filesystem queries.
//!
//! [`HostSystem`] is the seam between the precondition logic and the real
//! machine. Production code uses [`SystemHost`]; tests use
//! [`FakeHost`](super::fake::FakeHost).

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::shell::{self, CommandOptions, CommandResult};

/// Operations the precondition logic needs from the host.
pub trait HostSystem {
    /// Run a shell command to completion (or timeout).
    ///
    /// Only fails when the command could not be started at all.
    fn run_command(&self, command: &str, options: &CommandOptions) -> Result<CommandResult>;

    /// Resolve a named executable on the search path.
    fn executable_on_path(&self, name: &str) -> Option<PathBuf>;

    /// Whether a filesystem path exists.
    fn path_exists(&self, path: &Path) -> bool;
}

/// The real host: `/bin/sh` for commands, `PATH` for lookups.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl SystemHost {
    /// Create a host backed by the running system.
    pub fn new() -> Self {
        Self
    }
}

impl HostSystem for SystemHost {
    fn run_command(&self, command: &str, options: &CommandOptions) -> Result<CommandResult> {
        shell::execute(command, options)
    }

    fn executable_on_path(&self, name: &str) -> Option<PathBuf> {
        shell::resolve_tool_path(name, &shell::parse_system_path())
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_host_runs_commands() {
        let host = SystemHost::new();
        let result = host
            .run_command("exit 0", &CommandOptions::probe(None))
            .unwrap();
        assert!(result.success);
    }

    #[test]
    fn system_host_misses_unknown_executable() {
        let host = SystemHost::new();
        assert!(host
            .executable_on_path("this-command-does-not-exist-12345")
            .is_none());
    }

    #[test]
    fn system_host_checks_paths() {
        let temp = tempfile::TempDir::new().unwrap();
        let host = SystemHost::new();
        assert!(host.path_exists(temp.path()));
        assert!(!host.path_exists(&temp.path().join("missing")));
    }
}
