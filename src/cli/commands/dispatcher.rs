//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::error::Result;
use crate::preconditions::{HostSystem, SystemHost};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    host: Box<dyn HostSystem>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            host: Box::new(SystemHost::new()),
        }
    }

    /// Run commands against a different host.
    pub fn with_host(mut self, host: Box<dyn HostSystem>) -> Self {
        self.host = host;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let host = self.host.as_ref();
        match &cli.command {
            Some(Commands::Check(args)) => {
                let cmd = super::check::CheckCommand::new(
                    &self.project_root,
                    cli.config.as_deref(),
                    args.clone(),
                    host,
                );
                cmd.execute(ui)
            }
            Some(Commands::EnsurePackage(args)) => {
                let (_, options) =
                    super::check::load_run_config(&self.project_root, cli.config.as_deref())?;
                let cmd = super::package::EnsurePackageCommand::new(
                    args.clone(),
                    options.command_timeout(),
                    host,
                );
                cmd.execute(ui)
            }
            None => {
                // Default to check with default args
                let cmd = super::check::CheckCommand::new(
                    &self.project_root,
                    cli.config.as_deref(),
                    CheckArgs::default(),
                    host,
                );
                cmd.execute(ui)
            }
        }
    }
}
