//! Ensure-package command implementation.
//!
//! The `syncprep ensure-package` command makes a python module importable,
//! installing it with pip when it is not.

use crate::cli::args::EnsurePackageArgs;
use crate::error::Result;
use crate::preconditions::{HostSystem, PackageInstaller};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The ensure-package command implementation.
pub struct EnsurePackageCommand<'a> {
    args: EnsurePackageArgs,
    command_timeout: u64,
    host: &'a dyn HostSystem,
}

impl<'a> EnsurePackageCommand<'a> {
    /// Create a new ensure-package command.
    pub fn new(args: EnsurePackageArgs, command_timeout: u64, host: &'a dyn HostSystem) -> Self {
        Self {
            args,
            command_timeout,
            host,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &EnsurePackageArgs {
        &self.args
    }
}

impl Command for EnsurePackageCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        PackageInstaller::new(self.host)
            .with_command_timeout(self.command_timeout)
            .ensure_package(&self.args.package, self.args.import_test.as_deref(), ui)?;

        Ok(CommandResult::success())
    }
}
