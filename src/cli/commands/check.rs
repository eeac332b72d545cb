//! Check command implementation.
//!
//! The `syncprep check` command verifies the host tools the sync
//! configuration needs and offers to install whatever is missing.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::config::{
    load_config, load_global_options, SyncConfig, SyncModeRequirements, SyncOptions,
};
use crate::error::Result;
use crate::preconditions::{HostSystem, PreconditionEngine};
use crate::ui::{Severity, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand<'a> {
    project_root: PathBuf,
    config: Option<PathBuf>,
    args: CheckArgs,
    host: &'a dyn HostSystem,
}

impl<'a> CheckCommand<'a> {
    /// Create a new check command.
    pub fn new(
        project_root: &Path,
        config: Option<&Path>,
        args: CheckArgs,
        host: &'a dyn HostSystem,
    ) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: config.map(Path::to_path_buf),
            args,
            host,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Requirements from the config plus the forcing flags.
    fn requirements(&self, config: Option<&SyncConfig>) -> SyncModeRequirements {
        config
            .map(SyncConfig::requirements)
            .unwrap_or_default()
            .with_forced(self.args.unison, self.args.rsync)
    }
}

/// Load the project config and the effective run options.
///
/// Project options win over the user global file.
pub(crate) fn load_run_config(
    project_root: &Path,
    config: Option<&Path>,
) -> Result<(Option<SyncConfig>, SyncOptions)> {
    let global = load_global_options()?;
    let project = load_config(project_root, config)?;
    let options = match &project {
        Some(c) => c.options.clone().or(&global),
        None => global,
    };
    Ok((project, options))
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (config, options) = load_run_config(&self.project_root, self.config.as_deref())?;
        let requirements = self.requirements(config.as_ref());
        tracing::debug!("Requirements: {:?}, options: {:?}", requirements, options);

        PreconditionEngine::new(self.host)
            .with_options(options)
            .check_all(&requirements, ui)?;

        ui.announce("All preconditions satisfied", Severity::Ok);
        Ok(CommandResult::success())
    }
}
