//! Detection and removal of hand-installed legacy binaries.
//!
//! Before unox was packaged, it was installed by copying
//! `unison-fsmonitor` into `/usr/local/bin`. That copy shadows the
//! packaged one and must go before the package is installed.

use crate::error::{PreflightError, Result};
use crate::shell::CommandOptions;
use crate::ui::{Prompt, Severity, UserInterface};

use super::probe::CapabilityProbe;
use super::spec::LegacyArtifact;

/// Removes legacy artifacts that conflict with packaged installs.
pub struct LegacyResolver<'a> {
    probe: &'a CapabilityProbe<'a>,
    command_timeout: u64,
}

impl<'a> LegacyResolver<'a> {
    /// Create a resolver; uninstall commands are killed after
    /// `command_timeout` seconds.
    pub fn new(probe: &'a CapabilityProbe<'a>, command_timeout: u64) -> Self {
        Self {
            probe,
            command_timeout,
        }
    }

    /// Remove `artifact` if it conflicts, with the user's consent.
    ///
    /// There is a conflict only when the package manager does not record
    /// the package and the legacy path exists.
    ///
    /// # Errors
    ///
    /// `LegacyConflictUnresolved` if the user declines; the caller must
    /// stop the process. `InstallCommandFailed` if the uninstall command
    /// fails.
    pub fn resolve_legacy_conflict(
        &self,
        artifact: &LegacyArtifact,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        if self.probe.package_recorded(&artifact.package)? {
            return Ok(());
        }

        if !self.probe.host().path_exists(&artifact.path) {
            return Ok(());
        }

        let path = artifact.path.display();
        tracing::info!("Legacy {} found at {}", artifact.package, path);

        ui.announce(
            &format!(
                "You installed {} ({}) not using brew-method - the old legacy way. We need to fix that.",
                file_name(artifact),
                artifact.package
            ),
            Severity::Error,
        );
        ui.announce(&artifact.uninstall_command, Severity::Command);

        let prompt = Prompt::new(
            format!("uninstall_legacy_{}", artifact.package),
            format!("Should I uninstall the legacy {} for you?", path),
        );
        if !ui.confirm(&prompt)? {
            ui.announce(
                &format!("Uninstall {} manually please", path),
                Severity::Error,
            );
            return Err(PreflightError::LegacyConflictUnresolved {
                path: artifact.path.clone(),
            });
        }

        let result = self.probe.host().run_command(
            &artifact.uninstall_command,
            &CommandOptions::install(Some(self.command_timeout)),
        )?;

        if !result.success {
            tracing::warn!(
                "'{}' exited with {:?}",
                artifact.uninstall_command,
                result.exit_code
            );
            return Err(PreflightError::InstallCommandFailed {
                dependency: artifact.package.clone(),
                command: artifact.uninstall_command.clone(),
                code: result.exit_code,
                stderr: result.stderr,
            });
        }

        tracing::info!("Removed legacy {}", path);
        Ok(())
    }
}

fn file_name(artifact: &LegacyArtifact) -> String {
    artifact
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| artifact.path.display().to_string())
}
