//! Interactive remediation of a single missing dependency.
//!
//! The flow is detect, announce, confirm, install, re-verify. A
//! remediation command is never run without a "yes" from the user, and a
//! failed attempt is never retried.

use crate::error::{PreflightError, Result};
use crate::shell::CommandOptions;
use crate::ui::{Prompt, Severity, UserInterface};

use super::probe::CapabilityProbe;
use super::spec::{PreconditionSpec, RemediationOutcome};

/// Offers and runs install commands for missing dependencies.
pub struct Remediator<'a> {
    probe: &'a CapabilityProbe<'a>,
    command_timeout: u64,
}

impl<'a> Remediator<'a> {
    /// Create a remediator; install commands are killed after
    /// `command_timeout` seconds.
    pub fn new(probe: &'a CapabilityProbe<'a>, command_timeout: u64) -> Self {
        Self {
            probe,
            command_timeout,
        }
    }

    /// Make sure `spec` is satisfied, offering to install it if not.
    ///
    /// Calling this on a present dependency is a no-op that returns
    /// [`RemediationOutcome::Skipped`].
    ///
    /// # Errors
    ///
    /// `MissingDependency` if the dependency is absent and has no install
    /// command; `InfrastructureUnavailable` if a probe or the install
    /// command cannot be started.
    pub fn remediate(
        &self,
        spec: &PreconditionSpec,
        ui: &mut dyn UserInterface,
    ) -> Result<RemediationOutcome> {
        if self.probe.detect(&spec.detect)? {
            tracing::debug!("{} present, nothing to do", spec.name);
            return Ok(RemediationOutcome::Skipped);
        }

        let Some(command) = spec.remediation_command.as_deref() else {
            return Err(PreflightError::MissingDependency {
                dependency: spec.name.clone(),
                hint: spec.failure_message.clone(),
            });
        };

        ui.announce(
            &format!("{}. Trying to install now", spec.failure_message),
            Severity::Warning,
        );
        ui.announce(command, Severity::Command);

        let prompt = Prompt::new(
            spec.prompt_key(),
            format!("I will install {} for you, continue?", spec.name),
        );
        if !ui.confirm(&prompt)? {
            tracing::info!("Declined to install {}", spec.name);
            return Ok(RemediationOutcome::UserDeclined);
        }

        tracing::info!("Installing {}: {}", spec.name, command);
        let result = self.probe.host().run_command(
            command,
            &CommandOptions::install(Some(self.command_timeout)),
        )?;

        if result.timed_out {
            tracing::warn!(
                "'{}' timed out after {}s",
                command,
                self.command_timeout
            );
            return Ok(RemediationOutcome::InstallCommandFailed {
                code: None,
                stderr: format!(
                    "timed out after {}s\n{}",
                    self.command_timeout, result.stderr
                ),
            });
        }

        if !result.success {
            tracing::warn!("'{}' exited with {:?}", command, result.exit_code);
            return Ok(RemediationOutcome::InstallCommandFailed {
                code: result.exit_code,
                stderr: result.stderr,
            });
        }

        if !self.probe.detect(spec.verification())? {
            tracing::warn!(
                "{} still not detected after install ({})",
                spec.name,
                spec.verification()
            );
            return Ok(RemediationOutcome::InstallFailedVerification);
        }

        ui.announce(&format!("Installed {}", spec.name), Severity::Ok);
        Ok(RemediationOutcome::InstallSucceeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_COMMAND_TIMEOUT;
    use crate::preconditions::catalog;
    use crate::preconditions::fake::{FakeHost, FakeResponse};
    use crate::ui::MockUI;

    fn remediate(host: &FakeHost, spec: &PreconditionSpec, ui: &mut MockUI) -> Result<RemediationOutcome> {
        let probe = CapabilityProbe::new(host);
        Remediator::new(&probe, DEFAULT_COMMAND_TIMEOUT).remediate(spec, ui)
    }

    #[test]
    fn present_dependency_is_skipped_every_time() {
        let host = FakeHost::new().with_executable("unison");
        let mut ui = MockUI::new();
        let spec = catalog::unison();

        assert_eq!(
            remediate(&host, &spec, &mut ui).unwrap(),
            RemediationOutcome::Skipped
        );
        assert_eq!(
            remediate(&host, &spec, &mut ui).unwrap(),
            RemediationOutcome::Skipped
        );
        assert!(host.commands_run().is_empty());
        assert!(ui.prompts_shown().is_empty());
        assert!(ui.announcements().is_empty());
    }

    #[test]
    fn declining_runs_nothing() {
        let host = FakeHost::new()
            .on_command("brew install unison", FakeResponse::ok().installs("unison"));
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_unison", "no");

        let outcome = remediate(&host, &catalog::unison(), &mut ui).unwrap();

        assert_eq!(outcome, RemediationOutcome::UserDeclined);
        assert!(host.commands_run().is_empty());
        assert_eq!(ui.prompts_shown(), ["install_unison"]);
        assert!(ui.has_warning("Could not find unison binary"));
        assert!(ui.has_command("brew install unison"));
    }

    #[test]
    fn unanswered_prompt_defaults_to_no() {
        let host = FakeHost::new();
        let mut ui = MockUI::new();

        let outcome = remediate(&host, &catalog::fswatch(), &mut ui).unwrap();

        assert_eq!(outcome, RemediationOutcome::UserDeclined);
        assert!(host.commands_run().is_empty());
    }

    #[test]
    fn accepted_install_is_verified() {
        let host = FakeHost::new()
            .on_command("brew install rsync", FakeResponse::ok().installs("rsync"));
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_rsync", "yes");

        let outcome = remediate(&host, &catalog::rsync(), &mut ui).unwrap();

        assert_eq!(outcome, RemediationOutcome::InstallSucceeded);
        assert_eq!(host.commands_run(), ["brew install rsync"]);
        // detect, then verify
        assert_eq!(host.lookups(), ["rsync", "rsync"]);
        assert!(ui.messages_at(Severity::Ok).contains(&"Installed rsync"));
    }

    #[test]
    fn failing_command_reports_exit_code_and_stderr() {
        let host = FakeHost::new().on_command(
            "brew install rsync",
            FakeResponse::exit(1).with_stderr("Error: permission denied"),
        );
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_rsync", "yes");

        let outcome = remediate(&host, &catalog::rsync(), &mut ui).unwrap();

        assert_eq!(
            outcome,
            RemediationOutcome::InstallCommandFailed {
                code: Some(1),
                stderr: "Error: permission denied".into(),
            }
        );
        // No re-verification and no retry.
        assert_eq!(host.lookups(), ["rsync"]);
        assert_eq!(host.commands_run().len(), 1);
    }

    #[test]
    fn timed_out_command_fails_without_code() {
        let host = FakeHost::new().on_command("brew install unison", FakeResponse::timeout());
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_unison", "yes");

        let probe = CapabilityProbe::new(&host);
        let outcome = Remediator::new(&probe, 5)
            .remediate(&catalog::unison(), &mut ui)
            .unwrap();

        match outcome {
            RemediationOutcome::InstallCommandFailed { code, stderr } => {
                assert_eq!(code, None);
                assert!(stderr.contains("timed out after 5s"));
            }
            other => panic!("Expected InstallCommandFailed, got {:?}", other),
        }
    }

    #[test]
    fn successful_command_without_result_fails_verification() {
        let host = FakeHost::new().on_command("brew install fswatch", FakeResponse::ok());
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_fswatch", "yes");

        let outcome = remediate(&host, &catalog::fswatch(), &mut ui).unwrap();

        assert_eq!(outcome, RemediationOutcome::InstallFailedVerification);
    }

    #[test]
    fn absent_dependency_without_command_is_missing() {
        let host = FakeHost::new().on_command("docker ps", FakeResponse::exit(1));
        let mut ui = MockUI::new();

        let err = remediate(&host, &catalog::docker_daemon(), &mut ui).unwrap_err();

        assert!(matches!(err, PreflightError::MissingDependency { .. }));
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn package_recorded_dependency_reprobes_package_manager() {
        let host = FakeHost::new();
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_unox", "yes");

        // Unscripted install fails with 127.
        let outcome = remediate(&host, &catalog::unox(), &mut ui).unwrap();

        assert!(matches!(
            outcome,
            RemediationOutcome::InstallCommandFailed { code: Some(127), .. }
        ));
        assert_eq!(host.commands_run()[0], "brew list unox");
    }
}
