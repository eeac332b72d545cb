//! The full precondition run.
//!
//! # Example
//!
//! ```
//! use syncprep::config::SyncModeRequirements;
//! use syncprep::preconditions::{FakeHost, FakeResponse, PreconditionEngine};
//! use syncprep::ui::MockUI;
//!
//! let host = FakeHost::new()
//!     .with_executable("brew")
//!     .with_executable("docker")
//!     .on_command("docker ps", FakeResponse::ok());
//! let mut ui = MockUI::new();
//!
//! PreconditionEngine::new(&host)
//!     .check_all(&SyncModeRequirements::none(), &mut ui)
//!     .unwrap();
//! ```

use crate::config::{SyncModeRequirements, SyncOptions};
use crate::error::{PreflightError, Result};
use crate::ui::{Severity, UserInterface};

use super::catalog;
use super::host::HostSystem;
use super::legacy::LegacyResolver;
use super::probe::CapabilityProbe;
use super::remediation::Remediator;
use super::spec::PreconditionSpec;

/// Shown when the host has no package manager and nothing is checked.
pub const NO_PACKAGE_MANAGER_NOTICE: &str =
    "Not running any precondition checks since you have no brew and that is unsupported. It is all up to you now.";

/// Runs every check a sync configuration needs, in order.
pub struct PreconditionEngine<'a> {
    host: &'a dyn HostSystem,
    options: SyncOptions,
}

impl<'a> PreconditionEngine<'a> {
    /// Create an engine with default timeouts.
    pub fn new(host: &'a dyn HostSystem) -> Self {
        Self {
            host,
            options: SyncOptions::default(),
        }
    }

    /// Use these timeouts.
    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// Verify (and offer to fix) everything `requirements` needs.
    ///
    /// Without a package manager nothing is checked and this succeeds.
    /// Otherwise the first unsatisfied check aborts the run.
    ///
    /// # Errors
    ///
    /// `MissingDependency` for a gap that cannot be installed,
    /// `UserDeclinedRemediation` when the user refuses a fix,
    /// `InstallCommandFailed` / `InstallFailedVerification` when a fix
    /// does not work, and the fatal `LegacyConflictUnresolved`.
    pub fn check_all(
        &self,
        requirements: &SyncModeRequirements,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let probe =
            CapabilityProbe::new(self.host).with_daemon_timeout(self.options.daemon_timeout());

        if !probe.package_manager_present()? {
            tracing::info!("No package manager found, skipping all checks");
            ui.announce(NO_PACKAGE_MANAGER_NOTICE, Severity::Info);
            return Ok(());
        }

        let command_timeout = self.options.command_timeout();
        let remediator = Remediator::new(&probe, command_timeout);
        let legacy = LegacyResolver::new(&probe, command_timeout);

        let checks = catalog::checks_for(requirements);
        tracing::debug!(
            "Running {} checks (unison: {}, rsync: {})",
            checks.len(),
            requirements.unison_required,
            requirements.rsync_required
        );

        for spec in &checks {
            check_one(spec, &probe, &remediator, &legacy, ui)?;
        }

        Ok(())
    }
}

fn check_one(
    spec: &PreconditionSpec,
    probe: &CapabilityProbe<'_>,
    remediator: &Remediator<'_>,
    legacy: &LegacyResolver<'_>,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    tracing::debug!("Checking {}", spec.name);

    if !spec.is_remediable() {
        if probe.detect(&spec.detect)? {
            return Ok(());
        }
        tracing::warn!("{} unavailable and cannot be installed", spec.name);
        return Err(PreflightError::MissingDependency {
            dependency: spec.name.clone(),
            hint: spec.failure_message.clone(),
        });
    }

    if let Some(artifact) = &spec.legacy {
        legacy.resolve_legacy_conflict(artifact, ui)?;
    }

    let outcome = remediator.remediate(spec, ui)?;
    tracing::debug!("{}: {:?}", spec.name, outcome);
    outcome.into_result(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preconditions::catalog::LEGACY_UNOX_PATH;
    use crate::preconditions::fake::{FakeHost, FakeResponse};
    use crate::ui::MockUI;

    const UNOX_INSTALL: &str =
        "brew tap eugenmayer/dockersync && brew install eugenmayer/dockersync/unox";

    fn healthy_docker() -> FakeHost {
        FakeHost::new()
            .with_executable("brew")
            .with_executable("docker")
            .on_command("docker ps", FakeResponse::ok())
    }

    fn unison_only() -> SyncModeRequirements {
        SyncModeRequirements::none().with_forced(true, false)
    }

    fn rsync_only() -> SyncModeRequirements {
        SyncModeRequirements::none().with_forced(false, true)
    }

    #[test]
    fn no_sync_tools_checks_docker_and_daemon_only() {
        let host = healthy_docker();
        let mut ui = MockUI::new();

        PreconditionEngine::new(&host)
            .check_all(&SyncModeRequirements::none(), &mut ui)
            .unwrap();

        assert_eq!(host.lookups(), ["brew", "docker"]);
        assert_eq!(host.commands_run(), ["docker ps"]);
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn no_package_manager_skips_everything() {
        let host = FakeHost::new();
        let mut ui = MockUI::new();

        PreconditionEngine::new(&host)
            .check_all(&SyncModeRequirements::none().with_forced(true, true), &mut ui)
            .unwrap();

        assert!(ui.has_info("Not running any precondition checks"));
        assert_eq!(host.lookups(), ["brew"]);
        assert!(host.commands_run().is_empty());
    }

    #[test]
    fn daemon_unreachable_is_fatal_message_without_remediation() {
        let host = FakeHost::new()
            .with_executable("brew")
            .with_executable("docker")
            .on_command("docker ps", FakeResponse::exit(1));
        let mut ui = MockUI::new();

        let err = PreconditionEngine::new(&host)
            .check_all(&unison_only(), &mut ui)
            .unwrap_err();

        match err {
            PreflightError::MissingDependency { dependency, hint } => {
                assert_eq!(dependency, "docker daemon");
                assert_eq!(
                    hint,
                    "No docker daemon seems to be running. Did you start your docker-for-mac / docker-machine?"
                );
            }
            other => panic!("Expected MissingDependency, got {:?}", other),
        }
        assert!(ui.prompts_shown().is_empty());
        assert_eq!(host.commands_run(), ["docker ps"]);
        assert!(!host.touched("unison"));
    }

    #[test]
    fn missing_docker_declined_stops_before_daemon() {
        let host = FakeHost::new().with_executable("brew");
        let mut ui = MockUI::new();

        let err = PreconditionEngine::new(&host)
            .check_all(&SyncModeRequirements::none(), &mut ui)
            .unwrap_err();

        assert_eq!(err.dependency(), Some("docker"));
        assert!(!host.ran("docker ps"));
    }

    #[test]
    fn declined_unison_stops_run() {
        let host = healthy_docker();
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_unison", "no");

        let err = PreconditionEngine::new(&host)
            .check_all(&unison_only(), &mut ui)
            .unwrap_err();

        assert!(matches!(
            &err,
            PreflightError::UserDeclinedRemediation { dependency, hint }
                if dependency == "unison" && hint.contains("brew install unison")
        ));
        assert!(!host.ran("brew install unison"));
        assert!(!host.touched("unox"));
        assert!(!host.touched("rsync"));
        assert!(!host.touched("fswatch"));
    }

    #[test]
    fn installed_rsync_moves_on_to_fswatch() {
        let host = healthy_docker()
            .with_executable("fswatch")
            .on_command("brew install rsync", FakeResponse::ok().installs("rsync"));
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_rsync", "yes");

        PreconditionEngine::new(&host)
            .check_all(&rsync_only(), &mut ui)
            .unwrap();

        assert_eq!(
            host.lookups(),
            ["brew", "docker", "rsync", "rsync", "fswatch"]
        );
        assert_eq!(host.commands_run(), ["docker ps", "brew install rsync"]);
        assert_eq!(ui.prompts_shown(), ["install_rsync"]);
        assert!(!host.touched("unison"));
    }

    #[test]
    fn legacy_conflict_resolved_before_unox_install() {
        let host = healthy_docker()
            .with_executable("unison")
            .with_path(LEGACY_UNOX_PATH)
            .on_command(
                "sudo rm /usr/local/bin/unison-fsmonitor",
                FakeResponse::ok().removes(LEGACY_UNOX_PATH),
            )
            .on_command(UNOX_INSTALL, FakeResponse::ok().enables("brew list unox"));
        let mut ui = MockUI::new();
        ui.set_default_prompt_response("yes");

        PreconditionEngine::new(&host)
            .check_all(&unison_only(), &mut ui)
            .unwrap();

        assert_eq!(
            host.commands_run(),
            [
                "docker ps",
                "brew list unox",
                "sudo rm /usr/local/bin/unison-fsmonitor",
                "brew list unox",
                UNOX_INSTALL,
                "brew list unox",
            ]
        );
        assert_eq!(
            ui.prompts_shown(),
            ["uninstall_legacy_unox", "install_unox"]
        );
    }

    #[test]
    fn declined_legacy_removal_is_fatal_and_skips_install() {
        let host = healthy_docker()
            .with_executable("unison")
            .with_path(LEGACY_UNOX_PATH);
        let mut ui = MockUI::new();
        ui.set_prompt_response("uninstall_legacy_unox", "no");
        ui.set_prompt_response("install_unox", "yes");

        let err = PreconditionEngine::new(&host)
            .check_all(&unison_only(), &mut ui)
            .unwrap_err();

        assert!(err.is_fatal());
        assert!(!host.ran(UNOX_INSTALL));
        assert_eq!(ui.prompts_shown(), ["uninstall_legacy_unox"]);
    }

    #[test]
    fn everything_present_passes_silently() {
        let host = healthy_docker()
            .with_executable("unison")
            .with_executable("rsync")
            .with_executable("fswatch")
            .on_command("brew list unox", FakeResponse::ok());
        let mut ui = MockUI::new();

        PreconditionEngine::new(&host)
            .check_all(&SyncModeRequirements::none().with_forced(true, true), &mut ui)
            .unwrap();

        assert!(ui.announcements().is_empty());
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn failed_install_aborts_with_stderr() {
        let host = healthy_docker().on_command(
            "brew install unison",
            FakeResponse::exit(1).with_stderr("Error: No such keg"),
        );
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_unison", "yes");

        let err = PreconditionEngine::new(&host)
            .check_all(&unison_only(), &mut ui)
            .unwrap_err();

        assert!(err.to_string().contains("No such keg"));
        assert!(!host.touched("unox"));
    }

    #[test]
    fn infrastructure_failure_propagates() {
        let host = FakeHost::new()
            .with_executable("brew")
            .with_executable("docker")
            .on_command("docker ps", FakeResponse::spawn_error());
        let mut ui = MockUI::new();

        let err = PreconditionEngine::new(&host)
            .check_all(&SyncModeRequirements::none(), &mut ui)
            .unwrap_err();

        assert!(matches!(err, PreflightError::InfrastructureUnavailable { .. }));
    }
}
