//! Capability probes.
//!
//! Every probe is a pure query against the [`HostSystem`]: nothing is
//! cached between calls, so a probe run after an install sees the new
//! state. Probes decide on exit status alone.

use crate::config::DEFAULT_DAEMON_TIMEOUT;
use crate::error::Result;
use crate::shell::CommandOptions;

use super::host::HostSystem;
use super::spec::Detection;

/// The package manager every remediation command goes through.
pub const PACKAGE_MANAGER: &str = "brew";

/// The container runtime binary.
pub const CONTAINER_RUNTIME: &str = "docker";

/// Command whose exit status tells whether the daemon answers.
pub const DAEMON_STATUS_COMMAND: &str = "docker ps";

/// Answers "is X present" questions about the host.
pub struct CapabilityProbe<'a> {
    host: &'a dyn HostSystem,
    daemon_timeout: u64,
}

impl<'a> CapabilityProbe<'a> {
    /// Create a probe with the default daemon timeout.
    pub fn new(host: &'a dyn HostSystem) -> Self {
        Self {
            host,
            daemon_timeout: DEFAULT_DAEMON_TIMEOUT,
        }
    }

    /// Override the daemon probe timeout in seconds.
    pub fn with_daemon_timeout(mut self, seconds: u64) -> Self {
        self.daemon_timeout = seconds;
        self
    }

    /// The host this probe queries.
    pub fn host(&self) -> &'a dyn HostSystem {
        self.host
    }

    /// Is `name` on the search path?
    pub fn executable_present(&self, name: &str) -> Result<bool> {
        let found = self.host.executable_on_path(name);
        tracing::debug!("Executable {}: {:?}", name, found);
        Ok(found.is_some())
    }

    /// Is the package manager installed?
    pub fn package_manager_present(&self) -> Result<bool> {
        self.executable_present(PACKAGE_MANAGER)
    }

    /// Does the container daemon answer within the timeout?
    ///
    /// A timeout counts as unreachable.
    pub fn daemon_reachable(&self) -> Result<bool> {
        let result = self.host.run_command(
            DAEMON_STATUS_COMMAND,
            &CommandOptions::probe(Some(self.daemon_timeout)),
        )?;

        if result.timed_out {
            tracing::warn!(
                "'{}' did not answer within {}s",
                DAEMON_STATUS_COMMAND,
                self.daemon_timeout
            );
            return Ok(false);
        }

        tracing::debug!(
            "'{}' exited with {:?}",
            DAEMON_STATUS_COMMAND,
            result.exit_code
        );
        Ok(result.success)
    }

    /// Does the package manager record `package` as installed?
    pub fn package_recorded(&self, package: &str) -> Result<bool> {
        let command = format!("{} list {}", PACKAGE_MANAGER, package);
        let result = self.host.run_command(&command, &CommandOptions::probe(None))?;
        tracing::debug!("'{}' exited with {:?}", command, result.exit_code);
        Ok(result.success)
    }

    /// Can `interpreter` import `module`?
    pub fn module_importable(&self, interpreter: &str, module: &str) -> Result<bool> {
        let command = format!("{} -c 'import {}'", interpreter, module);
        let result = self.host.run_command(&command, &CommandOptions::probe(None))?;
        tracing::debug!("'{}' exited with {:?}", command, result.exit_code);
        Ok(result.success)
    }

    /// Evaluate a [`Detection`].
    pub fn detect(&self, detection: &Detection) -> Result<bool> {
        match detection {
            Detection::Executable(name) => self.executable_present(name),
            Detection::PackageRecorded(package) => self.package_recorded(package),
            Detection::DaemonReachable => self.daemon_reachable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreflightError;
    use crate::preconditions::fake::{FakeHost, FakeResponse};

    #[test]
    fn executable_present_follows_path() {
        let host = FakeHost::new().with_executable("unison");
        let probe = CapabilityProbe::new(&host);
        assert!(probe.executable_present("unison").unwrap());
        assert!(!probe.executable_present("rsync").unwrap());
    }

    #[test]
    fn package_manager_is_brew() {
        let host = FakeHost::new().with_executable("brew");
        assert!(CapabilityProbe::new(&host).package_manager_present().unwrap());
        assert_eq!(host.lookups(), vec!["brew"]);

        let empty = FakeHost::new();
        assert!(!CapabilityProbe::new(&empty).package_manager_present().unwrap());
    }

    #[test]
    fn daemon_reachable_on_zero_exit() {
        let host = FakeHost::new().on_command("docker ps", FakeResponse::ok());
        assert!(CapabilityProbe::new(&host).daemon_reachable().unwrap());
    }

    #[test]
    fn daemon_unreachable_on_nonzero_exit() {
        let host = FakeHost::new().on_command(
            "docker ps",
            FakeResponse::exit(1).with_stderr("Cannot connect to the Docker daemon"),
        );
        assert!(!CapabilityProbe::new(&host).daemon_reachable().unwrap());
    }

    #[test]
    fn daemon_timeout_counts_as_unreachable() {
        let host = FakeHost::new().on_command("docker ps", FakeResponse::timeout());
        let probe = CapabilityProbe::new(&host).with_daemon_timeout(1);
        assert!(!probe.daemon_reachable().unwrap());
    }

    #[test]
    fn spawn_failure_is_not_absence() {
        let host = FakeHost::new().on_command("docker ps", FakeResponse::spawn_error());
        let result = CapabilityProbe::new(&host).daemon_reachable();
        assert!(matches!(
            result,
            Err(PreflightError::InfrastructureUnavailable { .. })
        ));
    }

    #[test]
    fn package_recorded_uses_brew_list() {
        let host = FakeHost::new().on_command("brew list unox", FakeResponse::ok());
        let probe = CapabilityProbe::new(&host);
        assert!(probe.package_recorded("unox").unwrap());
        assert!(!probe.package_recorded("fswatch").unwrap());
        assert_eq!(host.commands_run(), vec!["brew list unox", "brew list fswatch"]);
    }

    #[test]
    fn module_importable_runs_interpreter() {
        let host = FakeHost::new().on_command("python -c 'import yaml'", FakeResponse::ok());
        let probe = CapabilityProbe::new(&host);
        assert!(probe.module_importable("python", "yaml").unwrap());
        assert!(!probe.module_importable("python", "macfsevents").unwrap());
    }

    #[test]
    fn probes_are_not_cached() {
        let host = FakeHost::new()
            .on_command("brew install rsync", FakeResponse::ok().installs("rsync"));
        let probe = CapabilityProbe::new(&host);
        assert!(!probe.executable_present("rsync").unwrap());
        host.run_command("brew install rsync", &CommandOptions::install(None))
            .unwrap();
        assert!(probe.executable_present("rsync").unwrap());
    }

    #[test]
    fn detect_dispatches_on_variant() {
        let host = FakeHost::new()
            .with_executable("docker")
            .on_command("docker ps", FakeResponse::ok());
        let probe = CapabilityProbe::new(&host);
        assert!(probe.detect(&Detection::Executable("docker".into())).unwrap());
        assert!(probe.detect(&Detection::DaemonReachable).unwrap());
        assert!(!probe
            .detect(&Detection::PackageRecorded("unox".into()))
            .unwrap());
    }
}
