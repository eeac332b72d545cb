//! The ordered list of host checks.
//!
//! Order matters: the runtime binary is checked before the daemon it
//! talks to, and each sync tool before its file watcher.

use std::path::PathBuf;

use crate::config::SyncModeRequirements;

use super::spec::{Detection, LegacyArtifact, PreconditionSpec};

/// Where the pre-Homebrew unox install put its binary.
pub const LEGACY_UNOX_PATH: &str = "/usr/local/bin/unison-fsmonitor";

const DAEMON_MESSAGE: &str =
    "No docker daemon seems to be running. Did you start your docker-for-mac / docker-machine?";

/// The container runtime binary.
pub fn docker() -> PreconditionSpec {
    PreconditionSpec::new(
        "docker",
        Detection::Executable("docker".into()),
        "Could not find docker binary in $PATH. Please install it, e.g. docker-for-mac",
    )
    .remediate_with("brew install docker")
}

/// A running container daemon. Cannot be installed.
pub fn docker_daemon() -> PreconditionSpec {
    PreconditionSpec::new("docker daemon", Detection::DaemonReachable, DAEMON_MESSAGE)
}

/// The unison sync binary.
pub fn unison() -> PreconditionSpec {
    PreconditionSpec::new(
        "unison",
        Detection::Executable("unison".into()),
        "Could not find unison binary in $PATH",
    )
    .remediate_with("brew install unison")
}

/// unox, the unison file watcher, installed from a tap.
pub fn unox() -> PreconditionSpec {
    PreconditionSpec::new(
        "unox",
        Detection::PackageRecorded("unox".into()),
        "Could not find unison-fsmonitor (unox) installed through brew",
    )
    .remediate_with("brew tap eugenmayer/dockersync && brew install eugenmayer/dockersync/unox")
    .with_legacy(LegacyArtifact {
        path: PathBuf::from(LEGACY_UNOX_PATH),
        uninstall_command: format!("sudo rm {}", LEGACY_UNOX_PATH),
        package: "unox".into(),
    })
}

/// The rsync binary.
pub fn rsync() -> PreconditionSpec {
    PreconditionSpec::new(
        "rsync",
        Detection::Executable("rsync".into()),
        "Could not find rsync binary in $PATH",
    )
    .remediate_with("brew install rsync")
}

/// fswatch, the rsync file watcher.
pub fn fswatch() -> PreconditionSpec {
    PreconditionSpec::new(
        "fswatch",
        Detection::Executable("fswatch".into()),
        "Could not find fswatch binary in $PATH",
    )
    .remediate_with("brew install fswatch")
}

/// Build the checks a run with these requirements performs, in order.
pub fn checks_for(requirements: &SyncModeRequirements) -> Vec<PreconditionSpec> {
    let mut checks = vec![docker(), docker_daemon()];

    if requirements.unison_required {
        checks.push(unison());
        checks.push(unox());
    }

    if requirements.rsync_required {
        checks.push(rsync());
        checks.push(fswatch());
    }

    checks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(requirements: SyncModeRequirements) -> Vec<String> {
        checks_for(&requirements)
            .into_iter()
            .map(|c| c.name)
            .collect()
    }

    #[test]
    fn no_sync_tools_checks_only_docker() {
        assert_eq!(
            names(SyncModeRequirements::none()),
            vec!["docker", "docker daemon"]
        );
    }

    #[test]
    fn unison_group_follows_docker() {
        assert_eq!(
            names(SyncModeRequirements::none().with_forced(true, false)),
            vec!["docker", "docker daemon", "unison", "unox"]
        );
    }

    #[test]
    fn rsync_group_follows_docker() {
        assert_eq!(
            names(SyncModeRequirements::none().with_forced(false, true)),
            vec!["docker", "docker daemon", "rsync", "fswatch"]
        );
    }

    #[test]
    fn both_groups_run_unison_first() {
        assert_eq!(
            names(SyncModeRequirements::none().with_forced(true, true)),
            vec!["docker", "docker daemon", "unison", "unox", "rsync", "fswatch"]
        );
    }

    #[test]
    fn daemon_has_no_remediation() {
        let daemon = docker_daemon();
        assert!(!daemon.is_remediable());
        assert!(daemon.failure_message.contains("docker-for-mac / docker-machine"));
    }

    #[test]
    fn only_unox_has_legacy_artifact() {
        let checks = checks_for(&SyncModeRequirements::none().with_forced(true, true));
        let with_legacy: Vec<_> = checks
            .iter()
            .filter(|c| c.legacy.is_some())
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(with_legacy, vec!["unox"]);

        let legacy = unox().legacy.unwrap();
        assert_eq!(legacy.path, PathBuf::from(LEGACY_UNOX_PATH));
        assert_eq!(
            legacy.uninstall_command,
            "sudo rm /usr/local/bin/unison-fsmonitor"
        );
    }

    #[test]
    fn unox_installs_from_tap() {
        let cmd = unox().remediation_command.unwrap();
        assert!(cmd.starts_with("brew tap eugenmayer/dockersync"));
        assert!(cmd.ends_with("brew install eugenmayer/dockersync/unox"));
    }
}
