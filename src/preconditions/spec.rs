//! Descriptions of what to check and how to fix it.

use std::fmt;
use std::path::PathBuf;

use crate::error::{PreflightError, Result};

/// A way of deciding whether a dependency is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// An executable with this name is on the search path.
    Executable(String),
    /// The package manager records this package as installed.
    PackageRecorded(String),
    /// The container daemon answers a status query.
    DaemonReachable,
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Executable(name) => write!(f, "executable '{}'", name),
            Self::PackageRecorded(pkg) => write!(f, "package '{}'", pkg),
            Self::DaemonReachable => write!(f, "docker daemon"),
        }
    }
}

/// A hand-installed binary that shadows a package-managed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyArtifact {
    /// Where the legacy binary lives.
    pub path: PathBuf,
    /// Command that removes it.
    pub uninstall_command: String,
    /// Package whose package-manager record makes the path harmless.
    pub package: String,
}

/// One precondition: how to detect it and how to remediate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreconditionSpec {
    /// Dependency name shown to the user and used for prompt keys.
    pub name: String,
    /// Probe deciding presence.
    pub detect: Detection,
    /// Shell command that installs the dependency, if it can be installed.
    pub remediation_command: Option<String>,
    /// Message describing the gap.
    pub failure_message: String,
    /// Probe run after installing; `detect` when unset.
    pub verify: Option<Detection>,
    /// Legacy artifact to resolve before installing.
    pub legacy: Option<LegacyArtifact>,
}

impl PreconditionSpec {
    /// A check with no remediation.
    pub fn new(name: impl Into<String>, detect: Detection, failure_message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detect,
            remediation_command: None,
            failure_message: failure_message.into(),
            verify: None,
            legacy: None,
        }
    }

    /// Set the install command.
    pub fn remediate_with(mut self, command: impl Into<String>) -> Self {
        self.remediation_command = Some(command.into());
        self
    }

    /// Use a different probe after installing.
    pub fn verify_with(mut self, detection: Detection) -> Self {
        self.verify = Some(detection);
        self
    }

    /// Attach a legacy artifact.
    pub fn with_legacy(mut self, artifact: LegacyArtifact) -> Self {
        self.legacy = Some(artifact);
        self
    }

    /// Whether an install command is available.
    pub fn is_remediable(&self) -> bool {
        self.remediation_command.is_some()
    }

    /// Probe used to re-verify after an install.
    pub fn verification(&self) -> &Detection {
        self.verify.as_ref().unwrap_or(&self.detect)
    }

    /// Prompt key for the install confirmation.
    pub fn prompt_key(&self) -> String {
        format!("install_{}", self.name)
    }

    /// Hint shown when the user declines.
    pub fn manual_hint(&self) -> String {
        match &self.remediation_command {
            Some(cmd) => format!("Please install it yourself using: {}", cmd),
            None => self.failure_message.clone(),
        }
    }
}

/// Result of one remediation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemediationOutcome {
    /// Already present; nothing done.
    Skipped,
    /// The user said no; nothing executed.
    UserDeclined,
    /// Installed and verified.
    InstallSucceeded,
    /// The command succeeded but the dependency is still not detected.
    InstallFailedVerification,
    /// The command exited unsuccessfully or timed out.
    InstallCommandFailed { code: Option<i32>, stderr: String },
}

impl RemediationOutcome {
    /// Whether the run may continue to the next check.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Skipped | Self::InstallSucceeded)
    }

    /// Convert to the error that aborts the run, if any.
    pub fn into_result(self, spec: &PreconditionSpec) -> Result<()> {
        match self {
            Self::Skipped | Self::InstallSucceeded => Ok(()),
            Self::UserDeclined => Err(PreflightError::UserDeclinedRemediation {
                dependency: spec.name.clone(),
                hint: spec.manual_hint(),
            }),
            Self::InstallFailedVerification => Err(PreflightError::InstallFailedVerification {
                dependency: spec.name.clone(),
            }),
            Self::InstallCommandFailed { code, stderr } => {
                Err(PreflightError::InstallCommandFailed {
                    dependency: spec.name.clone(),
                    command: spec.remediation_command.clone().unwrap_or_default(),
                    code,
                    stderr,
                })
            }
        }
    }
}
