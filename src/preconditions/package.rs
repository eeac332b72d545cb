//! Installing python modules with pip.
//!
//! The interpreter on the path decides the privilege mode: the
//! system-owned `/usr/bin/python` needs `sudo`, any other python (pyenv,
//! Homebrew) is installed into without it.

use std::path::Path;

use crate::config::DEFAULT_COMMAND_TIMEOUT;
use crate::error::{PreflightError, Result};
use crate::shell::CommandOptions;
use crate::ui::{Prompt, Severity, UserInterface};

use super::host::HostSystem;
use super::probe::CapabilityProbe;

/// Interpreter used for import probes and installs.
pub const PYTHON: &str = "python";

/// The system-owned interpreter that needs root to install into.
pub const SYSTEM_PYTHON: &str = "/usr/bin/python";

/// Where to read about installing by hand.
pub const INSTALL_DOCS_URL: &str = "https://github.com/EugenMayer/docker-sync/wiki/1.-Installation";

/// Whether pip commands need root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeMode {
    /// System python: prefix with `sudo`.
    Sudo,
    /// User-owned python.
    User,
}

impl PrivilegeMode {
    /// Pick the mode from the resolved interpreter path.
    pub fn for_interpreter(path: Option<&Path>) -> Self {
        match path {
            Some(p) if p == Path::new(SYSTEM_PYTHON) => Self::Sudo,
            _ => Self::User,
        }
    }

    /// The pip install command for `package`.
    pub fn install_command(&self, package: &str) -> String {
        match self {
            Self::Sudo => format!("sudo easy_install pip && sudo pip install {}", package),
            Self::User => format!("easy_install pip && pip install {}", package),
        }
    }

    fn status(&self) -> &'static str {
        match self {
            Self::Sudo => "You seem to use the system python, we will need sudo below",
            Self::User => "You seem to have a custom python, using non-sudo commands",
        }
    }

    fn intro(&self, package: &str) -> String {
        match self {
            Self::Sudo => format!(
                "I will ask you for your root password to install {} by running (this needs sudo, since we use the system python):",
                package
            ),
            Self::User => format!("I will now install {} for you by running:", package),
        }
    }
}

/// Installs python packages the sync tools import.
pub struct PackageInstaller<'a> {
    host: &'a dyn HostSystem,
    command_timeout: u64,
}

impl<'a> PackageInstaller<'a> {
    /// Create an installer with the default command timeout.
    pub fn new(host: &'a dyn HostSystem) -> Self {
        Self {
            host,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Kill the install command after `seconds`.
    pub fn with_command_timeout(mut self, seconds: u64) -> Self {
        self.command_timeout = seconds;
        self
    }

    /// Make sure `package` is importable, offering to pip-install it.
    ///
    /// `import_test` names the module to import when it differs from the
    /// package name.
    pub fn ensure_package(
        &self,
        package: &str,
        import_test: Option<&str>,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let probe = CapabilityProbe::new(self.host);
        let module = import_test.unwrap_or(package);

        if probe.module_importable(PYTHON, module)? {
            tracing::debug!("{} already importable", module);
            return Ok(());
        }

        ui.announce(
            &format!("Could not find {}. Will try to install it using pip", package),
            Severity::Warning,
        );

        let interpreter = self.host.executable_on_path(PYTHON);
        let mode = PrivilegeMode::for_interpreter(interpreter.as_deref());
        tracing::debug!("python at {:?}, mode {:?}", interpreter, mode);

        let command = mode.install_command(package);
        ui.announce(mode.status(), Severity::Ok);
        ui.announce(&mode.intro(package), Severity::Info);
        ui.announce(&command, Severity::Command);

        let prompt = Prompt::new(format!("install_{}", package), "Shall I continue?");
        if !ui.confirm(&prompt)? {
            return Err(PreflightError::UserDeclinedRemediation {
                dependency: package.to_string(),
                hint: format!("Please install {} manually, see {}", package, INSTALL_DOCS_URL),
            });
        }

        let result = self
            .host
            .run_command(&command, &CommandOptions::install(Some(self.command_timeout)))?;

        if !result.success {
            tracing::warn!(
                "'{}' exited with {:?} (timed out: {})",
                command,
                result.exit_code,
                result.timed_out
            );
            return Err(PreflightError::InstallCommandFailed {
                dependency: package.to_string(),
                command,
                code: result.exit_code,
                stderr: result.stderr,
            });
        }

        if !probe.module_importable(PYTHON, module)? {
            return Err(PreflightError::InstallFailedVerification {
                dependency: package.to_string(),
            });
        }

        ui.announce(&format!("Installed {}", package), Severity::Ok);
        Ok(())
    }
}
