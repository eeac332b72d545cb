//! Error types for precondition checks.
//!
//! This module defines [`PreflightError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every outcome other than "already present" or "installed and verified"
//!   becomes a `PreflightError` and aborts the remaining checks
//! - `UserDeclinedRemediation` is kept apart from `MissingDependency` so
//!   callers can tell "you said no" from "we tried and failed"
//! - `LegacyConflictUnresolved` is fatal: the binary exits on it at once

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for precondition checks.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// The process-execution facility itself could not be used.
    #[error("Cannot run '{command}': {message}")]
    InfrastructureUnavailable { command: String, message: String },

    /// A required tool is absent and was not remediated.
    #[error("Missing dependency '{dependency}': {hint}")]
    MissingDependency { dependency: String, hint: String },

    /// The user refused an offered fix.
    #[error("Declined to install '{dependency}'. {hint}")]
    UserDeclinedRemediation { dependency: String, hint: String },

    /// The remediation command exited unsuccessfully.
    #[error("Failed to install '{dependency}': `{command}` exited with code {code:?}{}", format_stderr(.stderr))]
    InstallCommandFailed {
        dependency: String,
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The remediation command succeeded but the tool is still not detectable.
    #[error("Installed '{dependency}' but it still cannot be found. Please report this issue.")]
    InstallFailedVerification { dependency: String },

    /// A hand-installed legacy binary was left in place.
    #[error("Legacy installation at {path} must be removed before continuing")]
    LegacyConflictUnresolved { path: PathBuf },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PreflightError {
    /// Whether this error must end the process immediately.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::LegacyConflictUnresolved { .. })
    }

    /// Name of the dependency this error is about, if any.
    pub fn dependency(&self) -> Option<&str> {
        match self {
            Self::MissingDependency { dependency, .. }
            | Self::UserDeclinedRemediation { dependency, .. }
            | Self::InstallCommandFailed { dependency, .. }
            | Self::InstallFailedVerification { dependency } => Some(dependency),
            _ => None,
        }
    }
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

/// Result type alias for precondition operations.
pub type Result<T> = std::result::Result<T, PreflightError>;
