//! Host precondition checks and remediation.
//!
//! This module provides:
//! - [`CapabilityProbe`] for "is X present" queries
//! - [`catalog`] with the ordered list of checks
//! - [`Remediator`] for the detect, confirm, install, verify flow
//! - [`LegacyResolver`] for hand-installed binaries that block an install
//! - [`PreconditionEngine`] to run everything for a sync configuration
//! - [`PackageInstaller`] for python modules installed with pip
//!
//! All host access goes through [`HostSystem`], so every component can be
//! exercised against [`FakeHost`].

pub mod catalog;
pub mod engine;
pub mod fake;
pub mod host;
pub mod legacy;
pub mod package;
pub mod probe;
pub mod remediation;
pub mod spec;

pub use catalog::checks_for;
pub use engine::{PreconditionEngine, NO_PACKAGE_MANAGER_NOTICE};
pub use fake::{FakeHost, FakeResponse, HostCall};
pub use host::{HostSystem, SystemHost};
pub use legacy::LegacyResolver;
pub use package::{PackageInstaller, PrivilegeMode};
pub use probe::CapabilityProbe;
pub use remediation::Remediator;
pub use spec::{Detection, LegacyArtifact, PreconditionSpec, RemediationOutcome};
