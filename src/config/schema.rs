//! Sync configuration schema.
//!
//! Only the parts of `docker-sync.yml` that decide which host tools are
//! needed are modelled. Unknown keys are ignored so full sync
//! configurations parse without complaint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default timeout for install commands, in seconds.
pub const DEFAULT_COMMAND_TIMEOUT: u64 = 1800;

/// Default timeout for the daemon status probe, in seconds.
pub const DEFAULT_DAEMON_TIMEOUT: u64 = 15;

/// Root of a `docker-sync.yml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Config format version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Global options.
    pub options: SyncOptions,

    /// Sync points by name.
    pub syncs: BTreeMap<String, SyncPoint>,
}

/// Global options that affect the precondition run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncOptions {
    /// Upper bound for each install command, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_timeout: Option<u64>,

    /// Upper bound for the daemon status probe, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daemon_timeout: Option<u64>,
}

impl SyncOptions {
    /// Fill unset values from `fallback`.
    pub fn or(self, fallback: &SyncOptions) -> SyncOptions {
        SyncOptions {
            command_timeout: self.command_timeout.or(fallback.command_timeout),
            daemon_timeout: self.daemon_timeout.or(fallback.daemon_timeout),
        }
    }

    /// Effective install command timeout.
    pub fn command_timeout(&self) -> u64 {
        self.command_timeout.unwrap_or(DEFAULT_COMMAND_TIMEOUT)
    }

    /// Effective daemon probe timeout.
    pub fn daemon_timeout(&self) -> u64 {
        self.daemon_timeout.unwrap_or(DEFAULT_DAEMON_TIMEOUT)
    }
}

/// One synchronised directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncPoint {
    /// Host source directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Strategy; `native_osx` when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_strategy: Option<SyncStrategy>,
}

impl SyncPoint {
    /// The strategy in effect for this sync point.
    pub fn strategy(&self) -> SyncStrategy {
        self.sync_strategy.unwrap_or_default()
    }
}

/// How a sync point moves files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStrategy {
    /// Unison runs inside a container; nothing extra needed on the host.
    #[default]
    NativeOsx,
    /// Unison on the host, with unox as the file watcher.
    Unison,
    /// Rsync on the host, with fswatch as the file watcher.
    Rsync,
}

/// Which backend tool groups a run must verify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncModeRequirements {
    /// Check `unison` and `unox`.
    pub unison_required: bool,
    /// Check `rsync` and `fswatch`.
    pub rsync_required: bool,
}

impl SyncModeRequirements {
    /// Requirements with both backend groups switched off.
    pub fn none() -> Self {
        Self::default()
    }

    /// Merge flags forced on from the command line.
    pub fn with_forced(self, unison: bool, rsync: bool) -> Self {
        Self {
            unison_required: self.unison_required || unison,
            rsync_required: self.rsync_required || rsync,
        }
    }
}

impl SyncConfig {
    /// Derive the host tool requirements from the configured strategies.
    pub fn requirements(&self) -> SyncModeRequirements {
        let uses = |strategy: SyncStrategy| self.syncs.values().any(|s| s.strategy() == strategy);
        SyncModeRequirements {
            unison_required: uses(SyncStrategy::Unison),
            rsync_required: uses(SyncStrategy::Rsync),
        }
    }
}
