//! Sync configuration loading.
//!
//! The precondition engine only asks one question of the configuration:
//! which backend tool groups are required. This module answers it from
//! `docker-sync.yml` and carries the few run options (timeouts).
//!
//! # Example
//!
//! ```
//! use syncprep::config::parse_config;
//! use std::path::Path;
//!
//! let yaml = "syncs:\n  app:\n    sync_strategy: rsync\n";
//! let config = parse_config(yaml, Path::new("docker-sync.yml")).unwrap();
//! assert!(config.requirements().rsync_required);
//! assert!(!config.requirements().unison_required);
//! ```

pub mod loader;
pub mod schema;

pub use schema::{
    SyncConfig, SyncModeRequirements, SyncOptions, SyncPoint, SyncStrategy,
    DEFAULT_COMMAND_TIMEOUT, DEFAULT_DAEMON_TIMEOUT,
};

pub use loader::{
    find_config_file, find_global_file, load_config, load_config_file, load_global_options,
    parse_config, CONFIG_FILE_NAME, GLOBAL_FILE_NAME,
};
