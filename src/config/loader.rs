//! Configuration file discovery and loading.
//!
//! Two files are read, later overriding earlier:
//! 1. User global options (`~/.syncprep.yml`, only its `options:` block)
//! 2. Project sync config (`docker-sync.yml`, found by walking up)

use crate::config::schema::{SyncConfig, SyncOptions};
use crate::error::{PreflightError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the project sync configuration.
pub const CONFIG_FILE_NAME: &str = "docker-sync.yml";

/// File name of the user global options file in the home directory.
pub const GLOBAL_FILE_NAME: &str = ".syncprep.yml";

/// Find the project config by walking up from `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Path of the user global options file, if it exists.
pub fn find_global_file() -> Option<PathBuf> {
    let path = dirs::home_dir()?.join(GLOBAL_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<SyncConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PreflightError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PreflightError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into SyncConfig.
///
/// An empty document is an empty config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<SyncConfig> {
    if content.trim().is_empty() {
        return Ok(SyncConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| PreflightError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the project config.
///
/// With `config_override` the file must exist. Without it, a missing
/// `docker-sync.yml` is not an error: `Ok(None)` is returned and the
/// caller decides the requirements from flags alone.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<Option<SyncConfig>> {
    let path = match config_override {
        Some(path) => path.to_path_buf(),
        None => match find_config_file(project_root) {
            Some(path) => path,
            None => {
                tracing::debug!("No {} found above {}", CONFIG_FILE_NAME, project_root.display());
                return Ok(None);
            }
        },
    };

    tracing::debug!("Loading sync config from {}", path.display());
    load_config_file(&path).map(Some)
}

/// Load options from the user global file, or defaults when absent.
pub fn load_global_options() -> Result<SyncOptions> {
    match find_global_file() {
        Some(path) => Ok(load_config_file(&path)?.options),
        None => Ok(SyncOptions::default()),
    }
}
