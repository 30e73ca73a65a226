//! Platform-aware detection of the Korektor data directory.
//!
//! Lookup order:
//! 1. KOREKTOR_DATA_DIR environment variable (explicit override)
//! 2. Platform config directory via `dirs` crate
//! 3. `$HOME/.config/korektor`
//!
//! Returns Result, never silently falls back to a wrong path.

use crate::APP_NAME;
use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

pub const DATA_DIR_ENV: &str = "KOREKTOR_DATA_DIR";

const CREDENTIAL_FILE_NAME: &str = "credentials.json";
const LOG_DIR_NAME: &str = "logs";

/// Where Korektor keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    /// Base directory (e.g., ~/.config/korektor on Linux).
    pub data_dir: PathBuf,
    /// Path to the credential document.
    pub credential_file: PathBuf,
    /// Directory for korektor.log.
    pub log_dir: PathBuf,
    /// How the path was determined.
    pub source: PathSource,
}

/// How the path was determined (for logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    EnvVar,
    PlatformDefault,
    HomeFallback,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::EnvVar => write!(f, "{DATA_DIR_ENV}"),
            PathSource::PlatformDefault => write!(f, "platform default"),
            PathSource::HomeFallback => write!(f, "home fallback"),
        }
    }
}

impl DataPaths {
    /// Lay out the files under an explicit base directory.
    pub fn in_dir(data_dir: impl Into<PathBuf>, source: PathSource) -> Self {
        let data_dir = data_dir.into();
        Self {
            credential_file: data_dir.join(CREDENTIAL_FILE_NAME),
            log_dir: data_dir.join(LOG_DIR_NAME),
            data_dir,
            source,
        }
    }

    /// Create the data and log directories if missing.
    pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
        for dir in [&self.data_dir, &self.log_dir] {
            create_dir(dir)?;
        }
        Ok(())
    }
}

fn create_dir(dir: &Path) -> Result<(), ConfigError> {
    std::fs::create_dir_all(dir).map_err(|e| ConfigError::DirectoryCreate {
        location: ErrorLocation::from(Location::caller()),
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Detect data paths from the process environment.
pub fn detect_data_paths() -> Result<DataPaths, ConfigError> {
    detect_data_paths_with(|key| env::var(key).ok(), dirs::config_dir())
}

/// Detect data paths from an arbitrary variable lookup and platform config dir.
///
/// # Errors
/// Returns `ConfigError::DirectoryNotFound` if no valid path can be determined.
pub fn detect_data_paths_with<F>(
    lookup: F,
    platform_config_dir: Option<PathBuf>,
) -> Result<DataPaths, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(custom_dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
        let paths = DataPaths::in_dir(PathBuf::from(custom_dir.trim()), PathSource::EnvVar);
        info!("Using {DATA_DIR_ENV} override: {}", paths.data_dir.display());
        return Ok(paths);
    }

    if let Some(config_dir) = platform_config_dir {
        let paths = DataPaths::in_dir(config_dir.join(APP_NAME), PathSource::PlatformDefault);
        debug!("Platform data dir: {}", paths.data_dir.display());
        return Ok(paths);
    }

    if let Some(home) = lookup("HOME").filter(|v| !v.trim().is_empty()) {
        let paths = DataPaths::in_dir(
            PathBuf::from(home).join(".config").join(APP_NAME),
            PathSource::HomeFallback,
        );
        warn!("Using home fallback path: {}", paths.data_dir.display());
        return Ok(paths);
    }

    Err(ConfigError::DirectoryNotFound {
        location: ErrorLocation::from(Location::caller()),
        message: format!(
            "Cannot determine Korektor data directory. Set {DATA_DIR_ENV} environment variable."
        ),
    })
}
