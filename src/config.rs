//! Training configuration stored as TOML in the app directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::{self, AppDirError};
use crate::ml::id3::{DEFAULT_NUMERIC_STRIDE, DepthPolicy, TrainOptions};

/// File name of the training config inside the app directory.
pub const CONFIG_FILE_NAME: &str = "id3tree.toml";

/// Errors that may occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write a config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Tree-growing settings. Missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Remaining depth at the root.
    pub max_depth: i32,
    /// Row stride for sampling numeric thresholds.
    pub numeric_stride: usize,
    /// Depth accounting for nominal splits.
    pub depth_policy: DepthPolicy,
    /// Split budget given to each numeric attribute when a dataset has none.
    pub numeric_splits: u32,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            numeric_stride: DEFAULT_NUMERIC_STRIDE,
            depth_policy: DepthPolicy::PerChild,
            numeric_splits: 20,
        }
    }
}

impl From<&TrainConfig> for TrainOptions {
    fn from(config: &TrainConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            numeric_stride: config.numeric_stride,
            depth_policy: config.depth_policy,
        }
    }
}

/// Resolve the config file path inside the app directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load the app-directory config, returning defaults if it does not exist.
pub fn load_or_default() -> Result<TrainConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load a config file, returning defaults if it does not exist.
pub fn load_from(path: &Path) -> Result<TrainConfig, ConfigError> {
    if !path.exists() {
        return Ok(TrainConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a config file, creating parent directories as needed.
pub fn save_to(config: &TrainConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn map_app_dir_error(error: AppDirError) -> ConfigError {
    match error {
        AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}
