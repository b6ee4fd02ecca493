use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::version::DEFAULT_VERSION_KEY;

const APP_NAME: &str = "version-it";

/// Default manifest file, relative to the working directory
pub const DEFAULT_MANIFEST_PATH: &str = "package.json";

/// Default version data file, relative to the working directory
pub const DEFAULT_VERSION_DATA_PATH: &str = "StreamingAssets/VersionData.json";

/// Tool configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub manifest: ManifestConfig,
    pub version_data: VersionDataConfig,
    pub text: TextConfig,
}

/// Manifest location
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ManifestConfig {
    pub path: PathBuf,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MANIFEST_PATH),
        }
    }
}

/// Version data file synced after every version change
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct VersionDataConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for VersionDataConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from(DEFAULT_VERSION_DATA_PATH),
        }
    }
}

/// Version text rendering
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextConfig {
    /// Placeholder replaced with the version
    pub key: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_VERSION_KEY.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AppConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the data directory for version-it.
/// Uses $XDG_DATA_HOME/version-it if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/version-it,
/// or ./version-it if neither is available.
pub fn data_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

/// Returns the path to the config directory for version-it,
/// following the same rules as [`data_dir`] with XDG_CONFIG_HOME and ~/.config.
pub fn config_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("version-it.log")
}

fn dir_with_env(xdg_home: Option<String>, home_dir: Option<PathBuf>, fallback: &str) -> PathBuf {
    let base = xdg_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(fallback)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}
