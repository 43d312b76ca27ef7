use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default registry API endpoint
pub const DEFAULT_REGISTRY_URL: &str = "https://console-api.enforce.dev";

/// Timeout for a registry call in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Provider configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderConfig {
    pub registry: RegistrySettings,
    pub versions: VersionsSettings,
}

impl ProviderConfig {
    /// Loads the configuration from a JSON file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Registry client configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrySettings {
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Bearer token sent with every request
    pub token: Option<String>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
            token: None,
        }
    }
}

/// Versions data source configuration
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionsSettings {
    pub failure_policy: FailurePolicy,
    pub encoding: Encoding,
}

/// What a read does when the registry call fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Report a diagnostic and set no state
    #[default]
    Strict,
    /// Substitute placeholder metadata and succeed
    Sentinel,
}

/// How version metadata is exposed in state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Nested typed `metadata` object
    #[default]
    Structured,
    /// `raw_metadata` JSON string
    Raw,
}

/// Returns the path to the data directory for versions-source.
/// Uses $XDG_DATA_HOME/versions-source if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/versions-source,
/// or ./versions-source if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("versions-source.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("versions-source")
}
