//! Configuration loading and data folder resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// TOML configuration file contents (`~/.config/shopfront/config.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Data folder holding the catalog snapshot and its backup
    pub data_dir: Option<String>,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// External classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7340,
        }
    }
}

/// External classifier settings
///
/// With no endpoint configured the service runs fallback-only: the
/// reconciliation engine goes straight to the keyword rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Classification endpoint URL (None = fallback-only operation)
    pub endpoint: Option<String>,
    /// Optional bearer token for the endpoint
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Resolve the data folder, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. `SHOPFRONT_DATA_DIR` environment variable
/// 3. `data_dir` key in the TOML config file
/// 4. OS-dependent default (fallback)
pub fn resolve_data_dir(cli_arg: Option<&str>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var("SHOPFRONT_DATA_DIR") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.data_dir {
        return PathBuf::from(path);
    }

    default_data_dir()
}

/// OS-dependent default data folder
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("shopfront"))
        .unwrap_or_else(|| PathBuf::from("./shopfront_data"))
}

/// Default configuration file path for the platform
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shopfront").join("config.toml"))
}

/// Load the TOML config file, or defaults when the file does not exist
///
/// A present-but-unparseable file is an error; a missing file is not.
pub fn load_toml_config() -> Result<TomlConfig> {
    let Some(path) = config_file_path() else {
        return Ok(TomlConfig::default());
    };
    load_toml_config_from(&path)
}

/// Load a TOML config from an explicit path (used by tests)
pub fn load_toml_config_from(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        return Ok(TomlConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("read {} failed: {e}", path.display())))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("parse {} failed: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let config = TomlConfig {
            data_dir: Some("/from/toml".to_string()),
            ..Default::default()
        };
        let dir = resolve_data_dir(Some("/from/cli"), &config);
        assert_eq!(dir, PathBuf::from("/from/cli"));
    }

    #[test]
    fn toml_data_dir_used_when_no_override() {
        // Only meaningful when the env var is not set in the test environment
        if std::env::var("SHOPFRONT_DATA_DIR").is_ok() {
            return;
        }
        let config = TomlConfig {
            data_dir: Some("/from/toml".to_string()),
            ..Default::default()
        };
        let dir = resolve_data_dir(None, &config);
        assert_eq!(dir, PathBuf::from("/from/toml"));
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_toml_config_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.data_dir.is_none());
        assert_eq!(config.server.port, 7340);
        assert!(config.classifier.endpoint.is_none());
    }

    #[test]
    fn config_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
data_dir = "/srv/shopfront"

[server]
host = "0.0.0.0"
port = 8080

[classifier]
endpoint = "https://classify.example.com/v1/categorize"
timeout_secs = 10
"#,
        )
        .unwrap();

        let config = load_toml_config_from(&path).unwrap();
        assert_eq!(config.data_dir.as_deref(), Some("/srv/shopfront"));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.classifier.timeout_secs, 10);
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml [[[").unwrap();
        assert!(load_toml_config_from(&path).is_err());
    }
}
