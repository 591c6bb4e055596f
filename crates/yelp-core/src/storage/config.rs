//! Configuration management
//!
//! API host, endpoint paths and (optionally) client credentials are read from
//! `~/.config/yelp-export/config.toml`. A missing file yields the defaults below.

use super::Result;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_API_HOST: &str = "https://api.yelp.com";
pub const DEFAULT_TOKEN_PATH: &str = "/oauth2/token";
pub const DEFAULT_SEARCH_PATH: &str = "/v3/businesses/search";
pub const DEFAULT_BUSINESS_PATH: &str = "/v3/businesses/";
pub const DEFAULT_GRANT_TYPE: &str = "client_credentials";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub credentials: CredentialSettings,
    pub api: ApiSettings,
}

/// Credentials as stored on disk; every field may be overridden by flag or env
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CredentialSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub grant_type: Option<String>,
}

/// Where the API lives. Immutable once handed to the client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    pub host: String,
    pub token_path: String,
    pub search_path: String,
    pub business_path: String,
    pub timeout_seconds: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_API_HOST.to_string(),
            token_path: DEFAULT_TOKEN_PATH.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            business_path: DEFAULT_BUSINESS_PATH.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiSettings {
    /// Settings pointing at another host, paths left at their defaults
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("Failed to parse config file: {}", e),
            })?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or(StorageError::ConfigDirNotFound)?;

        Ok(home_dir
            .join(".config")
            .join("yelp-export")
            .join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.credentials.client_id.is_none());
        assert_eq!(config.api.host, "https://api.yelp.com");
        assert_eq!(config.api.business_path, "/v3/businesses/");
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    fn test_config_load_save() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.credentials.client_id = Some("client-123".to_string());
        config.api.host = "http://localhost:8080".to_string();

        config
            .save(Some(config_path.clone()))
            .expect("Failed to save config");

        let loaded_config = Config::load(Some(config_path)).expect("Failed to load config");
        assert_eq!(loaded_config, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[api]\nhost = \"http://127.0.0.1:9000\"\n\n[credentials]\nclient_id = \"abc\"\n",
        )
        .expect("Failed to write config");

        let config = Config::load(Some(config_path)).expect("Failed to load config");
        assert_eq!(config.api.host, "http://127.0.0.1:9000");
        assert_eq!(config.api.search_path, DEFAULT_SEARCH_PATH);
        assert_eq!(config.credentials.client_id.as_deref(), Some("abc"));
        assert!(config.credentials.grant_type.is_none());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let nonexistent_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load(Some(nonexistent_path)).expect("Failed to load default config");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[api\nhost = ").expect("Failed to write config");

        let result = Config::load(Some(config_path));
        assert!(matches!(result, Err(StorageError::ConfigParseError { .. })));
    }
}
