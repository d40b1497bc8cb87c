//! Configuration file handling.
//!
//! Credentials for the lookup services live in the user's home directory:
//!
//! - OSS Index: `~/.ossindex/.oss-index-config`
//! - IQ server: `~/.iqserver/.iq-server-config`
//!
//! Both files are TOML and are only read here. A missing file yields the
//! default (empty) configuration.
//!
//! # Example Configuration
//!
//! ```toml
//! username = "someone@example.com"
//! token = "0123456789abcdef"
//! ```

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const OSS_INDEX_DIR_NAME: &str = ".ossindex";
pub const OSS_INDEX_CONFIG_FILE_NAME: &str = ".oss-index-config";
pub const IQ_SERVER_DIR_NAME: &str = ".iqserver";
pub const IQ_SERVER_CONFIG_FILE_NAME: &str = ".iq-server-config";

/// Process-wide settings for an audit run.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    pub version: String,
    /// Forces the lookup collaborator to ignore cached results.
    pub clean_cache: bool,
    pub username: Option<String>,
    pub token: Option<String>,
}

impl Configuration {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn with_clean_cache(mut self, clean_cache: bool) -> Self {
        self.clean_cache = clean_cache;
        self
    }

    /// Copies non-empty credentials from an OSS Index config file.
    pub fn with_oss_index(mut self, oss: &OssIndexConfig) -> Self {
        self.username = non_empty(&oss.username);
        self.token = non_empty(&oss.token);
        self
    }

    /// Builds a configuration from the OSS Index file in the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(version: impl Into<String>) -> Result<Self> {
        let oss = OssIndexConfig::load()?;
        Ok(Self::new(version).with_oss_index(&oss))
    }

    pub fn has_credentials(&self) -> bool {
        matches!(
            (self.username.as_deref(), self.token.as_deref()),
            (Some(u), Some(t)) if !u.is_empty() && !t.is_empty()
        )
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("version", &self.version)
            .field("clean_cache", &self.clean_cache)
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "********"))
            .finish()
    }
}

/// Contents of `~/.ossindex/.oss-index-config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OssIndexConfig {
    pub username: String,
    pub token: String,
}

impl OssIndexConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&oss_index_config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        load_toml(path)
    }
}

/// Contents of `~/.iqserver/.iq-server-config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IqServerConfig {
    pub server: String,
    pub username: String,
    pub token: String,
}

impl IqServerConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&iq_server_config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        load_toml(path)
    }
}

/// Returns the path to the OSS Index config file.
///
/// Falls back to the current directory when no home directory is known.
pub fn oss_index_config_path() -> PathBuf {
    home().join(OSS_INDEX_DIR_NAME).join(OSS_INDEX_CONFIG_FILE_NAME)
}

pub fn iq_server_config_path() -> PathBuf {
    home().join(IQ_SERVER_DIR_NAME).join(IQ_SERVER_CONFIG_FILE_NAME)
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn load_toml<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(T::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_paths_use_fixed_names() {
        let oss = oss_index_config_path();
        assert!(oss.ends_with(Path::new(".ossindex").join(".oss-index-config")));

        let iq = iq_server_config_path();
        assert!(iq.ends_with(Path::new(".iqserver").join(".iq-server-config")));
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = OssIndexConfig::load_from(&dir.path().join("absent")).unwrap();
        assert_eq!(config, OssIndexConfig::default());
    }

    #[test]
    fn test_load_oss_index_credentials() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OSS_INDEX_CONFIG_FILE_NAME);
        fs::write(&path, "username = \"dev@example.com\"\ntoken = \"abc123\"\n").unwrap();

        let oss = OssIndexConfig::load_from(&path).unwrap();
        let config = Configuration::new("0.1.0").with_oss_index(&oss);

        assert_eq!(config.username.as_deref(), Some("dev@example.com"));
        assert!(config.has_credentials());
    }

    #[test]
    fn test_load_iq_server_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(IQ_SERVER_CONFIG_FILE_NAME);
        fs::write(&path, "server = \"http://localhost:8070\"\nusername = \"admin\"\n").unwrap();

        let iq = IqServerConfig::load_from(&path).unwrap();
        assert_eq!(iq.server, "http://localhost:8070");
        assert_eq!(iq.username, "admin");
        assert!(iq.token.is_empty());
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OSS_INDEX_CONFIG_FILE_NAME);
        fs::write(&path, "username = [").unwrap();

        let err = OssIndexConfig::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains(".oss-index-config"));
    }

    #[test]
    fn test_blank_credentials_are_absent() {
        let oss = OssIndexConfig {
            username: "  ".to_string(),
            token: "abc".to_string(),
        };
        let config = Configuration::new("0.1.0").with_oss_index(&oss);
        assert_eq!(config.username, None);
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_clean_cache_builder() {
        let config = Configuration::new("0.1.0");
        assert!(!config.clean_cache);

        let config = config.with_clean_cache(true);
        assert!(config.clean_cache);
        assert_eq!(config.version, "0.1.0");
    }

    #[test]
    fn test_debug_masks_token() {
        let config = Configuration {
            version: "0.1.0".to_string(),
            clean_cache: true,
            username: Some("dev".to_string()),
            token: Some("secret-token".to_string()),
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("********"));
    }
}
