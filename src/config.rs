//! Configuration management for amoblock.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Environment variable overriding the configured auth token.
pub const AUTH_TOKEN_ENV: &str = "AMOBLOCK_AUTH_TOKEN";

/// Secure string type that zeroizes memory on drop.
/// Used for the remote-settings auth token.
#[derive(Clone, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote-settings writer server (HTTPS only)
    pub server: String,

    /// Bucket holding the staged blocklist
    pub bucket: String,

    /// Collection holding the block entries
    pub collection: String,

    /// Bearer token for the writer API; prefer the environment variable
    pub auth_token: SecureString,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: "https://settings-writer.prod.mozaws.net/v1".to_string(),
            bucket: "staging".to_string(),
            collection: "addons".to_string(),
            auth_token: SecureString::default(),
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let mut config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        if let Ok(token) = env::var(AUTH_TOKEN_ENV) {
            config.auth_token = SecureString::new(token);
        }

        config.validate()?;

        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to defaults
    /// (with the environment token override still applied).
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let mut config = Config::default();
            if let Ok(token) = env::var(AUTH_TOKEN_ENV) {
                config.auth_token = SecureString::new(token);
            }
            Ok(config)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.server.starts_with("https://") {
            anyhow::bail!(
                "Invalid server '{}': only HTTPS servers are allowed",
                self.server
            );
        }

        if self.bucket.is_empty() || self.collection.is_empty() {
            anyhow::bail!("bucket and collection must not be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_load_from_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server: https://example.org/v1\nbucket: staging\ncollection: addons\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server, "https://example.org/v1");
        assert_eq!(config.bucket, "staging");
    }

    #[test]
    fn test_rejects_plain_http() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server: http://example.org/v1\n").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_rejects_empty_collection() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "collection: ''\n").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/amoblock.yaml").unwrap();
        assert_eq!(config.collection, "addons");
    }

    #[test]
    fn test_secure_string_redacted_in_debug() {
        let token = SecureString::from("super-secret");
        assert_eq!(format!("{token:?}"), "[REDACTED]");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "bucket: blocklists-preview\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.bucket, "blocklists-preview");
        assert_eq!(config.collection, "addons");
        assert!(config.server.starts_with("https://"));
    }
}
