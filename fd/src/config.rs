//! Flowday configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main Flowday configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gateway connection settings
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .flowday.yml
        let local_config = PathBuf::from(".flowday.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/flowday/flowday.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("flowday").join("flowday.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Gateway connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Service base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.gateway.base_url, "http://localhost:8000");
        assert_eq!(config.gateway.timeout_ms, 10_000);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
gateway:
  base-url: https://flow.example.com
  timeout-ms: 3000
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.gateway.base_url, "https://flow.example.com");
        assert_eq!(config.gateway.timeout_ms, 3000);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
gateway:
  base-url: https://flow.example.com
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.gateway.base_url, "https://flow.example.com");

        // Default for unspecified
        assert_eq!(config.gateway.timeout_ms, 10_000);
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gateway:\n  timeout-ms: 250").unwrap();

        let path = file.path().to_path_buf();
        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.gateway.timeout_ms, 250);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = PathBuf::from("/nonexistent/flowday.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
