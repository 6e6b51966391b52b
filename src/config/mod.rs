pub mod api_config;
pub mod display_config;
pub mod queue_config;

pub use api_config::ApiConfig;
pub use display_config::DisplayConfig;
pub use queue_config::QueueConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "CARBON_PORTAL_API_URL";

/// Main configuration structure matching config.yaml format
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?;

        Ok(config)
    }

    /// Load the explicit path if given, else the per-user config file if it
    /// exists, else defaults. The API URL environment override is applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_path().filter(|p| p.exists()) {
                Some(path) => {
                    debug!("Using config file: {}", path.display());
                    Self::from_file(&path)?
                }
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        Ok(config.with_api_url_override(std::env::var(API_URL_ENV).ok()))
    }

    /// Replace the API base URL when an override is present and non-empty
    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            debug!("Overriding API base URL from environment: {}", url);
            self.api.base_url = url;
        }
        self
    }
}

/// `<config_dir>/carbon-portal/config.yaml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("carbon-portal").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
api:
  base_url: "https://carbon.example.com"
queue:
  grace_period_ms: 1500
display:
  decimals: 3
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://carbon.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.queue.grace_period_ms, 1500);
        assert_eq!(config.queue.pacing_delay_ms, 50);
        assert_eq!(config.display.decimals, 3);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "queue: [not, a, map").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML config"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/carbon.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_api_url_override() {
        let config = Config::default().with_api_url_override(Some("http://10.0.0.2:9000".into()));
        assert_eq!(config.api.base_url, "http://10.0.0.2:9000");

        let config = Config::default().with_api_url_override(Some("  ".into()));
        assert_eq!(config.api.base_url, "http://localhost:8000");

        let config = Config::default().with_api_url_override(None);
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }
}
