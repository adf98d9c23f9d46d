//! Configuration for the Fleetyard vehicle map.
//!
//! Supports YAML files, environment variable overrides (`FLEETYARD__*`),
//! and validation of all settings.

use crate::error::{FleetError, Result};
use crate::geometry::CANVAS_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main application configuration.
///
/// # Examples
///
/// ```no_run
/// use fleetyard_core::config::AppConfig;
///
/// let config = AppConfig::from_file("config/fleetyard.yaml").unwrap();
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote store gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Map view settings
    #[serde(default)]
    pub map: MapConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            map: MapConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FleetError::config(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Loads configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| FleetError::config("yaml", e.to_string()))
    }

    /// Loads configuration through the `config` crate, layering the file
    /// with `FLEETYARD__*` environment variable overrides.
    pub fn from_config_builder<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let config = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .add_source(
                config::Environment::with_prefix("FLEETYARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| FleetError::config(path.display().to_string(), e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| FleetError::config(path.display().to_string(), e.to_string()))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.gateway.script_url.trim().is_empty() {
            return Err(FleetError::config(
                "gateway.script_url",
                "must not be empty",
            ));
        }
        if self.gateway.request_timeout_secs == 0 {
            return Err(FleetError::config(
                "gateway.request_timeout_secs",
                "must be greater than zero",
            ));
        }
        if !(self.map.canvas_size.is_finite() && self.map.canvas_size > 0.0) {
            return Err(FleetError::config(
                "map.canvas_size",
                "must be a positive number",
            ));
        }
        Ok(())
    }
}

/// Settings for the spreadsheet web-script gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the deployed web script
    #[serde(default = "default_script_url")]
    pub script_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_script_url() -> String {
    String::new()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            script_url: default_script_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    /// Returns the request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Settings for the map view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Logical canvas extent on both axes
    #[serde(default = "default_canvas_size")]
    pub canvas_size: f64,

    /// Fetch the vehicle snapshot once at session start
    #[serde(default = "default_refresh_on_launch")]
    pub refresh_on_launch: bool,
}

fn default_canvas_size() -> f64 {
    CANVAS_SIZE
}

fn default_refresh_on_launch() -> bool {
    true
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            canvas_size: default_canvas_size(),
            refresh_on_launch: default_refresh_on_launch(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Parses the configured level, falling back to INFO on unknown values.
    pub fn tracing_level(&self) -> tracing::Level {
        match self.level.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" | "warning" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            other => {
                tracing::warn!(level = other, "unknown log level, using info");
                tracing::Level::INFO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.gateway.request_timeout_secs, 30);
        assert_eq!(config.map.canvas_size, CANVAS_SIZE);
        assert!(config.map.refresh_on_launch);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
gateway:
  script_url: "https://script.example.com/exec"
  request_timeout_secs: 10
map:
  refresh_on_launch: false
logging:
  level: debug
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.gateway.script_url, "https://script.example.com/exec");
        assert_eq!(config.gateway.request_timeout(), Duration::from_secs(10));
        assert!(!config.map.refresh_on_launch);
        assert_eq!(config.logging.tracing_level(), tracing::Level::DEBUG);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_url() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.gateway.script_url = "https://script.example.com/exec".to_string();
        config.gateway.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
