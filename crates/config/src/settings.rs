//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Per-user context store bounds
    #[serde(default)]
    pub context: ContextStoreConfig,

    /// Directory with reference data files (ingredients.json, contact.json, faq.json)
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// tracing-subscriber env filter (e.g. "info,isvaryam_agent=debug")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            context: ContextStoreConfig::default(),
            data_dir: default_data_dir(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins; empty defaults to localhost
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_cors_enabled")]
    pub cors_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_enabled() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            cors_enabled: default_cors_enabled(),
        }
    }
}

/// Bounds for the per-user conversation context store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextStoreConfig {
    /// Maximum tracked users before oldest entries are evicted
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Context time-to-live in seconds; expired contexts read as fresh
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_capacity() -> usize {
    1000
}

fn default_ttl_secs() -> u64 {
    1800
}

impl Default for ContextStoreConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }
        if self.context.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "context.capacity".to_string(),
                message: "context store capacity must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority: env vars (ISVARYAM_ prefix) > config/{env}.yaml >
/// config/default.yaml > built-in defaults. Missing files are fine.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder()
        .add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder = builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    let config = builder
        .add_source(Environment::with_prefix("ISVARYAM").separator("__"))
        .build()?;

    let settings: Settings = config.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.context.capacity, 1000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut settings = Settings::default();
        settings.context.capacity = 0;
        assert!(settings.validate().is_err());
    }
}
