//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::DEFAULT_API_URL;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection used by the CLI
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Request timeout; unset means requests wait for the server
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: None,
        }
    }
}

/// Where the CLI keeps its session
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Session file path; defaults to the user's data directory
    pub file: Option<String>,
}

impl SessionConfig {
    pub fn path(&self) -> PathBuf {
        self.file
            .as_ref()
            .map(|f| PathBuf::from(expand_home(f)))
            .unwrap_or_else(crate::session::FileStorage::default_path)
    }
}

/// Development API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Account seeded as administrator on startup
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Seed a few properties, tenants, invoices and expenses
    #[serde(default)]
    pub seed_sample_data: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_admin_email() -> String {
    "admin@rentdesk.local".to_string()
}

fn default_admin_password() -> String {
    "admin".to_string()
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
            seed_sample_data: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Candidate config files, most specific first
    pub fn default_paths() -> Vec<PathBuf> {
        [
            Some(PathBuf::from("./rentdesk.toml")),
            dirs::config_dir().map(|p| p.join("rentdesk").join("config.toml")),
            Some(PathBuf::from("/etc/rentdesk/config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(url) = std::env::var("RENTDESK_API_URL") {
            self.api.url = url;
        }
        if let Ok(timeout) = std::env::var("RENTDESK_API_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.api.timeout_secs = Some(secs);
            }
        }

        // Session overrides
        if let Ok(file) = std::env::var("RENTDESK_SESSION_FILE") {
            self.session.file = Some(file);
        }

        // Server overrides
        if let Ok(host) = std::env::var("RENTDESK_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("RENTDESK_SERVER_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(email) = std::env::var("RENTDESK_ADMIN_EMAIL") {
            self.server.admin_email = email;
        }
        if let Ok(password) = std::env::var("RENTDESK_ADMIN_PASSWORD") {
            self.server.admin_password = password;
        }
        if let Ok(seed) = std::env::var("RENTDESK_SEED_SAMPLE_DATA") {
            self.server.seed_sample_data = seed.to_lowercase() != "false" && seed != "0";
        }

        // Logging overrides
        if let Ok(level) = std::env::var("RENTDESK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("RENTDESK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().to_string(),
        _ => path.to_string(),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# RentDesk Configuration
#
# Environment variables override these settings:
# - RENTDESK_API_URL
# - RENTDESK_API_TIMEOUT
# - RENTDESK_SESSION_FILE
# - RENTDESK_SERVER_HOST
# - RENTDESK_SERVER_PORT
# - RENTDESK_ADMIN_EMAIL
# - RENTDESK_ADMIN_PASSWORD
# - RENTDESK_SEED_SAMPLE_DATA
# - RENTDESK_LOG_LEVEL
# - RENTDESK_LOG_FORMAT

[api]
# Base URL of the RentDesk REST backend
url = "http://localhost:5000"

# Request timeout in seconds (no timeout when unset)
# timeout_secs = 30

[session]
# Where `rentdesk login` stores the token
# file = "~/.local/share/rentdesk/session.json"

[server]
# Development API server (rentdesk-api)
host = "127.0.0.1"
port = 5000

# Administrator account created on startup
admin_email = "admin@rentdesk.local"
admin_password = "admin"

# Start with a few sample records
seed_sample_data = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/rentdesk/rentdesk.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(Path::new("generated"), &generate_default_config()).unwrap();
        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert_eq!(config.api.timeout(), None);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse(
            Path::new("partial"),
            "[api]\nurl = \"http://rent.example:8080\"\ntimeout_secs = 10\n",
        )
        .unwrap();
        assert_eq!(config.api.url, "http://rent.example:8080");
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.server.admin_email, "admin@rentdesk.local");
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rentdesk.toml");
        std::fs::write(&path, "[server]\nport = \"not a port\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("rentdesk.toml"));

        let missing = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
