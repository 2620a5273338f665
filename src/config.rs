//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::feed::ReconnectPolicy;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub console: ConsoleConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telemetry backend endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL the REST paths are relative to
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Feed URL; derived from `api_base` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_api_base() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            feed_url: None,
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl BackendConfig {
    /// Push channel URL: `ws(s)://<host>/<base>/websocket`
    pub fn feed_url(&self) -> String {
        if let Some(url) = &self.feed_url {
            return url.clone();
        }
        let base = self.api_base.trim_end_matches('/');
        let base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            base.to_string()
        };
        format!("{}/websocket", base)
    }
}

/// Live feed behaviour
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub reconnect: ReconnectPolicy,
}

/// Periodic refresh timers
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshConfig {
    #[serde(default = "default_axis_interval")]
    pub axis_interval_ms: u64,

    #[serde(default = "default_metrics_interval")]
    pub metrics_interval_ms: u64,
}

fn default_axis_interval() -> u64 {
    1000
}

fn default_metrics_interval() -> u64 {
    5000
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            axis_interval_ms: default_axis_interval(),
            metrics_interval_ms: default_metrics_interval(),
        }
    }
}

impl RefreshConfig {
    pub fn axis_interval(&self) -> Duration {
        Duration::from_millis(self.axis_interval_ms)
    }

    pub fn metrics_interval(&self) -> Duration {
        Duration::from_millis(self.metrics_interval_ms)
    }
}

/// Operator console server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Browser reload interval for the rendered page (0 disables)
    #[serde(default = "default_page_refresh")]
    pub page_refresh_secs: u32,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8084
}

fn default_page_refresh() -> u32 {
    2
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            page_refresh_secs: default_page_refresh(),
        }
    }
}

impl ConsoleConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("robodash").join("config.toml")),
            Some(PathBuf::from("/etc/robodash/config.toml")),
            Some(PathBuf::from("./robodash.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Render the defaults as a TOML document
    pub fn default_toml() -> Result<String, ConfigError> {
        toml::to_string_pretty(&Config::default()).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Backend overrides
        if let Ok(base) = std::env::var("ROBODASH_API_BASE") {
            self.backend.api_base = base;
        }
        if let Ok(url) = std::env::var("ROBODASH_FEED_URL") {
            self.backend.feed_url = Some(url);
        }

        // Console overrides
        if let Ok(host) = std::env::var("ROBODASH_HOST") {
            self.console.host = host;
        }
        if let Ok(port) = std::env::var("ROBODASH_PORT") {
            if let Ok(p) = port.parse() {
                self.console.port = p;
            }
        }

        // Feed overrides
        if let Ok(attempts) = std::env::var("ROBODASH_RECONNECT_MAX_ATTEMPTS") {
            if let Ok(n) = attempts.parse::<u32>() {
                self.feed.reconnect.max_attempts = Some(n);
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("ROBODASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ROBODASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Failed to render config: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.console.port, 8084);
        assert_eq!(config.refresh.axis_interval_ms, 1000);
        assert_eq!(config.refresh.metrics_interval_ms, 5000);
        assert_eq!(config.feed.reconnect.initial_delay_ms, 5000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[backend]
api_base = "https://robots.example.com/api"

[feed.reconnect]
multiplier = 1.0

[console]
port = 9000
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.console.port, 9000);
        assert_eq!(config.console.host, "127.0.0.1");
        assert_eq!(config.feed.reconnect.multiplier, 1.0);
        assert_eq!(config.feed.reconnect.initial_delay_ms, 5000);
        assert_eq!(
            config.backend.feed_url(),
            "wss://robots.example.com/api/websocket"
        );
    }

    #[test]
    fn test_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "console = 5").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/robodash.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_feed_url_derivation() {
        let backend = BackendConfig::default();
        assert_eq!(backend.feed_url(), "ws://localhost:8080/api/websocket");

        let explicit = BackendConfig {
            feed_url: Some("ws://feed:9000/stream".to_string()),
            ..Default::default()
        };
        assert_eq!(explicit.feed_url(), "ws://feed:9000/stream");
    }

    #[test]
    fn test_default_toml_round_trips() {
        let text = Config::default_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.console.port, 8084);
        assert_eq!(parsed.feed.reconnect.max_attempts, None);
    }
}
