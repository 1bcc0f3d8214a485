//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file and defines the
//! defaults for the HTTP listener, cross-origin policy and logging. Every field
//! has a default, so the service starts without any file at all.

use const_format::formatcp;
use http::HeaderValue;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Coaching answers and liveness probes must never be served from a cache
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Tracing target of this crate
pub const LOG_TARGET: &str = "poker_coach";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=debug,tower_http=debug", LOG_TARGET);

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Wildcard entry in `cors.allowed_origins`
pub const CORS_ANY_ORIGIN: &str = "*";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Cross-origin policy applied to every route
    #[serde(default)]
    pub cors: CorsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Time allowed for in-flight requests to finish after a shutdown signal
    #[serde(default = "HttpServerConfig::default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
    /// Largest accepted request body
    #[serde(default = "HttpServerConfig::default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_timeout_seconds: Self::default_shutdown_timeout(),
            body_limit_bytes: Self::default_body_limit(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        5000
    }

    fn default_shutdown_timeout() -> u64 {
        30
    }

    fn default_body_limit() -> usize {
        2 * 1024 * 1024
    }
}

/// Cross-origin configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API. `"*"` permits any origin.
    #[serde(default = "CorsConfig::default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Self::default_allowed_origins(),
        }
    }
}

impl CorsConfig {
    fn default_allowed_origins() -> Vec<String> {
        vec![CORS_ANY_ORIGIN.to_string()]
    }

    /// True when the wildcard is among the configured origins
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == CORS_ANY_ORIGIN)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML file, falling back to defaults when the file is absent.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.logging.format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "logging.format must be \"text\" or \"json\", got \"{}\"",
                    other
                )))
            }
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::Validation(
                "cors.allowed_origins must list at least one origin (use \"*\" for any)"
                    .to_string(),
            ));
        }

        for origin in &self.cors.allowed_origins {
            if origin != CORS_ANY_ORIGIN && HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::Validation(format!(
                    "cors.allowed_origins contains an invalid origin: {:?}",
                    origin
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.http.shutdown_timeout_seconds, 30);
        assert_eq!(config.http.body_limit_bytes, 2 * 1024 * 1024);
        assert_eq!(config.cors.allowed_origins, vec!["*".to_string()]);
        assert!(config.cors.allows_any_origin());
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_partial_http_section() {
        let config = AppConfig::from_toml("[http]\nport = 8080\n").unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.host, "0.0.0.0");
    }

    #[test]
    fn test_explicit_origins() {
        let toml = r#"
            [cors]
            allowed_origins = ["http://localhost:3000", "https://trainer.example.com"]
        "#;
        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.cors.allowed_origins.len(), 2);
        assert!(!config.cors.allows_any_origin());
    }

    #[test]
    fn test_json_logging() {
        let config = AppConfig::from_toml("[logging]\nformat = \"json\"\n").unwrap();
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let err = AppConfig::from_toml("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_empty_origins() {
        let err = AppConfig::from_toml("[cors]\nallowed_origins = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_invalid_origin() {
        let err = AppConfig::from_toml("[cors]\nallowed_origins = [\"bad\\norigin\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = AppConfig::from_toml("[http\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.http.port, 5000);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coach.toml");
        std::fs::write(&path, "[http]\nhost = \"127.0.0.1\"\nport = 5050\n").unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 5050);
    }
}
