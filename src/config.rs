//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! HTTP cache TTLs, logging defaults, and default paths. `AppConfig` is the
//! root configuration struct containing all settings.

use const_format::formatcp;
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// These constants control Cache-Control headers for upstream caches (Varnish,
// nginx, CDNs). All values are in seconds.
//
// The health proxy is deliberately uncacheable: every page load must observe
// the live backend, otherwise the panel would report a stale deployment.

/// Verification page - the HTML shell is static, the health data is not
pub const HTTP_CACHE_PAGE_MAX_AGE: u32 = 60;
pub const HTTP_CACHE_PAGE_SWR: u32 = 30;

/// Static assets (CSS, JS) - long cache with immutable hint
pub const HTTP_CACHE_STATIC_MAX_AGE: u32 = 86400;

/// Error responses - short TTL to prevent thundering herd while allowing quick recovery
pub const HTTP_CACHE_ERROR_MAX_AGE: u32 = 5;

// Pre-formatted Cache-Control header values (compile-time string concatenation)
pub const CACHE_CONTROL_PAGE: &str = formatcp!(
    "public, max-age={}, stale-while-revalidate={}",
    HTTP_CACHE_PAGE_MAX_AGE,
    HTTP_CACHE_PAGE_SWR
);

pub const CACHE_CONTROL_STATIC: &str =
    formatcp!("public, max-age={}, immutable", HTTP_CACHE_STATIC_MAX_AGE);

pub const CACHE_CONTROL_ERROR: &str = formatcp!("public, max-age={}", HTTP_CACHE_ERROR_MAX_AGE);

/// Health proxy responses must never be cached
pub const CACHE_CONTROL_HEALTH_PROXY: &str = "no-store";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Glob pattern for template files
pub const TEMPLATE_GLOB: &str = "templates/**/*";

/// Directory for static files
pub const STATIC_DIR: &str = "static";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "pennant=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Path the backend is probed on unless overridden
pub const DEFAULT_HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Backend whose health the page reports
    pub backend: BackendConfig,
    pub ui: UiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

/// Configuration for the backend health probe.
///
/// The backend address is an explicit value handed to [`crate::backend::BackendClient`]
/// at construction. There is deliberately no timeout setting: a probe that
/// never resolves leaves the panel in its loading state, matching the page's
/// single-shot semantics.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, e.g. "http://10.0.0.5:5000"
    pub base_url: String,
    /// Path of the health endpoint on the backend
    #[serde(default = "BackendConfig::default_health_path")]
    pub health_path: String,
}

impl BackendConfig {
    fn default_health_path() -> String {
        DEFAULT_HEALTH_PATH.to_string()
    }

    /// Full URL of the backend health endpoint.
    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.health_path)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Site title shown in the header and page title
    #[serde(default = "UiConfig::default_site_name")]
    pub site_name: String,
    /// Badge text, edited by hand before each deployment
    #[serde(default = "UiConfig::default_badge_label")]
    pub badge_label: String,
    /// Badge color ("blue" or "green"), edited by hand before each deployment
    #[serde(default = "UiConfig::default_badge_color")]
    pub badge_color: String,
    /// Version string, populated at runtime
    #[serde(skip_deserializing, default = "UiConfig::default_version")]
    pub version: String,
}

impl UiConfig {
    fn default_site_name() -> String {
        "Blue-Green Deployment Demo".to_string()
    }

    fn default_badge_label() -> String {
        "Version 1.0 - BLUE".to_string()
    }

    fn default_badge_color() -> String {
        "blue".to_string()
    }

    fn default_version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
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
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate settings that serde cannot express.
    ///
    /// Called by [`AppConfig::load`], and again by the binary after applying
    /// CLI overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.backend.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Validation(
                "backend.base_url must not be empty".to_string(),
            ));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "backend.base_url must start with http:// or https://, got '{}'",
                base
            )));
        }
        if !self.backend.health_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "backend.health_path must start with '/', got '{}'",
                self.backend.health_path
            )));
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
