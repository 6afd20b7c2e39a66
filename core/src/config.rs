//! TOML Configuration File Support
//!
//! Centralized configuration loading for Alpha Quotes, supporting a TOML
//! configuration file at `~/.config/alpha-quotes/config.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # XDG Base Directory Compliance
//!
//! The configuration file follows the XDG Base Directory specification:
//! `$XDG_CONFIG_HOME/alpha-quotes/config.toml` (typically
//! `~/.config/alpha-quotes/config.toml`). `ALPHA_QUOTES_CONFIG` points at an
//! alternate file.
//!
//! # Example Configuration
//!
//! ```toml
//! [gateway]
//! api_key = "your-gemini-api-key"
//! quote_model = "gemini-2.5-flash"
//! image_model = "imagen-4.0-generate-001"
//! base_url = "https://generativelanguage.googleapis.com"
//! request_timeout_secs = 120
//!
//! [surface]
//! visuals_dir = "/home/me/Pictures/alpha-quotes"
//! ```
//!
//! The API key may come from `GEMINI_API_KEY` (or the legacy `API_KEY`)
//! instead of the file; the environment wins when both are set.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text model used for quote generation, listing, and explanations.
pub const DEFAULT_QUOTE_MODEL: &str = "gemini-2.5-flash";

/// Image model used for quote visuals.
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

/// Base URL of the Gemini REST API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// No API key in any configuration layer
    #[error(
        "No API key configured. Set GEMINI_API_KEY (or API_KEY), or add \
         api_key to the [gateway] section of the config file."
    )]
    MissingApiKey,

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Gateway section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayToml {
    /// Gemini API key
    pub api_key: Option<String>,

    /// Text model for quotes, listings, and explanations
    pub quote_model: Option<String>,

    /// Image model for quote visuals
    pub image_model: Option<String>,

    /// Base URL of the Gemini REST API
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

/// Surface section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceToml {
    /// Directory where generated quote visuals are saved
    pub visuals_dir: Option<PathBuf>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotesToml {
    /// Gateway configuration section
    pub gateway: GatewayToml,

    /// Surface configuration section
    pub surface: SurfaceToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// What the Gemini gateway needs to issue requests.
///
/// Produced from a loaded [`QuotesConfig`] via
/// [`QuotesConfig::gateway_config`], which is where the required API key is
/// enforced.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// API key sent with every request
    pub api_key: String,

    /// Text model for quotes, listings, and explanations
    pub quote_model: String,

    /// Image model for quote visuals
    pub image_model: String,

    /// Base URL of the Gemini REST API, without a trailing slash
    pub base_url: String,

    /// Per-request timeout
    pub request_timeout: Duration,
}

/// Centralized configuration for Alpha Quotes
///
/// Consolidates all configuration sources and tracks where the effective
/// values came from. Use [`load_config`] to load with proper priority
/// handling.
#[derive(Clone, Debug)]
pub struct QuotesConfig {
    /// Gemini API key, if any layer provided one
    pub api_key: Option<String>,

    /// Text model for quotes, listings, and explanations
    pub quote_model: String,

    /// Image model for quote visuals
    pub image_model: String,

    /// Base URL of the Gemini REST API
    pub base_url: String,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Directory where generated quote visuals are saved
    pub visuals_dir: PathBuf,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            quote_model: DEFAULT_QUOTE_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            visuals_dir: default_visuals_dir(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl QuotesConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Resolve the gateway configuration, enforcing the required API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when no layer provided a key,
    /// or [`ConfigError::ValidationError`] when a provided key is blank.
    pub fn gateway_config(&self) -> Result<GeminiConfig, ConfigError> {
        let api_key = self.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api_key must not be blank".to_string(),
            ));
        }
        Ok(GeminiConfig {
            api_key,
            quote_model: self.quote_model.clone(),
            image_model: self.image_model.clone(),
            base_url: self.base_url.trim_end_matches('/').to_string(),
            request_timeout: self.request_timeout,
        })
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/alpha-quotes/config.toml` or
/// `~/.config/alpha-quotes/config.toml` if `XDG_CONFIG_HOME` is not set.
/// `ALPHA_QUOTES_CONFIG` overrides both.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("ALPHA_QUOTES_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|p| p.join("alpha-quotes").join("config.toml"))
}

/// Default directory for saved quote visuals.
#[must_use]
pub fn default_visuals_dir() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("alpha-quotes").join("visuals"))
        .unwrap_or_else(|| PathBuf::from("alpha-quotes-visuals"))
}

/// Load configuration from all sources with proper priority
///
/// Priority order (highest first):
/// 1. Environment variables
/// 2. TOML configuration file
/// 3. Default values
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<QuotesConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only
///   defaults and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<QuotesConfig, ConfigError> {
    // Start with defaults
    let mut config = QuotesConfig::default();

    // Try to load from file
    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: QuotesToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    // Apply environment variables (overrides file values)
    apply_env_config(&mut config);

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut QuotesConfig, toml: &QuotesToml) {
    // Gateway settings
    if toml.gateway.api_key.is_some() {
        config.api_key = toml.gateway.api_key.clone();
    }
    if let Some(ref model) = toml.gateway.quote_model {
        config.quote_model = model.clone();
    }
    if let Some(ref model) = toml.gateway.image_model {
        config.image_model = model.clone();
    }
    if let Some(ref url) = toml.gateway.base_url {
        config.base_url = url.clone();
    }
    if let Some(secs) = toml.gateway.request_timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }

    // Surface settings
    if let Some(ref dir) = toml.surface.visuals_dir {
        config.visuals_dir = dir.clone();
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut QuotesConfig) {
    // GEMINI_API_KEY is the conventional variable; API_KEY is what the
    // first deployment of this product used and still honors.
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        config.api_key = Some(key);
        config.source = ConfigSource::Env;
    } else if let Ok(key) = std::env::var("API_KEY") {
        config.api_key = Some(key);
        config.source = ConfigSource::Env;
    }

    if let Ok(model) = std::env::var("ALPHA_QUOTES_QUOTE_MODEL") {
        config.quote_model = model;
        config.source = ConfigSource::Env;
    }
    if let Ok(model) = std::env::var("ALPHA_QUOTES_IMAGE_MODEL") {
        config.image_model = model;
        config.source = ConfigSource::Env;
    }
    if let Ok(url) = std::env::var("ALPHA_QUOTES_BASE_URL") {
        config.base_url = url;
        config.source = ConfigSource::Env;
    }
    if let Ok(timeout) = std::env::var("ALPHA_QUOTES_TIMEOUT_SECS") {
        if let Ok(secs) = timeout.parse::<u64>() {
            config.request_timeout = Duration::from_secs(secs);
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(dir) = std::env::var("ALPHA_QUOTES_VISUALS_DIR") {
        config.visuals_dir = PathBuf::from(dir);
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Clean up all environment variables used by config loading.
    /// Call this at the start of tests that need clean environment state.
    fn clear_config_env_vars() {
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("API_KEY");
        std::env::remove_var("ALPHA_QUOTES_QUOTE_MODEL");
        std::env::remove_var("ALPHA_QUOTES_IMAGE_MODEL");
        std::env::remove_var("ALPHA_QUOTES_BASE_URL");
        std::env::remove_var("ALPHA_QUOTES_TIMEOUT_SECS");
        std::env::remove_var("ALPHA_QUOTES_VISUALS_DIR");
        std::env::remove_var("ALPHA_QUOTES_CONFIG");
    }

    #[test]
    fn test_default_config() {
        let config = QuotesConfig::default();

        assert_eq!(config.quote_model, DEFAULT_QUOTE_MODEL);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert!(config.api_key.is_none());
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_default_config_path() {
        clear_config_env_vars();
        let path = default_config_path();
        // Should return Some path (depends on environment)
        if let Some(p) = path {
            assert!(p.to_string_lossy().contains("alpha-quotes"));
            assert!(p.to_string_lossy().contains("config.toml"));
        }
    }

    #[test]
    fn test_parse_valid_toml() {
        let toml_content = r#"
[gateway]
api_key = "file-key"
quote_model = "gemini-custom"
image_model = "imagen-custom"
base_url = "http://localhost:9000"
request_timeout_secs = 30

[surface]
visuals_dir = "/tmp/visuals"
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config_from_path(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.quote_model, "gemini-custom");
        assert_eq!(config.image_model, "imagen-custom");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.visuals_dir, PathBuf::from("/tmp/visuals"));
        // api_key may be overridden by env in parallel test runs; the file
        // value must win only when no env var is set, so just require Some.
        assert!(config.api_key.is_some());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_content = r#"
[gateway]
quote_model = "gemini-partial"
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config_from_path(Some(file.path().to_path_buf())).unwrap();

        // Specified value
        assert_eq!(config.quote_model, "gemini-partial");

        // Default values should be preserved
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_missing_file_graceful() {
        let path = PathBuf::from("/nonexistent/path/config.toml");
        let config = load_config_from_path(Some(path)).unwrap();

        // Defaults survive a missing file; only env vars may differ when
        // tests run in parallel.
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert!(config.config_file_path.is_none());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[gateway\napi_key = ").unwrap();

        let result = load_config_from_path(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_gateway_config_requires_api_key() {
        let config = QuotesConfig::default();
        assert!(matches!(
            config.gateway_config(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_gateway_config_rejects_blank_key() {
        let config = QuotesConfig {
            api_key: Some("   ".to_string()),
            ..QuotesConfig::default()
        };
        assert!(matches!(
            config.gateway_config(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_gateway_config_strips_trailing_slash() {
        let config = QuotesConfig {
            api_key: Some("k".to_string()),
            base_url: "http://localhost:9000/".to_string(),
            ..QuotesConfig::default()
        };
        let gateway = config.gateway_config().unwrap();
        assert_eq!(gateway.base_url, "http://localhost:9000");
        assert_eq!(gateway.api_key, "k");
    }
}
