use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable overriding `api.app_id`
pub const APP_ID_ENV: &str = "TIANQI_APP_ID";
/// Environment variable overriding `api.app_secret`
pub const APP_SECRET_ENV: &str = "TIANQI_APP_SECRET";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a one-line message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Forecast API credentials and endpoint
    pub api: ApiConfig,

    /// Weather settings
    #[serde(default)]
    pub weather: WeatherConfig,
}

/// tianqiapi.com endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the forecast endpoint (query string is appended per request)
    pub base_url: String,

    /// Application id issued by tianqiapi.com
    pub app_id: String,

    /// Application secret issued by tianqiapi.com
    pub app_secret: String,

    /// API version; the 7-day forecast lives under `v9`
    #[serde(default = "default_api_version")]
    pub version: String,

    /// Ask the API for unescaped (UTF-8) Chinese text
    #[serde(default = "default_unescape")]
    pub unescape: bool,
}

fn default_api_version() -> String {
    "v9".to_string()
}

fn default_unescape() -> bool {
    true
}

impl ApiConfig {
    /// Check if credentials are configured (not placeholders)
    pub fn is_configured(&self) -> bool {
        !self.app_id.is_empty()
            && !self.app_secret.is_empty()
            && !self.app_id.starts_with("YOUR_")
            && !self.app_secret.starts_with("YOUR_")
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://gfeljm.tianqiapi.com/api".to_string(),
            app_id: "YOUR_APP_ID".to_string(),
            app_secret: "YOUR_APP_SECRET".to_string(),
            version: default_api_version(),
            unescape: default_unescape(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// City searched when none is given; `None` lets the API locate by IP
    #[serde(default)]
    pub default_city: Option<String>,

    /// Full city-code dataset replacing the bundled one
    #[serde(default)]
    pub city_dataset: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            default_city: None,
            city_dataset: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tianqi");

        Self {
            config_dir,
            api: ApiConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing.
    /// Credentials from the environment take precedence over the file.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(
            std::env::var(APP_ID_ENV).ok(),
            std::env::var(APP_SECRET_ENV).ok(),
        );
        Ok(config)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let mut config = Self::default();
            if let Some(parent) = path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        Ok(config)
    }

    /// Replace stored credentials with non-empty override values
    pub fn apply_overrides(&mut self, app_id: Option<String>, app_secret: Option<String>) {
        if let Some(id) = app_id.filter(|s| !s.is_empty()) {
            self.api.app_id = id;
        }
        if let Some(secret) = app_secret.filter(|s| !s.is_empty()) {
            self.api.app_secret = secret;
        }
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.api.base_url, "api.base_url", &mut result);

        if self.api.version.is_empty() {
            result.add_error("api.version", "API version must not be empty");
        }

        if !self.api.is_configured() {
            result.add_warning(
                "api",
                format!(
                    "API credentials not configured - set {} and {}",
                    APP_ID_ENV, APP_SECRET_ENV
                ),
            );
        }

        if self.weather.request_timeout_secs == 0 {
            result.add_error(
                "weather.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        } else if self.weather.request_timeout_secs > 120 {
            result.add_warning(
                "weather.request_timeout_secs",
                "Request timeout is unusually long (>120s)",
            );
        }

        if let Some(path) = &self.weather.city_dataset {
            if !path.is_file() {
                result.add_warning(
                    "weather.city_dataset",
                    format!(
                        "Dataset file not found, every city lookup will miss: {}",
                        path.display()
                    ),
                );
            }
        }

        if let Some(city) = &self.weather.default_city {
            if city.trim().is_empty() {
                result.add_warning("weather.default_city", "Default city is blank");
            }
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.query().is_some() {
                    result.add_warning(
                        field_name,
                        "Query string is rebuilt per request and will be ignored",
                    );
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("tianqi");

        Ok(config_dir.join("config.toml"))
    }
}
