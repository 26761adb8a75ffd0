//! Configuration management for `daycast`
//!
//! Loads settings from a TOML file in the user config directory and from
//! `DAYCAST_`-prefixed environment variables, applies defaults, and
//! validates everything before the client is built.

use crate::error::ForecastError;
use crate::models::{ForecastRequest, Units};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaycastConfig {
    /// Forecast endpoint settings
    #[serde(default)]
    pub endpoint: EndpointConfig,
    /// Default request parameters used when the caller supplies none
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Forecast endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the daily-forecast endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Default request parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Location query: a numeric city id or a city name
    #[serde(default = "default_location")]
    pub location: String,
    /// Display units ("metric" or "imperial")
    #[serde(default = "default_units")]
    pub units: String,
    /// Number of forecast days to request
    #[serde(default = "default_day_count")]
    pub day_count: u8,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://api.openweathermap.org/data/2.5/forecast/daily".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_location() -> String {
    // Bristol, UK ("q" lookups fail for it, hence the id form)
    "2654675".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_day_count() -> u8 {
    7
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DaycastConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            defaults: DefaultsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            units: default_units(),
            day_count: default_day_count(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl DaycastConfig {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path, falling back to the
    /// user config directory, with `DAYCAST_` environment overrides
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("DAYCAST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: DaycastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("daycast").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if !self.endpoint.base_url.starts_with("http://")
            && !self.endpoint.base_url.starts_with("https://")
        {
            return Err(ForecastError::config(
                "endpoint base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.endpoint.timeout_seconds == 0 || self.endpoint.timeout_seconds > 300 {
            return Err(ForecastError::config(
                "endpoint timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.defaults.location.trim().is_empty() {
            return Err(ForecastError::config("default location cannot be empty").into());
        }

        self.defaults
            .units
            .parse::<Units>()
            .map_err(|e| ForecastError::config(format!("default units: {e}")))?;

        if self.defaults.day_count == 0 || self.defaults.day_count > ForecastRequest::MAX_DAY_COUNT
        {
            return Err(ForecastError::config(format!(
                "default day count must be between 1 and {}",
                ForecastRequest::MAX_DAY_COUNT
            ))
            .into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ForecastError::config(format!(
                "invalid log level '{}', must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
