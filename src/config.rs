//! Configuration management for the weather map service
//!
//! Settings come from an optional TOML file, then from `WEATHERMAP_`
//! environment variables, and are validated before the server starts.

use crate::WeatherMapError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherMapConfig {
    /// GeoNames API access
    pub geonames: GeoNamesConfig,
    /// HTTP server settings
    pub server: ServerConfig,
    /// Map rendering settings
    pub map: MapConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// GeoNames API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoNamesConfig {
    /// Account name sent as `username` on every request
    pub username: String,
    /// Base URL for the GeoNames web services
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory holding the static front page
    pub static_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Mapbox base style understood by plotly.js without a token
    pub style: String,
    pub zoom: f64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_geonames_username() -> String {
    "demo".to_string()
}

fn default_geonames_base_url() -> String {
    "http://api.geonames.org".to_string()
}

fn default_geonames_timeout() -> u32 {
    10
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "frontend".to_string()
}

fn default_map_style() -> String {
    "open-street-map".to_string()
}

fn default_map_zoom() -> f64 {
    8.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for GeoNamesConfig {
    fn default() -> Self {
        Self {
            username: default_geonames_username(),
            base_url: default_geonames_base_url(),
            timeout_seconds: default_geonames_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            style: default_map_style(),
            zoom: default_map_zoom(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl GeoNamesConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }

    #[must_use]
    pub fn uses_demo_account(&self) -> bool {
        self.username == default_geonames_username()
    }
}

impl WeatherMapConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(std::env::var_os("WEATHERMAP_CONFIG").map(PathBuf::from))
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("weathermap.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHERMAP_GEONAMES__USERNAME -> geonames.username
        builder = builder.add_source(
            Environment::with_prefix("WEATHERMAP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherMapConfig = settings
            .try_deserialize()
            .with_context(|| {
                format!(
                    "Failed to deserialize configuration from {}",
                    config_file.display()
                )
            })?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.geonames.base_url.is_empty() {
            self.geonames.base_url = default_geonames_base_url();
        }
        if self.geonames.timeout_seconds == 0 {
            self.geonames.timeout_seconds = default_geonames_timeout();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.map.style.is_empty() {
            self.map.style = default_map_style();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        self.geonames.base_url = self.geonames.base_url.trim_end_matches('/').to_string();
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_credentials()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_credentials(&self) -> Result<()> {
        if self.geonames.username.trim().is_empty() {
            return Err(WeatherMapError::config(
                "GeoNames username cannot be empty. Register an account at geonames.org.",
            )
            .into());
        }

        if self.geonames.username.chars().any(char::is_whitespace) {
            return Err(
                WeatherMapError::config("GeoNames username cannot contain whitespace").into(),
            );
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.geonames.timeout_seconds > 300 {
            return Err(
                WeatherMapError::config("GeoNames timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.port == 0 {
            return Err(WeatherMapError::config("Server port cannot be 0").into());
        }

        if !(0.0..=22.0).contains(&self.map.zoom) {
            return Err(WeatherMapError::config("Map zoom must be between 0 and 22").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherMapError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherMapError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.geonames.base_url.starts_with("http://")
            && !self.geonames.base_url.starts_with("https://")
        {
            return Err(WeatherMapError::config(
                "GeoNames base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}
