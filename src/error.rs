//! Error types and handling for the weather map pipeline

use thiserror::Error;

/// GeoNames status code meaning "no result found"
pub const GEONAMES_NO_RESULT: i64 = 15;

/// Main error type for the weather map pipeline
#[derive(Error, Debug)]
pub enum WeatherMapError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport failures, timeouts and unreadable bodies from GeoNames
    #[error("Network error: {message}")]
    Network { message: String },

    /// GeoNames answered with a `status` object instead of data
    #[error("GeoNames error {code}: {message}")]
    Upstream { code: i64, message: String },

    /// The geocode query produced no candidates
    #[error("No location found for '{query}'")]
    NoLocationFound { query: String },

    /// The weather query produced no station readings
    #[error("No weather stations found near {location}")]
    NoStationsFound { location: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl WeatherMapError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn upstream<S: Into<String>>(code: i64, message: S) -> Self {
        Self::Upstream {
            code,
            message: message.into(),
        }
    }

    pub fn no_location_found<S: Into<String>>(query: S) -> Self {
        Self::NoLocationFound {
            query: query.into(),
        }
    }

    pub fn no_stations_found<S: Into<String>>(location: S) -> Self {
        Self::NoStationsFound {
            location: location.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Empty results are part of normal operation and get their own views
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            WeatherMapError::NoLocationFound { .. } | WeatherMapError::NoStationsFound { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherMapError::Config { .. } => {
                "Configuration error. Please check your config file and GeoNames username."
                    .to_string()
            }
            WeatherMapError::Network { .. } => {
                "Unable to reach the GeoNames service. Please try again later.".to_string()
            }
            WeatherMapError::Upstream { message, .. } => {
                format!("The GeoNames service rejected the request: {message}")
            }
            WeatherMapError::NoLocationFound { .. } => "No location found.".to_string(),
            WeatherMapError::NoStationsFound { .. } => "No weather station found.".to_string(),
            WeatherMapError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}
