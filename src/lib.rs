//! `WeatherMap` - current weather around a place, drawn on a map
//!
//! A free-text place name is geocoded through GeoNames, the chosen match's
//! bounding box is used to fetch nearby station observations, and the
//! readings are summarized into a plotly map with a temperature gauge.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod error;
pub mod figure;
pub mod geonames;
pub mod location_resolver;
pub mod models;
pub mod telemetry;
pub mod text;
pub mod weather_map;
pub mod web;

// Re-export core types for public API
pub use config::WeatherMapConfig;
pub use error::WeatherMapError;
pub use figure::{Figure, MapSettings};
pub use geonames::{GeoClient, GeoNamesClient, WeatherClient};
pub use location_resolver::LocationResolver;
pub use models::{BBox, LocationCandidate, ReadingTable, StationRow, WeatherReading};
pub use weather_map::{WeatherMap, WeatherMapService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherMapError>;
