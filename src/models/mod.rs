//! Data models for the weather map pipeline
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geocode candidates and bounding boxes
//! - Weather: Station readings, the summary row and table views

pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{BBox, LocationCandidate};
pub use weather::{ReadingTable, StationRow, WeatherReading, WeatherSummary};
