//! GeoNames response bodies as received.
//!
//! Every field is optional and read through the lenient deserializers; the
//! accessors return `Option` and leave the fallback (empty text or NaN) to
//! the aggregator that knows the column type.

use serde::Deserialize;

use super::lenient;
use crate::error::{GEONAMES_NO_RESULT, WeatherMapError};
use crate::models::BBox;

/// Error payload GeoNames sends with HTTP 200
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    #[serde(default, deserialize_with = "lenient::text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
}

impl ApiStatus {
    #[must_use]
    pub fn code(&self) -> i64 {
        self.value.map_or(0, |v| v as i64)
    }

    #[must_use]
    pub fn is_no_result(&self) -> bool {
        self.code() == GEONAMES_NO_RESULT
    }

    #[must_use]
    pub fn into_error(self) -> WeatherMapError {
        let code = self.code();
        WeatherMapError::upstream(
            code,
            self.message.unwrap_or_else(|| "unknown error".to_string()),
        )
    }
}

/// Body of `searchJSON`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGeoResponse {
    #[serde(default)]
    pub geonames: Vec<RawGeoRecord>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_results_count: Option<f64>,
    #[serde(default)]
    pub status: Option<ApiStatus>,
}

impl RawGeoResponse {
    /// Total matches upstream, which may exceed the rows returned
    #[must_use]
    pub fn total_results(&self) -> Option<usize> {
        self.total_results_count
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n as usize)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGeoRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    ascii_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::nested")]
    bbox: Option<RawBBox>,
    #[serde(default, deserialize_with = "lenient::text")]
    admin_name1: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    country_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    lng: Option<f64>,
    #[serde(default, deserialize_with = "lenient::nested")]
    alternate_names: Option<Vec<AlternateName>>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawBBox {
    #[serde(default, deserialize_with = "lenient::number")]
    north: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    south: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    east: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    west: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlternateName {
    #[serde(default, deserialize_with = "lenient::text")]
    lang: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    name: Option<String>,
}

/// Language tag GeoNames uses for URL-valued alternate names
const LINK_LANG: &str = "link";

impl RawGeoRecord {
    pub fn name(&self) -> Option<&str> {
        self.ascii_name.as_deref()
    }

    /// A box missing any edge counts as no box
    pub fn bounding_box(&self) -> Option<BBox> {
        let raw = self.bbox?;
        BBox::new(raw.north?, raw.south?, raw.east?, raw.west?)
    }

    pub fn admin_area(&self) -> Option<&str> {
        self.admin_name1.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country_name.as_deref()
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn lat(&self) -> Option<f64> {
        self.lat
    }

    pub fn lng(&self) -> Option<f64> {
        self.lng
    }

    /// Name of the first alternate name tagged `link`, if it is an http(s) URL
    pub fn wiki_link(&self) -> Option<&str> {
        self.alternate_names
            .as_deref()?
            .iter()
            .find(|alt| alt.lang.as_deref() == Some(LINK_LANG))?
            .name
            .as_deref()
            .filter(|link| link.starts_with("https://") || link.starts_with("http://"))
    }
}

/// Body of `weatherJSON`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeatherResponse {
    #[serde(default)]
    pub weather_observations: Vec<RawObservation>,
    #[serde(default)]
    pub status: Option<ApiStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawObservation {
    #[serde(default, deserialize_with = "lenient::text")]
    datetime: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    station_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    clouds: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    lng: Option<f64>,
}

impl RawObservation {
    pub fn datetime(&self) -> Option<&str> {
        self.datetime.as_deref().filter(|d| !d.is_empty())
    }

    pub fn station_name(&self) -> Option<&str> {
        self.station_name.as_deref()
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn humidity(&self) -> Option<f64> {
        self.humidity
    }

    pub fn wind_speed(&self) -> Option<f64> {
        self.wind_speed
    }

    pub fn clouds(&self) -> Option<&str> {
        self.clouds.as_deref()
    }

    pub fn lat(&self) -> Option<f64> {
        self.lat
    }

    pub fn lng(&self) -> Option<f64> {
        self.lng
    }
}
