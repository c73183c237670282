//! End-to-end weather map pipeline
//!
//! place name → candidates → chosen candidate's box → station readings →
//! summary → map figure. The two GeoNames calls run one after the other
//! because the second needs the box from the first.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::aggregate::build_reading_table;
use crate::config::WeatherMapConfig;
use crate::figure::{Figure, MapSettings, compose};
use crate::geonames::{GeoClient, GeoNamesClient, WeatherClient};
use crate::location_resolver::LocationResolver;
use crate::models::{LocationCandidate, ReadingTable, StationRow};
use crate::{Result, WeatherMapError};

/// Read-only pipeline shared by all requests
#[derive(Debug, Clone)]
pub struct WeatherMapService {
    resolver: LocationResolver,
    weather: WeatherClient,
    map: MapSettings,
}

/// Everything the results page needs for one query
#[derive(Debug, Clone, Serialize)]
pub struct WeatherMap {
    /// Cleaned query text
    pub query: String,
    pub candidate: LocationCandidate,
    pub figure: Figure,
    pub table: ReadingTable,
    pub generated_at: DateTime<Utc>,
}

impl WeatherMapService {
    pub fn new(config: &WeatherMapConfig) -> Result<Self> {
        let api = GeoNamesClient::new(&config.geonames)?;
        Ok(Self::from_parts(
            GeoClient::new(api.clone()),
            WeatherClient::new(api),
            config.map.clone().into(),
        ))
    }

    #[must_use]
    pub fn from_parts(geo: GeoClient, weather: WeatherClient, map: MapSettings) -> Self {
        Self {
            resolver: LocationResolver::new(geo),
            weather,
            map,
        }
    }

    /// Ranked candidates for disambiguation
    pub async fn candidates(&self, raw_query: &str) -> Result<Vec<LocationCandidate>> {
        self.resolver.resolve_candidates(raw_query).await
    }

    /// Build the weather map for candidate `chosen` (0 = best match)
    #[instrument(skip(self))]
    pub async fn lookup(&self, raw_query: &str, chosen: usize) -> Result<WeatherMap> {
        let candidates = self.resolver.resolve_candidates(raw_query).await?;
        let candidate = candidates.get(chosen).cloned().ok_or_else(|| {
            WeatherMapError::validation(format!(
                "candidate {chosen} requested but only {} found",
                candidates.len()
            ))
        })?;

        let search_box = candidate.search_box();
        if search_box.is_degenerate() {
            debug!(
                "{} has no bounding box, querying stations with the empty box",
                candidate.name
            );
        }

        let raw = self.weather.fetch_stations(&search_box).await?;
        let table = build_reading_table(&raw);
        let figure = compose(&candidates, &table, chosen, &self.map)?;

        info!(
            "Weather map for '{}': {} with {} stations",
            LocationResolver::clean_query(raw_query),
            candidate.display_name(),
            table.station_count()
        );

        Ok(WeatherMap {
            query: LocationResolver::clean_query(raw_query),
            candidate,
            figure,
            table,
            generated_at: Utc::now(),
        })
    }
}

impl WeatherMap {
    #[must_use]
    pub fn display_name(&self) -> String {
        self.candidate.display_name()
    }

    #[must_use]
    pub fn wiki_link(&self) -> Option<&str> {
        self.candidate.wiki_link.as_deref()
    }

    #[must_use]
    pub fn has_stations(&self) -> bool {
        self.table.station_count() > 0
    }

    /// Station table without the summary row and coordinates
    pub fn station_rows(&self) -> Result<Vec<StationRow>> {
        if !self.has_stations() {
            return Err(WeatherMapError::no_stations_found(self.display_name()));
        }
        Ok(self.table.station_rows())
    }
}
