//! Location Resolution Module
//!
//! Turns free text typed by the user into the ranked list of GeoNames
//! candidates the map is drawn from.

use tracing::{debug, instrument};

use crate::aggregate::build_candidate_table;
use crate::geonames::GeoClient;
use crate::models::LocationCandidate;
use crate::text::normalize;
use crate::{Result, WeatherMapError};

/// Service for resolving place names
#[derive(Debug, Clone)]
pub struct LocationResolver {
    geo: GeoClient,
}

impl LocationResolver {
    #[must_use]
    pub fn new(geo: GeoClient) -> Self {
        Self { geo }
    }

    /// Query text actually sent upstream: normalized, outer spaces removed
    #[must_use]
    pub fn clean_query(raw: &str) -> String {
        normalize(raw).trim().to_string()
    }

    /// Ranked candidates for `raw_query`, best first.
    ///
    /// Input with nothing searchable left after cleaning is reported as not
    /// found without contacting GeoNames.
    #[instrument(skip(self))]
    pub async fn resolve_candidates(&self, raw_query: &str) -> Result<Vec<LocationCandidate>> {
        let query = Self::clean_query(raw_query);
        if query.is_empty() {
            debug!("Nothing left to search after cleaning the query");
            return Err(WeatherMapError::no_location_found(raw_query));
        }

        let raw = self.geo.fetch_candidates(&query).await?;
        let candidates = build_candidate_table(&raw);

        let Some(best) = candidates.first() else {
            debug!("No candidates found for '{}'", query);
            return Err(WeatherMapError::no_location_found(query));
        };

        debug!(
            "Resolved '{}' to {} candidates, best: {} ({})",
            query,
            candidates.len(),
            best.display_name(),
            best.format_coordinates()
        );

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeoNamesConfig;
    use crate::geonames::GeoNamesClient;

    #[test]
    fn test_clean_query_trims_after_normalizing() {
        assert_eq!(LocationResolver::clean_query("Madrid "), "Madrid");
        assert_eq!(LocationResolver::clean_query("  (New York) "), "New York");
        assert_eq!(LocationResolver::clean_query("¿?"), "");
    }

    #[tokio::test]
    async fn test_blank_query_is_not_found_without_request() {
        // nothing listens here; a request would surface as a network error
        let config = GeoNamesConfig {
            username: "tester".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 1,
        };
        let resolver = LocationResolver::new(GeoClient::new(GeoNamesClient::new(&config).unwrap()));

        let err = resolver.resolve_candidates(" ¡!¿? ").await.unwrap_err();
        assert!(matches!(err, WeatherMapError::NoLocationFound { .. }));
    }
}
