//! Weather stations inside a bounding box (`weatherJSON`)

use tracing::{info, instrument, warn};

use super::GeoNamesClient;
use super::raw::RawWeatherResponse;
use crate::Result;
use crate::models::BBox;

const ENDPOINT: &str = "weatherJSON";

#[derive(Debug, Clone)]
pub struct WeatherClient {
    api: GeoNamesClient,
}

impl WeatherClient {
    #[must_use]
    pub fn new(api: GeoNamesClient) -> Self {
        Self { api }
    }

    /// The endpoint expects the edges in north, south, east, west order
    #[must_use]
    pub fn box_params(bbox: &BBox) -> String {
        format!(
            "north={}&south={}&east={}&west={}",
            bbox.north, bbox.south, bbox.east, bbox.west
        )
    }

    #[instrument(skip(self))]
    pub async fn fetch_stations(&self, bbox: &BBox) -> Result<RawWeatherResponse> {
        if bbox.crosses_antimeridian() {
            warn!("Bounding box crosses the antimeridian; station results may be incomplete");
        }

        let mut response: RawWeatherResponse = self
            .api
            .get_json(ENDPOINT, &Self::box_params(bbox))
            .await?;

        if let Some(status) = response.status.take() {
            if !status.is_no_result() {
                return Err(status.into_error());
            }
            return Ok(RawWeatherResponse::default());
        }

        info!(
            "GeoNames returned {} station observations",
            response.weather_observations.len()
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeatherMapError;
    use crate::config::GeoNamesConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WeatherClient {
        let config = GeoNamesConfig {
            username: "tester".to_string(),
            base_url: server.uri(),
            timeout_seconds: 2,
        };
        WeatherClient::new(GeoNamesClient::new(&config).unwrap())
    }

    #[test]
    fn test_box_params_order() {
        let bbox = BBox::new(40.6, 40.3, -3.5, -3.9).unwrap();
        assert_eq!(
            WeatherClient::box_params(&bbox),
            "north=40.6&south=40.3&east=-3.5&west=-3.9"
        );
        assert_eq!(
            WeatherClient::box_params(&BBox::DEGENERATE),
            "north=0&south=0&east=0&west=0"
        );
    }

    #[tokio::test]
    async fn test_fetch_stations_sends_box() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weatherJSON"))
            .and(query_param("north", "40.6"))
            .and(query_param("south", "40.3"))
            .and(query_param("east", "-3.5"))
            .and(query_param("west", "-3.9"))
            .and(query_param("username", "tester"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "weatherObservations": [
                    {"stationName": "Madrid / Barajas", "temperature": "10"},
                    {"stationName": "Madrid / Cuatro Vientos", "temperature": "20"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let bbox = BBox::new(40.6, 40.3, -3.5, -3.9).unwrap();
        let response = client_for(&server).fetch_stations(&bbox).await.unwrap();
        assert_eq!(response.weather_observations.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_observation_list_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weatherJSON"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let response = client_for(&server)
            .fetch_stations(&BBox::DEGENERATE)
            .await
            .unwrap();
        assert!(response.weather_observations.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let config = GeoNamesConfig {
            username: "tester".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 2,
        };
        let client = WeatherClient::new(GeoNamesClient::new(&config).unwrap());

        let err = client.fetch_stations(&BBox::DEGENERATE).await.unwrap_err();
        assert!(matches!(err, WeatherMapError::Network { .. }));
    }
}
