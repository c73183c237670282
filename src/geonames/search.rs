//! Place-name search (`searchJSON`)

use tracing::{info, instrument};

use super::GeoNamesClient;
use super::raw::RawGeoResponse;
use crate::Result;

const ENDPOINT: &str = "searchJSON";

#[derive(Debug, Clone)]
pub struct GeoClient {
    api: GeoNamesClient,
}

impl GeoClient {
    #[must_use]
    pub fn new(api: GeoNamesClient) -> Self {
        Self { api }
    }

    /// Query string for a fuzzy, English, full-detail search of up to 20 places
    #[must_use]
    pub fn search_params(query: &str) -> String {
        format!(
            "q={}&fuzzy=0.8&maxRows=20&startRow=0&lang=en&isNameRequired=true&style=FULL",
            urlencoding::encode(query)
        )
    }

    #[instrument(skip(self))]
    pub async fn fetch_candidates(&self, query: &str) -> Result<RawGeoResponse> {
        let mut response: RawGeoResponse = self
            .api
            .get_json(ENDPOINT, &Self::search_params(query))
            .await?;

        if let Some(status) = response.status.take() {
            if !status.is_no_result() {
                return Err(status.into_error());
            }
            return Ok(RawGeoResponse::default());
        }

        info!(
            "GeoNames returned {} of {} places",
            response.geonames.len(),
            response.total_results().unwrap_or(response.geonames.len())
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

    fn client_for(server: &MockServer) -> GeoClient {
        let config = GeoNamesConfig {
            username: "tester".to_string(),
            base_url: server.uri(),
            timeout_seconds: 2,
        };
        GeoClient::new(GeoNamesClient::new(&config).unwrap())
    }

    #[test]
    fn test_search_params_encode_spaces() {
        let params = GeoClient::search_params("Santa Cruz de Tenerife");
        assert!(params.starts_with("q=Santa%20Cruz%20de%20Tenerife&"));
        assert!(params.contains("fuzzy=0.8"));
        assert!(params.contains("maxRows=20"));
        assert!(params.ends_with("style=FULL"));
    }

    #[tokio::test]
    async fn test_fetch_candidates_sends_expected_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/searchJSON"))
            .and(query_param("q", "San Sebastian"))
            .and(query_param("fuzzy", "0.8"))
            .and(query_param("maxRows", "20"))
            .and(query_param("startRow", "0"))
            .and(query_param("lang", "en"))
            .and(query_param("isNameRequired", "true"))
            .and(query_param("style", "FULL"))
            .and(query_param("username", "tester"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalResultsCount": 1,
                "geonames": [{"asciiName": "San Sebastian", "score": 50.0}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .fetch_candidates("San Sebastian")
            .await
            .unwrap();
        assert_eq!(response.geonames.len(), 1);
        assert_eq!(response.geonames[0].name(), Some("San Sebastian"));
    }

    #[tokio::test]
    async fn test_status_payload_becomes_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/searchJSON"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": {"message": "the daily limit of 20000 credits has been exceeded", "value": 18}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_candidates("Madrid").await.unwrap_err();
        assert!(matches!(err, WeatherMapError::Upstream { code: 18, .. }));
    }

    #[tokio::test]
    async fn test_no_result_status_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/searchJSON"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": {"message": "no result found", "value": 15}
            })))
            .mount(&server)
            .await;

        let response = client_for(&server).fetch_candidates("Qwxz").await.unwrap();
        assert!(response.geonames.is_empty());
    }

    #[tokio::test]
    async fn test_non_json_body_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/searchJSON"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_candidates("Madrid").await.unwrap_err();
        assert!(matches!(err, WeatherMapError::Network { .. }));
    }

    #[tokio::test]
    async fn test_server_error_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/searchJSON"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_candidates("Madrid").await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/searchJSON"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"geonames": []}))
                    .set_delay(std::time::Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let config = GeoNamesConfig {
            username: "tester".to_string(),
            base_url: server.uri(),
            timeout_seconds: 1,
        };
        let client = GeoClient::new(GeoNamesClient::new(&config).unwrap());

        let err = client.fetch_candidates("Madrid").await.unwrap_err();
        assert!(matches!(err, WeatherMapError::Network { .. }));
    }
}
