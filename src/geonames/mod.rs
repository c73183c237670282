//! GeoNames web service client
//!
//! One shared HTTP client with an explicit timeout, used by the place search
//! (`searchJSON`) and the station observation query (`weatherJSON`).

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::GeoNamesConfig;
use crate::{Result, WeatherMapError};

pub mod lenient;
pub mod observations;
pub mod raw;
pub mod search;

pub use observations::WeatherClient;
pub use raw::{RawGeoRecord, RawGeoResponse, RawObservation, RawWeatherResponse};
pub use search::GeoClient;

const USER_AGENT: &str = concat!("weathermap/", env!("CARGO_PKG_VERSION"));

/// Low-level GeoNames access shared by the search and weather clients
#[derive(Debug, Clone)]
pub struct GeoNamesClient {
    client: Client,
    base_url: String,
    username: String,
}

impl GeoNamesClient {
    pub fn new(config: &GeoNamesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherMapError::config(format!("Failed to create HTTP client: {e}")))?;

        if config.uses_demo_account() {
            warn!("Using the shared GeoNames 'demo' account; requests may be rate limited");
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
        })
    }

    /// Issue one GET against `endpoint` with the already-encoded `params`
    /// and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &str,
    ) -> Result<T> {
        debug!("GeoNames request: {}/{}?{}", self.base_url, endpoint, params);
        let url = format!(
            "{}/{}?{}&username={}",
            self.base_url,
            endpoint,
            params,
            urlencoding::encode(&self.username)
        );

        let start_time = Instant::now();
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                WeatherMapError::network(format!("GeoNames {endpoint} timed out"))
            } else {
                WeatherMapError::network(format!("GeoNames {endpoint} request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherMapError::network(format!(
                "GeoNames {endpoint} returned HTTP {status}"
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            WeatherMapError::network(format!("Failed to read GeoNames {endpoint} body: {e}"))
        })?;

        debug!(
            "GeoNames {} answered {} bytes in {:.3}s",
            endpoint,
            body.len(),
            start_time.elapsed().as_secs_f64()
        );

        serde_json::from_slice(&body).map_err(|e| {
            WeatherMapError::network(format!("GeoNames {endpoint} returned a non-JSON body: {e}"))
        })
    }
}
