use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::WeatherMapError;
use crate::figure::Figure;
use crate::models::{LocationCandidate, StationRow};
use crate::weather_map::{WeatherMap, WeatherMapService};

type AppState = Arc<WeatherMapService>;

#[derive(Debug, Deserialize)]
pub struct MapQuery {
    pub query: String,
    #[serde(default)]
    pub candidate: usize,
}

#[derive(Debug, Deserialize)]
pub struct CandidatesQuery {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ApiWeatherMap {
    pub name: String,
    pub title: String,
    pub wiki_link: Option<String>,
    pub figure: Figure,
    pub stations: Option<Vec<StationRow>>,
    pub message: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl From<WeatherMap> for ApiWeatherMap {
    fn from(map: WeatherMap) -> Self {
        let (stations, message) = match map.station_rows() {
            Ok(rows) => (Some(rows), None),
            Err(err) => (None, Some(err.user_message())),
        };
        Self {
            name: map.display_name(),
            title: format!("Weather around {}", map.candidate.name),
            wiki_link: map.wiki_link().map(str::to_string),
            figure: map.figure,
            stations,
            message,
            generated_at: map.generated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    error: String,
}

/// Pipeline error rendered as a JSON response
#[derive(Debug)]
pub struct ApiError(WeatherMapError);

impl From<WeatherMapError> for ApiError {
    fn from(err: WeatherMapError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            WeatherMapError::NoLocationFound { .. } | WeatherMapError::NoStationsFound { .. } => {
                StatusCode::NOT_FOUND
            }
            WeatherMapError::Network { .. } | WeatherMapError::Upstream { .. } => {
                StatusCode::BAD_GATEWAY
            }
            WeatherMapError::Validation { .. } => StatusCode::BAD_REQUEST,
            WeatherMapError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_expected() {
            warn!("{}", self.0);
        } else {
            error!("Request failed: {}", self.0);
        }
        let body = ApiErrorBody {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(service: AppState) -> Router {
    Router::new()
        .route("/map", get(get_map))
        .route("/candidates", get(get_candidates))
        .with_state(service)
}

async fn get_map(
    State(service): State<AppState>,
    Query(params): Query<MapQuery>,
) -> Result<Json<ApiWeatherMap>, ApiError> {
    let map = service.lookup(&params.query, params.candidate).await?;
    Ok(Json(map.into()))
}

async fn get_candidates(
    State(service): State<AppState>,
    Query(params): Query<CandidatesQuery>,
) -> Result<Json<Vec<LocationCandidate>>, ApiError> {
    let candidates = service.candidates(&params.query).await?;
    Ok(Json(candidates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(WeatherMapError::no_location_found("Atlantis"), StatusCode::NOT_FOUND)]
    #[case(WeatherMapError::network("timed out"), StatusCode::BAD_GATEWAY)]
    #[case(WeatherMapError::upstream(18, "daily limit"), StatusCode::BAD_GATEWAY)]
    #[case(WeatherMapError::validation("candidate 4"), StatusCode::BAD_REQUEST)]
    #[case(WeatherMapError::config("no username"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_error_status(#[case] err: WeatherMapError, #[case] expected: StatusCode) {
        assert_eq!(ApiError::from(err).into_response().status(), expected);
    }

    #[test]
    fn test_map_query_defaults_to_best_candidate() {
        let params: MapQuery = serde_json::from_str(r#"{"query":"Madrid"}"#).unwrap();
        assert_eq!(params.candidate, 0);
    }
}
