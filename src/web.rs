use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::WeatherMapConfig;
use crate::weather_map::WeatherMapService;

pub fn app(service: WeatherMapService, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(Arc::new(service)))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(config: &WeatherMapConfig) -> Result<()> {
    let service = WeatherMapService::new(config).context("Failed to create GeoNames client")?;
    let app = app(service, &config.server.static_dir);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", config.server.port);
    axum::serve(listener, app)
        .await
        .context("Web server stopped unexpectedly")
}
