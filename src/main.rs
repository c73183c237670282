use anyhow::{Context, Result};
use weathermap::{WeatherMapConfig, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = WeatherMapConfig::load().context("Failed to load configuration")?;
    telemetry::init(&config.logging)?;

    tracing::info!(
        "Starting weathermap {} against {}",
        weathermap::VERSION,
        config.geonames.base_url
    );
    web::run(&config).await
}
