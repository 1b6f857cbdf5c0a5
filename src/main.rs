// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use clima_agora::application::clock::SystemClock;
use clima_agora::application::forecast_service::ForecastService;
use clima_agora::application::proxy_service::ProxyService;
use clima_agora::application::weather_service::WeatherService;
use clima_agora::domain::forecast::HighlightThresholds;
use clima_agora::infrastructure::config::load_app_config;
use clima_agora::infrastructure::openweather_client::OpenWeatherClient;
use clima_agora::presentation::app_state::AppState;
use clima_agora::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config().context("Failed to load configuration")?;
    tracing::debug!("Loaded configuration: {:?}", config);

    if config.openweather.api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY is not set; API routes will answer 500");
    }

    // Create provider (infrastructure layer)
    let provider = Arc::new(OpenWeatherClient::new(
        config.openweather.base_url.clone(),
        config.openweather.api_key.clone(),
        config.openweather.timeout(),
    )?);

    // Create services (application layer)
    let thresholds = HighlightThresholds::from(&config.highlights);
    let weather_service = WeatherService::new(provider.clone());
    let forecast_service = ForecastService::new(provider.clone(), Arc::new(SystemClock), thresholds);
    let proxy_service = ProxyService::new(provider.clone());

    tracing::info!(
        "Highlight thresholds: {}% probability, {} mm volume",
        forecast_service.thresholds().probability_pct,
        forecast_service.thresholds().volume_mm
    );

    // Create application state
    let state = Arc::new(AppState {
        weather_service,
        forecast_service,
        proxy_service,
        default_lang: config.openweather.default_lang.clone(),
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server bind address")?;
    tracing::info!("Starting clima-agora service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
