// Provider trait for weather data access
use crate::domain::conditions::CurrentConditions;
use crate::domain::forecast::ForecastSeries;
use crate::domain::location::LocationQuery;
use async_trait::async_trait;
use thiserror::Error;

/// Upstream resources the dashboard reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CurrentWeather,
    Forecast,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::CurrentWeather => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

/// Successful upstream body, passed through untouched
#[derive(Debug, Clone)]
pub struct RawPayload {
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Server missing OpenWeather API key")]
    MissingApiKey,
    #[error("Upstream returned {status}")]
    Upstream { status: u16, body: String },
    #[error("Upstream request failed: {0}")]
    Transport(String),
    #[error("Failed to decode upstream payload: {0}")]
    Decode(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// False when no API key is configured; checked before anything else
    fn has_credentials(&self) -> bool;

    /// Fetch an endpoint and return the body as-is
    async fn fetch_raw(&self, endpoint: Endpoint, query: &LocationQuery) -> Result<RawPayload, ProviderError>;

    /// Current conditions, normalized
    async fn current_conditions(&self, query: &LocationQuery) -> Result<CurrentConditions, ProviderError>;

    /// 3-hourly forecast series with the city's UTC offset
    async fn forecast_series(&self, query: &LocationQuery) -> Result<ForecastSeries, ProviderError>;
}
